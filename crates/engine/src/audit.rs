//! Audit facts for privileged mutations.
//!
//! The engine emits structured facts; persisting them is someone else's job.
//! Recording happens synchronously right after the mutation commits, and a
//! recording failure is logged but never rolls the mutation back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    ItineraryReplaced,
    TripDuplicated,
    TripLockChanged,
    TripDeleted,
}

impl AuditAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ItineraryReplaced => "itinerary_replaced",
            Self::TripDuplicated => "trip_duplicated",
            Self::TripLockChanged => "trip_lock_changed",
            Self::TripDeleted => "trip_deleted",
        }
    }
}

/// Write-once record of a privileged mutation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditFact {
    pub action: AuditAction,
    pub entity_type: String,
    pub entity_id: Uuid,
    pub actor: String,
    pub detail: String,
    pub recorded_at: DateTime<Utc>,
}

impl AuditFact {
    pub fn trip(action: AuditAction, trip_id: Uuid, actor: &str, detail: impl Into<String>) -> Self {
        Self {
            action,
            entity_type: "trip".to_string(),
            entity_id: trip_id,
            actor: actor.to_string(),
            detail: detail.into(),
            recorded_at: Utc::now(),
        }
    }
}

/// Sink for audit facts.
///
/// Implementations may persist wherever they like; returning an error only
/// produces a warning log on the engine side.
pub trait AuditRecorder: Send + Sync {
    fn record(&self, fact: AuditFact) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// Default sink: facts go to the log stream.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingAuditRecorder;

impl AuditRecorder for TracingAuditRecorder {
    fn record(&self, fact: AuditFact) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        tracing::info!(
            action = fact.action.as_str(),
            entity_type = %fact.entity_type,
            entity_id = %fact.entity_id,
            actor = %fact.actor,
            detail = %fact.detail,
            "audit"
        );
        Ok(())
    }
}
