//! Actor identity and per-trip authorization checks.
//!
//! Who the actor is (and whether they are an admin) is resolved by the
//! caller — typically the HTTP layer's auth middleware — and passed in
//! explicitly. The engine never consults ambient session state.

use sea_orm::{DatabaseTransaction, prelude::*};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, trip};

use super::Engine;

/// The identity on whose behalf an operation runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Actor {
    pub id: String,
    /// Pre-resolved by the caller; the engine treats it as a capability.
    pub admin: bool,
}

impl Actor {
    pub fn user(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            admin: false,
        }
    }

    pub fn admin(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            admin: true,
        }
    }
}

/// Owner or admin may read the trip (admin notes are filtered later).
pub(super) fn ensure_trip_read(trip: &trip::Model, actor: &Actor) -> ResultEngine<()> {
    if actor.admin || trip.owner == actor.id {
        return Ok(());
    }
    Err(EngineError::Forbidden(
        "only the owner or an admin may view this trip".to_string(),
    ))
}

/// Owner (trip unlocked) or admin (lock bypassed) may mutate the trip.
pub(super) fn ensure_trip_write(trip: &trip::Model, actor: &Actor) -> ResultEngine<()> {
    if actor.admin {
        return Ok(());
    }
    if trip.owner != actor.id {
        return Err(EngineError::Forbidden(
            "only the owner or an admin may edit this trip".to_string(),
        ));
    }
    if trip.is_locked {
        return Err(EngineError::LockedTrip(trip.id.clone()));
    }
    Ok(())
}

/// Share-link management is owner-only; admins are not exempt.
pub(super) fn ensure_trip_owner(trip: &trip::Model, actor: &Actor) -> ResultEngine<()> {
    if trip.owner == actor.id {
        return Ok(());
    }
    Err(EngineError::Forbidden(
        "only the owner may manage this trip's share link".to_string(),
    ))
}

impl Engine {
    pub(super) async fn require_trip(
        &self,
        db: &DatabaseTransaction,
        trip_id: Uuid,
    ) -> ResultEngine<trip::Model> {
        trip::Entity::find_by_id(trip_id.to_string())
            .one(db)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("trip {trip_id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trip_model(owner: &str, locked: bool) -> trip::Model {
        trip::Model {
            id: Uuid::new_v4().to_string(),
            name: "Alps".to_string(),
            description: None,
            start_date: chrono::NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
            end_date: chrono::NaiveDate::from_ymd_opt(2026, 7, 8).unwrap(),
            status: "planning".to_string(),
            cover_image: None,
            owner: owner.to_string(),
            is_locked: locked,
            admin_notes: None,
        }
    }

    #[test]
    fn locked_trip_blocks_owner_but_not_admin() {
        let trip = trip_model("alice", true);
        let err = ensure_trip_write(&trip, &Actor::user("alice")).unwrap_err();
        assert!(matches!(err, EngineError::LockedTrip(_)));
        assert!(ensure_trip_write(&trip, &Actor::admin("root")).is_ok());
    }

    #[test]
    fn stranger_is_forbidden() {
        let trip = trip_model("alice", false);
        assert!(matches!(
            ensure_trip_write(&trip, &Actor::user("bob")),
            Err(EngineError::Forbidden(_))
        ));
        assert!(matches!(
            ensure_trip_read(&trip, &Actor::user("bob")),
            Err(EngineError::Forbidden(_))
        ));
    }

    #[test]
    fn share_management_is_owner_only_even_for_admins() {
        let trip = trip_model("alice", false);
        assert!(ensure_trip_owner(&trip, &Actor::user("alice")).is_ok());
        assert!(matches!(
            ensure_trip_owner(&trip, &Actor::admin("root")),
            Err(EngineError::Forbidden(_))
        ));
    }
}
