//! Public share link for a trip.
//!
//! At most one `SharedTrip` row exists per trip (unique index on `trip_id`);
//! its `share_id` token is the only path by which a third party reaches trip
//! data. Revoking deletes the row and the token dies with it.

use base64::Engine as _;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, util::parse_uuid};

/// Owner-chosen settings for a share link.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareSettings {
    pub is_public: bool,
    pub can_copy: bool,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedTrip {
    pub id: Uuid,
    pub trip_id: Uuid,
    /// Opaque URL-safe token; globally unique, checked before commit.
    pub share_id: String,
    pub is_public: bool,
    pub can_copy: bool,
    pub expires_at: Option<DateTime<Utc>>,
}

impl SharedTrip {
    pub fn new(
        trip_id: Uuid,
        is_public: bool,
        can_copy: bool,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            trip_id,
            share_id: new_share_token(),
            is_public,
            can_copy,
            expires_at,
        }
    }

    /// Replaces the token with a freshly generated one. Used by the collision
    /// retry loop; callers never see an intermediate token.
    pub(crate) fn regenerate_token(&mut self) {
        self.share_id = new_share_token();
    }

    /// A link is live when it is public and not past its expiry.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.is_public && self.expires_at.is_none_or(|expiry| expiry > now)
    }
}

/// What an anonymous or third-party viewer gets to see through a share
/// link. Deliberately excludes admin notes, the owner and the lock state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SharedTripProjection {
    pub name: String,
    pub description: Option<String>,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub status: crate::trip::TripStatus,
    pub cover_image: Option<String>,
    pub can_copy: bool,
    pub stops: Vec<crate::trip::StopView>,
}

/// 256 bits of randomness, URL-safe base64 without padding.
fn new_share_token() -> String {
    let mut bytes = [0u8; 32];
    bytes[..16].copy_from_slice(Uuid::new_v4().as_bytes());
    bytes[16..].copy_from_slice(Uuid::new_v4().as_bytes());
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "shared_trips")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub trip_id: String,
    pub share_id: String,
    pub is_public: bool,
    pub can_copy: bool,
    pub expires_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::trip::Entity",
        from = "Column::TripId",
        to = "super::trip::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Trip,
}

impl Related<super::trip::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Trip.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for SharedTrip {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "share")?,
            trip_id: parse_uuid(&model.trip_id, "trip")?,
            share_id: model.share_id,
            is_public: model.is_public,
            can_copy: model.can_copy,
            expires_at: model.expires_at,
        })
    }
}

impl From<&SharedTrip> for ActiveModel {
    fn from(share: &SharedTrip) -> Self {
        Self {
            id: ActiveValue::Set(share.id.to_string()),
            trip_id: ActiveValue::Set(share.trip_id.to_string()),
            share_id: ActiveValue::Set(share.share_id.clone()),
            is_public: ActiveValue::Set(share.is_public),
            can_copy: ActiveValue::Set(share.can_copy),
            expires_at: ActiveValue::Set(share.expires_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_url_safe_and_distinct() {
        let a = new_share_token();
        let b = new_share_token();
        assert_ne!(a, b);
        assert!(
            a.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn liveness_honors_visibility_and_expiry() {
        let now = Utc::now();
        let mut share = SharedTrip::new(Uuid::new_v4(), true, true, None);
        assert!(share.is_live(now));

        share.is_public = false;
        assert!(!share.is_live(now));

        share.is_public = true;
        share.expires_at = Some(now - chrono::Duration::hours(1));
        assert!(!share.is_live(now));
    }
}
