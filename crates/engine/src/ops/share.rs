use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, ResultEngine,
    share::{self, ShareSettings, SharedTrip, SharedTripProjection},
    trip::Trip,
};

use super::{
    Engine,
    access::{Actor, ensure_trip_owner},
    with_tx,
};

/// Token regeneration attempts before giving up. A collision on 256 random
/// bits is already astronomically unlikely; hitting the cap means something
/// else is broken.
const TOKEN_RETRIES: usize = 4;

impl Engine {
    /// Issue the share link for a trip. One link per trip: a second create
    /// fails with [`EngineError::Conflict`] while the first link stays
    /// valid.
    pub async fn create_share_link(
        &self,
        trip_id: Uuid,
        settings: ShareSettings,
        actor: &Actor,
    ) -> ResultEngine<SharedTrip> {
        with_tx!(self, |db_tx| {
            let model = self.require_trip(&db_tx, trip_id).await?;
            ensure_trip_owner(&model, actor)?;

            let existing = share::Entity::find()
                .filter(share::Column::TripId.eq(trip_id.to_string()))
                .one(&db_tx)
                .await?;
            if existing.is_some() {
                return Err(EngineError::Conflict(format!(
                    "share link for trip {trip_id}"
                )));
            }

            let mut link = SharedTrip::new(
                trip_id,
                settings.is_public,
                settings.can_copy,
                settings.expires_at,
            );

            // Tokens are random; a clash is retried here and never surfaced.
            let mut attempts = 0;
            while share::Entity::find()
                .filter(share::Column::ShareId.eq(link.share_id.clone()))
                .one(&db_tx)
                .await?
                .is_some()
            {
                attempts += 1;
                if attempts >= TOKEN_RETRIES {
                    return Err(EngineError::Conflict("share token space".to_string()));
                }
                link.regenerate_token();
            }

            share::ActiveModel::from(&link).insert(&db_tx).await?;
            Ok(link)
        })
    }

    /// Delete the share link; any outstanding token stops resolving
    /// immediately.
    pub async fn revoke_share_link(&self, trip_id: Uuid, actor: &Actor) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let model = self.require_trip(&db_tx, trip_id).await?;
            ensure_trip_owner(&model, actor)?;

            let deleted = share::Entity::delete_many()
                .filter(share::Column::TripId.eq(trip_id.to_string()))
                .exec(&db_tx)
                .await?;
            if deleted.rows_affected == 0 {
                return Err(EngineError::NotFound(format!(
                    "share link for trip {trip_id}"
                )));
            }
            Ok(())
        })
    }

    /// Toggle link visibility without rotating the token.
    pub async fn update_share_visibility(
        &self,
        trip_id: Uuid,
        is_public: bool,
        actor: &Actor,
    ) -> ResultEngine<SharedTrip> {
        with_tx!(self, |db_tx| {
            let model = self.require_trip(&db_tx, trip_id).await?;
            ensure_trip_owner(&model, actor)?;

            let existing = share::Entity::find()
                .filter(share::Column::TripId.eq(trip_id.to_string()))
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::NotFound(format!("share link for trip {trip_id}")))?;

            let update = share::ActiveModel {
                id: ActiveValue::Set(existing.id.clone()),
                is_public: ActiveValue::Set(is_public),
                ..Default::default()
            };
            let updated = update.update(&db_tx).await?;
            SharedTrip::try_from(updated)
        })
    }

    /// Resolve a share token into the public projection.
    ///
    /// This is the only path by which a viewer who is not the owner (or an
    /// admin) reaches trip data. Unknown, non-public and expired tokens all
    /// resolve the same way: [`EngineError::NotFound`].
    pub async fn shared_trip(&self, share_id: &str) -> ResultEngine<SharedTripProjection> {
        with_tx!(self, |db_tx| {
            let share_model = share::Entity::find()
                .filter(share::Column::ShareId.eq(share_id.to_string()))
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::NotFound(format!("share {share_id}")))?;
            let link = SharedTrip::try_from(share_model)?;
            if !link.is_live(Utc::now()) {
                return Err(EngineError::NotFound(format!("share {share_id}")));
            }

            let trip_model = self.require_trip(&db_tx, link.trip_id).await?;
            let trip = Trip::try_from(trip_model)?;
            let stops = self.load_stop_views(&db_tx, trip.id).await?;

            Ok(SharedTripProjection {
                name: trip.name,
                description: trip.description,
                start_date: trip.start_date,
                end_date: trip.end_date,
                status: trip.status,
                cover_image: trip.cover_image,
                can_copy: link.can_copy,
                stops,
            })
        })
    }
}
