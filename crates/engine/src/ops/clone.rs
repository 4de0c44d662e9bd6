use chrono::Utc;
use sea_orm::{DatabaseTransaction, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, ResultEngine,
    activity::{self, Activity},
    audit::{AuditAction, AuditFact},
    share::{self, SharedTrip},
    stop::{self, Stop},
    trip::{self, Trip, TripStatus},
};

use super::{Engine, access::Actor, with_tx};

impl Engine {
    /// Admin-only: duplicate a trip under its current owner as a reusable
    /// template.
    ///
    /// Structure only: stops and activities are deep-copied, expenses are
    /// not. The clone starts over as `planning`, carries no share link, is
    /// unlocked, and its admin notes are replaced by a provenance note
    /// naming the source trip.
    pub async fn duplicate_template(&self, trip_id: Uuid, actor: &Actor) -> ResultEngine<Uuid> {
        if !actor.admin {
            return Err(EngineError::Forbidden(
                "only an admin may duplicate a trip as template".to_string(),
            ));
        }

        let new_trip_id = with_tx!(self, |db_tx| {
            let source_model = self.require_trip(&db_tx, trip_id).await?;
            let source = Trip::try_from(source_model)?;

            let clone = Trip {
                id: Uuid::new_v4(),
                name: format!("[Template] {}", source.name),
                description: source.description.clone(),
                start_date: source.start_date,
                end_date: source.end_date,
                status: TripStatus::Planning,
                cover_image: source.cover_image.clone(),
                owner: source.owner.clone(),
                is_locked: false,
                admin_notes: Some(format!("Duplicated from trip {}", source.id)),
            };
            trip::ActiveModel::from(&clone).insert(&db_tx).await?;
            self.copy_itinerary(&db_tx, source.id, clone.id).await?;

            Ok::<_, EngineError>(clone.id)
        })?;

        self.record_audit(AuditFact::trip(
            AuditAction::TripDuplicated,
            new_trip_id,
            &actor.id,
            format!("template duplicated from trip {trip_id}"),
        ));
        Ok(new_trip_id)
    }

    /// Copy a publicly shared trip into the requester's own account.
    ///
    /// Unlike template duplication this carries the full original plan —
    /// stops, activities **and** expenses — because a personal copy should
    /// keep the budgeted spend. Share link, admin notes and lock state reset
    /// to defaults on the clone.
    pub async fn copy_shared(&self, share_id: &str, actor: &Actor) -> ResultEngine<Uuid> {
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
            if !link.can_copy {
                return Err(EngineError::Forbidden(
                    "this share link does not allow copying".to_string(),
                ));
            }

            let source_model = self.require_trip(&db_tx, link.trip_id).await?;
            let source = Trip::try_from(source_model)?;
            if source.owner == actor.id {
                return Err(EngineError::Forbidden(
                    "cannot copy your own trip".to_string(),
                ));
            }

            let clone = Trip {
                id: Uuid::new_v4(),
                name: format!("{} (Copy)", source.name),
                description: source.description.clone(),
                start_date: source.start_date,
                end_date: source.end_date,
                status: TripStatus::Planning,
                cover_image: source.cover_image.clone(),
                owner: actor.id.clone(),
                is_locked: false,
                admin_notes: None,
            };
            trip::ActiveModel::from(&clone).insert(&db_tx).await?;
            self.copy_itinerary(&db_tx, source.id, clone.id).await?;
            self.copy_expenses(&db_tx, source.id, clone.id).await?;

            Ok(clone.id)
        })
    }

    /// Deep-copy stops and their activities under a new trip.
    ///
    /// Positions are recomputed 1..N from the source order rather than
    /// copied verbatim, so a corrupted source with gaps still yields a dense
    /// clone.
    async fn copy_itinerary(
        &self,
        db_tx: &DatabaseTransaction,
        source_trip_id: Uuid,
        new_trip_id: Uuid,
    ) -> ResultEngine<()> {
        let source_stops = stop::Entity::find()
            .filter(stop::Column::TripId.eq(source_trip_id.to_string()))
            .order_by_asc(stop::Column::Position)
            .all(db_tx)
            .await?;

        for (index, source_model) in source_stops.into_iter().enumerate() {
            let source_stop = Stop::try_from(source_model)?;
            let new_stop = Stop {
                id: Uuid::new_v4(),
                trip_id: new_trip_id,
                position: index as i32 + 1,
                ..source_stop.clone()
            };
            stop::ActiveModel::from(&new_stop).insert(db_tx).await?;

            let activities = activity::Entity::find()
                .filter(activity::Column::StopId.eq(source_stop.id.to_string()))
                .order_by_asc(activity::Column::Id)
                .all(db_tx)
                .await?;
            for activity_model in activities {
                let source_activity = Activity::try_from(activity_model)?;
                let new_activity = Activity {
                    id: Uuid::new_v4(),
                    stop_id: new_stop.id,
                    ..source_activity
                };
                activity::ActiveModel::from(&new_activity)
                    .insert(db_tx)
                    .await?;
            }
        }

        Ok(())
    }

    /// Deep-copy the expense ledger under a new trip.
    async fn copy_expenses(
        &self,
        db_tx: &DatabaseTransaction,
        source_trip_id: Uuid,
        new_trip_id: Uuid,
    ) -> ResultEngine<()> {
        let rows = crate::expense::Entity::find()
            .filter(crate::expense::Column::TripId.eq(source_trip_id.to_string()))
            .order_by_asc(crate::expense::Column::SpentOn)
            .all(db_tx)
            .await?;

        for model in rows {
            let source = crate::expense::Expense::try_from(model)?;
            let copy = crate::expense::Expense {
                id: Uuid::new_v4(),
                trip_id: new_trip_id,
                ..source
            };
            crate::expense::ActiveModel::from(&copy).insert(db_tx).await?;
        }

        Ok(())
    }
}
