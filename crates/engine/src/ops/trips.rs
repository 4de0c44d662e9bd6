use std::collections::HashMap;

use sea_orm::{
    ActiveValue, DatabaseTransaction, QueryFilter, QueryOrder, Statement, TransactionTrait,
    prelude::*,
};
use uuid::Uuid;

use crate::{
    EngineError, ResultEngine, activity,
    audit::{AuditAction, AuditFact},
    expense, share, stop, trip,
    trip::{Trip, TripDraft, TripPatch, TripView},
};

use super::{
    Engine,
    access::{Actor, ensure_trip_read, ensure_trip_write},
    normalize_optional_text, normalize_required_name, with_tx,
};

impl Engine {
    /// Create a new trip owned by the actor.
    pub async fn create_trip(&self, draft: TripDraft, actor: &Actor) -> ResultEngine<Uuid> {
        let name = normalize_required_name(&draft.name, "trip")?;
        let trip = Trip::new(
            name,
            normalize_optional_text(draft.description.as_deref()),
            draft.start_date,
            draft.end_date,
            draft.status.unwrap_or_default(),
            normalize_optional_text(draft.cover_image.as_deref()),
            &actor.id,
        )?;
        let model: trip::ActiveModel = (&trip).into();
        with_tx!(self, |db_tx| {
            model.insert(&db_tx).await?;
            Ok(trip.id)
        })
    }

    /// Return a trip with its stops, activities, expenses and share state.
    ///
    /// Admin notes are stripped for non-admin viewers.
    pub async fn trip(&self, trip_id: Uuid, actor: &Actor) -> ResultEngine<TripView> {
        with_tx!(self, |db_tx| {
            let model = self.require_trip(&db_tx, trip_id).await?;
            ensure_trip_read(&model, actor)?;

            let mut trip = Trip::try_from(model)?;
            if !actor.admin {
                trip.admin_notes = None;
            }

            let stops = self.load_stop_views(&db_tx, trip_id).await?;

            let expenses = expense::Entity::find()
                .filter(expense::Column::TripId.eq(trip_id.to_string()))
                .order_by_asc(expense::Column::SpentOn)
                .all(&db_tx)
                .await?
                .into_iter()
                .map(expense::Expense::try_from)
                .collect::<ResultEngine<Vec<_>>>()?;

            let share = share::Entity::find()
                .filter(share::Column::TripId.eq(trip_id.to_string()))
                .one(&db_tx)
                .await?
                .map(share::SharedTrip::try_from)
                .transpose()?;

            Ok(TripView {
                trip,
                stops,
                expenses,
                share,
            })
        })
    }

    /// Update trip core fields.
    pub async fn update_trip(
        &self,
        trip_id: Uuid,
        patch: TripPatch,
        actor: &Actor,
    ) -> ResultEngine<Trip> {
        with_tx!(self, |db_tx| {
            let model = self.require_trip(&db_tx, trip_id).await?;
            ensure_trip_write(&model, actor)?;

            let mut trip = Trip::try_from(model)?;
            if let Some(name) = patch.name {
                trip.name = normalize_required_name(&name, "trip")?;
            }
            if let Some(description) = patch.description {
                trip.description = normalize_optional_text(Some(&description));
            }
            if let Some(start_date) = patch.start_date {
                trip.start_date = start_date;
            }
            if let Some(end_date) = patch.end_date {
                trip.end_date = end_date;
            }
            if let Some(status) = patch.status {
                trip.status = status;
            }
            if let Some(cover_image) = patch.cover_image {
                trip.cover_image = normalize_optional_text(Some(&cover_image));
            }

            if trip.end_date <= trip.start_date {
                return Err(EngineError::validation(
                    "end_date",
                    "end_date must be after start_date",
                ));
            }

            // Shrinking the range must not strand existing stops.
            let stops = stop::Entity::find()
                .filter(stop::Column::TripId.eq(trip_id.to_string()))
                .all(&db_tx)
                .await?;
            for stop in &stops {
                if stop.start_date < trip.start_date || stop.end_date > trip.end_date {
                    return Err(EngineError::validation(
                        "start_date",
                        "an existing stop falls outside the new trip range",
                    ));
                }
            }

            let model: trip::ActiveModel = (&trip).into();
            model.update(&db_tx).await?;
            Ok(trip)
        })
    }

    /// Admin-only lock toggle. Locked trips reject owner mutations until an
    /// admin unlocks them.
    pub async fn set_locked(&self, trip_id: Uuid, locked: bool, actor: &Actor) -> ResultEngine<()> {
        if !actor.admin {
            return Err(EngineError::Forbidden(
                "only an admin may lock or unlock a trip".to_string(),
            ));
        }
        with_tx!(self, |db_tx| {
            let model = self.require_trip(&db_tx, trip_id).await?;
            let update = trip::ActiveModel {
                id: ActiveValue::Set(model.id),
                is_locked: ActiveValue::Set(locked),
                ..Default::default()
            };
            update.update(&db_tx).await?;
            Ok::<_, EngineError>(())
        })?;
        self.record_audit(AuditFact::trip(
            AuditAction::TripLockChanged,
            trip_id,
            &actor.id,
            if locked { "locked" } else { "unlocked" },
        ));
        Ok(())
    }

    /// Delete a trip and everything it owns.
    pub async fn delete_trip(&self, trip_id: Uuid, actor: &Actor) -> ResultEngine<()> {
        let owner = with_tx!(self, |db_tx| {
            let model = self.require_trip(&db_tx, trip_id).await?;
            ensure_trip_write(&model, actor)?;
            self.delete_trip_rows(&db_tx, trip_id).await?;
            Ok::<_, EngineError>(model.owner)
        })?;
        if actor.admin && owner != actor.id {
            self.record_audit(AuditFact::trip(
                AuditAction::TripDeleted,
                trip_id,
                &actor.id,
                format!("deleted trip of {owner}"),
            ));
        }
        Ok(())
    }

    /// Explicit cascade delete within one DB transaction.
    ///
    /// Not every relationship is FK-backed with ON DELETE CASCADE on older
    /// databases, so the rows are removed explicitly, leaf first.
    pub(super) async fn delete_trip_rows(
        &self,
        db_tx: &DatabaseTransaction,
        trip_id: Uuid,
    ) -> ResultEngine<()> {
        let backend = db_tx.get_database_backend();

        db_tx
            .execute(Statement::from_sql_and_values(
                backend,
                "DELETE FROM activities WHERE stop_id IN (SELECT id FROM stops WHERE trip_id = ?);",
                vec![trip_id.to_string().into()],
            ))
            .await?;

        stop::Entity::delete_many()
            .filter(stop::Column::TripId.eq(trip_id.to_string()))
            .exec(db_tx)
            .await?;

        expense::Entity::delete_many()
            .filter(expense::Column::TripId.eq(trip_id.to_string()))
            .exec(db_tx)
            .await?;

        share::Entity::delete_many()
            .filter(share::Column::TripId.eq(trip_id.to_string()))
            .exec(db_tx)
            .await?;

        trip::Entity::delete_many()
            .filter(trip::Column::Id.eq(trip_id.to_string()))
            .exec(db_tx)
            .await?;

        Ok(())
    }

    /// Load a trip's stops with their activities, in itinerary order.
    pub(super) async fn load_stop_views(
        &self,
        db_tx: &DatabaseTransaction,
        trip_id: Uuid,
    ) -> ResultEngine<Vec<trip::StopView>> {
        let stop_models = stop::Entity::find()
            .filter(stop::Column::TripId.eq(trip_id.to_string()))
            .order_by_asc(stop::Column::Position)
            .all(db_tx)
            .await?;

        if stop_models.is_empty() {
            return Ok(Vec::new());
        }

        let stop_ids: Vec<String> = stop_models.iter().map(|s| s.id.clone()).collect();
        let mut by_stop: HashMap<String, Vec<activity::Activity>> = HashMap::new();
        for model in activity::Entity::find()
            .filter(activity::Column::StopId.is_in(stop_ids))
            .order_by_asc(activity::Column::Id)
            .all(db_tx)
            .await?
        {
            let stop_id = model.stop_id.clone();
            by_stop
                .entry(stop_id)
                .or_default()
                .push(activity::Activity::try_from(model)?);
        }

        let mut views = Vec::with_capacity(stop_models.len());
        for model in stop_models {
            let activities = by_stop.remove(&model.id).unwrap_or_default();
            views.push(trip::StopView {
                stop: stop::Stop::try_from(model)?,
                activities,
            });
        }
        Ok(views)
    }
}
