use std::collections::HashSet;

use sea_orm::{QueryFilter, Statement, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, ResultEngine,
    activity::{self, Activity},
    audit::{AuditAction, AuditFact},
    itinerary::StopDraft,
    stop::{self, Stop},
    trip::Trip,
};

use super::{
    Engine,
    access::{Actor, ensure_trip_write},
    normalize_optional_text, with_tx,
};

impl Engine {
    /// Atomically replace the full stop set of a trip.
    ///
    /// Stop order and per-stop activity sets are edited together in one UI
    /// flow, so the engine favors whole-itinerary replacement over
    /// incremental patches. Caller-supplied ordering is taken from array
    /// position only; persisted positions are always `index + 1`.
    ///
    /// Validation runs before any row is touched and the discard + rewrite
    /// happens in a single transaction, so no partial stop set is ever
    /// observable.
    pub async fn replace_itinerary(
        &self,
        trip_id: Uuid,
        drafts: Vec<StopDraft>,
        actor: &Actor,
    ) -> ResultEngine<()> {
        let owner = with_tx!(self, |db_tx| {
            let model = self.require_trip(&db_tx, trip_id).await?;
            ensure_trip_write(&model, actor)?;
            let trip = Trip::try_from(model)?;

            self.validate_drafts(&trip, &drafts).await?;

            // Discard the previous itinerary, leaf first.
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
                .exec(&db_tx)
                .await?;

            for (index, draft) in drafts.iter().enumerate() {
                let stop = Stop {
                    id: Uuid::new_v4(),
                    trip_id,
                    city_id: draft.city_id,
                    position: index as i32 + 1,
                    start_date: draft.start_date,
                    end_date: draft.end_date,
                    notes: normalize_optional_text(draft.notes.as_deref()),
                };
                stop::ActiveModel::from(&stop).insert(&db_tx).await?;

                for activity_draft in &draft.activities {
                    let activity = Activity {
                        id: Uuid::new_v4(),
                        stop_id: stop.id,
                        attraction_id: activity_draft.attraction_id,
                        name: activity_draft.name.trim().to_string(),
                        kind: activity_draft.kind,
                        cost: activity_draft.cost,
                        duration_min: activity_draft.duration_min,
                        scheduled_at: activity_draft.scheduled_at,
                        notes: normalize_optional_text(activity_draft.notes.as_deref()),
                    };
                    activity::ActiveModel::from(&activity).insert(&db_tx).await?;
                }
            }

            Ok::<_, EngineError>(trip.owner)
        })?;

        if actor.admin && owner != actor.id {
            self.record_audit(AuditFact::trip(
                AuditAction::ItineraryReplaced,
                trip_id,
                &actor.id,
                format!("replaced itinerary of {owner}'s trip"),
            ));
        }
        Ok(())
    }

    /// Check every itinerary precondition, reporting the offending field and
    /// stop index. Nothing is written while this can still fail.
    async fn validate_drafts(&self, trip: &Trip, drafts: &[StopDraft]) -> ResultEngine<()> {
        let mut seen_cities: HashSet<Uuid> = HashSet::new();

        for (index, draft) in drafts.iter().enumerate() {
            if !seen_cities.insert(draft.city_id) {
                return Err(EngineError::validation_at(
                    index,
                    "city_id",
                    "itinerary already visits this city",
                ));
            }

            if draft.end_date <= draft.start_date {
                return Err(EngineError::validation_at(
                    index,
                    "end_date",
                    "end_date must be after start_date",
                ));
            }
            if draft.start_date < trip.start_date || draft.end_date > trip.end_date {
                return Err(EngineError::validation_at(
                    index,
                    "start_date",
                    "stop dates must fall within the trip range",
                ));
            }

            match self.catalog().city(draft.city_id).await {
                Ok(_) => {}
                Err(EngineError::NotFound(_)) => {
                    return Err(EngineError::validation_at(index, "city_id", "unknown city"));
                }
                Err(err) => return Err(err),
            }

            for activity in &draft.activities {
                if activity.name.trim().is_empty() {
                    return Err(EngineError::validation_at(
                        index,
                        "activities.name",
                        "activity name must not be empty",
                    ));
                }
                if let Some(cost) = activity.cost
                    && cost.is_negative()
                {
                    return Err(EngineError::validation_at(
                        index,
                        "activities.cost",
                        "activity cost must be >= 0",
                    ));
                }
                if let Some(attraction_id) = activity.attraction_id {
                    match self.catalog().attraction(attraction_id).await {
                        Ok(_) => {}
                        Err(EngineError::NotFound(_)) => {
                            return Err(EngineError::validation_at(
                                index,
                                "activities.attraction_id",
                                "unknown attraction",
                            ));
                        }
                        Err(err) => return Err(err),
                    }
                }
            }
        }

        Ok(())
    }
}
