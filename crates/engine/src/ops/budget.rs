use sea_orm::{DatabaseTransaction, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    Money, ResultEngine,
    budget::{BudgetView, CostEstimate, ExpenseSummary},
    expense,
    util::duration_in_days,
};

use super::{Engine, access::Actor, access::ensure_trip_read, with_tx};

impl Engine {
    /// Derive the planned cost of a trip from catalog data.
    ///
    /// Pure read: same stops, same activities and same catalog rows yield
    /// the same estimate. City cost indexes are looked up at estimate time,
    /// never cached on stops.
    pub async fn estimate(&self, trip_id: Uuid, actor: &Actor) -> ResultEngine<CostEstimate> {
        with_tx!(self, |db_tx| {
            let model = self.require_trip(&db_tx, trip_id).await?;
            ensure_trip_read(&model, actor)?;
            self.estimate_in_tx(&db_tx, trip_id).await
        })
    }

    /// Aggregate the actual spend logged for a trip.
    pub async fn summarize(&self, trip_id: Uuid, actor: &Actor) -> ResultEngine<ExpenseSummary> {
        with_tx!(self, |db_tx| {
            let model = self.require_trip(&db_tx, trip_id).await?;
            ensure_trip_read(&model, actor)?;
            let trip_days = duration_in_days(model.start_date, model.end_date);
            self.summarize_in_tx(&db_tx, trip_id, trip_days).await
        })
    }

    /// Estimated vs. actual, with their variance.
    pub async fn budget(&self, trip_id: Uuid, actor: &Actor) -> ResultEngine<BudgetView> {
        with_tx!(self, |db_tx| {
            let model = self.require_trip(&db_tx, trip_id).await?;
            ensure_trip_read(&model, actor)?;
            let trip_days = duration_in_days(model.start_date, model.end_date);
            let estimated = self.estimate_in_tx(&db_tx, trip_id).await?;
            let actual = self.summarize_in_tx(&db_tx, trip_id, trip_days).await?;
            Ok(BudgetView::new(estimated, actual))
        })
    }

    pub(super) async fn estimate_in_tx(
        &self,
        db_tx: &DatabaseTransaction,
        trip_id: Uuid,
    ) -> ResultEngine<CostEstimate> {
        let stops = self.load_stop_views(db_tx, trip_id).await?;

        let mut activity_cost = Money::ZERO;
        let mut living_cost = Money::ZERO;
        for view in &stops {
            for activity in &view.activities {
                activity_cost += activity.cost.unwrap_or(Money::ZERO);
            }
            let city = self.catalog().city(view.stop.city_id).await?;
            living_cost += Money::new(city.cost_index.minor() * view.stop.duration_in_days());
        }

        Ok(CostEstimate::new(activity_cost, living_cost))
    }

    pub(super) async fn summarize_in_tx(
        &self,
        db_tx: &DatabaseTransaction,
        trip_id: Uuid,
        trip_days: i64,
    ) -> ResultEngine<ExpenseSummary> {
        let expenses = expense::Entity::find()
            .filter(expense::Column::TripId.eq(trip_id.to_string()))
            .order_by_asc(expense::Column::SpentOn)
            .all(db_tx)
            .await?
            .into_iter()
            .map(expense::Expense::try_from)
            .collect::<ResultEngine<Vec<_>>>()?;

        Ok(ExpenseSummary::from_expenses(&expenses, trip_days))
    }
}
