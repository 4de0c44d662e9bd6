use sea_orm::{QueryFilter, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, ResultEngine,
    expense::{self, Expense, ExpenseDraft},
};

use super::{
    Engine,
    access::{Actor, ensure_trip_write},
    normalize_optional_text, with_tx,
};

impl Engine {
    /// Log an actual expense against a trip.
    ///
    /// Nothing is recalculated here; summaries always recompute from the
    /// current rows.
    pub async fn add_expense(
        &self,
        trip_id: Uuid,
        draft: ExpenseDraft,
        actor: &Actor,
    ) -> ResultEngine<Expense> {
        let expense = Expense::new(
            trip_id,
            draft.category,
            draft.amount,
            draft.currency.unwrap_or_default(),
            normalize_optional_text(draft.description.as_deref()),
            draft.spent_on,
        )?;
        with_tx!(self, |db_tx| {
            let model = self.require_trip(&db_tx, trip_id).await?;
            ensure_trip_write(&model, actor)?;
            expense::ActiveModel::from(&expense).insert(&db_tx).await?;
            Ok(expense)
        })
    }

    /// Remove a logged expense.
    pub async fn remove_expense(
        &self,
        trip_id: Uuid,
        expense_id: Uuid,
        actor: &Actor,
    ) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let model = self.require_trip(&db_tx, trip_id).await?;
            ensure_trip_write(&model, actor)?;

            let deleted = expense::Entity::delete_many()
                .filter(expense::Column::Id.eq(expense_id.to_string()))
                .filter(expense::Column::TripId.eq(trip_id.to_string()))
                .exec(&db_tx)
                .await?;
            if deleted.rows_affected == 0 {
                return Err(EngineError::NotFound(format!("expense {expense_id}")));
            }
            Ok(())
        })
    }
}
