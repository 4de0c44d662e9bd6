//! Manually logged actual spend.
//!
//! Expenses hang off the trip, not off a stop: they record what was really
//! paid, independent of how the itinerary is structured. The ledger never
//! caches aggregates; every summary recomputes from the current rows.

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Currency, EngineError, Money, ResultEngine, util::parse_uuid};

/// Enumerated spend category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Transport,
    Accommodation,
    Activities,
    Meals,
    Other,
}

impl ExpenseCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::Accommodation => "accommodation",
            Self::Activities => "activities",
            Self::Meals => "meals",
            Self::Other => "other",
        }
    }
}

impl TryFrom<&str> for ExpenseCategory {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "transport" => Ok(Self::Transport),
            "accommodation" => Ok(Self::Accommodation),
            "activities" => Ok(Self::Activities),
            "meals" => Ok(Self::Meals),
            "other" => Ok(Self::Other),
            other => Err(EngineError::validation(
                "category",
                format!("invalid expense category: {other}"),
            )),
        }
    }
}

/// Caller input for logging an expense.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseDraft {
    pub category: ExpenseCategory,
    pub amount: Money,
    /// Defaults to EUR when omitted.
    pub currency: Option<Currency>,
    pub description: Option<String>,
    pub spent_on: NaiveDate,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub category: ExpenseCategory,
    /// Strictly positive minor-unit amount.
    pub amount: Money,
    pub currency: Currency,
    pub description: Option<String>,
    pub spent_on: NaiveDate,
}

impl Expense {
    /// Builds a new expense, rejecting non-positive amounts.
    pub fn new(
        trip_id: Uuid,
        category: ExpenseCategory,
        amount: Money,
        currency: Currency,
        description: Option<String>,
        spent_on: NaiveDate,
    ) -> ResultEngine<Self> {
        if !amount.is_positive() {
            return Err(EngineError::validation("amount", "amount must be > 0"));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            trip_id,
            category,
            amount,
            currency,
            description,
            spent_on,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub trip_id: String,
    pub category: String,
    pub amount_minor: i64,
    pub currency: String,
    pub description: Option<String>,
    pub spent_on: Date,
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

impl TryFrom<Model> for Expense {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "expense")?,
            trip_id: parse_uuid(&model.trip_id, "trip")?,
            category: ExpenseCategory::try_from(model.category.as_str())?,
            amount: Money::new(model.amount_minor),
            currency: crate::util::model_currency(&model.currency)?,
            description: model.description,
            spent_on: model.spent_on,
        })
    }
}

impl From<&Expense> for ActiveModel {
    fn from(expense: &Expense) -> Self {
        Self {
            id: ActiveValue::Set(expense.id.to_string()),
            trip_id: ActiveValue::Set(expense.trip_id.to_string()),
            category: ActiveValue::Set(expense.category.as_str().to_string()),
            amount_minor: ActiveValue::Set(expense.amount.minor()),
            currency: ActiveValue::Set(expense.currency.code().to_string()),
            description: ActiveValue::Set(expense.description.clone()),
            spent_on: ActiveValue::Set(expense.spent_on),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_amounts() {
        let trip_id = Uuid::new_v4();
        let date = NaiveDate::from_ymd_opt(2026, 5, 2).unwrap();
        for minor in [0, -1] {
            let err = Expense::new(
                trip_id,
                ExpenseCategory::Meals,
                Money::new(minor),
                Currency::default(),
                None,
                date,
            )
            .unwrap_err();
            assert!(matches!(err, EngineError::Validation(_)));
        }
    }
}
