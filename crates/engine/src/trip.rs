//! The `Trip` is the aggregate root: it owns stops, activities, expenses and
//! at most one share link, and everything cascades when it goes away.

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    EngineError, ResultEngine,
    expense::Expense,
    share::SharedTrip,
    stop::Stop,
    util::{duration_in_days, parse_uuid},
};

/// Lifecycle state of a trip.
///
/// The engine does not derive the status from dates; it is set by the caller
/// and only reset by the cloner (clones always start over as `Planning`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripStatus {
    #[default]
    Planning,
    Upcoming,
    Ongoing,
    Past,
}

impl TripStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::Upcoming => "upcoming",
            Self::Ongoing => "ongoing",
            Self::Past => "past",
        }
    }
}

impl TryFrom<&str> for TripStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "planning" => Ok(Self::Planning),
            "upcoming" => Ok(Self::Upcoming),
            "ongoing" => Ok(Self::Ongoing),
            "past" => Ok(Self::Past),
            other => Err(EngineError::validation(
                "status",
                format!("invalid trip status: {other}"),
            )),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: TripStatus,
    pub cover_image: Option<String>,
    pub owner: String,
    pub is_locked: bool,
    /// Privileged free text. Never included in shared projections and only
    /// surfaced to admins by the read operations.
    pub admin_notes: Option<String>,
}

impl Trip {
    /// Builds a new trip after checking the date-range invariant.
    pub fn new(
        name: String,
        description: Option<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        status: TripStatus,
        cover_image: Option<String>,
        owner: &str,
    ) -> ResultEngine<Self> {
        if end_date <= start_date {
            return Err(EngineError::validation(
                "end_date",
                "end_date must be after start_date",
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            description,
            start_date,
            end_date,
            status,
            cover_image,
            owner: owner.to_string(),
            is_locked: false,
            admin_notes: None,
        })
    }

    /// Day span of the whole trip, used for the per-day spend average.
    pub fn duration_in_days(&self) -> i64 {
        duration_in_days(self.start_date, self.end_date)
    }
}

/// Caller input for creating a trip.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripDraft {
    pub name: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: Option<TripStatus>,
    pub cover_image: Option<String>,
}

/// Caller input for updating trip core fields. `None` leaves a field
/// unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<TripStatus>,
    pub cover_image: Option<String>,
}

/// A trip with its nested itinerary, ledger and share state, as returned by
/// the read operations.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TripView {
    pub trip: Trip,
    pub stops: Vec<StopView>,
    pub expenses: Vec<Expense>,
    pub share: Option<SharedTrip>,
}

/// One stop with its activities, in itinerary order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StopView {
    pub stop: Stop,
    pub activities: Vec<crate::activity::Activity>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "trips")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub start_date: Date,
    pub end_date: Date,
    pub status: String,
    pub cover_image: Option<String>,
    pub owner: String,
    pub is_locked: bool,
    pub admin_notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Trip {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "trip")?,
            name: model.name,
            description: model.description,
            start_date: model.start_date,
            end_date: model.end_date,
            status: TripStatus::try_from(model.status.as_str())?,
            cover_image: model.cover_image,
            owner: model.owner,
            is_locked: model.is_locked,
            admin_notes: model.admin_notes,
        })
    }
}

impl From<&Trip> for ActiveModel {
    fn from(trip: &Trip) -> Self {
        Self {
            id: ActiveValue::Set(trip.id.to_string()),
            name: ActiveValue::Set(trip.name.clone()),
            description: ActiveValue::Set(trip.description.clone()),
            start_date: ActiveValue::Set(trip.start_date),
            end_date: ActiveValue::Set(trip.end_date),
            status: ActiveValue::Set(trip.status.as_str().to_string()),
            cover_image: ActiveValue::Set(trip.cover_image.clone()),
            owner: ActiveValue::Set(trip.owner.clone()),
            is_locked: ActiveValue::Set(trip.is_locked),
            admin_notes: ActiveValue::Set(trip.admin_notes.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn new_trip_rejects_inverted_range() {
        let err = Trip::new(
            "Alps".to_string(),
            None,
            date(2026, 7, 10),
            date(2026, 7, 10),
            TripStatus::Planning,
            None,
            "alice",
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }

    #[test]
    fn duration_spans_whole_range() {
        let trip = Trip::new(
            "Alps".to_string(),
            None,
            date(2026, 7, 10),
            date(2026, 7, 17),
            TripStatus::Upcoming,
            None,
            "alice",
        )
        .unwrap();
        assert_eq!(trip.duration_in_days(), 7);
    }
}
