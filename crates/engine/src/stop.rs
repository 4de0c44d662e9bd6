//! One city-visit segment of a trip.
//!
//! Stops are wholly owned by their trip and are only ever written as a set:
//! the itinerary replace operation discards and rewrites all of them, so the
//! `position` sequence (1-based, dense) is an output of the engine, never an
//! input taken from the caller.

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, util::duration_in_days, util::parse_uuid};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stop {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub city_id: Uuid,
    /// 1-based position within the trip. Dense: after every mutation the
    /// positions of a trip's stops are exactly `1..=n`.
    pub position: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub notes: Option<String>,
}

impl Stop {
    /// Night count of the stay, the multiplier for the city cost index.
    pub fn duration_in_days(&self) -> i64 {
        duration_in_days(self.start_date, self.end_date)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "stops")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub trip_id: String,
    pub city_id: String,
    pub position: i32,
    pub start_date: Date,
    pub end_date: Date,
    pub notes: Option<String>,
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

impl TryFrom<Model> for Stop {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "stop")?,
            trip_id: parse_uuid(&model.trip_id, "trip")?,
            city_id: parse_uuid(&model.city_id, "city")?,
            position: model.position,
            start_date: model.start_date,
            end_date: model.end_date,
            notes: model.notes,
        })
    }
}

impl From<&Stop> for ActiveModel {
    fn from(stop: &Stop) -> Self {
        Self {
            id: ActiveValue::Set(stop.id.to_string()),
            trip_id: ActiveValue::Set(stop.trip_id.to_string()),
            city_id: ActiveValue::Set(stop.city_id.to_string()),
            position: ActiveValue::Set(stop.position),
            start_date: ActiveValue::Set(stop.start_date),
            end_date: ActiveValue::Set(stop.end_date),
            notes: ActiveValue::Set(stop.notes.clone()),
        }
    }
}
