//! A planned, priced action within a stop.
//!
//! An activity either references a catalog attraction or is custom
//! (`attraction_id = None`). Either way name and cost are stored on the
//! activity itself, so later catalog edits do not rewrite history.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, Money, util::parse_uuid};

/// Enumerated activity category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Sightseeing,
    Museum,
    Outdoor,
    Food,
    Entertainment,
    Shopping,
    Transit,
    #[default]
    Other,
}

impl ActivityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sightseeing => "sightseeing",
            Self::Museum => "museum",
            Self::Outdoor => "outdoor",
            Self::Food => "food",
            Self::Entertainment => "entertainment",
            Self::Shopping => "shopping",
            Self::Transit => "transit",
            Self::Other => "other",
        }
    }
}

impl TryFrom<&str> for ActivityKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "sightseeing" => Ok(Self::Sightseeing),
            "museum" => Ok(Self::Museum),
            "outdoor" => Ok(Self::Outdoor),
            "food" => Ok(Self::Food),
            "entertainment" => Ok(Self::Entertainment),
            "shopping" => Ok(Self::Shopping),
            "transit" => Ok(Self::Transit),
            "other" => Ok(Self::Other),
            other => Err(EngineError::validation(
                "kind",
                format!("invalid activity kind: {other}"),
            )),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: Uuid,
    pub stop_id: Uuid,
    /// Catalog reference; `None` marks a custom/ad-hoc activity.
    pub attraction_id: Option<Uuid>,
    pub name: String,
    pub kind: ActivityKind,
    /// Planned cost in minor units; `None` counts as 0 in the estimator.
    pub cost: Option<Money>,
    /// Planned duration in minutes.
    pub duration_min: Option<i32>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "activities")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub stop_id: String,
    pub attraction_id: Option<String>,
    pub name: String,
    pub kind: String,
    pub cost_minor: Option<i64>,
    pub duration_min: Option<i32>,
    pub scheduled_at: Option<DateTimeUtc>,
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::stop::Entity",
        from = "Column::StopId",
        to = "super::stop::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Stop,
}

impl Related<super::stop::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Stop.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Activity {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let attraction_id = model
            .attraction_id
            .as_deref()
            .map(|id| parse_uuid(id, "attraction"))
            .transpose()?;
        Ok(Self {
            id: parse_uuid(&model.id, "activity")?,
            stop_id: parse_uuid(&model.stop_id, "stop")?,
            attraction_id,
            name: model.name,
            kind: ActivityKind::try_from(model.kind.as_str())?,
            cost: model.cost_minor.map(Money::new),
            duration_min: model.duration_min,
            scheduled_at: model.scheduled_at,
            notes: model.notes,
        })
    }
}

impl From<&Activity> for ActiveModel {
    fn from(activity: &Activity) -> Self {
        Self {
            id: ActiveValue::Set(activity.id.to_string()),
            stop_id: ActiveValue::Set(activity.stop_id.to_string()),
            attraction_id: ActiveValue::Set(activity.attraction_id.map(|id| id.to_string())),
            name: ActiveValue::Set(activity.name.clone()),
            kind: ActiveValue::Set(activity.kind.as_str().to_string()),
            cost_minor: ActiveValue::Set(activity.cost.map(Money::minor)),
            duration_min: ActiveValue::Set(activity.duration_min),
            scheduled_at: ActiveValue::Set(activity.scheduled_at),
            notes: ActiveValue::Set(activity.notes.clone()),
        }
    }
}
