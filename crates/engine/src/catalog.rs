//! Read-only catalog data: cities and their attractions.
//!
//! The catalog is maintained elsewhere; the engine only ever reads it. The
//! [`CatalogReader`] trait is the seam: the estimator and the itinerary
//! validation go through it at call time, so cost indexes are never cached on
//! stops and catalog edits take effect on the next estimate.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, Money, ResultEngine, activity::ActivityKind, util::parse_uuid};

/// A destination city with its relative daily-living-cost score.
///
/// `cost_index` is minor units per day. 0 is a valid score, not an error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub id: Uuid,
    pub name: String,
    pub country: String,
    pub cost_index: Money,
}

/// A catalog attraction an activity may reference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attraction {
    pub id: Uuid,
    pub city_id: Uuid,
    pub name: String,
    pub cost: Money,
    pub kind: ActivityKind,
}

/// Read-only access to catalog records.
#[async_trait]
pub trait CatalogReader: Send + Sync {
    /// Looks up a city; missing ids are a [`EngineError::NotFound`].
    async fn city(&self, city_id: Uuid) -> ResultEngine<City>;

    /// Looks up an attraction; missing ids are a [`EngineError::NotFound`].
    async fn attraction(&self, attraction_id: Uuid) -> ResultEngine<Attraction>;
}

/// Catalog reader backed by the `cities`/`attractions` tables.
///
/// This is the default wiring; the tables are written by whatever maintains
/// the catalog, never by the engine.
#[derive(Clone, Debug)]
pub struct DbCatalog {
    database: DatabaseConnection,
}

impl DbCatalog {
    pub fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }
}

#[async_trait]
impl CatalogReader for DbCatalog {
    async fn city(&self, city_id: Uuid) -> ResultEngine<City> {
        let model = cities::Entity::find_by_id(city_id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("city {city_id}")))?;
        City::try_from(model)
    }

    async fn attraction(&self, attraction_id: Uuid) -> ResultEngine<Attraction> {
        let model = attractions::Entity::find_by_id(attraction_id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("attraction {attraction_id}")))?;
        Attraction::try_from(model)
    }
}

pub mod cities {
    use super::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "cities")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: String,
        pub name: String,
        pub country: String,
        pub cost_index_minor: i64,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod attractions {
    use super::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "attractions")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: String,
        pub city_id: String,
        pub name: String,
        pub cost_minor: i64,
        pub kind: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

impl TryFrom<cities::Model> for City {
    type Error = EngineError;

    fn try_from(model: cities::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "city")?,
            name: model.name,
            country: model.country,
            cost_index: Money::new(model.cost_index_minor),
        })
    }
}

impl TryFrom<attractions::Model> for Attraction {
    type Error = EngineError;

    fn try_from(model: attractions::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "attraction")?,
            city_id: parse_uuid(&model.city_id, "city")?,
            name: model.name,
            cost: Money::new(model.cost_minor),
            kind: ActivityKind::try_from(model.kind.as_str())?,
        })
    }
}
