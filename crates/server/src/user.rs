//! Users table (minimal entity) and actor resolution.
//!
//! Authentication is an external concern; the server only resolves a user
//! row and hands the engine an explicit [`Actor`] with the pre-resolved
//! admin flag. The engine never consults this table.

use engine::Actor;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub username: String,
    pub password: String,
    pub is_admin: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Capability handed to the engine for every operation.
pub fn actor(user: &Model) -> Actor {
    Actor {
        id: user.username.clone(),
        admin: user.is_admin,
    }
}
