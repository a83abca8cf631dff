//! Reseller entity - A third party that orders can be attributed to.
//!
//! Resellers share links carrying their `reference_code`; the numeric `id` is the
//! internal key and never leaves the back office.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Reseller database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "resellers")]
pub struct Model {
    /// Internal identifier, used as the orders foreign key
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name used when greeting in the order message
    pub name: String,
    /// WhatsApp contact number that receives attributed orders
    pub phone: String,
    /// Externally shared reference code
    #[sea_orm(unique)]
    pub reference_code: String,
    /// When the reseller was registered
    pub created_at: DateTime,
}

/// Defines relationships between Reseller and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One reseller is credited with many orders
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
