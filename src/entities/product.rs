//! Product entity - Represents a sellable catalog item.
//!
//! Each product carries a base price and its own stock counter. Variants (see
//! [`super::variant`]) may override the price and always keep a separate stock.
//! Prices are whole currency units (Rupiah), so they are stored as integers.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Whether a product or variant can be ordered
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListingStatus {
    /// Visible in the storefront and orderable
    #[sea_orm(string_value = "ACTIVE")]
    Active,
    /// Hidden from the storefront; checkout treats it as missing
    #[sea_orm(string_value = "INACTIVE")]
    Inactive,
}

/// Product database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name (e.g., "Kaos Polos")
    pub name: String,
    /// Optional long description shown on the product page
    pub description: Option<String>,
    /// Base price per unit in whole currency units
    pub price: i64,
    /// Units available when no variant is selected; never negative
    pub stock: i32,
    /// Listing status
    pub status: ListingStatus,
    /// Optional icon image reference
    pub icon: Option<String>,
    /// Optional gallery, a JSON array of image references
    pub gallery: Option<Json>,
    /// When the product was created
    pub created_at: DateTime,
    /// When the product was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One product has many variants
    #[sea_orm(has_many = "super::variant::Entity")]
    Variants,
    /// One product has many orders
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
}

impl Related<super::variant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Variants.def()
    }
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
