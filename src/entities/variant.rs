//! Variant entity - A purchasable sub-option of a product (size, color, ...).
//!
//! A variant is a `name: value` pair such as `Size: L`. Its stock counter is independent
//! of the parent product's, and its price, when set, overrides the product price.

use super::product::ListingStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Variant database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_variants")]
pub struct Model {
    /// Unique identifier for the variant
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Parent product
    pub product_id: i64,
    /// Option name, e.g. `"Size"`
    pub name: String,
    /// Option value, e.g. `"L"`
    pub value: String,
    /// Price override; `None` means the product price applies
    pub price: Option<i64>,
    /// Units available for this variant; never negative
    pub stock: i32,
    /// Listing status
    pub status: ListingStatus,
}

impl Model {
    /// Human-readable label, e.g. `"Size: L"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}: {}", self.name, self.value)
    }
}

/// Defines relationships between Variant and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each variant belongs to one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
    /// A variant can be referenced by many orders
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
