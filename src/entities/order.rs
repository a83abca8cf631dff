//! Order entity - The persisted record of a single checkout.
//!
//! `total_price` is computed once at checkout (unit price × quantity) and never
//! recomputed. `reseller_id` is `None` for direct sales.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of an order.
///
/// `Pending → Confirmed → Shipped → Completed`, with `Cancelled` reachable from any
/// non-terminal state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Created by checkout, awaiting confirmation
    #[sea_orm(string_value = "PENDING")]
    Pending,
    /// Accepted by the store
    #[sea_orm(string_value = "CONFIRMED")]
    Confirmed,
    /// Handed to the courier
    #[sea_orm(string_value = "SHIPPED")]
    Shipped,
    /// Delivered
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
    /// Abandoned; its stock has been returned
    #[sea_orm(string_value = "CANCELLED")]
    Cancelled,
}

impl OrderStatus {
    /// Terminal states accept no further transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Whether the lifecycle allows moving from `self` to `next`.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        match (self, next) {
            (Self::Pending, Self::Confirmed)
            | (Self::Confirmed, Self::Shipped)
            | (Self::Shipped, Self::Completed) => true,
            (current, Self::Cancelled) => !current.is_terminal(),
            _ => false,
        }
    }

    /// Wire representation, e.g. `"PENDING"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Shipped => "SHIPPED",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Unique identifier for the order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Ordered product
    pub product_id: i64,
    /// Selected variant, if any
    pub variant_id: Option<i64>,
    /// Attributed reseller; `None` for direct sales
    pub reseller_id: Option<i64>,
    /// Customer display name
    pub customer_name: String,
    /// Customer phone number, if given
    pub customer_phone: Option<String>,
    /// Units ordered, always positive
    pub quantity: i32,
    /// Unit price × quantity at checkout time, in whole currency units
    pub total_price: i64,
    /// Current lifecycle status
    pub status: OrderStatus,
    /// Free-text notes from the customer
    pub notes: Option<String>,
    /// When the order was placed
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Order and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each order references one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
    /// Each order references at most one variant
    #[sea_orm(
        belongs_to = "super::variant::Entity",
        from = "Column::VariantId",
        to = "super::variant::Column::Id"
    )]
    Variant,
    /// Each order is attributed to at most one reseller
    #[sea_orm(
        belongs_to = "super::reseller::Entity",
        from = "Column::ResellerId",
        to = "super::reseller::Column::Id",
        on_delete = "SetNull"
    )]
    Reseller,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::variant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Variant.def()
    }
}

impl Related<super::reseller::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reseller.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
