//! Site setting entity - Key/value pairs for store-wide settings.
//! Holds the values admins edit from the settings page, such as the store
//! name and the support WhatsApp number used when no reseller is attributed.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Site setting database model - stores key-value configuration pairs
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "site_settings")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Setting key (e.g., `"support_phone"`)
    #[sea_orm(unique)]
    pub key: String,
    /// Setting value stored as string
    pub value: String,
    /// When this setting was last modified
    pub updated_at: DateTime,
}

/// `SiteSetting` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
