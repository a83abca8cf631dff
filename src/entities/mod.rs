//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod order;
pub mod product;
pub mod reseller;
pub mod site_setting;
pub mod variant;

// Re-export specific types to avoid conflicts
pub use order::{Column as OrderColumn, Entity as Order, Model as OrderModel, OrderStatus};
pub use product::{
    Column as ProductColumn, Entity as Product, ListingStatus, Model as ProductModel,
};
pub use reseller::{Column as ResellerColumn, Entity as Reseller, Model as ResellerModel};
pub use site_setting::{
    Column as SiteSettingColumn, Entity as SiteSetting, Model as SiteSettingModel,
};
pub use variant::{Column as VariantColumn, Entity as Variant, Model as VariantModel};
