//! Shared test utilities for the storefront.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    config::{StoreConfig, UnknownVariantPolicy},
    core::{
        catalog::{self, NewProduct},
        checkout::CheckoutSettings,
        reseller,
        settings::StoreDefaults,
    },
    entities,
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Store defaults matching `StoreConfig::default()`: store "Admin", phone `6281234567890`, UTC+7.
#[allow(clippy::missing_panics_doc, clippy::expect_used)]
pub fn test_store_defaults() -> StoreDefaults {
    StoreDefaults::from_config(&StoreConfig::default()).expect("default store config is valid")
}

/// Checkout settings with the default store and the reject policy for unknown variants.
pub fn test_checkout_settings() -> CheckoutSettings {
    CheckoutSettings {
        defaults: test_store_defaults(),
        unknown_variant: UnknownVariantPolicy::Reject,
    }
}

/// Product input with no description, icon or gallery.
pub fn test_new_product(name: &str, price: i64, stock: i32) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        description: None,
        price,
        stock,
        icon: None,
        gallery: Vec::new(),
    }
}

/// Creates a test product with custom price and stock.
pub async fn create_custom_product(
    db: &DatabaseConnection,
    name: &str,
    price: i64,
    stock: i32,
) -> Result<entities::product::Model> {
    catalog::create_product(db, test_new_product(name, price, stock)).await
}

/// Creates a `Size` variant with the given value, price override and stock.
pub async fn create_test_variant(
    db: &DatabaseConnection,
    product_id: i64,
    value: &str,
    price: Option<i64>,
    stock: i32,
) -> Result<entities::variant::Model> {
    catalog::create_variant(
        db,
        product_id,
        "Size".to_string(),
        value.to_string(),
        price,
        stock,
    )
    .await
}

/// Creates a reseller whose phone is `0899-0000-1111`.
pub async fn create_test_reseller(
    db: &DatabaseConnection,
    name: &str,
    code: &str,
) -> Result<entities::reseller::Model> {
    reseller::create_reseller(
        db,
        name.to_string(),
        "0899-0000-1111".to_string(),
        code.to_string(),
    )
    .await
}

/// Sets up a complete test environment with a product.
/// Returns (db, product); the product costs 10.000 and has 10 units in stock.
pub async fn setup_with_product() -> Result<(DatabaseConnection, entities::product::Model)> {
    let db = setup_test_db().await?;
    let product = create_custom_product(&db, "Test Product", 10_000, 10).await?;
    Ok((db, product))
}
