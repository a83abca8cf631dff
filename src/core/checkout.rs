//! Checkout - turns a storefront order request into a persisted order and a WhatsApp link.
//!
//! Stages, in order: input validation, catalog lookup, pricing, stock gate, reseller
//! resolution, order persistence (stock decrement + insert in one transaction) and
//! message composition. Nothing is written before the persistence stage, and the stock
//! gate is re-checked by the conditional decrement inside it, so concurrent checkouts on
//! the same counter can never oversell.
//!
//! Checkout is deliberately not idempotent: two identical requests create two orders.

use crate::{
    config::UnknownVariantPolicy,
    core::{
        catalog,
        notification::{self, ComposedMessage},
        order::{self, NewOrder},
        pricing,
        reseller::{self, ResellerResolution},
        settings::StoreDefaults,
        stock,
    },
    entities::order as order_entity,
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use tracing::{info, instrument, warn};

/// Customer contact details entered at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CustomerInfo {
    /// Customer name; required
    pub name: String,
    /// Customer phone; optional
    #[serde(default)]
    pub phone: Option<String>,
}

/// A checkout request as submitted by the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CheckoutRequest {
    /// Product to order
    pub product_id: i64,
    /// Optional variant of that product
    #[serde(default)]
    pub variant_id: Option<i64>,
    /// Units to order; must be positive
    pub quantity: i32,
    /// Reseller reference code from a shared link
    #[serde(default)]
    pub reseller_code: Option<String>,
    /// Customer contact details
    pub customer: CustomerInfo,
    /// Free-text notes
    #[serde(default)]
    pub notes: Option<String>,
}

/// Explicit inputs checkout needs besides the request and the database.
#[derive(Debug, Clone)]
pub struct CheckoutSettings {
    /// Store-wide attribution and contact defaults
    pub defaults: StoreDefaults,
    /// Handling of variant ids that do not resolve
    pub unknown_variant: UnknownVariantPolicy,
}

/// Result of a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutReceipt {
    /// The persisted order
    pub order: order_entity::Model,
    /// Order summary and its WhatsApp link
    pub message: ComposedMessage,
    /// Who the order is attributed to (reseller or store name)
    pub attribution_name: String,
}

fn validate_request(request: &CheckoutRequest) -> Result<()> {
    if request.customer.name.trim().is_empty() {
        return Err(Error::invalid_input("Nama pemesan wajib diisi"));
    }
    if request.quantity <= 0 {
        return Err(Error::invalid_input("Jumlah pesanan harus lebih dari 0"));
    }
    Ok(())
}

/// Runs the full checkout pipeline.
///
/// # Errors
/// - [`Error::InvalidInput`] for a blank customer name or non-positive quantity
/// - [`Error::NotFound`] for an unknown/inactive product, or variant under the reject policy
/// - [`Error::InsufficientStock`] when the resolved counter cannot cover the quantity
/// - [`Error::Database`] when the store fails; no partial order or stock change remains
#[instrument(skip(db, settings, request), fields(product_id = request.product_id, quantity = request.quantity))]
pub async fn checkout(
    db: &DatabaseConnection,
    settings: &CheckoutSettings,
    request: CheckoutRequest,
) -> Result<CheckoutReceipt> {
    validate_request(&request)?;

    let entry = catalog::lookup(
        db,
        request.product_id,
        request.variant_id,
        settings.unknown_variant,
    )
    .await?;

    let unit_price = pricing::resolve_price(&entry.product, entry.variant());
    let total_price = pricing::line_total(unit_price, request.quantity)?;

    // Early rejection; the conditional decrement re-checks at write time
    stock::validate_stock(entry.available_stock(), request.quantity).inspect_err(|_| {
        warn!(
            target = ?entry.stock_target(),
            available = entry.available_stock(),
            "Checkout rejected: insufficient stock"
        );
    })?;

    let resolution: ResellerResolution =
        reseller::resolve_reseller(db, request.reseller_code.as_deref(), &settings.defaults)
            .await?;

    let order = order::create_order(
        db,
        NewOrder {
            product_id: entry.product.id,
            reseller_id: resolution.reseller_id(),
            stock_target: entry.stock_target(),
            customer_name: request.customer.name,
            customer_phone: request.customer.phone,
            quantity: request.quantity,
            total_price,
            notes: request.notes,
        },
    )
    .await?;

    let message = notification::compose_message(
        &order,
        &entry.product,
        entry.variant(),
        &resolution,
        &settings.defaults,
    );

    info!(
        order_id = order.id,
        unit_price,
        total_price,
        attribution = resolution.attribution_name(),
        "Checkout completed"
    );

    Ok(CheckoutReceipt {
        order,
        message,
        attribution_name: resolution.attribution_name().to_string(),
    })
}
