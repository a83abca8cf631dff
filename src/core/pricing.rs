//! Pricing rules for checkout.
//!
//! Prices are whole currency units, so no rounding ever happens: a variant's price override
//! replaces the product price, and the line total is an exact integer product.

use crate::{
    entities::{product, variant},
    errors::{Error, Result},
};

/// Resolves the unit price for a product and optional variant.
///
/// A variant with a price override wins; a variant without one, or no variant at all,
/// falls back to the product price. Negative stored prices are clamped to zero.
#[must_use]
pub fn resolve_price(product: &product::Model, variant: Option<&variant::Model>) -> i64 {
    variant
        .and_then(|v| v.price)
        .unwrap_or(product.price)
        .max(0)
}

/// Computes `unit_price × quantity`.
///
/// # Errors
/// Returns [`Error::InvalidInput`] if the quantity is not positive or the total overflows.
pub fn line_total(unit_price: i64, quantity: i32) -> Result<i64> {
    if quantity <= 0 {
        return Err(Error::invalid_input("Jumlah pesanan harus lebih dari 0"));
    }
    unit_price
        .checked_mul(i64::from(quantity))
        .ok_or_else(|| Error::invalid_input("Total pesanan terlalu besar"))
}
