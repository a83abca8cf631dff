//! Core business logic - framework-agnostic catalog, pricing, stock, reseller, order and
//! checkout operations. The HTTP layer in [`crate::api`] only translates requests and
//! errors; everything with invariants lives here.

/// Product and variant lookups and maintenance
pub mod catalog;
/// The checkout pipeline
pub mod checkout;
/// Order summary message and WhatsApp link
pub mod notification;
/// Order persistence and status lifecycle
pub mod order;
/// Unit price and line total rules
pub mod pricing;
/// Reseller attribution
pub mod reseller;
/// Site settings and store defaults
pub mod settings;
/// Stock validation and atomic stock mutations
pub mod stock;
