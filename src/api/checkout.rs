//! Checkout endpoint.

use super::{ApiError, AppState};
use crate::{
    core::{
        checkout::{self, CheckoutRequest, CheckoutSettings},
        settings,
    },
    errors::Error,
};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};

/// Successful checkout reply.
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckoutResponse {
    /// Id of the created order
    pub order_id: i64,
    /// WhatsApp link carrying the order summary
    pub message_url: String,
    /// Reseller or store the order is attributed to
    pub attribution_name: String,
    /// Frozen order total
    pub total_price: i64,
}

/// `POST /checkout`
///
/// Store defaults are re-read from the site settings on every request so admin edits
/// apply without a restart.
pub async fn create_checkout(
    State(state): State<AppState>,
    payload: Result<Json<CheckoutRequest>, JsonRejection>,
) -> Result<Json<CheckoutResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| Error::invalid_input(format!("Data pesanan tidak valid: {e}")))?;

    let defaults = settings::load_store_defaults(&state.database, &state.config.store).await?;
    let checkout_settings = CheckoutSettings {
        defaults,
        unknown_variant: state.config.checkout.unknown_variant,
    };

    let receipt = checkout::checkout(&state.database, &checkout_settings, request).await?;

    Ok(Json(CheckoutResponse {
        order_id: receipt.order.id,
        message_url: receipt.message.url,
        attribution_name: receipt.attribution_name,
        total_price: receipt.order.total_price,
    }))
}
