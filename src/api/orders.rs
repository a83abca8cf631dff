//! Order back-office endpoints.

use super::{ApiError, AppState};
use crate::{
    core::order,
    entities::{OrderStatus, order as order_entity},
    errors::Error,
};
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};
use serde::Deserialize;

/// Body of `PATCH /orders/:id/status`.
#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    /// Requested status
    pub status: OrderStatus,
}

fn parse_order_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, Error> {
    path.map(|Path(id)| id)
        .map_err(|e| Error::invalid_input(format!("ID pesanan tidak valid: {e}")))
}

/// `GET /orders/:id`
pub async fn get_order(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<order_entity::Model>, ApiError> {
    let order_id = parse_order_id(path)?;
    let order = order::get_order_by_id(&state.database, order_id)
        .await?
        .ok_or_else(|| Error::not_found("order", order_id))?;
    Ok(Json(order))
}

/// `PATCH /orders/:id/status`
pub async fn update_status(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<StatusUpdate>, JsonRejection>,
) -> Result<Json<order_entity::Model>, ApiError> {
    let order_id = parse_order_id(path)?;
    let Json(update) =
        payload.map_err(|e| Error::invalid_input(format!("Status pesanan tidak valid: {e}")))?;
    let order = order::update_order_status(&state.database, order_id, update.status).await?;
    Ok(Json(order))
}
