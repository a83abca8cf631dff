//! Order business logic - persisting orders and moving them through their lifecycle.
//!
//! Creating an order and decrementing the stock it draws from happen in one database
//! transaction: the conditional decrement runs first and the order row is inserted only if
//! it succeeds. Any error drops the transaction, so neither write becomes visible.

use crate::{
    core::stock::{self, StockTarget},
    entities::{Order, OrderStatus, order},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, QuerySelect, Set, TransactionTrait, prelude::*, sea_query::Expr};
use tracing::{info, instrument};

/// Everything needed to persist an order, with price and attribution already resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    /// Ordered product
    pub product_id: i64,
    /// Attributed reseller, `None` for direct sales
    pub reseller_id: Option<i64>,
    /// Counter to decrement; a variant target is also the order's variant reference
    pub stock_target: StockTarget,
    /// Customer display name
    pub customer_name: String,
    /// Customer phone number
    pub customer_phone: Option<String>,
    /// Units ordered
    pub quantity: i32,
    /// Frozen total in whole currency units
    pub total_price: i64,
    /// Free-text notes
    pub notes: Option<String>,
}

/// Inserts a PENDING order and decrements its stock counter as one unit of work.
///
/// # Errors
/// - [`Error::InvalidInput`] for a blank customer name, non-positive quantity or negative
///   total (checked before the store is touched)
/// - [`Error::InsufficientStock`] if the counter cannot cover the quantity at write time
/// - [`Error::Database`] if either write fails; nothing is committed in that case
#[instrument(skip(db, new_order), fields(product_id = new_order.product_id, quantity = new_order.quantity))]
pub async fn create_order(db: &DatabaseConnection, new_order: NewOrder) -> Result<order::Model> {
    if new_order.customer_name.trim().is_empty() {
        return Err(Error::invalid_input("Nama pemesan wajib diisi"));
    }
    if new_order.quantity <= 0 {
        return Err(Error::invalid_input("Jumlah pesanan harus lebih dari 0"));
    }
    if new_order.total_price < 0 {
        return Err(Error::invalid_input("Total pesanan tidak valid"));
    }

    // Use a transaction to ensure atomicity
    let txn = db.begin().await?;

    stock::decrement_stock_atomic(&txn, new_order.stock_target, new_order.quantity).await?;

    let order_model = order::ActiveModel {
        product_id: Set(new_order.product_id),
        variant_id: Set(new_order.stock_target.variant_id()),
        reseller_id: Set(new_order.reseller_id),
        customer_name: Set(new_order.customer_name.trim().to_string()),
        customer_phone: Set(new_order
            .customer_phone
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())),
        quantity: Set(new_order.quantity),
        total_price: Set(new_order.total_price),
        status: Set(OrderStatus::Pending),
        notes: Set(new_order
            .notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let order = order_model.insert(&txn).await?;

    txn.commit().await?;

    info!(
        order_id = order.id,
        total_price = order.total_price,
        reseller_id = ?order.reseller_id,
        "Order created"
    );
    Ok(order)
}

/// Retrieves an order by id.
///
/// # Errors
/// Returns [`Error::Database`] if the query fails.
pub async fn get_order_by_id<C>(db: &C, order_id: i64) -> Result<Option<order::Model>>
where
    C: ConnectionTrait,
{
    Order::find_by_id(order_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists orders newest first, optionally filtered by status.
///
/// # Errors
/// Returns [`Error::Database`] if the query fails.
pub async fn list_orders<C>(
    db: &C,
    status: Option<OrderStatus>,
    limit: Option<u64>,
) -> Result<Vec<order::Model>>
where
    C: ConnectionTrait,
{
    let mut query = Order::find()
        .order_by_desc(order::Column::CreatedAt)
        .order_by_desc(order::Column::Id);
    if let Some(status) = status {
        query = query.filter(order::Column::Status.eq(status));
    }
    if let Some(limit) = limit {
        query = query.limit(limit);
    }
    query.all(db).await.map_err(Into::into)
}

/// Moves an order to `next`, enforcing the lifecycle.
///
/// The status write is conditional on the status read, so two concurrent updates cannot
/// both succeed from the same state. Cancelling returns the ordered units to the stock
/// counter they came from, in the same transaction.
///
/// # Errors
/// [`Error::NotFound`] for an unknown order, [`Error::InvalidStatusTransition`] when the
/// lifecycle forbids the move, [`Error::InvalidInput`] when a restock would overflow the
/// counter (the status change is rolled back with it).
#[instrument(skip(db))]
pub async fn update_order_status(
    db: &DatabaseConnection,
    order_id: i64,
    next: OrderStatus,
) -> Result<order::Model> {
    let txn = db.begin().await?;

    let current = Order::find_by_id(order_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::not_found("order", order_id))?;

    if !current.status.can_transition_to(next) {
        return Err(Error::InvalidStatusTransition {
            from: current.status,
            to: next,
        });
    }

    let result = Order::update_many()
        .col_expr(order::Column::Status, Expr::value(next))
        .filter(order::Column::Id.eq(order_id))
        .filter(order::Column::Status.eq(current.status))
        .exec(&txn)
        .await?;
    if result.rows_affected == 0 {
        // Lost a race with another status update
        let latest = Order::find_by_id(order_id)
            .one(&txn)
            .await?
            .ok_or_else(|| Error::not_found("order", order_id))?;
        return Err(Error::InvalidStatusTransition {
            from: latest.status,
            to: next,
        });
    }

    if next == OrderStatus::Cancelled {
        let target = current
            .variant_id
            .map_or(StockTarget::Product(current.product_id), StockTarget::Variant);
        stock::increment_stock_atomic(&txn, target, current.quantity).await?;
    }

    let updated = Order::find_by_id(order_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::not_found("order", order_id))?;

    txn.commit().await?;

    info!(order_id, from = %current.status, to = %next, "Order status updated");
    Ok(updated)
}
