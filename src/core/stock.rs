//! Stock business logic - validation and atomic stock mutations.
//!
//! Stock is never read, compared and written back in separate steps. Every decrement is a
//! single conditional statement:
//! `UPDATE … SET stock = stock - n WHERE id = ? AND stock >= n`
//! and an update touching zero rows means the stock was insufficient at write time. This
//! keeps concurrent checkouts (and admin edits) from driving a counter below zero.

use crate::{
    entities::{Product, Variant, product, variant},
    errors::{Error, Result},
};
use sea_orm::{prelude::*, sea_query::Expr};
use serde::Serialize;
use tracing::{debug, warn};

/// The stock counter an order draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum StockTarget {
    /// The product's own counter (no variant selected)
    Product(i64),
    /// A variant's counter; the parent product's counter is left alone
    Variant(i64),
}

impl StockTarget {
    const fn entity_name(self) -> &'static str {
        match self {
            Self::Product(_) => "product",
            Self::Variant(_) => "variant",
        }
    }

    const fn id(self) -> i64 {
        match self {
            Self::Product(id) | Self::Variant(id) => id,
        }
    }

    /// Variant id stored on an order drawing from this counter.
    #[must_use]
    pub const fn variant_id(self) -> Option<i64> {
        match self {
            Self::Product(_) => None,
            Self::Variant(id) => Some(id),
        }
    }
}

/// Checks a requested quantity against the available stock.
///
/// # Errors
/// Returns [`Error::InvalidInput`] for a non-positive quantity and
/// [`Error::InsufficientStock`] when `requested > available`.
pub fn validate_stock(available: i32, requested: i32) -> Result<()> {
    if requested <= 0 {
        return Err(Error::invalid_input("Jumlah pesanan harus lebih dari 0"));
    }
    if requested > available {
        return Err(Error::InsufficientStock {
            available,
            requested,
        });
    }
    Ok(())
}

/// Reads the current value of a stock counter.
///
/// # Errors
/// Returns [`Error::NotFound`] if the row does not exist.
pub async fn current_stock<C>(db: &C, target: StockTarget) -> Result<i32>
where
    C: ConnectionTrait,
{
    let stock = match target {
        StockTarget::Product(id) => Product::find_by_id(id).one(db).await?.map(|p| p.stock),
        StockTarget::Variant(id) => Variant::find_by_id(id).one(db).await?.map(|v| v.stock),
    };
    stock.ok_or_else(|| Error::not_found(target.entity_name(), target.id()))
}

/// Atomically decrements a stock counter, re-validating availability at write time.
///
/// Pass a transaction as `db` to make the decrement part of a larger unit of work.
///
/// # Errors
/// Returns [`Error::InsufficientStock`] if the counter holds fewer than `quantity` units
/// when the statement runs, [`Error::NotFound`] if the row does not exist.
pub async fn decrement_stock_atomic<C>(db: &C, target: StockTarget, quantity: i32) -> Result<()>
where
    C: ConnectionTrait,
{
    if quantity <= 0 {
        return Err(Error::invalid_input("Jumlah pesanan harus lebih dari 0"));
    }

    let result = match target {
        StockTarget::Product(id) => {
            Product::update_many()
                .col_expr(
                    product::Column::Stock,
                    Expr::col(product::Column::Stock).sub(quantity),
                )
                .filter(product::Column::Id.eq(id))
                .filter(product::Column::Stock.gte(quantity))
                .exec(db)
                .await?
        }
        StockTarget::Variant(id) => {
            Variant::update_many()
                .col_expr(
                    variant::Column::Stock,
                    Expr::col(variant::Column::Stock).sub(quantity),
                )
                .filter(variant::Column::Id.eq(id))
                .filter(variant::Column::Stock.gte(quantity))
                .exec(db)
                .await?
        }
    };

    if result.rows_affected == 0 {
        // Either the row vanished or another writer got there first
        let available = current_stock(db, target).await?;
        warn!(
            ?target,
            available, quantity, "Conditional stock decrement matched no rows"
        );
        return Err(Error::InsufficientStock {
            available,
            requested: quantity,
        });
    }

    debug!(?target, quantity, "Stock decremented");
    Ok(())
}

/// Atomically returns units to a stock counter (order cancellation, restock).
///
/// Like the decrement, the bound check is part of the statement: the counter is only
/// raised while the result still fits the `stock` column.
///
/// # Errors
/// Returns [`Error::InvalidInput`] for a non-positive quantity or when the new level
/// would exceed `i32::MAX`, [`Error::NotFound`] if the row does not exist.
pub async fn increment_stock_atomic<C>(db: &C, target: StockTarget, quantity: i32) -> Result<()>
where
    C: ConnectionTrait,
{
    if quantity <= 0 {
        return Err(Error::invalid_input("Jumlah stok harus lebih dari 0"));
    }
    let ceiling = i32::MAX - quantity;

    let result = match target {
        StockTarget::Product(id) => {
            Product::update_many()
                .col_expr(
                    product::Column::Stock,
                    Expr::col(product::Column::Stock).add(quantity),
                )
                .filter(product::Column::Id.eq(id))
                .filter(product::Column::Stock.lte(ceiling))
                .exec(db)
                .await?
        }
        StockTarget::Variant(id) => {
            Variant::update_many()
                .col_expr(
                    variant::Column::Stock,
                    Expr::col(variant::Column::Stock).add(quantity),
                )
                .filter(variant::Column::Id.eq(id))
                .filter(variant::Column::Stock.lte(ceiling))
                .exec(db)
                .await?
        }
    };

    if result.rows_affected == 0 {
        // Missing row, or the counter is too close to the column limit
        let available = current_stock(db, target).await?;
        warn!(?target, available, quantity, "Stock increment would overflow");
        return Err(Error::invalid_input(format!(
            "Stok melebihi batas maksimum (stok saat ini: {available})"
        )));
    }

    debug!(?target, quantity, "Stock incremented");
    Ok(())
}

/// Applies an admin stock correction by `delta` units and returns the new level.
///
/// Negative deltas go through the same conditional decrement as checkout, so an admin
/// edit can never race an order into negative stock.
///
/// # Errors
/// Returns [`Error::InsufficientStock`] when a negative delta exceeds the stock,
/// [`Error::InvalidInput`] when a positive delta would overflow the counter, and
/// [`Error::NotFound`] for a missing row. Nothing is written on error.
pub async fn adjust_stock<C>(db: &C, target: StockTarget, delta: i32) -> Result<i32>
where
    C: ConnectionTrait,
{
    match delta {
        0 => {}
        d if d > 0 => increment_stock_atomic(db, target, d).await?,
        d => {
            let quantity = d
                .checked_neg()
                .ok_or_else(|| Error::invalid_input("Perubahan stok terlalu besar"))?;
            decrement_stock_atomic(db, target, quantity).await?;
        }
    }
    current_stock(db, target).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_validate_stock() {
        assert!(validate_stock(5, 5).is_ok());
        assert!(validate_stock(5, 1).is_ok());
        assert!(matches!(
            validate_stock(5, 6),
            Err(Error::InsufficientStock {
                available: 5,
                requested: 6
            })
        ));
        assert!(matches!(
            validate_stock(5, 0),
            Err(Error::InvalidInput { .. })
        ));
        assert!(matches!(
            validate_stock(0, -1),
            Err(Error::InvalidInput { .. })
        ));
    }

    #[tokio::test]
    async fn test_decrement_product_stock() -> Result<()> {
        let (db, product) = setup_with_product().await?;

        decrement_stock_atomic(&db, StockTarget::Product(product.id), 4).await?;
        assert_eq!(current_stock(&db, StockTarget::Product(product.id)).await?, 6);

        Ok(())
    }

    #[tokio::test]
    async fn test_decrement_rejects_overdraw_without_change() -> Result<()> {
        let (db, product) = setup_with_product().await?;
        let target = StockTarget::Product(product.id);

        let result = decrement_stock_atomic(&db, target, 11).await;
        assert!(matches!(
            result,
            Err(Error::InsufficientStock {
                available: 10,
                requested: 11
            })
        ));
        assert_eq!(current_stock(&db, target).await?, 10);

        // Draining to exactly zero is allowed
        decrement_stock_atomic(&db, target, 10).await?;
        assert_eq!(current_stock(&db, target).await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_variant_decrement_leaves_product_stock() -> Result<()> {
        let (db, product) = setup_with_product().await?;
        let variant = create_test_variant(&db, product.id, "L", None, 3).await?;

        decrement_stock_atomic(&db, StockTarget::Variant(variant.id), 2).await?;

        assert_eq!(current_stock(&db, StockTarget::Variant(variant.id)).await?, 1);
        assert_eq!(current_stock(&db, StockTarget::Product(product.id)).await?, 10);

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_row_is_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = decrement_stock_atomic(&db, StockTarget::Variant(999), 1).await;
        assert!(matches!(result, Err(Error::NotFound { entity: "variant", .. })));

        let result = increment_stock_atomic(&db, StockTarget::Product(999), 1).await;
        assert!(matches!(result, Err(Error::NotFound { entity: "product", .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_increment_stops_at_column_limit() -> Result<()> {
        let db = setup_test_db().await?;
        let product = create_custom_product(&db, "Stok Penuh", 1_000, i32::MAX - 5).await?;
        let target = StockTarget::Product(product.id);

        let result = adjust_stock(&db, target, 10).await;
        assert!(matches!(result, Err(Error::InvalidInput { .. })));
        assert_eq!(current_stock(&db, target).await?, i32::MAX - 5);

        // The row stays readable for checkout
        let entry = crate::core::catalog::lookup(
            &db,
            product.id,
            None,
            crate::config::UnknownVariantPolicy::Reject,
        )
        .await?;
        assert_eq!(entry.available_stock(), i32::MAX - 5);

        assert_eq!(adjust_stock(&db, target, 5).await?, i32::MAX);
        assert!(matches!(
            increment_stock_atomic(&db, target, 1).await,
            Err(Error::InvalidInput { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_adjust_stock() -> Result<()> {
        let (db, product) = setup_with_product().await?;
        let target = StockTarget::Product(product.id);

        assert_eq!(adjust_stock(&db, target, 5).await?, 15);
        assert_eq!(adjust_stock(&db, target, -15).await?, 0);
        assert_eq!(adjust_stock(&db, target, 0).await?, 0);
        assert!(matches!(
            adjust_stock(&db, target, -1).await,
            Err(Error::InsufficientStock { .. })
        ));

        Ok(())
    }
}
