//! Catalog business logic - product and variant lookups plus the admin operations that
//! maintain them.
//!
//! Checkout enters through [`lookup`], which resolves a product id and optional variant
//! id into a [`CatalogEntry`]. Inactive rows are treated as missing. What happens to a
//! variant id that does not belong to the product is decided by [`UnknownVariantPolicy`],
//! and the outcome is spelled out in [`VariantSelection`].

use crate::{
    config::UnknownVariantPolicy,
    core::stock::StockTarget,
    entities::{ListingStatus, Product, Variant, product, variant},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{info, warn};

/// Which stock/price source a checkout resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariantSelection {
    /// No variant was requested
    Base,
    /// The requested variant exists under the product and is active
    Selected(variant::Model),
    /// A variant was requested but did not resolve; the base product is used instead
    Defaulted {
        /// The variant id that failed to resolve
        requested: i64,
    },
}

impl VariantSelection {
    /// The selected variant, if one resolved.
    #[must_use]
    pub const fn variant(&self) -> Option<&variant::Model> {
        match self {
            Self::Selected(v) => Some(v),
            Self::Base | Self::Defaulted { .. } => None,
        }
    }
}

/// A product resolved for checkout, together with its variant selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// The ordered product
    pub product: product::Model,
    /// Outcome of the variant lookup
    pub selection: VariantSelection,
}

impl CatalogEntry {
    /// The selected variant, if any.
    #[must_use]
    pub const fn variant(&self) -> Option<&variant::Model> {
        self.selection.variant()
    }

    /// The counter checkout validates and decrements.
    #[must_use]
    pub fn stock_target(&self) -> StockTarget {
        self.variant()
            .map_or(StockTarget::Product(self.product.id), |v| {
                StockTarget::Variant(v.id)
            })
    }

    /// Stock observed at lookup time for the resolved counter.
    #[must_use]
    pub fn available_stock(&self) -> i32 {
        self.variant().map_or(self.product.stock, |v| v.stock)
    }
}

/// Resolves a product and optional variant for checkout.
///
/// # Errors
/// Returns [`Error::NotFound`] when the product is missing or inactive, or when the
/// variant is missing/inactive under [`UnknownVariantPolicy::Reject`].
pub async fn lookup<C>(
    db: &C,
    product_id: i64,
    variant_id: Option<i64>,
    policy: UnknownVariantPolicy,
) -> Result<CatalogEntry>
where
    C: ConnectionTrait,
{
    let product = get_product_by_id(db, product_id)
        .await?
        .filter(|p| p.status == ListingStatus::Active)
        .ok_or_else(|| Error::not_found("product", product_id))?;

    let Some(variant_id) = variant_id else {
        return Ok(CatalogEntry {
            product,
            selection: VariantSelection::Base,
        });
    };

    let variant = get_variant_by_id(db, variant_id)
        .await?
        .filter(|v| v.product_id == product_id && v.status == ListingStatus::Active);

    let selection = match (variant, policy) {
        (Some(v), _) => VariantSelection::Selected(v),
        (None, UnknownVariantPolicy::Reject) => {
            return Err(Error::not_found("variant", variant_id));
        }
        (None, UnknownVariantPolicy::FallBackToBase) => {
            warn!(
                product_id,
                variant_id, "Unknown variant requested, falling back to base product"
            );
            VariantSelection::Defaulted {
                requested: variant_id,
            }
        }
    };

    Ok(CatalogEntry { product, selection })
}

/// Fields for a new product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    /// Display name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Base price in whole currency units
    pub price: i64,
    /// Initial stock
    pub stock: i32,
    /// Optional icon image reference
    pub icon: Option<String>,
    /// Gallery image references
    pub gallery: Vec<String>,
}

/// Creates a new active product, performing input validation.
///
/// # Errors
/// Returns [`Error::InvalidInput`] for a blank name or a negative price or stock.
pub async fn create_product<C>(db: &C, new_product: NewProduct) -> Result<product::Model>
where
    C: ConnectionTrait,
{
    if new_product.name.trim().is_empty() {
        return Err(Error::invalid_input("Nama produk tidak boleh kosong"));
    }
    if new_product.price < 0 {
        return Err(Error::invalid_input("Harga produk tidak boleh negatif"));
    }
    if new_product.stock < 0 {
        return Err(Error::invalid_input("Stok produk tidak boleh negatif"));
    }

    let now = chrono::Utc::now().naive_utc();
    let gallery = if new_product.gallery.is_empty() {
        None
    } else {
        Some(Json::from(new_product.gallery))
    };

    let product = product::ActiveModel {
        name: Set(new_product.name.trim().to_string()),
        description: Set(new_product.description),
        price: Set(new_product.price),
        stock: Set(new_product.stock),
        status: Set(ListingStatus::Active),
        icon: Set(new_product.icon),
        gallery: Set(gallery),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let product = product.insert(db).await?;
    info!(product_id = product.id, name = %product.name, "Created product");
    Ok(product)
}

/// Creates a new active variant under an existing product.
///
/// # Errors
/// Returns [`Error::NotFound`] if the product does not exist and [`Error::InvalidInput`]
/// for blank name/value or negative price/stock.
pub async fn create_variant<C>(
    db: &C,
    product_id: i64,
    name: String,
    value: String,
    price: Option<i64>,
    stock: i32,
) -> Result<variant::Model>
where
    C: ConnectionTrait,
{
    if name.trim().is_empty() || value.trim().is_empty() {
        return Err(Error::invalid_input("Nama dan nilai varian tidak boleh kosong"));
    }
    if price.is_some_and(|p| p < 0) {
        return Err(Error::invalid_input("Harga varian tidak boleh negatif"));
    }
    if stock < 0 {
        return Err(Error::invalid_input("Stok varian tidak boleh negatif"));
    }

    Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("product", product_id))?;

    let variant = variant::ActiveModel {
        product_id: Set(product_id),
        name: Set(name.trim().to_string()),
        value: Set(value.trim().to_string()),
        price: Set(price),
        stock: Set(stock),
        status: Set(ListingStatus::Active),
        ..Default::default()
    };
    variant.insert(db).await.map_err(Into::into)
}

/// Retrieves a product by id regardless of status.
///
/// # Errors
/// Returns [`Error::Database`] if the query fails.
pub async fn get_product_by_id<C>(db: &C, product_id: i64) -> Result<Option<product::Model>>
where
    C: ConnectionTrait,
{
    Product::find_by_id(product_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a variant by id regardless of status.
///
/// # Errors
/// Returns [`Error::Database`] if the query fails.
pub async fn get_variant_by_id<C>(db: &C, variant_id: i64) -> Result<Option<variant::Model>>
where
    C: ConnectionTrait,
{
    Variant::find_by_id(variant_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists the active variants of a product, ordered by id.
///
/// # Errors
/// Returns [`Error::Database`] if the query fails.
pub async fn get_active_variants<C>(db: &C, product_id: i64) -> Result<Vec<variant::Model>>
where
    C: ConnectionTrait,
{
    Variant::find()
        .filter(variant::Column::ProductId.eq(product_id))
        .filter(variant::Column::Status.eq(ListingStatus::Active))
        .order_by_asc(variant::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Activates or deactivates a product.
///
/// # Errors
/// Returns [`Error::NotFound`] if the product does not exist.
pub async fn set_product_status<C>(
    db: &C,
    product_id: i64,
    status: ListingStatus,
) -> Result<product::Model>
where
    C: ConnectionTrait,
{
    let mut product: product::ActiveModel = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("product", product_id))?
        .into();

    product.status = Set(status);
    product.updated_at = Set(chrono::Utc::now().naive_utc());

    product.update(db).await.map_err(Into::into)
}

/// Activates or deactivates a variant.
///
/// # Errors
/// Returns [`Error::NotFound`] if the variant does not exist.
pub async fn set_variant_status<C>(
    db: &C,
    variant_id: i64,
    status: ListingStatus,
) -> Result<variant::Model>
where
    C: ConnectionTrait,
{
    let mut variant: variant::ActiveModel = Variant::find_by_id(variant_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("variant", variant_id))?
        .into();

    variant.status = Set(status);
    variant.update(db).await.map_err(Into::into)
}
