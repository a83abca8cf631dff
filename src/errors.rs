//! Unified error type for the storefront.
//!
//! Every fallible operation in the crate returns [`Result`]. The variants map onto the
//! checkout failure taxonomy (not found, insufficient stock, invalid input, persistence
//! failure) plus the ambient configuration and I/O failures of the binary.

use crate::entities::order::OrderStatus;
use thiserror::Error;

/// All errors produced by the storefront.
#[derive(Debug, Error)]
pub enum Error {
    /// A product, variant, reseller or order id does not resolve to a referenceable row
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of row that was looked up (e.g. `"product"`)
        entity: &'static str,
        /// The identifier that failed to resolve
        id: String,
    },

    /// The requested quantity exceeds the stock available at validation or commit time
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock {
        /// Stock observed when the request was rejected
        available: i32,
        /// Quantity the caller asked for
        requested: i32,
    },

    /// Malformed or missing request fields, detected before any store mutation
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// What was wrong with the input
        message: String,
    },

    /// An order status change that the lifecycle does not allow
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidStatusTransition {
        /// Current status of the order
        from: OrderStatus,
        /// Requested status
        to: OrderStatus,
    },

    /// The store rejected or failed a read or write
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Configuration could not be loaded or is inconsistent
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration problem
        message: String,
    },

    /// Filesystem or socket failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for [`Error::NotFound`].
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Shorthand for [`Error::InvalidInput`].
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Machine-readable error kind, stable across releases.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::InsufficientStock { .. } => "insufficient_stock",
            Self::InvalidInput { .. } => "invalid_input",
            Self::InvalidStatusTransition { .. } => "invalid_status_transition",
            Self::Database(_) => "persistence_failure",
            Self::Config { .. } | Self::Io(_) => "internal",
        }
    }

    /// HTTP-equivalent status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::InsufficientStock { .. } | Self::InvalidInput { .. } => 400,
            Self::InvalidStatusTransition { .. } => 409,
            Self::Database(_) | Self::Config { .. } | Self::Io(_) => 500,
        }
    }

    /// Localized message safe to show to shoppers.
    ///
    /// Store and configuration failures collapse into a generic message; their detail
    /// only ever goes to server-side logs.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::NotFound { entity, .. } => match *entity {
                "product" => "Produk tidak ditemukan".to_string(),
                "variant" => "Varian produk tidak ditemukan".to_string(),
                "order" => "Pesanan tidak ditemukan".to_string(),
                other => format!("Data {other} tidak ditemukan"),
            },
            Self::InsufficientStock { available, .. } => {
                format!("Stok tidak mencukupi. Sisa stok: {available}")
            }
            Self::InvalidInput { message } => message.clone(),
            Self::InvalidStatusTransition { from, to } => {
                format!("Status pesanan tidak dapat diubah dari {from} ke {to}")
            }
            Self::Database(_) | Self::Config { .. } | Self::Io(_) => {
                "Terjadi kesalahan pada server. Silakan coba lagi.".to_string()
            }
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_follow_taxonomy() {
        assert_eq!(Error::not_found("product", 7).status_code(), 404);
        assert_eq!(
            Error::InsufficientStock {
                available: 1,
                requested: 2
            }
            .status_code(),
            400
        );
        assert_eq!(Error::invalid_input("bad").status_code(), 400);
        assert_eq!(
            Error::Database(sea_orm::DbErr::Custom("boom".to_string())).status_code(),
            500
        );
    }

    #[test]
    fn test_public_message_hides_store_detail() {
        let err = Error::Database(sea_orm::DbErr::Custom("disk I/O error at page 42".to_string()));
        assert_eq!(err.kind(), "persistence_failure");
        assert!(!err.public_message().contains("page 42"));
    }

    #[test]
    fn test_insufficient_stock_message_reports_remaining() {
        let err = Error::InsufficientStock {
            available: 3,
            requested: 5,
        };
        assert_eq!(err.kind(), "insufficient_stock");
        assert_eq!(err.public_message(), "Stok tidak mencukupi. Sisa stok: 3");
    }
}
