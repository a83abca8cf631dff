//! Reseller business logic - attribution lookups and reseller maintenance.
//!
//! A checkout may carry a reseller reference code taken from a shared link. When it
//! resolves, the order is credited to that reseller and the order message goes to the
//! reseller's number; otherwise the store defaults apply. Resolution never rejects an
//! order.

use crate::{
    core::settings::StoreDefaults,
    entities::{Reseller, reseller},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, info};

/// Outcome of resolving a reseller reference code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResellerResolution {
    /// The code matched a reseller
    Resolved(reseller::Model),
    /// No code, or an unknown code: the store defaults apply
    Defaulted {
        /// Store-wide attribution name
        store_name: String,
        /// Store-wide contact number
        support_phone: String,
    },
}

impl ResellerResolution {
    /// Number the order message is addressed to.
    #[must_use]
    pub fn contact_number(&self) -> &str {
        match self {
            Self::Resolved(r) => &r.phone,
            Self::Defaulted { support_phone, .. } => support_phone,
        }
    }

    /// Name greeted in the order message.
    #[must_use]
    pub fn attribution_name(&self) -> &str {
        match self {
            Self::Resolved(r) => &r.name,
            Self::Defaulted { store_name, .. } => store_name,
        }
    }

    /// Foreign key stored on the order; `None` for direct sales.
    #[must_use]
    pub const fn reseller_id(&self) -> Option<i64> {
        match self {
            Self::Resolved(r) => Some(r.id),
            Self::Defaulted { .. } => None,
        }
    }
}

/// Resolves an optional reseller reference code against the reseller store.
///
/// Blank codes count as absent. Only store failures are errors; an unknown code
/// degrades to [`ResellerResolution::Defaulted`].
///
/// # Errors
/// Returns [`Error::Database`] if the reseller lookup fails.
pub async fn resolve_reseller<C>(
    db: &C,
    code: Option<&str>,
    defaults: &StoreDefaults,
) -> Result<ResellerResolution>
where
    C: ConnectionTrait,
{
    let defaulted = || ResellerResolution::Defaulted {
        store_name: defaults.store_name.clone(),
        support_phone: defaults.support_phone.clone(),
    };

    let Some(code) = code.map(str::trim).filter(|c| !c.is_empty()) else {
        return Ok(defaulted());
    };

    match get_reseller_by_code(db, code).await? {
        Some(reseller) => {
            debug!(reseller_id = reseller.id, code, "Reseller code resolved");
            Ok(ResellerResolution::Resolved(reseller))
        }
        None => {
            info!(code, "Unknown reseller code, attributing order to store");
            Ok(defaulted())
        }
    }
}

/// Finds a reseller by its external reference code.
///
/// # Errors
/// Returns [`Error::Database`] if the query fails.
pub async fn get_reseller_by_code<C>(db: &C, code: &str) -> Result<Option<reseller::Model>>
where
    C: ConnectionTrait,
{
    Reseller::find()
        .filter(reseller::Column::ReferenceCode.eq(code))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists all resellers alphabetically.
///
/// # Errors
/// Returns [`Error::Database`] if the query fails.
pub async fn get_all_resellers<C>(db: &C) -> Result<Vec<reseller::Model>>
where
    C: ConnectionTrait,
{
    Reseller::find()
        .order_by_asc(reseller::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Registers a reseller under a unique reference code.
///
/// # Errors
/// Returns [`Error::InvalidInput`] for blank fields or a reference code already in use.
pub async fn create_reseller<C>(
    db: &C,
    name: String,
    phone: String,
    reference_code: String,
) -> Result<reseller::Model>
where
    C: ConnectionTrait,
{
    let reference_code = reference_code.trim().to_string();
    if name.trim().is_empty() || phone.trim().is_empty() || reference_code.is_empty() {
        return Err(Error::invalid_input(
            "Nama, nomor telepon dan kode reseller wajib diisi",
        ));
    }
    if get_reseller_by_code(db, &reference_code).await?.is_some() {
        return Err(Error::invalid_input(format!(
            "Kode reseller '{reference_code}' sudah digunakan"
        )));
    }

    let reseller = reseller::ActiveModel {
        name: Set(name.trim().to_string()),
        phone: Set(phone.trim().to_string()),
        reference_code: Set(reference_code),
        created_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    };
    let reseller = reseller.insert(db).await?;
    info!(reseller_id = reseller.id, code = %reseller.reference_code, "Created reseller");
    Ok(reseller)
}

/// Deletes a reseller. Orders credited to it become direct sales (`reseller_id` set to null).
///
/// # Errors
/// Returns [`Error::NotFound`] if no reseller has that id.
pub async fn delete_reseller<C>(db: &C, reseller_id: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    let result = Reseller::delete_by_id(reseller_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::not_found("reseller", reseller_id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_resolve_known_code() -> Result<()> {
        let db = setup_test_db().await?;
        let defaults = test_store_defaults();
        let reseller = create_test_reseller(&db, "Reseller A", "RSA01").await?;

        let resolution = resolve_reseller(&db, Some("RSA01"), &defaults).await?;
        assert_eq!(resolution.reseller_id(), Some(reseller.id));
        assert_eq!(resolution.attribution_name(), "Reseller A");
        assert_eq!(resolution.contact_number(), reseller.phone);

        Ok(())
    }

    #[tokio::test]
    async fn test_resolve_unknown_or_absent_code_defaults() -> Result<()> {
        let db = setup_test_db().await?;
        let defaults = test_store_defaults();
        create_test_reseller(&db, "Reseller A", "RSA01").await?;

        for code in [None, Some(""), Some("   "), Some("NOPE")] {
            let resolution = resolve_reseller(&db, code, &defaults).await?;
            assert_eq!(resolution.reseller_id(), None);
            assert_eq!(resolution.attribution_name(), defaults.store_name);
            assert_eq!(resolution.contact_number(), defaults.support_phone);
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_resolve_trims_code() -> Result<()> {
        let db = setup_test_db().await?;
        let reseller = create_test_reseller(&db, "Reseller B", "RSB").await?;

        let resolution = resolve_reseller(&db, Some(" RSB "), &test_store_defaults()).await?;
        assert_eq!(resolution, ResellerResolution::Resolved(reseller));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_reseller_rejects_duplicate_code() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_reseller(&db, "Reseller A", "DUP").await?;

        let result = create_reseller(
            &db,
            "Reseller B".to_string(),
            "0899".to_string(),
            "DUP".to_string(),
        )
        .await;
        assert!(matches!(result, Err(Error::InvalidInput { .. })));
        assert_eq!(get_all_resellers(&db).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_reseller() -> Result<()> {
        let db = setup_test_db().await?;
        let reseller = create_test_reseller(&db, "Reseller A", "DEL").await?;

        delete_reseller(&db, reseller.id).await?;
        assert!(get_reseller_by_code(&db, "DEL").await?.is_none());
        assert!(matches!(
            delete_reseller(&db, reseller.id).await,
            Err(Error::NotFound { .. })
        ));

        Ok(())
    }
}
