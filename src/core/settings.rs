//! Site settings business logic.
//!
//! Store-wide defaults (store name, support WhatsApp number) live in the `site_settings`
//! key/value table so admins can edit them without a redeploy. Checkout never reads the
//! table directly: callers resolve a [`StoreDefaults`] value once and pass it in.

use crate::{
    config::StoreConfig,
    entities::{SiteSetting, site_setting},
    errors::{Error, Result},
};
use chrono::{FixedOffset, Utc};
use sea_orm::{Set, prelude::*};
use tracing::{debug, info, warn};

/// Key holding the attribution name used for direct orders.
pub const STORE_NAME_KEY: &str = "store_name";
/// Key holding the WhatsApp number receiving direct orders.
pub const SUPPORT_PHONE_KEY: &str = "support_phone";

/// Store-wide fallback values used when an order has no reseller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreDefaults {
    /// Name greeted in the order message
    pub store_name: String,
    /// Contact number for direct orders
    pub support_phone: String,
    /// Calling code replacing a leading `0` in phone numbers
    pub country_code: String,
    /// Timezone used to print order timestamps
    pub utc_offset: FixedOffset,
}

impl StoreDefaults {
    /// Builds defaults from the `[store]` config section alone.
    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        let utc_offset = FixedOffset::east_opt(config.utc_offset_hours * 3600).ok_or_else(|| {
            Error::Config {
                message: format!("Invalid UTC offset: {} hours", config.utc_offset_hours),
            }
        })?;

        Ok(Self {
            store_name: config.name.clone(),
            support_phone: config.support_phone.clone(),
            country_code: config.country_code.clone(),
            utc_offset,
        })
    }
}

/// Retrieves a value from the `site_settings` table, `None` if the key is unset.
///
/// # Errors
/// Returns [`Error::Database`] if the query fails.
pub async fn get_setting<C>(db: &C, key: &str) -> Result<Option<String>>
where
    C: ConnectionTrait,
{
    let setting = SiteSetting::find()
        .filter(site_setting::Column::Key.eq(key))
        .one(db)
        .await?;
    debug!("Site setting '{}': {:?}", key, setting.as_ref().map(|s| &s.value));
    Ok(setting.map(|s| s.value))
}

/// Sets or updates a value in the `site_settings` table.
///
/// # Errors
/// Returns [`Error::Database`] if the read or the write fails.
pub async fn set_setting<C>(db: &C, key: &str, value: &str) -> Result<()>
where
    C: ConnectionTrait,
{
    let now = Utc::now().naive_utc();

    let existing = SiteSetting::find()
        .filter(site_setting::Column::Key.eq(key))
        .one(db)
        .await?;

    if let Some(setting) = existing {
        let mut active_model: site_setting::ActiveModel = setting.into();
        active_model.value = Set(value.to_string());
        active_model.updated_at = Set(now);
        active_model.update(db).await?;
    } else {
        let new_setting = site_setting::ActiveModel {
            key: Set(key.to_string()),
            value: Set(value.to_string()),
            updated_at: Set(now),
            ..Default::default()
        };
        new_setting.insert(db).await?;
    }

    info!("Set site setting: {} = {}", key, value);
    Ok(())
}

/// Resolves the effective store defaults: non-blank `site_settings` rows win over
/// the config file. A phone override without any digits cannot address a chat and is
/// ignored.
///
/// # Errors
/// Returns [`Error::Config`] for an invalid UTC offset and [`Error::Database`] if the
/// settings cannot be read.
pub async fn load_store_defaults<C>(db: &C, config: &StoreConfig) -> Result<StoreDefaults>
where
    C: ConnectionTrait,
{
    let mut defaults = StoreDefaults::from_config(config)?;

    if let Some(name) = get_setting(db, STORE_NAME_KEY).await?.filter(|v| !v.trim().is_empty()) {
        defaults.store_name = name;
    }
    if let Some(phone) = get_setting(db, SUPPORT_PHONE_KEY)
        .await?
        .filter(|v| !v.trim().is_empty())
    {
        if phone.chars().any(|c| c.is_ascii_digit()) {
            defaults.support_phone = phone;
        } else {
            warn!("Ignoring site setting '{}' without digits: {}", SUPPORT_PHONE_KEY, phone);
        }
    }

    Ok(defaults)
}
