//! Order notification message composition.
//!
//! After checkout the shopper is sent to a WhatsApp link pre-filled with an order summary
//! addressed to the reseller (or the store). The summary is read by people, and its line
//! order is relied on by the sellers who process it, so the layout below is fixed.

use crate::{
    core::{reseller::ResellerResolution, settings::StoreDefaults},
    entities::{order, product, variant},
};
use serde::Serialize;

/// Base URL of WhatsApp click-to-chat links.
pub const WHATSAPP_BASE_URL: &str = "https://wa.me";
/// Variant line value when no variant was selected.
pub const NO_VARIANT_LABEL: &str = "Standard";
/// Shown in place of missing customer fields.
pub const MISSING_FIELD_PLACEHOLDER: &str = "-";

/// A rendered order message and the link that delivers it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComposedMessage {
    /// Plain-text summary
    pub text: String,
    /// Click-to-chat URL carrying the percent-encoded summary
    pub url: String,
}

/// Renders the order summary and its WhatsApp link.
#[must_use]
pub fn compose_message(
    order: &order::Model,
    product: &product::Model,
    variant: Option<&variant::Model>,
    reseller: &ResellerResolution,
    defaults: &StoreDefaults,
) -> ComposedMessage {
    let text = render_text(order, product, variant, reseller.attribution_name(), defaults);
    let phone = normalize_phone(reseller.contact_number(), &defaults.country_code);
    let url = format!(
        "{WHATSAPP_BASE_URL}/{phone}?text={}",
        urlencoding::encode(&text)
    );
    ComposedMessage { text, url }
}

fn render_text(
    order: &order::Model,
    product: &product::Model,
    variant: Option<&variant::Model>,
    attribution_name: &str,
    defaults: &StoreDefaults,
) -> String {
    let placed_at = order
        .created_at
        .with_timezone(&defaults.utc_offset)
        .format("%d/%m/%Y, %H.%M");
    let customer_phone = order
        .customer_phone
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or(MISSING_FIELD_PLACEHOLDER);
    let customer_name = Some(order.customer_name.trim())
        .filter(|n| !n.is_empty())
        .unwrap_or(MISSING_FIELD_PLACEHOLDER);
    let variant_label = variant.map_or_else(|| NO_VARIANT_LABEL.to_string(), variant::Model::label);

    let mut lines = vec![
        format!("Halo {attribution_name}, saya ingin memesan produk berikut:"),
        String::new(),
        format!("ID Pesanan: #{}", order.id),
        format!("Tanggal: {placed_at}"),
        String::new(),
        format!("Nama: {customer_name}"),
        format!("No. HP: {customer_phone}"),
        String::new(),
        format!("Produk: {}", product.name),
        format!("Varian: {variant_label}"),
        format!("Jumlah: {}", order.quantity),
    ];
    if let Some(notes) = order.notes.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        lines.push(format!("Catatan: {notes}"));
    }
    lines.push(String::new());
    lines.push(format!(
        "Total Pembayaran: {}",
        format_rupiah(order.total_price)
    ));

    lines.join("\n")
}

/// Formats whole Rupiah with `.` thousands separators, e.g. `Rp 1.250.000`.
#[must_use]
pub fn format_rupiah(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0 { "-" } else { "" };
    format!("Rp {sign}{grouped}")
}

/// Reduces a phone number to the digits-only international form `wa.me` expects.
///
/// A leading trunk `0` is replaced with the country calling code.
#[must_use]
pub fn normalize_phone(phone: &str, country_code: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    match digits.strip_prefix('0') {
        Some(rest) => format!("{country_code}{rest}"),
        None => digits,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::{ListingStatus, OrderStatus, reseller};
    use chrono::{FixedOffset, TimeZone, Utc};

    fn defaults() -> StoreDefaults {
        StoreDefaults {
            store_name: "Toko Kami".to_string(),
            support_phone: "0812-3456-7890".to_string(),
            country_code: "62".to_string(),
            utc_offset: FixedOffset::east_opt(7 * 3600).unwrap(),
        }
    }

    fn product() -> product::Model {
        let now = Utc::now().naive_utc();
        product::Model {
            id: 3,
            name: "Kaos Polos".to_string(),
            description: None,
            price: 150_000,
            stock: 10,
            status: ListingStatus::Active,
            icon: None,
            gallery: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn order(notes: Option<&str>) -> order::Model {
        order::Model {
            id: 17,
            product_id: 3,
            variant_id: None,
            reseller_id: None,
            customer_name: "Budi".to_string(),
            customer_phone: None,
            quantity: 2,
            total_price: 300_000,
            status: OrderStatus::Pending,
            notes: notes.map(str::to_string),
            created_at: Utc.with_ymd_and_hms(2026, 3, 1, 17, 5, 0).unwrap(),
        }
    }

    fn direct(defaults: &StoreDefaults) -> ResellerResolution {
        ResellerResolution::Defaulted {
            store_name: defaults.store_name.clone(),
            support_phone: defaults.support_phone.clone(),
        }
    }

    #[test]
    fn test_format_rupiah() {
        assert_eq!(format_rupiah(0), "Rp 0");
        assert_eq!(format_rupiah(999), "Rp 999");
        assert_eq!(format_rupiah(1_000), "Rp 1.000");
        assert_eq!(format_rupiah(300_000), "Rp 300.000");
        assert_eq!(format_rupiah(1_250_000), "Rp 1.250.000");
    }

    #[test]
    fn test_normalize_phone() {
        assert_eq!(normalize_phone("0812-3456-7890", "62"), "6281234567890");
        assert_eq!(normalize_phone("+62 812 3456", "62"), "628123456");
        assert_eq!(normalize_phone("6281", "62"), "6281");
    }

    #[test]
    fn test_message_layout_without_variant_or_notes() {
        let defaults = defaults();
        let message = compose_message(&order(None), &product(), None, &direct(&defaults), &defaults);

        let expected = "Halo Toko Kami, saya ingin memesan produk berikut:\n\
                        \n\
                        ID Pesanan: #17\n\
                        Tanggal: 02/03/2026, 00.05\n\
                        \n\
                        Nama: Budi\n\
                        No. HP: -\n\
                        \n\
                        Produk: Kaos Polos\n\
                        Varian: Standard\n\
                        Jumlah: 2\n\
                        \n\
                        Total Pembayaran: Rp 300.000";
        assert_eq!(message.text, expected);
        assert!(!message.text.contains("Catatan"));
    }

    #[test]
    fn test_message_includes_variant_and_notes() {
        let defaults = defaults();
        let variant = variant::Model {
            id: 9,
            product_id: 3,
            name: "Size".to_string(),
            value: "L".to_string(),
            price: None,
            stock: 1,
            status: ListingStatus::Active,
        };
        let message = compose_message(
            &order(Some("  tolong dibungkus kado ")),
            &product(),
            Some(&variant),
            &direct(&defaults),
            &defaults,
        );

        assert!(message.text.contains("Varian: Size: L\nJumlah: 2\nCatatan: tolong dibungkus kado\n"));
    }

    #[test]
    fn test_blank_notes_line_omitted() {
        let defaults = defaults();
        let message = compose_message(&order(Some("   ")), &product(), None, &direct(&defaults), &defaults);
        assert!(!message.text.contains("Catatan"));
    }

    #[test]
    fn test_url_addresses_reseller_and_encodes_text() {
        let defaults = defaults();
        let reseller = ResellerResolution::Resolved(reseller::Model {
            id: 4,
            name: "Reseller A".to_string(),
            phone: "0899 1111 2222".to_string(),
            reference_code: "RSA".to_string(),
            created_at: Utc::now().naive_utc(),
        });
        let message = compose_message(&order(None), &product(), None, &reseller, &defaults);

        assert!(message.text.starts_with("Halo Reseller A,"));
        assert!(message.url.starts_with("https://wa.me/6289911112222?text=Halo%20Reseller%20A%2C"));
        assert!(message.url.contains("Rp%20300.000"));
        assert!(!message.url.contains('\n'));
        assert_eq!(
            urlencoding::decode(message.url.split_once("?text=").unwrap().1).unwrap(),
            message.text
        );
    }
}
