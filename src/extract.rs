//! Pulls label fields out of logistics text pasted from a merchant back-office.
//!
//! Each field has its own rule and the rules don't depend on each other: pasted
//! text is formatted inconsistently, so whatever can be recognised is returned and
//! everything else is left for the operator to fill in.

use crate::label::PartialLabel;
use regex::Regex;
use std::sync::LazyLock;

/// A carrier marker, then the service name and the tracking number separated by a comma
static SERVICE_AND_TRACKING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:物流单号：|邮政|快递|物流).*?[,，]?\s*(\S+)[,，]\s*([0-9]+)")
        .expect("service pattern is valid")
});

static ITEM_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"货号[：:]?\s*([0-9]+)").expect("item pattern is valid"));

static QUANTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"发货数量[：:]\s*([0-9]+)").expect("quantity pattern is valid"));

static SHIPPING_CRATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"收货仓库[：:]\s*(.+?)\s*(?:$|\n)").expect("crate pattern is valid")
});

/// Extract whichever label fields `text` contains. Text that matches nothing
/// yields an empty [PartialLabel]; this never fails.
pub fn extract_fields(text: &str) -> PartialLabel {
    // normalize newlines
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut fields = PartialLabel::default();

    if let Some(caps) = SERVICE_AND_TRACKING.captures(&text) {
        fields.service_type = Some(caps[1].to_string());
        fields.phone_number = Some(caps[2].to_string());
    }

    if let Some(caps) = ITEM_NUMBER.captures(&text) {
        fields.item_number = Some(caps[1].to_string());
    }

    if let Some(caps) = QUANTITY.captures(&text) {
        fields.quantity = Some(parse_quantity(&caps[1]));
    }

    if let Some(caps) = SHIPPING_CRATE.captures(&text) {
        fields.shipping_crate = Some(caps[1].trim().to_string());
    }

    tracing::debug!(found = fields.len(), "extracted label fields");
    fields
}

/// Digit runs too long for a count fall back to 0 rather than failing extraction
fn parse_quantity(digits: &str) -> u32 {
    digits.parse().unwrap_or_else(|err| {
        tracing::warn!(digits, %err, "unparsable quantity, using 0");
        0
    })
}
