//! The shipment record printed on a label, and the partial record the
//! [extractor](crate::extract_fields) produces from pasted text.

use serde::{Deserialize, Deserializer, Serialize};

/// Everything printed on one label.
///
/// Missing string fields deserialize as empty and counts that are missing or
/// unparsable deserialize as 0. `current_time` is display-only: the renderer
/// overwrites it with the render time, whatever the caller put there.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LabelData {
    /// Carrier / service display name, e.g. "邮政特快专递"
    pub service_type: String,
    /// Tracking or contact number. Free-form; not checked for digits.
    pub phone_number: String,
    /// Product code
    pub item_number: String,
    #[serde(deserialize_with = "lenient_count")]
    pub quantity: u32,
    /// Number of packages
    #[serde(deserialize_with = "lenient_count")]
    pub total_items: u32,
    /// Store / origin name
    pub warehouse: String,
    /// Receiving warehouse or bin
    pub shipping_crate: String,
    pub current_time: String,
}

/// Fields pulled out of pasted text. Anything the text didn't mention stays `None`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialLabel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_crate: Option<String>,
}

impl PartialLabel {
    pub fn is_empty(&self) -> bool {
        *self == PartialLabel::default()
    }

    /// Number of fields that were found
    pub fn len(&self) -> usize {
        [
            self.service_type.is_some(),
            self.phone_number.is_some(),
            self.item_number.is_some(),
            self.quantity.is_some(),
            self.shipping_crate.is_some(),
        ]
        .into_iter()
        .filter(|found| *found)
        .count()
    }
}

impl LabelData {
    /// A blank record with the defaults an operator starts from
    pub fn with_defaults(warehouse: impl Into<String>, total_items: u32) -> LabelData {
        LabelData {
            warehouse: warehouse.into(),
            total_items,
            ..LabelData::default()
        }
    }

    /// Merge extracted fields into this record. Empty strings and a zero quantity
    /// never overwrite what is already there.
    pub fn apply(&mut self, partial: PartialLabel) {
        let PartialLabel {
            service_type,
            phone_number,
            item_number,
            quantity,
            shipping_crate,
        } = partial;

        let fields = [
            (&mut self.service_type, service_type),
            (&mut self.phone_number, phone_number),
            (&mut self.item_number, item_number),
            (&mut self.shipping_crate, shipping_crate),
        ];
        for (field, value) in fields {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                *field = value;
            }
        }
        if let Some(quantity) = quantity.filter(|q| *q > 0) {
            self.quantity = quantity;
        }
    }

    /// Names of the fields an operator has to fill in before a label is worth
    /// printing. The renderer itself accepts incomplete records.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.service_type.is_empty() {
            missing.push("serviceType");
        }
        if self.phone_number.is_empty() {
            missing.push("phoneNumber");
        }
        if self.item_number.is_empty() {
            missing.push("itemNumber");
        }
        if self.quantity == 0 {
            missing.push("quantity");
        }
        if self.shipping_crate.is_empty() {
            missing.push("shippingCrate");
        }
        missing
    }
}

/// Accepts a count as a JSON number or a numeric string; anything else is 0
fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let count = match value {
        serde_json::Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        serde_json::Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    };
    Ok(count.unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_json_fields_take_defaults() {
        let data: LabelData = serde_json::from_str(r#"{"serviceType": "邮政特快专递"}"#).unwrap();
        assert_eq!(
            data,
            LabelData {
                service_type: "邮政特快专递".into(),
                ..LabelData::default()
            }
        );
    }

    #[test]
    fn unparsable_counts_become_zero() {
        let data: LabelData = serde_json::from_str(
            r#"{"quantity": "abc", "totalItems": -3, "itemNumber": "8559"}"#,
        )
        .unwrap();
        assert_eq!(data.quantity, 0);
        assert_eq!(data.total_items, 0);
        assert_eq!(data.item_number, "8559");

        let data: LabelData = serde_json::from_str(r#"{"quantity": "12", "totalItems": 2}"#).unwrap();
        assert_eq!(data.quantity, 12);
        assert_eq!(data.total_items, 2);
    }

    #[test]
    fn partial_serializes_only_found_fields() {
        let partial = PartialLabel {
            item_number: Some("8559".into()),
            quantity: Some(8),
            ..PartialLabel::default()
        };
        assert_eq!(
            serde_json::to_string(&partial).unwrap(),
            r#"{"itemNumber":"8559","quantity":8}"#
        );
        assert_eq!(partial.len(), 2);
        assert!(PartialLabel::default().is_empty());
    }

    #[test]
    fn apply_keeps_existing_values_for_empty_matches() {
        let mut data = LabelData::with_defaults("建闽店", 1);
        data.shipping_crate = "三水仓".into();
        data.quantity = 4;

        data.apply(PartialLabel {
            service_type: Some("东骏物流".into()),
            phone_number: Some("13912345678".into()),
            quantity: Some(0),
            shipping_crate: Some(String::new()),
            ..PartialLabel::default()
        });

        assert_eq!(data.service_type, "东骏物流");
        assert_eq!(data.phone_number, "13912345678");
        assert_eq!(data.quantity, 4);
        assert_eq!(data.shipping_crate, "三水仓");
        assert_eq!(data.warehouse, "建闽店");
        assert_eq!(data.total_items, 1);
    }

    #[test]
    fn missing_fields_lists_what_the_operator_must_supply() {
        let mut data = LabelData::with_defaults("建闽店", 1);
        assert_eq!(
            data.missing_fields(),
            vec!["serviceType", "phoneNumber", "itemNumber", "quantity", "shippingCrate"]
        );

        data.apply(PartialLabel {
            service_type: Some("邮政".into()),
            phone_number: Some("1".into()),
            item_number: Some("2".into()),
            quantity: Some(3),
            shipping_crate: Some("仓".into()),
        });
        assert!(data.missing_fields().is_empty());
    }
}
