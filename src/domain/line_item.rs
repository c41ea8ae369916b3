//! Billable rows of a document, as persisted and as edited.

use serde::{Deserialize, Serialize};

use crate::calc::format::parse_number;
use crate::calc::row::{parse_amount, parse_fees};

/// A persisted line item.
///
/// On the wire the tax rate is carried twice (`tax` and `vatRate`); older
/// records may only have one of them.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(from = "LineItemRecord", into = "LineItemRecord")]
pub struct LineItem {
    pub service: String,
    pub description: String,
    pub duration: String,
    pub tax_rate: f64,
    pub fees: f64,
    pub amount: f64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LineItemRecord {
    #[serde(default)]
    service: Option<String>,
    #[serde(default)]
    desc: Option<String>,
    #[serde(default)]
    duration: Option<String>,
    #[serde(default)]
    tax: Option<f64>,
    #[serde(default)]
    vat_rate: Option<f64>,
    #[serde(default)]
    fees: Option<f64>,
    #[serde(default)]
    amount: Option<f64>,
}

impl From<LineItemRecord> for LineItem {
    fn from(record: LineItemRecord) -> Self {
        let tax_rate = record
            .tax
            .filter(|rate| *rate != 0.0)
            .or(record.vat_rate)
            .unwrap_or(0.0);
        Self {
            service: record.service.unwrap_or_default(),
            description: record.desc.unwrap_or_default(),
            duration: record.duration.unwrap_or_default(),
            tax_rate,
            fees: record.fees.unwrap_or(0.0),
            amount: record.amount.unwrap_or(0.0),
        }
    }
}

impl From<LineItem> for LineItemRecord {
    fn from(item: LineItem) -> Self {
        Self {
            service: Some(item.service),
            desc: Some(item.description),
            duration: Some(item.duration),
            tax: Some(item.tax_rate),
            vat_rate: Some(item.tax_rate),
            fees: Some(item.fees),
            amount: Some(item.amount),
        }
    }
}

/// Stable handle of a row inside one editing session.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(pub u64);

/// Editable text fields of a row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowField {
    Service,
    Description,
    Duration,
    TaxRate,
    Fees,
    Amount,
}

/// A row exactly as typed. Numeric fields stay text so that half-typed or
/// malformed values are representable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowInput {
    pub service: String,
    pub description: String,
    pub duration: String,
    pub tax_rate: String,
    pub fees: String,
    pub amount: String,
}

impl Default for RowInput {
    /// A blank row: zero rate, zero fees and an empty amount.
    fn default() -> Self {
        Self {
            service: String::new(),
            description: String::new(),
            duration: String::new(),
            tax_rate: "0".to_string(),
            fees: "0".to_string(),
            amount: String::new(),
        }
    }
}

impl RowInput {
    /// Replaces one field's text.
    pub fn set(&mut self, field: RowField, value: impl Into<String>) {
        let value = value.into();
        match field {
            RowField::Service => self.service = value,
            RowField::Description => self.description = value,
            RowField::Duration => self.duration = value,
            RowField::TaxRate => self.tax_rate = value,
            RowField::Fees => self.fees = value,
            RowField::Amount => self.amount = value,
        }
    }

    /// Converts the typed row into a persisted item. Unreadable numbers are
    /// stored as zero.
    pub fn to_line_item(&self) -> LineItem {
        LineItem {
            service: self.service.clone(),
            description: self.description.clone(),
            duration: self.duration.clone(),
            tax_rate: parse_number(&self.tax_rate).unwrap_or(0.0),
            fees: parse_fees(&self.fees),
            amount: parse_amount(&self.amount).unwrap_or(0.0),
        }
    }
}

impl From<&LineItem> for RowInput {
    fn from(item: &LineItem) -> Self {
        Self {
            service: item.service.clone(),
            description: item.description.clone(),
            duration: item.duration.clone(),
            tax_rate: item.tax_rate.to_string(),
            fees: item.fees.to_string(),
            amount: item.amount.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rate_falls_back_to_vat_rate() {
        let item: LineItem = serde_json::from_value(json!({
            "service": "Hosting",
            "desc": "Standard plan",
            "vatRate": 14,
            "fees": 10,
            "amount": 100
        }))
        .unwrap();
        assert_eq!(item.tax_rate, 14.0);
        assert_eq!(item.description, "Standard plan");
        assert_eq!(item.duration, "");
    }

    #[test]
    fn serializes_rate_under_both_keys() {
        let item = LineItem {
            service: "Domain".into(),
            tax_rate: 5.0,
            amount: 20.0,
            ..LineItem::default()
        };
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["tax"], json!(5.0));
        assert_eq!(value["vatRate"], json!(5.0));
        assert_eq!(value["desc"], json!(""));
    }

    #[test]
    fn typed_row_round_trips_numbers() {
        let mut row = RowInput::default();
        row.set(RowField::Amount, "1,200.5");
        row.set(RowField::TaxRate, "14");
        row.set(RowField::Fees, "oops");
        let item = row.to_line_item();
        assert_eq!(item.amount, 1200.5);
        assert_eq!(item.tax_rate, 14.0);
        assert_eq!(item.fees, 0.0);

        let back = RowInput::from(&item);
        assert_eq!(back.amount, "1200.5");
        assert_eq!(back.tax_rate, "14");
    }
}
