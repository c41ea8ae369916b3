//! Invoices and quotations.
//!
//! Both share one record shape. The mode is recovered from which number field
//! is populated (`invoiceNo` or `quotationNo`).

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::line_item::LineItem;
use crate::domain::types::{DocumentId, DocumentMode, DocumentStatus, TypeConstraintError};

/// Aggregate amounts of a document, rounded to cents when persisted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DocumentTotals {
    pub subtotal: f64,
    pub total_tax: f64,
    pub grand_total: f64,
    pub currency: String,
}

/// An invoice or quotation as exchanged with the API.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DocumentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quotation_no: Option<String>,
    #[serde(
        default,
        serialize_with = "serialize_date",
        deserialize_with = "deserialize_date"
    )]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub client_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub client_phone: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub currency: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subtotal: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vat_amount: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_amount: f64,
}

impl Document {
    /// Mode derived from the populated number field. Quotation wins when both are set.
    pub fn mode(&self) -> DocumentMode {
        if self.quotation_no.as_deref().is_some_and(|no| !no.is_empty()) {
            DocumentMode::Quotation
        } else {
            DocumentMode::Invoice
        }
    }

    /// The document number regardless of mode.
    pub fn number(&self) -> Option<&str> {
        self.invoice_no
            .as_deref()
            .filter(|no| !no.is_empty())
            .or_else(|| self.quotation_no.as_deref().filter(|no| !no.is_empty()))
    }

    /// Fails when neither number field is populated.
    pub fn ensure_numbered(&self) -> Result<(), TypeConstraintError> {
        match self.number() {
            Some(_) => Ok(()),
            None => Err(TypeConstraintError::InvalidValue(
                "document has no invoice or quotation number".to_string(),
            )),
        }
    }

    /// Stores `number` in the field belonging to `mode`, clearing the other one.
    pub fn set_number(&mut self, mode: DocumentMode, number: impl Into<String>) {
        let number = number.into();
        match mode {
            DocumentMode::Invoice => {
                self.invoice_no = Some(number);
                self.quotation_no = None;
            }
            DocumentMode::Quotation => {
                self.quotation_no = Some(number);
                self.invoice_no = None;
            }
        }
    }

    /// Copies computed totals into the persisted amount fields.
    pub fn apply_totals(&mut self, totals: &DocumentTotals) {
        self.subtotal = round_cents(totals.subtotal);
        self.vat_amount = round_cents(totals.total_tax);
        self.total_amount = round_cents(totals.grand_total);
        self.currency = totals.currency.clone();
    }

    /// Client name for listings, with a placeholder when the record has none.
    pub fn client_label(&self) -> &str {
        let name = self.client_name.trim();
        if name.is_empty() { "Unknown Client" } else { name }
    }

    /// Case-insensitive match on client name or document number.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.client_name.to_lowercase().contains(&term)
            || self
                .number()
                .is_some_and(|no| no.to_lowercase().contains(&term))
    }
}

/// Single-document responses may arrive bare or wrapped in a mode-named key.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum DocumentEnvelope {
    Invoice { invoice: Document },
    Quotation { quotation: Document },
    Bare(Document),
}

impl DocumentEnvelope {
    pub fn into_document(self) -> Document {
        match self {
            DocumentEnvelope::Invoice { invoice } => invoice,
            DocumentEnvelope::Quotation { quotation } => quotation,
            DocumentEnvelope::Bare(document) => document,
        }
    }
}

/// Rounds to two decimals, half away from zero.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn serialize_date<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match date {
        Some(date) => serializer.serialize_str(&date.format("%Y-%m-%d").to_string()),
        None => serializer.serialize_str(""),
    }
}

/// Reads an explicit `null` as the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts `YYYY-MM-DD` as well as full ISO timestamps, keeping only the date.
fn deserialize_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_date))
}

/// Parses the leading `YYYY-MM-DD` of a date or timestamp string.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let head = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}
