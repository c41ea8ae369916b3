//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (e.g., non-empty identifiers,
//! trimmed names, known status vocabularies) so that once a value reaches the
//! domain layer it can be treated as trusted.
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
    /// Status does not belong to the document mode's vocabulary.
    #[error("status `{status}` is not valid for a {mode}")]
    InvalidStatus {
        status: DocumentStatus,
        mode: DocumentMode,
    },
    /// Attempted to move a quotation out of the converted state.
    #[error("a converted quotation cannot change status")]
    QuotationAlreadyConverted,
}

/// Wrapper for non-empty, trimmed strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    /// Borrow the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper returning the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for NonEmptyString {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for NonEmptyString {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for NonEmptyString {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let inner = NonEmptyString::new(value)?;
                Ok(Self(inner.into_inner()))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

non_empty_string_newtype!(
    DocumentId,
    "Server-assigned identifier of an invoice or quotation."
);

non_empty_string_newtype!(ClientId, "Server-assigned identifier of a client.");

non_empty_string_newtype!(UserId, "Server-assigned identifier of a team member.");

non_empty_string_newtype!(
    ClientName,
    "Customer name wrapper enforcing non-empty values."
);

/// Whether a document is an invoice (purchase order) or a quotation (offer).
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DocumentMode {
    #[default]
    Invoice,
    Quotation,
}

impl DocumentMode {
    /// API collection path for documents of this mode.
    pub const fn collection(self) -> &'static str {
        match self {
            DocumentMode::Invoice => "/api/invoices",
            DocumentMode::Quotation => "/api/quotations",
        }
    }

    /// Human label used in notices.
    pub const fn label(self) -> &'static str {
        match self {
            DocumentMode::Invoice => "Invoice",
            DocumentMode::Quotation => "Quotation",
        }
    }
}

impl Display for DocumentMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentMode::Invoice => write!(f, "invoice"),
            DocumentMode::Quotation => write!(f, "quotation"),
        }
    }
}

impl FromStr for DocumentMode {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "invoice" => Ok(DocumentMode::Invoice),
            "quotation" => Ok(DocumentMode::Quotation),
            other => Err(TypeConstraintError::InvalidValue(other.to_string())),
        }
    }
}

/// Lifecycle status shared by both document vocabularies.
///
/// Invoices use `pending`, `paid` and `cancelled` and may move freely between
/// them. Quotations use `pending`/`draft` (the same state) and `converted`,
/// and never leave `converted`.
#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    #[default]
    Pending,
    Draft,
    Paid,
    Cancelled,
    Converted,
}

impl DocumentStatus {
    /// Whether the status is part of the vocabulary for `mode`.
    pub const fn is_valid_for(self, mode: DocumentMode) -> bool {
        match mode {
            DocumentMode::Invoice => matches!(
                self,
                DocumentStatus::Pending | DocumentStatus::Paid | DocumentStatus::Cancelled
            ),
            DocumentMode::Quotation => matches!(
                self,
                DocumentStatus::Pending | DocumentStatus::Draft | DocumentStatus::Converted
            ),
        }
    }

    /// True for a quotation that already produced an invoice.
    pub const fn is_converted(self) -> bool {
        matches!(self, DocumentStatus::Converted)
    }

    /// Validates moving an invoice to `next`. Any invoice status may follow any other.
    pub fn invoice_transition(self, next: DocumentStatus) -> Result<Self, TypeConstraintError> {
        if next.is_valid_for(DocumentMode::Invoice) {
            Ok(next)
        } else {
            Err(TypeConstraintError::InvalidStatus {
                status: next,
                mode: DocumentMode::Invoice,
            })
        }
    }

    /// Marks a quotation converted. Only allowed from draft/pending.
    pub fn convert_quotation(self) -> Result<Self, TypeConstraintError> {
        match self {
            DocumentStatus::Pending | DocumentStatus::Draft => Ok(DocumentStatus::Converted),
            DocumentStatus::Converted => Err(TypeConstraintError::QuotationAlreadyConverted),
            other => Err(TypeConstraintError::InvalidStatus {
                status: other,
                mode: DocumentMode::Quotation,
            }),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            DocumentStatus::Pending => "pending",
            DocumentStatus::Draft => "draft",
            DocumentStatus::Paid => "paid",
            DocumentStatus::Cancelled => "cancelled",
            DocumentStatus::Converted => "converted",
        }
    }
}

impl Display for DocumentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Unknown or missing statuses read as pending.
impl<'de> Deserialize<'de> for DocumentStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw
            .as_deref()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default())
    }
}

impl FromStr for DocumentStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(DocumentStatus::Pending),
            "draft" => Ok(DocumentStatus::Draft),
            "paid" => Ok(DocumentStatus::Paid),
            "cancelled" => Ok(DocumentStatus::Cancelled),
            "converted" => Ok(DocumentStatus::Converted),
            other => Err(TypeConstraintError::InvalidValue(other.to_string())),
        }
    }
}

/// Access level of a signed-in team member.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    #[default]
    User,
}

impl UserRole {
    pub const fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::User => "user",
        }
    }
}

impl Display for UserRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s.trim() {
            "admin" => UserRole::Admin,
            _ => UserRole::User,
        }
    }
}

/// Reformats phone input as it is typed.
///
/// Everything except digits and `+` is dropped. Egyptian numbers (`+20`) are
/// grouped as `+20 1xx xxx xxxx`; any other input is returned unchanged.
pub fn format_phone_input(value: &str) -> String {
    let mut digits: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();
    if !digits.starts_with('+') {
        digits.insert(0, '+');
    }

    if !digits.starts_with("+20") {
        return value.to_string();
    }

    let bounds = [(0, 3), (3, 6), (6, 9), (9, 13)];
    bounds
        .iter()
        .filter(|(start, _)| digits.len() > *start)
        .map(|(start, end)| &digits[*start..(*end).min(digits.len())])
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_name_is_trimmed_and_required() {
        assert_eq!(ClientName::new("  Acme ").unwrap().as_str(), "Acme");
        assert_eq!(ClientName::new("   "), Err(TypeConstraintError::EmptyString));
    }

    #[test]
    fn mode_parses_empty_as_invoice() {
        assert_eq!("".parse::<DocumentMode>().unwrap(), DocumentMode::Invoice);
        assert_eq!(
            "quotation".parse::<DocumentMode>().unwrap(),
            DocumentMode::Quotation
        );
        assert!("receipt".parse::<DocumentMode>().is_err());
    }

    #[test]
    fn invoice_status_moves_freely() {
        let paid = DocumentStatus::Pending
            .invoice_transition(DocumentStatus::Paid)
            .unwrap();
        let cancelled = paid.invoice_transition(DocumentStatus::Cancelled).unwrap();
        let pending = cancelled
            .invoice_transition(DocumentStatus::Pending)
            .unwrap();
        assert_eq!(pending, DocumentStatus::Pending);
        assert!(
            pending
                .invoice_transition(DocumentStatus::Converted)
                .is_err()
        );
    }

    #[test]
    fn quotation_conversion_is_one_way() {
        let converted = DocumentStatus::Draft.convert_quotation().unwrap();
        assert_eq!(converted, DocumentStatus::Converted);
        assert_eq!(
            converted.convert_quotation(),
            Err(TypeConstraintError::QuotationAlreadyConverted)
        );
    }

    #[test]
    fn status_vocabulary_depends_on_mode() {
        assert!(DocumentStatus::Paid.is_valid_for(DocumentMode::Invoice));
        assert!(!DocumentStatus::Paid.is_valid_for(DocumentMode::Quotation));
        assert!(DocumentStatus::Draft.is_valid_for(DocumentMode::Quotation));
        assert!(!DocumentStatus::Converted.is_valid_for(DocumentMode::Invoice));
    }

    #[test]
    fn egyptian_numbers_are_grouped() {
        assert_eq!(format_phone_input("+201001234567"), "+20 100 123 4567");
        assert_eq!(format_phone_input("201001234567"), "+20 100 123 4567");
        assert_eq!(format_phone_input("+20 10"), "+20 10");
        assert_eq!(format_phone_input("(+20) 100-123"), "+20 100 123");
    }

    #[test]
    fn other_numbers_are_left_alone() {
        assert_eq!(format_phone_input("+1 555 0100"), "+1 555 0100");
        assert_eq!(format_phone_input(""), "");
    }
}
