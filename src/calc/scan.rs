//! Header fields recovered from the plain text of an imported document.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::types::format_phone_input;

/// Tried in order; the first match wins.
static NUMBER_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?i)PO\s*[:#-]?\s*([A-Z0-9-]+)",
        r"(?i)Invoice\s*No\.?\s*[:#-]?\s*([A-Z0-9-]+)",
        r"#\s?([0-9]{4,})",
    ])
});

/// Egyptian mobile numbers, international form first.
static PHONE_PATTERNS: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile(&[r"(\+20\s?1[0-2,5]\d{8})", r"(01[0-2,5]\d{8})"]));

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|pattern| match Regex::new(pattern) {
            Ok(regex) => Some(regex),
            Err(err) => {
                log::error!("Invalid scan pattern {pattern}: {err}");
                None
            }
        })
        .collect()
}

/// Whatever could be recognised; `None` fields leave the session untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScannedFields {
    pub number: Option<String>,
    pub phone: Option<String>,
    pub currency: Option<&'static str>,
}

impl ScannedFields {
    pub fn is_empty(&self) -> bool {
        self.number.is_none() && self.phone.is_none() && self.currency.is_none()
    }
}

fn first_capture<'t>(patterns: &[Regex], text: &'t str) -> Option<&'t str> {
    patterns
        .iter()
        .find_map(|regex| regex.captures(text)?.get(1))
        .map(|capture| capture.as_str())
}

/// Scans `text` for a document number, a client phone and a currency.
///
/// Numbers are normalised to a `PO-` prefix. Phones go through the same
/// formatter as typed input.
pub fn scan_text(text: &str) -> ScannedFields {
    let number = first_capture(&NUMBER_PATTERNS, text).map(|raw| {
        let cleaned = raw.replace([':', '#'], "").replacen("PO-", "", 1);
        format!("PO-{}", cleaned.trim())
    });

    let phone = first_capture(&PHONE_PATTERNS, text).map(format_phone_input);

    let lower = text.to_lowercase();
    let currency = if text.contains('$') || lower.contains("usd") {
        Some("$")
    } else if text.contains('€') || lower.contains("eur") {
        Some("€")
    } else if text.contains("EGP") || text.contains("ج.م") {
        Some("EGP")
    } else {
        None
    };

    ScannedFields {
        number,
        phone,
        currency,
    }
}
