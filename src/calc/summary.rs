//! Document-wide totals.

use crate::calc::format::{amount_to_words, format_money};
use crate::calc::row::calculate_row;
use crate::domain::document::DocumentTotals;
use crate::domain::line_item::RowInput;
use crate::dto::summary::SummaryDisplay;

/// Symbol shown when the currency field is left empty.
pub const DEFAULT_CURRENCY: &str = "$";

/// Returns the trimmed currency, or [`DEFAULT_CURRENCY`] when blank.
pub fn currency_or_default(currency: &str) -> String {
    let trimmed = currency.trim();
    if trimmed.is_empty() {
        DEFAULT_CURRENCY.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Sums every computable row. Rows the row calculator rejects add nothing.
pub fn summarize<'a, I>(rows: I, currency: &str) -> DocumentTotals
where
    I: IntoIterator<Item = &'a RowInput>,
{
    let (subtotal, total_tax) = rows
        .into_iter()
        .filter_map(calculate_row)
        .fold((0.0, 0.0), |(sum, tax), row| {
            (sum + row.amount, tax + row.tax_amount)
        });

    DocumentTotals {
        subtotal,
        total_tax,
        grand_total: subtotal + total_tax,
        currency: currency_or_default(currency),
    }
}

impl SummaryDisplay {
    /// Builds the display strings, including the spelled-out grand total.
    pub fn from_totals(totals: &DocumentTotals) -> Self {
        Self {
            subtotal: format_money(totals.subtotal),
            taxes: format_money(totals.total_tax),
            grand_total: format_money(totals.grand_total),
            words: amount_to_words(totals.grand_total),
            currency: totals.currency.clone(),
        }
    }
}
