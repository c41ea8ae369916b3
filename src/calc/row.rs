//! Per-row tax and total calculation.

use crate::calc::format::{format_money, parse_number};
use crate::domain::line_item::RowInput;

/// Numeric result for a row that takes part in the document totals.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RowTotals {
    pub amount: f64,
    pub tax_amount: f64,
    pub row_total: f64,
}

impl RowTotals {
    /// Display string for the read-only tax cell.
    pub fn tax_display(&self) -> String {
        format_money(self.tax_amount)
    }

    /// Display string for the read-only total cell.
    pub fn total_display(&self) -> String {
        format_money(self.row_total)
    }
}

/// Parses an amount field, ignoring `,` grouping separators.
pub fn parse_amount(raw: &str) -> Option<f64> {
    parse_number(&raw.replace(',', ""))
}

/// Parses a tax-rate field. Unlike amounts, an empty rate is not computable.
pub fn parse_tax_rate(raw: &str) -> Option<f64> {
    if raw.trim().is_empty() {
        return None;
    }
    parse_number(raw)
}

/// Parses a fees field, falling back to zero for anything non-numeric.
pub fn parse_fees(raw: &str) -> f64 {
    parse_number(raw).unwrap_or(0.0)
}

/// Computes a row's tax and total.
///
/// Returns `None` when either the amount or the tax rate is not computable;
/// such a row is left out of the document totals and its derived cells keep
/// whatever they showed before.
pub fn calculate_row(row: &RowInput) -> Option<RowTotals> {
    let amount = parse_amount(&row.amount)?;
    let tax_rate = parse_tax_rate(&row.tax_rate)?;
    let fees = parse_fees(&row.fees);

    let tax_amount = amount * (tax_rate / 100.0) + fees;
    Some(RowTotals {
        amount,
        tax_amount,
        row_total: amount + tax_amount,
    })
}
