//! Display strings produced by the calculation core for the editor.

use serde::Serialize;

use crate::domain::line_item::RowId;

/// Summary area of the editor.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct SummaryDisplay {
    pub subtotal: String,
    pub taxes: String,
    pub grand_total: String,
    /// Grand total spelled out in words.
    pub words: String,
    pub currency: String,
}

/// Read-only derived cells of one row.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct RowDisplay {
    pub row_id: RowId,
    pub tax_amount: String,
    pub row_total: String,
}

impl RowDisplay {
    /// Cells of a row that has never been computed.
    pub fn blank(row_id: RowId) -> Self {
        Self {
            row_id,
            tax_amount: "0.00".to_string(),
            row_total: "0.00".to_string(),
        }
    }
}

/// Everything a recompute publishes.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct EditorDisplay {
    pub summary: SummaryDisplay,
    pub rows: Vec<RowDisplay>,
}

impl EditorDisplay {
    pub fn row(&self, row_id: RowId) -> Option<&RowDisplay> {
        self.rows.iter().find(|row| row.row_id == row_id)
    }
}
