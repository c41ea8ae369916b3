use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::user::User;

/// Backup download produced by the export action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ExportFile {
    pub fn new(date: NaiveDate, bytes: Vec<u8>) -> Self {
        Self {
            file_name: format!("invoices_backup_{}.json", date.format("%Y-%m-%d")),
            bytes,
        }
    }
}

/// One row of the users table.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct UserEntry {
    pub user: User,
    /// The configured protected account; it offers no delete action.
    pub protected: bool,
}
