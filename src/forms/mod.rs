//! Form definitions backing the client views.

use thiserror::Error;
use validator::ValidationErrors;

pub mod admin;
pub mod client;
pub mod login;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("{0} must be a number")]
    NotNumeric(&'static str),

    #[error("invalid client id")]
    InvalidClientId,
}
