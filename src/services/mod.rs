//! Service layer between the views and the API gateway.
//!
//! Functions here are generic over the repository traits so they can be
//! exercised against `MockRepository` in tests.

use thiserror::Error;

pub mod admin;
pub mod auth;
pub mod clients;
pub mod document;
pub mod history;
pub mod quotations;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The stored token is missing or was rejected.
    #[error("Unauthorized")]
    Unauthorized,

    /// Input failed local validation; nothing was sent.
    #[error("{0}")]
    Form(String),

    /// The API refused the request; the message is the server's own.
    #[error("{0}")]
    Api(String),

    #[error("Connection error: {0}")]
    Network(String),

    #[error("Not found")]
    NotFound,

    /// The user declined a confirmation prompt.
    #[error("Cancelled")]
    Cancelled,

    #[error("{0}")]
    TypeConstraint(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Whether a save created a new record or updated an existing one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveKind {
    Created,
    Updated,
}

/// Asks the user to confirm a destructive or irreversible action.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Fixed answer to every prompt, for non-interactive callers.
#[derive(Clone, Copy, Debug)]
pub struct AutoConfirm(pub bool);

impl Confirm for AutoConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}

/// Fails with [`ServiceError::Cancelled`] unless the user agrees.
pub fn ensure_confirmed<C: Confirm + ?Sized>(confirm: &C, prompt: &str) -> ServiceResult<()> {
    if confirm.confirm(prompt) {
        Ok(())
    } else {
        log::info!("Declined: {prompt}");
        Err(ServiceError::Cancelled)
    }
}
