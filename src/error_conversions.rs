//! Error conversion glue between layers.
//!
//! The domain and form layers must not depend on service/repository error
//! types, so the `From` impls live here.

use crate::domain::types::TypeConstraintError;
use crate::forms::FormError;
use crate::repository::errors::RepositoryError;
use crate::services::ServiceError;
use crate::session::SessionError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::InvalidResponse(val.to_string())
    }
}

impl From<FormError> for ServiceError {
    fn from(val: FormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<SessionError> for ServiceError {
    fn from(val: SessionError) -> Self {
        ServiceError::Internal(val.to_string())
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(val: RepositoryError) -> Self {
        match val {
            RepositoryError::Unauthorized => ServiceError::Unauthorized,
            RepositoryError::Api { message, .. } => ServiceError::Api(message),
            RepositoryError::Transport(message) => ServiceError::Network(message),
            RepositoryError::InvalidResponse(message) => ServiceError::Internal(message),
            RepositoryError::Session(err) => ServiceError::Internal(err.to_string()),
        }
    }
}
