//! Gateways to the invoicing API.
//!
//! Services depend on these traits only; [`http::HttpRepository`] is the
//! production implementation and `mock::MockRepository` stands in for it in
//! tests.

use async_trait::async_trait;

use crate::domain::client::{Client, NewClient};
use crate::domain::document::Document;
use crate::domain::types::{ClientId, DocumentId, DocumentMode, DocumentStatus, UserId};
use crate::domain::user::{
    CounterUpdate, Credentials, DashboardStats, LoginResponse, NewUser, PasswordChange,
    ProfileUpdate, User, UserProfile,
};
use crate::repository::errors::RepositoryResult;

pub mod errors;
pub mod http;
#[cfg(feature = "test-mocks")]
pub mod mock;

pub use http::HttpRepository;

#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchanges credentials for a token. Never triggers the sign-out path.
    async fn login(&self, credentials: &Credentials) -> RepositoryResult<LoginResponse>;
}

#[async_trait]
pub trait ClientReader: Send + Sync {
    async fn list_clients(&self) -> RepositoryResult<Vec<Client>>;
}

#[async_trait]
pub trait ClientWriter: Send + Sync {
    async fn create_client(&self, client: &NewClient) -> RepositoryResult<()>;
    async fn update_client(&self, id: &ClientId, client: &NewClient) -> RepositoryResult<()>;
    async fn delete_client(&self, id: &ClientId) -> RepositoryResult<()>;
}

#[async_trait]
pub trait DocumentReader: Send + Sync {
    async fn list_documents(&self, mode: DocumentMode) -> RepositoryResult<Vec<Document>>;
    /// Fetches one document, unwrapping `{invoice: …}` / `{quotation: …}` envelopes.
    async fn get_document(&self, mode: DocumentMode, id: &DocumentId) -> RepositoryResult<Document>;
    async fn next_invoice_number(&self) -> RepositoryResult<Option<String>>;
}

#[async_trait]
pub trait DocumentWriter: Send + Sync {
    async fn create_document(&self, document: &Document) -> RepositoryResult<()>;
    async fn update_document(&self, id: &DocumentId, document: &Document) -> RepositoryResult<()>;
    async fn delete_document(&self, mode: DocumentMode, id: &DocumentId) -> RepositoryResult<()>;
    async fn update_invoice_status(
        &self,
        id: &DocumentId,
        status: DocumentStatus,
    ) -> RepositoryResult<()>;
    async fn convert_quotation(&self, id: &DocumentId) -> RepositoryResult<()>;
    /// Tells the server the current invoice number has been issued.
    async fn confirm_invoice_number(&self) -> RepositoryResult<()>;
}

#[async_trait]
pub trait AdminReader: Send + Sync {
    async fn dashboard_stats(&self) -> RepositoryResult<DashboardStats>;
    async fn list_users(&self) -> RepositoryResult<Vec<User>>;
    /// Raw backup of every document.
    async fn export_data(&self) -> RepositoryResult<Vec<u8>>;
}

#[async_trait]
pub trait AdminWriter: Send + Sync {
    async fn register_user(&self, user: &NewUser) -> RepositoryResult<()>;
    async fn delete_user(&self, id: &UserId) -> RepositoryResult<()>;
    /// Returns the confirmation message the server sends back, if any.
    async fn update_counter(&self, counter: &CounterUpdate) -> RepositoryResult<Option<String>>;
}

#[async_trait]
pub trait AccountWriter: Send + Sync {
    async fn change_password(&self, change: &PasswordChange) -> RepositoryResult<()>;
    async fn update_profile(&self, profile: &ProfileUpdate) -> RepositoryResult<UserProfile>;
}
