//! Mock repository implementations for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::domain::client::{Client, NewClient};
use crate::domain::document::Document;
use crate::domain::types::{ClientId, DocumentId, DocumentMode, DocumentStatus, UserId};
use crate::domain::user::{
    CounterUpdate, Credentials, DashboardStats, LoginResponse, NewUser, PasswordChange,
    ProfileUpdate, User, UserProfile,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    AccountWriter, AdminReader, AdminWriter, AuthGateway, ClientReader, ClientWriter,
    DocumentReader, DocumentWriter,
};

mock! {
    pub Repository {}

    #[async_trait]
    impl AuthGateway for Repository {
        async fn login(&self, credentials: &Credentials) -> RepositoryResult<LoginResponse>;
    }

    #[async_trait]
    impl ClientReader for Repository {
        async fn list_clients(&self) -> RepositoryResult<Vec<Client>>;
    }

    #[async_trait]
    impl ClientWriter for Repository {
        async fn create_client(&self, client: &NewClient) -> RepositoryResult<()>;
        async fn update_client(&self, id: &ClientId, client: &NewClient) -> RepositoryResult<()>;
        async fn delete_client(&self, id: &ClientId) -> RepositoryResult<()>;
    }

    #[async_trait]
    impl DocumentReader for Repository {
        async fn list_documents(&self, mode: DocumentMode) -> RepositoryResult<Vec<Document>>;
        async fn get_document(
            &self,
            mode: DocumentMode,
            id: &DocumentId,
        ) -> RepositoryResult<Document>;
        async fn next_invoice_number(&self) -> RepositoryResult<Option<String>>;
    }

    #[async_trait]
    impl DocumentWriter for Repository {
        async fn create_document(&self, document: &Document) -> RepositoryResult<()>;
        async fn update_document(
            &self,
            id: &DocumentId,
            document: &Document,
        ) -> RepositoryResult<()>;
        async fn delete_document(&self, mode: DocumentMode, id: &DocumentId) -> RepositoryResult<()>;
        async fn update_invoice_status(
            &self,
            id: &DocumentId,
            status: DocumentStatus,
        ) -> RepositoryResult<()>;
        async fn convert_quotation(&self, id: &DocumentId) -> RepositoryResult<()>;
        async fn confirm_invoice_number(&self) -> RepositoryResult<()>;
    }

    #[async_trait]
    impl AdminReader for Repository {
        async fn dashboard_stats(&self) -> RepositoryResult<DashboardStats>;
        async fn list_users(&self) -> RepositoryResult<Vec<User>>;
        async fn export_data(&self) -> RepositoryResult<Vec<u8>>;
    }

    #[async_trait]
    impl AdminWriter for Repository {
        async fn register_user(&self, user: &NewUser) -> RepositoryResult<()>;
        async fn delete_user(&self, id: &UserId) -> RepositoryResult<()>;
        async fn update_counter(&self, counter: &CounterUpdate) -> RepositoryResult<Option<String>>;
    }

    #[async_trait]
    impl AccountWriter for Repository {
        async fn change_password(&self, change: &PasswordChange) -> RepositoryResult<()>;
        async fn update_profile(&self, profile: &ProfileUpdate) -> RepositoryResult<UserProfile>;
    }
}
