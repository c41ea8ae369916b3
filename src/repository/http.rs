//! Gateway implementation over the invoicing REST API.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::domain::client::{Client as Customer, NewClient};
use crate::domain::document::{Document, DocumentEnvelope};
use crate::domain::types::{ClientId, DocumentId, DocumentMode, DocumentStatus, UserId};
use crate::domain::user::{
    CounterUpdate, Credentials, DashboardStats, LoginResponse, NewUser, PasswordChange,
    ProfileUpdate, User, UserProfile,
};
use crate::models::config::ClientConfig;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    AccountWriter, AdminReader, AdminWriter, AuthGateway, ClientReader, ClientWriter,
    DocumentReader, DocumentWriter,
};
use crate::session::{SessionStore, stored_token};

/// Talks to the API with `reqwest`, authenticating from a [`SessionStore`].
///
/// Every request except sign-in carries `Authorization: Bearer <token>` when a
/// token is stored. A `401` clears the store and yields
/// [`RepositoryError::Unauthorized`].
#[derive(Debug)]
pub struct HttpRepository<S> {
    client: Client,
    base_url: String,
    session: Arc<S>,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct MessageBody {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NextNumber {
    #[serde(default)]
    invoice_no: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ProfileEnvelope {
    Wrapped { user: UserProfile },
    Bare(UserProfile),
}

impl<S: SessionStore> HttpRepository<S> {
    pub fn new(config: &ClientConfig, session: Arc<S>) -> RepositoryResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RepositoryResult<RequestBuilder> {
        let mut request = self.client.request(method, self.url(path));
        if let Some(token) = stored_token(self.session.as_ref())? {
            request = request.bearer_auth(token);
        }
        Ok(request)
    }

    async fn send(&self, request: RequestBuilder) -> RepositoryResult<Response> {
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            log::warn!("API rejected the session token, signing out");
            self.session.clear()?;
            return Err(RepositoryError::Unauthorized);
        }

        if !status.is_success() {
            return Err(api_error(response).await);
        }

        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> RepositoryResult<T> {
        let response = self.send(self.request(Method::GET, path)?).await?;
        Ok(response.json().await?)
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> RepositoryResult<Response> {
        self.send(self.request(method, path)?.json(body)).await
    }

    async fn send_empty(&self, method: Method, path: &str) -> RepositoryResult<Response> {
        self.send(self.request(method, path)?).await
    }
}

/// Turns a non-success response into [`RepositoryError::Api`], preferring the
/// `message` (then `error`) field of a JSON body.
async fn api_error(response: Response) -> RepositoryError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();

    let message = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(|body| body.message.or(body.error))
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            } else {
                trimmed.to_string()
            }
        });

    RepositoryError::Api {
        status: status.as_u16(),
        message,
    }
}

fn document_path(mode: DocumentMode, id: &DocumentId) -> String {
    format!("{}/{}", mode.collection(), id)
}

#[async_trait]
impl<S: SessionStore> AuthGateway for HttpRepository<S> {
    async fn login(&self, credentials: &Credentials) -> RepositoryResult<LoginResponse> {
        let response = self
            .client
            .post(self.url("/api/auth/login"))
            .json(credentials)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl<S: SessionStore> ClientReader for HttpRepository<S> {
    async fn list_clients(&self) -> RepositoryResult<Vec<Customer>> {
        self.get_json("/api/clients").await
    }
}

#[async_trait]
impl<S: SessionStore> ClientWriter for HttpRepository<S> {
    async fn create_client(&self, client: &NewClient) -> RepositoryResult<()> {
        self.send_json(Method::POST, "/api/clients", client).await?;
        Ok(())
    }

    async fn update_client(&self, id: &ClientId, client: &NewClient) -> RepositoryResult<()> {
        self.send_json(Method::PUT, &format!("/api/clients/{id}"), client)
            .await?;
        Ok(())
    }

    async fn delete_client(&self, id: &ClientId) -> RepositoryResult<()> {
        self.send_empty(Method::DELETE, &format!("/api/clients/{id}"))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl<S: SessionStore> DocumentReader for HttpRepository<S> {
    async fn list_documents(&self, mode: DocumentMode) -> RepositoryResult<Vec<Document>> {
        self.get_json(mode.collection()).await
    }

    async fn get_document(&self, mode: DocumentMode, id: &DocumentId) -> RepositoryResult<Document> {
        let envelope: DocumentEnvelope = self.get_json(&document_path(mode, id)).await?;
        Ok(envelope.into_document())
    }

    async fn next_invoice_number(&self) -> RepositoryResult<Option<String>> {
        let next: NextNumber = self.get_json("/api/next-invoice").await?;
        Ok(next.invoice_no.filter(|no| !no.is_empty()))
    }
}

#[async_trait]
impl<S: SessionStore> DocumentWriter for HttpRepository<S> {
    async fn create_document(&self, document: &Document) -> RepositoryResult<()> {
        self.send_json(Method::POST, document.mode().collection(), document)
            .await?;
        Ok(())
    }

    async fn update_document(&self, id: &DocumentId, document: &Document) -> RepositoryResult<()> {
        self.send_json(Method::PUT, &document_path(document.mode(), id), document)
            .await?;
        Ok(())
    }

    async fn delete_document(&self, mode: DocumentMode, id: &DocumentId) -> RepositoryResult<()> {
        self.send_empty(Method::DELETE, &document_path(mode, id))
            .await?;
        Ok(())
    }

    async fn update_invoice_status(
        &self,
        id: &DocumentId,
        status: DocumentStatus,
    ) -> RepositoryResult<()> {
        let path = format!("{}/status", document_path(DocumentMode::Invoice, id));
        self.send_json(Method::PUT, &path, &json!({ "status": status }))
            .await?;
        Ok(())
    }

    async fn convert_quotation(&self, id: &DocumentId) -> RepositoryResult<()> {
        let path = format!("{}/convert", document_path(DocumentMode::Quotation, id));
        self.send_empty(Method::POST, &path).await?;
        Ok(())
    }

    async fn confirm_invoice_number(&self) -> RepositoryResult<()> {
        self.send_empty(Method::POST, "/api/confirm-invoice")
            .await?;
        Ok(())
    }
}

#[async_trait]
impl<S: SessionStore> AdminReader for HttpRepository<S> {
    async fn dashboard_stats(&self) -> RepositoryResult<DashboardStats> {
        self.get_json("/api/stats").await
    }

    async fn list_users(&self) -> RepositoryResult<Vec<User>> {
        self.get_json("/api/users").await
    }

    async fn export_data(&self) -> RepositoryResult<Vec<u8>> {
        let response = self.send_empty(Method::GET, "/api/export").await?;
        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl<S: SessionStore> AdminWriter for HttpRepository<S> {
    async fn register_user(&self, user: &NewUser) -> RepositoryResult<()> {
        self.send_json(Method::POST, "/api/auth/register", user)
            .await?;
        Ok(())
    }

    async fn delete_user(&self, id: &UserId) -> RepositoryResult<()> {
        self.send_empty(Method::DELETE, &format!("/api/users/{id}"))
            .await?;
        Ok(())
    }

    async fn update_counter(&self, counter: &CounterUpdate) -> RepositoryResult<Option<String>> {
        let response = self
            .send_json(Method::PUT, "/api/settings/counter", counter)
            .await?;
        let text = response.text().await?;
        Ok(serde_json::from_str::<MessageBody>(&text)
            .ok()
            .and_then(|body| body.message))
    }
}

#[async_trait]
impl<S: SessionStore> AccountWriter for HttpRepository<S> {
    async fn change_password(&self, change: &PasswordChange) -> RepositoryResult<()> {
        self.send_json(Method::PUT, "/api/auth/change-password", change)
            .await?;
        Ok(())
    }

    async fn update_profile(&self, profile: &ProfileUpdate) -> RepositoryResult<UserProfile> {
        let response = self
            .send_json(Method::PUT, "/api/auth/profile", profile)
            .await?;
        let envelope: ProfileEnvelope = response.json().await?;
        Ok(match envelope {
            ProfileEnvelope::Wrapped { user } => user,
            ProfileEnvelope::Bare(user) => user,
        })
    }
}
