//! Login page and sign-out.

use crate::forms::login::LoginForm;
use crate::repository::AuthGateway;
use crate::services::{ServiceError, auth as auth_service};
use crate::session::SessionStore;
use crate::views::{Navigation, Outcome};

const CONNECTION_ERROR: &str = "Connection error";

/// Sign-in form state. Failures are shown inline rather than as notices.
#[derive(Debug, Default)]
pub struct LoginPage {
    pub error: Option<String>,
}

impl LoginPage {
    pub async fn submit<R, S>(&mut self, repo: &R, store: &S, form: LoginForm) -> Outcome
    where
        R: AuthGateway + ?Sized,
        S: SessionStore + ?Sized,
    {
        match auth_service::login(repo, store, form).await {
            Ok(credentials) => {
                self.error = None;
                Outcome::navigate(Navigation::landing_for(&credentials.role))
            }
            Err(ServiceError::Api(message)) | Err(ServiceError::Form(message)) => {
                self.error = Some(message);
                Outcome::none()
            }
            Err(err) => {
                log::error!("Sign-in request failed: {err}");
                self.error = Some(CONNECTION_ERROR.to_string());
                Outcome::none()
            }
        }
    }
}

pub fn logout<S>(store: &S) -> Outcome
where
    S: SessionStore + ?Sized,
{
    if let Err(err) = auth_service::logout(store) {
        log::error!("Failed to clear session: {err}");
    }
    Outcome::navigate(Navigation::Login)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::types::UserRole;
    use crate::domain::user::LoginResponse;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;
    use crate::session::MemorySessionStore;

    fn form() -> LoginForm {
        LoginForm {
            email: "a@example.com".into(),
            password: "pw".into(),
        }
    }

    #[tokio::test]
    async fn plain_user_lands_in_editor() {
        let mut repo = MockRepository::new();
        repo.expect_login().returning(|_| {
            Ok(LoginResponse {
                token: "jwt".into(),
                username: "a".into(),
                email: "a@example.com".into(),
                role: UserRole::User,
            })
        });
        let store = MemorySessionStore::new();
        let mut page = LoginPage::default();

        let outcome = page.submit(&repo, &store, form()).await;

        assert_eq!(outcome.navigation, Some(Navigation::new_document()));
        assert_eq!(page.error, None);
    }

    #[tokio::test]
    async fn bad_credentials_show_inline() {
        let mut repo = MockRepository::new();
        repo.expect_login().returning(|_| {
            Err(RepositoryError::Api {
                status: 400,
                message: "Invalid credentials".into(),
            })
        });
        let store = MemorySessionStore::new();
        let mut page = LoginPage::default();

        let outcome = page.submit(&repo, &store, form()).await;

        assert_eq!(outcome, Outcome::none());
        assert_eq!(page.error.as_deref(), Some("Invalid credentials"));
    }

    #[tokio::test]
    async fn transport_failure_is_a_connection_error() {
        let mut repo = MockRepository::new();
        repo.expect_login()
            .returning(|_| Err(RepositoryError::Transport("refused".into())));
        let store = MemorySessionStore::new();
        let mut page = LoginPage::default();

        page.submit(&repo, &store, form()).await;

        assert_eq!(page.error.as_deref(), Some(CONNECTION_ERROR));
    }
}
