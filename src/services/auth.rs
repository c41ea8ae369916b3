//! Sign-in, sign-out and the authentication guard.

use crate::domain::user::Credentials;
use crate::forms::login::LoginForm;
use crate::repository::AuthGateway;
use crate::services::{ServiceError, ServiceResult};
use crate::session::{SessionStore, StoredCredentials};

/// Exchanges the form for a token and stores the returned credentials.
///
/// A rejected sign-in surfaces the server's message as
/// [`ServiceError::Api`]; it never clears an existing session.
pub async fn login<R, S>(repo: &R, store: &S, form: LoginForm) -> ServiceResult<StoredCredentials>
where
    R: AuthGateway + ?Sized,
    S: SessionStore + ?Sized,
{
    let credentials = Credentials::try_from(form)?;

    let response = repo.login(&credentials).await.map_err(|err| {
        log::warn!("Sign-in failed for {}: {err}", credentials.email);
        ServiceError::from(err)
    })?;

    let stored = StoredCredentials::from(response);
    stored.save(store)?;
    log::info!("Signed in as {} ({})", stored.email, stored.role);

    Ok(stored)
}

pub fn logout<S>(store: &S) -> ServiceResult<()>
where
    S: SessionStore + ?Sized,
{
    store.clear()?;
    Ok(())
}

/// Returns the stored credentials, or [`ServiceError::Unauthorized`] when no
/// usable token is present.
pub fn require_auth<S>(store: &S) -> ServiceResult<StoredCredentials>
where
    S: SessionStore + ?Sized,
{
    StoredCredentials::load(store)?.ok_or(ServiceError::Unauthorized)
}
