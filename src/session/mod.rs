//! Client-side credential storage.
//!
//! The API hands out a bearer token at sign-in. It is kept, together with the
//! signed-in user's name, email and role, in a small key/value store that
//! outlives a single command invocation.

use thiserror::Error;

use crate::domain::types::UserRole;
use crate::domain::user::LoginResponse;

pub mod file;
pub mod memory;

pub use file::FileSessionStore;
pub use memory::MemorySessionStore;

pub const TOKEN_KEY: &str = "token";
pub const USERNAME_KEY: &str = "username";
pub const EMAIL_KEY: &str = "email";
pub const ROLE_KEY: &str = "role";

/// Value some front-ends persist when a token was never set.
const UNDEFINED_TOKEN: &str = "undefined";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("session store is corrupted: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("session store lock poisoned")]
    Poisoned,
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Key/value storage for the signed-in user's credentials.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> SessionResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> SessionResult<()>;
    fn remove(&self, key: &str) -> SessionResult<()>;
    fn clear(&self) -> SessionResult<()>;
}

/// Credentials of the signed-in user as kept in a [`SessionStore`].
#[derive(Clone, Debug, PartialEq)]
pub struct StoredCredentials {
    pub token: String,
    pub username: String,
    pub email: String,
    pub role: UserRole,
}

impl From<LoginResponse> for StoredCredentials {
    fn from(response: LoginResponse) -> Self {
        Self {
            token: response.token,
            username: response.username,
            email: response.email,
            role: response.role,
        }
    }
}

impl StoredCredentials {
    /// Writes every credential key.
    pub fn save<S: SessionStore + ?Sized>(&self, store: &S) -> SessionResult<()> {
        store.set(TOKEN_KEY, &self.token)?;
        store.set(USERNAME_KEY, &self.username)?;
        store.set(EMAIL_KEY, &self.email)?;
        store.set(ROLE_KEY, self.role.as_str())?;
        Ok(())
    }

    /// Reads the credentials back. `None` when no usable token is stored.
    pub fn load<S: SessionStore + ?Sized>(store: &S) -> SessionResult<Option<Self>> {
        let Some(token) = stored_token(store)? else {
            return Ok(None);
        };

        Ok(Some(Self {
            token,
            username: store.get(USERNAME_KEY)?.unwrap_or_default(),
            email: store.get(EMAIL_KEY)?.unwrap_or_default(),
            role: store
                .get(ROLE_KEY)?
                .as_deref()
                .map(UserRole::from)
                .unwrap_or_default(),
        }))
    }
}

/// The bearer token, treating an empty or `undefined` value as absent.
pub fn stored_token<S: SessionStore + ?Sized>(store: &S) -> SessionResult<Option<String>> {
    Ok(store
        .get(TOKEN_KEY)?
        .filter(|token| !token.is_empty() && token != UNDEFINED_TOKEN))
}

/// Whether a usable token is stored.
pub fn is_authenticated<S: SessionStore + ?Sized>(store: &S) -> bool {
    match stored_token(store) {
        Ok(token) => token.is_some(),
        Err(err) => {
            log::error!("Failed to read session token: {err}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_round_trip_through_store() {
        let store = MemorySessionStore::default();
        let credentials = StoredCredentials {
            token: "abc".into(),
            username: "mona".into(),
            email: "mona@example.com".into(),
            role: UserRole::Admin,
        };
        credentials.save(&store).unwrap();

        assert_eq!(StoredCredentials::load(&store).unwrap(), Some(credentials));
        assert!(is_authenticated(&store));
    }

    #[test]
    fn undefined_token_counts_as_missing() {
        let store = MemorySessionStore::default();
        store.set(TOKEN_KEY, "undefined").unwrap();
        store.set(USERNAME_KEY, "ghost").unwrap();

        assert!(!is_authenticated(&store));
        assert_eq!(StoredCredentials::load(&store).unwrap(), None);
    }

    #[test]
    fn unknown_role_defaults_to_user() {
        let store = MemorySessionStore::default();
        store.set(TOKEN_KEY, "t").unwrap();
        store.set(ROLE_KEY, "owner").unwrap();

        let credentials = StoredCredentials::load(&store).unwrap().unwrap();
        assert_eq!(credentials.role, UserRole::User);
        assert_eq!(credentials.username, "");
    }
}
