//! Stateful page objects.
//!
//! A view owns the collection it shows, filters it in memory and turns
//! service results into an [`Outcome`]: an optional transient [`Notice`] and
//! an optional [`Navigation`] target. Rendering stays with the caller.

use serde::Serialize;

use crate::domain::types::{DocumentId, DocumentMode, UserRole};
use crate::services::ServiceError;
use crate::session::{SessionStore, is_authenticated};

pub mod admin;
pub mod auth;
pub mod clients;
pub mod editor;
pub mod history;
pub mod quotations;

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

pub fn alert_level_to_str(level: &NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Success => "success",
        NoticeLevel::Info => "info",
        NoticeLevel::Warning => "warning",
        NoticeLevel::Error => "error",
    }
}

/// Toast-style message shown once.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Page to move to after an event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Navigation {
    Login,
    Dashboard,
    Editor {
        id: Option<DocumentId>,
        mode: DocumentMode,
    },
    History,
    Quotations,
    Clients,
}

impl Navigation {
    /// A blank invoice editor.
    pub fn new_document() -> Self {
        Navigation::Editor {
            id: None,
            mode: DocumentMode::Invoice,
        }
    }

    /// Where a freshly signed-in user lands.
    pub fn landing_for(role: &UserRole) -> Self {
        match role {
            UserRole::Admin => Navigation::Dashboard,
            UserRole::User => Navigation::new_document(),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Navigation::Login => "/login.html".to_string(),
            Navigation::Dashboard => "/admin.html".to_string(),
            Navigation::Editor { id: None, .. } => "/".to_string(),
            Navigation::Editor {
                id: Some(id),
                mode: DocumentMode::Invoice,
            } => format!("/?id={id}"),
            Navigation::Editor {
                id: Some(id),
                mode: DocumentMode::Quotation,
            } => format!("/?id={id}&mode=quotation"),
            Navigation::History => "/history.html".to_string(),
            Navigation::Quotations => "/quotations.html".to_string(),
            Navigation::Clients => "/clients.html".to_string(),
        }
    }
}

/// Result of handling one event.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    pub notice: Option<Notice>,
    pub navigation: Option<Navigation>,
}

impl Outcome {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn notice(notice: Notice) -> Self {
        Self {
            notice: Some(notice),
            navigation: None,
        }
    }

    pub fn navigate(navigation: Navigation) -> Self {
        Self {
            notice: None,
            navigation: Some(navigation),
        }
    }

    pub fn and_navigate(mut self, navigation: Navigation) -> Self {
        self.navigation = Some(navigation);
        self
    }

    /// Maps a failed action to what the user sees.
    ///
    /// A rejected token always leads to the login page without a message. A
    /// declined confirmation shows nothing. Validation problems are warnings,
    /// server messages are shown verbatim and everything else gets `fallback`.
    pub fn from_error(err: ServiceError, fallback: &str) -> Self {
        match err {
            ServiceError::Unauthorized => Outcome::navigate(Navigation::Login),
            ServiceError::Cancelled => Outcome::none(),
            ServiceError::Form(message) => Outcome::notice(Notice::warning(message)),
            ServiceError::TypeConstraint(message) => Outcome::notice(Notice::warning(message)),
            ServiceError::Api(message) => Outcome::notice(Notice::error(message)),
            ServiceError::Network(_) | ServiceError::NotFound | ServiceError::Internal(_) => {
                Outcome::notice(Notice::error(fallback))
            }
        }
    }
}

/// Auth guard run before showing any protected page.
pub fn guard<S>(store: &S) -> Option<Outcome>
where
    S: SessionStore + ?Sized,
{
    if is_authenticated(store) {
        None
    } else {
        Some(Outcome::navigate(Navigation::Login))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{MemorySessionStore, TOKEN_KEY};

    #[test]
    fn unauthorized_only_navigates() {
        let outcome = Outcome::from_error(ServiceError::Unauthorized, "Failed");
        assert_eq!(outcome.notice, None);
        assert_eq!(outcome.navigation, Some(Navigation::Login));
    }

    #[test]
    fn api_message_is_verbatim_and_transport_is_generic() {
        let api = Outcome::from_error(ServiceError::Api("Invoice number taken".into()), "Save failed");
        assert_eq!(api.notice, Some(Notice::error("Invoice number taken")));

        let network = Outcome::from_error(ServiceError::Network("reset".into()), "Save failed");
        assert_eq!(network.notice, Some(Notice::error("Save failed")));

        let form = Outcome::from_error(ServiceError::Form("Please enter Client Name".into()), "x");
        assert_eq!(form.notice.unwrap().level, NoticeLevel::Warning);

        assert_eq!(Outcome::from_error(ServiceError::Cancelled, "x"), Outcome::none());
    }

    #[test]
    fn guard_redirects_without_token() {
        let store = MemorySessionStore::new();
        assert_eq!(guard(&store), Some(Outcome::navigate(Navigation::Login)));

        store.set(TOKEN_KEY, "undefined").unwrap();
        assert!(guard(&store).is_some());

        store.set(TOKEN_KEY, "jwt").unwrap();
        assert_eq!(guard(&store), None);
    }

    #[test]
    fn editor_paths_carry_id_and_mode() {
        let id = DocumentId::new("abc").unwrap();
        let quotation = Navigation::Editor {
            id: Some(id.clone()),
            mode: DocumentMode::Quotation,
        };
        assert_eq!(quotation.path(), "/?id=abc&mode=quotation");
        assert_eq!(Navigation::new_document().path(), "/");
        assert_eq!(Navigation::landing_for(&UserRole::Admin), Navigation::Dashboard);
    }
}
