//! Client directory form.

use serde::Deserialize;
use validator::Validate;

use crate::domain::client::NewClient;
use crate::domain::types::ClientId;
use crate::forms::FormError;

#[derive(Debug, Default, Deserialize, Validate)]
/// Create-or-update form. A present `id` means update.
pub struct ClientForm {
    #[serde(default)]
    pub id: Option<String>,
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
}

/// Validated client form.
pub struct ClientPayload {
    pub id: Option<ClientId>,
    pub client: NewClient,
}

impl TryFrom<ClientForm> for ClientPayload {
    type Error = FormError;

    fn try_from(mut form: ClientForm) -> Result<Self, Self::Error> {
        form.name = form.name.trim().to_string();
        form.validate()?;

        let id = match form.id.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(id) => Some(ClientId::new(id).map_err(|_| FormError::InvalidClientId)?),
        };

        let client = NewClient::new(form.name, form.phone, form.email, form.address);

        Ok(Self { id, client })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_id_means_new_client() {
        let payload = ClientPayload::try_from(ClientForm {
            id: Some(String::new()),
            name: " Acme ".into(),
            email: "Sales@Acme.COM".into(),
            ..ClientForm::default()
        })
        .unwrap();

        assert!(payload.id.is_none());
        assert_eq!(payload.client.name, "Acme");
        assert_eq!(payload.client.email, "sales@acme.com");
    }

    #[test]
    fn blank_name_is_rejected() {
        let result = ClientPayload::try_from(ClientForm {
            name: "   ".into(),
            ..ClientForm::default()
        });
        assert!(matches!(result, Err(FormError::Validation(_))));
    }

    #[test]
    fn id_is_kept_for_updates() {
        let payload = ClientPayload::try_from(ClientForm {
            id: Some("abc123".into()),
            name: "Acme".into(),
            ..ClientForm::default()
        })
        .unwrap();
        assert_eq!(payload.id.unwrap().as_str(), "abc123");
    }
}
