use serde::{Deserialize, Serialize};

use crate::domain::types::ClientId;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Client {
    #[serde(rename = "_id")]
    pub id: ClientId,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl Client {
    /// Case-insensitive match on the name, or a plain substring match on the phone.
    pub fn matches(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(&term.to_lowercase())
            || self.phone.as_deref().is_some_and(|phone| phone.contains(term))
    }
}

/// Payload used for both creating and updating a client.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewClient {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

impl NewClient {
    #[must_use]
    pub fn new(name: String, phone: String, email: String, address: String) -> Self {
        Self {
            name: name.trim().to_string(),
            phone: phone.trim().to_string(),
            email: email.trim().to_lowercase(),
            address: address.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(name: &str, phone: Option<&str>) -> Client {
        Client {
            id: ClientId::new("c1").unwrap(),
            name: name.to_string(),
            phone: phone.map(str::to_string),
            email: None,
            address: None,
        }
    }

    #[test]
    fn matches_name_case_insensitively() {
        assert!(client("Delta Foods", None).matches("delta"));
        assert!(!client("Delta Foods", None).matches("nile"));
    }

    #[test]
    fn matches_phone_substring() {
        assert!(client("Acme", Some("+20 100 123 4567")).matches("123"));
        assert!(!client("Acme", None).matches("123"));
    }

    #[test]
    fn new_client_normalizes_input() {
        let new_client = NewClient::new(
            " Acme ".into(),
            " +20 1 ".into(),
            " Ops@Acme.COM ".into(),
            "Cairo".into(),
        );
        assert_eq!(new_client.name, "Acme");
        assert_eq!(new_client.phone, "+20 1");
        assert_eq!(new_client.email, "ops@acme.com");
    }
}
