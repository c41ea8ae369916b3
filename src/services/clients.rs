//! Client directory workflows.

use crate::domain::client::Client;
use crate::domain::types::ClientId;
use crate::forms::client::{ClientForm, ClientPayload};
use crate::repository::{ClientReader, ClientWriter};
use crate::services::{Confirm, SaveKind, ServiceError, ServiceResult, ensure_confirmed};

pub async fn list_clients<R>(repo: &R) -> ServiceResult<Vec<Client>>
where
    R: ClientReader + ?Sized,
{
    repo.list_clients().await.map_err(|err| {
        log::error!("Failed to list clients: {err}");
        ServiceError::from(err)
    })
}

/// Creates the client, or updates it when the form carries an id.
pub async fn save_client<R>(repo: &R, form: ClientForm) -> ServiceResult<SaveKind>
where
    R: ClientWriter + ?Sized,
{
    let payload = ClientPayload::try_from(form)?;

    let result = match &payload.id {
        Some(id) => repo
            .update_client(id, &payload.client)
            .await
            .map(|()| SaveKind::Updated),
        None => repo
            .create_client(&payload.client)
            .await
            .map(|()| SaveKind::Created),
    };

    result.map_err(|err| {
        log::error!("Failed to save client {}: {err}", payload.client.name);
        ServiceError::from(err)
    })
}

pub async fn delete_client<R, C>(repo: &R, id: &ClientId, confirm: &C) -> ServiceResult<()>
where
    R: ClientWriter + ?Sized,
    C: Confirm + ?Sized,
{
    ensure_confirmed(confirm, "Are you sure you want to delete this client?")?;

    repo.delete_client(id).await.map_err(|err| {
        log::error!("Failed to delete client {id}: {err}");
        ServiceError::from(err)
    })
}

/// Clients whose name (case-insensitive) or phone contains `term`.
pub fn filter_clients<'a>(clients: &'a [Client], term: &str) -> Vec<&'a Client> {
    let term = term.trim();
    clients
        .iter()
        .filter(|client| term.is_empty() || client.matches(term))
        .collect()
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::client::NewClient;
    use crate::repository::mock::MockRepository;
    use crate::services::AutoConfirm;

    fn client(id: &str, name: &str, phone: &str) -> Client {
        Client {
            id: ClientId::new(id).unwrap(),
            name: name.into(),
            phone: Some(phone.into()),
            email: None,
            address: None,
        }
    }

    #[test]
    fn filter_matches_name_or_phone() {
        let clients = vec![
            client("1", "Acme Corp", "+20 100 111 2222"),
            client("2", "Nile Trading", "+20 122 333 4444"),
        ];

        let by_name: Vec<_> = filter_clients(&clients, "ACME")
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(by_name, vec!["1"]);

        let by_phone = filter_clients(&clients, "333");
        assert_eq!(by_phone.len(), 1);
        assert_eq!(by_phone[0].name, "Nile Trading");

        assert_eq!(filter_clients(&clients, "  ").len(), 2);
    }

    #[tokio::test]
    async fn form_with_id_updates() {
        let mut repo = MockRepository::new();
        repo.expect_update_client()
            .withf(|id: &ClientId, client: &NewClient| id.as_str() == "c9" && client.name == "Acme")
            .times(1)
            .returning(|_, _| Ok(()));
        repo.expect_create_client().times(0);

        let form = ClientForm {
            id: Some("c9".into()),
            name: "Acme".into(),
            ..ClientForm::default()
        };

        assert_eq!(save_client(&repo, form).await.unwrap(), SaveKind::Updated);
    }

    #[tokio::test]
    async fn declined_delete_sends_nothing() {
        let mut repo = MockRepository::new();
        repo.expect_delete_client().times(0);

        let result = delete_client(&repo, &ClientId::new("c1").unwrap(), &AutoConfirm(false)).await;

        assert!(matches!(result, Err(ServiceError::Cancelled)));
    }
}
