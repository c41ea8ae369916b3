//! Client directory page.

use crate::domain::client::Client;
use crate::domain::types::ClientId;
use crate::forms::client::ClientForm;
use crate::repository::{ClientReader, ClientWriter};
use crate::services::{Confirm, SaveKind, clients as clients_service};
use crate::views::{Notice, Outcome};

#[derive(Debug, Default)]
pub struct ClientsPage {
    clients: Vec<Client>,
    filter: String,
}

impl ClientsPage {
    pub async fn load<R>(&mut self, repo: &R) -> Outcome
    where
        R: ClientReader + ?Sized,
    {
        match clients_service::list_clients(repo).await {
            Ok(clients) => {
                self.clients = clients;
                Outcome::none()
            }
            Err(err) => Outcome::from_error(err, "Failed to load clients"),
        }
    }

    pub fn set_filter(&mut self, term: &str) {
        self.filter = term.to_string();
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    /// Clients matching the current filter.
    pub fn visible(&self) -> Vec<&Client> {
        clients_service::filter_clients(&self.clients, &self.filter)
    }

    pub async fn save<R>(&mut self, repo: &R, form: ClientForm) -> Outcome
    where
        R: ClientReader + ClientWriter + ?Sized,
    {
        match clients_service::save_client(repo, form).await {
            Ok(kind) => {
                let reload = self.load(repo).await;
                if reload.navigation.is_some() {
                    return reload;
                }
                Outcome::notice(Notice::success(match kind {
                    SaveKind::Created => "Client added",
                    SaveKind::Updated => "Client updated",
                }))
            }
            Err(err) => Outcome::from_error(err, "Failed to save client"),
        }
    }

    pub async fn delete<R, C>(&mut self, repo: &R, id: &ClientId, confirm: &C) -> Outcome
    where
        R: ClientReader + ClientWriter + ?Sized,
        C: Confirm + ?Sized,
    {
        match clients_service::delete_client(repo, id, confirm).await {
            Ok(()) => {
                let reload = self.load(repo).await;
                if reload.navigation.is_some() {
                    return reload;
                }
                Outcome::notice(Notice::warning("Client deleted"))
            }
            Err(err) => Outcome::from_error(err, "Failed to delete client"),
        }
    }
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;
    use crate::views::Navigation;

    fn client(id: &str, name: &str) -> Client {
        Client {
            id: ClientId::new(id).unwrap(),
            name: name.into(),
            phone: None,
            email: None,
            address: None,
        }
    }

    #[tokio::test]
    async fn save_reloads_the_list() {
        let mut repo = MockRepository::new();
        repo.expect_create_client().times(1).returning(|_| Ok(()));
        repo.expect_list_clients()
            .times(1)
            .returning(|| Ok(vec![client("1", "Acme"), client("2", "Nile")]));
        let mut page = ClientsPage::default();

        let outcome = page
            .save(
                &repo,
                ClientForm {
                    name: "Nile".into(),
                    ..ClientForm::default()
                },
            )
            .await;

        assert_eq!(outcome.notice, Some(Notice::success("Client added")));
        assert_eq!(page.clients().len(), 2);

        page.set_filter("nil");
        assert_eq!(page.visible().len(), 1);
    }

    #[tokio::test]
    async fn expired_session_goes_to_login() {
        let mut repo = MockRepository::new();
        repo.expect_list_clients()
            .returning(|| Err(RepositoryError::Unauthorized));
        let mut page = ClientsPage::default();

        let outcome = page.load(&repo).await;

        assert_eq!(outcome, Outcome::navigate(Navigation::Login));
    }
}
