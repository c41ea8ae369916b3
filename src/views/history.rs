//! Invoice archive page.

use crate::domain::document::Document;
use crate::domain::types::{DocumentId, DocumentMode, DocumentStatus};
use crate::repository::{DocumentReader, DocumentWriter};
use crate::services::{Confirm, history as history_service};
use crate::views::{Navigation, Notice, Outcome};

#[derive(Debug, Default)]
pub struct HistoryPage {
    invoices: Vec<Document>,
    filter: String,
}

impl HistoryPage {
    pub async fn load<R>(&mut self, repo: &R) -> Outcome
    where
        R: DocumentReader + ?Sized,
    {
        match history_service::list_invoices(repo).await {
            Ok(invoices) => {
                self.invoices = invoices;
                Outcome::none()
            }
            Err(err) => Outcome::from_error(err, "Failed to load archive. Please try again."),
        }
    }

    pub fn set_filter(&mut self, term: &str) {
        self.filter = term.to_string();
    }

    pub fn invoices(&self) -> &[Document] {
        &self.invoices
    }

    pub fn visible(&self) -> Vec<&Document> {
        history_service::filter_documents(&self.invoices, &self.filter)
    }

    fn find(&self, id: &DocumentId) -> Option<&Document> {
        self.invoices
            .iter()
            .find(|invoice| invoice.id.as_ref() == Some(id))
    }

    /// Changes the status on the server and patches the local copy.
    pub async fn change_status<R>(&mut self, repo: &R, id: &DocumentId, next: DocumentStatus) -> Outcome
    where
        R: DocumentWriter + ?Sized,
    {
        let current = self.find(id).map(|invoice| invoice.status).unwrap_or_default();

        match history_service::update_status(repo, id, current, next).await {
            Ok(status) => {
                for invoice in &mut self.invoices {
                    if invoice.id.as_ref() == Some(id) {
                        invoice.status = status;
                    }
                }
                Outcome::notice(Notice::success("Status updated successfully"))
            }
            Err(err) => Outcome::from_error(err, "Failed to update status"),
        }
    }

    /// Deletes after confirmation and drops the local copy.
    pub async fn delete<R, C>(&mut self, repo: &R, id: &DocumentId, confirm: &C) -> Outcome
    where
        R: DocumentWriter + ?Sized,
        C: Confirm + ?Sized,
    {
        match history_service::delete_invoice(repo, id, confirm).await {
            Ok(()) => {
                self.invoices.retain(|invoice| invoice.id.as_ref() != Some(id));
                Outcome::notice(Notice::warning("Invoice deleted"))
            }
            Err(err) => Outcome::from_error(err, "Delete failed"),
        }
    }

    pub fn open(&self, id: &DocumentId) -> Outcome {
        Outcome::navigate(Navigation::Editor {
            id: Some(id.clone()),
            mode: DocumentMode::Invoice,
        })
    }
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;
    use crate::services::AutoConfirm;

    fn invoice(id: &str, number: &str, client: &str) -> Document {
        let mut document = Document {
            id: Some(DocumentId::new(id).unwrap()),
            client_name: client.into(),
            ..Document::default()
        };
        document.set_number(DocumentMode::Invoice, number);
        document
    }

    async fn loaded_page(repo: &mut MockRepository) -> HistoryPage {
        repo.expect_list_documents()
            .withf(|mode: &DocumentMode| *mode == DocumentMode::Invoice)
            .times(1)
            .returning(|_| {
                Ok(vec![
                    invoice("a", "PO-2412001", "Acme"),
                    invoice("b", "PO-2412002", "Nile"),
                ])
            });
        let mut page = HistoryPage::default();
        page.load(&*repo).await;
        page
    }

    #[tokio::test]
    async fn status_change_patches_collection() {
        let mut repo = MockRepository::new();
        repo.expect_update_invoice_status()
            .times(1)
            .returning(|_, _| Ok(()));
        let mut page = loaded_page(&mut repo).await;
        let id = DocumentId::new("b").unwrap();

        let outcome = page.change_status(&repo, &id, DocumentStatus::Paid).await;

        assert_eq!(outcome.notice, Some(Notice::success("Status updated successfully")));
        assert_eq!(page.invoices()[1].status, DocumentStatus::Paid);
        assert_eq!(page.invoices()[0].status, DocumentStatus::Pending);
    }

    #[tokio::test]
    async fn delete_removes_locally_without_reload() {
        let mut repo = MockRepository::new();
        repo.expect_delete_document()
            .times(1)
            .returning(|_, _| Ok(()));
        let mut page = loaded_page(&mut repo).await;

        page.delete(&repo, &DocumentId::new("a").unwrap(), &AutoConfirm(true))
            .await;

        assert_eq!(page.invoices().len(), 1);
        page.set_filter("acme");
        assert!(page.visible().is_empty());
    }
}
