//! Quotation list page.

use crate::domain::document::Document;
use crate::domain::types::{DocumentId, DocumentMode};
use crate::repository::{DocumentReader, DocumentWriter};
use crate::services::history::filter_documents;
use crate::services::{Confirm, ServiceError, quotations as quotations_service};
use crate::views::{Navigation, Notice, Outcome};

#[derive(Debug, Default)]
pub struct QuotationsPage {
    quotations: Vec<Document>,
    filter: String,
}

impl QuotationsPage {
    pub async fn load<R>(&mut self, repo: &R) -> Outcome
    where
        R: DocumentReader + ?Sized,
    {
        match quotations_service::list_quotations(repo).await {
            Ok(quotations) => {
                self.quotations = quotations;
                Outcome::none()
            }
            Err(err) => Outcome::from_error(err, "Failed to load quotations"),
        }
    }

    pub fn set_filter(&mut self, term: &str) {
        self.filter = term.to_string();
    }

    pub fn quotations(&self) -> &[Document] {
        &self.quotations
    }

    pub fn visible(&self) -> Vec<&Document> {
        filter_documents(&self.quotations, &self.filter)
    }

    /// Converts to an invoice and moves to the archive.
    pub async fn convert<R, C>(&mut self, repo: &R, id: &DocumentId, confirm: &C) -> Outcome
    where
        R: DocumentWriter + ?Sized,
        C: Confirm + ?Sized,
    {
        let Some(quotation) = self
            .quotations
            .iter()
            .find(|quotation| quotation.id.as_ref() == Some(id))
        else {
            return Outcome::notice(Notice::error("Quotation not found"));
        };

        match quotations_service::convert_quotation(repo, quotation, confirm).await {
            Ok(()) => Outcome::notice(Notice::success("Quotation converted to invoice"))
                .and_navigate(Navigation::History),
            Err(ServiceError::TypeConstraint(_)) => {
                Outcome::notice(Notice::warning("Quotation already converted"))
            }
            Err(err) => Outcome::from_error(err, "Conversion failed"),
        }
    }

    pub async fn delete<R, C>(&mut self, repo: &R, id: &DocumentId, confirm: &C) -> Outcome
    where
        R: DocumentReader + DocumentWriter + ?Sized,
        C: Confirm + ?Sized,
    {
        match quotations_service::delete_quotation(repo, id, confirm).await {
            Ok(()) => {
                let reload = self.load(repo).await;
                if reload.navigation.is_some() {
                    return reload;
                }
                Outcome::notice(Notice::warning("Quotation deleted"))
            }
            Err(err) => Outcome::from_error(err, "Delete failed"),
        }
    }

    pub fn open(&self, id: &DocumentId) -> Outcome {
        Outcome::navigate(Navigation::Editor {
            id: Some(id.clone()),
            mode: DocumentMode::Quotation,
        })
    }
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::types::DocumentStatus;
    use crate::repository::mock::MockRepository;
    use crate::services::AutoConfirm;

    fn quotation(id: &str, status: DocumentStatus) -> Document {
        let mut document = Document {
            id: Some(DocumentId::new(id).unwrap()),
            client_name: "Acme".into(),
            status,
            ..Document::default()
        };
        document.set_number(DocumentMode::Quotation, format!("QT-{id}"));
        document
    }

    #[tokio::test]
    async fn conversion_navigates_to_history() {
        let mut repo = MockRepository::new();
        repo.expect_list_documents()
            .returning(|_| Ok(vec![quotation("1", DocumentStatus::Draft)]));
        repo.expect_convert_quotation()
            .times(1)
            .returning(|_| Ok(()));
        let mut page = QuotationsPage::default();
        page.load(&repo).await;

        let outcome = page
            .convert(&repo, &DocumentId::new("1").unwrap(), &AutoConfirm(true))
            .await;

        assert_eq!(outcome.navigation, Some(Navigation::History));
    }

    #[tokio::test]
    async fn converted_quotation_is_refused_locally() {
        let mut repo = MockRepository::new();
        repo.expect_list_documents()
            .returning(|_| Ok(vec![quotation("1", DocumentStatus::Converted)]));
        repo.expect_convert_quotation().times(0);
        let mut page = QuotationsPage::default();
        page.load(&repo).await;

        let outcome = page
            .convert(&repo, &DocumentId::new("1").unwrap(), &AutoConfirm(true))
            .await;

        assert_eq!(outcome.notice, Some(Notice::warning("Quotation already converted")));
        assert_eq!(outcome.navigation, None);
    }

    #[tokio::test]
    async fn filter_matches_quotation_number() {
        let mut repo = MockRepository::new();
        repo.expect_list_documents().returning(|_| {
            Ok(vec![
                quotation("7", DocumentStatus::Pending),
                quotation("8", DocumentStatus::Pending),
            ])
        });
        let mut page = QuotationsPage::default();
        page.load(&repo).await;

        page.set_filter("qt-8");
        assert_eq!(page.visible().len(), 1);
    }
}
