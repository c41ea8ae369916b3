//! Quotation list workflows.

use crate::domain::document::Document;
use crate::domain::types::{DocumentId, DocumentMode};
use crate::repository::{DocumentReader, DocumentWriter};
use crate::services::{Confirm, ServiceError, ServiceResult, ensure_confirmed};

pub async fn list_quotations<R>(repo: &R) -> ServiceResult<Vec<Document>>
where
    R: DocumentReader + ?Sized,
{
    repo.list_documents(DocumentMode::Quotation)
        .await
        .map_err(|err| {
            log::error!("Failed to load quotations: {err}");
            ServiceError::from(err)
        })
}

/// Turns a quotation into an invoice on the server.
///
/// An already converted quotation is refused before prompting and nothing is
/// sent.
pub async fn convert_quotation<R, C>(repo: &R, quotation: &Document, confirm: &C) -> ServiceResult<()>
where
    R: DocumentWriter + ?Sized,
    C: Confirm + ?Sized,
{
    let id = quotation.id.as_ref().ok_or(ServiceError::NotFound)?;
    quotation.status.convert_quotation()?;

    ensure_confirmed(confirm, "Convert this quotation to an invoice?")?;

    repo.convert_quotation(id).await.map_err(|err| {
        log::error!("Failed to convert quotation {id}: {err}");
        ServiceError::from(err)
    })
}

pub async fn delete_quotation<R, C>(repo: &R, id: &DocumentId, confirm: &C) -> ServiceResult<()>
where
    R: DocumentWriter + ?Sized,
    C: Confirm + ?Sized,
{
    ensure_confirmed(confirm, "Are you sure you want to delete this quotation?")?;

    repo.delete_document(DocumentMode::Quotation, id)
        .await
        .map_err(|err| {
            log::error!("Failed to delete quotation {id}: {err}");
            ServiceError::from(err)
        })
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::types::DocumentStatus;
    use crate::repository::mock::MockRepository;
    use crate::services::AutoConfirm;

    fn quotation(status: DocumentStatus) -> Document {
        let mut document = Document {
            id: Some(DocumentId::new("q1").unwrap()),
            status,
            ..Document::default()
        };
        document.set_number(DocumentMode::Quotation, "QT-1");
        document
    }

    #[tokio::test]
    async fn converted_quotation_is_refused_without_request() {
        let mut repo = MockRepository::new();
        repo.expect_convert_quotation().times(0);

        let result = convert_quotation(
            &repo,
            &quotation(DocumentStatus::Converted),
            &AutoConfirm(true),
        )
        .await;

        assert!(matches!(result, Err(ServiceError::TypeConstraint(_))));
    }

    #[tokio::test]
    async fn draft_quotation_converts_after_confirmation() {
        let mut repo = MockRepository::new();
        repo.expect_convert_quotation()
            .withf(|id: &DocumentId| id.as_str() == "q1")
            .times(1)
            .returning(|_| Ok(()));

        convert_quotation(&repo, &quotation(DocumentStatus::Draft), &AutoConfirm(true))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn declined_conversion_sends_nothing() {
        let mut repo = MockRepository::new();
        repo.expect_convert_quotation().times(0);

        let result = convert_quotation(
            &repo,
            &quotation(DocumentStatus::Pending),
            &AutoConfirm(false),
        )
        .await;

        assert!(matches!(result, Err(ServiceError::Cancelled)));
    }
}
