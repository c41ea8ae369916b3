//! Invoice archive workflows.

use crate::domain::document::Document;
use crate::domain::types::{DocumentId, DocumentMode, DocumentStatus};
use crate::repository::{DocumentReader, DocumentWriter};
use crate::services::{Confirm, ServiceError, ServiceResult, ensure_confirmed};

pub async fn list_invoices<R>(repo: &R) -> ServiceResult<Vec<Document>>
where
    R: DocumentReader + ?Sized,
{
    repo.list_documents(DocumentMode::Invoice)
        .await
        .map_err(|err| {
            log::error!("Failed to load invoice archive: {err}");
            ServiceError::from(err)
        })
}

/// Moves an invoice to `next`. Any invoice status may follow any other.
pub async fn update_status<R>(
    repo: &R,
    id: &DocumentId,
    current: DocumentStatus,
    next: DocumentStatus,
) -> ServiceResult<DocumentStatus>
where
    R: DocumentWriter + ?Sized,
{
    let next = current.invoice_transition(next)?;

    repo.update_invoice_status(id, next).await.map_err(|err| {
        log::error!("Failed to update status of invoice {id}: {err}");
        ServiceError::from(err)
    })?;

    Ok(next)
}

pub async fn delete_invoice<R, C>(repo: &R, id: &DocumentId, confirm: &C) -> ServiceResult<()>
where
    R: DocumentWriter + ?Sized,
    C: Confirm + ?Sized,
{
    ensure_confirmed(
        confirm,
        "Are you sure you want to permanently delete this PO?",
    )?;

    repo.delete_document(DocumentMode::Invoice, id)
        .await
        .map_err(|err| {
            log::error!("Failed to delete invoice {id}: {err}");
            ServiceError::from(err)
        })
}

/// Documents whose client name or number contains `term`, ignoring case.
pub fn filter_documents<'a>(documents: &'a [Document], term: &str) -> Vec<&'a Document> {
    let term = term.trim();
    documents
        .iter()
        .filter(|document| term.is_empty() || document.matches(term))
        .collect()
}
