//! Editing session for one invoice or quotation.
//!
//! The session owns the header fields and the typed rows. Every edit hands a
//! snapshot to the debounced [`SummaryAggregator`]; saving recomputes the
//! totals synchronously so the persisted amounts never lag behind the rows.

use chrono::{Local, NaiveDate};
use tokio::sync::watch;
use tokio::time::Duration;

use crate::calc::debounce::{Snapshot, SummaryAggregator};
use crate::calc::scan::{ScannedFields, scan_text};
use crate::calc::summary::summarize;
use crate::domain::client::Client;
use crate::domain::document::{Document, DocumentTotals, parse_date};
use crate::domain::line_item::{LineItem, RowField, RowId, RowInput};
use crate::domain::types::{
    ClientName, DocumentId, DocumentMode, DocumentStatus, format_phone_input,
};
use crate::dto::summary::EditorDisplay;
use crate::models::config::ClientConfig;
use crate::repository::{ClientReader, DocumentReader, DocumentWriter};
use crate::services::{Confirm, SaveKind, ServiceError, ServiceResult, ensure_confirmed};

pub const MISSING_CLIENT_NAME: &str = "Please enter Client Name";

pub struct DocumentSession {
    mode: DocumentMode,
    id: Option<DocumentId>,
    number: String,
    date: Option<NaiveDate>,
    client_name: String,
    client_phone: String,
    currency: String,
    /// Status of the loaded document; new documents are saved as pending.
    status: Option<DocumentStatus>,
    rows: Vec<(RowId, RowInput)>,
    next_row_id: u64,
    directory: Vec<Client>,
    aggregator: SummaryAggregator,
}

impl DocumentSession {
    /// Fresh session with one blank row. Must be called inside a tokio runtime.
    pub fn new(mode: DocumentMode, quiet_period: Duration) -> Self {
        let mut session = Self {
            mode,
            id: None,
            number: String::new(),
            date: Some(Local::now().date_naive()),
            client_name: String::new(),
            client_phone: String::new(),
            currency: String::new(),
            status: None,
            rows: Vec::new(),
            next_row_id: 0,
            directory: Vec::new(),
            aggregator: SummaryAggregator::spawn(quiet_period),
        };
        session.push_row(RowInput::default());
        session.schedule();
        session
    }

    pub fn from_config(mode: DocumentMode, config: &ClientConfig) -> Self {
        let mut session = Self::new(mode, Duration::from_millis(config.quiet_period_ms));
        if !config.currency.trim().is_empty() {
            session.set_currency(&config.currency);
        }
        session
    }

    fn push_row(&mut self, row: RowInput) -> RowId {
        let row_id = RowId(self.next_row_id);
        self.next_row_id += 1;
        self.rows.push((row_id, row));
        row_id
    }

    fn schedule(&self) {
        self.aggregator.schedule(Snapshot {
            rows: self.rows.clone(),
            currency: self.currency.clone(),
        });
    }

    /// Appends a row, blank or prefilled from `preset`.
    pub fn add_row(&mut self, preset: Option<&LineItem>) -> RowId {
        let row = preset.map(RowInput::from).unwrap_or_default();
        let row_id = self.push_row(row);
        self.schedule();
        row_id
    }

    /// Removes exactly the row with `row_id`. Removing the last row is allowed.
    pub fn remove_row(&mut self, row_id: RowId) -> bool {
        let before = self.rows.len();
        self.rows.retain(|(id, _)| *id != row_id);
        let removed = self.rows.len() != before;
        if removed {
            self.schedule();
        }
        removed
    }

    /// Replaces every row with a single blank one.
    pub fn reset_rows(&mut self) {
        self.rows.clear();
        self.push_row(RowInput::default());
        self.schedule();
    }

    pub fn edit_row(&mut self, row_id: RowId, field: RowField, value: &str) -> bool {
        let Some((_, row)) = self.rows.iter_mut().find(|(id, _)| *id == row_id) else {
            return false;
        };
        row.set(field, value);
        self.schedule();
        true
    }

    /// Updates the currency. The symbol is published immediately, the totals
    /// after the quiet period.
    pub fn set_currency(&mut self, value: &str) {
        self.currency = value.to_string();
        self.aggregator.refresh_symbol(&self.currency);
        self.schedule();
    }

    /// Updates the client name, filling the phone from an exact directory match.
    pub fn set_client_name(&mut self, value: &str) {
        self.client_name = value.to_string();
        if let Some(phone) = self
            .directory
            .iter()
            .find(|client| client.name == value)
            .and_then(|client| client.phone.as_deref())
        {
            self.client_phone = format_phone_input(phone);
        }
        self.schedule();
    }

    pub fn set_client_phone(&mut self, value: &str) {
        self.client_phone = format_phone_input(value);
        self.schedule();
    }

    pub fn set_number(&mut self, value: &str) {
        self.number = value.to_string();
        self.schedule();
    }

    /// Accepts `YYYY-MM-DD` (or a timestamp); anything else clears the date.
    pub fn set_date(&mut self, value: &str) {
        self.date = parse_date(value);
        self.schedule();
    }

    /// Switches between invoice and quotation. A loaded status that the new
    /// mode does not know is dropped.
    pub fn set_mode(&mut self, mode: DocumentMode) {
        self.mode = mode;
        if self.status.is_some_and(|status| !status.is_valid_for(mode)) {
            self.status = None;
        }
        self.schedule();
    }

    /// Fills the number, phone and currency from the text of an imported
    /// document. Fields that are not found keep their values.
    pub fn apply_scanned_text(&mut self, text: &str) -> ScannedFields {
        let fields = scan_text(text);
        if let Some(number) = &fields.number {
            self.number = number.clone();
        }
        if let Some(phone) = &fields.phone {
            self.client_phone = phone.clone();
        }
        if let Some(currency) = fields.currency {
            self.currency = currency.to_string();
            self.aggregator.refresh_symbol(&self.currency);
        }
        self.schedule();
        fields
    }

    /// Supplies the client directory used for name autocomplete.
    pub fn set_clients(&mut self, clients: Vec<Client>) {
        self.directory = clients;
    }

    pub async fn load_clients<R>(&mut self, repo: &R)
    where
        R: ClientReader + ?Sized,
    {
        match repo.list_clients().await {
            Ok(clients) => self.directory = clients,
            Err(err) => log::warn!("Failed to load clients for autocomplete: {err}"),
        }
    }

    pub fn mode(&self) -> DocumentMode {
        self.mode
    }

    pub fn id(&self) -> Option<&DocumentId> {
        self.id.as_ref()
    }

    /// True once a document was loaded; saving then updates it in place.
    pub fn is_update(&self) -> bool {
        self.id.is_some()
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    pub fn client_phone(&self) -> &str {
        &self.client_phone
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn status(&self) -> DocumentStatus {
        self.status.unwrap_or_default()
    }

    pub fn rows(&self) -> &[(RowId, RowInput)] {
        &self.rows
    }

    pub fn row(&self, row_id: RowId) -> Option<&RowInput> {
        self.rows
            .iter()
            .find(|(id, _)| *id == row_id)
            .map(|(_, row)| row)
    }

    pub fn clients(&self) -> &[Client] {
        &self.directory
    }

    /// Totals computed from the current rows, bypassing the debounce.
    pub fn totals(&self) -> DocumentTotals {
        summarize(self.rows.iter().map(|(_, row)| row), &self.currency)
    }

    /// Latest debounced display.
    pub fn display(&self) -> EditorDisplay {
        self.aggregator.display()
    }

    pub fn subscribe(&self) -> watch::Receiver<EditorDisplay> {
        self.aggregator.subscribe()
    }

    pub fn symbol(&self) -> String {
        self.aggregator.symbol()
    }

    pub fn recompute_count(&self) -> usize {
        self.aggregator.recompute_count()
    }

    /// Gathers header, rows and fresh totals into one record.
    pub fn build_document(&self) -> ServiceResult<Document> {
        let client_name = ClientName::new(self.client_name.as_str())
            .map_err(|_| ServiceError::Form(MISSING_CLIENT_NAME.to_string()))?;

        let mut document = Document {
            id: self.id.clone(),
            date: self.date,
            client_name: client_name.into_inner(),
            client_phone: self.client_phone.trim().to_string(),
            items: self.rows.iter().map(|(_, row)| row.to_line_item()).collect(),
            status: self.status(),
            ..Document::default()
        };
        document.set_number(self.mode, self.number.trim());
        document.apply_totals(&self.totals());

        Ok(document)
    }

    /// Creates the document, or updates it when one was loaded.
    pub async fn save<R>(&self, repo: &R) -> ServiceResult<SaveKind>
    where
        R: DocumentWriter + ?Sized,
    {
        let document = self.build_document()?;

        let result = match &self.id {
            Some(id) => repo
                .update_document(id, &document)
                .await
                .map(|()| SaveKind::Updated),
            None => repo
                .create_document(&document)
                .await
                .map(|()| SaveKind::Created),
        };

        result.map_err(|err| {
            log::error!("Failed to save {}: {err}", self.mode);
            ServiceError::from(err)
        })
    }

    /// Fetches a document and repopulates the session from it.
    pub async fn load<R>(&mut self, repo: &R, id: &DocumentId, mode: DocumentMode) -> ServiceResult<()>
    where
        R: DocumentReader + ?Sized,
    {
        let document = repo.get_document(mode, id).await.map_err(|err| {
            log::error!("Failed to load {mode} {id}: {err}");
            ServiceError::from(err)
        })?;

        if document.ensure_numbered().is_err() {
            log::error!("Loaded {mode} {id} has no document number");
            return Err(ServiceError::TypeConstraint(
                "Invalid document data".to_string(),
            ));
        }

        self.apply_document(id.clone(), document);
        Ok(())
    }

    fn apply_document(&mut self, id: DocumentId, document: Document) {
        self.mode = document.mode();
        self.number = document.number().unwrap_or_default().to_string();
        self.id = Some(document.id.clone().unwrap_or(id));
        self.date = document.date;
        self.client_name = document.client_name;
        self.client_phone = document.client_phone;
        self.currency = document.currency;
        self.status = Some(document.status);

        self.rows.clear();
        for item in &document.items {
            self.push_row(RowInput::from(item));
        }
        if self.rows.is_empty() {
            self.push_row(RowInput::default());
        }

        self.aggregator.refresh_symbol(&self.currency);
        self.schedule();
    }

    /// Clears the session back to a blank document of the same mode and currency.
    pub fn reset(&mut self) {
        self.id = None;
        self.number.clear();
        self.date = Some(Local::now().date_naive());
        self.client_name.clear();
        self.client_phone.clear();
        self.status = None;
        self.reset_rows();
    }

    /// Deletes the loaded document after confirmation.
    pub async fn delete<R, C>(&self, repo: &R, confirm: &C) -> ServiceResult<()>
    where
        R: DocumentWriter + ?Sized,
        C: Confirm + ?Sized,
    {
        let id = self.id.as_ref().ok_or(ServiceError::NotFound)?;

        ensure_confirmed(
            confirm,
            &format!("Are you sure you want to delete this {}?", self.mode),
        )?;

        repo.delete_document(self.mode, id).await.map_err(|err| {
            log::error!("Failed to delete {} {id}: {err}", self.mode);
            ServiceError::from(err)
        })
    }

    /// Prefills the number of a fresh invoice. Failures are only logged.
    pub async fn assign_next_number<R>(&mut self, repo: &R)
    where
        R: DocumentReader + ?Sized,
    {
        if self.id.is_some() || self.mode != DocumentMode::Invoice {
            return;
        }
        self.fetch_next_number(repo).await;
    }

    async fn fetch_next_number<R>(&mut self, repo: &R)
    where
        R: DocumentReader + ?Sized,
    {
        match repo.next_invoice_number().await {
            Ok(Some(number)) => self.number = number,
            Ok(None) => log::warn!("Server returned no next invoice number"),
            Err(err) => log::warn!("Failed to fetch next invoice number: {err}"),
        }
    }

    /// Marks the current number as issued, then loads the next one.
    pub async fn confirm_number<R>(&mut self, repo: &R)
    where
        R: DocumentReader + DocumentWriter + ?Sized,
    {
        if let Err(err) = repo.confirm_invoice_number().await {
            log::error!("Failed to confirm invoice number: {err}");
        }
        self.fetch_next_number(repo).await;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::repository::errors::{RepositoryError, RepositoryResult};
    use crate::services::AutoConfirm;

    const QUIET: Duration = Duration::from_millis(300);

    #[derive(Default)]
    struct FakeRepo {
        stored: Option<Document>,
        next_number: Option<String>,
        created: Mutex<Vec<Document>>,
        updated: Mutex<Vec<(DocumentId, Document)>>,
        deleted: Mutex<Vec<(DocumentMode, DocumentId)>>,
        confirmed: Mutex<usize>,
    }

    #[async_trait]
    impl DocumentReader for FakeRepo {
        async fn list_documents(&self, _mode: DocumentMode) -> RepositoryResult<Vec<Document>> {
            Ok(self.stored.clone().into_iter().collect())
        }

        async fn get_document(
            &self,
            _mode: DocumentMode,
            _id: &DocumentId,
        ) -> RepositoryResult<Document> {
            self.stored.clone().ok_or(RepositoryError::Api {
                status: 404,
                message: "Not found".to_string(),
            })
        }

        async fn next_invoice_number(&self) -> RepositoryResult<Option<String>> {
            Ok(self.next_number.clone())
        }
    }

    #[async_trait]
    impl DocumentWriter for FakeRepo {
        async fn create_document(&self, document: &Document) -> RepositoryResult<()> {
            self.created.lock().unwrap().push(document.clone());
            Ok(())
        }

        async fn update_document(
            &self,
            id: &DocumentId,
            document: &Document,
        ) -> RepositoryResult<()> {
            self.updated
                .lock()
                .unwrap()
                .push((id.clone(), document.clone()));
            Ok(())
        }

        async fn delete_document(&self, mode: DocumentMode, id: &DocumentId) -> RepositoryResult<()> {
            self.deleted.lock().unwrap().push((mode, id.clone()));
            Ok(())
        }

        async fn update_invoice_status(
            &self,
            _id: &DocumentId,
            _status: DocumentStatus,
        ) -> RepositoryResult<()> {
            Ok(())
        }

        async fn convert_quotation(&self, _id: &DocumentId) -> RepositoryResult<()> {
            Ok(())
        }

        async fn confirm_invoice_number(&self) -> RepositoryResult<()> {
            *self.confirmed.lock().unwrap() += 1;
            Ok(())
        }
    }

    fn stored_quotation() -> Document {
        let mut document = Document {
            id: Some(DocumentId::new("q1").unwrap()),
            date: parse_date("2024-12-05T10:00:00.000Z"),
            client_name: "Nile Corp".to_string(),
            client_phone: "+20 100 123 4567".to_string(),
            currency: "EGP".to_string(),
            items: vec![LineItem {
                service: "Hosting".to_string(),
                amount: 200.0,
                tax_rate: 14.0,
                ..LineItem::default()
            }],
            status: DocumentStatus::Converted,
            ..Document::default()
        };
        document.set_number(DocumentMode::Quotation, "QT-2412001");
        document
    }

    fn fill_first_row(session: &mut DocumentSession, amount: &str, rate: &str, fees: &str) {
        let row_id = session.rows()[0].0;
        session.edit_row(row_id, RowField::Amount, amount);
        session.edit_row(row_id, RowField::TaxRate, rate);
        session.edit_row(row_id, RowField::Fees, fees);
    }

    #[tokio::test(start_paused = true)]
    async fn fresh_session_has_one_blank_row() {
        let session = DocumentSession::new(DocumentMode::Invoice, QUIET);
        assert_eq!(session.rows().len(), 1);
        assert_eq!(session.rows()[0].1, RowInput::default());
        assert!(!session.is_update());
    }

    #[tokio::test(start_paused = true)]
    async fn burst_of_edits_recomputes_once() {
        let mut session = DocumentSession::new(DocumentMode::Invoice, QUIET);
        fill_first_row(&mut session, "100", "14", "10");

        tokio::time::sleep(QUIET + Duration::from_millis(1)).await;

        assert_eq!(session.recompute_count(), 1);
        let display = session.display();
        assert_eq!(display.summary.grand_total, "124.00");
        assert_eq!(display.rows[0].tax_amount, "24.00");
    }

    #[tokio::test(start_paused = true)]
    async fn remove_row_targets_exactly_one_row() {
        let mut session = DocumentSession::new(DocumentMode::Invoice, QUIET);
        let second = session.add_row(None);
        let third = session.add_row(None);
        session.edit_row(third, RowField::Amount, "30");

        assert!(session.remove_row(second));
        assert!(!session.remove_row(second));
        assert_eq!(session.rows().len(), 2);
        assert_eq!(session.row(third).unwrap().amount, "30");

        let first = session.rows()[0].0;
        session.remove_row(first);
        session.remove_row(third);
        assert!(session.rows().is_empty());

        session.reset_rows();
        assert_eq!(session.rows().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn currency_symbol_updates_immediately() {
        let mut session = DocumentSession::new(DocumentMode::Invoice, QUIET);
        session.set_currency("EGP");
        assert_eq!(session.symbol(), "EGP");
        assert_eq!(session.recompute_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn blank_client_name_blocks_save() {
        let repo = FakeRepo::default();
        let mut session = DocumentSession::new(DocumentMode::Invoice, QUIET);
        session.set_client_name("   ");

        let result = session.save(&repo).await;

        assert!(matches!(result, Err(ServiceError::Form(message)) if message == MISSING_CLIENT_NAME));
        assert!(repo.created.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn new_invoice_is_created_with_fresh_totals() {
        let repo = FakeRepo::default();
        let mut session = DocumentSession::new(DocumentMode::Invoice, QUIET);
        session.set_number("PO-2412001");
        session.set_client_name("Acme");
        fill_first_row(&mut session, "100", "14", "10");
        let row_id = session.add_row(None);
        session.edit_row(row_id, RowField::Amount, "50");

        // Saved before the debounce fires: totals must still be current.
        let kind = session.save(&repo).await.unwrap();

        assert_eq!(kind, SaveKind::Created);
        let created = repo.created.lock().unwrap();
        let document = &created[0];
        assert_eq!(document.invoice_no.as_deref(), Some("PO-2412001"));
        assert_eq!(document.quotation_no, None);
        assert_eq!(document.status, DocumentStatus::Pending);
        assert_eq!(document.subtotal, 150.0);
        assert_eq!(document.vat_amount, 24.0);
        assert_eq!(document.total_amount, 174.0);
        assert_eq!(document.currency, "$");
        assert_eq!(document.items.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn loaded_document_is_updated_in_place() {
        let repo = FakeRepo {
            stored: Some(stored_quotation()),
            ..FakeRepo::default()
        };
        let mut session = DocumentSession::new(DocumentMode::Invoice, QUIET);
        let id = DocumentId::new("q1").unwrap();

        session
            .load(&repo, &id, DocumentMode::Quotation)
            .await
            .unwrap();

        assert!(session.is_update());
        assert_eq!(session.mode(), DocumentMode::Quotation);
        assert_eq!(session.number(), "QT-2412001");
        assert_eq!(session.date(), NaiveDate::from_ymd_opt(2024, 12, 5));
        assert_eq!(session.rows().len(), 1);
        assert_eq!(session.rows()[0].1.amount, "200");
        assert_eq!(session.symbol(), "EGP");

        session.set_client_name("Nile Corporation");
        let kind = session.save(&repo).await.unwrap();

        assert_eq!(kind, SaveKind::Updated);
        let updated = repo.updated.lock().unwrap();
        let (saved_id, document) = &updated[0];
        assert_eq!(saved_id.as_str(), "q1");
        assert_eq!(document.quotation_no.as_deref(), Some("QT-2412001"));
        assert_eq!(document.status, DocumentStatus::Converted);
        assert_eq!(document.total_amount, 228.0);
    }

    #[tokio::test(start_paused = true)]
    async fn document_without_number_is_rejected() {
        let repo = FakeRepo {
            stored: Some(Document {
                client_name: "Nobody".to_string(),
                ..Document::default()
            }),
            ..FakeRepo::default()
        };
        let mut session = DocumentSession::new(DocumentMode::Invoice, QUIET);

        let result = session
            .load(&repo, &DocumentId::new("x").unwrap(), DocumentMode::Invoice)
            .await;

        assert!(matches!(result, Err(ServiceError::TypeConstraint(_))));
        assert!(!session.is_update());
    }

    #[tokio::test(start_paused = true)]
    async fn document_without_items_gets_blank_row() {
        let mut stored = stored_quotation();
        stored.items.clear();
        let repo = FakeRepo {
            stored: Some(stored),
            ..FakeRepo::default()
        };
        let mut session = DocumentSession::new(DocumentMode::Invoice, QUIET);

        session
            .load(&repo, &DocumentId::new("q1").unwrap(), DocumentMode::Quotation)
            .await
            .unwrap();

        assert_eq!(session.rows().len(), 1);
        assert_eq!(session.rows()[0].1, RowInput::default());
    }

    #[tokio::test(start_paused = true)]
    async fn declined_delete_sends_nothing() {
        let repo = FakeRepo {
            stored: Some(stored_quotation()),
            ..FakeRepo::default()
        };
        let mut session = DocumentSession::new(DocumentMode::Invoice, QUIET);
        session
            .load(&repo, &DocumentId::new("q1").unwrap(), DocumentMode::Quotation)
            .await
            .unwrap();

        let result = session.delete(&repo, &AutoConfirm(false)).await;
        assert!(matches!(result, Err(ServiceError::Cancelled)));
        assert!(repo.deleted.lock().unwrap().is_empty());

        session.delete(&repo, &AutoConfirm(true)).await.unwrap();
        assert_eq!(
            repo.deleted.lock().unwrap()[0],
            (DocumentMode::Quotation, DocumentId::new("q1").unwrap())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn next_number_fills_fresh_invoice_only() {
        let repo = FakeRepo {
            stored: Some(stored_quotation()),
            next_number: Some("PO-2412007".to_string()),
            ..FakeRepo::default()
        };
        let mut session = DocumentSession::new(DocumentMode::Invoice, QUIET);
        session.assign_next_number(&repo).await;
        assert_eq!(session.number(), "PO-2412007");

        session
            .load(&repo, &DocumentId::new("q1").unwrap(), DocumentMode::Quotation)
            .await
            .unwrap();
        session.assign_next_number(&repo).await;
        assert_eq!(session.number(), "QT-2412001");
    }

    #[tokio::test(start_paused = true)]
    async fn confirm_number_fetches_the_next_one() {
        let repo = FakeRepo {
            next_number: Some("PO-2412008".to_string()),
            ..FakeRepo::default()
        };
        let mut session = DocumentSession::new(DocumentMode::Invoice, QUIET);
        session.set_number("PO-2412007");

        session.confirm_number(&repo).await;

        assert_eq!(*repo.confirmed.lock().unwrap(), 1);
        assert_eq!(session.number(), "PO-2412008");
    }

    #[tokio::test(start_paused = true)]
    async fn client_name_autocompletes_phone() {
        let mut session = DocumentSession::new(DocumentMode::Invoice, QUIET);
        session.set_clients(vec![Client {
            id: crate::domain::types::ClientId::new("c1").unwrap(),
            name: "Acme".to_string(),
            phone: Some("+201000000000".to_string()),
            email: None,
            address: None,
        }]);

        session.set_client_name("Acm");
        assert_eq!(session.client_phone(), "");
        session.set_client_name("Acme");
        assert_eq!(session.client_phone(), "+20 100 000 0000");
    }

    #[tokio::test(start_paused = true)]
    async fn switching_mode_drops_foreign_status() {
        let repo = FakeRepo {
            stored: Some(stored_quotation()),
            ..FakeRepo::default()
        };
        let mut session = DocumentSession::new(DocumentMode::Invoice, QUIET);
        session
            .load(&repo, &DocumentId::new("q1").unwrap(), DocumentMode::Quotation)
            .await
            .unwrap();

        session.set_mode(DocumentMode::Invoice);

        let document = session.build_document().unwrap();
        assert_eq!(document.status, DocumentStatus::Pending);
        assert_eq!(document.invoice_no.as_deref(), Some("QT-2412001"));
    }

    #[tokio::test(start_paused = true)]
    async fn scanned_text_fills_header_and_recomputes() {
        let mut session = DocumentSession::new(DocumentMode::Invoice, QUIET);
        fill_first_row(&mut session, "100", "0", "0");
        session.set_number("PO-0000001");
        tokio::time::sleep(Duration::from_millis(400)).await;
        let before = session.recompute_count();

        let fields =
            session.apply_scanned_text("PO: 2412005 Client +201001234567 Total 100 EGP");

        assert_eq!(fields.number.as_deref(), Some("PO-2412005"));
        assert_eq!(session.number(), "PO-2412005");
        assert_eq!(session.client_phone(), "+20 100 123 4567");
        assert_eq!(session.currency(), "EGP");
        assert_eq!(session.symbol(), "EGP");

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(session.recompute_count(), before + 1);
        assert_eq!(session.display().summary.currency, "EGP");
    }

    #[tokio::test(start_paused = true)]
    async fn scan_without_matches_keeps_fields() {
        let mut session = DocumentSession::new(DocumentMode::Invoice, QUIET);
        session.set_number("PO-2412001");
        session.set_currency("€");

        let fields = session.apply_scanned_text("Thank you");

        assert!(fields.is_empty());
        assert_eq!(session.number(), "PO-2412001");
        assert_eq!(session.currency(), "€");
    }
}
