//! Invoice/quotation editor page.
//!
//! Every UI event is an [`EditorEvent`]; [`EditorPage::dispatch`] routes it
//! to the [`DocumentSession`] and reports the resulting [`Outcome`].

use reqwest::Url;

use crate::calc::format::format_date;
use crate::domain::line_item::{LineItem, RowField, RowId};
use crate::domain::types::{DocumentId, DocumentMode};
use crate::models::config::ClientConfig;
use crate::repository::{ClientReader, DocumentReader, DocumentWriter};
use crate::services::document::DocumentSession;
use crate::services::{Confirm, SaveKind, ServiceError, ServiceResult};
use crate::views::{Navigation, Notice, Outcome};

const WHATSAPP_URL: &str = "https://wa.me/";
const MIN_PHONE_LEN: usize = 10;

/// A single user interaction with the editor.
#[derive(Clone, Debug, PartialEq)]
pub enum EditorEvent {
    RowInput {
        row: RowId,
        field: RowField,
        value: String,
    },
    AddRow,
    AddPresetRow(LineItem),
    RemoveRow(RowId),
    ResetRows,
    NumberInput(String),
    DateInput(String),
    ClientNameInput(String),
    ClientPhoneInput(String),
    CurrencyInput(String),
    SwitchMode(DocumentMode),
    /// Plain text extracted from an imported document.
    ScanText(String),
    Save,
    Delete,
    ConfirmNumber,
}

pub struct EditorPage {
    session: DocumentSession,
}

impl EditorPage {
    pub fn new(session: DocumentSession) -> Self {
        Self { session }
    }

    pub fn from_config(mode: DocumentMode, config: &ClientConfig) -> Self {
        Self::new(DocumentSession::from_config(mode, config))
    }

    pub fn session(&self) -> &DocumentSession {
        &self.session
    }

    /// Loads `document` when given, otherwise prepares a fresh one with the
    /// next invoice number. The client directory is fetched either way.
    pub async fn open<R>(&mut self, repo: &R, document: Option<(&DocumentId, DocumentMode)>) -> Outcome
    where
        R: ClientReader + DocumentReader + ?Sized,
    {
        let outcome = match document {
            Some((id, mode)) => match self.session.load(repo, id, mode).await {
                Ok(()) => Outcome::notice(Notice::success(format!(
                    "{} loaded successfully",
                    self.session.mode().label()
                ))),
                Err(ServiceError::TypeConstraint(message)) => {
                    Outcome::notice(Notice::error(message))
                }
                Err(err) => Outcome::from_error(err, "Failed to load document"),
            },
            None => {
                self.session.assign_next_number(repo).await;
                Outcome::none()
            }
        };

        self.session.load_clients(repo).await;
        outcome
    }

    pub async fn dispatch<R, C>(&mut self, repo: &R, confirm: &C, event: EditorEvent) -> Outcome
    where
        R: DocumentReader + DocumentWriter + ?Sized,
        C: Confirm + ?Sized,
    {
        match event {
            EditorEvent::RowInput { row, field, value } => {
                self.session.edit_row(row, field, &value);
            }
            EditorEvent::AddRow => {
                self.session.add_row(None);
            }
            EditorEvent::AddPresetRow(item) => {
                self.session.add_row(Some(&item));
            }
            EditorEvent::RemoveRow(row) => {
                self.session.remove_row(row);
            }
            EditorEvent::ResetRows => self.session.reset_rows(),
            EditorEvent::NumberInput(value) => self.session.set_number(&value),
            EditorEvent::DateInput(value) => self.session.set_date(&value),
            EditorEvent::ClientNameInput(value) => self.session.set_client_name(&value),
            EditorEvent::ClientPhoneInput(value) => self.session.set_client_phone(&value),
            EditorEvent::CurrencyInput(value) => self.session.set_currency(&value),
            EditorEvent::SwitchMode(mode) => {
                self.session.set_mode(mode);
                self.session.assign_next_number(repo).await;
            }
            EditorEvent::ScanText(text) => {
                return if self.session.apply_scanned_text(&text).is_empty() {
                    Outcome::notice(Notice::info("No fields recognised in the document"))
                } else {
                    Outcome::notice(Notice::success("Scanning complete! Please review fields."))
                };
            }
            EditorEvent::Save => return self.save(repo).await,
            EditorEvent::Delete => return self.delete(repo, confirm).await,
            EditorEvent::ConfirmNumber => self.session.confirm_number(repo).await,
        }
        Outcome::none()
    }

    async fn save<R>(&mut self, repo: &R) -> Outcome
    where
        R: DocumentReader + DocumentWriter + ?Sized,
    {
        let label = self.session.mode().label();
        match self.session.save(repo).await {
            Ok(kind) => {
                let message = match kind {
                    SaveKind::Created => format!("{label} Saved Successfully!"),
                    SaveKind::Updated => format!("{label} Updated Successfully!"),
                };
                self.start_over(repo).await;
                Outcome::notice(Notice::success(message)).and_navigate(Navigation::new_document())
            }
            Err(err) => Outcome::from_error(err, "Save failed"),
        }
    }

    async fn delete<R, C>(&mut self, repo: &R, confirm: &C) -> Outcome
    where
        R: DocumentReader + DocumentWriter + ?Sized,
        C: Confirm + ?Sized,
    {
        match self.session.delete(repo, confirm).await {
            Ok(()) => {
                self.start_over(repo).await;
                Outcome::notice(Notice::warning("Document Deleted Successfully"))
                    .and_navigate(Navigation::new_document())
            }
            Err(err) => Outcome::from_error(err, "Delete failed"),
        }
    }

    async fn start_over<R>(&mut self, repo: &R)
    where
        R: DocumentReader + ?Sized,
    {
        self.session.reset();
        self.session.set_mode(DocumentMode::Invoice);
        self.session.assign_next_number(repo).await;
    }
}

/// Builds a `wa.me` link carrying the purchase-order message for the current
/// document. The phone is left out unless it has at least ten characters
/// once spaces and `+` are removed.
pub fn whatsapp_link(session: &DocumentSession, company: &str) -> ServiceResult<Url> {
    let phone: String = session
        .client_phone()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '+')
        .collect();

    let base = if phone.len() >= MIN_PHONE_LEN {
        format!("{WHATSAPP_URL}{phone}")
    } else {
        WHATSAPP_URL.to_string()
    };

    Url::parse_with_params(&base, &[("text", whatsapp_message(session, company))]).map_err(|err| {
        log::error!("Failed to build share link: {err}");
        ServiceError::Internal(err.to_string())
    })
}

fn whatsapp_message(session: &DocumentSession, company: &str) -> String {
    let client = non_blank(session.client_name(), "Valued Client");
    let number = non_blank(session.number(), "PO-XXXXXX");
    let date = session.date().map(format_date).unwrap_or_default();

    let first = session.rows().first().map(|(_, row)| row);
    let service = first.map_or("Service", |row| non_blank(&row.service, "Service"));
    let duration = first
        .map(|row| row.duration.trim())
        .filter(|duration| !duration.is_empty())
        .map(|duration| format!(" ({duration})"))
        .unwrap_or_default();
    let description = first.map_or("", |row| row.description.trim());

    format!(
        "Hello Mr. {client},\n\
         I hope you are doing well.\n\n\
         Please find attached the Purchase Order {number} dated {date} for {service}{duration} for {description}.\n\n\
         Kindly review and confirm receipt.\n\
         If you need any clarification, please let us know.\n\n\
         Thank you for your cooperation.\n\n\
         Best regards,\n\
         {company}"
    )
}

fn non_blank<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() { fallback } else { trimmed }
}
