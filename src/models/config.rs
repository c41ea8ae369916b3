//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::calc::debounce::QUIET_PERIOD_MS;

#[derive(Clone, Debug, Deserialize)]
/// Settings for talking to the invoicing API and running editing sessions.
pub struct ClientConfig {
    /// Root of the API, e.g. `http://localhost:5000`.
    pub base_url: String,
    /// Where the signed-in user's credentials are kept between runs.
    pub session_file: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_quiet_period_ms")]
    pub quiet_period_ms: u64,
    /// Currency prefilled on new documents.
    #[serde(default)]
    pub currency: String,
    /// Account that can never be deleted from the admin views.
    #[serde(default)]
    pub protected_admin_email: Option<String>,
    /// Signature of shared purchase-order messages.
    #[serde(default)]
    pub company_name: String,
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_quiet_period_ms() -> u64 {
    QUIET_PERIOD_MS
}
