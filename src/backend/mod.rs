//! Client side of the scheduling agent's chat endpoint.
//!
//! One request per user message:
//! `POST {base_url}/api/chat/message` with `{"user_id", "message"}`,
//! answered by a JSON object carrying a string `response`.

mod http;
mod transport;

pub use http::HttpBackend;
pub use transport::{BackendError, BackendResult, ChatBackend};

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::BackendConfigFile;

/// Default backend address.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default path of the message endpoint.
pub const DEFAULT_ENDPOINT: &str = "/api/chat/message";

/// Placeholder identity sent in absence of real sessions.
pub const DEFAULT_USER_ID: &str = "local";

/// Request body for the message endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub user_id: String,
    pub message: String,
}

impl ChatRequest {
    pub fn new(user_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            message: message.into(),
        }
    }
}

/// Reply body. The backend also returns a `context` object, which the
/// client does not use.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    response: String,
}

/// Extract the `response` string from a reply body.
pub fn parse_reply(body: &str) -> BackendResult<String> {
    serde_json::from_str::<ChatResponse>(body)
        .map(|reply| reply.response)
        .map_err(|e| BackendError::Malformed(e.to_string()))
}

/// Runtime settings for the HTTP backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub base_url: String,
    pub endpoint: String,
    /// Per-request timeout. `None` waits for as long as the transport does.
    pub timeout: Option<Duration>,
    /// Treat non-2xx responses as errors instead of parsing their body.
    pub check_status: bool,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: None,
            check_status: true,
        }
    }
}

impl BackendConfig {
    /// Build runtime settings from the config file section.
    pub fn from_file(file: &BackendConfigFile) -> Self {
        Self {
            base_url: file.base_url.clone(),
            endpoint: file.endpoint.clone(),
            timeout: file.timeout_secs.map(Duration::from_secs),
            check_status: file.check_status,
        }
    }

    /// Full URL of the message endpoint.
    pub fn message_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let endpoint = self.endpoint.trim_start_matches('/');
        format!("{}/{}", base, endpoint)
    }
}
