//! Transport trait for the chat backend.
//!
//! The UI only ever talks to a `ChatBackend`, so tests can swap the HTTP
//! client for an in-memory fake.

use async_trait::async_trait;

use super::ChatRequest;

/// A backend that turns one user message into one agent reply.
///
/// # Example
///
/// ```ignore
/// use appointment_chat::backend::{ChatBackend, ChatRequest};
///
/// async fn ask(backend: &dyn ChatBackend) {
///     let request = ChatRequest::new("local", "I need to book");
///     match backend.send_message(request).await {
///         Ok(reply) => println!("{reply}"),
///         Err(e) => eprintln!("{e}"),
///     }
/// }
/// ```
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send a single message and return the `response` string.
    ///
    /// Exactly one attempt is made. No retry, no backoff.
    async fn send_message(&self, request: ChatRequest) -> BackendResult<String>;

    /// Check whether the backend answers at all.
    ///
    /// Defaults to reachable; HTTP backends override this.
    async fn probe(&self) -> BackendResult<()> {
        Ok(())
    }

    /// Human-readable target, shown in logs.
    fn describe(&self) -> String;
}

/// Result type for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;

/// Errors that can occur while exchanging a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The request could not complete (DNS, connect, timeout).
    Transport(String),

    /// The backend answered with a non-2xx status.
    Status { status: u16, body: String },

    /// The body is not JSON or has no string `response` field.
    Malformed(String),
}

impl BackendError {
    /// Short name of the error kind, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Status { .. } => "status",
            Self::Malformed(_) => "malformed",
        }
    }
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(msg) => write!(f, "Transport error: {}", msg),
            Self::Status { status, body } => {
                if body.is_empty() {
                    write!(f, "Backend returned status {}", status)
                } else {
                    write!(f, "Backend returned status {}: {}", status, body)
                }
            }
            Self::Malformed(msg) => write!(f, "Malformed response: {}", msg),
        }
    }
}

impl std::error::Error for BackendError {}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Transport("Request timed out".to_string())
        } else if err.is_connect() {
            Self::Transport(format!("Connection failed: {}", err))
        } else if err.is_decode() {
            Self::Malformed(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}
