//! HTTP transport for the chat endpoint.

use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;

use super::{parse_reply, BackendConfig, BackendError, BackendResult, ChatBackend, ChatRequest};

/// Backend reached over HTTP with `reqwest`.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    config: Arc<BackendConfig>,
}

impl HttpBackend {
    /// Create a new HTTP backend with the given configuration.
    pub fn new(config: BackendConfig) -> Self {
        Self {
            client: Client::new(),
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn send_message(&self, request: ChatRequest) -> BackendResult<String> {
        let url = self.config.message_url();

        let mut builder = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request);
        if let Some(timeout) = self.config.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if self.config.check_status && !status.is_success() {
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        parse_reply(&body)
    }

    async fn probe(&self) -> BackendResult<()> {
        let mut builder = self.client.get(&self.config.base_url);
        if let Some(timeout) = self.config.timeout {
            builder = builder.timeout(timeout);
        }
        // Any HTTP answer means the server is up.
        builder.send().await?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.config.message_url()
    }
}
