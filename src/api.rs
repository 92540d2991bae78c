/// Remote API client
///
/// Both wizard commands go to one fixed endpoint as a JSON POST. The client
/// is stateless; controllers never hold it, the executor shares it by `Arc`.
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::Config;
use crate::error::ApiError;
use crate::messaging::commands::{ApiCommand, ApiReply, UpdatePrinterReply, VerifyCodeReply};

pub trait PairingApi: Send + Sync {
    fn verify_code(&self, code: &str, endpoint_prefix: &str) -> Result<VerifyCodeReply, ApiError>;

    fn update_printer(&self, name: &str) -> Result<UpdatePrinterReply, ApiError>;

    /// Execute any command, wrapping the typed reply
    fn execute(&self, command: &ApiCommand) -> Result<ApiReply, ApiError> {
        match command {
            ApiCommand::VerifyCode {
                code,
                endpoint_prefix,
            } => self.verify_code(code, endpoint_prefix).map(ApiReply::VerifyCode),
            ApiCommand::UpdatePrinter { name } => {
                self.update_printer(name).map(ApiReply::UpdatePrinter)
            }
        }
    }
}

/// `PairingApi` over HTTP using ureq
pub struct HttpApiClient {
    agent: ureq::Agent,
    url: String,
    api_key: Option<String>,
}

impl HttpApiClient {
    pub fn new(url: impl Into<String>, api_key: Option<String>, timeout: Option<Duration>) -> Self {
        let mut builder = ureq::AgentBuilder::new();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Self {
            agent: builder.build(),
            url: url.into(),
            api_key,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.command_url(),
            config.api_key.clone(),
            config.request_timeout(),
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn post_command<T: DeserializeOwned>(&self, command: &ApiCommand) -> Result<T, ApiError> {
        tracing::debug!(target: "pairing_wizard::api", "POST {} ({})", self.url, command.description());

        let mut request = self
            .agent
            .post(&self.url)
            .set("Content-Type", "application/json");
        if let Some(key) = &self.api_key {
            request = request.set("X-Api-Key", key);
        }

        let response = match request.send_json(command) {
            Ok(resp) => resp,
            Err(ureq::Error::Status(status, _)) => {
                tracing::error!(target: "pairing_wizard::api", "Command endpoint returned status {}", status);
                return Err(ApiError::HttpStatus { status });
            }
            Err(ureq::Error::Transport(e)) => {
                tracing::error!(target: "pairing_wizard::api", "Network error: {}", e);
                return Err(ApiError::Transport {
                    url: self.url.clone(),
                    source: Box::new(e),
                });
            }
        };

        response.into_json::<T>().map_err(|e| {
            tracing::error!(target: "pairing_wizard::api", "Failed to parse reply: {}", e);
            ApiError::Decode(e)
        })
    }
}

impl PairingApi for HttpApiClient {
    fn verify_code(&self, code: &str, endpoint_prefix: &str) -> Result<VerifyCodeReply, ApiError> {
        self.post_command(&ApiCommand::VerifyCode {
            code: code.to_string(),
            endpoint_prefix: endpoint_prefix.to_string(),
        })
    }

    fn update_printer(&self, name: &str) -> Result<UpdatePrinterReply, ApiError> {
        self.post_command(&ApiCommand::UpdatePrinter {
            name: name.to_string(),
        })
    }
}
