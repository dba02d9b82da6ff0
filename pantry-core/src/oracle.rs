//! Text-completion oracle used for advisory content.
//!
//! The engine never depends on a vendor's request or response shape; it
//! only needs [`Oracle::complete`]. Oracle failures are absorbed by the
//! engine and degrade advisory text, never a state mutation.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default timeout for a completion request.
pub const DEFAULT_ORACLE_TIMEOUT: Duration = Duration::from_secs(15);

/// Errors from an oracle query. None of these escape the engine; they
/// are logged and replaced with fallback text.
#[derive(Error, Debug)]
pub enum OracleError {
    #[error("Oracle is not configured")]
    Disabled,

    #[error("Oracle request failed: {0}")]
    Request(String),

    #[error("Oracle returned status {0}")]
    Status(u16),

    #[error("Oracle returned an empty reply")]
    EmptyReply,
}

/// An external text-completion service.
pub trait Oracle {
    /// Send a natural-language prompt and return the reply text.
    fn complete(&self, prompt: &str) -> Result<String, OracleError>;
}

/// Connection settings for [`HttpOracle`].
#[derive(Debug, Clone)]
pub struct OracleConfig {
    /// Completion endpoint URL
    pub url: String,
    /// Bearer token, if the endpoint requires one
    pub api_key: Option<String>,
    /// Model name forwarded to the endpoint, if it wants one
    pub model: Option<String>,
    /// Request timeout
    pub timeout: Duration,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct CompletionResponse {
    text: String,
}

/// Oracle backed by a generic text-completion HTTP endpoint.
///
/// Sends `{model?, prompt}` as JSON and expects `{text}` back. The
/// request is bounded by the configured timeout so a slow oracle can
/// only delay, never hang, the operation that asked.
pub struct HttpOracle {
    client: reqwest::blocking::Client,
    config: OracleConfig,
}

impl HttpOracle {
    pub fn new(config: OracleConfig) -> Result<Self, OracleError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| OracleError::Request(e.to_string()))?;
        Ok(Self { client, config })
    }
}

impl Oracle for HttpOracle {
    fn complete(&self, prompt: &str) -> Result<String, OracleError> {
        let body = CompletionRequest {
            model: self.config.model.as_deref(),
            prompt,
        };

        let mut request = self.client.post(&self.config.url).json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.header("Authorization", format!("Bearer {}", key));
        }

        let response = request
            .send()
            .map_err(|e| OracleError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(OracleError::Status(response.status().as_u16()));
        }

        let completion: CompletionResponse = response
            .json()
            .map_err(|e| OracleError::Request(e.to_string()))?;

        let text = completion.text.trim().to_string();
        if text.is_empty() {
            return Err(OracleError::EmptyReply);
        }
        Ok(text)
    }
}

/// Extract the first (possibly negative) integer from oracle reply text.
///
/// Shelf-life prompts ask for a bare integer, but models pad their
/// answers ("about 7 days"), so the parser scans for the first digit run
/// and honors a directly preceding minus sign.
pub fn parse_first_integer(text: &str) -> Option<i64> {
    let bytes = text.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if b.is_ascii_digit() {
            let start = if i > 0 && bytes[i - 1] == b'-' { i - 1 } else { i };
            let mut end = i;
            while end < bytes.len() && bytes[end].is_ascii_digit() {
                end += 1;
            }
            return text[start..end].parse().ok();
        }
    }
    None
}
