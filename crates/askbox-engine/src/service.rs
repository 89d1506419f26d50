//! Answer service contract and its HTTP implementation.
//!
//! The conversation only needs one capability from the network: send a
//! query, await an answer or a failure. [`AnswerService`] captures that
//! seam; [`HttpAnswerService`] implements it against the `/ask` endpoint
//! and also exposes the `/upload` endpoint used by the CLI.

use std::future::Future;
use std::path::Path;
use std::time::Instant;

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::config::ClientConfig;

/// Extensions the upload endpoint accepts.
const UPLOAD_EXTENSIONS: &[&str] = &["txt"];

/// Something that can answer a query.
pub trait AnswerService: Send + Sync {
    /// Send `query` and wait for the service's response.
    fn ask(&self, query: &str) -> impl Future<Output = Result<AskResponse, ServiceError>> + Send;
}

/// Request body for the ask endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AskRequest<'a> {
    pub query: &'a str,
}

/// Successful response from the ask endpoint.
///
/// Only `answer` matters to the conversation. The service may also
/// echo the query and its bot name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AskResponse {
    answer: Option<Value>,
    pub bot: Option<String>,
    pub query: Option<String>,
}

impl AskResponse {
    /// Response carrying a plain answer.
    pub fn with_answer(answer: impl Into<String>) -> Self {
        Self {
            answer: Some(Value::String(answer.into())),
            ..Self::default()
        }
    }

    /// Build a response from any JSON body.
    ///
    /// Bodies that are not objects simply carry no answer.
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut map) = value else {
            return Self::default();
        };
        let text_field = |v: Option<Value>| match v {
            Some(Value::String(s)) => Some(s),
            _ => None,
        };
        Self {
            answer: map.remove("answer"),
            bot: text_field(map.remove("bot")),
            query: text_field(map.remove("query")),
        }
    }

    /// The answer text, if the service returned a usable one.
    ///
    /// Missing, non-string and empty answers are all unusable.
    pub fn answer(&self) -> Option<&str> {
        match &self.answer {
            Some(Value::String(s)) if !s.is_empty() => Some(s.as_str()),
            _ => None,
        }
    }
}

/// Upload response body (`{"message": ...}` or `{"error": ...}`).
#[derive(Debug, Default, Deserialize)]
struct UploadReply {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// HTTP client for the answer service.
#[derive(Debug, Clone)]
pub struct HttpAnswerService {
    client: Client,
    ask_url: String,
    upload_url: String,
}

impl HttpAnswerService {
    /// Create a client from configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(ServiceError::Transport)?;

        Ok(Self {
            client,
            ask_url: config.ask_url(),
            upload_url: config.upload_url(),
        })
    }

    /// Upload a `.txt` document so the service can answer from it.
    ///
    /// Returns the server's confirmation message.
    pub async fn upload(&self, path: &Path) -> Result<String, ServiceError> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        check_upload_name(&file_name)?;

        let data = tokio::fs::read(path).await.map_err(ServiceError::Io)?;
        let size = data.len();
        let part = Part::bytes(data)
            .file_name(file_name.clone())
            .mime_str("text/plain")
            .map_err(ServiceError::Transport)?;
        let form = Form::new().part("file", part);

        debug!(url = %self.upload_url, file = %file_name, size, "Uploading document");

        let response = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(ServiceError::Transport)?;

        let status = response.status();
        let body = response.text().await.map_err(ServiceError::Transport)?;
        let reply: UploadReply = serde_json::from_str(&body).unwrap_or_default();

        if !status.is_success() {
            return Err(ServiceError::Status {
                status: status.as_u16(),
                body: reply.error.unwrap_or(body),
            });
        }

        info!(file = %file_name, "Document uploaded");
        Ok(reply
            .message
            .unwrap_or_else(|| "File uploaded".to_string()))
    }
}

impl AnswerService for HttpAnswerService {
    async fn ask(&self, query: &str) -> Result<AskResponse, ServiceError> {
        let start = Instant::now();
        debug!(url = %self.ask_url, "Sending ask request");

        let response = self
            .client
            .post(&self.ask_url)
            .json(&AskRequest { query })
            .send()
            .await
            .map_err(ServiceError::Transport)?;

        let status = response.status();
        let body = response.text().await.map_err(ServiceError::Transport)?;

        #[allow(clippy::cast_possible_truncation)]
        let duration_ms = start.elapsed().as_millis() as u64;
        debug!(%status, duration_ms, bytes = body.len(), "Ask request finished");

        if !status.is_success() {
            return Err(ServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let value: Value = serde_json::from_str(&body).map_err(ServiceError::Malformed)?;
        Ok(AskResponse::from_value(value))
    }
}

/// Reject file names the upload endpoint would refuse anyway.
fn check_upload_name(file_name: &str) -> Result<(), ServiceError> {
    if file_name.is_empty() {
        return Err(ServiceError::UnsupportedFile("no file name".into()));
    }
    let allowed = file_name
        .rsplit_once('.')
        .is_some_and(|(_, ext)| UPLOAD_EXTENSIONS.contains(&ext.to_lowercase().as_str()));
    if allowed {
        Ok(())
    } else {
        Err(ServiceError::UnsupportedFile(format!(
            "{file_name} (only .txt files are allowed)"
        )))
    }
}

/// Errors that can occur when talking to the answer service.
///
/// The conversation treats every variant the same way; the distinction
/// only matters for logs and for the CLI.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Connection, timeout or protocol failure.
    #[error("Request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("Service returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not valid JSON.
    #[error("Malformed response: {0}")]
    Malformed(#[source] serde_json::Error),

    /// Reading a local file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file cannot be uploaded.
    #[error("Unsupported file: {0}")]
    UnsupportedFile(String),

    /// The background task running the request died.
    #[error("Request task failed: {0}")]
    Task(String),
}
