//! Gateway to the Building Safety Act Bot backend.
//!
//! Three operations, each a single request/await with no retry, no
//! client-side timeout, and no cancellation: an in-flight call runs to
//! completion and the caller sees either a typed result or an
//! operation-specific error.

use crate::error::{Error, Result};
use crate::types::{
    EmbedResponse, FileAttachment, HistoryEntry, QueryRequest, QueryResponse, UploadResponse,
};

/// Default backend base URL, matching the backend's local dev setup
pub const DEFAULT_BASE_URL: &str = "http://localhost:5001/api";

/// Environment variable overriding the backend base URL
pub const BASE_URL_ENV_VAR: &str = "BSAB_API_BASE_URL";

/// HTTP client for the backend API
pub struct Gateway {
    client: reqwest::Client,
    base_url: String,
}

impl Gateway {
    /// Create a gateway against the given base URL (e.g.
    /// `http://localhost:5001/api`)
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Create a gateway from `BSAB_API_BASE_URL`, falling back to the
    /// local default
    pub fn from_env() -> Self {
        let base_url =
            std::env::var(BASE_URL_ENV_VAR).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    /// The configured base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a text question plus the prior wire-format history to
    /// POST /query.
    ///
    /// The returned `updated_history` is the backend's canonical view
    /// of the conversation; callers replace their local history with
    /// it rather than appending the answer themselves.
    pub async fn submit_text_query(
        &self,
        question: &str,
        history: &[HistoryEntry],
    ) -> Result<QueryResponse> {
        let url = format!("{}/query", self.base_url);
        let request = QueryRequest {
            question: question.to_string(),
            history: history.to_vec(),
        };

        tracing::debug!(url = %url, history_len = history.len(), "submitting text query");

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::QueryFailed(transport_message(e)))?;

        let status = response.status();
        if !status.is_success() {
            let message = read_backend_message(response)
                .await
                .unwrap_or_else(|| format!("backend returned {}", status));
            return Err(Error::QueryFailed(message));
        }

        response
            .json::<QueryResponse>()
            .await
            .map_err(|e| Error::QueryFailed(format!("malformed backend response: {}", e)))
    }

    /// Send a file and an optional prompt (may be empty) to
    /// POST /upload. Returns the answer text.
    ///
    /// The multipart part names (`image`, `prompt`) are part of the
    /// backend contract and must not change.
    pub async fn submit_file_query(&self, file: FileAttachment, prompt: &str) -> Result<String> {
        let url = format!("{}/upload", self.base_url);

        tracing::debug!(
            url = %url,
            file = %file.name,
            size = file.size(),
            "submitting file query"
        );

        let mime = file.mime_type();
        let part = reqwest::multipart::Part::bytes(file.bytes)
            .file_name(file.name)
            .mime_str(mime)
            .map_err(|e| Error::ImageQueryFailed(transport_message(e)))?;
        let form = reqwest::multipart::Form::new()
            .part("image", part)
            .text("prompt", prompt.to_string());

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::ImageQueryFailed(transport_message(e)))?;

        let status = response.status();
        let body: UploadResponse = response.json().await.unwrap_or_default();

        if !status.is_success() {
            let message = body
                .error
                .unwrap_or_else(|| format!("backend returned {}", status));
            return Err(Error::ImageQueryFailed(message));
        }

        if let Some(error) = body.error {
            return Err(Error::ImageQueryFailed(error));
        }

        body.response
            .ok_or_else(|| Error::ImageQueryFailed("backend response missing answer".to_string()))
    }

    /// Upload a knowledge-base file to POST /embed/user for retrieval
    /// indexing. Independent of any chat conversation. Returns the
    /// number of chunks the backend created.
    ///
    /// The backend reports some failures with a 200 status plus
    /// `status: "error"`, so both paths are checked.
    pub async fn embed_reference_file(&self, file: FileAttachment) -> Result<u64> {
        let url = format!("{}/embed/user", self.base_url);

        tracing::debug!(url = %url, file = %file.name, size = file.size(), "embedding reference file");

        let mime = file.mime_type();
        let part = reqwest::multipart::Part::bytes(file.bytes)
            .file_name(file.name)
            .mime_str(mime)
            .map_err(|e| Error::EmbedFailed(transport_message(e)))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::EmbedFailed(transport_message(e)))?;

        let status = response.status();
        let body: EmbedResponse = response.json().await.unwrap_or_default();

        if !status.is_success() {
            let message = body
                .message
                .unwrap_or_else(|| format!("backend returned {}", status));
            return Err(Error::EmbedFailed(message));
        }

        if body.status.as_deref() == Some("error") {
            return Err(Error::EmbedFailed(
                body.message.unwrap_or_else(|| "Upload failed".to_string()),
            ));
        }

        body.chunks
            .ok_or_else(|| Error::EmbedFailed("backend response missing chunk count".to_string()))
    }

    /// Probe the backend's health route (GET at the server root).
    /// Returns false on any failure; never errors.
    pub async fn health(&self) -> bool {
        let root = match reqwest::Url::parse(&self.base_url) {
            Ok(mut url) => {
                url.set_path("/");
                url
            }
            Err(e) => {
                tracing::debug!(error = %e, "invalid base URL");
                return false;
            }
        };

        match self.client.get(root).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!(error = %e, "health check failed");
                false
            }
        }
    }
}

/// Message for a transport-level failure. The caller cannot
/// distinguish these from non-2xx responses, by contract.
fn transport_message(err: reqwest::Error) -> String {
    if err.is_connect() {
        format!("backend unreachable: {}", err)
    } else {
        err.to_string()
    }
}

/// Pull a human-readable message out of an error response body, if the
/// backend sent one (`message` or `error` field).
async fn read_backend_message(response: reqwest::Response) -> Option<String> {
    let value: serde_json::Value = response.json().await.ok()?;
    value
        .get("message")
        .or_else(|| value.get("error"))
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}
