//! Wire types shared with the Building Safety Act Bot backend

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Author of a conversation entry, as the backend spells it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Get the role as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One `{role, content}` pair in the wire-format history.
///
/// This is the only shape the backend ever sees; richer client-side
/// turn state is projected down to it before a request goes out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: Role,
    pub content: String,
}

impl HistoryEntry {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// JSON body for POST /query
#[derive(Debug, Clone, Serialize)]
pub struct QueryRequest {
    pub question: String,
    pub history: Vec<HistoryEntry>,
}

/// Successful response from POST /query.
///
/// The backend also sends `status` and `used_sources`; we only keep
/// what the client consumes. `updated_history` is authoritative: the
/// caller replaces its local history with it rather than appending.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResponse {
    pub answer: String,
    pub updated_history: Vec<HistoryEntry>,
}

/// Response body from POST /upload (both success and failure shapes)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadResponse {
    /// The answer text on success
    #[serde(default)]
    pub response: Option<String>,
    /// Backend-reported error message on failure
    #[serde(default)]
    pub error: Option<String>,
}

/// Response body from POST /embed/user.
///
/// The backend returns 200 even for some failures, signalled by
/// `status: "error"` plus a `message`; success carries `chunks`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmbedResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub chunks: Option<u64>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A file payload to send with a request.
///
/// Read-once: gateway calls consume the attachment and nothing retains
/// the bytes after the call resolves.
#[derive(Debug, Clone)]
pub struct FileAttachment {
    /// Original file name (sent as the multipart filename)
    pub name: String,
    /// Raw file contents
    pub bytes: Vec<u8>,
}

impl FileAttachment {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Read an attachment from disk, keeping only the file name
    pub fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self { name, bytes })
    }

    /// Size in bytes
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Guess the MIME type from the file extension.
    ///
    /// Covers the types the chat accepts (.pdf,.doc,.docx,.txt,.jpg,
    /// .jpeg,.png); anything else goes out as an octet stream.
    pub fn mime_type(&self) -> &'static str {
        let ext = self
            .name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "pdf" => "application/pdf",
            "txt" => "text/plain",
            "jpg" | "jpeg" => "image/jpeg",
            "png" => "image/png",
            "doc" => "application/msword",
            "docx" => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            _ => "application/octet-stream",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&Role::Assistant).unwrap(),
            "\"assistant\""
        );
    }

    #[test]
    fn test_query_request_wire_shape() {
        let request = QueryRequest {
            question: "What is the Golden Thread?".to_string(),
            history: vec![HistoryEntry::new(Role::Assistant, "Hello!")],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["question"], "What is the Golden Thread?");
        assert_eq!(json["history"][0]["role"], "assistant");
        assert_eq!(json["history"][0]["content"], "Hello!");
    }

    #[test]
    fn test_query_response_ignores_extra_fields() {
        let json = r#"{
            "status": "success",
            "answer": "The golden thread is...",
            "used_sources": ["doc1.pdf"],
            "updated_history": [
                {"role": "user", "content": "q"},
                {"role": "assistant", "content": "a"}
            ]
        }"#;
        let response: QueryResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.answer, "The golden thread is...");
        assert_eq!(response.updated_history.len(), 2);
        assert_eq!(response.updated_history[1].role, Role::Assistant);
    }

    #[test]
    fn test_embed_response_error_shape() {
        let json = r#"{"status": "error", "message": "File is empty"}"#;
        let response: EmbedResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.status.as_deref(), Some("error"));
        assert_eq!(response.chunks, None);
        assert_eq!(response.message.as_deref(), Some("File is empty"));
    }

    #[test]
    fn test_mime_type_guessing() {
        assert_eq!(
            FileAttachment::new("policy.pdf", vec![]).mime_type(),
            "application/pdf"
        );
        assert_eq!(
            FileAttachment::new("photo.JPG", vec![]).mime_type(),
            "image/jpeg"
        );
        assert_eq!(
            FileAttachment::new("notes", vec![]).mime_type(),
            "application/octet-stream"
        );
    }
}
