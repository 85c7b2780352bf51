//! Shared types between the site front-end and the chat API
//!
//! These types are used by:
//! - the `/api/chat/` request and response bodies
//! - the chat transcript kept in tab-scoped storage
//!
//! Serializable with serde for JSON over HTTP and `sessionStorage`

use serde::{Deserialize, Serialize};

// ============================================================================
// Chat API
// ============================================================================

/// Body of `POST /api/chat/`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatRequest {
    pub message: String,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Successful reply from the chat API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatReply {
    pub response: String,
}

/// Error body returned alongside a non-success status.
/// `error` is optional; other fields the server adds are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

// ============================================================================
// Transcript
// ============================================================================

/// Who produced a transcript entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

/// One displayed chat entry.
///
/// `text` holds the raw message for [`Role::User`] and already rendered,
/// HTML-safe markup for [`Role::Bot`]. `is_error` only affects styling and is
/// not part of the stored form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TranscriptEntry {
    #[serde(rename = "type")]
    pub role: Role,
    pub text: String,
    #[serde(skip)]
    pub is_error: bool,
}

impl TranscriptEntry {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            is_error: false,
        }
    }

    pub fn bot(html: impl Into<String>) -> Self {
        Self {
            role: Role::Bot,
            text: html.into(),
            is_error: false,
        }
    }

    pub fn error(html: impl Into<String>) -> Self {
        Self {
            role: Role::Bot,
            text: html.into(),
            is_error: true,
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

/// Encode a transcript as the JSON array kept in tab-scoped storage
pub fn encode_transcript(entries: &[TranscriptEntry]) -> serde_json::Result<String> {
    serde_json::to_string(entries)
}

/// Decode a stored transcript
pub fn decode_transcript(raw: &str) -> serde_json::Result<Vec<TranscriptEntry>> {
    serde_json::from_str(raw)
}

// ============================================================================
// Tests
// ============================================================================
