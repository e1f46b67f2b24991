//! Conversation state: the ordered turn sequence, pending input, and
//! the projection to the wire-format history.

use bsab_api::{FileAttachment, HistoryEntry, Role};
use serde::{Deserialize, Serialize};

/// What the conversation remembers about a sent attachment. The bytes
/// themselves are consumed by the gateway call and never retained.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachmentMeta {
    pub name: String,
    pub size: u64,
}

/// One exchange unit in the conversation. Immutable once appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<AttachmentMeta>,
    /// Creation time, milliseconds since the Unix epoch
    #[serde(default)]
    pub timestamp: i64,
}

impl Turn {
    /// Create a user turn with text content
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: text.into(),
            attachment: None,
            timestamp: now_millis(),
        }
    }

    /// Create a user turn carrying attachment metadata
    pub fn user_with_attachment(text: impl Into<String>, attachment: AttachmentMeta) -> Self {
        Self {
            role: Role::User,
            content: text.into(),
            attachment: Some(attachment),
            timestamp: now_millis(),
        }
    }

    /// Create an assistant turn
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: text.into(),
            attachment: None,
            timestamp: now_millis(),
        }
    }

    /// Build a turn from a wire-format history entry (used when
    /// adopting the backend's authoritative history)
    pub fn from_entry(entry: &HistoryEntry) -> Self {
        Self {
            role: entry.role,
            content: entry.content.clone(),
            attachment: None,
            timestamp: now_millis(),
        }
    }
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Project turns down to the `{role, content}` pairs the backend
/// expects. Pure function; the single place the wire shape is derived.
pub fn wire_history(turns: &[Turn]) -> Vec<HistoryEntry> {
    turns
        .iter()
        .map(|t| HistoryEntry::new(t.role, t.content.clone()))
        .collect()
}

/// An ordered, append-only sequence of turns plus the single-flight
/// busy flag. Lifetime is one session; nothing persists across it.
#[derive(Debug, Default)]
pub struct Conversation {
    turns: Vec<Turn>,
    busy: bool,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// All turns, oldest first. Insertion order is display order.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Whether a send is in flight
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub(crate) fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    /// Append a turn to the end of the sequence
    pub fn append_turn(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Replace the whole sequence with the backend's authoritative
    /// history after a successful text query
    pub(crate) fn replace_turns(&mut self, turns: Vec<Turn>) {
        self.turns = turns;
    }

    /// Start a fresh session: drop all turns. Individual turns are
    /// never removed or edited.
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// Wire-format projection of the current turn sequence
    pub fn wire_history(&self) -> Vec<HistoryEntry> {
        wire_history(&self.turns)
    }
}

/// The not-yet-sent text and attachment the user is composing.
/// Consumed atomically when a send begins, whatever the outcome.
#[derive(Debug, Default)]
pub struct PendingInput {
    pub text: String,
    pub attachment: Option<FileAttachment>,
}

impl PendingInput {
    /// A send is a no-op unless there is trimmed text or an attachment
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.attachment.is_none()
    }

    /// Take the pending input, leaving it cleared
    pub fn take(&mut self) -> PendingInput {
        std::mem::take(self)
    }
}
