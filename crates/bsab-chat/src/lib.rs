//! bsab-chat: conversation state and send orchestration
//!
//! Owns the in-memory, append-only turn sequence and the single-flight
//! send protocol: one user action becomes exactly one backend call,
//! routed by whether a file is attached, with the outcome appended as
//! an assistant turn.

pub mod conversation;
pub mod session;

pub use conversation::{wire_history, AttachmentMeta, Conversation, PendingInput, Turn};
pub use session::{
    ChatSession, Outbound, SendReply, DEFAULT_GREETING, EMPTY_ANSWER_FALLBACK, ERROR_PREFIX,
};
