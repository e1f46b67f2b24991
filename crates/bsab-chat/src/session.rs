//! Chat session: the begin/complete send protocol over a gateway.
//!
//! One user action becomes at most one backend call. `begin_send`
//! appends the user turn, consumes the pending input, and raises the
//! busy flag; `complete_send` appends the outcome and always lowers
//! it. The async `send` drives the two around a single gateway call.

use bsab_api::{Error as ApiError, FileAttachment, Gateway, HistoryEntry};

use crate::conversation::{AttachmentMeta, Conversation, PendingInput, Turn};

/// Prefix marking an assistant turn that carries an error rather than
/// a genuine answer
pub const ERROR_PREFIX: &str = "⚠️ An error occurred: ";

/// Shown when the backend answers with an empty string
pub const EMPTY_ANSWER_FALLBACK: &str = "❗ Sorry, I couldn't generate a response.";

/// Greeting turn seeded into a fresh session
pub const DEFAULT_GREETING: &str =
    "Hello! I'm the Building Safety Act Bot. How can I help you today?";

/// The single backend call a send routes to. An attachment always
/// wins the route; a send never produces both.
#[derive(Debug)]
pub enum Outbound {
    /// Text-only send: question plus the history *before* this turn
    Text {
        question: String,
        history: Vec<HistoryEntry>,
    },
    /// File send: the attachment plus the typed text as the prompt
    /// (possibly empty)
    File {
        file: FileAttachment,
        prompt: String,
    },
}

/// Gateway outcome fed back into `complete_send`
#[derive(Debug)]
pub enum SendReply {
    /// Text query answered; the backend's history is authoritative
    /// and already carries the answer as its final entry
    Answered {
        updated_history: Vec<HistoryEntry>,
    },
    /// File query answered
    FileAnswered { answer: String },
}

/// One chat session: conversation, pending input, and the gateway.
/// Lives for the duration of the program run.
pub struct ChatSession {
    conversation: Conversation,
    pending: PendingInput,
    gateway: Gateway,
    greeting: Option<String>,
}

impl ChatSession {
    /// Create a session seeded with the default greeting turn
    pub fn new(gateway: Gateway) -> Self {
        Self::with_greeting(gateway, DEFAULT_GREETING)
    }

    /// Create a session seeded with a custom greeting turn
    pub fn with_greeting(gateway: Gateway, greeting: impl Into<String>) -> Self {
        let greeting = greeting.into();
        let mut conversation = Conversation::new();
        conversation.append_turn(Turn::assistant(greeting.clone()));
        Self {
            conversation,
            pending: PendingInput::default(),
            gateway,
            greeting: Some(greeting),
        }
    }

    /// Create a session with no greeting turn
    pub fn without_greeting(gateway: Gateway) -> Self {
        Self {
            conversation: Conversation::new(),
            pending: PendingInput::default(),
            gateway,
            greeting: None,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn pending(&self) -> &PendingInput {
        &self.pending
    }

    /// Replace the pending input text
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.pending.text = text.into();
    }

    /// Attach a file to the pending input, replacing any previous one.
    /// At most one attachment rides along with a send.
    pub fn attach(&mut self, file: FileAttachment) {
        self.pending.attachment = Some(file);
    }

    /// Remove the pending attachment, returning it if present
    pub fn detach(&mut self) -> Option<FileAttachment> {
        self.pending.attachment.take()
    }

    /// Start a fresh conversation, re-seeding the greeting if the
    /// session has one. Pending input is left alone.
    pub fn clear(&mut self) {
        self.conversation.clear();
        if let Some(ref greeting) = self.greeting {
            self.conversation.append_turn(Turn::assistant(greeting.clone()));
        }
    }

    /// Begin a send: validate, append the user turn, consume the
    /// pending input, raise the busy flag, and return the routed call.
    ///
    /// Returns `None` with no state change when the pending input is
    /// empty or another send is already in flight.
    pub fn begin_send(&mut self) -> Option<Outbound> {
        if self.conversation.is_busy() {
            tracing::debug!("send rejected: another send is in flight");
            return None;
        }
        if self.pending.is_empty() {
            return None;
        }

        let input = self.pending.take();
        let text = input.text;

        let outbound = match input.attachment {
            Some(file) => {
                let content = if text.is_empty() {
                    format!("Uploaded file: {}", file.name)
                } else {
                    text.clone()
                };
                let meta = AttachmentMeta {
                    name: file.name.clone(),
                    size: file.size(),
                };
                self.conversation
                    .append_turn(Turn::user_with_attachment(content, meta));
                Outbound::File { file, prompt: text }
            }
            None => {
                // History sent to the backend excludes the turn being
                // sent; the backend appends both sides itself.
                let history = self.conversation.wire_history();
                self.conversation.append_turn(Turn::user(text.clone()));
                Outbound::Text {
                    question: text,
                    history,
                }
            }
        };

        self.conversation.set_busy(true);
        Some(outbound)
    }

    /// Finish a send: append the outcome as an assistant turn and
    /// lower the busy flag, whatever happened.
    ///
    /// A successful text query replaces the local turn sequence with
    /// the backend's `updated_history`. Errors become one assistant
    /// turn prefixed with [`ERROR_PREFIX`].
    pub fn complete_send(&mut self, outcome: Result<SendReply, ApiError>) {
        match outcome {
            Ok(SendReply::Answered { updated_history }) => {
                let turns = updated_history.iter().map(Turn::from_entry).collect();
                self.conversation.replace_turns(turns);
            }
            Ok(SendReply::FileAnswered { answer }) => {
                let content = if answer.is_empty() {
                    EMPTY_ANSWER_FALLBACK.to_string()
                } else {
                    answer
                };
                self.conversation.append_turn(Turn::assistant(content));
            }
            Err(e) => {
                tracing::warn!(error = %e, "send failed");
                self.conversation
                    .append_turn(Turn::assistant(format!("{}{}", ERROR_PREFIX, e)));
            }
        }
        self.conversation.set_busy(false);
    }

    /// Drive one full send cycle: begin, one gateway call chosen by
    /// the routing rule, complete. Returns whether a send happened.
    pub async fn send(&mut self) -> bool {
        let Some(outbound) = self.begin_send() else {
            return false;
        };

        let outcome = match outbound {
            Outbound::Text { question, history } => self
                .gateway
                .submit_text_query(&question, &history)
                .await
                .map(|r| SendReply::Answered {
                    updated_history: r.updated_history,
                }),
            Outbound::File { file, prompt } => self
                .gateway
                .submit_file_query(file, &prompt)
                .await
                .map(|answer| SendReply::FileAnswered { answer }),
        };

        self.complete_send(outcome);
        true
    }

    /// Add a document to the backend's retrieval corpus. Independent
    /// of the conversation; does not touch turns or the busy flag.
    /// Returns the number of chunks created.
    pub async fn embed_reference_file(&self, file: FileAttachment) -> Result<u64, ApiError> {
        self.gateway.embed_reference_file(file).await
    }
}
