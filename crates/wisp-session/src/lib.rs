//! In-memory chat session state for the embeddable widget.
//!
//! Holds the append-only message thread, the open/closed panel machine, and
//! the single-slot send flow around one backend call. Nothing here persists:
//! a session lives exactly as long as the hosting process.

use thiserror::Error;
use wisp_api::{ApiFailureKind, BackendClient, ChatAnswer, Message, WispApiError};


/// Greeting seeded as the first bot message of every thread.
pub const DEFAULT_GREETING: &str = "Hello! How can I help you today?";

/// Bot display name used until an operator configures one.
pub const DEFAULT_BOT_NAME: &str = "AI Assistant";

/// Widget accent color used until an operator configures one.
pub const DEFAULT_PRIMARY_COLOR: &str = "#2563eb";

/// Reply shown in place of an answer when the backend call fails, whatever
/// the failure kind.
pub const FALLBACK_REPLY: &str =
    "Sorry, I am having trouble connecting to my brain. Please try again later.";

#[derive(Debug, Clone)]
/// Append-only ordered list of exchanged messages.
pub struct ChatThread {
    messages: Vec<Message>,
}

impl ChatThread {
    /// Creates a thread seeded with a bot greeting.
    pub fn with_greeting(greeting: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::bot(greeting)],
        }
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.messages.push(Message::user(text));
    }

    pub fn push_bot(&mut self, text: impl Into<String>) {
        self.messages.push(Message::bot(text));
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for ChatThread {
    fn default() -> Self {
        Self::with_greeting(DEFAULT_GREETING)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Visibility of the floating widget panel.
pub enum PanelState {
    Closed,
    Open,
}

impl PanelState {
    pub fn toggled(self) -> Self {
        match self {
            Self::Closed => Self::Open,
            Self::Open => Self::Closed,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Open => "open",
        }
    }

    pub fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Single-slot in-flight guard for the send flow.
///
/// `Pending` exists only between `begin_send` and `complete_send`, so a
/// loading indicator with no request behind it is unrepresentable.
pub enum SendSlot {
    Idle,
    Pending,
}

impl SendSlot {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
/// Why a send attempt was refused before any message was appended.
pub enum SendRejected {
    #[error("input is empty after trimming")]
    EmptyInput,
    #[error("a send is already in flight")]
    RequestInFlight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// How a completed send resolved.
pub enum SendOutcome {
    Answered,
    Fallback(ApiFailureKind),
}

#[derive(Debug)]
/// One widget session: thread, panel visibility, and the send slot.
pub struct ChatRuntime {
    thread: ChatThread,
    panel: PanelState,
    slot: SendSlot,
}

impl ChatRuntime {
    pub fn new(greeting: impl Into<String>) -> Self {
        Self {
            thread: ChatThread::with_greeting(greeting),
            panel: PanelState::Closed,
            slot: SendSlot::Idle,
        }
    }

    pub fn thread(&self) -> &ChatThread {
        &self.thread
    }

    pub fn panel(&self) -> PanelState {
        self.panel
    }

    pub fn slot(&self) -> SendSlot {
        self.slot
    }

    /// Toggles panel visibility. Never touches the thread.
    pub fn toggle_panel(&mut self) -> PanelState {
        self.panel = self.panel.toggled();
        self.panel
    }

    /// First half of the send contract.
    ///
    /// Validates the input, appends the user message synchronously, and takes
    /// the send slot. Callers perform the backend call with the returned
    /// question (without holding any lock on this runtime) and then hand the
    /// result to [`ChatRuntime::complete_send`]. Rejection leaves no trace in
    /// the thread.
    pub fn begin_send(&mut self, input: &str) -> Result<String, SendRejected> {
        let question = input.trim();
        if question.is_empty() {
            return Err(SendRejected::EmptyInput);
        }
        if self.slot == SendSlot::Pending {
            return Err(SendRejected::RequestInFlight);
        }

        self.thread.push_user(question);
        self.slot = SendSlot::Pending;
        Ok(question.to_string())
    }

    /// Second half of the send contract.
    ///
    /// Appends exactly one bot message — the answer on success, the fixed
    /// fallback on any failure — and releases the send slot. Failure kinds
    /// are logged but never shown to the user.
    pub fn complete_send(&mut self, result: Result<ChatAnswer, WispApiError>) -> SendOutcome {
        let outcome = match result {
            Ok(answer) => {
                self.thread.push_bot(answer.answer);
                SendOutcome::Answered
            }
            Err(error) => {
                let kind = error.kind();
                tracing::warn!(failure_kind = kind.as_str(), %error, "chat send failed");
                self.thread.push_bot(FALLBACK_REPLY);
                SendOutcome::Fallback(kind)
            }
        };
        self.slot = SendSlot::Idle;
        outcome
    }

    /// Runs the full send flow against `client` for sequential callers.
    pub async fn send(
        &mut self,
        client: &dyn BackendClient,
        input: &str,
    ) -> Result<SendOutcome, SendRejected> {
        let question = self.begin_send(input)?;
        let result = client.chat(&question).await;
        Ok(self.complete_send(result))
    }
}

impl Default for ChatRuntime {
    fn default() -> Self {
        Self::new(DEFAULT_GREETING)
    }
}
