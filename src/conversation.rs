//! Conversation state: the message list, the pending input and the
//! sending flag.
//!
//! Nothing here does I/O. `submit` hands back an [`Outgoing`] request for
//! the caller to send, and the caller feeds the eventual [`Reply`] into
//! `complete`.

use crate::backend::BackendResult;
use crate::message::Message;

/// Agent message shown at start-up and restored by reset.
pub const GREETING: &str =
    "Hi — I can help schedule appointments. Say \"I need to book\" to start.";

/// Agent message appended when a request fails for any reason.
pub const BACKEND_ERROR_TEXT: &str = "Error: could not reach backend.";

/// A message accepted by `submit`, waiting to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outgoing {
    /// Conversation generation the request belongs to.
    pub generation: u64,
    /// Trimmed user text.
    pub text: String,
}

/// The single outcome of an outgoing request.
#[derive(Debug, Clone)]
pub struct Reply {
    pub generation: u64,
    pub result: BackendResult<String>,
}

/// What `complete` did with a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyOutcome {
    /// The reply text was appended.
    Appended,
    /// The fallback error text was appended.
    Failed,
    /// The reply belonged to a conversation that was reset; dropped.
    Stale,
}

/// Convert a character index to a byte index for UTF-8 safe edits.
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

/// An ordered, append-only list of messages plus transient input state.
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<Message>,
    input: String,
    /// Cursor position in input, counted in chars
    cursor: usize,
    in_flight: usize,
    generation: u64,
    /// Bumped on every change to `messages`
    revision: u64,
    greeting: String,
    discard_stale: bool,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new(GREETING)
    }
}

impl Conversation {
    /// Create a conversation seeded with the given greeting.
    pub fn new(greeting: impl Into<String>) -> Self {
        let greeting = greeting.into();
        Self {
            messages: vec![Message::agent(greeting.clone())],
            input: String::new(),
            cursor: 0,
            in_flight: 0,
            generation: 0,
            revision: 0,
            greeting,
            discard_stale: true,
        }
    }

    /// Choose whether replies issued before a reset are dropped.
    pub fn with_discard_stale_replies(mut self, discard: bool) -> Self {
        self.discard_stale = discard;
        self
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn greeting(&self) -> &str {
        &self.greeting
    }

    pub fn pending_input(&self) -> &str {
        &self.input
    }

    /// Cursor position in the pending input, in chars.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// True while at least one request is outstanding.
    pub fn is_sending(&self) -> bool {
        self.in_flight > 0
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Changes whenever the message list changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn push(&mut self, message: Message) {
        self.messages.push(message);
        self.revision += 1;
    }

    // ─────────────────────────────────────────────────────────────────────
    // Input editing
    // ─────────────────────────────────────────────────────────────────────

    /// Insert a character at the cursor.
    pub fn insert_char(&mut self, c: char) {
        let at = char_to_byte_index(&self.input, self.cursor);
        self.input.insert(at, c);
        self.cursor += 1;
    }

    /// Insert a line break at the cursor.
    pub fn insert_newline(&mut self) {
        self.insert_char('\n');
    }

    /// Replace the pending input, moving the cursor to the end.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.cursor = self.input.chars().count();
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let at = char_to_byte_index(&self.input, self.cursor - 1);
            self.input.remove(at);
            self.cursor -= 1;
        }
    }

    /// Delete the character under the cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.input.chars().count() {
            let at = char_to_byte_index(&self.input, self.cursor);
            self.input.remove(at);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.input.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor = self.input.chars().count();
    }

    fn clear_input(&mut self) {
        self.input.clear();
        self.cursor = 0;
    }

    // ─────────────────────────────────────────────────────────────────────
    // Operations
    // ─────────────────────────────────────────────────────────────────────

    /// Submit the pending input.
    ///
    /// Blank input (after trimming) is a no-op and returns `None`.
    /// Otherwise the trimmed text is appended as a user message, the input
    /// is cleared, the conversation enters the sending state, and the
    /// request to send is returned.
    pub fn submit(&mut self) -> Option<Outgoing> {
        let text = self.input.trim();
        if text.is_empty() {
            return None;
        }
        let text = text.to_string();

        self.push(Message::user(text.clone()));
        self.clear_input();
        self.in_flight += 1;

        Some(Outgoing {
            generation: self.generation,
            text,
        })
    }

    /// Record the outcome of a request issued by `submit`.
    ///
    /// Always leaves the sending state for that request, whatever the
    /// outcome.
    pub fn complete(&mut self, reply: Reply) -> ReplyOutcome {
        self.in_flight = self.in_flight.saturating_sub(1);

        if self.discard_stale && reply.generation != self.generation {
            tracing::debug!(
                reply_generation = reply.generation,
                current_generation = self.generation,
                "dropping reply issued before reset"
            );
            return ReplyOutcome::Stale;
        }

        match reply.result {
            Ok(text) => {
                self.push(Message::agent(text));
                ReplyOutcome::Appended
            }
            Err(e) => {
                tracing::warn!(kind = e.kind(), error = %e, "chat request failed");
                self.push(Message::agent(BACKEND_ERROR_TEXT));
                ReplyOutcome::Failed
            }
        }
    }

    /// Restore the seeded greeting and clear the pending input.
    ///
    /// In-flight requests are not cancelled and the sending state is left
    /// as is.
    pub fn reset(&mut self) {
        self.messages.clear();
        self.messages.push(Message::agent(self.greeting.clone()));
        self.clear_input();
        self.generation += 1;
        self.revision += 1;
    }
}
