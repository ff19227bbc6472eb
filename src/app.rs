use std::sync::Arc;

use ratatui::layout::Rect;
use ratatui::widgets::ScrollbarState;
use tokio::sync::{mpsc, oneshot};

use crate::backend::{ChatBackend, ChatRequest};
use crate::config::Config;
use crate::conversation::{Conversation, Outgoing, Reply, ReplyOutcome};

/// Reachability of the backend, from the start-up probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendStatus {
    /// Probe still running
    Checking,
    /// The server answered
    Reachable,
    /// The probe failed
    Unreachable,
}

/// Scroll state for the message list, counted in rendered lines.
#[derive(Debug, Default)]
pub struct ScrollState {
    /// First visible line
    pub offset: usize,
    /// Largest valid offset for the last rendered frame
    pub max_offset: usize,
    /// Conversation revision seen by the last frame
    seen_revision: Option<u64>,
    /// Scrollbar state for ratatui
    pub scrollbar: ScrollbarState,
}

impl ScrollState {
    /// Scroll up one line.
    pub fn scroll_up(&mut self) {
        self.offset = self.offset.saturating_sub(1);
    }

    /// Scroll down one line.
    pub fn scroll_down(&mut self) {
        if self.offset < self.max_offset {
            self.offset += 1;
        }
    }

    /// Scroll up by page size.
    pub fn scroll_page_up(&mut self, page_size: usize) {
        self.offset = self.offset.saturating_sub(page_size);
    }

    /// Scroll down by page size.
    pub fn scroll_page_down(&mut self, page_size: usize) {
        self.offset = (self.offset + page_size).min(self.max_offset);
    }

    /// Scroll to top.
    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
    }

    /// Scroll to bottom.
    pub fn scroll_to_bottom(&mut self) {
        self.offset = self.max_offset;
    }

    /// Fit the offset to a freshly laid out list.
    ///
    /// Jumps to the newest line whenever the conversation changed since the
    /// previous frame.
    pub fn sync(&mut self, total_lines: usize, viewport: usize, revision: u64) {
        self.max_offset = total_lines.saturating_sub(viewport);
        if self.seen_revision != Some(revision) {
            self.offset = self.max_offset;
            self.seen_revision = Some(revision);
        }
        self.offset = self.offset.min(self.max_offset);
        self.scrollbar = self
            .scrollbar
            .content_length(self.max_offset + 1)
            .position(self.offset);
    }

    pub fn is_at_bottom(&self) -> bool {
        self.offset == self.max_offset
    }
}

/// Screen positions of the clickable controls, filled in by the renderer.
#[derive(Debug, Default, Clone, Copy)]
pub struct ControlLayout {
    pub send: Rect,
    pub reset: Rect,
}

impl ControlLayout {
    fn hit(rect: Rect, column: u16, row: u16) -> bool {
        column >= rect.x
            && column < rect.x.saturating_add(rect.width)
            && row >= rect.y
            && row < rect.y.saturating_add(rect.height)
    }

    pub fn hits_send(&self, column: u16, row: u16) -> bool {
        Self::hit(self.send, column, row)
    }

    pub fn hits_reset(&self, column: u16, row: u16) -> bool {
        Self::hit(self.reset, column, row)
    }
}

/// Animation-related state for UI effects.
#[derive(Debug)]
pub struct AnimationState {
    /// Cursor blink visibility state
    pub cursor_visible: bool,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self {
            cursor_visible: true,
        }
    }
}

impl AnimationState {
    /// Toggle cursor visibility for blinking effect.
    pub fn toggle_cursor(&mut self) {
        self.cursor_visible = !self.cursor_visible;
    }
}

/// Application state for the chat client.
pub struct App {
    /// Messages, pending input and sending flag
    pub conversation: Conversation,
    /// Scroll state: offset and scrollbar
    pub scroll: ScrollState,
    /// Animation state: cursor blink
    pub animation: AnimationState,
    /// Where the Send and Reset controls were last drawn
    pub controls: ControlLayout,
    /// Result of the start-up probe
    pub backend_status: BackendStatus,
    /// Whether the terminal reports modifiers on Enter (kitty protocol)
    pub keyboard_enhanced: bool,
    backend: Arc<dyn ChatBackend>,
    user_id: String,
    reply_tx: mpsc::UnboundedSender<Reply>,
    reply_rx: mpsc::UnboundedReceiver<Reply>,
    /// Receiver for the async reachability probe
    probe_rx: Option<oneshot::Receiver<bool>>,
}

impl App {
    /// Create a new App talking to the given backend.
    pub fn new(backend: Arc<dyn ChatBackend>, config: &Config) -> Self {
        let (reply_tx, reply_rx) = mpsc::unbounded_channel();
        let conversation = Conversation::new(config.behavior.greeting.clone())
            .with_discard_stale_replies(config.behavior.discard_stale_replies);

        Self {
            conversation,
            scroll: ScrollState::default(),
            animation: AnimationState::default(),
            controls: ControlLayout::default(),
            backend_status: BackendStatus::Checking,
            keyboard_enhanced: false,
            backend,
            user_id: config.backend.user_id.clone(),
            reply_tx,
            reply_rx,
            probe_rx: None,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn is_sending(&self) -> bool {
        self.conversation.is_sending()
    }

    /// Toggle cursor visibility for blinking effect.
    pub fn toggle_cursor(&mut self) {
        self.animation.toggle_cursor();
    }

    /// Submit the pending input. Returns whether a request was issued.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&mut self) -> bool {
        match self.conversation.submit() {
            Some(outgoing) => {
                self.spawn_request(outgoing);
                true
            }
            None => false,
        }
    }

    /// Submit from the Send control, which is disabled while sending.
    pub fn click_send(&mut self) -> bool {
        if self.is_sending() {
            return false;
        }
        self.submit()
    }

    /// Restore the greeting and clear the input.
    pub fn reset(&mut self) {
        self.conversation.reset();
        tracing::info!(
            generation = self.conversation.generation(),
            in_flight = self.conversation.in_flight(),
            "conversation reset"
        );
    }

    fn spawn_request(&self, outgoing: Outgoing) {
        let backend = self.backend.clone();
        let tx = self.reply_tx.clone();
        let request = ChatRequest::new(self.user_id.clone(), outgoing.text);
        let generation = outgoing.generation;

        tracing::info!(
            generation,
            chars = request.message.chars().count(),
            endpoint = %backend.describe(),
            "sending chat message"
        );

        tokio::spawn(async move {
            let result = backend.send_message(request).await;
            // The receiver lives as long as the App; a closed channel means
            // the UI is gone and the reply has nowhere to go.
            let _ = tx.send(Reply { generation, result });
        });
    }

    /// Apply every reply that has arrived. Call this in the event loop.
    pub fn process_replies(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(reply) = self.reply_rx.try_recv() {
            self.apply_reply(reply);
            applied += 1;
        }
        applied
    }

    /// Wait for the next reply and apply it.
    pub async fn next_reply(&mut self) -> Option<ReplyOutcome> {
        let reply = self.reply_rx.recv().await?;
        Some(self.apply_reply(reply))
    }

    fn apply_reply(&mut self, reply: Reply) -> ReplyOutcome {
        let generation = reply.generation;
        let outcome = self.conversation.complete(reply);
        tracing::info!(generation, ?outcome, "chat reply handled");
        outcome
    }

    /// Start the background reachability probe.
    pub fn start_probe(&mut self) {
        let (tx, rx) = oneshot::channel();
        let backend = self.backend.clone();
        self.backend_status = BackendStatus::Checking;
        self.probe_rx = Some(rx);

        tokio::spawn(async move {
            let reachable = match backend.probe().await {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!(error = %e, endpoint = %backend.describe(), "backend probe failed");
                    false
                }
            };
            let _ = tx.send(reachable);
        });
    }

    /// Pick up the probe result if it is ready. Call this in the event loop.
    pub fn process_probe(&mut self) -> bool {
        let Some(rx) = &mut self.probe_rx else {
            return false;
        };
        match rx.try_recv() {
            Ok(reachable) => {
                self.backend_status = if reachable {
                    BackendStatus::Reachable
                } else {
                    BackendStatus::Unreachable
                };
                self.probe_rx = None;
                true
            }
            Err(oneshot::error::TryRecvError::Empty) => false,
            Err(oneshot::error::TryRecvError::Closed) => {
                self.backend_status = BackendStatus::Unreachable;
                self.probe_rx = None;
                true
            }
        }
    }
}
