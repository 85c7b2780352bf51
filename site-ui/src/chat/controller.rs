use std::cell::RefCell;

use site_types::{ChatReply, ChatRequest, TranscriptEntry};

use crate::api::ChatTransport;
use crate::chat::state::{WidgetEvent, WidgetState};
use crate::config::WidgetConfig;
use crate::error::{ChatError, StorageError, SubmitRejection};
use crate::format::render_reply;
use crate::storage::TranscriptStore;

/// The page surface the controller draws on
pub trait ChatView {
    fn show_window(&self);
    fn hide_window(&self);
    fn focus_input(&self);
    fn input_value(&self) -> String;
    fn clear_input(&self);
    /// Append one entry below the current ones
    fn append_entry(&self, entry: &TranscriptEntry);
    /// Drop every entry, leaving only the welcome message
    fn reset_transcript(&self, welcome: &str);
    fn set_typing(&self, visible: bool);
    fn scroll_to_bottom(&self);
}

/// Trim and bound-check a message before it is sent
pub fn validate_message(raw: &str, max_chars: usize) -> Result<String, SubmitRejection> {
    let message = raw.trim();
    if message.is_empty() {
        return Err(SubmitRejection::Empty);
    }
    let len = message.chars().count();
    if len > max_chars {
        return Err(SubmitRejection::TooLong {
            len,
            max: max_chars,
        });
    }
    Ok(message.to_string())
}

pub struct ChatWidget<V, S> {
    config: WidgetConfig,
    view: V,
    store: S,
    state: WidgetState,
    transcript: Vec<TranscriptEntry>,
}

impl<V: ChatView, S: TranscriptStore> ChatWidget<V, S> {
    pub fn new(config: WidgetConfig, view: V, store: S) -> Self {
        Self {
            config,
            view,
            store,
            state: WidgetState::Closed,
            transcript: Vec::new(),
        }
    }

    pub fn state(&self) -> WidgetState {
        self.state
    }

    /// Entries shown under the welcome message, oldest first
    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    pub fn handle(&mut self, event: WidgetEvent) {
        let next = self.state.next(event);
        match (self.state, next) {
            (WidgetState::Closed, WidgetState::Open) => self.enter_open(),
            (WidgetState::Open, WidgetState::Closed) => self.enter_closed(),
            _ => {}
        }
    }

    pub fn open(&mut self) {
        if !self.state.is_open() {
            self.handle(WidgetEvent::BubbleClicked);
        }
    }

    pub fn close(&mut self) {
        if self.state.is_open() {
            self.handle(WidgetEvent::CloseClicked);
        }
    }

    fn enter_open(&mut self) {
        self.state = WidgetState::Open;
        log::debug!("Chat opened");
        self.view.show_window();
        self.restore();
        self.view.focus_input();
        self.view.scroll_to_bottom();
    }

    fn enter_closed(&mut self) {
        self.state = WidgetState::Closed;
        log::debug!("Chat closed");
        self.clear();
        self.view.hide_window();
    }

    /// Validate the input and, when accepted, stage the request.
    ///
    /// Returns `None` when nothing should be sent. A too-long message leaves
    /// an error entry and keeps the input so the user can shorten it.
    pub fn begin_submit(&mut self) -> Option<ChatRequest> {
        let raw = self.view.input_value();
        match validate_message(&raw, self.config.max_message_chars) {
            Ok(message) => {
                self.view.clear_input();
                self.push(TranscriptEntry::user(message.clone()));
                self.view.set_typing(true);
                Some(ChatRequest::new(message))
            }
            Err(rejection) => {
                if let Some(text) = rejection.user_message() {
                    self.push(TranscriptEntry::error(render_reply(&text)));
                }
                None
            }
        }
    }

    /// Render the settled outcome of a request staged by [`Self::begin_submit`]
    pub fn finish_submit(&mut self, outcome: Result<ChatReply, ChatError>) {
        self.view.set_typing(false);
        let entry = match outcome {
            Ok(reply) => TranscriptEntry::bot(render_reply(&reply.response)),
            Err(err) => {
                log::warn!("Chat request failed: {err}");
                TranscriptEntry::error(render_reply(&err.user_message()))
            }
        };
        self.push(entry);
    }

    pub fn persist(&self) {
        if let Err(e) = self.store.save(&self.transcript) {
            log::warn!("Failed to save chat history: {e}");
        }
    }

    pub fn restore(&mut self) {
        let entries = match self.store.load() {
            Ok(Some(entries)) => entries,
            Ok(None) => return,
            Err(StorageError::Malformed(e)) => {
                log::error!("Error loading chat history: {e}");
                if let Err(e) = self.store.remove() {
                    log::warn!("Failed to drop unreadable chat history: {e}");
                }
                Vec::new()
            }
            Err(e) => {
                log::warn!("Chat history unavailable: {e}");
                return;
            }
        };

        self.view.reset_transcript(&self.config.welcome_message);
        for entry in &entries {
            self.view.append_entry(entry);
        }
        self.transcript = entries;
        self.view.scroll_to_bottom();
    }

    pub fn clear(&mut self) {
        if let Err(e) = self.store.remove() {
            log::warn!("Failed to clear chat history: {e}");
        }
        self.transcript.clear();
        self.view.reset_transcript(&self.config.welcome_message);
        log::debug!("Chat history cleared");
    }

    fn push(&mut self, entry: TranscriptEntry) {
        self.view.append_entry(&entry);
        self.transcript.push(entry);
        self.persist();
        self.view.scroll_to_bottom();
    }
}

/// Run one submission end to end.
///
/// The widget is only borrowed around the synchronous steps, never across the
/// network await, so other events keep flowing while the request is out.
pub async fn submit<V, S, T>(widget: &RefCell<ChatWidget<V, S>>, transport: &T)
where
    V: ChatView,
    S: TranscriptStore,
    T: ChatTransport + ?Sized,
{
    let request = widget.borrow_mut().begin_submit();
    let Some(request) = request else {
        return;
    };

    let outcome = transport.send(&request).await;
    widget.borrow_mut().finish_submit(outcome);
}
