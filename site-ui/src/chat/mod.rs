//! Chat widget
//!
//! A floating bubble that opens a small chat window. Messages are posted to
//! the site's chat endpoint and the replies rendered inline. The conversation
//! lives for the tab session and is discarded whenever the window is closed.

pub mod controller;
pub mod dom;
pub mod state;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsValue;
use web_sys::Document;

pub use controller::{submit, validate_message, ChatView, ChatWidget};
pub use dom::{ChatElements, DomChatView};
pub use state::{WidgetEvent, WidgetState};

use crate::api::{ChatTransport, HttpTransport};
use crate::config::{ElementIds, WidgetConfig};
use crate::error::MissingElement;
use crate::interop::{is_escape, is_send_chord, listen, listen_keys};
use crate::storage::{session_or_memory, TranscriptStore};

pub type PageChatWidget = ChatWidget<DomChatView, Box<dyn TranscriptStore>>;

#[derive(Debug, thiserror::Error)]
pub enum MountError {
    #[error(transparent)]
    Missing(#[from] MissingElement),

    #[error("failed to bind chat listeners: {0}")]
    Listener(String),
}

impl From<JsValue> for MountError {
    fn from(value: JsValue) -> Self {
        Self::Listener(format!("{value:?}"))
    }
}

/// Resolve the widget's elements, build the controller and wire its events
pub fn mount(document: &Document) -> Result<Rc<RefCell<PageChatWidget>>, MountError> {
    let elements = ChatElements::from_document(document, &ElementIds::default())?;
    let config = WidgetConfig::from_element(&elements.window);
    let store = session_or_memory(&config.storage_key);
    let transport: Rc<dyn ChatTransport> = Rc::new(HttpTransport::new(&config));

    let view = DomChatView::new(document.clone(), elements.clone(), config.scroll_delay_ms);
    let widget = Rc::new(RefCell::new(ChatWidget::new(config, view, store)));

    bind(document, &elements, &widget, &transport)?;
    log::info!("Chat widget ready");
    Ok(widget)
}

fn spawn_submit(widget: &Rc<RefCell<PageChatWidget>>, transport: &Rc<dyn ChatTransport>) {
    let widget = widget.clone();
    let transport = transport.clone();
    wasm_bindgen_futures::spawn_local(async move {
        submit(&*widget, transport.as_ref()).await;
    });
}

fn bind(
    document: &Document,
    elements: &ChatElements,
    widget: &Rc<RefCell<PageChatWidget>>,
    transport: &Rc<dyn ChatTransport>,
) -> Result<(), JsValue> {
    let on_event = |event: WidgetEvent| {
        let widget = widget.clone();
        move |_: web_sys::Event| widget.borrow_mut().handle(event)
    };

    listen(&elements.bubble, "click", on_event(WidgetEvent::BubbleClicked))?;
    listen(&elements.close, "click", on_event(WidgetEvent::CloseClicked))?;
    if let Some(overlay) = &elements.overlay {
        listen(overlay, "click", on_event(WidgetEvent::OverlayClicked))?;
    }

    {
        let widget = widget.clone();
        let transport = transport.clone();
        listen(&elements.form, "submit", move |event| {
            event.prevent_default();
            spawn_submit(&widget, &transport);
        })?;
    }

    {
        let widget = widget.clone();
        let transport = transport.clone();
        listen_keys(elements.input.element(), move |event| {
            if is_send_chord(&event.key(), event.shift_key()) {
                event.prevent_default();
                spawn_submit(&widget, &transport);
            }
        })?;
    }

    let widget = widget.clone();
    listen_keys(document, move |event| {
        if is_escape(&event.key()) {
            widget.borrow_mut().handle(WidgetEvent::EscapePressed);
        }
    })
}
