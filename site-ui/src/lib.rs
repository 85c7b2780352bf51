pub mod api;
pub mod chat;
pub mod config;
pub mod cookie;
pub mod error;
pub mod format;
pub mod interop;
pub mod mobile_menu;
pub mod storage;
pub mod theme;

pub use api::*;
pub use chat::*;
pub use config::*;
pub use error::*;
pub use format::*;

/// Page entry point: theme first, then the DOM-bound widgets once parsed
pub fn boot() {
    theme::apply_stored_preference();
    if let Err(e) = theme::expose_toggle() {
        log::error!("Failed to expose dark mode toggle: {e:?}");
    }

    let ready = interop::on_dom_ready(|| {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document; site widgets not started");
            return;
        };

        if let Err(e) = mobile_menu::init(&document) {
            log::error!("Mobile menu: {e:?}");
        }

        if let Err(e) = chat::mount(&document) {
            log::error!("Chatbot: {e}");
        }
    });
    if let Err(e) = ready {
        log::error!("Failed to schedule site widgets: {e:?}");
    }
}
