use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, KeyboardEvent};

/// Attach `handler` to `target` for the lifetime of the page.
///
/// The closure is leaked on purpose: listeners installed at boot are never
/// removed and are cleaned up when the page unloads.
pub fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Listen for `keydown` and hand over the keyboard event
pub fn listen_keys<F>(target: &EventTarget, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut(&KeyboardEvent) + 'static,
{
    listen(target, "keydown", move |event: Event| {
        if let Some(key_event) = event.dyn_ref::<KeyboardEvent>() {
            handler(key_event);
        }
    })
}

/// Key chord that sends a chat message: Enter without Shift
pub fn is_send_chord(key: &str, shift: bool) -> bool {
    key == "Enter" && !shift
}

pub fn is_escape(key: &str) -> bool {
    key == "Escape"
}

/// Run `f` once the DOM is parsed
pub fn on_dom_ready<F>(f: F) -> Result<(), JsValue>
where
    F: FnOnce() + 'static,
{
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document on window"))?;

    if document.ready_state() != "loading" {
        f();
        return Ok(());
    }

    let mut f = Some(f);
    listen(&document, "DOMContentLoaded", move |_| {
        if let Some(f) = f.take() {
            f();
        }
    })
}
