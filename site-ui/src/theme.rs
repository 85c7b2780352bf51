//! Dark mode toggle.
//!
//! Reads the preference from `localStorage` and applies the `dark` class to
//! the `<html>` element. Toggling writes the new state back.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

pub const DARK_CLASS: &str = "dark";
const DARK_MODE_KEY: &str = "darkMode";
const TOGGLE_GLOBAL: &str = "toggleDarkMode";

/// Only the exact string `"true"` selects dark mode
pub fn is_dark_preference(stored: Option<&str>) -> bool {
    stored == Some("true")
}

pub fn preference_value(dark: bool) -> &'static str {
    if dark {
        "true"
    } else {
        "false"
    }
}

fn root_element() -> Option<web_sys::Element> {
    web_sys::window()?.document()?.document_element()
}

pub fn get_cached_preference() -> Option<String> {
    web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(DARK_MODE_KEY).ok().flatten())
}

fn set_cached_preference(dark: bool) {
    let Some(storage) = web_sys::window().and_then(|window| window.local_storage().ok().flatten())
    else {
        log::debug!("localStorage unavailable; dark mode preference not saved");
        return;
    };
    if let Err(e) = storage.set_item(DARK_MODE_KEY, preference_value(dark)) {
        log::debug!("Failed to save dark mode preference: {e:?}");
    }
}

pub fn is_dark() -> bool {
    root_element()
        .map(|root| root.class_list().contains(DARK_CLASS))
        .unwrap_or(false)
}

/// Apply the saved preference, run before first paint
pub fn apply_stored_preference() {
    if !is_dark_preference(get_cached_preference().as_deref()) {
        return;
    }
    if let Some(root) = root_element() {
        let _ = root.class_list().add_1(DARK_CLASS);
    }
}

/// Flip dark mode and remember the choice. Returns the new state.
pub fn toggle_dark_mode() -> bool {
    let Some(root) = root_element() else {
        return false;
    };
    let dark = root.class_list().toggle(DARK_CLASS).unwrap_or(false);
    set_cached_preference(dark);
    log::debug!("Dark mode {}", if dark { "on" } else { "off" });
    dark
}

/// Publish `toggleDarkMode()` on `window` for inline `onclick` handlers
pub fn expose_toggle() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global `window`"))?;
    let toggle = Closure::wrap(Box::new(toggle_dark_mode) as Box<dyn FnMut() -> bool>);
    js_sys::Reflect::set(&window, &JsValue::from_str(TOGGLE_GLOBAL), toggle.as_ref())?;
    toggle.forget();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_true_means_dark() {
        assert!(is_dark_preference(Some("true")));
        for stored in [None, Some("false"), Some("TRUE"), Some("1"), Some("")] {
            assert!(!is_dark_preference(stored));
        }
    }

    #[test]
    fn preference_round_trips() {
        assert!(is_dark_preference(Some(preference_value(true))));
        assert!(!is_dark_preference(Some(preference_value(false))));
    }
}
