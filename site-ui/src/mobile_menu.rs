use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement};

use crate::interop::{is_escape, listen, listen_keys};

const CLOSED_CLASS: &str = "translate-x-full";
const HIDDEN: &str = "hidden";
const LINK_CLOSE_DELAY_MS: u32 = 100;

pub struct MenuIds {
    pub button: &'static str,
    pub menu: &'static str,
    pub overlay: &'static str,
    pub close: &'static str,
}

impl Default for MenuIds {
    fn default() -> Self {
        Self {
            button: "mobile-menu-button",
            menu: "mobile-menu",
            overlay: "mobile-menu-overlay",
            close: "mobile-menu-close",
        }
    }
}

/// Slide-in navigation panel
pub struct MobileMenu {
    button: Element,
    menu: Element,
    overlay: Element,
    close: Element,
    body: Option<HtmlElement>,
}

impl MobileMenu {
    /// `None` when the page has no mobile menu
    pub fn from_document(document: &Document, ids: &MenuIds) -> Option<Self> {
        Some(Self {
            button: document.get_element_by_id(ids.button)?,
            menu: document.get_element_by_id(ids.menu)?,
            overlay: document.get_element_by_id(ids.overlay)?,
            close: document.get_element_by_id(ids.close)?,
            body: document.body(),
        })
    }

    pub fn is_open(&self) -> bool {
        !self.menu.class_list().contains(CLOSED_CLASS)
    }

    pub fn open(&self) {
        let _ = self.menu.class_list().remove_1(CLOSED_CLASS);
        let _ = self.overlay.class_list().remove_1(HIDDEN);
        if let Some(body) = &self.body {
            let _ = body.style().set_property("overflow", "hidden");
        }
    }

    pub fn close(&self) {
        let _ = self.menu.class_list().add_1(CLOSED_CLASS);
        let _ = self.overlay.class_list().add_1(HIDDEN);
        if let Some(body) = &self.body {
            let _ = body.style().remove_property("overflow");
        }
    }
}

fn bind(menu: &Rc<MobileMenu>, document: &Document) -> Result<(), JsValue> {
    let handle = menu.clone();
    listen(&menu.button, "click", move |_| handle.open())?;
    let handle = menu.clone();
    listen(&menu.close, "click", move |_| handle.close())?;
    let handle = menu.clone();
    listen(&menu.overlay, "click", move |_| handle.close())?;

    let links = menu.menu.query_selector_all("a")?;
    for i in 0..links.length() {
        let Some(link) = links.get(i) else {
            continue;
        };
        let handle = menu.clone();
        listen(&link, "click", move |_| {
            let handle = handle.clone();
            Timeout::new(LINK_CLOSE_DELAY_MS, move || handle.close()).forget();
        })?;
    }

    let handle = menu.clone();
    listen_keys(document, move |event| {
        if is_escape(&event.key()) && handle.is_open() {
            handle.close();
        }
    })
}

/// Wire the mobile menu if the page has one
pub fn init(document: &Document) -> Result<(), JsValue> {
    let Some(menu) = MobileMenu::from_document(document, &MenuIds::default()) else {
        log::debug!("No mobile menu on this page");
        return Ok(());
    };
    bind(&Rc::new(menu), document)
}
