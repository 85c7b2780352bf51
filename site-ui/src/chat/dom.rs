use gloo_timers::callback::Timeout;
use site_types::TranscriptEntry;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlTextAreaElement};

use crate::chat::controller::ChatView;
use crate::config::ElementIds;
use crate::error::MissingElement;
use crate::format::escape_html;

const HIDDEN: &str = "hidden";

const ROW_CLASS: &str = "flex gap-3";
const USER_ROW_CLASS: &str = "flex gap-3 justify-end";
const USER_BUBBLE_CLASS: &str =
    "bg-primary text-white rounded-2xl rounded-tr-none px-4 py-3 max-w-[80%] shadow-sm";
const BOT_BUBBLE_CLASS: &str =
    "bg-white dark:bg-slate-900 rounded-2xl rounded-tl-none px-4 py-3 max-w-[80%] shadow-sm";
const BOT_TEXT_CLASS: &str = "text-sm text-slate-700 dark:text-slate-300";
const BOT_AVATAR: &str = r#"<div class="size-8 bg-primary rounded-full flex items-center justify-center flex-shrink-0"><span class="material-symbols-outlined text-white text-sm">smart_toy</span></div>"#;

/// The chat input, either a single-line field or a textarea
#[derive(Debug, Clone)]
pub enum TextInput {
    Field(HtmlInputElement),
    Area(HtmlTextAreaElement),
}

impl TextInput {
    fn from_element(element: Element) -> Option<Self> {
        match element.dyn_into::<HtmlTextAreaElement>() {
            Ok(area) => Some(Self::Area(area)),
            Err(element) => element.dyn_into::<HtmlInputElement>().ok().map(Self::Field),
        }
    }

    pub fn value(&self) -> String {
        match self {
            Self::Field(input) => input.value(),
            Self::Area(area) => area.value(),
        }
    }

    pub fn set_value(&self, value: &str) {
        match self {
            Self::Field(input) => input.set_value(value),
            Self::Area(area) => area.set_value(value),
        }
    }

    pub fn element(&self) -> &HtmlElement {
        match self {
            Self::Field(input) => input,
            Self::Area(area) => area,
        }
    }
}

/// Every page element the widget needs, resolved up front
#[derive(Debug, Clone)]
pub struct ChatElements {
    pub bubble: Element,
    pub window: Element,
    pub close: Element,
    pub form: Element,
    pub input: TextInput,
    pub messages: Element,
    pub typing: Element,
    pub overlay: Option<Element>,
}

impl ChatElements {
    pub fn from_document(document: &Document, ids: &ElementIds) -> Result<Self, MissingElement> {
        let find = |id: &str| {
            document
                .get_element_by_id(id)
                .ok_or_else(|| MissingElement(id.to_string()))
        };

        let bubble = find(&ids.bubble)?;
        let window = find(&ids.window)?;
        let close = find(&ids.close)?;
        let form = find(&ids.form)?;
        let input = TextInput::from_element(find(&ids.input)?)
            .ok_or_else(|| MissingElement(ids.input.clone()))?;

        Ok(Self {
            bubble,
            window,
            close,
            form,
            input,
            messages: find(&ids.messages)?,
            typing: find(&ids.typing)?,
            overlay: document.get_element_by_id(&ids.overlay),
        })
    }
}

pub fn row_class(entry: &TranscriptEntry) -> &'static str {
    if entry.is_user() {
        USER_ROW_CLASS
    } else {
        ROW_CLASS
    }
}

/// Inner markup of one transcript row. User text is escaped here; bot text
/// is already safe markup.
pub fn entry_markup(entry: &TranscriptEntry) -> String {
    if entry.is_user() {
        format!(
            r#"<div class="{USER_BUBBLE_CLASS}"><p class="text-sm">{}</p></div>"#,
            escape_html(&entry.text)
        )
    } else {
        bot_markup(&entry.text, entry.is_error)
    }
}

fn bot_markup(html: &str, is_error: bool) -> String {
    let (bubble_extra, text_extra) = if is_error {
        (" border-2 border-red-300", " text-red-600 dark:text-red-400")
    } else {
        ("", "")
    };
    format!(
        r#"{BOT_AVATAR}<div class="{BOT_BUBBLE_CLASS}{bubble_extra}"><div class="{BOT_TEXT_CLASS}{text_extra}">{html}</div></div>"#
    )
}

/// The list as it looks with no conversation
pub fn welcome_markup(welcome: &str) -> String {
    format!(
        r#"<div class="{ROW_CLASS}">{}</div>"#,
        bot_markup(&escape_html(welcome), false)
    )
}

/// [`ChatView`] over the live page
pub struct DomChatView {
    document: Document,
    elements: ChatElements,
    scroll_delay_ms: u32,
}

impl DomChatView {
    pub fn new(document: Document, elements: ChatElements, scroll_delay_ms: u32) -> Self {
        Self {
            document,
            elements,
            scroll_delay_ms,
        }
    }
}

impl ChatView for DomChatView {
    fn show_window(&self) {
        let _ = self.elements.window.class_list().remove_1(HIDDEN);
        if let Some(overlay) = &self.elements.overlay {
            let _ = overlay.class_list().remove_1(HIDDEN);
        }
    }

    fn hide_window(&self) {
        let _ = self.elements.window.class_list().add_1(HIDDEN);
        if let Some(overlay) = &self.elements.overlay {
            let _ = overlay.class_list().add_1(HIDDEN);
        }
    }

    fn focus_input(&self) {
        let _ = self.elements.input.element().focus();
    }

    fn input_value(&self) -> String {
        self.elements.input.value()
    }

    fn clear_input(&self) {
        self.elements.input.set_value("");
    }

    fn append_entry(&self, entry: &TranscriptEntry) {
        let row = match self.document.create_element("div") {
            Ok(row) => row,
            Err(e) => {
                log::error!("Failed to create chat row: {e:?}");
                return;
            }
        };
        row.set_class_name(row_class(entry));
        row.set_inner_html(&entry_markup(entry));
        if let Err(e) = self.elements.messages.append_child(&row) {
            log::error!("Failed to append chat row: {e:?}");
        }
    }

    fn reset_transcript(&self, welcome: &str) {
        self.elements.messages.set_inner_html(&welcome_markup(welcome));
    }

    fn set_typing(&self, visible: bool) {
        let classes = self.elements.typing.class_list();
        let _ = if visible {
            classes.remove_1(HIDDEN)
        } else {
            classes.add_1(HIDDEN)
        };
    }

    fn scroll_to_bottom(&self) {
        let messages = self.elements.messages.clone();
        Timeout::new(self.scroll_delay_ms, move || {
            messages.set_scroll_top(messages.scroll_height());
        })
        .forget();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_rows_are_right_aligned_and_escaped() {
        let entry = TranscriptEntry::user("<script>x</script>");
        assert_eq!(row_class(&entry), "flex gap-3 justify-end");

        let html = entry_markup(&entry);
        assert!(html.contains("bg-primary text-white"));
        assert!(html.contains("&lt;script&gt;x&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn bot_rows_insert_markup_as_is() {
        let entry = TranscriptEntry::bot("<p><strong>Hi</strong></p>");
        assert_eq!(row_class(&entry), "flex gap-3");

        let html = entry_markup(&entry);
        assert!(html.contains("smart_toy"));
        assert!(html.contains("<p><strong>Hi</strong></p>"));
        assert!(!html.contains("border-red-300"));
    }

    #[test]
    fn error_rows_are_styled_as_errors() {
        let html = entry_markup(&TranscriptEntry::error("<p>Network error.</p>"));
        assert!(html.contains("border-2 border-red-300"));
        assert!(html.contains("text-red-600 dark:text-red-400"));
    }

    #[test]
    fn welcome_is_a_single_escaped_bot_row() {
        let html = welcome_markup("Hi! I'm <the> assistant");
        assert!(html.starts_with(r#"<div class="flex gap-3">"#));
        assert!(html.contains("Hi! I&#x27;m &lt;the&gt; assistant"));
        assert_eq!(html.matches("smart_toy").count(), 1);
    }
}
