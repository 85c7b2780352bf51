use web_sys::Element;

pub const DEFAULT_CHAT_ENDPOINT: &str = "/api/chat/";
pub const DEFAULT_WELCOME_MESSAGE: &str =
    "Hi! I'm Techlynx Assistant. Ask me about our services, pricing, or anything else!";

/// Element ids the chat widget binds to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementIds {
    pub bubble: String,
    pub window: String,
    pub close: String,
    pub form: String,
    pub input: String,
    pub messages: String,
    pub typing: String,
    /// Optional backdrop; closes the widget when clicked
    pub overlay: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            bubble: "chat-bubble".to_string(),
            window: "chat-window".to_string(),
            close: "chat-close".to_string(),
            form: "chat-form".to_string(),
            input: "chat-input".to_string(),
            messages: "chat-messages".to_string(),
            typing: "typing-indicator".to_string(),
            overlay: "chat-overlay".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    /// Chat API path, same origin
    pub endpoint: String,
    /// Cookie carrying the anti-forgery token
    pub csrf_cookie: String,
    /// Header the token is echoed in
    pub csrf_header: String,
    /// `sessionStorage` key for the transcript
    pub storage_key: String,
    /// Longest accepted message, in characters
    pub max_message_chars: usize,
    /// Status the server uses for "query limit reached"
    pub rate_limit_status: u16,
    pub welcome_message: String,
    /// Delay before scrolling the message list, lets layout settle
    pub scroll_delay_ms: u32,
    pub ids: ElementIds,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_CHAT_ENDPOINT.to_string(),
            csrf_cookie: "csrftoken".to_string(),
            csrf_header: "X-CSRFToken".to_string(),
            storage_key: "chatbot_history".to_string(),
            max_message_chars: 500,
            rate_limit_status: 429,
            welcome_message: DEFAULT_WELCOME_MESSAGE.to_string(),
            scroll_delay_ms: 100,
            ids: ElementIds::default(),
        }
    }
}

impl WidgetConfig {
    /// Apply `data-*` overrides carried by the page markup
    pub fn with_overrides(mut self, endpoint: Option<String>, welcome: Option<String>) -> Self {
        if let Some(endpoint) = endpoint.filter(|v| !v.trim().is_empty()) {
            self.endpoint = endpoint.trim().to_string();
        }
        if let Some(welcome) = welcome.filter(|v| !v.trim().is_empty()) {
            self.welcome_message = welcome;
        }
        self
    }

    /// Read `data-endpoint` and `data-welcome` from the chat window element
    pub fn from_element(element: &Element) -> Self {
        Self::default().with_overrides(
            element.get_attribute("data-endpoint"),
            element.get_attribute("data-welcome"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_page_contract() {
        let config = WidgetConfig::default();
        assert_eq!(config.endpoint, "/api/chat/");
        assert_eq!(config.csrf_cookie, "csrftoken");
        assert_eq!(config.storage_key, "chatbot_history");
        assert_eq!(config.max_message_chars, 500);
        assert_eq!(config.rate_limit_status, 429);
        assert_eq!(config.ids.typing, "typing-indicator");
    }

    #[test]
    fn overrides_ignore_blank_values() {
        let config = WidgetConfig::default().with_overrides(Some("  ".into()), None);
        assert_eq!(config.endpoint, DEFAULT_CHAT_ENDPOINT);
        assert_eq!(config.welcome_message, DEFAULT_WELCOME_MESSAGE);

        let config = WidgetConfig::default()
            .with_overrides(Some(" /chat/ ".into()), Some("Hello there".into()));
        assert_eq!(config.endpoint, "/chat/");
        assert_eq!(config.welcome_message, "Hello there");
    }
}
