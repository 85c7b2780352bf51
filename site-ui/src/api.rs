use async_trait::async_trait;
use gloo_net::http::Request;
use site_types::{ChatErrorBody, ChatReply, ChatRequest};

use crate::config::WidgetConfig;
use crate::cookie::read_cookie;
use crate::error::ChatError;

/// Sends one chat message and waits for the reply
#[async_trait(?Send)]
pub trait ChatTransport {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, ChatError>;
}

/// `fetch`-backed transport for the site's chat endpoint
#[derive(Debug, Clone)]
pub struct HttpTransport {
    endpoint: String,
    csrf_cookie: String,
    csrf_header: String,
    rate_limit_status: u16,
}

impl HttpTransport {
    pub fn new(config: &WidgetConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            csrf_cookie: config.csrf_cookie.clone(),
            csrf_header: config.csrf_header.clone(),
            rate_limit_status: config.rate_limit_status,
        }
    }

    /// Anti-forgery header to attach, only when the cookie is set
    pub fn csrf_header(&self, cookie: Option<String>) -> Option<(String, String)> {
        cookie.map(|token| (self.csrf_header.clone(), token))
    }
}

#[async_trait(?Send)]
impl ChatTransport for HttpTransport {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, ChatError> {
        let mut builder = Request::post(&self.endpoint);
        if let Some((name, token)) = self.csrf_header(read_cookie(&self.csrf_cookie)) {
            builder = builder.header(&name, &token);
        } else {
            log::warn!("No {} cookie; sending chat request without it", self.csrf_cookie);
        }

        let response = builder
            .json(request)
            .map_err(|e| ChatError::Transport(format!("Failed to serialize request: {e}")))?
            .send()
            .await
            .map_err(|e| ChatError::Transport(format!("Request failed: {e}")))?;

        let status = response.status();
        if status == self.rate_limit_status {
            return Err(ChatError::RateLimited);
        }

        let body = response
            .text()
            .await
            .map_err(|e| ChatError::Transport(format!("Failed to read body: {e}")))?;

        interpret_response(status, &body, self.rate_limit_status)
    }
}

/// Classify a chat API response by status, then body.
///
/// A body that is not JSON is treated like a dropped connection, whatever the
/// status, except for the rate limit which never looks at the body.
pub fn interpret_response(
    status: u16,
    body: &str,
    rate_limit_status: u16,
) -> Result<ChatReply, ChatError> {
    if status == rate_limit_status {
        return Err(ChatError::RateLimited);
    }

    if !(200..300).contains(&status) {
        let data = serde_json::from_str::<ChatErrorBody>(body)
            .map_err(|e| ChatError::Transport(format!("Failed to parse error body: {e}")))?;
        return Err(ChatError::Server {
            status,
            message: data.error,
        });
    }

    serde_json::from_str::<ChatReply>(body)
        .map_err(|e| ChatError::Transport(format!("Failed to parse JSON: {e}")))
}
