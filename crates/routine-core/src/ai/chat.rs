use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ChatError;
use crate::state::ChatMessage;

pub const DEFAULT_MAX_TOKENS: u32 = 200;

#[derive(Serialize)]
struct ChatRequest<'a> {
    messages: &'a [ChatMessage],
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReplyMessage,
}

#[derive(Deserialize)]
struct ChatReplyMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

/// Client for a chat completion endpoint answering with `choices[0].message.content`
#[derive(Clone)]
pub struct ChatClient {
    client: Client,
    endpoint: String,
    max_tokens: u32,
}

impl ChatClient {
    pub fn new(endpoint: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_timeout(endpoint: &str, timeout: Duration) -> Result<Self, ChatError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        })
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends the whole transcript and returns the assistant reply text
    pub async fn send(&self, messages: &[ChatMessage]) -> Result<String, ChatError> {
        let request = ChatRequest {
            messages,
            max_tokens: self.max_tokens,
        };

        debug!(endpoint = %self.endpoint, messages = messages.len(), "sending chat request");
        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "chat endpoint returned an error");
            return Err(ChatError::Status { status, body });
        }

        let body = response.text().await?;
        let chat_response: ChatResponse = serde_json::from_str(&body)?;
        chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(ChatError::EmptyReply)
    }
}
