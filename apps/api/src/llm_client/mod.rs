/// LLM Client: the single point of entry for all chat-completion calls.
///
/// ARCHITECTURAL RULE: No other module may call the completion API directly.
/// All LLM interactions MUST go through this module.
///
/// One request per call. No retry, no backoff.
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

pub mod prompts;

pub const DEFAULT_TEMPERATURE: f32 = 0.2;
const MAX_TOKENS: u32 = 2000;
/// Provider error code sent with a 429 when the account has no credit left.
const INSUFFICIENT_QUOTA: &str = "insufficient_quota";
/// Returned when the first choice carries no message content.
pub const NO_ANSWER: &str = "Не вдалося отримати відповідь від AI";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("OpenAI API key not found. Please enter your API key in settings.")]
    MissingApiKey,

    #[error(
        "QUOTA EXCEEDED: Your OpenAI API key has no remaining credits. \
         Please add funds at https://platform.openai.com/usage or upgrade your plan."
    )]
    QuotaExceeded,

    #[error("OpenAI API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Model and endpoint shared by every call a client makes.
#[derive(Debug, Clone)]
pub struct CompletionSettings {
    pub api_url: String,
    pub model: String,
    pub temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Content of the first choice, verbatim.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

/// Wraps the chat-completion API for one API key.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    settings: CompletionSettings,
}

impl LlmClient {
    /// `client` is the process-wide HTTP client; its pool is shared.
    pub fn new(client: Client, api_key: String, settings: CompletionSettings) -> Self {
        Self {
            client,
            api_key,
            settings,
        }
    }

    pub fn model(&self) -> &str {
        &self.settings.model
    }

    /// Sends `prompt` with `system` as the system message and returns the
    /// first choice's content.
    pub async fn complete(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        let response = self.call(prompt, system).await?;
        Ok(response.text().unwrap_or(NO_ANSWER).to_string())
    }

    /// Makes a raw call to the completion API, returning the full response object.
    pub async fn call(&self, prompt: &str, system: &str) -> Result<ChatResponse, LlmError> {
        if self.api_key.trim().is_empty() {
            return Err(LlmError::MissingApiKey);
        }

        let request_body = ChatRequest {
            model: &self.settings.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.settings.temperature,
            max_tokens: MAX_TOKENS,
        };

        debug!("Calling chat completion (model: {})", self.settings.model);

        let response = self
            .client
            .post(&self.settings.api_url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Chat completion returned {}: {}", status, body);
            return Err(classify_error(status, &body));
        }

        let chat: ChatResponse = response.json().await?;

        if let Some(usage) = &chat.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(chat)
    }
}

/// Maps a non-success provider response to an error. Quota exhaustion gets
/// its own variant; everything else keeps the provider's message.
pub fn classify_error(status: StatusCode, body: &str) -> LlmError {
    let parsed = serde_json::from_str::<ProviderError>(body).ok();

    if status == StatusCode::TOO_MANY_REQUESTS
        && parsed
            .as_ref()
            .and_then(|e| e.error.code.as_deref())
            .is_some_and(|code| code == INSUFFICIENT_QUOTA)
    {
        return LlmError::QuotaExceeded;
    }

    let message = parsed
        .and_then(|e| e.error.message)
        .filter(|m| !m.is_empty())
        .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_string()))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        });

    LlmError::Api {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> CompletionSettings {
        CompletionSettings {
            // Port 9 (discard): any request here would fail loudly.
            api_url: "http://127.0.0.1:9/v1/chat/completions".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    #[test]
    fn test_quota_exhaustion_is_distinct() {
        let body = r#"{"error":{"message":"You exceeded your current quota","code":"insufficient_quota"}}"#;
        let err = classify_error(StatusCode::TOO_MANY_REQUESTS, body);
        assert!(matches!(err, LlmError::QuotaExceeded));
        assert!(err.to_string().contains("QUOTA EXCEEDED"));
    }

    #[test]
    fn test_plain_rate_limit_is_not_quota() {
        let body = r#"{"error":{"message":"Rate limit reached","code":"rate_limit_exceeded"}}"#;
        let err = classify_error(StatusCode::TOO_MANY_REQUESTS, body);
        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message, "Rate limit reached");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_quota_code_on_other_status_is_not_quota() {
        let body = r#"{"error":{"message":"nope","code":"insufficient_quota"}}"#;
        let err = classify_error(StatusCode::BAD_REQUEST, body);
        assert!(matches!(err, LlmError::Api { status: 400, .. }));
        assert!(!err.to_string().contains("QUOTA"));
    }

    #[test]
    fn test_non_json_body_is_used_as_message() {
        let err = classify_error(StatusCode::BAD_GATEWAY, "upstream down");
        assert_eq!(
            err.to_string(),
            "OpenAI API error (status 502): upstream down"
        );
    }

    #[test]
    fn test_empty_body_falls_back_to_status_text() {
        let err = classify_error(StatusCode::INTERNAL_SERVER_ERROR, "");
        assert!(err.to_string().contains("Internal Server Error"));
    }

    #[test]
    fn test_response_text_takes_first_choice() {
        let json = r#"{"choices":[{"message":{"content":"first"}},{"message":{"content":"second"}}]}"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), Some("first"));
    }

    #[test]
    fn test_response_without_choices_has_no_text() {
        let response: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert_eq!(response.text(), None);
    }

    #[tokio::test]
    async fn test_empty_key_fails_before_network() {
        let client = LlmClient::new(Client::new(), "  ".to_string(), settings());
        let err = client.complete("hello", "system").await.unwrap_err();
        assert!(matches!(err, LlmError::MissingApiKey));
    }
}
