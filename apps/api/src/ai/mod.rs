//! AI service: pluggable, trait-based strategies for the two AI tasks.
//!
//! * `CannedAi`: fixed demo text, no network.
//! * `ChatCompletionAi`: one chat-completion call per task.
//! * `FallbackAi`: wraps a real strategy and degrades to canned text on failure.
//!
//! `select_backend` picks canned vs real from the presence of a key.
//! `AppState` reaches it through an `AiProvider`, built once in `main`.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use tracing::warn;

use crate::credentials::ApiKey;
use crate::llm_client::{CompletionSettings, LlmClient, LlmError};
use crate::models::candidate::CandidateProfile;

pub mod canned;
pub mod chat;
pub mod prompts;

pub use canned::CannedAi;
pub use chat::ChatCompletionAi;

/// The AI service trait. Screens and proxies hold an `Arc<dyn AiService>`.
#[async_trait]
pub trait AiService: Send + Sync {
    /// "canned" | "openai" | "openai+fallback", reported to callers.
    fn backend(&self) -> &'static str;

    async fn generate_job_description(&self, position: &str) -> Result<String, LlmError>;

    async fn compare_candidates(
        &self,
        position: &str,
        first: &CandidateProfile,
        second: &CandidateProfile,
    ) -> Result<String, LlmError>;
}

/// Canned strategy without a key, chat-completion strategy with one.
pub fn select_backend(
    http: &Client,
    api_key: Option<&str>,
    settings: &CompletionSettings,
) -> Arc<dyn AiService> {
    match api_key {
        Some(key) => Arc::new(ChatCompletionAi::new(LlmClient::new(
            http.clone(),
            key.to_string(),
            settings.clone(),
        ))),
        None => Arc::new(CannedAi),
    }
}

/// Hands out a strategy per request.
pub trait AiProvider: Send + Sync {
    /// For the screens: decided by the user's stored key.
    fn for_user(&self, api_key: Option<&ApiKey>) -> Arc<dyn AiService>;

    /// For the `ai-service` function: decided by the server-held key.
    fn for_server(&self) -> Arc<dyn AiService>;
}

/// Production provider over the shared HTTP client.
pub struct Backends {
    http: Client,
    settings: CompletionSettings,
    server_key: Option<String>,
}

impl Backends {
    pub fn new(http: Client, settings: CompletionSettings, server_key: Option<String>) -> Self {
        Self {
            http,
            settings,
            server_key,
        }
    }
}

impl AiProvider for Backends {
    fn for_user(&self, api_key: Option<&ApiKey>) -> Arc<dyn AiService> {
        select_backend(&self.http, api_key.map(ApiKey::expose), &self.settings)
    }

    fn for_server(&self) -> Arc<dyn AiService> {
        select_backend(&self.http, self.server_key.as_deref(), &self.settings)
    }
}

/// Returns canned text whenever the inner strategy fails.
pub struct FallbackAi {
    inner: Arc<dyn AiService>,
}

impl FallbackAi {
    pub fn new(inner: Arc<dyn AiService>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl AiService for FallbackAi {
    fn backend(&self) -> &'static str {
        match self.inner.backend() {
            "canned" => "canned",
            _ => "openai+fallback",
        }
    }

    async fn generate_job_description(&self, position: &str) -> Result<String, LlmError> {
        match self.inner.generate_job_description(position).await {
            Ok(text) => Ok(text),
            Err(e) => {
                warn!("Job description generation failed, using canned text: {e}");
                Ok(canned::job_description(position))
            }
        }
    }

    async fn compare_candidates(
        &self,
        position: &str,
        first: &CandidateProfile,
        second: &CandidateProfile,
    ) -> Result<String, LlmError> {
        match self.inner.compare_candidates(position, first, second).await {
            Ok(text) => Ok(text),
            Err(e) => {
                warn!("Candidate comparison failed, using canned text: {e}");
                Ok(canned::candidate_comparison())
            }
        }
    }
}

#[cfg(test)]
pub mod testing {
    //! Recording fakes shared by workflow and handler tests.

    use std::sync::Mutex;

    use super::*;

    /// Records every call; answers with fixed text or a fixed error.
    #[derive(Default)]
    pub struct RecordingAi {
        pub fail_with_status: Option<u16>,
        pub generated: Mutex<Vec<String>>,
        pub compared: Mutex<Vec<(String, CandidateProfile, CandidateProfile)>>,
    }

    impl RecordingAi {
        pub fn failing(status: u16) -> Self {
            Self {
                fail_with_status: Some(status),
                ..Default::default()
            }
        }

        fn outcome(&self, text: String) -> Result<String, LlmError> {
            match self.fail_with_status {
                Some(status) => Err(LlmError::Api {
                    status,
                    message: "fake failure".to_string(),
                }),
                None => Ok(text),
            }
        }
    }

    #[async_trait]
    impl AiService for RecordingAi {
        fn backend(&self) -> &'static str {
            "recording"
        }

        async fn generate_job_description(&self, position: &str) -> Result<String, LlmError> {
            self.generated.lock().unwrap().push(position.to_string());
            self.outcome(format!("**Опис**\n• {position}"))
        }

        async fn compare_candidates(
            &self,
            position: &str,
            first: &CandidateProfile,
            second: &CandidateProfile,
        ) -> Result<String, LlmError> {
            self.compared.lock().unwrap().push((
                position.to_string(),
                first.clone(),
                second.clone(),
            ));
            self.outcome(format!("**Порівняння**\n• {} vs {}", first.name, second.name))
        }
    }

    /// Provider that hands out the same strategy for every caller.
    pub struct FixedAi(pub Arc<dyn AiService>);

    impl AiProvider for FixedAi {
        fn for_user(&self, _api_key: Option<&ApiKey>) -> Arc<dyn AiService> {
            self.0.clone()
        }

        fn for_server(&self) -> Arc<dyn AiService> {
            self.0.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingAi;
    use super::*;

    fn settings() -> CompletionSettings {
        CompletionSettings {
            api_url: "http://127.0.0.1:9/v1/chat/completions".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.2,
        }
    }

    fn profile(name: &str) -> CandidateProfile {
        CandidateProfile {
            name: name.to_string(),
            resume: "r".to_string(),
            interview: "i".to_string(),
        }
    }

    #[tokio::test]
    async fn test_no_key_selects_canned_backend() {
        let ai = select_backend(&Client::new(), None, &settings());
        assert_eq!(ai.backend(), "canned");
        // Settings point at a dead port: success proves no request was made.
        let text = ai.generate_job_description("QA").await.unwrap();
        assert_eq!(text, canned::job_description("QA"));
        let text = ai
            .compare_candidates("QA", &profile("A"), &profile("B"))
            .await
            .unwrap();
        assert_eq!(text, canned::candidate_comparison());
    }

    #[tokio::test]
    async fn test_key_selects_chat_backend() {
        let ai = select_backend(&Client::new(), Some("sk-test"), &settings());
        assert_eq!(ai.backend(), "openai");
    }

    #[tokio::test]
    async fn test_backends_split_user_and_server_keys() {
        let backends = Backends::new(Client::new(), settings(), Some("sk-server".to_string()));
        assert_eq!(backends.for_user(None).backend(), "canned");
        assert_eq!(backends.for_server().backend(), "openai");

        let key = ApiKey::parse("sk-user").unwrap();
        assert_eq!(backends.for_user(Some(&key)).backend(), "openai");

        let no_server_key = Backends::new(Client::new(), settings(), None);
        assert_eq!(no_server_key.for_server().backend(), "canned");
    }

    #[tokio::test]
    async fn test_fallback_returns_canned_on_failure() {
        let ai = FallbackAi::new(Arc::new(RecordingAi::failing(500)));
        let text = ai.generate_job_description("QA").await.unwrap();
        assert_eq!(text, canned::job_description("QA"));
        let text = ai
            .compare_candidates("QA", &profile("A"), &profile("B"))
            .await
            .unwrap();
        assert_eq!(text, canned::candidate_comparison());
    }

    #[tokio::test]
    async fn test_fallback_passes_success_through() {
        let inner = Arc::new(RecordingAi::default());
        let ai = FallbackAi::new(inner.clone());
        let text = ai.generate_job_description("QA").await.unwrap();
        assert!(text.contains("QA"));
        assert_eq!(*inner.generated.lock().unwrap(), vec!["QA".to_string()]);
    }
}
