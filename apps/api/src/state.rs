use std::sync::Arc;

use crate::ai::{AiProvider, AiService};
use crate::config::Config;
use crate::credentials::CredentialStore;
use crate::store::{AirtableClient, HrStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Store seen by the screens. `AirtableClient` in production.
    pub store: Arc<dyn HrStore>,
    /// Raw Airtable access for the proxy function.
    pub airtable: AirtableClient,
    /// User-supplied completion key. Its presence selects the AI strategy.
    pub credentials: CredentialStore,
    pub ai_provider: Arc<dyn AiProvider>,
}

impl AppState {
    /// Strategy for the screens: decided per request from the stored key.
    pub async fn ai(&self) -> Arc<dyn AiService> {
        let key = self.credentials.current().await;
        self.ai_provider.for_user(key.as_ref())
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;

    use tempfile::TempDir;

    use crate::ai::testing::FixedAi;
    use crate::ai::Backends;
    use crate::llm_client::{CompletionSettings, DEFAULT_TEMPERATURE};
    use crate::store::memory::InMemoryStore;

    /// State over an in-memory store and a temp credential file. Keep the
    /// returned `TempDir` alive for the duration of the test. Without `ai`
    /// the production provider is used, with no server key.
    pub async fn state_with(
        store: Arc<InMemoryStore>,
        ai: Option<Arc<dyn AiService>>,
    ) -> (AppState, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::for_tests(dir.path().join("credentials.json"));
        let credentials = CredentialStore::load(config.credential_file.clone())
            .await
            .unwrap();
        let airtable = AirtableClient::new(
            reqwest::Client::new(),
            &config.airtable_api_url,
            &config.airtable_base_id,
            &config.airtable_api_key,
        );
        let ai_provider: Arc<dyn AiProvider> = match ai {
            Some(ai) => Arc::new(FixedAi(ai)),
            None => Arc::new(Backends::new(
                reqwest::Client::new(),
                CompletionSettings {
                    api_url: config.openai_api_url.clone(),
                    model: config.openai_model.clone(),
                    temperature: DEFAULT_TEMPERATURE,
                },
                config.openai_api_key.clone(),
            )),
        };
        let state = AppState {
            config,
            store,
            airtable,
            credentials,
            ai_provider,
        };
        (state, dir)
    }
}
