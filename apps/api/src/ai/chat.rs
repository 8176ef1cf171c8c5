use async_trait::async_trait;

use crate::ai::prompts::{comparison_prompt, job_description_prompt};
use crate::ai::AiService;
use crate::llm_client::prompts::HR_EXPERT_SYSTEM;
use crate::llm_client::{LlmClient, LlmError};
use crate::models::candidate::CandidateProfile;

/// Real strategy: one chat-completion call per task, errors propagate.
pub struct ChatCompletionAi {
    llm: LlmClient,
}

impl ChatCompletionAi {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl AiService for ChatCompletionAi {
    fn backend(&self) -> &'static str {
        "openai"
    }

    async fn generate_job_description(&self, position: &str) -> Result<String, LlmError> {
        tracing::info!(
            "Generating job description for '{position}' (model: {})",
            self.llm.model()
        );
        let prompt = job_description_prompt(position);
        self.llm.complete(&prompt, HR_EXPERT_SYSTEM).await
    }

    async fn compare_candidates(
        &self,
        position: &str,
        first: &CandidateProfile,
        second: &CandidateProfile,
    ) -> Result<String, LlmError> {
        tracing::info!(
            "Comparing '{}' and '{}' for '{position}'",
            first.name,
            second.name
        );
        let prompt = comparison_prompt(position, first, second);
        self.llm.complete(&prompt, HR_EXPERT_SYSTEM).await
    }
}
