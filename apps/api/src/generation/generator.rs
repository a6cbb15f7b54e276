use async_trait::async_trait;

use crate::errors::AppError;
use crate::generation::prompt_builder::build_generation_prompt;
use crate::llm_client::LlmClient;
use crate::models::employee::EmployeeRow;
use crate::models::style_profile::StyleProfileRow;
use crate::style::defaults::resolve_style;

const GENERATION_MAX_TOKENS: u32 = 2048;

/// Drafts a post from raw input in an employee's voice.
///
/// Carried in `AppState` as `Arc<dyn PostGenerator>` so the workflow machine
/// can be exercised against a stub in tests.
#[async_trait]
pub trait PostGenerator: Send + Sync {
    async fn generate(
        &self,
        input: &str,
        employee: &EmployeeRow,
        profile: &StyleProfileRow,
    ) -> Result<String, AppError>;
}

/// The production generator: resolve the profile, render the system prompt,
/// one LLM call. No retry — a failure goes back to the caller.
pub struct LlmPostGenerator {
    llm: LlmClient,
}

impl LlmPostGenerator {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl PostGenerator for LlmPostGenerator {
    async fn generate(
        &self,
        input: &str,
        employee: &EmployeeRow,
        profile: &StyleProfileRow,
    ) -> Result<String, AppError> {
        let resolved = resolve_style(&profile.quantitative, &profile.qualitative);
        let system = build_generation_prompt(employee, &resolved);

        let response = self
            .llm
            .call(input, &system, GENERATION_MAX_TOKENS)
            .await
            .map_err(|e| AppError::Generation(format!("Post generation call failed: {e}")))?;

        let text = response
            .text()
            .ok_or_else(|| AppError::Generation("Model response contained no text block".into()))?;

        Ok(text.to_string())
    }
}
