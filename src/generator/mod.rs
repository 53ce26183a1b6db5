pub mod fallback;

use std::sync::Arc;
use std::sync::LazyLock;
use serde_json::{json, Value};
use tracing::{info, warn};
use crate::errors::InfraFlowError;
use crate::llm::LLMProvider;
use crate::models::GenerationResult;
use crate::prompts::{interpolate, templates, PromptVariables};

pub use fallback::{fallback_project, simulated_title, SIMULATED_MARKER};

pub static GENERATION_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "type": "object",
        "properties": {
            "projectTitle": { "type": "string" },
            "terraform": { "type": "string" },
            "ansible": { "type": "string" },
            "explanation": { "type": "string" }
        },
        "required": ["projectTitle", "terraform", "ansible", "explanation"]
    })
});

/// Turns a natural-language prompt into Terraform and Ansible text.
///
/// Always produces a usable [`GenerationResult`]: when no collaborator is
/// configured, or the single call fails or returns something unusable, the
/// fixed fallback project is returned instead.
pub struct InfraGenerator {
    llm: Option<Arc<dyn LLMProvider>>,
}

impl InfraGenerator {
    pub fn new(llm: Option<Arc<dyn LLMProvider>>) -> Self {
        Self { llm }
    }

    pub fn is_available(&self) -> bool {
        self.llm.is_some()
    }

    pub async fn generate(&self, prompt: &str) -> GenerationResult {
        match self.try_generate(prompt).await {
            Ok(result) => {
                info!(title = %result.title, "Generated infrastructure project");
                result
            }
            Err(e) => {
                warn!(
                    error_type = e.error_type(),
                    error = %e,
                    "Generation failed, using simulated fallback project"
                );
                fallback_project(prompt)
            }
        }
    }

    async fn try_generate(&self, prompt: &str) -> Result<GenerationResult, InfraFlowError> {
        let llm = self.llm.as_ref()
            .ok_or_else(|| InfraFlowError::Unavailable("no API key configured".into()))?;
        if prompt.trim().is_empty() {
            return Err(InfraFlowError::InvalidPrompt("prompt is empty".into()));
        }

        let vars = PromptVariables { prompt, ..Default::default() };
        let request = interpolate(templates::GENERATE_INFRASTRUCTURE, &vars);

        let value = llm.complete_structured(&request, &GENERATION_SCHEMA, None).await?;
        let result: GenerationResult = serde_json::from_value(value)?;
        result.validate()?;
        Ok(result)
    }
}
