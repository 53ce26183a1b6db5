pub mod fallback;

use std::sync::Arc;
use tracing::debug;
use crate::errors::InfraFlowError;
use crate::llm::LLMProvider;
use crate::models::PipelineStepKind;
use crate::prompts::{interpolate, templates, PromptVariables};
use crate::utils::truncation::code_excerpt;

pub use fallback::fallback_log;

/// Produces a plausible command-line transcript for one pipeline step.
pub struct LogSynthesizer {
    llm: Option<Arc<dyn LLMProvider>>,
}

impl LogSynthesizer {
    pub fn new(llm: Option<Arc<dyn LLMProvider>>) -> Self {
        Self { llm }
    }

    /// Never fails and never returns an empty transcript.
    pub async fn synthesize_log(&self, kind: PipelineStepKind, code: &str) -> Vec<String> {
        match self.try_synthesize(kind, code).await {
            Ok(lines) => lines,
            Err(e) => {
                debug!(step = %kind, error_type = e.error_type(), error = %e, "Using fallback transcript");
                fallback_log(kind)
            }
        }
    }

    async fn try_synthesize(&self, kind: PipelineStepKind, code: &str) -> Result<Vec<String>, InfraFlowError> {
        let llm = self.llm.as_ref()
            .ok_or_else(|| InfraFlowError::Unavailable("no API key configured".into()))?;

        let vars = PromptVariables {
            step_kind: kind.as_str(),
            code: code_excerpt(code),
            ..Default::default()
        };
        let request = interpolate(templates::SIMULATE_LOG, &vars);

        let response = llm.complete(&request, None).await?;
        let lines = split_log_lines(&response.content);
        if lines.is_empty() {
            return Err(InfraFlowError::LLMApi(format!("empty transcript for {}", kind)));
        }
        Ok(lines)
    }
}

/// Split raw model output into lines, dropping blank ones.
pub fn split_log_lines(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}
