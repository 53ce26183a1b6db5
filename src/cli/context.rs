use std::path::PathBuf;
use std::sync::Arc;
use crate::cli::commands::LlmArgs;
use crate::config::{self, InfraFlowConfig, LlmOverrides};
use crate::errors::InfraFlowError;
use crate::llm::{create_collaborators, Collaborators};
use crate::pipeline::{InstantPacing, Pacing, RandomPacing};

/// Everything a subcommand needs before it builds a workspace.
pub struct CommandContext {
    pub config: InfraFlowConfig,
    pub collaborators: Collaborators,
}

impl CommandContext {
    pub async fn prepare(config_path: Option<&str>, llm: &LlmArgs) -> Result<Self, InfraFlowError> {
        let path = config_path.map(PathBuf::from);
        let config = config::load_config(path.as_deref()).await?;

        let overrides = LlmOverrides {
            provider: llm.provider.clone(),
            api_key: llm.api_key.clone(),
            model: llm.model.clone(),
        };
        let settings = config::resolve_llm_settings(&config, &overrides);
        let collaborators = create_collaborators(&settings)?;

        Ok(Self { config, collaborators })
    }

    pub fn pacing(&self, instant: bool) -> Arc<dyn Pacing> {
        if instant {
            Arc::new(InstantPacing)
        } else {
            Arc::new(RandomPacing::from_config(&self.config.pacing()))
        }
    }
}
