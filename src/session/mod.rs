use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;
use crate::errors::InfraFlowError;
use crate::generator::InfraGenerator;
use crate::llm::Collaborators;
use crate::models::Project;
use crate::pipeline::{Pacing, PipelineEvent, PipelineSimulator};
use crate::synthesizer::LogSynthesizer;

/// One user's working context: the generator plus the simulator holding the
/// current project.
#[derive(Clone)]
pub struct Workspace {
    pub generator: Arc<InfraGenerator>,
    pub simulator: Arc<PipelineSimulator>,
}

impl Workspace {
    pub fn new(collaborators: Collaborators, pacing: Arc<dyn Pacing>) -> Self {
        Self::build(collaborators, pacing, None)
    }

    pub fn with_event_channel(
        collaborators: Collaborators,
        pacing: Arc<dyn Pacing>,
        tx: mpsc::UnboundedSender<PipelineEvent>,
    ) -> Self {
        Self::build(collaborators, pacing, Some(tx))
    }

    fn build(
        collaborators: Collaborators,
        pacing: Arc<dyn Pacing>,
        tx: Option<mpsc::UnboundedSender<PipelineEvent>>,
    ) -> Self {
        let synthesizer = Arc::new(LogSynthesizer::new(collaborators.logs));
        let mut simulator = PipelineSimulator::new(synthesizer, pacing);
        if let Some(tx) = tx {
            simulator = simulator.with_event_channel(tx);
        }
        Self {
            generator: Arc::new(InfraGenerator::new(collaborators.generation)),
            simulator: Arc::new(simulator),
        }
    }

    /// Generate a project from `prompt` and make it the current one.
    pub async fn create_project(&self, prompt: &str) -> Result<Project, InfraFlowError> {
        if prompt.trim().is_empty() {
            return Err(InfraFlowError::InvalidPrompt("prompt must not be empty".into()));
        }
        if self.simulator.is_running() {
            return Err(InfraFlowError::PipelineBusy("a pipeline run is in progress".into()));
        }

        let result = self.generator.generate(prompt).await;
        let project = Project::from_generation(prompt, result);
        self.simulator.load_project(project.clone())?;
        info!(id = %project.id, name = %project.name, "Project created");
        Ok(project)
    }

    pub fn current_project(&self) -> Option<Project> {
        self.simulator.snapshot().project
    }
}
