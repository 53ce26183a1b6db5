use chrono::{DateTime, Utc};
use serde::Serialize;
use crate::errors::InfraFlowError;
use crate::models::{PipelineStep, PipelineStepStatus, Project};

/// Observable state of the simulator. Every transition below produces a new
/// snapshot for subscribers.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PipelineState {
    pub project: Option<Project>,
    pub running: bool,
    /// Display log buffer for the current (or last) run.
    pub logs: Vec<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl PipelineState {
    pub fn steps(&self) -> &[PipelineStep] {
        self.project.as_ref().map(|p| p.pipeline_steps.as_slice()).unwrap_or(&[])
    }

    pub fn running_step(&self) -> Option<&PipelineStep> {
        self.steps().iter().find(|s| s.status == PipelineStepStatus::Running)
    }

    pub fn all_completed(&self) -> bool {
        let steps = self.steps();
        !steps.is_empty() && steps.iter().all(|s| s.status == PipelineStepStatus::Completed)
    }

    /// Steps form a prefix of Completed, at most one Running, then Idle.
    pub fn is_consistent(&self) -> bool {
        let mut seen_active = false;
        for step in self.steps() {
            match step.status {
                PipelineStepStatus::Completed if seen_active => return false,
                PipelineStepStatus::Completed => {}
                PipelineStepStatus::Running if seen_active => return false,
                PipelineStepStatus::Running => seen_active = true,
                PipelineStepStatus::Idle => seen_active = true,
                PipelineStepStatus::Failed => return false,
            }
        }
        true
    }

    pub(crate) fn load(&mut self, project: Project) {
        self.project = Some(project);
        self.running = false;
        self.logs.clear();
        self.started_at = None;
        self.finished_at = None;
    }

    pub(crate) fn begin_run(&mut self) -> Result<(), InfraFlowError> {
        let project = self.project.as_mut()
            .ok_or_else(|| InfraFlowError::Internal("no project loaded".into()))?;
        for step in &mut project.pipeline_steps {
            step.reset();
        }
        self.logs.clear();
        self.running = true;
        self.started_at = Some(Utc::now());
        self.finished_at = None;
        Ok(())
    }

    pub(crate) fn start_step(&mut self, index: usize) -> Result<(), InfraFlowError> {
        let steps = self.steps_mut()?;
        if steps[..index.min(steps.len())].iter().any(|s| s.status != PipelineStepStatus::Completed) {
            return Err(InfraFlowError::InvalidTransition(format!(
                "step {} started before its predecessors completed", index
            )));
        }
        step_at(steps, index)?.transition(PipelineStepStatus::Running)
    }

    pub(crate) fn deliver_line(&mut self, index: usize, line: &str) -> Result<(), InfraFlowError> {
        let step = step_at(self.steps_mut()?, index)?;
        if step.status != PipelineStepStatus::Running {
            return Err(InfraFlowError::InvalidTransition(format!(
                "log line delivered to {} step {}", step.status, step.kind
            )));
        }
        step.output.push(line.to_string());
        self.logs.push(line.to_string());
        Ok(())
    }

    pub(crate) fn complete_step(&mut self, index: usize) -> Result<(), InfraFlowError> {
        step_at(self.steps_mut()?, index)?.transition(PipelineStepStatus::Completed)
    }

    pub(crate) fn finish_run(&mut self) {
        self.running = false;
        self.finished_at = Some(Utc::now());
    }

    fn steps_mut(&mut self) -> Result<&mut [PipelineStep], InfraFlowError> {
        self.project.as_mut()
            .map(|p| p.pipeline_steps.as_mut_slice())
            .ok_or_else(|| InfraFlowError::Internal("no project loaded".into()))
    }
}

fn step_at(steps: &mut [PipelineStep], index: usize) -> Result<&mut PipelineStep, InfraFlowError> {
    steps.get_mut(index)
        .ok_or_else(|| InfraFlowError::Internal(format!("no step at index {}", index)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::fallback_project;

    fn loaded() -> PipelineState {
        let mut state = PipelineState::default();
        state.load(Project::from_generation("demo", fallback_project("demo")));
        state
    }

    #[test]
    fn test_full_step_cycle() {
        let mut state = loaded();
        state.begin_run().unwrap();
        assert!(state.running);
        state.start_step(0).unwrap();
        state.deliver_line(0, "[INFO] one").unwrap();
        assert_eq!(state.running_step().unwrap().output, vec!["[INFO] one"]);
        state.complete_step(0).unwrap();
        assert!(state.is_consistent());
        assert_eq!(state.logs, vec!["[INFO] one"]);
    }

    #[test]
    fn test_cannot_start_out_of_order() {
        let mut state = loaded();
        state.begin_run().unwrap();
        assert!(state.start_step(1).is_err());
        assert!(state.running_step().is_none());
    }

    #[test]
    fn test_line_requires_running_step() {
        let mut state = loaded();
        state.begin_run().unwrap();
        assert!(state.deliver_line(0, "x").is_err());
        assert!(state.logs.is_empty());
    }

    #[test]
    fn test_begin_run_resets_previous_run() {
        let mut state = loaded();
        state.begin_run().unwrap();
        for i in 0..5 {
            state.start_step(i).unwrap();
            state.deliver_line(i, "line").unwrap();
            state.complete_step(i).unwrap();
        }
        state.finish_run();
        assert!(state.all_completed());

        state.begin_run().unwrap();
        assert!(state.logs.is_empty());
        assert!(state.steps().iter().all(|s| s.status == PipelineStepStatus::Idle && s.output.is_empty()));
    }

    #[test]
    fn test_begin_run_without_project() {
        let mut state = PipelineState::default();
        assert!(state.begin_run().is_err());
        assert!(!state.running);
    }

    #[test]
    fn test_consistency_detects_gap() {
        let mut state = loaded();
        if let Some(project) = state.project.as_mut() {
            project.pipeline_steps[2].status = PipelineStepStatus::Completed;
        }
        assert!(!state.is_consistent());
    }
}
