use std::ops::Deref;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use crate::errors::InfraFlowError;
use crate::models::Project;
use crate::synthesizer::LogSynthesizer;
use super::events::PipelineEvent;
use super::pacing::Pacing;
use super::state::PipelineState;
use tracing::{debug, error, info};

/// Result of asking the simulator to run.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Completed { total_lines: usize, duration_ms: u64 },
    /// Ignored: another run was in progress.
    AlreadyRunning,
    /// Ignored: nothing to run against.
    NoProject,
    /// An internal state-machine invariant was violated.
    Aborted(String),
}

impl RunOutcome {
    pub fn reason(&self) -> Option<&'static str> {
        match self {
            Self::Completed { .. } => None,
            Self::AlreadyRunning => Some("already_running"),
            Self::NoProject => Some("no_project"),
            Self::Aborted(_) => Some("aborted"),
        }
    }
}

/// Plays back the five-step pipeline over the loaded project.
///
/// Only the run loop mutates state. Observers read it through
/// [`snapshot`](Self::snapshot) or a [`subscribe`](Self::subscribe)d
/// receiver, which is updated after every transition.
pub struct PipelineSimulator {
    synthesizer: Arc<LogSynthesizer>,
    pacing: Arc<dyn Pacing>,
    state: watch::Sender<PipelineState>,
    running: AtomicBool,
    event_tx: Option<mpsc::UnboundedSender<PipelineEvent>>,
}

impl PipelineSimulator {
    pub fn new(synthesizer: Arc<LogSynthesizer>, pacing: Arc<dyn Pacing>) -> Self {
        let (state, _) = watch::channel(PipelineState::default());
        Self {
            synthesizer,
            pacing,
            state,
            running: AtomicBool::new(false),
            event_tx: None,
        }
    }

    /// Attach an event channel for streaming pipeline events to a renderer.
    pub fn with_event_channel(mut self, tx: mpsc::UnboundedSender<PipelineEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    fn emit(&self, event: PipelineEvent) {
        if let Some(ref tx) = self.event_tx {
            let _ = tx.send(event);
        }
    }

    pub fn snapshot(&self) -> PipelineState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<PipelineState> {
        self.state.subscribe()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Replace the loaded project. Refused while a run is in progress.
    pub fn load_project(&self, project: Project) -> Result<(), InfraFlowError> {
        let (name, id) = (project.name.clone(), project.id.clone());
        let mut refused = false;
        self.state.send_if_modified(|state| {
            if state.running {
                refused = true;
                return false;
            }
            state.load(project);
            true
        });
        if refused {
            return Err(InfraFlowError::PipelineBusy("a pipeline run is in progress".into()));
        }
        info!(project = %name, id = %id, "Project loaded");
        Ok(())
    }

    /// Run the pipeline to completion on the current task.
    pub async fn run_pipeline(&self) -> RunOutcome {
        match self.try_begin() {
            Ok(project) => Self::execute(RunGuard::new(self), project).await,
            Err(outcome) => outcome,
        }
    }

    /// Start a run on a background task. Returns the ignored outcome instead
    /// when the run could not start.
    pub fn spawn_run(self: &Arc<Self>) -> Result<JoinHandle<RunOutcome>, RunOutcome> {
        let project = self.try_begin()?;
        let guard = RunGuard::new(Arc::clone(self));
        Ok(tokio::spawn(Self::execute(guard, project)))
    }

    /// Claim the run flag and reset every step. On success the returned
    /// project copy supplies the code bodies for the run.
    fn try_begin(&self) -> Result<Project, RunOutcome> {
        if self.running.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst).is_err() {
            debug!("Run requested while another is in progress, ignoring");
            return Err(RunOutcome::AlreadyRunning);
        }

        // Copy and reset under one write lock so a concurrent load cannot
        // slip between them.
        let mut begun = Err(RunOutcome::NoProject);
        self.state.send_if_modified(|state| {
            let Some(project) = state.project.clone() else {
                return false;
            };
            match state.begin_run() {
                Ok(()) => {
                    begun = Ok(project);
                    true
                }
                Err(e) => {
                    begun = Err(RunOutcome::Aborted(e.to_string()));
                    false
                }
            }
        });

        if let Err(ref outcome) = begun {
            self.running.store(false, Ordering::SeqCst);
            debug!(reason = outcome.reason().unwrap_or_default(), "Run not started");
        }
        begun
    }

    async fn execute<S>(mut guard: RunGuard<S>, project: Project) -> RunOutcome
    where
        S: Deref<Target = PipelineSimulator>,
    {
        let started = Instant::now();
        info!(project = %project.name, "Pipeline run started");
        guard.simulator.emit(PipelineEvent::RunStarted { project_name: project.name.clone() });

        let result = guard.simulator.drive(&project).await;
        guard.release();

        match result {
            Ok(total_lines) => {
                let duration_ms = started.elapsed().as_millis() as u64;
                guard.simulator.emit(PipelineEvent::RunCompleted { total_lines, duration_ms });
                info!(total_lines, duration_ms, "Pipeline run completed");
                RunOutcome::Completed { total_lines, duration_ms }
            }
            Err(e) => {
                error!(error = %e, "Pipeline run aborted");
                RunOutcome::Aborted(e.to_string())
            }
        }
    }

    async fn drive(&self, project: &Project) -> Result<usize, InfraFlowError> {
        let mut total_lines = 0;

        for (index, step) in project.pipeline_steps.iter().enumerate() {
            self.transition(|state| state.start_step(index))?;
            self.emit(PipelineEvent::StepStarted { kind: step.kind, label: step.label.clone() });
            debug!(step = %step.kind, "Step running");

            let lines = self.synthesizer
                .synthesize_log(step.kind, project.code_for(step.kind))
                .await;

            for line in &lines {
                self.transition(|state| state.deliver_line(index, line))?;
                self.emit(PipelineEvent::LogLine { kind: step.kind, line: line.clone() });
                pause(self.pacing.line_delay()).await;
            }
            total_lines += lines.len();

            self.transition(|state| state.complete_step(index))?;
            self.emit(PipelineEvent::StepCompleted {
                kind: step.kind,
                label: step.label.clone(),
                lines: lines.len(),
            });
            debug!(step = %step.kind, lines = lines.len(), "Step completed");

            pause(self.pacing.step_pause()).await;
        }

        Ok(total_lines)
    }

    /// Apply a state transition, publishing a snapshot only when it succeeds.
    fn transition<F>(&self, f: F) -> Result<(), InfraFlowError>
    where
        F: FnOnce(&mut PipelineState) -> Result<(), InfraFlowError>,
    {
        let mut result = Ok(());
        self.state.send_if_modified(|state| {
            result = f(state);
            result.is_ok()
        });
        result
    }
}

/// Holds the run flag for one run. Dropping it, including when the run
/// future is dropped mid-run, closes the run in the published state and
/// releases the flag.
struct RunGuard<S: Deref<Target = PipelineSimulator>> {
    simulator: S,
    armed: bool,
}

impl<S: Deref<Target = PipelineSimulator>> RunGuard<S> {
    fn new(simulator: S) -> Self {
        Self { simulator, armed: true }
    }

    fn release(&mut self) {
        if self.armed {
            self.armed = false;
            self.simulator.state.send_modify(|state| state.finish_run());
            self.simulator.running.store(false, Ordering::SeqCst);
        }
    }
}

impl<S: Deref<Target = PipelineSimulator>> Drop for RunGuard<S> {
    fn drop(&mut self) {
        self.release();
    }
}

async fn pause(delay: std::time::Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::fallback_project;
    use crate::llm::mock::MockProvider;
    use crate::models::{PipelineStepKind, PipelineStepStatus};
    use crate::pipeline::pacing::{InstantPacing, RandomPacing};
    use crate::synthesizer::fallback_log;

    fn simulator(pacing: Arc<dyn Pacing>) -> PipelineSimulator {
        PipelineSimulator::new(Arc::new(LogSynthesizer::new(None)), pacing)
    }

    fn project() -> Project {
        Project::from_generation("demo", fallback_project("demo"))
    }

    fn expected_buffer() -> Vec<String> {
        PipelineStepKind::ALL.iter().flat_map(|k| fallback_log(*k)).collect()
    }

    #[tokio::test]
    async fn test_run_without_project_is_noop() {
        let sim = simulator(Arc::new(InstantPacing));
        assert_eq!(sim.run_pipeline().await, RunOutcome::NoProject);
        assert!(!sim.is_running());
        assert_eq!(sim.snapshot(), PipelineState::default());
    }

    #[tokio::test]
    async fn test_run_completes_all_steps() {
        let sim = simulator(Arc::new(InstantPacing));
        sim.load_project(project()).unwrap();

        let outcome = sim.run_pipeline().await;
        let expected = expected_buffer();
        assert!(matches!(outcome, RunOutcome::Completed { total_lines, .. } if total_lines == expected.len()));

        let state = sim.snapshot();
        assert!(state.all_completed());
        assert!(!state.running);
        assert_eq!(state.logs, expected);
        for step in state.steps() {
            assert_eq!(step.output, fallback_log(step.kind));
        }
    }

    #[tokio::test]
    async fn test_events_in_step_order() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let sim = simulator(Arc::new(InstantPacing)).with_event_channel(tx);
        sim.load_project(project()).unwrap();
        sim.run_pipeline().await;
        drop(sim);

        let mut started = Vec::new();
        let mut current = None;
        while let Some(event) = rx.recv().await {
            match event {
                PipelineEvent::StepStarted { kind, .. } => {
                    assert!(current.is_none());
                    current = Some(kind);
                    started.push(kind);
                }
                PipelineEvent::LogLine { kind, .. } => assert_eq!(current, Some(kind)),
                PipelineEvent::StepCompleted { kind, lines, .. } => {
                    assert_eq!(current.take(), Some(kind));
                    assert_eq!(lines, fallback_log(kind).len());
                }
                _ => {}
            }
        }
        assert_eq!(started, PipelineStepKind::ALL.to_vec());
    }

    #[tokio::test(start_paused = true)]
    async fn test_every_snapshot_is_consistent() {
        let sim = Arc::new(simulator(Arc::new(RandomPacing::default())));
        sim.load_project(project()).unwrap();
        let mut rx = sim.subscribe();

        let watcher = tokio::spawn(async move {
            let mut running_order: Vec<PipelineStepKind> = Vec::new();
            while rx.changed().await.is_ok() {
                let state = rx.borrow_and_update().clone();
                assert!(state.is_consistent(), "inconsistent snapshot: {:?}", state.steps());
                if let Some(step) = state.running_step() {
                    if running_order.last() != Some(&step.kind) {
                        running_order.push(step.kind);
                    }
                }
                if state.finished_at.is_some() {
                    break;
                }
            }
            running_order
        });

        let handle = sim.spawn_run().unwrap();
        assert!(matches!(handle.await.unwrap(), RunOutcome::Completed { .. }));
        assert_eq!(watcher.await.unwrap(), PipelineStepKind::ALL.to_vec());
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_run_is_ignored() {
        let sim = Arc::new(simulator(Arc::new(RandomPacing::default())));
        sim.load_project(project()).unwrap();

        let handle = sim.spawn_run().unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(500)).await;

        let before = sim.snapshot();
        assert!(before.running);
        assert_eq!(sim.spawn_run().err(), Some(RunOutcome::AlreadyRunning));
        assert_eq!(sim.run_pipeline().await, RunOutcome::AlreadyRunning);
        assert_eq!(sim.snapshot(), before);

        handle.await.unwrap();
        assert_eq!(sim.snapshot().logs, expected_buffer());
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_refused_mid_run() {
        let sim = Arc::new(simulator(Arc::new(RandomPacing::default())));
        sim.load_project(project()).unwrap();
        let handle = sim.spawn_run().unwrap();

        let err = sim.load_project(project()).unwrap_err();
        assert_eq!(err.error_type(), "PipelineBusyError");

        handle.await.unwrap();
        assert!(sim.load_project(project()).is_ok());
        assert!(sim.snapshot().logs.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_loads_never_block_runs() {
        let sim = Arc::new(simulator(Arc::new(InstantPacing)));
        sim.load_project(project()).unwrap();

        let loader = {
            let sim = Arc::clone(&sim);
            tokio::spawn(async move {
                for _ in 0..500 {
                    // Refusals while a run holds the state are expected.
                    let _ = sim.load_project(project());
                    tokio::task::yield_now().await;
                }
            })
        };

        for _ in 0..100 {
            let outcome = sim.run_pipeline().await;
            assert!(matches!(outcome, RunOutcome::Completed { .. }), "run ignored: {:?}", outcome);
            tokio::task::yield_now().await;
        }
        loader.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_run_releases_flag() {
        let sim = simulator(Arc::new(RandomPacing::default()));
        sim.load_project(project()).unwrap();

        let interrupted = tokio::time::timeout(
            std::time::Duration::from_millis(500),
            sim.run_pipeline(),
        ).await;
        assert!(interrupted.is_err());

        assert!(!sim.is_running());
        let state = sim.snapshot();
        assert!(!state.running);
        assert!(state.finished_at.is_some());
        assert!(sim.load_project(project()).is_ok());
        assert!(matches!(sim.run_pipeline().await, RunOutcome::Completed { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_aborted_spawn_releases_flag() {
        let sim = Arc::new(simulator(Arc::new(RandomPacing::default())));
        sim.load_project(project()).unwrap();

        let handle = sim.spawn_run().unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(200)).await;
        handle.abort();
        assert!(handle.await.unwrap_err().is_cancelled());

        assert!(!sim.is_running());
        assert!(!sim.snapshot().running);
        assert!(sim.spawn_run().is_ok());
    }

    #[tokio::test]
    async fn test_rerun_clears_previous_logs() {
        let sim = simulator(Arc::new(InstantPacing));
        sim.load_project(project()).unwrap();
        sim.run_pipeline().await;
        sim.run_pipeline().await;
        assert_eq!(sim.snapshot().logs, expected_buffer());
    }

    #[tokio::test]
    async fn test_configure_reads_playbook() {
        let mock = MockProvider::new()
            .reply("lint ok")
            .reply("scan ok")
            .reply("plan ok")
            .reply("apply ok")
            .reply("config ok");
        let synth = LogSynthesizer::new(Some(Arc::new(mock.clone())));
        let sim = PipelineSimulator::new(Arc::new(synth), Arc::new(InstantPacing));
        sim.load_project(project()).unwrap();
        sim.run_pipeline().await;

        let prompts = mock.prompts();
        assert_eq!(prompts.len(), 5);
        assert!(prompts[0].contains("# Terraform Fallback Configuration"));
        assert!(prompts[4].contains("CI/CD CONFIGURE step"));
        assert!(prompts[4].contains("# Ansible Fallback Playbook"));
        assert_eq!(sim.snapshot().logs, vec!["lint ok", "scan ok", "plan ok", "apply ok", "config ok"]);
        assert!(sim.snapshot().steps().iter().all(|s| s.status == PipelineStepStatus::Completed));
    }
}
