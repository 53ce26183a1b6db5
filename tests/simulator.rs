use infraflow::generator::fallback::{FALLBACK_ANSIBLE, FALLBACK_TERRAFORM};
use infraflow::llm::Collaborators;
use infraflow::models::{PipelineStepKind, PipelineStepStatus};
use infraflow::pipeline::{InstantPacing, PipelineEvent, RandomPacing, RunOutcome};
use infraflow::session::Workspace;
use infraflow::synthesizer::fallback_log;
use std::sync::Arc;
use tokio::sync::mpsc;

const EKS_PROMPT: &str = "Build a high-availability EKS cluster with an Aurora database";

#[tokio::test]
async fn test_end_to_end_without_collaborator() {
    let workspace = Workspace::new(Collaborators::unavailable(), Arc::new(InstantPacing));

    let project = workspace.create_project(EKS_PROMPT).await.unwrap();
    assert!(project.name.contains("Simulated: Build a high-availab"));
    assert_eq!(project.terraform_code, FALLBACK_TERRAFORM);
    assert_eq!(project.ansible_code, FALLBACK_ANSIBLE);

    let outcome = workspace.simulator.run_pipeline().await;
    let expected: Vec<String> = PipelineStepKind::ALL.iter().flat_map(|k| fallback_log(*k)).collect();
    assert!(matches!(outcome, RunOutcome::Completed { total_lines, .. } if total_lines == expected.len()));

    let state = workspace.simulator.snapshot();
    assert!(!state.running);
    assert_eq!(state.logs, expected);
    assert!(state.steps().iter().all(|s| s.status == PipelineStepStatus::Completed));
    for step in state.steps() {
        assert_eq!(step.output, fallback_log(step.kind));
    }
}

#[tokio::test]
async fn test_event_stream_order() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let workspace = Workspace::with_event_channel(
        Collaborators::unavailable(),
        Arc::new(InstantPacing),
        tx,
    );
    workspace.create_project(EKS_PROMPT).await.unwrap();
    workspace.simulator.run_pipeline().await;
    drop(workspace);

    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }

    assert!(matches!(events.first(), Some(PipelineEvent::RunStarted { .. })));
    assert!(matches!(events.last(), Some(PipelineEvent::RunCompleted { .. })));
    let started: Vec<PipelineStepKind> = events.iter()
        .filter_map(|e| match e {
            PipelineEvent::StepStarted { kind, .. } => Some(*kind),
            _ => None,
        })
        .collect();
    assert_eq!(started, PipelineStepKind::ALL.to_vec());
}

#[tokio::test(start_paused = true)]
async fn test_paced_run_takes_simulated_time() {
    let workspace = Workspace::new(
        Collaborators::unavailable(),
        Arc::new(RandomPacing::new(40, 140, 300)),
    );
    workspace.create_project(EKS_PROMPT).await.unwrap();

    let started = tokio::time::Instant::now();
    let outcome = workspace.simulator.run_pipeline().await;
    let elapsed = started.elapsed().as_millis() as u64;

    let RunOutcome::Completed { total_lines, .. } = outcome else {
        panic!("run did not complete: {:?}", outcome);
    };
    let min = total_lines as u64 * 40 + 5 * 300;
    let max = total_lines as u64 * 140 + 5 * 300;
    assert!(elapsed >= min && elapsed <= max + 5, "elapsed {} not in [{}, {}]", elapsed, min, max);
}
