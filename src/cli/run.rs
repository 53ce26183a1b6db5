use tokio::sync::mpsc;
use crate::cli::commands::RunArgs;
use crate::cli::context::CommandContext;
use crate::cli::progress::RunProgress;
use crate::cli::render::{render_event, render_project};
use crate::errors::InfraFlowError;
use crate::pipeline::{PipelineEvent, RunOutcome};
use crate::session::Workspace;

pub async fn handle_run(args: RunArgs, config_path: Option<&str>, quiet: bool) -> Result<(), InfraFlowError> {
    let ctx = CommandContext::prepare(config_path, &args.llm).await?;
    let pacing = ctx.pacing(args.instant);
    let (tx, mut rx) = mpsc::unbounded_channel();
    let workspace = Workspace::with_event_channel(ctx.collaborators, pacing, tx);

    let project = workspace.create_project(&args.prompt).await?;
    if !quiet {
        println!("{}", render_project(&project));
    }

    let handle = workspace.simulator.spawn_run().map_err(not_started)?;
    // The run task now owns the only other sender; the stream ends with it.
    drop(workspace);

    let progress = if quiet { RunProgress::hidden() } else { RunProgress::new() };
    while let Some(event) = rx.recv().await {
        progress.handle_event(&event);
        if quiet {
            if let PipelineEvent::LogLine { line, .. } = &event {
                println!("{}", line);
            }
        } else {
            progress.println(&render_event(&event));
        }
    }

    match handle.await {
        Ok(RunOutcome::Completed { .. }) => Ok(()),
        Ok(outcome) => Err(not_started(outcome)),
        Err(e) => Err(InfraFlowError::Internal(format!("Pipeline task failed: {}", e))),
    }
}

fn not_started(outcome: RunOutcome) -> InfraFlowError {
    match outcome {
        RunOutcome::Aborted(message) => InfraFlowError::Internal(format!("Pipeline aborted: {}", message)),
        other => InfraFlowError::Internal(format!(
            "Pipeline did not run: {}",
            other.reason().unwrap_or("unknown")
        )),
    }
}
