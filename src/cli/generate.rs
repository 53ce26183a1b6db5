use crate::cli::commands::GenerateArgs;
use crate::cli::context::CommandContext;
use crate::cli::render::render_project;
use crate::errors::InfraFlowError;
use crate::pipeline::InstantPacing;
use crate::session::Workspace;
use std::sync::Arc;
use tracing::info;

pub async fn handle_generate(args: GenerateArgs, config_path: Option<&str>) -> Result<(), InfraFlowError> {
    let ctx = CommandContext::prepare(config_path, &args.llm).await?;
    let workspace = Workspace::new(ctx.collaborators, Arc::new(InstantPacing));

    let project = workspace.create_project(&args.prompt).await?;
    info!(name = %project.name, "Generation finished");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&project)?);
    } else {
        println!("{}", render_project(&project));
    }
    Ok(())
}
