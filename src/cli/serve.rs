use crate::cli::commands::ServeArgs;
use crate::cli::context::CommandContext;
use crate::errors::InfraFlowError;
use crate::api;
use crate::session::Workspace;
use tracing::info;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

pub async fn handle_serve(args: ServeArgs, config_path: Option<&str>) -> Result<(), InfraFlowError> {
    let ctx = CommandContext::prepare(config_path, &args.llm).await?;

    let host = args.host.clone()
        .or_else(|| ctx.config.server_host().map(str::to_string))
        .unwrap_or_else(|| DEFAULT_HOST.to_string());
    let port = args.port
        .or_else(|| ctx.config.server_port())
        .unwrap_or(DEFAULT_PORT);
    info!(host = %host, port, fallback_only = !ctx.collaborators.is_available(), "Starting API server");

    let workspace = Workspace::new(ctx.collaborators.clone(), ctx.pacing(false));
    let app = api::build_router(api::AppState::new(workspace));

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| InfraFlowError::Internal(format!("Server error: {}", e)))?;

    Ok(())
}
