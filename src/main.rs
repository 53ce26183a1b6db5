use clap::Parser;
use infraflow::cli::{self, Commands};
use infraflow::config;
use infraflow::errors::InfraFlowError;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // Initialize logging
    let log_level = match (cli.quiet, cli.verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!cli.no_color)
        .with_writer(std::io::stderr)
        .init();

    if cli.no_color {
        console::set_colors_enabled(false);
    }

    let config_path = cli.config.as_deref();
    let result = match cli.command {
        Commands::Generate(args) => cli::generate::handle_generate(args, config_path).await,
        Commands::Run(args) => cli::run::handle_run(args, config_path, cli.quiet).await,
        Commands::Serve(args) => cli::serve::handle_serve(args, config_path).await,
        Commands::Validate(args) => handle_validate(args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        let exit_code = match &e {
            InfraFlowError::Config(_) | InfraFlowError::Yaml(_) => 2,
            _ => 1,
        };
        std::process::exit(exit_code);
    }
}

async fn handle_validate(args: cli::commands::ValidateArgs) -> Result<(), InfraFlowError> {
    let path = std::path::PathBuf::from(&args.config);
    let _config = config::parse_config(&path).await?;
    println!("Configuration is valid: {}", args.config);
    Ok(())
}
