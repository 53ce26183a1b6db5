use clap::{Parser, Subcommand, Args};

#[derive(Parser)]
#[command(name = "infraflow", version, about = "AI-assisted infrastructure generator with a simulated CI/CD pipeline")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// YAML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate Terraform and Ansible code from a prompt
    Generate(GenerateArgs),
    /// Generate a project and run the simulated pipeline over it
    Run(RunArgs),
    /// Start the HTTP REST API server
    Serve(ServeArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Collaborator selection shared by every subcommand that talks to a model.
#[derive(Args, Clone, Default)]
pub struct LlmArgs {
    /// LLM provider: gemini, openai, local
    #[arg(long)]
    pub provider: Option<String>,

    /// Model identifier for both roles
    #[arg(long)]
    pub model: Option<String>,

    /// LLM API key (or use env vars)
    #[arg(long)]
    pub api_key: Option<String>,
}

#[derive(Args, Clone)]
pub struct GenerateArgs {
    /// Natural-language description of the infrastructure
    #[arg(short, long)]
    pub prompt: String,

    /// Print the generated project as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub llm: LlmArgs,
}

#[derive(Args, Clone)]
pub struct RunArgs {
    /// Natural-language description of the infrastructure
    #[arg(short, long)]
    pub prompt: String,

    /// Deliver log lines without pacing delays
    #[arg(long)]
    pub instant: bool,

    #[command(flatten)]
    pub llm: LlmArgs,
}

#[derive(Args, Clone)]
pub struct ServeArgs {
    /// Listen port [default: 8080]
    #[arg(long)]
    pub port: Option<u16>,

    /// Listen address [default: 0.0.0.0]
    #[arg(long)]
    pub host: Option<String>,

    #[command(flatten)]
    pub llm: LlmArgs,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Config file to validate
    pub config: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_with_globals() {
        let cli = Cli::parse_from([
            "infraflow", "-vv", "--no-color", "run", "--prompt", "an EKS cluster", "--instant",
        ]);
        assert_eq!(cli.verbose, 2);
        assert!(cli.no_color);
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.prompt, "an EKS cluster");
                assert!(args.instant);
                assert!(args.llm.provider.is_none());
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_parse_serve_defaults_absent() {
        let cli = Cli::parse_from(["infraflow", "serve", "-c", "infraflow.yaml"]);
        assert_eq!(cli.config.as_deref(), Some("infraflow.yaml"));
        match cli.command {
            Commands::Serve(args) => {
                assert!(args.port.is_none());
                assert!(args.host.is_none());
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_generate_requires_prompt() {
        assert!(Cli::try_parse_from(["infraflow", "generate"]).is_err());
    }
}
