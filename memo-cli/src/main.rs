//! memoctl - run and operate the memo service
//!
//! - `serve`: HTTP API plus the built front-end
//! - `init-db` / `create-db`: database provisioning
//! - `github-token`: print the deployment GitHub token
//! - `check`: secret store, GitHub and PostgreSQL connectivity report

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

mod commands;
mod tracing_setup;

use tracing_setup::{LogFormat, TracingConfig};

#[derive(Parser, Debug)]
#[command(
    name = "memoctl",
    author,
    version,
    about = "Memo service: HTTP API, provisioning and connectivity checks",
    long_about = "Run the memo HTTP service and its operational helpers. Configuration comes from \
                  the environment, optionally seeded from config/config.<APP_PROFILE>.env."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    /// Log output format
    #[arg(long, global = true, value_enum, env = "LOG_FORMAT", default_value = "compact")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve(commands::serve::ServeArgs),
    /// Create the database and schema if missing, then report
    InitDb,
    /// Create the database if missing and verify connectivity
    CreateDb,
    /// Print the deployment GitHub token to stdout
    GithubToken,
    /// Check secret store, GitHub and PostgreSQL connectivity
    Check,
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)] // PowerShell is a proper noun, not a suffix
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Before parsing so profile files can supply LOG_FORMAT and friends
    let profile = memo_core::env::load_profile();
    let cli = Cli::parse();

    tracing_setup::init(&TracingConfig {
        debug: cli.debug,
        format: cli.log_format,
    })
    .ok();

    if let Some(path) = profile {
        info!(path = %path.display(), "Loaded profile env file");
    }

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::InitDb => commands::run_init_db().await?,
        Commands::CreateDb => commands::run_create_db().await?,
        Commands::GithubToken => commands::run_github_token().await?,
        Commands::Check => commands::run_check().await?,
        Commands::Completions(args) => run_completions(args),
    }

    Ok(())
}

fn run_completions(args: CompletionsArgs) {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    };

    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}
