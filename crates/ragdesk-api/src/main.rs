//! ragdesk CLI entry point.
//!
//! Binary name: `ragdesk`
//!
//! Parses CLI arguments, initializes tracing and services, then dispatches
//! to the appropriate command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use ragdesk_observe::tracing_setup::{init_tracing, shutdown_tracing, verbosity_filter};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(verbosity_filter(cli.verbose, cli.quiet), cli.otel)
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "ragdesk", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init(cli.server.as_deref()).await?;

    match cli.command {
        Commands::Chat { context, pick } => {
            cli::chat::loop_runner::run_chat_loop(&state, context, pick).await?;
        }

        Commands::Ask { query, context } => {
            cli::ask::ask(&state, &query.join(" "), context.as_deref(), cli.json, cli.quiet).await?;
        }

        Commands::Upload { company, path } => {
            cli::upload::upload_manual(&state, &company, path.as_deref(), cli.json, cli.quiet)
                .await?;
        }

        Commands::Contexts => {
            cli::contexts::list_contexts(&state, cli.json).await?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}
