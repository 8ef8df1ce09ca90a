//! Pulse - Tool-Orchestrating Reasoning Agent
//!
//! Main entry point: serves the reasoning loop over HTTP, or runs a
//! single session from the command line.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pulse::agent::Orchestrator;
use pulse::core::Config;
use pulse::llm::InferenceClient;
use pulse::server::{self, AppState};
use pulse::state::{FileStateStore, NullStateStore, StateStore};
use pulse::tools::HttpToolDispatcher;

/// Pulse - Tool-Orchestrating Reasoning Agent
#[derive(Parser, Debug)]
#[command(name = "pulse")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Run a single session with this goal and print the outcome as JSON
    #[arg(long, short = 'g')]
    goal: Option<String>,

    /// Model identifier override
    #[arg(long, short = 'm')]
    model: Option<String>,

    /// Bind address override for the HTTP server (host:port)
    #[arg(long, short = 'b')]
    bind: Option<String>,

    /// Disable session state persistence
    #[arg(long)]
    no_state: bool,

    /// Enable debug output
    #[arg(long, short = 'd')]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // Build configuration
    let mut config = Config::load();

    // Apply CLI overrides
    if let Some(model) = args.model {
        config.inference.model_id = model;
    }

    if let Some(ref bind) = args.bind {
        let (host, port) = bind
            .rsplit_once(':')
            .with_context(|| format!("invalid bind address '{bind}', expected host:port"))?;
        config.server.host = host.to_string();
        config.server.port = port
            .parse()
            .with_context(|| format!("invalid port in bind address '{bind}'"))?;
    }

    if args.no_state {
        config.state.dir = None;
    }

    if args.debug {
        config.agent.debug = true;
    }

    let default_filter = if config.agent.debug {
        "pulse=debug"
    } else {
        "pulse=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let store: Arc<dyn StateStore> = match config.state.dir {
        Some(ref dir) => Arc::new(FileStateStore::new(dir)),
        None => Arc::new(NullStateStore),
    };

    let orchestrator = Orchestrator::new(
        &config,
        Arc::new(InferenceClient::from_config(&config)),
        Arc::new(HttpToolDispatcher::from_config(&config)),
        store,
    );

    // Single session mode
    if let Some(goal) = args.goal {
        let outcome = orchestrator.run(&goal).await?;
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    let state = AppState {
        orchestrator,
        default_goal: config.agent.default_goal.clone(),
    };

    server::run(state, &config.server.addr()).await?;
    Ok(())
}
