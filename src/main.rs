//! toolpilot - command-line entry point.
//!
//! Runs one prompt through the agent loop and prints the final answer to
//! stdout. Logs go to stderr.

use anyhow::Context;
use clap::Parser;
use toolpilot::{agent::Agent, config::Config};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(
    name = "toolpilot",
    version,
    about = "Send a prompt to an LLM that can read, write and run commands locally",
    after_help = "Environment variables:
  OPENROUTER_API_KEY     API key for OpenRouter (required)
  OPENROUTER_BASE_URL    Base URL for API (default: https://openrouter.ai/api/v1)
  OPENROUTER_BASE_MODEL  Model to use (default: anthropic/claude-haiku-4.5)
  MAX_ITERATIONS         Maximum LLM requests per run (default: 10)"
)]
struct Cli {
    /// Prompt to send to the LLM
    #[arg(short, long)]
    prompt: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "toolpilot=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if cli.prompt.trim().is_empty() {
        anyhow::bail!("prompt is required (-p \"your prompt\")");
    }

    // Load configuration
    let config = Config::from_env()?;
    info!("Loaded configuration: model={}", config.model);

    let agent = Agent::new(&config).context("Failed to build tool registry")?;
    let run = agent.run(&cli.prompt).await?;

    if let Some(answer) = run.final_text {
        println!("{}", answer);
    }

    Ok(())
}
