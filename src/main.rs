//! DealDesk binary: startup wiring and the `check` subcommand.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use dealdesk::config::{config_dir, load_config, Config};
use dealdesk::credentials::resolve_api_key;
use dealdesk::data::analytics::{pipeline_metrics, stage_summary};
use dealdesk::data::loader::load_dataset;
use dealdesk::gateway::groq::GroqClient;
use dealdesk::prompts::format_table;
use dealdesk::{logging, tui};

/// Terminal sales analytics dashboard with AI-generated insights.
#[derive(Debug, Parser)]
#[command(name = "dealdesk", version, about)]
struct Cli {
    /// Path to config.toml (default: ~/.dealdesk/config.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory to read the CSV tables from (overrides config).
    #[arg(long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate the credential and data load, print the pipeline summary,
    /// and exit without starting the dashboard.
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => config_dir()?.join("config.toml"),
    };
    let mut config = load_config(&config_path).context("failed to load configuration")?;
    if let Some(dir) = cli.data_dir {
        config.data.dir = dir;
    }

    match cli.command {
        Some(Command::Check) => {
            logging::init_cli();
            run_check(&config)
        }
        None => run_dashboard(config).await,
    }
}

/// Full startup followed by the interactive dashboard.
async fn run_dashboard(config: Config) -> Result<()> {
    let _logging_guard = logging::init_tui(&config_dir()?.join("logs"))?;
    info!("dealdesk starting");

    // Fatal startup taxonomy: credential first, then the data load. Nothing
    // renders unless both succeed.
    let api_key = resolve_api_key()?;
    let dataset = Arc::new(load_dataset(&config.data)?);
    let gateway = Arc::new(GroqClient::new(config.model.clone(), api_key));
    info!(model = gateway.model_id(), "gateway client ready");

    tui::run(dataset, gateway).await
}

/// Headless smoke path: same fatal-error taxonomy as the dashboard, with a
/// plain-text summary on stdout.
fn run_check(config: &Config) -> Result<()> {
    resolve_api_key()?;
    println!("credential: ok");

    let dataset = load_dataset(&config.data)?;
    println!(
        "tables: {} accounts, {} opportunities, {} contacts, {} tasks",
        dataset.accounts.len(),
        dataset.opportunities.len(),
        dataset.contacts.len(),
        dataset.tasks.len()
    );

    let metrics = pipeline_metrics(&dataset.opportunities);
    println!("total pipeline:    {:.0}", metrics.total_pipeline);
    println!("weighted pipeline: {:.0}", metrics.weighted_pipeline);
    println!("active deals:      {}", metrics.active_deals);

    let stages = stage_summary(&dataset.opportunities);
    let rows: Vec<Vec<String>> = stages
        .iter()
        .map(|s| vec![s.stage.clone(), format!("{:.0}", s.amount)])
        .collect();
    println!("\n{}", format_table(&["stage", "amount"], &rows));

    Ok(())
}
