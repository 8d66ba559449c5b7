//! Marketing Insights Bot - Main Entry Point
//!
//! A Telegram bot that walks small businesses through a marketing
//! questionnaire and answers digital-marketing questions.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::mpsc;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use marketing_insights_bot::assistant::{OpenAiClient, QuestionRelay};
use marketing_insights_bot::commands::CommandHandler;
use marketing_insights_bot::config::{BotSettings, Credentials, IndustryCatalog};
use marketing_insights_bot::insights::BenchmarkFetcher;
use marketing_insights_bot::telegram::{PollerMessage, TelegramBot, UpdatePoller};

/// Telegram bot for digital-marketing insights.
#[derive(Parser, Debug)]
#[command(name = "marketing_bot")]
#[command(about = "Collect a business marketing profile and answer marketing questions on Telegram")]
#[command(version)]
struct Args {
    /// Path to an industry catalog JSON file (overrides INDUSTRY_CATALOG).
    #[arg(short, long)]
    catalog: Option<String>,

    /// Path to the .env file for environment variables.
    #[arg(long, default_value = ".env")]
    env_file: String,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Include every collected answer in the analysis summary.
    #[arg(long)]
    include_all_fields: bool,

    /// Write the built-in industry catalog to a file and exit.
    #[arg(long)]
    generate_catalog: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    init_logging(&args.log_level);

    // Handle example catalog generation
    if args.generate_catalog {
        return generate_example_catalog();
    }

    // Load environment variables
    if let Err(e) = dotenvy::from_filename(&args.env_file) {
        debug!("Could not load .env file ({}): {}", args.env_file, e);
    }

    // Secrets are required before anything is served
    let credentials =
        Credentials::from_env().context("Failed to load credentials from environment")?;

    let mut settings = BotSettings::from_env_with_defaults();
    if let Some(path) = args.catalog {
        settings.catalog_path = Some(path.into());
    }
    if args.include_all_fields {
        settings.summary_include_all_fields = true;
    }

    let catalog = match &settings.catalog_path {
        Some(path) => IndustryCatalog::load_from_file(path)
            .with_context(|| format!("Failed to load industry catalog from {}", path.display()))?,
        None => IndustryCatalog::builtin(),
    };
    catalog
        .validate()
        .context("Industry catalog validation failed")?;

    info!(
        "Loaded {} industries (model: {}, full summary: {})",
        catalog.len(),
        settings.model,
        settings.summary_include_all_fields
    );

    let completion = Arc::new(OpenAiClient::new(credentials.api_key.clone(), &settings));
    let handler = Arc::new(
        CommandHandler::new(
            catalog,
            QuestionRelay::new(completion),
            BenchmarkFetcher::new(settings.benchmarks_url.clone()),
        )
        .with_summary_all_fields(settings.summary_include_all_fields),
    );

    // Connect to Telegram
    let bot = TelegramBot::connect(&credentials.bot_token, settings.poll_timeout_secs)
        .await
        .context("Failed to connect to Telegram")?;
    let bot = Arc::new(bot);

    let (poller_tx, poller_rx) = mpsc::channel::<PollerMessage>(1);
    let poller = UpdatePoller::new(Arc::clone(&bot), Arc::clone(&handler));

    info!(
        "Starting marketing bot as @{}",
        bot.username().unwrap_or("unknown")
    );

    let mut poller_handle = tokio::spawn(poller.run(poller_rx));

    info!("Bot is running. Use Ctrl+C to stop.");

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down...");
            let _ = poller_tx.send(PollerMessage::Shutdown).await;
            let _ = poller_handle.await;
        }
        joined = &mut poller_handle => {
            match joined {
                Ok(Ok(())) => info!("Poller stopped"),
                Ok(Err(e)) => {
                    error!("Poller stopped: {e}");
                    return Err(e).context("Telegram polling failed");
                }
                Err(e) => return Err(e).context("Poller task panicked"),
            }
        }
    }

    info!("Shutting down...");
    Ok(())
}

/// Initializes the logging subsystem.
fn init_logging(level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Writes the built-in catalog as an editable example.
fn generate_example_catalog() -> Result<()> {
    let example = IndustryCatalog::builtin();
    example.save_to_file("industries.example.json")?;

    println!("✓ Example catalog written to: industries.example.json");
    println!("\nTo use this bot:");
    println!("1. Copy industries.example.json to industries.json and add industries");
    println!("2. Create a .env file with BOT_TOKEN and OPENAI_API_KEY");
    println!("3. Run: marketing_bot --catalog industries.json");

    Ok(())
}
