mod catalog;
mod commands;
mod gateway;

use clap::{Parser, Subcommand};
use relay_channels::telegram::TelegramChannel;
use relay_core::{config, traits::Provider};
use relay_memory::Store;
use relay_providers::OpenAiProvider;
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "relay",
    version,
    about = "Customer-support chat relay between Telegram and an AI assistant"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the relay.
    Start,
    /// Check configuration and provider availability.
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match cli.command {
        Commands::Start => {
            let cfg = config::load(&cli.config)?;

            let provider = Arc::new(OpenAiProvider::from_config(&cfg.provider));
            if !provider.is_available().await {
                anyhow::bail!("provider '{}' is not available", provider.name());
            }

            let channel = Arc::new(TelegramChannel::new(&cfg.telegram));
            let store = Store::new(&cfg.memory).await?;
            let catalog = catalog::Catalog::load(&cfg.catalog.path);

            println!("Relay — starting...");
            let gw = gateway::Gateway::new(provider, channel, store, catalog, &cfg);
            gw.run().await?;
        }
        Commands::Status => {
            let cfg = config::load(&cli.config)?;
            println!("Relay — Status Check\n");
            println!("Config: {}", cli.config);
            println!("Model: {}", cfg.provider.model);
            println!("Operator group: {}", cfg.telegram.operator_group_id);
            println!("Resume delay: {} min", cfg.handoff.resume_after_mins);
            println!();

            let provider = OpenAiProvider::from_config(&cfg.provider);
            println!(
                "  provider: {}",
                if provider.is_available().await {
                    "available"
                } else {
                    "not available"
                }
            );

            let store = Store::new(&cfg.memory).await?;
            println!("  customers: {}", store.count_customers().await?);
            println!("  messages: {}", store.count_messages().await?);
            println!("  taught facts: {}", store.count_knowledge().await?);
        }
    }

    Ok(())
}
