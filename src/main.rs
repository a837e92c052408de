use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

mod cli;
mod commands;

use studio_quote::{config, init_tracing};

fn main() -> Result<()> {
    // Parse CLI arguments
    let args = cli::Cli::parse();

    let cfg = config::load_config(&args.config)
        .with_context(|| format!("Failed to load {}", args.config.display()))?;

    init_tracing(&cfg.logging.level, &cfg.logging.format);

    // Loading ran before the subscriber existed, so report what was loaded now
    info!(
        path = %args.config.display(),
        pricing = cfg.pricing_source(),
        "Configuration loaded"
    );
    cfg.price_table().log_summary("Price table in use");

    // Dispatch to appropriate command handler
    match args.get_command() {
        cli::Commands::Quote {
            service,
            tier,
            duration,
            crew,
            json,
        } => {
            let request = commands::quote::QuoteRequest {
                service,
                tier,
                duration,
                crew,
            };
            commands::quote::execute(&cfg, &request, json)?;
        }
        cli::Commands::Tiers { service } => {
            commands::tiers::execute(&cfg, service);
        }
        cli::Commands::Config { action } => match action {
            cli::ConfigCommands::Show => commands::config::show(&cfg)?,
            cli::ConfigCommands::Validate => commands::config::validate(&cfg, &args.config),
        },
        cli::Commands::Version => {
            println!("Studio Quote v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
