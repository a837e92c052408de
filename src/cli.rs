use clap::{Parser, Subcommand};
use std::path::PathBuf;
use studio_quote::config::DEFAULT_CONFIG_FILE;
use studio_quote::pricing::ServiceType;

#[derive(Parser, Debug)]
#[command(name = "studio-quote", version, about = "Studio booking quote configurator")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE, global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Price a booking and print the shareable quote message
    Quote {
        /// photography, videography or photobooth
        #[arg(short, long)]
        service: ServiceType,

        /// Tier index or label (defaults to the recommended tier)
        #[arg(short, long)]
        tier: Option<String>,

        /// Duration index or label, e.g. "3 Hours"
        #[arg(short, long)]
        duration: Option<String>,

        /// Crew size (ignored for services without crew)
        #[arg(long)]
        crew: Option<u32>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List tiers and rates (default)
    Tiers {
        /// Only show one service type
        #[arg(short, long)]
        service: Option<ServiceType>,
    },

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Display the effective configuration, including the price table
    Show,

    /// Validate configuration file
    Validate,
}

impl Cli {
    /// Get the command to execute, defaulting to Tiers if none provided
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or(Commands::Tiers { service: None })
    }
}
