use crate::error::QuoteError;
use crate::pricing::{MessageTemplate, PriceTable};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "studio-quote.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub message: MessageTemplate,
    /// Replaces the built-in price list when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing: Option<PriceTable>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// "text" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

impl Config {
    /// Configured price table, or the built-in one
    pub fn price_table(&self) -> PriceTable {
        self.pricing.clone().unwrap_or_default()
    }

    pub fn pricing_source(&self) -> &'static str {
        if self.pricing.is_some() {
            "configuration"
        } else {
            "built-in"
        }
    }
}

/// Load configuration from `path` (optional) and `STUDIO_QUOTE__*` environment variables
///
/// A missing file is not an error; every section has defaults.
pub fn load_config(path: &Path) -> Result<Config, QuoteError> {
    let config = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix("STUDIO_QUOTE").separator("__"))
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

fn validate_config(cfg: &Config) -> Result<(), QuoteError> {
    match cfg.logging.format.as_str() {
        "text" | "json" => {}
        other => {
            return Err(QuoteError::Config(format!(
                "Invalid log format '{}': expected 'text' or 'json'",
                other
            )))
        }
    }

    if cfg.message.greeting.trim().is_empty() {
        return Err(QuoteError::Config("Message greeting cannot be empty".to_string()));
    }

    if cfg.message.closing.trim().is_empty() {
        return Err(QuoteError::Config("Message closing cannot be empty".to_string()));
    }

    // Deserializing a PriceTable already validates it; this covers tables built in code
    if let Some(table) = &cfg.pricing {
        table.validate()?;
    }

    Ok(())
}
