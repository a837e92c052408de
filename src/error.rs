use thiserror::Error;

/// Errors produced by the quote configurator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuoteError {
    /// A tier or duration index outside the valid range for the current selection
    #[error("{what} index {index} out of range (valid: 0..{len})")]
    OutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },

    /// A price string that is not a whole-dollar amount
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    /// Price table failed its integrity checks
    #[error("Invalid price table: {0}")]
    InvalidTable(String),

    /// Unrecognized service type name
    #[error("Unknown service type: {0}")]
    UnknownService(String),

    /// No tier or duration matches a lookup by label
    #[error("Not found: {0}")]
    NotFound(String),

    /// unit price multiplied by crew does not fit in u64
    #[error("Quote total overflowed")]
    TotalOverflow,

    /// Configuration source could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),
}

impl QuoteError {
    pub(crate) fn tier_out_of_range(index: usize, len: usize) -> Self {
        Self::OutOfRange {
            what: "tier",
            index,
            len,
        }
    }

    pub(crate) fn duration_out_of_range(index: usize, len: usize) -> Self {
        Self::OutOfRange {
            what: "duration",
            index,
            len,
        }
    }

    /// Short machine-readable name, used as a structured log field
    pub fn kind(&self) -> &'static str {
        match self {
            Self::OutOfRange { .. } => "out_of_range",
            Self::InvalidPrice(_) => "invalid_price",
            Self::InvalidTable(_) => "invalid_table",
            Self::UnknownService(_) => "unknown_service",
            Self::NotFound(_) => "not_found",
            Self::TotalOverflow => "total_overflow",
            Self::Config(_) => "config_error",
        }
    }
}

impl From<config::ConfigError> for QuoteError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<toml::de::Error> for QuoteError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(format!("TOML error: {}", err))
    }
}
