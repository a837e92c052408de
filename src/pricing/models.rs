use crate::error::QuoteError;
use serde::{Deserialize, Serialize};

/// Top-level booking category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    Photography,
    Videography,
    Photobooth,
}

impl ServiceType {
    pub const ALL: [ServiceType; 3] = [
        ServiceType::Photography,
        ServiceType::Videography,
        ServiceType::Photobooth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::Photography => "photography",
            ServiceType::Videography => "videography",
            ServiceType::Photobooth => "photobooth",
        }
    }
}

impl std::str::FromStr for ServiceType {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "photography" | "photo" => Ok(ServiceType::Photography),
            "videography" | "video" => Ok(ServiceType::Videography),
            "photobooth" | "booth" => Ok(ServiceType::Photobooth),
            _ => Err(QuoteError::UnknownService(s.to_string())),
        }
    }
}

impl std::fmt::Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Display metadata for a service type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceMeta<'a> {
    pub name: &'a str,
    pub crew_label: &'a str,
    /// When false the crew quantity is pinned to 1
    pub allow_crew: bool,
}

/// One (duration, price) pair within a tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateEntry {
    /// Human label such as "2 Hours"
    pub duration: String,
    /// Display price such as "$1,200"
    pub price: String,
}

impl RateEntry {
    pub fn new(duration: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            duration: duration.into(),
            price: price.into(),
        }
    }
}

/// A skill or package level within a service type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingTier {
    pub label: String,

    /// Explicit short name; derived from `label` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_label: Option<String>,

    /// Explicit recommendation flag; derived from `label` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended: Option<bool>,

    pub rates: Vec<RateEntry>,
}

impl PricingTier {
    pub fn new(label: impl Into<String>, rates: Vec<RateEntry>) -> Self {
        Self {
            label: label.into(),
            short_label: None,
            recommended: None,
            rates,
        }
    }

    /// Whether this tier is the one the studio steers customers towards
    ///
    /// Falls back to a case-insensitive "recommended" substring match on the label.
    pub fn is_recommended(&self) -> bool {
        self.recommended
            .unwrap_or_else(|| self.label.to_lowercase().contains("recommended"))
    }

    /// Compact tier name for buttons and tables
    ///
    /// Falls back to the label text before an em-dash, e.g.
    /// "Package A — Full Service (Recommended)" -> "Package A".
    pub fn short_label(&self) -> &str {
        if let Some(short) = &self.short_label {
            return short.as_str();
        }
        match self.label.split_once('—') {
            Some((head, _)) => head.trim(),
            None => self.label.trim(),
        }
    }
}

/// Selection a fresh configurator starts from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultSelection {
    pub tier: usize,
    pub duration: usize,
}

/// Everything the configurator knows about one service type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServicePricing {
    pub name: String,
    pub crew_label: String,
    pub allow_crew: bool,
    #[serde(default)]
    pub default_tier: usize,
    #[serde(default)]
    pub default_duration: usize,
    /// Ordered cheapest first
    pub tiers: Vec<PricingTier>,
}

impl ServicePricing {
    pub fn meta(&self) -> ServiceMeta<'_> {
        ServiceMeta {
            name: &self.name,
            crew_label: &self.crew_label,
            allow_crew: self.allow_crew,
        }
    }

    pub fn defaults(&self) -> DefaultSelection {
        DefaultSelection {
            tier: self.default_tier,
            duration: self.default_duration,
        }
    }
}
