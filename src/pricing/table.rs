use crate::error::QuoteError;
use crate::pricing::calculator::{parse_hours, parse_price};
use crate::pricing::models::{PricingTier, RateEntry, ServiceMeta, ServicePricing, ServiceType};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Upper bound of the crew selector when the table does not set one
pub const DEFAULT_MAX_CREW: u32 = 4;

fn default_max_crew() -> u32 {
    DEFAULT_MAX_CREW
}

/// Unvalidated price table as it appears in configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PriceTableConfig {
    #[serde(default = "default_max_crew")]
    pub max_crew: u32,
    pub photography: ServicePricing,
    pub videography: ServicePricing,
    pub photobooth: ServicePricing,
}

/// Read-only price table
///
/// Every instance has passed [`PriceTable::validate`], so lookups inside the
/// configurator can rely on non-empty tiers, non-empty rate lists, parseable
/// prices and in-range default selections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PriceTableConfig")]
pub struct PriceTable {
    max_crew: u32,
    photography: ServicePricing,
    videography: ServicePricing,
    photobooth: ServicePricing,
}

impl TryFrom<PriceTableConfig> for PriceTable {
    type Error = QuoteError;

    fn try_from(raw: PriceTableConfig) -> Result<Self, Self::Error> {
        Self::new(raw.max_crew, raw.photography, raw.videography, raw.photobooth)
    }
}

impl Default for PriceTable {
    fn default() -> Self {
        crate::pricing::reference::reference_table()
    }
}

impl PriceTable {
    /// Build and validate a price table
    pub fn new(
        max_crew: u32,
        photography: ServicePricing,
        videography: ServicePricing,
        photobooth: ServicePricing,
    ) -> Result<Self, QuoteError> {
        let table = Self::from_parts(max_crew, photography, videography, photobooth);
        table.validate()?;
        table.log_summary("Price table loaded");
        Ok(table)
    }

    /// Emit tier counts at info level
    pub fn log_summary(&self, message: &str) {
        info!(
            photography_tiers = self.photography.tiers.len(),
            videography_tiers = self.videography.tiers.len(),
            photobooth_tiers = self.photobooth.tiers.len(),
            max_crew = self.max_crew,
            "{}",
            message
        );
    }

    /// Assemble without validation
    pub(crate) fn from_parts(
        max_crew: u32,
        photography: ServicePricing,
        videography: ServicePricing,
        photobooth: ServicePricing,
    ) -> Self {
        Self {
            max_crew,
            photography,
            videography,
            photobooth,
        }
    }

    /// Parse and validate a standalone TOML price table
    pub fn from_toml_str(content: &str) -> Result<Self, QuoteError> {
        let raw: PriceTableConfig = toml::from_str(content)?;
        raw.try_into()
    }

    pub fn max_crew(&self) -> u32 {
        self.max_crew
    }

    pub fn service(&self, service_type: ServiceType) -> &ServicePricing {
        match service_type {
            ServiceType::Photography => &self.photography,
            ServiceType::Videography => &self.videography,
            ServiceType::Photobooth => &self.photobooth,
        }
    }

    pub fn tiers(&self, service_type: ServiceType) -> &[PricingTier] {
        &self.service(service_type).tiers
    }

    /// Rate list of one tier
    pub fn rates_for(
        &self,
        service_type: ServiceType,
        tier_index: usize,
    ) -> Result<&[RateEntry], QuoteError> {
        let tiers = self.tiers(service_type);
        tiers
            .get(tier_index)
            .map(|tier| tier.rates.as_slice())
            .ok_or_else(|| QuoteError::tier_out_of_range(tier_index, tiers.len()))
    }

    pub fn tier_labels(&self, service_type: ServiceType) -> Vec<&str> {
        self.tiers(service_type)
            .iter()
            .map(|tier| tier.label.as_str())
            .collect()
    }

    pub fn meta_for(&self, service_type: ServiceType) -> ServiceMeta<'_> {
        self.service(service_type).meta()
    }

    /// Resolve a tier by index or by (short) label, case-insensitively
    pub fn find_tier(&self, service_type: ServiceType, query: &str) -> Result<usize, QuoteError> {
        let tiers = self.tiers(service_type);
        if let Ok(index) = query.trim().parse::<usize>() {
            return if index < tiers.len() {
                Ok(index)
            } else {
                Err(QuoteError::tier_out_of_range(index, tiers.len()))
            };
        }

        let needle = query.trim().to_lowercase();
        tiers
            .iter()
            .position(|tier| {
                tier.label.to_lowercase() == needle || tier.short_label().to_lowercase() == needle
            })
            .ok_or_else(|| {
                QuoteError::NotFound(format!(
                    "No {} tier named '{}'. Available tiers: {}",
                    service_type,
                    query,
                    self.tier_labels(service_type).join(", ")
                ))
            })
    }

    /// Resolve a duration by index or by label within one tier
    pub fn find_duration(
        &self,
        service_type: ServiceType,
        tier_index: usize,
        query: &str,
    ) -> Result<usize, QuoteError> {
        let rates = self.rates_for(service_type, tier_index)?;
        if let Ok(index) = query.trim().parse::<usize>() {
            return if index < rates.len() {
                Ok(index)
            } else {
                Err(QuoteError::duration_out_of_range(index, rates.len()))
            };
        }

        let needle = query.trim().to_lowercase();
        rates
            .iter()
            .position(|rate| rate.duration.to_lowercase() == needle)
            .ok_or_else(|| {
                QuoteError::NotFound(format!(
                    "No duration '{}' in tier {}. Available durations: {}",
                    query,
                    tier_index,
                    rates
                        .iter()
                        .map(|rate| rate.duration.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            })
    }

    /// Check every integrity rule the configurator depends on
    pub fn validate(&self) -> Result<(), QuoteError> {
        if self.max_crew == 0 {
            return Err(QuoteError::InvalidTable(
                "max_crew must be at least 1".to_string(),
            ));
        }

        for service_type in ServiceType::ALL {
            validate_service(service_type, self.service(service_type))?;
        }

        Ok(())
    }
}

fn validate_service(service_type: ServiceType, pricing: &ServicePricing) -> Result<(), QuoteError> {
    if pricing.name.trim().is_empty() {
        return Err(QuoteError::InvalidTable(format!(
            "{}: service name cannot be empty",
            service_type
        )));
    }

    if pricing.allow_crew && pricing.crew_label.trim().is_empty() {
        return Err(QuoteError::InvalidTable(format!(
            "{}: crew_label is required when allow_crew is true",
            service_type
        )));
    }

    if pricing.tiers.is_empty() {
        return Err(QuoteError::InvalidTable(format!(
            "{}: at least one tier must be configured",
            service_type
        )));
    }

    for (tier_index, tier) in pricing.tiers.iter().enumerate() {
        if tier.label.trim().is_empty() {
            return Err(QuoteError::InvalidTable(format!(
                "{}: tier {} has an empty label",
                service_type, tier_index
            )));
        }

        if tier.rates.is_empty() {
            return Err(QuoteError::InvalidTable(format!(
                "{}: tier '{}' has no rates",
                service_type, tier.label
            )));
        }

        let mut previous_hours: Option<u32> = None;
        for rate in &tier.rates {
            if rate.duration.trim().is_empty() {
                return Err(QuoteError::InvalidTable(format!(
                    "{}: tier '{}' has a rate with an empty duration",
                    service_type, tier.label
                )));
            }

            let price = parse_price(&rate.price).map_err(|e| {
                QuoteError::InvalidTable(format!(
                    "{}: tier '{}', duration '{}': {}",
                    service_type, tier.label, rate.duration, e
                ))
            })?;

            if price == 0 {
                return Err(QuoteError::InvalidTable(format!(
                    "{}: tier '{}', duration '{}': price must be greater than $0",
                    service_type, tier.label, rate.duration
                )));
            }

            // Durations ascend strictly; tier changes clamp by index
            let hours = parse_hours(&rate.duration);
            if let Some(previous) = previous_hours {
                if hours <= previous {
                    return Err(QuoteError::InvalidTable(format!(
                        "{}: tier '{}': duration '{}' ({}h) must be longer than the one before it ({}h)",
                        service_type, tier.label, rate.duration, hours, previous
                    )));
                }
            }
            previous_hours = Some(hours);
        }
    }

    let defaults = pricing.defaults();
    let default_tier = pricing.tiers.get(defaults.tier).ok_or_else(|| {
        QuoteError::InvalidTable(format!(
            "{}: default_tier {} out of range (tiers: {})",
            service_type,
            defaults.tier,
            pricing.tiers.len()
        ))
    })?;

    if defaults.duration >= default_tier.rates.len() {
        return Err(QuoteError::InvalidTable(format!(
            "{}: default_duration {} out of range for tier '{}' (durations: {})",
            service_type,
            defaults.duration,
            default_tier.label,
            default_tier.rates.len()
        )));
    }

    debug!(service = %service_type, tiers = pricing.tiers.len(), "Service pricing validated");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn single_tier_service(price: &str) -> ServicePricing {
        ServicePricing {
            name: "Test".to_string(),
            crew_label: "Crew".to_string(),
            allow_crew: true,
            default_tier: 0,
            default_duration: 0,
            tiers: vec![PricingTier::new(
                "Only",
                vec![RateEntry::new("1 Hour", price)],
            )],
        }
    }

    fn table_with(photography: ServicePricing) -> Result<PriceTable, QuoteError> {
        let reference = PriceTable::default();
        PriceTable::new(
            DEFAULT_MAX_CREW,
            photography,
            reference.service(ServiceType::Videography).clone(),
            reference.service(ServiceType::Photobooth).clone(),
        )
    }

    #[test]
    fn test_rates_for_out_of_range() {
        let table = PriceTable::default();
        let err = table.rates_for(ServiceType::Photobooth, 3).unwrap_err();
        assert_eq!(err, QuoteError::tier_out_of_range(3, 3));
    }

    #[test]
    fn test_tier_labels_in_order() {
        let table = PriceTable::default();
        let labels = table.tier_labels(ServiceType::Photography);
        assert_eq!(labels.len(), 5);
        assert_eq!(labels[2], "Enthusiast (Recommended)");
        assert_eq!(labels[4], "Director");
    }

    #[test]
    fn test_meta_for_photobooth_disallows_crew() {
        let table = PriceTable::default();
        assert!(!table.meta_for(ServiceType::Photobooth).allow_crew);
        assert!(table.meta_for(ServiceType::Photography).allow_crew);
    }

    #[test]
    fn test_validate_rejects_malformed_price() {
        let result = table_with(single_tier_service("$12O"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("duration '1 Hour'"));
    }

    #[test]
    fn test_validate_rejects_descending_durations() {
        let mut service = single_tier_service("$400");
        service.tiers[0].rates = vec![
            RateEntry::new("4 Hours", "$400"),
            RateEntry::new("1 Hour", "$100"),
        ];

        let err = table_with(service).unwrap_err();
        assert!(err.to_string().contains("duration '1 Hour' (1h) must be longer"), "{}", err);
    }

    #[test]
    fn test_validate_rejects_repeated_duration() {
        let mut service = single_tier_service("$100");
        service.tiers[0].rates = vec![
            RateEntry::new("2 Hours", "$200"),
            RateEntry::new("2 Hours", "$250"),
        ];

        assert!(table_with(service).is_err());
    }

    #[test]
    fn test_validate_accepts_ascending_durations() {
        let mut service = single_tier_service("$100");
        service.tiers[0].rates = vec![
            RateEntry::new("1 Hour", "$100"),
            RateEntry::new("3 Hours", "$280"),
            RateEntry::new("10 Hours", "$900"),
        ];

        assert!(table_with(service).is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_price() {
        let err = table_with(single_tier_service("$0")).unwrap_err();
        assert!(err.to_string().contains("price must be greater than $0"), "{}", err);
    }

    #[test]
    fn test_from_toml_str_rejects_unordered_and_free_rates() {
        let content = r#"
            [photography]
            name = "Photography"
            crew_label = "Photographers"
            allow_crew = true
            tiers = [
                { label = "Basic", rates = [
                    { duration = "4 Hours", price = "$400" },
                    { duration = "1 Hour", price = "$100" },
                ] },
            ]

            [videography]
            name = "Videography"
            crew_label = "Videographers"
            allow_crew = true
            tiers = [{ label = "Basic", rates = [{ duration = "1 Hour", price = "$0" }] }]

            [photobooth]
            name = "Photobooth"
            crew_label = "Booths"
            allow_crew = false
            tiers = [{ label = "Basic", rates = [{ duration = "2 Hours", price = "$500" }] }]
        "#;
        let err = PriceTable::from_toml_str(content).unwrap_err();
        assert!(err.to_string().contains("photography: tier 'Basic'"), "{}", err);

        let content = content.replace(
            r#"{ duration = "4 Hours", price = "$400" },
                    { duration = "1 Hour", price = "$100" },"#,
            r#"{ duration = "1 Hour", price = "$100" },
                    { duration = "4 Hours", price = "$400" },"#,
        );
        let err = PriceTable::from_toml_str(&content).unwrap_err();
        assert!(err.to_string().contains("videography"), "{}", err);
        assert!(err.to_string().contains("greater than $0"), "{}", err);
    }

    #[derive(Clone, Default)]
    struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CaptureWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_log_summary_emits_tier_counts() {
        let writer = CaptureWriter::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer({
                let writer = writer.clone();
                move || writer.clone()
            })
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            PriceTable::default().log_summary("Price table in use");
        });

        let output = String::from_utf8(writer.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Price table in use"), "{}", output);
        assert!(output.contains("photography_tiers=5"), "{}", output);
        assert!(output.contains("photobooth_tiers=3"), "{}", output);
        assert!(output.contains("max_crew=4"), "{}", output);
    }

    #[test]
    fn test_validate_rejects_empty_rates() {
        let mut service = single_tier_service("$100");
        service.tiers[0].rates.clear();

        let result = table_with(service);
        assert!(result.unwrap_err().to_string().contains("has no rates"));
    }

    #[test]
    fn test_validate_rejects_default_out_of_range() {
        let mut service = single_tier_service("$100");
        service.default_duration = 1;

        let result = table_with(service);
        assert!(result.unwrap_err().to_string().contains("default_duration 1"));
    }

    #[test]
    fn test_validate_rejects_zero_max_crew() {
        let reference = PriceTable::default();
        let result = PriceTable::new(
            0,
            reference.service(ServiceType::Photography).clone(),
            reference.service(ServiceType::Videography).clone(),
            reference.service(ServiceType::Photobooth).clone(),
        );
        assert!(result.unwrap_err().to_string().contains("max_crew"));
    }

    #[test]
    fn test_find_tier_by_index_and_label() {
        let table = PriceTable::default();
        assert_eq!(table.find_tier(ServiceType::Photography, "4").unwrap(), 4);
        assert_eq!(table.find_tier(ServiceType::Photography, "enthusiast (recommended)").unwrap(), 2);
        assert_eq!(table.find_tier(ServiceType::Photobooth, "package c").unwrap(), 2);
        assert!(table.find_tier(ServiceType::Photography, "9").is_err());
        assert!(table.find_tier(ServiceType::Photography, "Astronaut").is_err());
    }

    #[test]
    fn test_find_duration_by_label() {
        let table = PriceTable::default();
        assert_eq!(table.find_duration(ServiceType::Photobooth, 0, "3 hours").unwrap(), 1);
        assert_eq!(table.find_duration(ServiceType::Photography, 2, "0").unwrap(), 0);
        assert!(table.find_duration(ServiceType::Photobooth, 0, "1 Hour").is_err());
    }

    #[test]
    fn test_from_toml_str() {
        let content = r#"
            max_crew = 2

            [photography]
            name = "Photography"
            crew_label = "Photographers"
            allow_crew = true
            tiers = [
                { label = "Basic", rates = [{ duration = "1 Hour", price = "$100" }] },
            ]

            [videography]
            name = "Videography"
            crew_label = "Videographers"
            allow_crew = true
            tiers = [
                { label = "Basic", rates = [{ duration = "1 Hour", price = "$1,100" }] },
            ]

            [photobooth]
            name = "Photobooth"
            crew_label = "Booths"
            allow_crew = false
            tiers = [
                { label = "Package A — Everything", recommended = true, rates = [{ duration = "2 Hours", price = "$500" }] },
            ]
        "#;

        let table = PriceTable::from_toml_str(content).unwrap();
        assert_eq!(table.max_crew(), 2);
        assert_eq!(table.rates_for(ServiceType::Videography, 0).unwrap()[0].price, "$1,100");
        assert!(table.tiers(ServiceType::Photobooth)[0].is_recommended());
    }

    #[test]
    fn test_from_toml_str_runs_validation() {
        let content = r#"
            [photography]
            name = "Photography"
            crew_label = "Photographers"
            allow_crew = true
            tiers = []

            [videography]
            name = "Videography"
            crew_label = "Videographers"
            allow_crew = true
            tiers = []

            [photobooth]
            name = "Photobooth"
            crew_label = ""
            allow_crew = false
            tiers = []
        "#;

        let err = PriceTable::from_toml_str(content).unwrap_err();
        assert!(err.to_string().contains("at least one tier"));
    }
}
