use crate::error::QuoteError;
use crate::pricing::models::ServiceType;
use crate::pricing::state::ConfiguratorState;
use crate::pricing::table::PriceTable;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use tracing::{debug, warn};

static LEADING_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("static regex is valid"));

/// Fully resolved quote for one selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceResult {
    pub service_type: ServiceType,
    pub service_name: String,
    pub tier_label: String,
    pub duration_label: String,
    /// Whole dollars
    pub unit_price: u64,
    /// Informational only, not part of the total
    pub hours: u32,
    pub crew: u32,
    /// `unit_price * crew`
    pub total: u64,
}

/// Parse a display price such as "$1,200" into whole dollars
///
/// `$` and `,` are stripped; what remains must be a non-empty run of ASCII digits.
pub fn parse_price(price: &str) -> Result<u64, QuoteError> {
    let digits: String = price
        .chars()
        .filter(|c| *c != '$' && *c != ',')
        .collect();
    let digits = digits.trim();

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(QuoteError::InvalidPrice(price.to_string()));
    }

    digits
        .parse::<u64>()
        .map_err(|_| QuoteError::InvalidPrice(price.to_string()))
}

/// First integer in a duration label, or 1 when there is none
///
/// Values too large for `u32` saturate to `u32::MAX`.
pub fn parse_hours(duration: &str) -> u32 {
    LEADING_INTEGER
        .find(duration)
        .map(|m| m.as_str().parse().unwrap_or(u32::MAX))
        .unwrap_or(1)
}

/// Derive the price of a selection
///
/// Out-of-range indices fall back to the first tier / first rate instead of failing.
pub fn calculate(state: &ConfiguratorState, table: &PriceTable) -> Result<PriceResult, QuoteError> {
    let service_type = state.service_type();
    let meta = table.meta_for(service_type);
    let tiers = table.tiers(service_type);

    let tier = tiers
        .get(state.tier_index())
        .or_else(|| {
            warn!(service = %service_type, tier = state.tier_index(), "Tier index out of range, using first tier");
            tiers.first()
        })
        .ok_or_else(|| QuoteError::InvalidTable(format!("{}: no tiers", service_type)))?;

    let rate = tier
        .rates
        .get(state.duration_index())
        .or_else(|| {
            warn!(service = %service_type, duration = state.duration_index(), "Duration index out of range, using first rate");
            tier.rates.first()
        })
        .ok_or_else(|| QuoteError::InvalidTable(format!("{}: tier '{}' has no rates", service_type, tier.label)))?;

    let unit_price = parse_price(&rate.price)?;
    let hours = parse_hours(&rate.duration);
    let crew = if meta.allow_crew { state.quantity() } else { 1 };
    let total = unit_price
        .checked_mul(u64::from(crew))
        .ok_or(QuoteError::TotalOverflow)?;

    debug!(
        service = %service_type,
        tier = %tier.label,
        duration = %rate.duration,
        unit_price,
        crew,
        total,
        "Quote calculated"
    );

    Ok(PriceResult {
        service_type,
        service_name: meta.name.to_string(),
        tier_label: tier.label.clone(),
        duration_label: rate.duration.clone(),
        unit_price,
        hours,
        crew,
        total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("$150").unwrap(), 150);
        assert_eq!(parse_price("$1,200").unwrap(), 1200);
        assert_eq!(parse_price("2,500").unwrap(), 2500);
        assert_eq!(parse_price(" $788 ").unwrap(), 788);
    }

    #[test]
    fn test_parse_price_rejects_malformed() {
        for bad in ["", "$", "$12.50", "$-5", "$+5", "ask us", "$1 200"] {
            assert_eq!(
                parse_price(bad),
                Err(QuoteError::InvalidPrice(bad.to_string())),
                "expected {:?} to be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_parse_hours() {
        assert_eq!(parse_hours("1 Hour"), 1);
        assert_eq!(parse_hours("4 Hours"), 4);
        assert_eq!(parse_hours("Up to 10 hours"), 10);
        assert_eq!(parse_hours("Half day"), 1);
    }

    #[test]
    fn test_parse_hours_saturates_on_overflow() {
        assert_eq!(parse_hours("99999999999 Hours"), u32::MAX);
        assert_eq!(parse_hours("4294967295 Hours"), u32::MAX);
        assert_eq!(parse_hours("4294967294 Hours"), u32::MAX - 1);
    }

    #[test]
    fn test_calculate_recommended_photography() {
        let table = PriceTable::default();
        let state = ConfiguratorState::default_for(&table, ServiceType::Photography);
        let result = calculate(&state, &table).unwrap();

        assert_eq!(result.tier_label, "Enthusiast (Recommended)");
        assert_eq!(result.duration_label, "2 Hours");
        assert_eq!(result.unit_price, 300);
        assert_eq!(result.hours, 2);
        assert_eq!(result.crew, 1);
        assert_eq!(result.total, 300);
        assert_eq!(result.service_name, "Photography");
    }

    #[test]
    fn test_calculate_falls_back_to_first_entries() {
        let table = PriceTable::default();
        let state = ConfiguratorState::from_raw(ServiceType::Photography, 9, 9, 1);
        let result = calculate(&state, &table).unwrap();

        assert_eq!(result.tier_label, "Beginner");
        assert_eq!(result.duration_label, "1 Hour");
        assert_eq!(result.unit_price, 75);
    }

    #[test]
    fn test_calculate_ignores_quantity_without_crew() {
        let table = PriceTable::default();
        let state = ConfiguratorState::from_raw(ServiceType::Photobooth, 0, 1, 4);
        let result = calculate(&state, &table).unwrap();

        assert_eq!(result.crew, 1);
        assert_eq!(result.total, 788);
    }

    #[test]
    fn test_calculate_large_crew_fits_in_u64() {
        let table = PriceTable::default();
        let state = ConfiguratorState::from_raw(ServiceType::Photography, 4, 3, u32::MAX);
        let result = calculate(&state, &table).unwrap();
        assert_eq!(result.total, 1_400 * u64::from(u32::MAX));
    }
}
