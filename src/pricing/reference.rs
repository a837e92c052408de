//! Built-in studio price list, used when configuration does not supply one.

use crate::pricing::models::{PricingTier, RateEntry, ServicePricing};
use crate::pricing::table::{PriceTable, DEFAULT_MAX_CREW};

const HOURLY_DURATIONS: [&str; 4] = ["1 Hour", "2 Hours", "3 Hours", "4 Hours"];
const BOOTH_DURATIONS: [&str; 3] = ["2 Hours", "3 Hours", "4 Hours"];

fn tier(label: &str, durations: &[&str], prices: &[&str]) -> PricingTier {
    let rates = durations
        .iter()
        .zip(prices)
        .map(|(duration, price)| RateEntry::new(*duration, *price))
        .collect();
    PricingTier::new(label, rates)
}

fn photography() -> ServicePricing {
    ServicePricing {
        name: "Photography".to_string(),
        crew_label: "Photographers".to_string(),
        allow_crew: true,
        default_tier: 2,
        default_duration: 1,
        tiers: vec![
            tier("Beginner", &HOURLY_DURATIONS, &["$75", "$150", "$225", "$300"]),
            tier("Amateur", &HOURLY_DURATIONS, &["$100", "$200", "$300", "$400"]),
            tier(
                "Enthusiast (Recommended)",
                &HOURLY_DURATIONS,
                &["$150", "$300", "$450", "$600"],
            ),
            tier("Professional", &HOURLY_DURATIONS, &["$250", "$500", "$750", "$1,000"]),
            tier("Director", &HOURLY_DURATIONS, &["$350", "$700", "$1,050", "$1,400"]),
        ],
    }
}

fn videography() -> ServicePricing {
    ServicePricing {
        name: "Videography".to_string(),
        crew_label: "Videographers".to_string(),
        allow_crew: true,
        default_tier: 2,
        default_duration: 1,
        tiers: vec![
            tier("Beginner", &HOURLY_DURATIONS, &["$100", "$200", "$300", "$400"]),
            tier("Amateur", &HOURLY_DURATIONS, &["$150", "$300", "$450", "$600"]),
            tier(
                "Enthusiast (Recommended)",
                &HOURLY_DURATIONS,
                &["$200", "$400", "$600", "$800"],
            ),
            tier("Professional", &HOURLY_DURATIONS, &["$300", "$600", "$900", "$1,200"]),
            tier("Director", &HOURLY_DURATIONS, &["$400", "$800", "$1,200", "$1,600"]),
        ],
    }
}

fn photobooth() -> ServicePricing {
    ServicePricing {
        name: "Photobooth".to_string(),
        crew_label: "Booths".to_string(),
        allow_crew: false,
        default_tier: 0,
        default_duration: 0,
        tiers: vec![
            tier(
                "Package A — Full Service (Recommended)",
                &BOOTH_DURATIONS,
                &["$525", "$788", "$1,050"],
            ),
            tier(
                "Package B — Premium Props",
                &BOOTH_DURATIONS,
                &["$650", "$975", "$1,300"],
            ),
            tier(
                "Package C — Deluxe Experience",
                &BOOTH_DURATIONS,
                &["$800", "$1,200", "$1,600"],
            ),
        ],
    }
}

/// The studio's published rates
pub fn reference_table() -> PriceTable {
    PriceTable::from_parts(DEFAULT_MAX_CREW, photography(), videography(), photobooth())
}
