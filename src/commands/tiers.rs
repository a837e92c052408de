use colored::Colorize;
use studio_quote::config::Config;
use studio_quote::pricing::{PriceTable, ServiceType};

/// Execute the tiers command
///
/// Lists every tier with its rates, marking recommended tiers and the default selection
pub fn execute(cfg: &Config, service: Option<ServiceType>) {
    let table = cfg.price_table();
    let services: Vec<ServiceType> = match service {
        Some(service) => vec![service],
        None => ServiceType::ALL.to_vec(),
    };

    println!(
        "{} {}",
        "Price table".green().bold(),
        format!("({})", cfg.pricing_source()).dimmed()
    );
    println!();

    for service in services {
        print_service(&table, service);
    }
}

fn print_service(table: &PriceTable, service: ServiceType) {
    let pricing = table.service(service);
    let defaults = pricing.defaults();

    let crew = if pricing.allow_crew {
        format!("{}: 1-{}", pricing.crew_label, table.max_crew())
    } else {
        "fixed crew".to_string()
    };
    println!("{} {}", pricing.name.cyan().bold(), format!("[{}]", crew).dimmed());

    for (tier_index, tier) in pricing.tiers.iter().enumerate() {
        let marker = if tier.is_recommended() { "★" } else { " " };
        println!("  {} {}. {}", marker.yellow(), tier_index, tier.label);

        for (duration_index, rate) in tier.rates.iter().enumerate() {
            let is_default = tier_index == defaults.tier && duration_index == defaults.duration;
            let line = format!("       {:<10} {:>8}", rate.duration, rate.price);
            if is_default {
                println!("{} {}", line.bold(), "(default)".green());
            } else {
                println!("{}", line);
            }
        }
    }
    println!();
}
