use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use studio_quote::config::Config;
use studio_quote::pricing::ServiceType;
use tracing::info;

/// Execute the config show command
///
/// Prints the effective configuration, with the price table expanded
pub fn show(cfg: &Config) -> Result<()> {
    info!("Displaying effective configuration");

    let mut effective = cfg.clone();
    effective.pricing = Some(cfg.price_table());

    println!("{}", "Current Configuration:".green().bold());
    println!();

    // Serialize to TOML format
    let toml_string = toml::to_string_pretty(&effective)?;
    println!("{}", toml_string);

    Ok(())
}

/// Execute the config validate command
///
/// Loading already validated everything; this reports what was loaded
pub fn validate(cfg: &Config, path: &Path) {
    info!(path = %path.display(), "Configuration validation successful");

    println!("{}", "✓ Configuration is valid".green());
    println!();
    println!("{}", "Summary:".bold());
    println!(
        "  {}: {}",
        "Config File".cyan(),
        if path.exists() {
            path.display().to_string()
        } else {
            format!("{} (not found, using defaults)", path.display())
        }
    );
    println!("  {}: {}", "Log Level".cyan(), cfg.logging.level);
    println!("  {}: {}", "Log Format".cyan(), cfg.logging.format);
    println!("  {}: {}", "Price Table".cyan(), cfg.pricing_source());

    let table = cfg.price_table();
    println!("  {}: {}", "Max Crew".cyan(), table.max_crew());
    for service in ServiceType::ALL {
        println!(
            "    {}: {} tiers, {} rates",
            table.meta_for(service).name,
            table.tiers(service).len(),
            count_rates(&table, service)
        );
    }
}

fn count_rates(table: &studio_quote::pricing::PriceTable, service: ServiceType) -> usize {
    table.tiers(service).iter().map(|tier| tier.rates.len()).sum()
}
