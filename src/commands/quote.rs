use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use studio_quote::config::Config;
use studio_quote::pricing::{
    breakdown, calculate, quote_message, Action, BreakdownLine, ConfiguratorState, PriceResult,
    PriceTable, ServiceType,
};
use tracing::info;

/// Selections taken from the command line
#[derive(Debug, Clone)]
pub struct QuoteRequest {
    pub service: ServiceType,
    pub tier: Option<String>,
    pub duration: Option<String>,
    pub crew: Option<u32>,
}

/// Everything the quote command prints
#[derive(Debug, Serialize)]
pub struct Quote {
    pub state: ConfiguratorState,
    pub result: PriceResult,
    pub breakdown: Vec<BreakdownLine>,
    pub message: String,
}

/// Run the request through the configurator, one action at a time
pub fn build_quote(cfg: &Config, table: &PriceTable, request: &QuoteRequest) -> Result<Quote> {
    let mut state = ConfiguratorState::default_for(table, request.service);

    if let Some(tier) = &request.tier {
        let index = table.find_tier(request.service, tier)?;
        state = state.dispatch(table, Action::SetTier(index))?;
    }

    if let Some(duration) = &request.duration {
        let index = table.find_duration(request.service, state.tier_index(), duration)?;
        state = state.dispatch(table, Action::SetDuration(index))?;
    }

    if let Some(crew) = request.crew {
        state = state.dispatch(table, Action::SetQuantity(crew))?;
    }

    let result = calculate(&state, table)?;
    let meta = table.meta_for(request.service);

    Ok(Quote {
        state,
        breakdown: breakdown(&result, &meta),
        message: quote_message(&result, &meta, &cfg.message),
        result,
    })
}

/// Execute the quote command
pub fn execute(cfg: &Config, request: &QuoteRequest, json: bool) -> Result<()> {
    let table = cfg.price_table();
    let quote = build_quote(cfg, &table, request)?;

    info!(
        service = %quote.result.service_type,
        tier = quote.state.tier_index(),
        duration = quote.state.duration_index(),
        crew = quote.result.crew,
        total = quote.result.total,
        "Quote generated"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&quote)?);
        return Ok(());
    }

    if request.crew.is_some() && !table.meta_for(request.service).allow_crew {
        println!(
            "{}",
            format!("Note: {} does not take a crew size, quoting 1.", quote.result.service_name)
                .yellow()
        );
        println!();
    }

    println!("{}", "Quote Breakdown:".green().bold());
    let width = quote
        .breakdown
        .iter()
        .map(|line| line.label.chars().count())
        .max()
        .unwrap_or(0);

    let last = quote.breakdown.len().saturating_sub(1);
    for (idx, line) in quote.breakdown.iter().enumerate() {
        let padding = " ".repeat(width - line.label.chars().count());
        if idx == last {
            println!("  {}{}  {}", line.label.bold(), padding, line.value.bold());
        } else {
            println!("  {}{}  {}", line.label.cyan(), padding, line.value);
        }
    }
    println!();

    println!("{}", "Message:".green().bold());
    println!("{}", quote.message);

    Ok(())
}
