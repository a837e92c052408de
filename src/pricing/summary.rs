use crate::pricing::calculator::PriceResult;
use crate::pricing::models::ServiceMeta;
use serde::{Deserialize, Serialize};

/// One label/value row of the quote breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakdownLine {
    pub label: String,
    pub value: String,
}

impl BreakdownLine {
    fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Opening and closing lines of the outbound quote message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageTemplate {
    #[serde(default = "default_greeting")]
    pub greeting: String,
    #[serde(default = "default_closing")]
    pub closing: String,
}

impl Default for MessageTemplate {
    fn default() -> Self {
        Self {
            greeting: default_greeting(),
            closing: default_closing(),
        }
    }
}

fn default_greeting() -> String {
    "Hi! I'd like to request a quote:".to_string()
}

fn default_closing() -> String {
    "Looking forward to hearing from you!".to_string()
}

/// Group digits in threes: 1200 -> "1,200"
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn format_currency(value: u64) -> String {
    format!("${}", format_thousands(value))
}

/// Ordered rows for the rendering layer
pub fn breakdown(result: &PriceResult, meta: &ServiceMeta<'_>) -> Vec<BreakdownLine> {
    let mut lines = vec![
        BreakdownLine::new("Service", result.service_name.as_str()),
        BreakdownLine::new("Tier", result.tier_label.as_str()),
        BreakdownLine::new("Duration", result.duration_label.as_str()),
    ];

    if meta.allow_crew {
        lines.push(BreakdownLine::new(meta.crew_label, result.crew.to_string()));
    }

    let unit = if meta.allow_crew { meta.crew_label } else { "unit" };
    lines.push(BreakdownLine::new(
        format!("{} × {} {}", format_currency(result.unit_price), result.crew, unit),
        format_currency(result.total),
    ));
    lines.push(BreakdownLine::new("Total", format_currency(result.total)));

    lines
}

/// Text handed to the messaging deep-link builder
///
/// Output is byte-stable for a given result and template.
pub fn quote_message(
    result: &PriceResult,
    meta: &ServiceMeta<'_>,
    template: &MessageTemplate,
) -> String {
    let mut lines = vec![
        template.greeting.clone(),
        format!("Service: {}", result.service_name),
        format!("Skill Level: {}", result.tier_label),
        format!("Duration: {}", result.duration_label),
    ];

    if meta.allow_crew {
        lines.push(format!("{}: {}", meta.crew_label, result.crew));
    }

    lines.push(String::new());
    lines.push(format!("Estimated Total: {}", format_currency(result.total)));
    lines.push(String::new());
    lines.push(template.closing.clone());

    lines.join("\n")
}
