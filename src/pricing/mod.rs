pub mod calculator;
pub mod models;
pub mod reference;
pub mod state;
pub mod summary;
pub mod table;

pub use calculator::{calculate, parse_hours, parse_price, PriceResult};
pub use models::{DefaultSelection, PricingTier, RateEntry, ServiceMeta, ServicePricing, ServiceType};
pub use reference::reference_table;
pub use state::{Action, ConfiguratorState};
pub use summary::{breakdown, format_currency, quote_message, BreakdownLine, MessageTemplate};
pub use table::{PriceTable, PriceTableConfig};
