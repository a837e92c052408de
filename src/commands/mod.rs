//! Command implementations for the CLI
//!
//! - quote: Price a booking and print the shareable message
//! - tiers: List the price table
//! - config: Configuration display and validation

pub mod config;
pub mod quote;
pub mod tiers;
