//! Configuration module for the marketing bot.
//!
//! Handles API credentials, runtime settings, and the industry catalog
//! that backs the keyword and trend lookups.

mod catalog;
mod settings;

pub use catalog::{CatalogError, Industry, IndustryCatalog, TrendFigures};
pub use settings::{API_KEY_VAR, BOT_TOKEN_VAR, BotSettings, ConfigError, Credentials};
