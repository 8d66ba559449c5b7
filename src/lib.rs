//! Marketing Insights Bot Library
//!
//! A Telegram bot for small-business digital marketing.
//!
//! This crate provides the core functionality for:
//! - Collecting a business profile through a seven-question questionnaire
//! - Looking up keywords and paid-search trends per industry
//! - Relaying digital-marketing questions to a language-model API
//! - Scraping a public benchmarks page for CPC figures
//! - Receiving and answering chat messages via the Telegram Bot API

pub mod assistant;
pub mod commands;
pub mod config;
pub mod insights;
pub mod telegram;
pub mod wizard;
