//! Telegram transport module.
//!
//! Connects to the Bot API, long-polls for messages, and sends the
//! command handler's replies back.

mod client;
mod poller;

pub use client::{TelegramBot, TelegramError};
pub use poller::{PollerMessage, UpdatePoller};
