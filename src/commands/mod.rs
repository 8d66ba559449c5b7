//! Command handling module.
//!
//! Turns inbound chat messages into replies: slash-commands are dispatched
//! to their handlers, plain text feeds the running questionnaire.

mod handler;
mod types;

pub use handler::{CommandHandler, WELCOME};
pub use types::{BotCommand, CommandResult, Inbound};
