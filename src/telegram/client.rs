//! Telegram Bot API client wrapper.

use std::time::Duration;

use secrecy::{ExposeSecret, Secret};
use teloxide::prelude::*;
use teloxide::types::{AllowedUpdate, BotCommand as MenuCommand, Update};
use teloxide::{ApiError, RequestError};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::commands::BotCommand;

/// Extra time the HTTP client waits beyond the long-polling timeout.
const CLIENT_TIMEOUT_MARGIN: Duration = Duration::from_secs(15);

/// Errors that can occur during Telegram operations.
#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("Another bot instance is already polling with this token")]
    Conflict,

    #[error("Telegram request failed: {0}")]
    Request(#[from] RequestError),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

impl TelegramError {
    fn from_request(err: RequestError) -> Self {
        if matches!(err, RequestError::Api(ApiError::TerminatedByOtherGetUpdates)) {
            Self::Conflict
        } else {
            Self::Request(err)
        }
    }
}

/// High-level wrapper around a teloxide [`Bot`].
pub struct TelegramBot {
    /// The underlying teloxide bot.
    bot: Bot,

    /// Bot username reported by `getMe`.
    username: Option<String>,

    /// Long-polling timeout passed to `getUpdates`, in seconds.
    poll_timeout_secs: u32,
}

impl TelegramBot {
    /// Connects to the Bot API with the given token.
    ///
    /// Verifies the token, clears any webhook so long polling works, and
    /// registers the command menu.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is rejected or the API is unreachable.
    pub async fn connect(
        token: &Secret<String>,
        poll_timeout_secs: u32,
    ) -> Result<Self, TelegramError> {
        info!("Connecting to Telegram...");

        let client = teloxide::net::default_reqwest_settings()
            .timeout(Duration::from_secs(u64::from(poll_timeout_secs)) + CLIENT_TIMEOUT_MARGIN)
            .build()
            .map_err(|e| TelegramError::Client(e.to_string()))?;
        let bot = Bot::with_client(token.expose_secret(), client);

        let me = bot.get_me().await?;
        let username = me.username.clone();

        bot.delete_webhook().send().await?;

        let commands: Vec<MenuCommand> = BotCommand::all_commands()
            .into_iter()
            .map(|(usage, _, desc)| {
                let name = usage.split_whitespace().next().unwrap_or(usage);
                MenuCommand::new(name, desc)
            })
            .collect();
        if let Err(e) = bot.set_my_commands(commands).await {
            warn!("Failed to register bot commands: {e}");
        }

        info!(username = ?username, "Connected to Telegram (webhook cleared)");

        Ok(Self {
            bot,
            username,
            poll_timeout_secs,
        })
    }

    /// Bot username, if Telegram reported one.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Long-polls for message updates after `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`TelegramError::Conflict`] when another instance polls with
    /// the same token, or the underlying request error otherwise.
    pub async fn poll_updates(&self, offset: i32) -> Result<Vec<Update>, TelegramError> {
        self.bot
            .get_updates()
            .offset(offset)
            .timeout(self.poll_timeout_secs)
            .allowed_updates(vec![AllowedUpdate::Message])
            .await
            .map_err(TelegramError::from_request)
    }

    /// Sends a plain-text message to a chat.
    ///
    /// # Errors
    ///
    /// Returns an error if the message could not be delivered.
    pub async fn send_text(&self, chat_id: i64, text: &str) -> Result<(), TelegramError> {
        debug!(chat_id, len = text.len(), "Sending reply");
        self.bot.send_message(ChatId(chat_id), text).await?;
        Ok(())
    }
}
