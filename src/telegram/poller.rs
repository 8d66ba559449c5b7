//! Update polling loop.
//!
//! Pulls updates from Telegram one batch at a time and handles each text
//! message in arrival order:
//! 1. Long-poll `getUpdates` from the last confirmed offset
//! 2. Hand the message text to the [`CommandHandler`]
//! 3. Send every reply back to the originating chat
//!
//! Polling errors are logged and retried after a pause, except for a
//! conflict with another instance, which stops the loop.

use std::sync::Arc;
use std::time::Duration;

use teloxide::types::{Update, UpdateKind};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use super::{TelegramBot, TelegramError};
use crate::commands::CommandHandler;

/// Pause after a failed `getUpdates` call.
const ERROR_BACKOFF: Duration = Duration::from_secs(5);

/// Messages that can be sent to the poller.
#[derive(Debug, Clone)]
pub enum PollerMessage {
    /// Stop polling.
    Shutdown,
}

/// Feeds Telegram updates to the command handler.
pub struct UpdatePoller {
    /// Telegram bot client.
    bot: Arc<TelegramBot>,

    /// Message handler.
    handler: Arc<CommandHandler>,

    /// Offset of the next update to fetch.
    offset: i32,
}

impl UpdatePoller {
    /// Creates a new poller.
    #[must_use]
    pub fn new(bot: Arc<TelegramBot>, handler: Arc<CommandHandler>) -> Self {
        Self {
            bot,
            handler,
            offset: 0,
        }
    }

    /// Runs the polling loop until shutdown.
    ///
    /// # Errors
    ///
    /// Returns [`TelegramError::Conflict`] if another instance takes over
    /// the token.
    pub async fn run(mut self, mut rx: mpsc::Receiver<PollerMessage>) -> Result<(), TelegramError> {
        info!("Update poller started");

        loop {
            let result = tokio::select! {
                result = self.bot.poll_updates(self.offset) => result,
                msg = rx.recv() => {
                    match msg {
                        Some(PollerMessage::Shutdown) | None => {
                            info!("Poller shutting down");
                            return Ok(());
                        }
                    }
                }
            };

            match result {
                Ok(updates) => {
                    if !updates.is_empty() {
                        debug!(count = updates.len(), "Got updates");
                    }
                    for update in updates {
                        self.offset = update.id.as_offset();
                        self.dispatch(update).await;
                    }
                }
                Err(TelegramError::Conflict) => {
                    error!("Another bot instance is already running with this token");
                    return Err(TelegramError::Conflict);
                }
                Err(e) => {
                    warn!(error = %e, "getUpdates failed");
                    tokio::select! {
                        () = tokio::time::sleep(ERROR_BACKOFF) => {}
                        msg = rx.recv() => {
                            match msg {
                                Some(PollerMessage::Shutdown) | None => {
                                    info!("Poller shutting down");
                                    return Ok(());
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    /// Handles a single update.
    async fn dispatch(&self, update: Update) {
        let UpdateKind::Message(msg) = update.kind else {
            debug!("Ignoring non-message update");
            return;
        };

        let Some(text) = msg.text() else {
            debug!(chat_id = msg.chat.id.0, "Ignoring message without text");
            return;
        };

        let chat_id = msg.chat.id.0;
        debug!(chat_id, "Received message");

        let result = self.handler.handle(chat_id, text).await;

        for reply in &result.replies {
            if let Err(e) = self.bot.send_text(chat_id, reply).await {
                error!(chat_id, error = %e, "Failed to send reply");
                break;
            }
        }
    }
}
