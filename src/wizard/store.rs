//! Per-chat session bookkeeping.

use std::collections::HashMap;

use tokio::sync::RwLock;
use tracing::{debug, info};

use super::session::{Completed, Field, Session, Transition};

/// Outcome of submitting an answer to a chat's session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// No questionnaire is running for this chat.
    NoSession,
    /// The answer was stored; ask this next.
    Prompt(&'static str),
    /// The answer finished the questionnaire. The session has been removed.
    Finished(Completed),
}

/// Active questionnaires keyed by chat id.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<i64, Session>>,
}

impl SessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a fresh questionnaire for `chat_id`, replacing any running one.
    ///
    /// Returns the first question.
    pub async fn begin(&self, chat_id: i64) -> &'static str {
        let previous = self.sessions.write().await.insert(chat_id, Session::new());
        if let Some(previous) = previous {
            info!(
                chat_id,
                answered = previous.answered(),
                "Restarting questionnaire"
            );
        } else {
            debug!(chat_id, "Questionnaire started");
        }

        Field::Industry.prompt()
    }

    /// Drops the questionnaire for `chat_id` together with its answers.
    ///
    /// Returns `true` if one was running.
    pub async fn discard(&self, chat_id: i64) -> bool {
        let removed = self.sessions.write().await.remove(&chat_id);
        if let Some(session) = &removed {
            info!(
                chat_id,
                answered = session.answered(),
                "Questionnaire discarded"
            );
        }
        removed.is_some()
    }

    /// Checks if a questionnaire is running for `chat_id`.
    pub async fn is_active(&self, chat_id: i64) -> bool {
        self.sessions.read().await.contains_key(&chat_id)
    }

    /// Returns a copy of the running session for `chat_id`.
    pub async fn get(&self, chat_id: i64) -> Option<Session> {
        self.sessions.read().await.get(&chat_id).cloned()
    }

    /// Number of running questionnaires.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Checks if no questionnaire is running.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Feeds one answer to the questionnaire running for `chat_id`.
    pub async fn submit(&self, chat_id: i64, input: &str) -> Submission {
        let mut sessions = self.sessions.write().await;

        let Some(session) = sessions.remove(&chat_id) else {
            return Submission::NoSession;
        };

        match session.advance(input) {
            Transition::Next { session, prompt } => {
                debug!(chat_id, step = ?session.step().number(), "Answer stored");
                sessions.insert(chat_id, session);
                Submission::Prompt(prompt)
            }
            Transition::Complete(done) => {
                let elapsed = chrono::Utc::now() - done.session.started_at();
                info!(
                    chat_id,
                    elapsed_secs = elapsed.num_seconds(),
                    "Questionnaire complete"
                );
                Submission::Finished(done)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::Step;

    #[tokio::test]
    async fn test_submit_without_session() {
        let store = SessionStore::new();
        assert_eq!(store.submit(1, "Retail").await, Submission::NoSession);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_begin_then_submit_all() {
        let store = SessionStore::new();
        assert_eq!(store.begin(7).await, Field::Industry.prompt());

        for field in &Field::ALL[1..] {
            assert_eq!(store.submit(7, "answer").await, Submission::Prompt(field.prompt()));
        }

        match store.submit(7, "Berlin").await {
            Submission::Finished(done) => assert_eq!(done.profile.location, "Berlin"),
            other => panic!("unexpected submission result: {other:?}"),
        }
        assert!(!store.is_active(7).await);
    }

    #[tokio::test]
    async fn test_discard_drops_answers() {
        let store = SessionStore::new();
        store.begin(3).await;
        store.submit(3, "Retail").await;
        store.submit(3, "Sales").await;

        assert!(store.discard(3).await);
        assert!(!store.is_active(3).await);
        assert!(!store.discard(3).await);

        store.begin(3).await;
        let session = store.get(3).await.unwrap();
        assert_eq!(session.step(), Step::Awaiting(Field::Industry));
        assert_eq!(session.answer(Field::Industry), None);
    }

    #[tokio::test]
    async fn test_begin_restarts_running_session() {
        let store = SessionStore::new();
        store.begin(5).await;
        store.submit(5, "Retail").await;
        store.begin(5).await;

        let session = store.get(5).await.unwrap();
        assert_eq!(session.answered(), 0);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let store = SessionStore::new();
        store.begin(1).await;
        store.begin(2).await;
        store.submit(1, "Retail").await;

        assert_eq!(store.get(1).await.unwrap().answered(), 1);
        assert_eq!(store.get(2).await.unwrap().answered(), 0);

        store.discard(1).await;
        assert!(store.is_active(2).await);
    }
}
