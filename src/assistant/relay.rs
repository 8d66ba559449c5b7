//! Digital-marketing question relay.

use std::sync::Arc;

use tracing::{info, warn};

use super::CompletionClient;

/// Instruction placed in front of every user question.
pub const QUESTION_PREFIX: &str = "Answer the following digital marketing question: ";

/// Reply for `/ask` without a question.
pub const EMPTY_QUESTION_REPLY: &str = "Please provide a question after /ask.";

/// Forwards user questions to a completion backend and turns the outcome
/// into a chat reply.
#[derive(Clone)]
pub struct QuestionRelay {
    client: Arc<dyn CompletionClient>,
}

impl QuestionRelay {
    /// Creates a relay backed by `client`.
    #[must_use]
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    /// Answers `question`.
    ///
    /// Blank questions are answered locally without calling the backend.
    /// Backend failures become an error reply; nothing is retried.
    pub async fn answer(&self, question: &str) -> String {
        let question = question.trim();
        if question.is_empty() {
            return EMPTY_QUESTION_REPLY.to_owned();
        }

        let prompt = format!("{QUESTION_PREFIX}{question}");
        match self.client.complete(&prompt).await {
            Ok(answer) => {
                info!(answer_len = answer.len(), "Question answered");
                answer.trim().to_owned()
            }
            Err(e) => {
                warn!(error = %e, "Completion request failed");
                format!("Error with OpenAI API: {e}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::assistant::AssistantError;

    #[derive(Default)]
    struct Recorder {
        prompts: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl CompletionClient for Recorder {
        async fn complete(&self, prompt: &str) -> Result<String, AssistantError> {
            self.prompts.lock().unwrap().push(prompt.to_owned());
            if self.fail {
                Err(AssistantError::Api {
                    status: 429,
                    message: "Rate limit reached".to_owned(),
                })
            } else {
                Ok(" Use long-tail keywords. ".to_owned())
            }
        }
    }

    #[tokio::test]
    async fn test_empty_question_makes_no_call() {
        let recorder = Arc::new(Recorder::default());
        let relay = QuestionRelay::new(recorder.clone());

        assert_eq!(relay.answer("").await, EMPTY_QUESTION_REPLY);
        assert_eq!(relay.answer("   ").await, EMPTY_QUESTION_REPLY);
        assert!(recorder.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_question_is_prefixed_and_answer_trimmed() {
        let recorder = Arc::new(Recorder::default());
        let relay = QuestionRelay::new(recorder.clone());

        let reply = relay.answer("How do I pick keywords?").await;
        assert_eq!(reply, "Use long-tail keywords.");
        assert_eq!(
            *recorder.prompts.lock().unwrap(),
            vec!["Answer the following digital marketing question: How do I pick keywords?"]
        );
    }

    #[tokio::test]
    async fn test_failure_becomes_error_reply() {
        let recorder = Arc::new(Recorder {
            fail: true,
            ..Recorder::default()
        });
        let relay = QuestionRelay::new(recorder.clone());

        let reply = relay.answer("What is CTR?").await;
        assert_eq!(
            reply,
            "Error with OpenAI API: API returned 429: Rate limit reached"
        );
        assert_eq!(recorder.prompts.lock().unwrap().len(), 1);
    }
}
