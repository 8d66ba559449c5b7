//! Question answering through a language-model API.

mod client;
mod relay;

pub use client::{AssistantError, CompletionClient, OpenAiClient};
pub use relay::{EMPTY_QUESTION_REPLY, QUESTION_PREFIX, QuestionRelay};
