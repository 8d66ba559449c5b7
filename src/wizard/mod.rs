//! Business profile questionnaire.
//!
//! Walks a chat through seven fixed questions and summarizes the answers.

mod session;
mod store;

pub use session::{ACKNOWLEDGEMENT, BusinessProfile, Completed, Field, Session, Step, Transition};
pub use store::{SessionStore, Submission};
