//! Prompt builder for career-guidance questions.
//!
//! Every request is two turns: a fixed counselor persona, then a user turn
//! that carries the student's profile ahead of the free-text question.

use careerbot_core::models::student::StudentContext;

use crate::types::{CompletionRequest, PromptMessage, PromptRole};

pub const SYSTEM_PROMPT: &str = "You are a helpful and friendly career counselor for Class 10 students in India. Give clear and encouraging advice.";

/// Render the user turn for one question.
pub fn user_turn(context: &StudentContext, question: &str) -> String {
    format!(
        "Student: {}, Interests: {}, Location: {}.\nQuestion: {}",
        context.name, context.interests, context.location, question
    )
}

pub fn build_request(model: &str, context: &StudentContext, question: &str) -> CompletionRequest {
    CompletionRequest {
        model: model.to_string(),
        messages: vec![
            PromptMessage {
                role: PromptRole::System,
                content: SYSTEM_PROMPT.to_string(),
            },
            PromptMessage {
                role: PromptRole::User,
                content: user_turn(context, question),
            },
        ],
    }
}
