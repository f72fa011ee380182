//! careerbot-llm
//!
//! LLM gateway: prompt construction, chat-completion transport, and reply
//! cleanup.

pub mod client;
pub mod error;
pub mod gateway;
pub mod prompt;
pub mod sanitize;
pub mod types;
