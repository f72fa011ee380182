//! careerbot-client
//!
//! Terminal front end for the career-guidance API: registration, the chat
//! session and background transcript saves.

pub mod api;
pub mod error;
pub mod persist;
pub mod prompts;
pub mod registration;
pub mod session;
