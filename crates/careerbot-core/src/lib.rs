//! careerbot-core
//!
//! Pure domain types, field validation, and store key conventions.
//! No AWS or HTTP dependency.

pub mod error;
pub mod keys;
pub mod models;
pub mod validate;
