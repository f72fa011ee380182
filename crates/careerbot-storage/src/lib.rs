//! careerbot-storage
//!
//! Document store for students and chat snapshots. S3 in production,
//! an in-memory map for tests and local runs.

pub mod chats;
pub mod documents;
pub mod error;
pub mod s3;
pub mod store;
pub mod students;
