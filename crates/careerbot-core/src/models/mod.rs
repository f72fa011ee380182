pub mod chat;
pub mod student;
