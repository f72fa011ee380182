//! Document store key conventions.
//!
//! Pure string functions. These define the canonical layout of records in
//! the store: one JSON object per Student, one per Chat snapshot.

use uuid::Uuid;

pub const STUDENTS_PREFIX: &str = "students/";

pub fn student(id: Uuid) -> String {
    format!("{STUDENTS_PREFIX}{id}.json")
}

/// Every snapshot saved for one student lives under this prefix.
pub fn student_chats_prefix(student_id: Uuid) -> String {
    format!("chats/{student_id}/")
}

pub fn chat(student_id: Uuid, chat_id: Uuid) -> String {
    format!("chats/{student_id}/{chat_id}.json")
}
