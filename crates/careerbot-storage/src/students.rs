use tracing::info;
use uuid::Uuid;

use careerbot_core::keys;
use careerbot_core::models::student::{NewStudent, Student};
use careerbot_core::validate::validate_new_student;

use crate::documents::{load_json, save_json};
use crate::error::StorageError;
use crate::store::DocumentStore;

/// Validate and persist a new student. Nothing is written if a required
/// field is empty.
pub async fn create(store: &dyn DocumentStore, new: NewStudent) -> Result<Student, StorageError> {
    validate_new_student(&new)?;

    let student = new.into_student(Uuid::new_v4(), jiff::Timestamp::now());
    save_json(store, &keys::student(student.id), &student).await?;

    info!(student_id = %student.id, "student registered");
    Ok(student)
}

pub async fn get(store: &dyn DocumentStore, id: Uuid) -> Result<Student, StorageError> {
    load_json(store, &keys::student(id)).await
}
