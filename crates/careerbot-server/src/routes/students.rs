use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use careerbot_core::models::chat::Chat;
use careerbot_core::models::student::{NewStudent, Student};
use careerbot_core::validate::parse_id;
use careerbot_storage::error::StorageError;
use careerbot_storage::{chats, students};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct StudentResponse {
    pub success: bool,
    pub student: Student,
}

#[derive(Serialize)]
pub struct ChatsResponse {
    pub success: bool,
    pub chats: Vec<Chat>,
}

fn student_not_found() -> ApiError {
    ApiError::NotFound("Student not found".to_string())
}

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<NewStudent>, JsonRejection>,
) -> Result<(StatusCode, Json<StudentResponse>), ApiError> {
    let Json(new) = payload?;
    let student = students::create(state.store.as_ref(), new).await?;
    Ok((
        StatusCode::CREATED,
        Json(StudentResponse {
            success: true,
            student,
        }),
    ))
}

/// Malformed ids and unknown ids both answer 404.
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StudentResponse>, ApiError> {
    let id = parse_id(&id).map_err(|_| student_not_found())?;
    let student = students::get(state.store.as_ref(), id)
        .await
        .map_err(|e| match e {
            StorageError::NotFound { .. } => student_not_found(),
            other => other.into(),
        })?;

    Ok(Json(StudentResponse {
        success: true,
        student,
    }))
}

/// Every saved snapshot for a student, oldest first. Ids are not checked
/// against the student collection.
pub async fn list_chats(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ChatsResponse>, ApiError> {
    let id = parse_id(&id).map_err(|_| student_not_found())?;
    let chats = chats::list_for_student(state.store.as_ref(), id).await?;
    Ok(Json(ChatsResponse {
        success: true,
        chats,
    }))
}
