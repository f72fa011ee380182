use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use careerbot_core::models::chat::{ChatMessage, ChatRole};
use careerbot_core::models::student::StudentContext;
use careerbot_core::validate::parse_id;
use careerbot_storage::chats;

use crate::error::ApiError;
use crate::state::AppState;

/// Sent with status 500 whenever a chat turn cannot be answered.
pub const FALLBACK_REPLY: &str = "I'm having trouble connecting. Please try again later.";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    pub student_data: StudentContext,
}

/// Body of every chat answer, success or not. There is no `success` flag.
#[derive(Serialize)]
pub struct ChatResponse {
    pub response: String,
}

fn fallback() -> (StatusCode, Json<ChatResponse>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ChatResponse {
            response: FALLBACK_REPLY.to_string(),
        }),
    )
}

/// Answer one question through the LLM gateway. No retry.
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> (StatusCode, Json<ChatResponse>) {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(e) => {
            warn!(error = %e.body_text(), "unreadable chat request");
            return fallback();
        }
    };

    match state.gateway.ask(&req.student_data, &req.message).await {
        Ok(response) => (StatusCode::OK, Json(ChatResponse { response })),
        Err(e) => {
            error!(error = %e, model = %state.gateway.model(), "chat completion failed");
            fallback()
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveChatRequest {
    pub student_id: String,
    pub messages: Vec<IncomingMessage>,
}

#[derive(Deserialize)]
pub struct IncomingMessage {
    pub role: ChatRole,
    pub content: String,
    /// Defaults to the save time.
    #[serde(default)]
    pub timestamp: Option<jiff::Timestamp>,
}

#[derive(Serialize)]
pub struct SaveChatResponse {
    pub success: bool,
}

/// Persist the full transcript as a new snapshot.
pub async fn save_chat(
    State(state): State<AppState>,
    payload: Result<Json<SaveChatRequest>, JsonRejection>,
) -> Result<Json<SaveChatResponse>, ApiError> {
    let Json(req) = payload?;
    let student_id = parse_id(&req.student_id)?;

    let now = jiff::Timestamp::now();
    let messages = req
        .messages
        .into_iter()
        .map(|m| ChatMessage {
            role: m.role,
            content: m.content,
            timestamp: m.timestamp.unwrap_or(now),
        })
        .collect();

    chats::insert(state.store.as_ref(), student_id, messages).await?;
    Ok(Json(SaveChatResponse { success: true }))
}
