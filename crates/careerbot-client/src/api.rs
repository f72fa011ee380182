//! HTTP client for the career-guidance API.
//!
//! [`CareerApi`] is what the session and save queue talk to; [`ApiClient`]
//! is the reqwest implementation used by the binary.

use std::future::Future;
use std::pin::Pin;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use careerbot_core::models::chat::ChatTurn;
use careerbot_core::models::student::{NewStudent, Student, StudentContext};

use crate::error::ClientError;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

pub trait CareerApi: Send + Sync {
    fn register<'a>(
        &'a self,
        student: &'a NewStudent,
    ) -> BoxFuture<'a, Result<Student, ClientError>>;

    fn get_student<'a>(&'a self, id: Uuid) -> BoxFuture<'a, Result<Student, ClientError>>;

    /// Ask one question. Any non-2xx answer, including the server's
    /// fallback text, is an error.
    fn chat<'a>(
        &'a self,
        message: &'a str,
        context: &'a StudentContext,
    ) -> BoxFuture<'a, Result<String, ClientError>>;

    fn save_chat<'a>(
        &'a self,
        student_id: Uuid,
        messages: &'a [ChatTurn],
    ) -> BoxFuture<'a, Result<(), ClientError>>;
}

#[derive(Deserialize)]
struct StudentEnvelope {
    student: Student,
}

#[derive(Deserialize)]
struct ChatReply {
    response: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    response: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChatBody<'a> {
    message: &'a str,
    student_data: &'a StudentContext,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SaveBody<'a> {
    student_id: Uuid,
    messages: &'a [ChatTurn],
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// `base_url` includes the `/api` prefix, e.g. `http://localhost:5000/api`.
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Decode a 2xx body as `T`, or turn the error envelope into
/// [`ClientError::Status`].
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorEnvelope>(&text)
        .ok()
        .and_then(|e| e.error.or(e.response))
        .unwrap_or(text);

    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}

impl CareerApi for ApiClient {
    fn register<'a>(
        &'a self,
        student: &'a NewStudent,
    ) -> BoxFuture<'a, Result<Student, ClientError>> {
        Box::pin(async move {
            let response = self
                .http
                .post(self.url("/students/register"))
                .json(student)
                .send()
                .await?;
            let envelope: StudentEnvelope = decode(response).await?;
            debug!(student_id = %envelope.student.id, "registered");
            Ok(envelope.student)
        })
    }

    fn get_student<'a>(&'a self, id: Uuid) -> BoxFuture<'a, Result<Student, ClientError>> {
        Box::pin(async move {
            let response = self
                .http
                .get(self.url(&format!("/students/{id}")))
                .send()
                .await?;
            let envelope: StudentEnvelope = decode(response).await?;
            Ok(envelope.student)
        })
    }

    fn chat<'a>(
        &'a self,
        message: &'a str,
        context: &'a StudentContext,
    ) -> BoxFuture<'a, Result<String, ClientError>> {
        Box::pin(async move {
            let response = self
                .http
                .post(self.url("/chat"))
                .json(&ChatBody {
                    message,
                    student_data: context,
                })
                .send()
                .await?;
            let reply: ChatReply = decode(response).await?;
            Ok(reply.response)
        })
    }

    fn save_chat<'a>(
        &'a self,
        student_id: Uuid,
        messages: &'a [ChatTurn],
    ) -> BoxFuture<'a, Result<(), ClientError>> {
        Box::pin(async move {
            let response = self
                .http
                .post(self.url("/chat/save"))
                .json(&SaveBody {
                    student_id,
                    messages,
                })
                .send()
                .await?;
            let _: serde_json::Value = decode(response).await?;
            Ok(())
        })
    }
}
