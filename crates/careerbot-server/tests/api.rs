use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use careerbot_llm::client::{BoxFuture, ChatCompletion};
use careerbot_llm::error::GatewayError;
use careerbot_llm::gateway::Gateway;
use careerbot_llm::types::{CompletionRequest, CompletionResponse};
use careerbot_server::routes::chat::FALLBACK_REPLY;
use careerbot_server::state::AppState;
use careerbot_storage::store::MemoryStore;

/// Completion transport that answers with a fixed body, or fails when
/// constructed with `None`.
struct StubCompletion(Option<Value>);

impl ChatCompletion for StubCompletion {
    fn complete<'a>(
        &'a self,
        _request: &'a CompletionRequest,
    ) -> BoxFuture<'a, Result<CompletionResponse, GatewayError>> {
        Box::pin(async move {
            match &self.0 {
                Some(body) => Ok(serde_json::from_value(body.clone()).unwrap()),
                None => Err(GatewayError::Request("error sending request".to_string())),
            }
        })
    }
}

fn replying(content: &str) -> StubCompletion {
    StubCompletion(Some(json!({ "choices": [{ "message": { "content": content } }] })))
}

fn test_app(stub: StubCompletion) -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let state = AppState {
        store: store.clone(),
        gateway: Arc::new(Gateway::new(Arc::new(stub), "test-model")),
    };
    (careerbot_server::router(state), store)
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn asha() -> Value {
    json!({ "name": "Asha", "class": "10", "interests": "Science", "location": "Delhi" })
}

async fn register_asha(app: &Router) -> Value {
    let (status, body) = call(app, "POST", "/api/students/register", Some(asha())).await;
    assert_eq!(status, StatusCode::CREATED);
    body["student"].clone()
}

#[tokio::test]
async fn health_check_is_ok() {
    let (app, _) = test_app(replying("unused"));
    let (status, body) = call(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn register_returns_created_student() {
    let (app, store) = test_app(replying("unused"));

    let (status, body) = call(&app, "POST", "/api/students/register", Some(asha())).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    let student = &body["student"];
    assert!(Uuid::parse_str(student["id"].as_str().unwrap()).is_ok());
    assert_eq!(student["name"], "Asha");
    assert_eq!(student["class"], "10");
    assert_eq!(student["interests"], "Science");
    assert_eq!(student["location"], "Delhi");
    assert!(student["createdAt"].is_string());
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn register_rejects_missing_or_empty_fields() {
    let (app, store) = test_app(replying("unused"));

    for field in ["name", "class", "interests", "location"] {
        let mut absent = asha();
        absent.as_object_mut().unwrap().remove(field);
        let (status, body) = call(&app, "POST", "/api/students/register", Some(absent)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "absent {field}");
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains(field));

        let mut empty = asha();
        empty[field] = json!("");
        let (status, _) = call(&app, "POST", "/api/students/register", Some(empty)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "empty {field}");
    }

    assert!(store.is_empty().await);
}

#[tokio::test]
async fn register_rejects_malformed_body() {
    let (app, store) = test_app(replying("unused"));

    let mut wrong_type = asha();
    wrong_type["name"] = json!(42);
    let (status, body) = call(&app, "POST", "/api/students/register", Some(wrong_type)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let request = Request::builder()
        .method("POST")
        .uri("/api/students/register")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert!(store.is_empty().await);
}

#[tokio::test]
async fn get_student_returns_registered_record() {
    let (app, _) = test_app(replying("unused"));
    let student = register_asha(&app).await;
    let id = student["id"].as_str().unwrap();

    let (status, body) = call(&app, "GET", &format!("/api/students/{id}"), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["student"], student);
}

#[tokio::test]
async fn unknown_or_malformed_student_id_is_not_found() {
    let (app, _) = test_app(replying("unused"));

    for id in [Uuid::new_v4().to_string(), "not-an-id".to_string()] {
        let (status, body) = call(&app, "GET", &format!("/api/students/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "success": false, "error": "Student not found" }));
    }
}

#[tokio::test]
async fn register_then_chat_scenario() {
    let (app, _) = test_app(replying("Try engineering."));
    let student = register_asha(&app).await;
    assert!(student["id"].is_string());

    let (status, body) = call(
        &app,
        "POST",
        "/api/chat",
        Some(json!({
            "message": "What should I study?",
            "studentData": { "name": "Asha", "interests": "Science", "location": "Delhi" }
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "response": "Try engineering." }));
}

#[tokio::test]
async fn chat_accepts_full_student_record_as_context() {
    let (app, _) = test_app(replying("Sure."));
    let student = register_asha(&app).await;

    let (status, body) = call(
        &app,
        "POST",
        "/api/chat",
        Some(json!({ "message": "Hi", "studentData": student })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "Sure.");
}

#[tokio::test]
async fn chat_with_partial_student_data_still_answers() {
    let (app, _) = test_app(replying("Try engineering."));
    let (status, body) = call(
        &app,
        "POST",
        "/api/chat",
        Some(json!({
            "message": "What should I study?",
            "studentData": { "name": "Asha", "location": "Delhi" }
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "response": "Try engineering." }));
}

#[tokio::test]
async fn chat_reply_is_cleaned() {
    let (app, _) = test_app(replying("<s>[OUT] Hello there"));
    let (status, body) = call(
        &app,
        "POST",
        "/api/chat",
        Some(json!({
            "message": "Hi",
            "studentData": { "name": "Asha", "interests": "Science", "location": "Delhi" }
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "Hello there");
}

#[tokio::test]
async fn chat_upstream_failure_returns_fallback() {
    let (app, _) = test_app(StubCompletion(None));
    let (status, body) = call(
        &app,
        "POST",
        "/api/chat",
        Some(json!({
            "message": "What should I study?",
            "studentData": { "name": "Asha", "interests": "Science", "location": "Delhi" }
        })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "response": FALLBACK_REPLY }));
}

#[tokio::test]
async fn chat_without_student_data_returns_fallback() {
    let (app, _) = test_app(replying("unused"));
    let (status, body) = call(&app, "POST", "/api/chat", Some(json!({ "message": "Hi" }))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "response": FALLBACK_REPLY }));
}

#[tokio::test]
async fn each_save_creates_a_new_snapshot() {
    let (app, _) = test_app(replying("unused"));
    let student = register_asha(&app).await;
    let id = student["id"].as_str().unwrap();

    let mut messages = vec![
        json!({ "role": "assistant", "content": "Hello Asha!" }),
        json!({ "role": "user", "content": "What should I study?" }),
    ];
    let (status, body) = call(
        &app,
        "POST",
        "/api/chat/save",
        Some(json!({ "studentId": id, "messages": messages })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    messages.push(json!({
        "role": "assistant",
        "content": "Try engineering.",
        "timestamp": "2026-01-05T10:00:00Z"
    }));
    let (status, _) = call(
        &app,
        "POST",
        "/api/chat/save",
        Some(json!({ "studentId": id, "messages": messages })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call(&app, "GET", &format!("/api/students/{id}/chats"), None).await;
    assert_eq!(status, StatusCode::OK);
    let chats = body["chats"].as_array().unwrap();
    assert_eq!(chats.len(), 2);
    assert_ne!(chats[0]["id"], chats[1]["id"]);
    assert_eq!(chats[0]["messages"].as_array().unwrap().len(), 2);
    assert_eq!(chats[1]["messages"].as_array().unwrap().len(), 3);
    assert_eq!(chats[1]["studentId"], id);
    assert_eq!(chats[1]["messages"][2]["timestamp"], "2026-01-05T10:00:00Z");
    assert!(chats[0]["messages"][0]["timestamp"].is_string());
}

#[tokio::test]
async fn save_does_not_require_a_registered_student() {
    let (app, store) = test_app(replying("unused"));
    let (status, _) = call(
        &app,
        "POST",
        "/api/chat/save",
        Some(json!({ "studentId": Uuid::new_v4().to_string(), "messages": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn save_rejects_malformed_input() {
    let (app, store) = test_app(replying("unused"));
    let id = Uuid::new_v4().to_string();

    for body in [
        json!({ "studentId": "abc", "messages": [] }),
        json!({ "messages": [] }),
        json!({ "studentId": id, "messages": [{ "role": "system", "content": "x" }] }),
        json!({ "studentId": id, "messages": [{ "role": "user", "content": 5 }] }),
        json!({ "studentId": id, "messages": "nope" }),
    ] {
        let (status, response) = call(&app, "POST", "/api/chat/save", Some(body.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(response["success"], false);
        assert!(response["error"].is_string());
    }

    assert!(store.is_empty().await);
}

#[tokio::test]
async fn chats_for_malformed_id_is_not_found() {
    let (app, _) = test_app(replying("unused"));
    let (status, body) = call(&app, "GET", "/api/students/xyz/chats", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Student not found");
}
