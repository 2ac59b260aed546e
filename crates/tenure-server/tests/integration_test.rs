use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tenure::http::{create_router, AppState};
use tenure::llm::OllamaClient;
use tenure_core::{JsonContractStore, JsonSessionStore};
use tower::ServiceExt;

fn make_state(dir: &TempDir, ollama_url: &str) -> AppState {
    AppState {
        contracts: Arc::new(
            JsonContractStore::open(dir.path().join("contracts.json")).unwrap(),
        ),
        sessions: Arc::new(JsonSessionStore::open(dir.path().join("sessions.json")).unwrap()),
        llm: Arc::new(
            OllamaClient::new(ollama_url, "test-model", std::time::Duration::from_secs(5))
                .unwrap(),
        ),
        start_time: std::time::Instant::now(),
    }
}

async fn request(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let resp = router.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn iso(days_from_today: i64) -> String {
    (Utc::now().date_naive() + Duration::days(days_from_today)).to_string()
}

fn draft_body(title: &str, company: &str, client: &str, end_days: i64) -> Value {
    json!({
        "title": title,
        "company": company,
        "client_name": client,
        "start_date": iso(-30),
        "end_date": iso(end_days),
    })
}

/// Mock Ollama endpoint that records every request body it receives and
/// answers with a fixed completion.
async fn spawn_mock_ollama(captured: Arc<Mutex<Vec<Value>>>) -> String {
    let app = Router::new()
        .route(
            "/api/chat",
            post(
                |State(cap): State<Arc<Mutex<Vec<Value>>>>, Json(body): Json<Value>| async move {
                    cap.lock().unwrap().push(body);
                    Json(json!({
                        "message": {
                            "role": "assistant",
                            "content": "Priya Sharma is on the Initech contract."
                        },
                        "done": true
                    }))
                },
            ),
        )
        .with_state(captured);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// An address nothing is listening on.
async fn dead_endpoint() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

// ── Contract API ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_contract_crud_round_trip() {
    let dir = TempDir::new().unwrap();
    let router = create_router(make_state(&dir, "http://unused"));

    let (status, created) = request(
        &router,
        "POST",
        "/api/contracts",
        Some(draft_body("Quality Assurance", "Initech", "Priya Sharma", 60)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["success"], json!(true));
    assert_eq!(created["contract"]["id"], json!(1));
    assert_eq!(created["contract"]["status"], json!("active"));
    assert_eq!(created["contract"]["days_remaining"], json!(60));

    let (status, fetched) = request(&router, "GET", "/api/contracts/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["title"], json!("Quality Assurance"));
    assert_eq!(fetched["contract_type"], json!("individual"));
    assert_eq!(fetched["created_at"], created["contract"]["created_at"]);

    let (status, updated) = request(
        &router,
        "PUT",
        "/api/contracts/1",
        Some(json!({ "end_date": iso(10), "notes": "Wrapping up" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], json!("Quality Assurance"));
    assert_eq!(updated["status"], json!("expiring"));
    assert_eq!(updated["notes"], json!("Wrapping up"));

    let (status, _) = request(&router, "DELETE", "/api/contracts/1", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = request(&router, "GET", "/api/contracts/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_contract_is_404() {
    let dir = TempDir::new().unwrap();
    let router = create_router(make_state(&dir, "http://unused"));

    let (status, body) = request(&router, "GET", "/api/contracts/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));

    let (status, _) = request(
        &router,
        "PUT",
        "/api/contracts/99",
        Some(json!({ "notes": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_missing_field_is_400_and_store_unchanged() {
    let dir = TempDir::new().unwrap();
    let router = create_router(make_state(&dir, "http://unused"));

    let mut body = draft_body("Backend Lead", "Initech", "Priya Sharma", 60);
    body.as_object_mut().unwrap().remove("end_date");

    let (status, resp) = request(&router, "POST", "/api/contracts", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["success"], json!(false));
    assert!(resp["error"].as_str().unwrap().contains("end_date"));

    let (_, listing) = request(&router, "GET", "/api/contracts", None).await;
    assert_eq!(listing["contracts"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_delete_unknown_id_succeeds_every_time() {
    let dir = TempDir::new().unwrap();
    let router = create_router(make_state(&dir, "http://unused"));

    let (first_status, first) = request(&router, "DELETE", "/api/contracts/42", None).await;
    let (second_status, second) = request(&router, "DELETE", "/api/contracts/42", None).await;

    assert_eq!(first_status, StatusCode::OK);
    assert_eq!(second_status, StatusCode::OK);
    assert_eq!(first, second);
    assert_eq!(first["success"], json!(true));
}

#[tokio::test]
async fn test_search_endpoint() {
    let dir = TempDir::new().unwrap();
    let router = create_router(make_state(&dir, "http://unused"));

    for body in [
        draft_body("Quality Assurance", "Initech", "Priya Sharma", 60),
        draft_body("Backend Lead", "Globex", "Arjun Rao", 60),
        draft_body("Ops Retainer", "Umbrella", "Neha Patel", 60),
    ] {
        let (status, _) = request(&router, "POST", "/api/contracts", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, resp) = request(
        &router,
        "POST",
        "/api/search",
        Some(json!({ "query": "quality" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["count"], json!(1));
    assert_eq!(resp["results"][0]["title"], json!("Quality Assurance"));
}

#[tokio::test]
async fn test_alerts_endpoint_scenario() {
    let dir = TempDir::new().unwrap();
    let router = create_router(make_state(&dir, "http://unused"));

    let (status, _) = request(
        &router,
        "POST",
        "/api/contracts",
        Some(draft_body("Expired Gig", "Initech", "Priya Sharma", -5)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = request(
        &router,
        "POST",
        "/api/contracts",
        Some(draft_body("Long Gig", "Globex", "Arjun Rao", 200)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, resp) = request(&router, "GET", "/api/alerts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["count"], json!(1));
    assert_eq!(resp["alerts"][0]["contract_id"], json!(1));
    assert_eq!(resp["alerts"][0]["status"], json!("expired"));
}

// ── Chat API ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_chat_round_trip_with_mock_upstream() {
    let dir = TempDir::new().unwrap();
    let captured = Arc::new(Mutex::new(Vec::new()));
    let upstream = spawn_mock_ollama(captured.clone()).await;
    let router = create_router(make_state(&dir, &upstream));

    let (status, _) = request(
        &router,
        "POST",
        "/api/contracts",
        Some(draft_body("Quality Assurance", "Initech", "Priya Sharma", 60)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, first) = request(
        &router,
        "POST",
        "/api/chat",
        Some(json!({ "message": "Who is on the Initech contract?" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        first["response"],
        json!("Priya Sharma is on the Initech contract.")
    );
    let chat_id = first["chat_id"].as_str().unwrap().to_string();
    assert!(!chat_id.is_empty());

    // The briefing rode along as the system instruction.
    {
        let seen = captured.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0]["model"], json!("test-model"));
        assert_eq!(seen[0]["stream"], json!(false));
        assert_eq!(seen[0]["messages"][0]["role"], json!("system"));
        let briefing = seen[0]["messages"][0]["content"].as_str().unwrap();
        assert!(briefing.contains("Contract #1: Quality Assurance"));
        assert_eq!(
            seen[0]["messages"][1]["content"],
            json!("Who is on the Initech contract?")
        );
    }

    let (status, second) = request(
        &router,
        "POST",
        "/api/chat",
        Some(json!({ "message": "When does it end?", "chat_id": chat_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["chat_id"].as_str().unwrap(), chat_id);

    let (status, history) = request(
        &router,
        "GET",
        &format!("/api/chat/history/{}", chat_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(history["chat_id"].as_str().unwrap(), chat_id);
    let messages = history["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["user"], json!("Who is on the Initech contract?"));
    assert_eq!(
        messages[0]["bot"],
        json!("Priya Sharma is on the Initech contract.")
    );
    assert_eq!(messages[1]["user"], json!("When does it end?"));
}

#[tokio::test]
async fn test_chat_unreachable_upstream_is_500_with_hint() {
    let dir = TempDir::new().unwrap();
    let upstream = dead_endpoint().await;
    let router = create_router(make_state(&dir, &upstream));

    let (status, resp) = request(
        &router,
        "POST",
        "/api/chat",
        Some(json!({ "message": "hello" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(resp["success"], json!(false));
    assert!(resp["error"].as_str().unwrap().contains("ollama serve"));
}

#[tokio::test]
async fn test_chat_empty_message_is_400() {
    let dir = TempDir::new().unwrap();
    let router = create_router(make_state(&dir, "http://unused"));

    let (status, resp) = request(
        &router,
        "POST",
        "/api/chat",
        Some(json!({ "message": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(resp["error"].as_str().unwrap().contains("message"));
}

#[tokio::test]
async fn test_history_unknown_session_is_404() {
    let dir = TempDir::new().unwrap();
    let router = create_router(make_state(&dir, "http://unused"));

    let (status, resp) = request(&router, "GET", "/api/chat/history/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(resp["success"], json!(false));
}

// ── Health ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_health_reports_store_counts() {
    let dir = TempDir::new().unwrap();
    let router = create_router(make_state(&dir, "http://unused"));

    let (status, _) = request(
        &router,
        "POST",
        "/api/contracts",
        Some(draft_body("Quality Assurance", "Initech", "Priya Sharma", 60)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, resp) = request(&router, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["healthy"], json!(true));
    assert_eq!(resp["contracts"], json!(1));
    assert_eq!(resp["sessions"], json!(0));
}
