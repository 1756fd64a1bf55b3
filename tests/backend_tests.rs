//! End-to-end flow tests against a mocked VitaHealth backend
//!
//! The reqwest backend talks to a wiremock server; storage is a temporary
//! JSON file so the tests exercise the same stack as the terminal client.

use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;
use vitahealth::{FileStore, HttpBackend};
use vitahealth_core::flows::detection::{run_detection, DetectionPage, SelectedImage};
use vitahealth_core::flows::login::{submit_login, LoginForm, LoginOutcome};
use vitahealth_core::flows::planner::{load_planner, PlannerView};
use vitahealth_core::flows::profile::{delete_record, load_profile, ProfileFetch};
use vitahealth_core::flows::register::{submit_registration, RegisterForm, RegisterOutcome};
use vitahealth_core::routes::{guard, GuardOutcome, Route};
use vitahealth_core::types::{AuthResponse, ImageUpload, RecordId, UserSummary};
use vitahealth_core::{ApiError, Backend, KeyValueStore, ProgressStore, SessionStore};
use wiremock::matchers::{any, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============= Helper Functions =============

fn temp_store() -> (TempDir, Arc<FileStore>) {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(FileStore::new(dir.path().join("storage.json")));
    (dir, store)
}

fn logged_in(store: &Arc<FileStore>, token: &str) -> SessionStore<Arc<FileStore>> {
    let sessions = SessionStore::new(Arc::clone(store));
    sessions
        .persist_login(&AuthResponse {
            token: token.to_string(),
            user: Some(UserSummary {
                firstname: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                lastname: None,
            }),
        })
        .unwrap();
    sessions
}

fn eye_image() -> SelectedImage {
    SelectedImage {
        upload: ImageUpload {
            file_name: "eye.jpg".to_string(),
            mime_type: "image/jpeg".to_string(),
            bytes: vec![0xFF, 0xD8, 0xFF, 0xE0],
        },
        preview: None,
    }
}

fn mock_plan() -> serde_json::Value {
    json!({
        "plan": [
            {"day": "Day 1", "meals": [{"type": "Breakfast", "food": "Orange juice"}]},
            {"day": "Day 2", "meals": [{"type": "Lunch", "food": "Bell pepper salad"}]},
            {"day": 3, "meals": [{"type": "Dinner", "food": "Broccoli stir-fry"}]}
        ],
        "fact": "Vitamin C supports collagen formation."
    })
}

// ============= Registration =============

#[tokio::test]
async fn test_register_with_empty_password_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let backend = HttpBackend::new(&server.uri());
    let form = RegisterForm {
        firstname: "Ada".to_string(),
        lastname: "Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        password: String::new(),
    };

    let outcome = submit_registration(&backend, &form).await;
    assert!(matches!(outcome, RegisterOutcome::Rejected(_)));
    assert_eq!(outcome.modal().title, "Validation Error");
}

#[tokio::test]
async fn test_register_surfaces_backend_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/register"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({"message": "Email already registered"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let backend = HttpBackend::new(&server.uri());
    let form = RegisterForm {
        firstname: "Ada".to_string(),
        lastname: "Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        password: "secret".to_string(),
    };

    let outcome = submit_registration(&backend, &form).await;
    assert_eq!(outcome.modal().message, "Email already registered");
}

#[tokio::test]
async fn test_register_accepts_empty_success_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/register"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let backend = HttpBackend::new(&server.uri());
    let form = RegisterForm {
        firstname: "Ada".to_string(),
        lastname: "Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        password: "secret".to_string(),
    };

    match submit_registration(&backend, &form).await {
        RegisterOutcome::Registered { redirect, .. } => assert_eq!(redirect, Route::Login),
        other => panic!("expected registration, got {:?}", other),
    }
}

// ============= Login =============

#[tokio::test]
async fn test_login_persists_session_and_opens_guard() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "tok-123",
            "user": {"firstname": "Ada", "email": "ada@example.com"}
        })))
        .mount(&server)
        .await;

    let (_dir, store) = temp_store();
    let sessions = SessionStore::new(Arc::clone(&store));
    let backend = HttpBackend::new(&server.uri());

    assert!(guard(Route::Detect, store.as_ref()).is_redirect());

    let form = LoginForm {
        email: "ada@example.com".to_string(),
        password: "secret".to_string(),
    };
    match submit_login(&backend, &sessions, &form).await {
        LoginOutcome::LoggedIn { session, .. } => assert_eq!(session.display_name(), "Ada"),
        other => panic!("expected login, got {:?}", other),
    }

    assert_eq!(store.get("token").as_deref(), Some("tok-123"));
    assert_eq!(
        guard(Route::Detect, store.as_ref()),
        GuardOutcome::Allow(Route::Detect)
    );
}

// ============= Detection =============

#[tokio::test]
async fn test_detection_renders_percentage_and_saves_history() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "predicted_disease": "Bitot's spots",
            "vitamin_deficiency": "Vitamin A Deficiency",
            "confidence": 0.8734
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/save_detection"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, store) = temp_store();
    let session = logged_in(&store, "tok-1").sync_from_storage();
    let backend = HttpBackend::new(&server.uri());

    let mut page = DetectionPage::new();
    page.select_image(eye_image());
    let result = run_detection(&mut page, &backend, &session).await.unwrap();

    assert_eq!(result.confidence_percent(), "87.34%");
    assert_eq!(
        page.planner_route(),
        Some(Route::Planner {
            vitamin: "VitaminA".to_string()
        })
    );

    let requests = server.received_requests().await.unwrap();
    let save = requests
        .iter()
        .find(|r| r.url.path() == "/save_detection")
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&save.body).unwrap();
    assert_eq!(body["deficiency"], "Vitamin A Deficiency");
    assert!((body["confidence"].as_f64().unwrap() - 87.34).abs() < 1e-9);
}

#[tokio::test]
async fn test_predict_sends_multipart_image_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let backend = HttpBackend::new(&server.uri());
    let response = backend.predict(&eye_image().upload).await.unwrap();
    assert!(response.vitamin_deficiency.is_none());

    let requests = server.received_requests().await.unwrap();
    let content_type = requests[0]
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("multipart/form-data"));

    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"image\""));
    assert!(body.contains("filename=\"eye.jpg\""));
}

#[tokio::test]
async fn test_prediction_failure_keeps_image_and_uses_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "Unsupported image"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/save_detection"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let (_dir, store) = temp_store();
    let session = logged_in(&store, "tok-1").sync_from_storage();
    let backend = HttpBackend::new(&server.uri());

    let mut page = DetectionPage::new();
    page.select_image(eye_image());
    assert!(run_detection(&mut page, &backend, &session).await.is_none());

    let modal = page.modal().unwrap();
    assert_eq!(modal.title, "Prediction Failed");
    assert_eq!(modal.message, "Unsupported image");
    assert!(page.selected().is_some());
}

#[tokio::test]
async fn test_unreachable_backend_is_connectivity() {
    let backend = HttpBackend::new("http://127.0.0.1:1");
    let err = backend.planner("VitaminC").await.unwrap_err();
    assert!(err.is_connectivity());
}

// ============= Planner =============

#[tokio::test]
async fn test_planner_loads_after_matching_history() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/history"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "deficiency": "Vitamin C Deficiency", "confidence": 91.2}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/planner/VitaminC"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_plan()))
        .expect(1)
        .mount(&server)
        .await;

    let (dir, store) = temp_store();
    let session = logged_in(&store, "tok-1").sync_from_storage();
    let backend = HttpBackend::new(&server.uri());
    let progress = ProgressStore::new(Arc::clone(&store));

    let PlannerView::Ready(mut board) = load_planner(&backend, &progress, &session, "VitaminC").await
    else {
        panic!("expected a planner board");
    };
    assert_eq!(board.total_days(), 3);
    assert_eq!(board.days()[2].day, "3");

    board.toggle_day(&progress, "Day 2", true).unwrap();
    assert_eq!(board.percentage(), 33);

    // A fresh handle on the same file (next invocation) sees the progress
    let reopened = ProgressStore::new(FileStore::new(dir.path().join("storage.json")));
    assert!(reopened.load("VitaminC").is_done("Day 2"));
    assert!(reopened.last_updated().is_some());
}

#[tokio::test]
async fn test_planner_without_matching_history_skips_plan_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "history": [{"id": "a1", "deficiency": "Iron Deficiency"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/planner/VitaminC"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_plan()))
        .expect(0)
        .mount(&server)
        .await;

    let (_dir, store) = temp_store();
    let session = logged_in(&store, "tok-1").sync_from_storage();
    let backend = HttpBackend::new(&server.uri());
    let progress = ProgressStore::new(Arc::clone(&store));

    let view = load_planner(&backend, &progress, &session, "VitaminC").await;
    assert_eq!(view, PlannerView::NoActivePlanner);
}

// ============= Profile =============

#[tokio::test]
async fn test_profile_401_clears_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/profile"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Token expired"})))
        .mount(&server)
        .await;

    let (_dir, store) = temp_store();
    let sessions = logged_in(&store, "stale");
    let session = sessions.sync_from_storage();
    let backend = HttpBackend::new(&server.uri());

    // The guard admits the stale token; the page sees the 401
    assert!(!guard(Route::Profile, store.as_ref()).is_redirect());
    let err = backend.profile("stale").await.unwrap_err();
    assert_eq!(err, ApiError::Unauthorized);

    let outcome = load_profile(&backend, &sessions, &session).await.unwrap_err();
    assert!(matches!(outcome, ProfileFetch::Expired { redirect: Route::Login, .. }));
    assert_eq!(store.get("token"), None);
    assert_eq!(store.get("user"), None);
}

#[tokio::test]
async fn test_delete_removes_record_even_when_server_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "firstname": "Ada", "lastname": "Lovelace", "email": "ada@example.com"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 7, "deficiency": "Vitamin D Deficiency", "confidence": 72.5},
            {"id": 8, "deficiency": "Vitamin C Deficiency", "confidence": 64.0}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/history/7"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, store) = temp_store();
    let sessions = logged_in(&store, "tok-1");
    let session = sessions.sync_from_storage();
    let backend = HttpBackend::new(&server.uri());

    let mut page = load_profile(&backend, &sessions, &session).await.unwrap();
    assert_eq!(page.profile.as_ref().unwrap().firstname, "Ada");
    assert_eq!(page.history[0].summary(), "Vitamin D Deficiency (72.50%)");

    let result = delete_record(&mut page, &backend, "tok-1", &RecordId::Number(7)).await;
    assert!(matches!(result, Err(ApiError::Backend { status: 500, .. })));
    assert_eq!(page.history.len(), 1);
    assert_eq!(page.history[0].id, RecordId::Number(8));
}

#[tokio::test]
async fn test_cli_delete_matches_text_id_by_string_form() {
    use vitahealth::cli::commands::{self, Context};
    use vitahealth::cli::output::Output;
    use vitahealth::cli::{Commands, HistoryCommands};
    use vitahealth::ClientConfig;

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "42", "deficiency": "Vitamin C Deficiency", "confidence": 80.0}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/history/42"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let (dir, store) = temp_store();
    logged_in(&store, "tok-1");
    let mut config = ClientConfig::default().with_origin(&server.uri()).unwrap();
    config.storage.path = dir.path().join("storage.json");
    let ctx = Context::new(config, Output::no_color());

    let command = Commands::History {
        action: Some(HistoryCommands::Delete {
            id: "42".to_string(),
            yes: true,
        }),
    };
    commands::run(&ctx, command).await.unwrap();
}
