//! End-to-end tests driving the full router with in-memory adapters.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use lab_lending::adapters::http::{router, AppState, RouterSettings, SessionSettings};
use lab_lending::adapters::{BcryptHasher, InMemoryDatabase, InMemorySessionStore};
use lab_lending::domain::equipment::Stock;
use lab_lending::domain::foundation::Role;
use lab_lending::domain::lending::ItemRef;

const PASSWORD: &str = "correct-horse";
const API_TOKEN: &str = "svc-token-0123456789";
const TEST_COST: u32 = 4;

struct TestApp {
    app: Router,
    db: Arc<InMemoryDatabase>,
    item_id: i64,
}

async fn test_app() -> TestApp {
    let db = Arc::new(InMemoryDatabase::new());
    let hash = bcrypt::hash(PASSWORD, TEST_COST).unwrap();
    let user = db.seed_user("ada", "ada@lab.test", &hash, Role::User).await;
    db.seed_api_token(user.id, API_TOKEN).await;
    let item = db
        .seed_item("OSC-01", "Oscilloscope", Stock::full(2).unwrap())
        .await;

    let state = AppState {
        lending: db.clone(),
        catalog: db.clone(),
        attachments: db.clone(),
        credentials: db.clone(),
        sessions: Arc::new(InMemorySessionStore::new()),
        hasher: Arc::new(BcryptHasher::new(TEST_COST)),
        session: SessionSettings::default(),
    };

    TestApp {
        app: router(state, &RouterSettings::default()),
        db,
        item_id: item.id().as_i64(),
    }
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

// ════════════════════════════════════════════════════════════════════════════════
// Gate
// ════════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn protected_route_without_token_is_401_and_mutates_nothing() {
    let t = test_app().await;
    let req = json_request(
        "POST",
        "/api/items/borrow",
        None,
        json!({"item_id": t.item_id, "quantity": 1}),
    );

    let (status, body) = send(&t.app, req).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHENTICATED");
    assert!(t.db.records().await.is_empty());
}

#[tokio::test]
async fn unknown_token_is_401() {
    let t = test_app().await;
    let (status, _) = send(&t.app, get("/api/items/open-borrows", Some("nope"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn credential_outage_is_503_not_401() {
    let t = test_app().await;
    t.db.fail_credential_lookups(true);
    let (status, body) = send(&t.app, get("/api/items/open-borrows", Some("whatever"))).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "DATABASE_ERROR");
}

#[tokio::test]
async fn catalog_reads_and_health_are_public() {
    let t = test_app().await;

    let (status, body) = send(&t.app, get("/api/items?q=oscillo", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["sku"], "OSC-01");

    let (status, body) = send(&t.app, get(&format!("/api/items/{}", t.item_id), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["available_quantity"], 2);

    let (status, body) = send(&t.app, get("/api/healthz", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "lab-lending");
}

// ════════════════════════════════════════════════════════════════════════════════
// Lending
// ════════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn borrow_then_return_over_http() {
    let t = test_app().await;

    let (status, body) = send(
        &t.app,
        json_request(
            "POST",
            "/api/items/borrow",
            Some(API_TOKEN),
            json!({"sku": "OSC-01", "quantity": 2, "return_date": "2030-01-15"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["available_quantity"], 0);
    assert_eq!(body["status"], "borrowed");
    let borrow_id = body["id"].as_i64().unwrap();

    let (status, body) = send(
        &t.app,
        json_request(
            "POST",
            "/api/items/borrow",
            Some(API_TOKEN),
            json!({"item_id": t.item_id, "quantity": 1}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INSUFFICIENT_STOCK");

    let (status, body) = send(&t.app, get("/api/items/open-borrows", Some(API_TOKEN))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = send(
        &t.app,
        json_request(
            "POST",
            "/api/items/return",
            Some(API_TOKEN),
            json!({"borrow_id": borrow_id, "condition_on_return": "fine"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["available_quantity"], 2);

    let (status, body) = send(
        &t.app,
        json_request(
            "POST",
            "/api/items/return",
            Some(API_TOKEN),
            json!({"borrow_id": borrow_id}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "ALREADY_RETURNED");
    assert_eq!(
        t.db.stock_of(&ItemRef::Sku("OSC-01".into()))
            .await
            .unwrap()
            .available(),
        2
    );
}

#[tokio::test]
async fn borrow_prefers_item_id_over_sku() {
    let t = test_app().await;

    let (status, body) = send(
        &t.app,
        json_request(
            "POST",
            "/api/items/borrow",
            Some(API_TOKEN),
            json!({"item_id": t.item_id, "sku": "NO-SUCH-SKU", "quantity": 1}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["item_id"], t.item_id);
    assert_eq!(body["available_quantity"], 1);
}

#[tokio::test]
async fn borrow_validation_errors_are_400() {
    let t = test_app().await;

    let (status, body) = send(
        &t.app,
        json_request(
            "POST",
            "/api/items/borrow",
            Some(API_TOKEN),
            json!({"item_id": t.item_id}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");

    let (status, body) = send(
        &t.app,
        json_request(
            "POST",
            "/api/items/borrow",
            Some(API_TOKEN),
            json!({"item_id": 999, "quantity": 1}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "ITEM_NOT_FOUND");
}

// ════════════════════════════════════════════════════════════════════════════════
// Auth
// ════════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn login_sets_cookie_that_authenticates() {
    let t = test_app().await;

    let response = t
        .app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({"identifier": "ADA@lab.test", "password": PASSWORD}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("imx_token="));
    assert!(cookie.contains("HttpOnly"));
    let pair = cookie.split(';').next().unwrap().to_string();

    let request = Request::builder()
        .uri("/api/items/open-borrows")
        .header(header::COOKIE, pair)
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&t.app, request).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn wrong_password_is_401() {
    let t = test_app().await;
    let (status, body) = send(
        &t.app,
        json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({"identifier": "ada", "password": "not-it"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn logout_invalidates_session_token() {
    let t = test_app().await;
    let (_, body) = send(
        &t.app,
        json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({"identifier": "ada", "password": PASSWORD}),
        ),
    )
    .await;
    let token = body["token"].as_str().unwrap().to_string();

    let (status, body) = send(
        &t.app,
        json_request("POST", "/api/auth/logout", Some(&token), json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);

    let (status, _) = send(&t.app, get("/api/items/open-borrows", Some(&token))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn register_logs_in_and_rejects_duplicates() {
    let t = test_app().await;
    let form = json!({
        "full_name": "Grace Hopper",
        "username": "grace",
        "email": "grace@lab.test",
        "password": "long-enough-pw"
    });

    let (status, body) = send(
        &t.app,
        json_request("POST", "/api/auth/register", None, form.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["username"], "grace");
    assert!(!body["token"].as_str().unwrap().is_empty());

    let (status, body) = send(
        &t.app,
        json_request("POST", "/api/auth/register", None, form),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");
}

// ════════════════════════════════════════════════════════════════════════════════
// Catalog writes
// ════════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn catalog_writes_require_auth_and_persist() {
    let t = test_app().await;
    let item = json!({"sku": "CEN-5", "name": "Centrifuge", "quantity": 3});

    let (status, _) = send(&t.app, json_request("POST", "/api/items", None, item.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(
        &t.app,
        json_request("POST", "/api/items", Some(API_TOKEN), item),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["available_quantity"], 3);
    let new_id = body["id"].as_i64().unwrap();

    let (status, body) = send(
        &t.app,
        json_request(
            "POST",
            "/api/equipment-notes",
            Some(API_TOKEN),
            json!({"item_id": new_id, "note_text": "calibrated"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["id"].as_i64().is_some());

    let (status, body) = send(
        &t.app,
        get(&format!("/api/equipment-notes?item_id={new_id}"), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["note_text"], "calibrated");
    assert_eq!(body[0]["created_by"], "ada");

    let (status, body) = send(
        &t.app,
        json_request(
            "POST",
            "/api/equipment-notes",
            Some(API_TOKEN),
            json!({"item_id": 4242, "note_text": "ghost"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "ITEM_NOT_FOUND");
}
