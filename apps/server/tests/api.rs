//! End-to-end route tests over an in-memory database.
//!
//! Each test assembles a fresh application (isolated database, isolated
//! session file) and drives it through the router, the same way a browser
//! client would.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use elegante_core::Role;
use elegante_db::{Database, DbConfig};
use elegante_server::config::ServerConfig;
use elegante_server::routes::build_router;
use elegante_server::session::SessionStore;
use elegante_server::{auth, AppState};

const SERVICE_TOKEN: &str = "test-service-token";

/// A fresh app with the default admin and one sales_staff account.
async fn test_app() -> (Router, AppState) {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();

    auth::ensure_default_admin(&db, "admin123").await.unwrap();
    auth::create_user(&db, "counter", "counter123", Role::SalesStaff)
        .await
        .unwrap();

    let session_path =
        std::env::temp_dir().join(format!("elegante-test-session-{}.json", Uuid::new_v4()));
    let session = SessionStore::new(session_path);

    let config = ServerConfig {
        http_port: 0,
        database_path: ":memory:".to_string(),
        session_file: session.path().display().to_string(),
        service_token: SERVICE_TOKEN.to_string(),
        admin_password: "admin123".to_string(),
    };

    let state = AppState::new(db, session, config);
    (build_router(state.clone()), state)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn login(app: &Router, username: &str, password: &str) -> StatusCode {
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/session/login",
            json!({ "username": username, "password": password }),
        ))
        .await
        .unwrap();
    response.status()
}

/// Creates a product through the API and returns its id. Caller must be
/// logged in with an admin role.
async fn create_product(app: &Router, sku: &str) -> String {
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/products",
            json!({
                "name": format!("Product {sku}"),
                "sku": sku,
                "buyPriceCents": 50_000,
                "sellPriceCents": 90_000,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_str().unwrap().to_string()
}

async fn add_stock(app: &Router, product_id: &str, quantity: i64) {
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/stock-entries",
            json!({ "productId": product_id, "quantity": quantity }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

// =============================================================================
// Session & Guards
// =============================================================================

#[tokio::test]
async fn unauthenticated_requests_are_redirected_to_login() {
    let (app, _state) = test_app().await;

    for uri in [
        "/api/dashboard",
        "/api/products",
        "/api/sales",
        "/api/navigation",
    ] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");

        let body = body_json(response).await;
        assert_eq!(body["redirect"], "/login", "{uri}");
    }
}

#[tokio::test]
async fn login_rejects_bad_credentials_with_generic_message() {
    let (app, state) = test_app().await;

    let wrong_password = app
        .clone()
        .oneshot(post_json(
            "/api/session/login",
            json!({ "username": "admin", "password": "nope" }),
        ))
        .await
        .unwrap();
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    let body_a = body_json(wrong_password).await;

    let unknown_user = app
        .clone()
        .oneshot(post_json(
            "/api/session/login",
            json!({ "username": "ghost", "password": "nope" }),
        ))
        .await
        .unwrap();
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);
    let body_b = body_json(unknown_user).await;

    // Indistinguishable failures, session left unset.
    assert_eq!(body_a["message"], "Invalid username or password");
    assert_eq!(body_a["message"], body_b["message"]);
    assert!(state.session.current().await.is_none());

    state.session.clear().await;
}

#[tokio::test]
async fn login_populates_session_and_logout_clears_it() {
    let (app, state) = test_app().await;

    assert_eq!(login(&app, "admin", "admin123").await, StatusCode::OK);
    let user = state.session.current().await.unwrap();
    assert_eq!(user.username, "admin");
    assert_eq!(user.role, Role::SuperAdmin);

    let response = app
        .clone()
        .oneshot(post_json("/api/session/logout", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(state.session.current().await.is_none());
}

#[tokio::test]
async fn sales_staff_is_denied_admin_pages() {
    let (app, state) = test_app().await;
    assert_eq!(login(&app, "counter", "counter123").await, StatusCode::OK);

    // Hard denies:
    for uri in [
        "/api/products",
        "/api/stock-entries",
        "/api/analytics",
        "/api/users",
    ] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{uri}");
    }

    // Permitted:
    for uri in ["/api/dashboard", "/api/sales"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
    }

    state.session.clear().await;
}

#[tokio::test]
async fn navigation_menu_matches_the_permission_matrix() {
    let (app, state) = test_app().await;
    assert_eq!(login(&app, "counter", "counter123").await, StatusCode::OK);

    let response = app.clone().oneshot(get("/api/navigation")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let paths: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["path"].as_str().unwrap())
        .collect();
    assert_eq!(paths, vec!["/", "/sales"]);

    state.session.clear().await;
}

#[tokio::test]
async fn dashboard_hides_financials_from_sales_staff() {
    let (app, state) = test_app().await;

    assert_eq!(login(&app, "admin", "admin123").await, StatusCode::OK);
    let admin_view = body_json(app.clone().oneshot(get("/api/dashboard")).await.unwrap()).await;
    assert!(admin_view.get("financial").is_some());

    assert_eq!(login(&app, "counter", "counter123").await, StatusCode::OK);
    let staff_view = body_json(app.clone().oneshot(get("/api/dashboard")).await.unwrap()).await;
    assert!(staff_view.get("financial").is_none());
    assert!(staff_view.get("todaysSales").is_some());
    assert!(staff_view.get("productCount").is_some());

    state.session.clear().await;
}

// =============================================================================
// Inventory & Sales Flow
// =============================================================================

#[tokio::test]
async fn stock_and_sales_flow_maintains_quantity() {
    let (app, state) = test_app().await;
    assert_eq!(login(&app, "admin", "admin123").await, StatusCode::OK);

    let product_id = create_product(&app, "SHIRT-01").await;
    add_stock(&app, &product_id, 10).await;

    // Price omitted: auto-filled from the product's sell price.
    let sale = app
        .clone()
        .oneshot(post_json(
            "/api/sales",
            json!({ "productId": product_id, "quantity": 4 }),
        ))
        .await
        .unwrap();
    assert_eq!(sale.status(), StatusCode::CREATED);
    let sale_body = body_json(sale).await;
    assert_eq!(sale_body["priceCents"], 90_000);

    // Quantity reflects +10 then -4.
    let products = body_json(app.clone().oneshot(get("/api/products")).await.unwrap()).await;
    assert_eq!(products[0]["quantity"], 6);

    // Summary over the sales page.
    let sales_page = body_json(app.clone().oneshot(get("/api/sales")).await.unwrap()).await;
    assert_eq!(sales_page["summary"]["revenue"], 360_000);
    assert_eq!(sales_page["summary"]["items"], 4);
    assert_eq!(sales_page["summary"]["transactions"], 1);
    assert_eq!(sales_page["sales"][0]["recordedByUsername"], "admin");

    state.session.clear().await;
}

#[tokio::test]
async fn oversubscribed_sale_is_blocked_without_insert() {
    let (app, state) = test_app().await;
    assert_eq!(login(&app, "admin", "admin123").await, StatusCode::OK);

    let product_id = create_product(&app, "BELT-01").await;
    add_stock(&app, &product_id, 3).await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/sales",
            json!({ "productId": product_id, "quantity": 5 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(response).await;
    assert_eq!(body["code"], "INSUFFICIENT_STOCK");
    assert_eq!(body["field"], "quantity");

    // Nothing was inserted and the quantity is untouched.
    let sales_page = body_json(app.clone().oneshot(get("/api/sales")).await.unwrap()).await;
    assert_eq!(sales_page["summary"]["transactions"], 0);
    let products = body_json(app.clone().oneshot(get("/api/products")).await.unwrap()).await;
    assert_eq!(products[0]["quantity"], 3);

    state.session.clear().await;
}

#[tokio::test]
async fn duplicate_sku_is_a_field_level_validation_error() {
    let (app, state) = test_app().await;
    assert_eq!(login(&app, "admin", "admin123").await, StatusCode::OK);

    create_product(&app, "TIE-01").await;
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/products",
            json!({
                "name": "Another Tie",
                "sku": "TIE-01",
                "buyPriceCents": 1000,
                "sellPriceCents": 2000,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["field"], "sku");

    state.session.clear().await;
}

#[tokio::test]
async fn stock_entries_page_reports_totals() {
    let (app, state) = test_app().await;
    assert_eq!(login(&app, "admin", "admin123").await, StatusCode::OK);

    let a = create_product(&app, "WC-01").await;
    let b = create_product(&app, "CUFF-01").await;
    add_stock(&app, &a, 12).await;
    add_stock(&app, &b, 8).await;
    add_stock(&app, &b, 2).await;

    let page = body_json(app.clone().oneshot(get("/api/stock-entries")).await.unwrap()).await;
    assert_eq!(page["summary"]["products"], 2);
    assert_eq!(page["summary"]["entries"], 3);
    assert_eq!(page["summary"]["totalQuantity"], 22);

    state.session.clear().await;
}

#[tokio::test]
async fn analytics_ranks_products_by_revenue() {
    let (app, state) = test_app().await;
    assert_eq!(login(&app, "admin", "admin123").await, StatusCode::OK);

    let a = create_product(&app, "TRS-01").await;
    let b = create_product(&app, "TIE-02").await;
    add_stock(&app, &a, 10).await;
    add_stock(&app, &b, 10).await;

    // a: 2 × 90000 = 180000; b: 3 × 10000 = 30000
    for (product, quantity, price) in [(&a, 2, 90_000), (&b, 3, 10_000)] {
        let response = app
            .clone()
            .oneshot(post_json(
                "/api/sales",
                json!({ "productId": product, "quantity": quantity, "priceCents": price }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let analytics = body_json(app.clone().oneshot(get("/api/analytics")).await.unwrap()).await;

    let months = analytics["months"].as_array().unwrap();
    assert_eq!(months.len(), 6);

    let top = analytics["topProducts"].as_array().unwrap();
    assert_eq!(top.len(), 2);
    assert_eq!(top[0]["sku"], "TRS-01");
    assert_eq!(top[0]["revenue"], 180_000);

    assert_eq!(analytics["totals"]["revenue"], 210_000);

    state.session.clear().await;
}

// =============================================================================
// Authentication Endpoint
// =============================================================================

#[tokio::test]
async fn auth_endpoint_requires_the_bearer_credential() {
    let (app, _state) = test_app().await;

    // No Authorization header.
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/auth",
            json!({ "action": "login", "username": "admin", "password": "admin123" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Wrong credential.
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, "Bearer wrong")
        .body(Body::from(
            json!({ "action": "login", "username": "admin", "password": "admin123" }).to_string(),
        ))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn auth_endpoint_logs_in_and_bootstraps() {
    let (app, _state) = test_app().await;

    let authorized = |body: Value| {
        Request::builder()
            .method("POST")
            .uri("/api/auth")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {SERVICE_TOKEN}"))
            .body(Body::from(body.to_string()))
            .unwrap()
    };

    let response = app
        .clone()
        .oneshot(authorized(
            json!({ "action": "login", "username": "admin", "password": "admin123" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["role"], "super_admin");

    // The bootstrap is idempotent: the admin already exists.
    let response = app
        .clone()
        .oneshot(authorized(json!({ "action": "create_default_admin" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);

    // Failed login: generic error, success false.
    let response = app
        .clone()
        .oneshot(authorized(
            json!({ "action": "login", "username": "admin", "password": "wrong" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Invalid username or password");
}
