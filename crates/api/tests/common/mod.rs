//! Shared setup for HTTP tests.

#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use bankapi_api::{AppState, create_router};
use bankapi_db::migration::{Migrator, MigratorTrait};
use bankapi_shared::config::DatabaseConfig;
use http_body_util::BodyExt;
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tower::ServiceExt;

/// Router over a fresh, migrated in-memory database.
pub async fn app() -> (Router, DatabaseConnection) {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
        migrate_on_start: false,
    };
    let db = bankapi_db::connect(&config)
        .await
        .expect("Failed to connect to database");
    Migrator::up(&db, None).await.expect("Failed to run migrations");

    (create_router(AppState::new(db.clone())), db)
}

/// Sends a request with an optional JSON body.
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    app.clone().oneshot(request).await.unwrap()
}

/// Reads the response body as text.
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Reads the response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Creates an account through the API and returns its JSON.
pub async fn create_account(app: &Router, name: &str, number: i64, balance: f64, limit: f64) -> Value {
    let body = serde_json::json!({
        "name": name,
        "number": number,
        "balance": balance,
        "specialLimit": limit,
    })
    .to_string();
    body_json(send(app, "POST", "/account", Some(&body)).await).await
}

/// Returns the content type header, if any.
pub fn content_type(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
