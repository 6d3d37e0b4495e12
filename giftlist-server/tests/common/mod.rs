//! Common test utilities for the HTTP API tests.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use giftlist::{AdminSecret, ImageStore, MemoryGiftStore};
use giftlist_server::{router, AppState};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

/// Password accepted by every test app.
pub const PASSWORD: &str = "s3cret";

/// An in-process server over an in-memory store.
pub struct TestApp {
    pub router: Router,
    pub images: TempDir,
}

/// A decoded response.
#[allow(dead_code)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

#[allow(dead_code)]
impl TestResponse {
    /// The body parsed as JSON.
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

#[allow(dead_code)]
impl TestApp {
    /// Creates an app with an empty store.
    pub fn new() -> Self {
        let images = tempfile::tempdir().unwrap();
        let state = AppState::new(
            Arc::new(MemoryGiftStore::new()),
            AdminSecret::new(PASSWORD).unwrap(),
            ImageStore::new(images.path().join("images")),
        );
        Self {
            router: router(state),
            images,
        }
    }

    /// Sends a request through the router.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec();
        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Sends a JSON request without credentials.
    pub async fn public(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        self.send(json_request(method, uri, body, None)).await
    }

    /// Sends a JSON request with the admin password.
    pub async fn admin(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        self.send(json_request(method, uri, body, Some(PASSWORD)))
            .await
    }

    /// Creates a gift through the API and returns its id.
    pub async fn create_gift(&self, name: &str) -> i64 {
        let response = self
            .admin(
                Method::POST,
                "/api/admin/presentes",
                Some(serde_json::json!({
                    "nome": name,
                    "descricao": "Kitchen",
                    "imagem": format!("{}.png", name.to_lowercase()),
                })),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
        response.json()["id"].as_i64().unwrap()
    }

    /// Lists gifts through the API.
    pub async fn list(&self) -> Vec<Value> {
        let response = self.public(Method::GET, "/api/presentes", None).await;
        assert_eq!(response.status, StatusCode::OK);
        response.json().as_array().unwrap().clone()
    }
}

/// Builds a request, optionally with a JSON body and admin header.
pub fn json_request(
    method: Method,
    uri: &str,
    body: Option<Value>,
    password: Option<&str>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(password) = password {
        builder = builder.header("x-admin-password", password);
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}
