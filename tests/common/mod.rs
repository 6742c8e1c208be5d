#![allow(dead_code)]

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use tower::util::ServiceExt;

use snmp_monitor::snmp::MemoryTransport;
use snmp_monitor::{AppConfig, AppState, create_router};

pub const DEFAULT_DEVICE: &str = "192.168.10.1";

pub struct TestContext {
    pub transport: Arc<MemoryTransport>,
    pub state: AppState,
    pub app: axum::Router,
}

pub fn build_test_context() -> TestContext {
    let transport = Arc::new(MemoryTransport::new());
    let state = AppState::new(transport.clone(), AppConfig::default());
    let app = create_router(state.clone());

    TestContext {
        transport,
        state,
        app,
    }
}

/// ifDescr/ifOperStatus/ifSpeed для одного интерфейса
pub fn add_interface(
    transport: &MemoryTransport,
    target: &str,
    index: u32,
    name: &str,
    status: i64,
) {
    transport.insert_text(target, &format!("1.3.6.1.2.1.2.2.1.2.{}", index), name);
    transport.insert_integer(target, &format!("1.3.6.1.2.1.2.2.1.8.{}", index), status);
    transport.insert_integer(target, &format!("1.3.6.1.2.1.2.2.1.5.{}", index), 100_000_000);
}

pub async fn request(app: &axum::Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.expect("router is infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

pub async fn get(app: &axum::Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("valid request");
    request(app, req).await
}

pub async fn post_json(app: &axum::Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request");
    request(app, req).await
}
