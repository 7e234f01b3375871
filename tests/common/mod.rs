#![allow(dead_code)]

use std::{
    collections::HashMap,
    io,
    sync::{Arc, Mutex},
};

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header::AUTHORIZATION},
};
use devbook::{
    auth::{credential_store::InMemoryCredentialStore, jwt::TokenCodec},
    config::SecretKey,
    web::{mw_logger::REQUEST_LOG_TARGET, state::AppState},
};
use http_body_util::BodyExt;
use serde_json::Value;
use tracing::{
    Event, Subscriber,
    field::{Field, Visit},
};
use tracing_subscriber::{Layer, layer::Context};

pub const TEST_SECRET: &str = "integration-test-secret";
pub const ROOT_ID: u64 = 1;
pub const ROOT_EMAIL: &str = "root@devbook.io";
pub const ROOT_SECRET: &str = "my_super_secret";

pub fn codec() -> TokenCodec {
    TokenCodec::new(&SecretKey::new(TEST_SECRET))
}

pub fn state() -> AppState {
    let store = InMemoryCredentialStore::new();
    store
        .register(ROOT_ID, ROOT_EMAIL, ROOT_SECRET)
        .expect("Couldn't register root identity");
    AppState::with_codec(codec(), Arc::new(store))
}

pub fn request(
    method: &str,
    uri: &str,
    authorization: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("host", "devbook.test");
    if let Some(authorization) = authorization {
        builder = builder.header(AUTHORIZATION, authorization);
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Couldn't build request")
}

/// Builds a request whose body is sent verbatim under `content_type`.
pub fn raw_request(
    method: &str,
    uri: &str,
    authorization: Option<&str>,
    content_type: &str,
    body: &'static str,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("host", "devbook.test")
        .header("content-type", content_type);
    if let Some(authorization) = authorization {
        builder = builder.header(AUTHORIZATION, authorization);
    }
    builder.body(Body::from(body)).expect("Couldn't build request")
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("Couldn't read body")
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).expect("Body is not JSON")
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    use tower::ServiceExt;
    app.clone().oneshot(request).await.expect("Infallible")
}

/// Fields of one request log event, keyed by field name.
pub type RecordedFields = HashMap<String, String>;

/// Records the request log events seen by the current thread's subscriber.
#[derive(Clone, Default)]
pub struct RequestLogRecorder(Arc<Mutex<Vec<RecordedFields>>>);

impl RequestLogRecorder {
    pub fn count(&self) -> usize {
        self.events().len()
    }

    pub fn events(&self) -> Vec<RecordedFields> {
        self.0.lock().expect("Recorder poisoned").clone()
    }
}

struct FieldVisitor<'a>(&'a mut RecordedFields);

impl Visit for FieldVisitor<'_> {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{value:?}"));
    }
}

impl<S: Subscriber> Layer<S> for RequestLogRecorder {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if event.metadata().target() == REQUEST_LOG_TARGET {
            let mut fields = RecordedFields::new();
            event.record(&mut FieldVisitor(&mut fields));
            self.0.lock().expect("Recorder poisoned").push(fields);
        }
    }
}

/// In-memory sink for formatted log output.
#[derive(Clone, Default)]
pub struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl CapturedLog {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().expect("Log poisoned")).into_owned()
    }
}

impl io::Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("Log poisoned").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
