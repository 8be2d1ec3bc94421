//! Reusable test helpers for HTTP integration tests.
//!
//! Provides `TestApp` for building and sending requests through the full axum
//! router, with the receiving end of the event sink exposed for assertions.
#![allow(dead_code)]

use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::http::{self, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tokio::sync::mpsc;
use tower::ServiceExt;
use tw_webhook::api::create_router;
use tw_webhook::config::Config;
use tw_webhook::webhooks::signing;
use tw_webhook::webhooks::{Delivery, IngestState};

/// Router plus the consumer side of its sink.
pub struct TestApp {
    pub router: Router,
    pub config: Config,
    pub deliveries: mpsc::UnboundedReceiver<Delivery>,
}

impl TestApp {
    /// Build the app with the default test configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default_for_test())
    }

    /// Build the app with a custom configuration.
    pub fn with_config(config: Config) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let ingest =
            IngestState::new(tx, config.dispatch_timeout()).expect("Failed to build ingest state");
        let router = create_router(&config, ingest);

        Self {
            router,
            config,
            deliveries: rx,
        }
    }

    /// Build an HTTP request with the given method and URI.
    pub fn request(method: Method, uri: &str) -> http::request::Builder {
        Request::builder().method(method).uri(uri)
    }

    /// A POST to the webhook path signed with the app's consumer secret.
    pub fn signed_post(&self, body: &str) -> Request<Body> {
        let signature = signing::response_token(body.as_bytes(), &self.config.consumer_secret);
        Self::request(Method::POST, &self.config.webhook_path)
            .header("content-type", "application/json")
            .header("x-twitter-webhooks-signature", signature)
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    /// Send a request through the router via `tower::ServiceExt::oneshot`.
    pub async fn oneshot(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("oneshot request failed")
    }

    /// Drain whatever is on the sink right now, waiting briefly for stragglers.
    pub async fn drain_deliveries(&mut self) -> Vec<Delivery> {
        let mut items = Vec::new();
        while let Ok(Some(item)) =
            tokio::time::timeout(Duration::from_millis(50), self.deliveries.recv()).await
        {
            items.push(item);
        }
        items
    }
}

/// Collect a response body into bytes.
pub async fn body_to_bytes(response: Response<Body>) -> Bytes {
    response
        .into_body()
        .collect()
        .await
        .expect("Failed to collect response body")
        .to_bytes()
}

/// Collect a response body and parse it as JSON.
pub async fn body_to_json(response: Response<Body>) -> serde_json::Value {
    let bytes = body_to_bytes(response).await;
    serde_json::from_slice(&bytes).unwrap_or_else(|e| {
        let preview = String::from_utf8_lossy(&bytes);
        panic!("Failed to parse response as JSON: {e}\nBody: {preview}")
    })
}
