//! Webhook Endpoint Handlers
//!
//! CRC challenge response and activity ingestion. Signature checks live in
//! [`super::middleware`].

use std::time::Duration;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use super::dispatch::{Dispatcher, EventSink};
use super::middleware::{require_signature, SignatureCheck};
use super::payload::ActivityPayload;
use super::signing::{self, SigningSecret};
use super::types::{DispatchError, WebhookError};

#[derive(Debug, Deserialize)]
pub struct CrcParams {
    pub crc_token: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CrcResponse {
    pub response_token: String,
}

/// GET — answer a CRC challenge with `sha256=<base64 hmac>` of the token.
#[instrument(name = "webhook.crc", skip_all)]
pub async fn crc_challenge(
    State(secret): State<SigningSecret>,
    Query(params): Query<CrcParams>,
) -> Result<Json<CrcResponse>, WebhookError> {
    let Some(token) = params.crc_token else {
        warn!("CRC request without crc_token");
        return Err(WebhookError::MissingCrcToken);
    };

    info!("Answered CRC challenge");
    Ok(Json(CrcResponse {
        response_token: signing::response_token(token.as_bytes(), secret.expose()),
    }))
}

/// State of the ingestion endpoint.
#[derive(Debug, Clone)]
pub struct IngestState<S> {
    dispatcher: Dispatcher<S>,
}

impl<S: EventSink> IngestState<S> {
    /// Fails when the sink has no receiver left to deliver to.
    pub fn new(sink: S, timeout: Duration) -> Result<Self, WebhookError> {
        if sink.is_closed() {
            return Err(WebhookError::SinkClosed);
        }

        Ok(Self {
            dispatcher: Dispatcher::new(sink, timeout),
        })
    }

    pub const fn dispatcher(&self) -> &Dispatcher<S> {
        &self.dispatcher
    }
}

/// POST — decode an activity payload and dispatch its events.
///
/// Decode failures are answered with 400 and also posted on the sink.
#[instrument(name = "webhook.ingest", skip_all, fields(bytes = body.len()))]
pub async fn ingest_activity<S: EventSink>(
    State(state): State<IngestState<S>>,
    body: Bytes,
) -> Result<StatusCode, WebhookError> {
    let payload = match ActivityPayload::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(error = %e, "Failed to decode activity payload");
            state.dispatcher.report(DispatchError::Decode(e.to_string()));
            return Err(e.into());
        }
    };

    let outcome = state.dispatcher.dispatch(payload).await;
    info!(?outcome, "Activity payload handled");

    Ok(StatusCode::OK)
}

/// Routes for one webhook URL: GET answers CRC challenges, POST ingests
/// signed activity payloads no larger than the check's body limit.
pub fn webhook_router<S: EventSink>(
    path: &str,
    check: SignatureCheck,
    ingest: IngestState<S>,
) -> Router {
    let crc = get(crc_challenge).with_state(check.secret().clone());
    let ingest = post(ingest_activity::<S>)
        .with_state(ingest)
        .layer(from_fn_with_state(check, require_signature));

    Router::new().route(path, crc.merge(ingest))
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;

    use super::*;
    use crate::webhooks::dispatch::DEFAULT_DISPATCH_TIMEOUT;
    use crate::webhooks::events::Delivery;

    #[test]
    fn ingest_state_rejects_closed_sink() {
        let (tx, rx) = mpsc::unbounded_channel::<Delivery>();
        drop(rx);

        assert!(matches!(
            IngestState::new(tx, DEFAULT_DISPATCH_TIMEOUT),
            Err(WebhookError::SinkClosed)
        ));
    }

    #[test]
    fn ingest_state_keeps_timeout() {
        let (tx, _rx) = mpsc::unbounded_channel::<Delivery>();
        let state = IngestState::new(tx, Duration::from_millis(250)).unwrap();

        assert_eq!(state.dispatcher().timeout(), Duration::from_millis(250));
    }

    #[tokio::test]
    async fn crc_challenge_answers_with_prefixed_token() {
        let Json(response) = crc_challenge(
            State(SigningSecret::new("s3cr3t")),
            Query(CrcParams { crc_token: Some("abc123".into()) }),
        )
        .await
        .unwrap();

        assert_eq!(
            response.response_token,
            format!("sha256={}", signing::compute_token(b"abc123", "s3cr3t"))
        );
    }

    #[tokio::test]
    async fn crc_challenge_without_token_is_rejected() {
        let result = crc_challenge(
            State(SigningSecret::new("s3cr3t")),
            Query(CrcParams { crc_token: None }),
        )
        .await;

        assert!(matches!(result, Err(WebhookError::MissingCrcToken)));
    }
}
