//! Webhook Error Types
//!
//! `WebhookError` is returned to the platform as an HTTP response;
//! `DispatchError` is posted on the consumer sink.

use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Errors surfaced by the webhook endpoints.
#[derive(Error, Debug)]
pub enum WebhookError {
    #[error("Missing crc_token in the request.")]
    MissingCrcToken,
    #[error("The webhook signature is not correct.")]
    InvalidSignature,
    #[error("Request body exceeds the {0} byte limit.")]
    PayloadTooLarge(usize),
    #[error("Failed to read request body.")]
    BodyRead,
    #[error("{0}")]
    Decode(#[from] serde_json::Error),
    #[error("Event sink is closed, no consumer is receiving deliveries")]
    SinkClosed,
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::MissingCrcToken | Self::BodyRead | Self::Decode(_) => StatusCode::BAD_REQUEST,
            Self::InvalidSignature => StatusCode::UNAUTHORIZED,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::SinkClosed => {
                tracing::error!("Webhook delivery received with no sink consumer");
                StatusCode::SERVICE_UNAVAILABLE
            }
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Errors delivered to the consumer alongside events.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("an error occurred while parsing json: {0}")]
    Decode(String),
    #[error("call to the webhook handler timed out after {}ms", .0.as_millis())]
    TimedOut(Duration),
    #[error("error occurred while handling webhook: {0}")]
    Panicked(String),
}

/// The receiving half of the sink was dropped.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("event sink is closed")]
pub struct SinkClosed;

impl From<SinkClosed> for WebhookError {
    fn from(_: SinkClosed) -> Self {
        Self::SinkClosed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(
            WebhookError::MissingCrcToken.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            WebhookError::InvalidSignature.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            WebhookError::PayloadTooLarge(64).into_response().status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            WebhookError::SinkClosed.into_response().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn decode_error_message_is_the_parser_message() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let expected = parse_err.to_string();
        assert_eq!(WebhookError::from(parse_err).to_string(), expected);
    }

    #[test]
    fn timeout_message_names_the_deadline() {
        let err = DispatchError::TimedOut(Duration::from_secs(5));
        assert_eq!(err.to_string(), "call to the webhook handler timed out after 5000ms");
    }
}
