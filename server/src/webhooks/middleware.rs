//! Webhook Signature Middleware

use axum::{
    body::Body,
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use http_body_util::LengthLimitError;
use tracing::warn;

use super::signing::{self, SigningSecret, SIGNATURE_HEADER};
use super::types::WebhookError;

/// State of [`require_signature`]: the key to check with and the most body
/// bytes it will buffer before the signature is known to be good.
#[derive(Debug, Clone)]
pub struct SignatureCheck {
    secret: SigningSecret,
    body_limit: usize,
}

impl SignatureCheck {
    pub const fn new(secret: SigningSecret, body_limit: usize) -> Self {
        Self { secret, body_limit }
    }

    pub const fn secret(&self) -> &SigningSecret {
        &self.secret
    }
}

/// Check the `X-Twitter-Webhooks-Signature` header against a raw body.
pub fn authenticate(
    secret: &SigningSecret,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<(), WebhookError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok());

    match signature {
        Some(sig) if signing::verify_signature(secret.expose(), body, sig) => Ok(()),
        Some(_) => {
            warn!("Invalid webhook signature");
            Err(WebhookError::InvalidSignature)
        }
        None => {
            warn!("Missing X-Twitter-Webhooks-Signature header");
            Err(WebhookError::InvalidSignature)
        }
    }
}

/// Middleware rejecting requests whose body signature does not verify.
///
/// The body is buffered (up to the check's limit) to compute the HMAC and
/// handed on unchanged, so the next handler can still read it. A valid
/// signature has no other effect.
///
/// # Usage
///
/// ```ignore
/// post(ingest_activity).layer(axum::middleware::from_fn_with_state(
///     SignatureCheck::new(secret, max_body_size),
///     require_signature,
/// ))
/// ```
pub async fn require_signature(
    State(check): State<SignatureCheck>,
    request: Request,
    next: Next,
) -> Result<Response, WebhookError> {
    let (parts, body) = request.into_parts();

    let bytes = axum::body::to_bytes(body, check.body_limit)
        .await
        .map_err(|e| {
            if exceeds_limit(&e) {
                warn!(limit = check.body_limit, "Webhook body over limit");
                WebhookError::PayloadTooLarge(check.body_limit)
            } else {
                warn!(error = %e, "Failed to buffer webhook body");
                WebhookError::BodyRead
            }
        })?;

    authenticate(&check.secret, &parts.headers, &bytes)?;

    let request = Request::from_parts(parts, Body::from(bytes));
    Ok(next.run(request).await)
}

fn exceeds_limit(err: &axum::Error) -> bool {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(e) = source {
        if e.is::<LengthLimitError>() {
            return true;
        }
        source = e.source();
    }
    false
}
