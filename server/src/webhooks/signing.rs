//! HMAC-SHA256 Webhook Signing
//!
//! Computes CRC response tokens and verifies inbound payload signatures.
//! Both use the base64 of an HMAC-SHA256 keyed by the app consumer secret.

use std::fmt;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Prefix carried by both CRC response tokens and signature headers.
pub const SIGNATURE_PREFIX: &str = "sha256=";

/// Header carrying the payload signature on inbound deliveries.
pub const SIGNATURE_HEADER: &str = "x-twitter-webhooks-signature";

/// App consumer secret used to key every HMAC.
///
/// Cheap to clone; the `Debug` impl never prints the value.
#[derive(Clone)]
pub struct SigningSecret(Arc<str>);

impl SigningSecret {
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningSecret(..)")
    }
}

fn keyed_mac(secret: &str) -> HmacSha256 {
    HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size")
}

/// Base64 of HMAC-SHA256(`challenge`) keyed by `secret`.
pub fn compute_token(challenge: &[u8], secret: &str) -> String {
    let mut mac = keyed_mac(secret);
    mac.update(challenge);
    STANDARD.encode(mac.finalize().into_bytes())
}

/// `sha256=<token>`, the form used in CRC responses and signature headers.
pub fn response_token(challenge: &[u8], secret: &str) -> String {
    format!("{SIGNATURE_PREFIX}{}", compute_token(challenge, secret))
}

/// Verify a `sha256=<base64>` signature header against a payload.
///
/// The comparison runs in constant time over the decoded digest.
pub fn verify_signature(secret: &str, payload: &[u8], signature: &str) -> bool {
    let Some(encoded) = signature.strip_prefix(SIGNATURE_PREFIX) else {
        return false;
    };

    let Ok(expected) = STANDARD.decode(encoded.trim()) else {
        return false;
    };

    let mut mac = keyed_mac(secret);
    mac.update(payload);
    mac.verify_slice(&expected).is_ok()
}
