//! Account Activity Webhooks
//!
//! CRC challenge responses, payload signature checks, payload decoding and
//! deadline-bounded fan-out of activity events onto a consumer sink.

pub mod dispatch;
pub mod events;
pub mod handlers;
pub mod middleware;
pub mod payload;
pub mod signing;
pub mod types;

pub use dispatch::{Dispatcher, DispatchOutcome, EventSink, DEFAULT_DISPATCH_TIMEOUT};
pub use events::{ActivityEvent, Delivery, DirectMessage, EventKind};
pub use handlers::{webhook_router, IngestState};
pub use middleware::SignatureCheck;
pub use payload::ActivityPayload;
pub use signing::SigningSecret;
pub use types::{DispatchError, SinkClosed, WebhookError};
