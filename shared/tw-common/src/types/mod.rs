//! Shared Types

mod direct_message;
mod id;
mod tweet;
mod user;

pub use direct_message::*;
pub use tweet::*;
pub use user::*;

/// Fields of a record that have no typed counterpart, kept verbatim.
pub type ExtraFields = serde_json::Map<String, serde_json::Value>;
