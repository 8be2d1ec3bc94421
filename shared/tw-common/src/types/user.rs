//! User Types

use serde::{Deserialize, Serialize};

use super::ExtraFields;

/// User profile as delivered in activity payloads.
///
/// Only the identifying fields are typed; the rest of the profile is carried
/// in `extra` so it survives a round trip untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Numeric user ID. Sent as a string in direct message deliveries.
    #[serde(default, deserialize_with = "super::id::deserialize")]
    pub id: u64,
    /// User ID as a string (use this one, numeric IDs overflow in JS clients).
    #[serde(default)]
    pub id_str: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Handle without the leading `@`.
    #[serde(default)]
    pub screen_name: String,
    /// Whether the account is protected.
    #[serde(default)]
    pub protected: bool,
    /// Whether the account is verified.
    #[serde(default)]
    pub verified: bool,
    /// Remaining profile fields.
    #[serde(flatten)]
    pub extra: ExtraFields,
}
