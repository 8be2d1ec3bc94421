//! Direct Message Types

use serde::{Deserialize, Serialize};

use super::ExtraFields;

/// A direct message event from `direct_message_events`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectMessageEvent {
    /// Event type, `message_create` for regular messages.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub id: String,
    /// Millisecond epoch timestamp as a string.
    #[serde(default)]
    pub created_timestamp: String,
    #[serde(default)]
    pub message_create: Option<MessageCreate>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Body of a `message_create` event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageCreate {
    #[serde(default)]
    pub target: MessageTarget,
    #[serde(default)]
    pub sender_id: String,
    #[serde(default)]
    pub source_app_id: Option<String>,
    #[serde(default)]
    pub message_data: MessageData,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageTarget {
    #[serde(default)]
    pub recipient_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageData {
    #[serde(default)]
    pub text: String,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl DirectMessageEvent {
    /// Sender user ID, if this is a `message_create` event.
    pub fn sender_id(&self) -> Option<&str> {
        self.message_create.as_ref().map(|m| m.sender_id.as_str())
    }

    /// Recipient user ID, if this is a `message_create` event.
    pub fn recipient_id(&self) -> Option<&str> {
        self.message_create
            .as_ref()
            .map(|m| m.target.recipient_id.as_str())
    }
}
