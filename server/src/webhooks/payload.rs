//! Account Activity Payload
//!
//! Wire format of a webhook delivery. Each collection keeps the order it had
//! on the wire; optional scalars stay `None` when absent rather than taking a
//! zero value.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tw_common::{DirectMessageEvent, Tweet, User};

use super::events::{ActivityEvent, DirectMessage};

/// Root object of an Account Activity webhook delivery.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityPayload {
    /// Subscribed user the delivery is addressed to.
    #[serde(default)]
    pub for_user_id: Option<String>,
    #[serde(default)]
    pub is_blocked_by: Option<bool>,
    #[serde(default)]
    pub user_has_blocked: Option<bool>,
    /// Users referenced by direct message events, keyed by user ID.
    #[serde(default)]
    pub users: HashMap<String, User>,
    #[serde(default)]
    pub tweet_create_events: Vec<Tweet>,
    #[serde(default)]
    pub tweet_delete_events: Vec<DeleteEvent>,
    #[serde(default)]
    pub favorite_events: Vec<Tweet>,
    #[serde(default)]
    pub follow_events: Vec<FriendshipEvent>,
    #[serde(default)]
    pub block_events: Vec<FriendshipEvent>,
    #[serde(default)]
    pub mute_events: Vec<FriendshipEvent>,
    #[serde(default)]
    pub direct_message_events: Vec<DirectMessageEvent>,
    #[serde(default)]
    pub user_event: Option<UserEvent>,
}

impl ActivityPayload {
    /// Decode a raw request body.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    /// Number of events a fan-out of this payload delivers.
    pub fn event_count(&self) -> usize {
        self.tweet_create_events.len()
            + self.tweet_delete_events.len()
            + self.favorite_events.len()
            + self.follow_events.len()
            + self.block_events.len()
            + self.mute_events.len()
            + self.direct_message_events.len()
            + usize::from(self.user_event.is_some())
    }

    /// Consume the payload into its events, in fan-out order.
    ///
    /// Tweet creates, tweet deletes, favorites, follows, blocks and mutes come
    /// first, then direct messages paired with the payload's users, then the
    /// revoke event if there is one.
    pub fn into_events(self) -> impl Iterator<Item = ActivityEvent> + Send {
        let users = Arc::new(self.users);

        self.tweet_create_events
            .into_iter()
            .map(ActivityEvent::TweetCreate)
            .chain(self.tweet_delete_events.into_iter().map(ActivityEvent::TweetDelete))
            .chain(self.favorite_events.into_iter().map(ActivityEvent::Favorite))
            .chain(self.follow_events.into_iter().map(ActivityEvent::Follow))
            .chain(self.block_events.into_iter().map(ActivityEvent::Block))
            .chain(self.mute_events.into_iter().map(ActivityEvent::Mute))
            .chain(self.direct_message_events.into_iter().map(move |event| {
                ActivityEvent::DirectMessage(DirectMessage {
                    event,
                    users: Arc::clone(&users),
                })
            }))
            .chain(self.user_event.map(|u| ActivityEvent::Revoke(u.revoke)))
    }
}

/// A deleted status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteEvent {
    #[serde(default)]
    pub status: DeletedStatus,
    #[serde(rename = "timestamp_ms", default)]
    pub timestamp: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedStatus {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub user_id: String,
}

/// Follow, block or mute between two sets of users.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FriendshipEvent {
    /// `follow`, `unfollow`, `block`, `unblock`, `mute` or `unmute`.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub created_timestamp: String,
    #[serde(default)]
    pub target: Vec<User>,
    #[serde(default)]
    pub source: Vec<User>,
}

impl FriendshipEvent {
    /// Creation time, if `created_timestamp` holds epoch milliseconds.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        let millis: i64 = self.created_timestamp.parse().ok()?;
        Utc.timestamp_millis_opt(millis).single()
    }
}

/// Wrapper around the single user event a payload may carry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEvent {
    pub revoke: Revoke,
}

/// A user revoked the app's access to their account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revoke {
    #[serde(default)]
    pub date_time: String,
    #[serde(default)]
    pub target: RevokeTarget,
    #[serde(default)]
    pub source: RevokeSource,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevokeTarget {
    #[serde(default)]
    pub app_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevokeSource {
    #[serde(default)]
    pub user_id: String,
}
