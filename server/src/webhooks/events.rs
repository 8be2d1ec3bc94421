//! Activity Event Types
//!
//! Tagged events produced by fanning out an [`ActivityPayload`], and the
//! `Delivery` values posted on the consumer sink.
//!
//! [`ActivityPayload`]: super::payload::ActivityPayload

use std::collections::HashMap;
use std::sync::Arc;

use tw_common::{DirectMessageEvent, Tweet, User};

use super::payload::{DeleteEvent, FriendshipEvent, Revoke};
use super::types::DispatchError;

/// What a consumer receives: an event, or an error raised while producing one.
pub type Delivery = Result<ActivityEvent, DispatchError>;

/// One activity event taken from a webhook delivery.
#[derive(Debug, Clone)]
pub enum ActivityEvent {
    TweetCreate(Tweet),
    TweetDelete(DeleteEvent),
    Favorite(Tweet),
    Follow(FriendshipEvent),
    Block(FriendshipEvent),
    Mute(FriendshipEvent),
    DirectMessage(DirectMessage),
    Revoke(Revoke),
}

/// A direct message together with the users of the payload it came in.
///
/// `users` is shared by every direct message of one payload and is read-only,
/// so participants can be resolved without a second lookup.
#[derive(Debug, Clone)]
pub struct DirectMessage {
    pub event: DirectMessageEvent,
    pub users: Arc<HashMap<String, User>>,
}

impl DirectMessage {
    pub fn sender(&self) -> Option<&User> {
        self.event.sender_id().and_then(|id| self.users.get(id))
    }

    pub fn recipient(&self) -> Option<&User> {
        self.event.recipient_id().and_then(|id| self.users.get(id))
    }
}

impl ActivityEvent {
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::TweetCreate(_) => EventKind::TweetCreate,
            Self::TweetDelete(_) => EventKind::TweetDelete,
            Self::Favorite(_) => EventKind::Favorite,
            Self::Follow(_) => EventKind::Follow,
            Self::Block(_) => EventKind::Block,
            Self::Mute(_) => EventKind::Mute,
            Self::DirectMessage(_) => EventKind::DirectMessage,
            Self::Revoke(_) => EventKind::Revoke,
        }
    }
}

/// Event discriminant, named after the payload collection it comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    TweetCreate,
    TweetDelete,
    Favorite,
    Follow,
    Block,
    Mute,
    DirectMessage,
    Revoke,
}

impl EventKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TweetCreate => "tweet_create",
            Self::TweetDelete => "tweet_delete",
            Self::Favorite => "favorite",
            Self::Follow => "follow",
            Self::Block => "block",
            Self::Mute => "mute",
            Self::DirectMessage => "direct_message",
            Self::Revoke => "revoke",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tw_common::{MessageCreate, MessageTarget};

    #[test]
    fn kind_names_match_payload_collections() {
        assert_eq!(EventKind::TweetCreate.to_string(), "tweet_create");
        assert_eq!(EventKind::DirectMessage.to_string(), "direct_message");
        assert_eq!(
            ActivityEvent::Revoke(Revoke::default()).kind().as_str(),
            "revoke"
        );
    }

    #[test]
    fn direct_message_resolves_participants() {
        let mut users = HashMap::new();
        users.insert(
            "1".to_string(),
            User { id_str: "1".into(), screen_name: "alice".into(), ..User::default() },
        );
        users.insert(
            "2".to_string(),
            User { id_str: "2".into(), screen_name: "bob".into(), ..User::default() },
        );

        let dm = DirectMessage {
            event: DirectMessageEvent {
                kind: "message_create".into(),
                message_create: Some(MessageCreate {
                    target: MessageTarget { recipient_id: "2".into() },
                    sender_id: "1".into(),
                    ..MessageCreate::default()
                }),
                ..DirectMessageEvent::default()
            },
            users: Arc::new(users),
        };

        assert_eq!(dm.sender().map(|u| u.screen_name.as_str()), Some("alice"));
        assert_eq!(dm.recipient().map(|u| u.screen_name.as_str()), Some("bob"));
        assert_eq!(ActivityEvent::DirectMessage(dm).kind(), EventKind::DirectMessage);
    }
}
