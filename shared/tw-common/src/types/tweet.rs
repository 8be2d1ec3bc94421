//! Tweet Types

use serde::{Deserialize, Serialize};

use super::{ExtraFields, User};

/// A status as delivered in `tweet_create_events` and `favorite_events`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tweet {
    #[serde(default, deserialize_with = "super::id::deserialize")]
    pub id: u64,
    #[serde(default)]
    pub id_str: String,
    /// Creation time in the platform's `Wed Oct 10 20:19:24 +0000 2018` format.
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub text: String,
    /// Author, when embedded.
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub in_reply_to_status_id_str: Option<String>,
    #[serde(default)]
    pub in_reply_to_user_id_str: Option<String>,
    /// Millisecond epoch timestamp as a string.
    #[serde(default)]
    pub timestamp_ms: Option<String>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Tweet {
    /// Whether this status replies to another one.
    pub const fn is_reply(&self) -> bool {
        self.in_reply_to_status_id_str.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_may_be_a_string() {
        let tweet: Tweet =
            serde_json::from_str(r#"{"id":"954491830116155396","id_str":"954491830116155396"}"#)
                .unwrap();

        assert_eq!(tweet.id, 954_491_830_116_155_396);
        assert!(!tweet.is_reply());
    }

    #[test]
    fn reply_is_detected_from_status_id() {
        let tweet: Tweet = serde_json::from_str(
            r#"{"id":2,"in_reply_to_status_id_str":"1","user":{"id":"7","screen_name":"sam"}}"#,
        )
        .unwrap();

        assert!(tweet.is_reply());
        assert_eq!(tweet.user.map(|u| u.id), Some(7));
    }
}
