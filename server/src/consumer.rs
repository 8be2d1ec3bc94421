//! Event Log Consumer
//!
//! Default sink consumer: drains deliveries and logs each one.

use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{info, warn};

use crate::webhooks::{ActivityEvent, Delivery};

/// Counts of what a consumer drained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsumerStats {
    pub events: u64,
    pub errors: u64,
}

/// Log deliveries until every sender is dropped.
pub async fn run_event_log(mut rx: UnboundedReceiver<Delivery>) -> ConsumerStats {
    info!("Event log consumer started");
    let mut stats = ConsumerStats::default();

    while let Some(delivery) = rx.recv().await {
        match delivery {
            Ok(event) => {
                stats.events += 1;
                log_event(&event);
            }
            Err(e) => {
                stats.errors += 1;
                warn!(error = %e, "Webhook dispatch error");
            }
        }
    }

    info!(events = stats.events, errors = stats.errors, "Event log consumer stopped");
    stats
}

fn log_event(event: &ActivityEvent) {
    let kind = event.kind();
    match event {
        ActivityEvent::TweetCreate(tweet) | ActivityEvent::Favorite(tweet) => info!(
            event_kind = %kind,
            tweet_id = %tweet.id_str,
            author = tweet.user.as_ref().map(|u| u.screen_name.as_str()),
            reply = tweet.is_reply(),
            "Activity event"
        ),
        ActivityEvent::TweetDelete(delete) => info!(
            event_kind = %kind,
            tweet_id = %delete.status.id,
            user_id = %delete.status.user_id,
            "Activity event"
        ),
        ActivityEvent::Follow(f) | ActivityEvent::Block(f) | ActivityEvent::Mute(f) => info!(
            event_kind = %kind,
            action = %f.kind,
            source = f.source.first().map(|u| u.id_str.as_str()),
            target = f.target.first().map(|u| u.id_str.as_str()),
            "Activity event"
        ),
        ActivityEvent::DirectMessage(dm) => info!(
            event_kind = %kind,
            message_id = %dm.event.id,
            sender = dm.sender().map(|u| u.screen_name.as_str()),
            recipient = dm.recipient().map(|u| u.screen_name.as_str()),
            "Activity event"
        ),
        ActivityEvent::Revoke(revoke) => info!(
            event_kind = %kind,
            app_id = %revoke.target.app_id,
            user_id = %revoke.source.user_id,
            "Activity event"
        ),
    }
}
