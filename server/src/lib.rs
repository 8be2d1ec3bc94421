//! Account Activity Webhook Server
//!
//! Answers CRC challenges, verifies payload signatures and fans activity
//! events (tweets, favorites, follows, blocks, mutes, direct messages,
//! revocations) out onto a consumer-owned sink.

pub mod api;
pub mod config;
pub mod consumer;
pub mod webhooks;
