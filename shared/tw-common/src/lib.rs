//! Account Activity Common Types
//!
//! Platform records shared by the webhook server and event consumers.

pub mod types;

pub use types::*;
