//! Access to the bot backend's HTTP API.

mod client;
pub mod types;

pub use client::{ApiError, BotApiClient, extract_detail};
pub use types::UpstreamHealth;
