//! Collaborators that talk to the outside world: the Discord REST API for
//! guild lookups and plain HTTP for icon/banner images.

pub mod cdn;
pub mod client;
pub mod images;

use std::time::Duration;
use thiserror::Error;

pub use client::DiscordClient;
pub use images::ImageFetcher;

pub const DEFAULT_API_BASE_URL: &str = "https://discord.com/api/v10";
pub const DEFAULT_CDN_BASE_URL: &str = "https://cdn.discordapp.com";

#[derive(Debug, Error)]
pub enum DiscordError {
    #[error("guild not found")]
    GuildNotFound,
    #[error("failed to fetch image {url}: {reason}")]
    ImageFetch { url: String, reason: String },
    #[error("http error: {0}")]
    Http(String),
    #[error("discord api error: {0}")]
    Api(String),
}

#[derive(Debug, Clone)]
pub struct DiscordConfig {
    pub token: String,
    pub api_base_url: String,
    pub cdn_base_url: String,
    pub request_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct ImageConfig {
    pub request_timeout: Duration,
    /// Zero disables caching.
    pub cache_ttl: Duration,
    pub cache_max_entries: u64,
    pub max_image_bytes: usize,
}
