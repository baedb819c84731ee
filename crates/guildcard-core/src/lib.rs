pub mod card;
pub mod error;

use guildcard_discord::{DiscordClient, ImageFetcher};
use std::sync::Arc;

pub const DEFAULT_FALLBACK_ICON_URL: &str = "https://cdn3.emoji.gg/emojis/4789-discord-icon.png";
pub const DEFAULT_FALLBACK_BANNER_URL: &str = "https://i.imgur.com/WcIB4vh.jpeg";

/// Shared, read-only context handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub discord: DiscordClient,
    pub images: ImageFetcher,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Used when a guild has no icon.
    pub fallback_icon_url: String,
    /// Used when a guild has no banner (default shape only).
    pub fallback_banner_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            fallback_icon_url: DEFAULT_FALLBACK_ICON_URL.to_string(),
            fallback_banner_url: DEFAULT_FALLBACK_BANNER_URL.to_string(),
        }
    }
}
