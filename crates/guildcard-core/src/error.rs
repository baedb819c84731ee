use guildcard_discord::DiscordError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("guild not found")]
    GuildNotFound,
    #[error("image fetch failed: {0}")]
    ImageFetch(String),
    #[error("upstream error: {0}")]
    Upstream(String),
}

impl From<DiscordError> for CoreError {
    fn from(e: DiscordError) -> Self {
        match e {
            DiscordError::GuildNotFound => CoreError::GuildNotFound,
            err @ DiscordError::ImageFetch { .. } => CoreError::ImageFetch(err.to_string()),
            err @ (DiscordError::Http(_) | DiscordError::Api(_)) => {
                CoreError::Upstream(err.to_string())
            }
        }
    }
}
