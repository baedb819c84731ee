use guildcard_models::GuildSnapshot;
use reqwest::{header, Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use crate::{cdn, DiscordConfig, DiscordError};

const MAX_RETRIES: u32 = 3;
const RETRY_BASE_DELAY: Duration = Duration::from_millis(500);

/// JSON error code for "Unknown Guild".
const UNKNOWN_GUILD: u64 = 10004;
/// JSON error code for "Missing Access", returned when the bot is not a member.
const MISSING_ACCESS: u64 = 50001;

#[derive(Debug, Deserialize)]
struct GuildPayload {
    id: String,
    name: String,
    icon: Option<String>,
    banner: Option<String>,
    #[serde(default)]
    approximate_member_count: Option<u64>,
    #[serde(default)]
    approximate_presence_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    #[serde(default)]
    code: Option<u64>,
    #[serde(default)]
    message: Option<String>,
}

impl GuildPayload {
    fn into_snapshot(self, cdn_base: &str) -> GuildSnapshot {
        GuildSnapshot {
            icon_url: self
                .icon
                .as_deref()
                .map(|hash| cdn::guild_icon_url(cdn_base, &self.id, hash)),
            banner_url: self
                .banner
                .as_deref()
                .map(|hash| cdn::guild_banner_url(cdn_base, &self.id, hash)),
            member_count: self.approximate_member_count.unwrap_or(0),
            online_member_count: self.approximate_presence_count.unwrap_or(0),
            name: self.name,
            id: self.id,
        }
    }
}

/// Bot-authenticated client for the Discord REST API.
#[derive(Debug, Clone)]
pub struct DiscordClient {
    http: Client,
    token: String,
    api_base_url: String,
    cdn_base_url: String,
}

impl DiscordClient {
    pub fn new(config: DiscordConfig) -> Result<Self, DiscordError> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("DiscordBot (guildcard, ", env!("CARGO_PKG_VERSION"), ")"))
            .build()
            .map_err(|e| DiscordError::Http(e.to_string()))?;

        Ok(Self {
            http,
            token: config.token,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            cdn_base_url: config.cdn_base_url,
        })
    }

    /// Look up a guild with approximate member and presence counts.
    pub async fn fetch_guild(&self, guild_id: &str) -> Result<GuildSnapshot, DiscordError> {
        let url = format!("{}/guilds/{}?with_counts=true", self.api_base_url, guild_id);
        let resp = self.get_with_retry(&url).await?;
        let status = resp.status();

        if status.is_success() {
            let payload: GuildPayload = resp
                .json()
                .await
                .map_err(|e| DiscordError::Api(format!("invalid guild payload: {e}")))?;
            tracing::debug!(guild_id, name = %payload.name, "fetched guild");
            return Ok(payload.into_snapshot(&self.cdn_base_url));
        }

        let error: Option<ErrorPayload> = resp.json().await.ok();
        let code = error.as_ref().and_then(|e| e.code);
        if status == StatusCode::NOT_FOUND || matches!(code, Some(UNKNOWN_GUILD | MISSING_ACCESS)) {
            return Err(DiscordError::GuildNotFound);
        }

        let message = error
            .and_then(|e| e.message)
            .unwrap_or_else(|| "no message".to_string());
        Err(DiscordError::Api(format!(
            "GET {} returned {}: {}",
            url, status, message
        )))
    }

    /// GET with exponential backoff on transport failures and 5xx responses.
    /// Any other response is handed back for the caller to interpret.
    async fn get_with_retry(&self, url: &str) -> Result<reqwest::Response, DiscordError> {
        let mut last_err = DiscordError::Http("no attempts made".to_string());
        for attempt in 0..MAX_RETRIES {
            let request = self
                .http
                .get(url)
                .header(header::AUTHORIZATION, format!("Bot {}", self.token));

            match request.send().await {
                Ok(resp) if resp.status().is_server_error() => {
                    last_err = DiscordError::Api(format!(
                        "server error {} from {}",
                        resp.status(),
                        url
                    ));
                }
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    last_err = DiscordError::Http(e.to_string());
                }
            }
            if attempt + 1 < MAX_RETRIES {
                let delay = RETRY_BASE_DELAY * 2u32.pow(attempt);
                tracing::warn!(url, attempt, "discord request failed, retrying in {:?}", delay);
                tokio::time::sleep(delay).await;
            }
        }
        Err(last_err)
    }
}
