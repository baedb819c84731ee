use anyhow::{bail, Result};
use guildcard_core::{AppConfig, DEFAULT_FALLBACK_BANNER_URL, DEFAULT_FALLBACK_ICON_URL};
use guildcard_discord::{DiscordConfig, ImageConfig, DEFAULT_API_BASE_URL, DEFAULT_CDN_BASE_URL};
use serde::{Deserialize, Serialize};
use std::fs;
use std::time::Duration;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub discord: DiscordSection,
    #[serde(default)]
    pub images: ImagesConfig,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct DiscordSection {
    /// Bot token. The bot must be a member of every guild it renders.
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_cdn_base_url")]
    pub cdn_base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for DiscordSection {
    fn default() -> Self {
        Self {
            token: String::new(),
            api_base_url: default_api_base_url(),
            cdn_base_url: default_cdn_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ImagesConfig {
    #[serde(default = "default_fallback_icon_url")]
    pub fallback_icon_url: String,
    #[serde(default = "default_fallback_banner_url")]
    pub fallback_banner_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// 0 disables the image cache.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    #[serde(default = "default_cache_max_entries")]
    pub cache_max_entries: u64,
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: usize,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            fallback_icon_url: default_fallback_icon_url(),
            fallback_banner_url: default_fallback_banner_url(),
            request_timeout_secs: default_request_timeout_secs(),
            cache_ttl_secs: default_cache_ttl_secs(),
            cache_max_entries: default_cache_max_entries(),
            max_image_bytes: default_max_image_bytes(),
        }
    }
}

fn default_bind_address() -> String {
    "0.0.0.0:3333".into()
}
fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.into()
}
fn default_cdn_base_url() -> String {
    DEFAULT_CDN_BASE_URL.into()
}
fn default_request_timeout_secs() -> u64 {
    10
}
fn default_fallback_icon_url() -> String {
    DEFAULT_FALLBACK_ICON_URL.into()
}
fn default_fallback_banner_url() -> String {
    DEFAULT_FALLBACK_BANNER_URL.into()
}
fn default_cache_ttl_secs() -> u64 {
    300
}
fn default_cache_max_entries() -> u64 {
    512
}
fn default_max_image_bytes() -> usize {
    8 * 1024 * 1024
}

fn generate_config_template(config: &Config) -> String {
    format!(
        r#"# guildcard configuration
# Generated automatically on first run. Edit as needed.

[server]
bind_address = "{bind_address}"

[discord]
# Bot token (or set GUILDCARD_DISCORD_TOKEN / TOKEN).
token = ""
api_base_url = "{api_base_url}"
cdn_base_url = "{cdn_base_url}"
request_timeout_secs = {discord_timeout}

[images]
# Shown when a guild has no icon or banner of its own.
fallback_icon_url = "{fallback_icon_url}"
fallback_banner_url = "{fallback_banner_url}"
request_timeout_secs = {images_timeout}
# Fetched images are cached this long; 0 disables caching.
cache_ttl_secs = {cache_ttl_secs}
cache_max_entries = {cache_max_entries}
max_image_bytes = {max_image_bytes}
"#,
        bind_address = config.server.bind_address,
        api_base_url = config.discord.api_base_url,
        cdn_base_url = config.discord.cdn_base_url,
        discord_timeout = config.discord.request_timeout_secs,
        fallback_icon_url = config.images.fallback_icon_url,
        fallback_banner_url = config.images.fallback_banner_url,
        images_timeout = config.images.request_timeout_secs,
        cache_ttl_secs = config.images.cache_ttl_secs,
        cache_max_entries = config.images.cache_max_entries,
        max_image_bytes = config.images.max_image_bytes,
    )
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let mut config = if std::path::Path::new(path).exists() {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        } else {
            tracing::info!(
                "Config file not found at '{}', generating defaults...",
                path
            );
            let config = Config::default();

            if let Some(parent) = std::path::Path::new(path).parent() {
                fs::create_dir_all(parent)?;
            }

            fs::write(path, generate_config_template(&config))?;
            tracing::info!("Generated default config at '{}'", path);
            config
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// `HOST`, `PORT` and `TOKEN` are honored for existing deployments;
    /// the `GUILDCARD_*` variables take precedence over them.
    pub fn apply_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        let host = var("HOST");
        let port = var("PORT");
        if host.is_some() || port.is_some() {
            let (current_host, current_port) = match self.server.bind_address.rsplit_once(':') {
                Some((h, p)) => (h.to_string(), p.to_string()),
                None => (self.server.bind_address.clone(), "3333".to_string()),
            };
            let port = match port {
                Some(value) => match value.parse::<u16>() {
                    Ok(parsed) => parsed.to_string(),
                    Err(_) => {
                        tracing::warn!("Ignoring invalid PORT value '{}'", value);
                        current_port
                    }
                },
                None => current_port,
            };
            self.server.bind_address = format!("{}:{}", host.unwrap_or(current_host), port);
        }
        if let Some(value) = var("TOKEN") {
            self.discord.token = value;
        }

        if let Some(value) = var("GUILDCARD_BIND_ADDRESS") {
            self.server.bind_address = value;
        }
        if let Some(value) = var("GUILDCARD_DISCORD_TOKEN") {
            self.discord.token = value;
        }
        if let Some(value) = var("GUILDCARD_DISCORD_API_BASE_URL") {
            self.discord.api_base_url = value;
        }
        if let Some(value) = var("GUILDCARD_IMAGE_CACHE_TTL_SECS") {
            match value.parse() {
                Ok(parsed) => self.images.cache_ttl_secs = parsed,
                Err(_) => tracing::warn!(
                    "Ignoring invalid GUILDCARD_IMAGE_CACHE_TTL_SECS value '{}'",
                    value
                ),
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.discord.token.trim().is_empty() {
            bail!("no Discord bot token configured; set [discord].token or GUILDCARD_DISCORD_TOKEN");
        }
        Ok(())
    }

    pub fn discord_config(&self) -> DiscordConfig {
        DiscordConfig {
            token: self.discord.token.trim().to_string(),
            api_base_url: self.discord.api_base_url.clone(),
            cdn_base_url: self.discord.cdn_base_url.clone(),
            request_timeout: Duration::from_secs(self.discord.request_timeout_secs),
        }
    }

    pub fn image_config(&self) -> ImageConfig {
        ImageConfig {
            request_timeout: Duration::from_secs(self.images.request_timeout_secs),
            cache_ttl: Duration::from_secs(self.images.cache_ttl_secs),
            cache_max_entries: self.images.cache_max_entries,
            max_image_bytes: self.images.max_image_bytes,
        }
    }

    pub fn app_config(&self) -> AppConfig {
        AppConfig {
            fallback_icon_url: self.images.fallback_icon_url.clone(),
            fallback_banner_url: self.images.fallback_banner_url.clone(),
        }
    }
}
