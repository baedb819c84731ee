use base64::{engine::general_purpose::STANDARD, Engine as _};
use moka::future::Cache;
use reqwest::{header, Client, StatusCode};

use crate::{DiscordError, ImageConfig};

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Downloads images and inlines them as `data:` URIs so the SVG renders
/// without further requests from the viewer.
#[derive(Debug, Clone)]
pub struct ImageFetcher {
    http: Client,
    cache: Option<Cache<String, String>>,
    max_image_bytes: usize,
}

pub fn encode_data_uri(content_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", content_type, STANDARD.encode(bytes))
}

impl ImageFetcher {
    pub fn new(config: &ImageConfig) -> Result<Self, DiscordError> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| DiscordError::Http(e.to_string()))?;

        let cache = (!config.cache_ttl.is_zero()).then(|| {
            Cache::builder()
                .max_capacity(config.cache_max_entries)
                .time_to_live(config.cache_ttl)
                .build()
        });

        Ok(Self {
            http,
            cache,
            max_image_bytes: config.max_image_bytes,
        })
    }

    /// Fetch `url` and return it as a base64 data URI. Anything but a 200
    /// with a body under the size limit is an [`DiscordError::ImageFetch`].
    pub async fn fetch_data_uri(&self, url: &str) -> Result<String, DiscordError> {
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(url).await {
                return Ok(hit);
            }
        }

        let data_uri = self.download(url).await.map_err(|reason| {
            tracing::warn!(url, %reason, "image fetch failed");
            DiscordError::ImageFetch {
                url: url.to_string(),
                reason,
            }
        })?;

        if let Some(cache) = &self.cache {
            cache.insert(url.to_string(), data_uri.clone()).await;
        }
        Ok(data_uri)
    }

    async fn download(&self, url: &str) -> Result<String, String> {
        let resp = self.http.get(url).send().await.map_err(|e| e.to_string())?;
        if resp.status() != StatusCode::OK {
            return Err(format!("status {}", resp.status()));
        }

        let content_type = resp
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(FALLBACK_CONTENT_TYPE)
            .to_string();
        if let Some(len) = resp.content_length() {
            if len as usize > self.max_image_bytes {
                return Err(format!("image is {len} bytes, limit is {}", self.max_image_bytes));
            }
        }

        let bytes = resp.bytes().await.map_err(|e| e.to_string())?;
        if bytes.len() > self.max_image_bytes {
            return Err(format!(
                "image is {} bytes, limit is {}",
                bytes.len(),
                self.max_image_bytes
            ));
        }
        Ok(encode_data_uri(&content_type, &bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn data_uri_carries_content_type() {
        assert_eq!(
            encode_data_uri("image/png", b"\x89PNG"),
            "data:image/png;base64,iVBORw=="
        );
    }

    #[test]
    fn zero_ttl_disables_cache() {
        let fetcher = ImageFetcher::new(&ImageConfig {
            request_timeout: Duration::from_secs(1),
            cache_ttl: Duration::ZERO,
            cache_max_entries: 16,
            max_image_bytes: 1024,
        })
        .unwrap();
        assert!(fetcher.cache.is_none());
    }
}
