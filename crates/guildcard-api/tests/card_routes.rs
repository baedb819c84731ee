use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::Path,
    http::{header, HeaderMap, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use guildcard_core::{AppConfig, AppState};
use guildcard_discord::{DiscordClient, DiscordConfig, ImageConfig, ImageFetcher};
use serde_json::{json, Value};
use tower::ServiceExt;

const TOKEN: &str = "test-token";
const PNG: &[u8] = b"\x89PNG\r\n\x1a\n";
const JPEG: &[u8] = b"\xff\xd8\xff\xe0";

/// Stands in for both the Discord REST API and the image CDN.
fn upstream_router() -> Router {
    Router::new()
        .route("/api/guilds/{guild_id}", get(fake_guild))
        .route("/cdn/icons/{guild_id}/{file}", get(fake_cdn_image))
        .route("/cdn/banners/{guild_id}/{file}", get(fake_cdn_image))
        .route(
            "/fallback/icon.png",
            get(|| async { ([(header::CONTENT_TYPE, "image/png")], PNG) }),
        )
        .route(
            "/fallback/banner.jpg",
            get(|| async { ([(header::CONTENT_TYPE, "image/jpeg")], JPEG) }),
        )
}

fn guild_json(id: &str, name: &str, icon: Option<&str>, banner: Option<&str>) -> Value {
    json!({
        "id": id,
        "name": name,
        "icon": icon,
        "banner": banner,
        "approximate_member_count": 1200,
        "approximate_presence_count": 5,
    })
}

async fn fake_guild(Path(guild_id): Path<String>, headers: HeaderMap) -> Response {
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some("Bot test-token");
    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "401: Unauthorized", "code": 0 })),
        )
            .into_response();
    }

    match guild_id.as_str() {
        "1001" => Json(guild_json("1001", "Test Guild", Some("abc"), Some("def"))).into_response(),
        "1002" => Json(guild_json("1002", "Plain Guild", None, None)).into_response(),
        "1003" => Json(guild_json("1003", "Broken Icon", Some("broken"), None)).into_response(),
        "1004" => StatusCode::BAD_GATEWAY.into_response(),
        "1005" => {
            Json(guild_json("1005", "<Rust & 'Friends'>", Some("abc"), None)).into_response()
        }
        "1006" => (
            StatusCode::FORBIDDEN,
            Json(json!({ "message": "Missing Access", "code": 50001 })),
        )
            .into_response(),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Unknown Guild", "code": 10004 })),
        )
            .into_response(),
    }
}

async fn fake_cdn_image(Path((_guild_id, file)): Path<(String, String)>) -> Response {
    if file.starts_with("broken") {
        return StatusCode::NOT_FOUND.into_response();
    }
    ([(header::CONTENT_TYPE, "image/png")], PNG).into_response()
}

struct TestHarness {
    app: Router,
}

impl TestHarness {
    async fn new() -> anyhow::Result<Self> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let base = format!("http://{}", listener.local_addr()?);
        tokio::spawn(async move {
            let _ = axum::serve(listener, upstream_router()).await;
        });

        let discord = DiscordClient::new(DiscordConfig {
            token: TOKEN.to_string(),
            api_base_url: format!("{base}/api"),
            cdn_base_url: format!("{base}/cdn"),
            request_timeout: Duration::from_secs(5),
        })?;
        let images = ImageFetcher::new(&ImageConfig {
            request_timeout: Duration::from_secs(5),
            cache_ttl: Duration::from_secs(60),
            cache_max_entries: 64,
            max_image_bytes: 1024 * 1024,
        })?;

        let state = AppState {
            config: Arc::new(AppConfig {
                fallback_icon_url: format!("{base}/fallback/icon.png"),
                fallback_banner_url: format!("{base}/fallback/banner.jpg"),
            }),
            discord,
            images,
        };

        Ok(Self {
            app: guildcard_api::build_router().with_state(state),
        })
    }

    async fn get(&self, uri: &str) -> anyhow::Result<(StatusCode, HeaderMap, String)> {
        let request = Request::builder().uri(uri).body(Body::empty())?;
        let response = self.app.clone().oneshot(request).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        Ok((status, headers, String::from_utf8(body.to_vec())?))
    }
}

fn assert_svg(headers: &HeaderMap, body: &str) {
    assert_eq!(
        headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()),
        Some("image/svg+xml")
    );
    if let Err(err) = roxmltree::Document::parse(body) {
        panic!("response is not well-formed SVG: {err}\n{body}");
    }
}

fn message(body: &str) -> anyhow::Result<String> {
    let value: Value = serde_json::from_str(body)?;
    Ok(value["message"].as_str().unwrap_or_default().to_string())
}

#[tokio::test]
async fn compact_route_renders_live_counts() -> anyhow::Result<()> {
    let harness = TestHarness::new().await?;

    let (status, headers, body) = harness.get("/api/compact/1001").await?;
    assert_eq!(status, StatusCode::OK);
    assert_svg(&headers, &body);
    assert!(body.contains(r#"width="388""#));
    assert!(body.contains(">5 online<"));
    assert!(body.contains(">1,200 members<"));
    assert!(body.contains(">Test Guild<"));
    assert!(body.contains("data:image/png;base64,iVBORw0KGgo="));

    Ok(())
}

#[tokio::test]
async fn default_mode_includes_the_banner() -> anyhow::Result<()> {
    let harness = TestHarness::new().await?;

    let (status, headers, body) = harness.get("/api/1001").await?;
    assert_eq!(status, StatusCode::OK);
    assert_svg(&headers, &body);
    assert!(body.contains(r#"width="342" height="194""#));
    assert!(body.contains(r#"clip-path="url(#bannerClip)""#));

    Ok(())
}

#[tokio::test]
async fn mode_query_selects_compact() -> anyhow::Result<()> {
    let harness = TestHarness::new().await?;

    let (status, _, body) = harness.get("/api/1001?mode=compact").await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"width="388" height="121""#));
    assert!(!body.contains("bannerClip"));

    Ok(())
}

#[tokio::test]
async fn missing_guild_images_use_fallbacks() -> anyhow::Result<()> {
    let harness = TestHarness::new().await?;

    let (status, _, body) = harness.get("/1002").await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("data:image/jpeg;base64,"));
    assert!(body.contains("data:image/png;base64,"));

    Ok(())
}

#[tokio::test]
async fn style_overrides_reach_the_card() -> anyhow::Result<()> {
    let harness = TestHarness::new().await?;

    let (status, _, body) = harness
        .get("/compact/1001?buttonMessage=Hop%20in&buttonColor=5865F2&backgroundColor=000000")
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(">Hop in<"));
    assert!(body.contains(r##"fill="#5865F2""##));
    assert!(body.contains(r##"fill="#000000""##));

    Ok(())
}

#[tokio::test]
async fn guild_names_are_escaped() -> anyhow::Result<()> {
    let harness = TestHarness::new().await?;

    let (status, headers, body) = harness.get("/api/compact/1005").await?;
    assert_eq!(status, StatusCode::OK);
    assert_svg(&headers, &body);
    assert!(body.contains("&lt;Rust &amp; &apos;Friends&apos;&gt;"));

    Ok(())
}

#[tokio::test]
async fn unknown_guild_is_a_bad_request() -> anyhow::Result<()> {
    let harness = TestHarness::new().await?;

    let (status, _, body) = harness.get("/api/9999").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message(&body)?, "Guild not found");

    let (status, _, body) = harness.get("/api/1006").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message(&body)?, "Guild not found");

    Ok(())
}

#[tokio::test]
async fn failed_image_fetch_is_a_bad_request() -> anyhow::Result<()> {
    let harness = TestHarness::new().await?;

    let (status, _, body) = harness.get("/api/compact/1003").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message(&body)?, "Failed to fetch or process guild image");

    Ok(())
}

#[tokio::test]
async fn invalid_query_values_are_rejected() -> anyhow::Result<()> {
    let harness = TestHarness::new().await?;

    let (status, _, body) = harness.get("/api/1001?textColor=red").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(message(&body)?.contains("textColor"));

    let (status, _, body) = harness.get("/api/1001?borderRadius=99").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(message(&body)?.contains("borderRadius"));

    let (status, _, body) = harness.get("/api/1001?mode=huge").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!message(&body)?.is_empty());

    let (status, _, _) = harness.get("/api/not-a-snowflake").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn upstream_outage_is_an_opaque_server_error() -> anyhow::Result<()> {
    let harness = TestHarness::new().await?;

    let (status, _, body) = harness.get("/api/1004").await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.is_empty());

    Ok(())
}

#[tokio::test]
async fn health_reports_ok() -> anyhow::Result<()> {
    let harness = TestHarness::new().await?;

    let (status, _, body) = harness.get("/health").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_str::<Value>(&body)?["status"], "ok");

    Ok(())
}
