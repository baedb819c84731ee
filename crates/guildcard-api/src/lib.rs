use axum::{
    http::{Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use guildcard_core::AppState;
use serde_json::json;

pub mod error;
pub mod routes;

pub fn build_router() -> Router<AppState> {
    let cors = build_cors_layer();
    Router::new()
        // Health
        .route("/health", get(health))
        // Cards
        .route("/api/{guild_id}", get(routes::cards::get_card))
        .route(
            "/api/compact/{guild_id}",
            get(routes::cards::get_compact_card),
        )
        // Unprefixed aliases used by older embeds
        .route("/{guild_id}", get(routes::cards::get_card))
        .route("/compact/{guild_id}", get(routes::cards::get_compact_card))
        // Middleware layers
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

fn build_cors_layer() -> tower_http::cors::CorsLayer {
    // Cards are embedded on arbitrary sites.
    tower_http::cors::CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers(tower_http::cors::Any)
}

async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "service": "guildcard" })),
    )
}
