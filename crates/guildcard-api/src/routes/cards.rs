use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use guildcard_core::card::{create_card, CreateCardRequest};
use guildcard_core::AppState;
use guildcard_models::{CardShape, CardStyle, HexColor};
use guildcard_util::validation::{
    validate_guild_id, validate_max_len, validate_radius, validate_text_len, ValidationError,
};
use serde::Deserialize;

use crate::error::ApiError;

const MAX_ICON_BORDER_RADIUS: f64 = 25.0;
const MAX_BORDER_RADIUS: f64 = 30.0;
const MAX_BUTTON_BORDER_RADIUS: f64 = 15.0;
const MAX_TEXT_LIMIT: usize = 100;
const MAX_ELLIPSIS_LEN: usize = 10;
const MAX_BUTTON_TEXT_LEN: usize = 200;

/// Style overrides accepted by both card routes. Colors are hex without `#`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardQuery {
    #[serde(default)]
    pub mode: CardShape,

    pub text_color: Option<String>,
    pub stats_text_color: Option<String>,
    pub background_color: Option<String>,
    pub icon_border_color: Option<String>,
    pub icon_border_radius: Option<f64>,
    pub border_radius: Option<f64>,
    pub max_text_len: Option<usize>,
    pub text_ellipses: Option<String>,

    pub button_color: Option<String>,
    #[serde(alias = "buttonMessage")]
    pub button_text: Option<String>,
    pub button_text_color: Option<String>,
    pub button_border_radius: Option<f64>,
    pub max_button_text_len: Option<usize>,
    pub button_text_ellipses: Option<String>,
}

fn color(field: &'static str, value: Option<String>) -> Result<Option<HexColor>, ValidationError> {
    value.map(|v| HexColor::parse(field, &v)).transpose()
}

fn radius(field: &'static str, value: Option<f64>, max: f64) -> Result<Option<f64>, ValidationError> {
    if let Some(v) = value {
        validate_radius(field, v, max)?;
    }
    Ok(value)
}

fn limit(field: &'static str, value: Option<usize>) -> Result<Option<usize>, ValidationError> {
    if let Some(v) = value {
        validate_max_len(field, v, MAX_TEXT_LIMIT)?;
    }
    Ok(value)
}

fn text(field: &'static str, value: Option<String>, max: usize) -> Result<Option<String>, ValidationError> {
    if let Some(v) = &value {
        validate_text_len(field, v, max)?;
    }
    Ok(value)
}

impl CardQuery {
    pub fn into_style(self) -> Result<CardStyle, ValidationError> {
        Ok(CardStyle {
            text_color: color("textColor", self.text_color)?,
            stats_text_color: color("statsTextColor", self.stats_text_color)?,
            background_color: color("backgroundColor", self.background_color)?,
            icon_border_color: color("iconBorderColor", self.icon_border_color)?,
            icon_border_radius: radius(
                "iconBorderRadius",
                self.icon_border_radius,
                MAX_ICON_BORDER_RADIUS,
            )?,
            border_radius: radius("borderRadius", self.border_radius, MAX_BORDER_RADIUS)?,
            max_text_len: limit("maxTextLen", self.max_text_len)?,
            text_ellipsis: text("textEllipses", self.text_ellipses, MAX_ELLIPSIS_LEN)?,

            button_color: color("buttonColor", self.button_color)?,
            button_text: text("buttonText", self.button_text, MAX_BUTTON_TEXT_LEN)?,
            button_text_color: color("buttonTextColor", self.button_text_color)?,
            button_border_radius: radius(
                "buttonBorderRadius",
                self.button_border_radius,
                MAX_BUTTON_BORDER_RADIUS,
            )?,
            max_button_text_len: limit("maxButtonTextLen", self.max_button_text_len)?,
            button_text_ellipsis: text(
                "buttonTextEllipses",
                self.button_text_ellipses,
                MAX_ELLIPSIS_LEN,
            )?,
        })
    }
}

/// `GET /api/{guild_id}`: shape chosen by `?mode=`.
pub async fn get_card(
    State(state): State<AppState>,
    Path(guild_id): Path<String>,
    query: Result<Query<CardQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query?;
    let shape = query.mode;
    render(&state, &guild_id, shape, query).await
}

/// `GET /api/compact/{guild_id}`: always compact; `mode` is ignored.
pub async fn get_compact_card(
    State(state): State<AppState>,
    Path(guild_id): Path<String>,
    query: Result<Query<CardQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query?;
    render(&state, &guild_id, CardShape::Compact, query).await
}

async fn render(
    state: &AppState,
    guild_id: &str,
    shape: CardShape,
    query: CardQuery,
) -> Result<Response, ApiError> {
    validate_guild_id(guild_id)?;
    let style = query.into_style()?;

    let card = create_card(
        state,
        CreateCardRequest {
            guild_id,
            shape,
            style,
        },
    )
    .await?;

    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], card.into_string()).into_response())
}
