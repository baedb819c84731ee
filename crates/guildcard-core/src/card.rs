use guildcard_models::{CardInput, CardShape, CardStyle, GuildSnapshot};
use guildcard_render::RenderedCard;

use crate::error::CoreError;
use crate::{AppConfig, AppState};

#[derive(Debug, Clone)]
pub struct CreateCardRequest<'a> {
    pub guild_id: &'a str,
    pub shape: CardShape,
    pub style: CardStyle,
}

/// Image URLs to inline for `guild`, substituting the configured fallbacks.
/// The compact shape has no banner.
pub fn image_sources<'a>(
    config: &'a AppConfig,
    guild: &'a GuildSnapshot,
    shape: CardShape,
) -> (&'a str, Option<&'a str>) {
    let icon = guild
        .icon_url
        .as_deref()
        .unwrap_or(&config.fallback_icon_url);
    let banner = match shape {
        CardShape::Compact => None,
        CardShape::Default => Some(
            guild
                .banner_url
                .as_deref()
                .unwrap_or(&config.fallback_banner_url),
        ),
    };
    (icon, banner)
}

pub fn card_input(
    guild: GuildSnapshot,
    icon: String,
    banner: Option<String>,
    style: CardStyle,
) -> CardInput {
    CardInput {
        guild_name: guild.name,
        icon: Some(icon),
        banner,
        online_members_count: guild.online_member_count,
        members_count: guild.member_count,
        style,
    }
}

/// Look up the guild, inline its images and render the requested shape.
pub async fn create_card(
    state: &AppState,
    request: CreateCardRequest<'_>,
) -> Result<RenderedCard, CoreError> {
    let guild = state.discord.fetch_guild(request.guild_id).await?;

    let (icon_url, banner_url) = image_sources(&state.config, &guild, request.shape);
    let (icon, banner) = match banner_url {
        Some(banner_url) => {
            let (icon, banner) = tokio::try_join!(
                state.images.fetch_data_uri(icon_url),
                state.images.fetch_data_uri(banner_url),
            )?;
            (icon, Some(banner))
        }
        None => (state.images.fetch_data_uri(icon_url).await?, None),
    };

    tracing::debug!(
        guild_id = request.guild_id,
        shape = request.shape.as_str(),
        "rendering card"
    );
    let input = card_input(guild, icon, banner, request.style);
    Ok(guildcard_render::render(request.shape, &input))
}
