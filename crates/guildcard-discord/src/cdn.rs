//! Discord CDN URL construction.

fn extension(hash: &str) -> &'static str {
    // Animated assets carry an `a_` prefix and only exist as gif/webp.
    if hash.starts_with("a_") {
        "gif"
    } else {
        "png"
    }
}

pub fn guild_icon_url(cdn_base: &str, guild_id: &str, hash: &str) -> String {
    format!(
        "{}/icons/{}/{}.{}",
        cdn_base.trim_end_matches('/'),
        guild_id,
        hash,
        extension(hash)
    )
}

pub fn guild_banner_url(cdn_base: &str, guild_id: &str, hash: &str) -> String {
    format!(
        "{}/banners/{}/{}.{}",
        cdn_base.trim_end_matches('/'),
        guild_id,
        hash,
        extension(hash)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_icons_are_png() {
        assert_eq!(
            guild_icon_url("https://cdn.discordapp.com/", "42", "abc123"),
            "https://cdn.discordapp.com/icons/42/abc123.png"
        );
    }

    #[test]
    fn animated_assets_are_gif() {
        assert_eq!(
            guild_banner_url("https://cdn.discordapp.com", "42", "a_ff00"),
            "https://cdn.discordapp.com/banners/42/a_ff00.gif"
        );
    }
}
