use serde::{Deserialize, Serialize};

use crate::color::{self, HexColor};

pub const DEFAULT_ICON_BORDER_RADIUS: f64 = 10.0;
pub const DEFAULT_BORDER_RADIUS: f64 = 4.0;
pub const DEFAULT_BUTTON_BORDER_RADIUS: f64 = 6.0;
pub const DEFAULT_BUTTON_TEXT: &str = "Join";
pub const DEFAULT_ELLIPSIS: &str = "...";

/// Which of the two fixed layouts to render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardShape {
    /// 342x194 with the guild banner across the top.
    #[default]
    Default,
    /// 388x121, icon beside the name, no banner.
    Compact,
}

impl CardShape {
    pub fn default_max_text_len(self) -> usize {
        match self {
            CardShape::Default => 23,
            CardShape::Compact => 25,
        }
    }

    pub fn default_max_button_text_len(self) -> usize {
        match self {
            CardShape::Default => 40,
            CardShape::Compact => 47,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CardShape::Default => "default",
            CardShape::Compact => "compact",
        }
    }
}

/// Per-request style overrides. Every field is optional; the accessors
/// resolve the documented default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardStyle {
    pub text_color: Option<HexColor>,
    pub stats_text_color: Option<HexColor>,
    pub background_color: Option<HexColor>,
    pub icon_border_color: Option<HexColor>,
    pub icon_border_radius: Option<f64>,
    pub border_radius: Option<f64>,
    pub max_text_len: Option<usize>,
    pub text_ellipsis: Option<String>,

    pub button_color: Option<HexColor>,
    pub button_text: Option<String>,
    pub button_text_color: Option<HexColor>,
    pub button_border_radius: Option<f64>,
    pub max_button_text_len: Option<usize>,
    pub button_text_ellipsis: Option<String>,
}

impl CardStyle {
    pub fn text_color(&self) -> &HexColor {
        self.text_color.as_ref().unwrap_or(&color::WHITE)
    }

    pub fn stats_text_color(&self) -> &HexColor {
        self.stats_text_color
            .as_ref()
            .unwrap_or(&color::STATS_GRAY)
    }

    pub fn background_color(&self) -> &HexColor {
        self.background_color
            .as_ref()
            .unwrap_or(&color::BACKGROUND)
    }

    /// Falls back to the background color so the ring blends in.
    pub fn icon_border_color(&self) -> &HexColor {
        self.icon_border_color
            .as_ref()
            .unwrap_or_else(|| self.background_color())
    }

    pub fn icon_border_radius(&self) -> f64 {
        self.icon_border_radius
            .unwrap_or(DEFAULT_ICON_BORDER_RADIUS)
    }

    pub fn border_radius(&self) -> f64 {
        self.border_radius.unwrap_or(DEFAULT_BORDER_RADIUS)
    }

    pub fn max_text_len(&self, shape: CardShape) -> usize {
        self.max_text_len
            .unwrap_or_else(|| shape.default_max_text_len())
    }

    pub fn text_ellipsis(&self) -> &str {
        self.text_ellipsis.as_deref().unwrap_or(DEFAULT_ELLIPSIS)
    }

    pub fn button_color(&self) -> &HexColor {
        self.button_color.as_ref().unwrap_or(&color::JOIN_GREEN)
    }

    pub fn button_text(&self) -> &str {
        self.button_text.as_deref().unwrap_or(DEFAULT_BUTTON_TEXT)
    }

    pub fn button_text_color(&self) -> &HexColor {
        self.button_text_color.as_ref().unwrap_or(&color::WHITE)
    }

    pub fn button_border_radius(&self) -> f64 {
        self.button_border_radius
            .unwrap_or(DEFAULT_BUTTON_BORDER_RADIUS)
    }

    pub fn max_button_text_len(&self, shape: CardShape) -> usize {
        self.max_button_text_len
            .unwrap_or_else(|| shape.default_max_button_text_len())
    }

    pub fn button_text_ellipsis(&self) -> &str {
        self.button_text_ellipsis
            .as_deref()
            .unwrap_or(DEFAULT_ELLIPSIS)
    }
}

/// Everything the renderer needs for one card. Images are data URIs that
/// were fetched and encoded before rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct CardInput {
    pub guild_name: String,
    pub icon: Option<String>,
    /// Ignored by the compact shape.
    pub banner: Option<String>,
    pub online_members_count: u64,
    pub members_count: u64,
    pub style: CardStyle,
}
