//! SVG building blocks shared by both card shapes.
//!
//! Every function here returns a [`Fragment`] holding finished markup. Text
//! arguments must already be escaped; colors come in as validated
//! [`HexColor`]s and numbers are formatted here.

use std::fmt;

use guildcard_models::color::{self as palette, HexColor};
use guildcard_util::text::escape_xml;

const FONT_IMPORT: &str = r#"<defs>
    <style>
      @import url('https://fonts.googleapis.com/css2?family=Roboto:wght@400;600;700&amp;display=swap');
      text {
        font-family: roboto, -apple-system, system-ui, "Segoe UI", sans-serif;
      }
    </style>
  </defs>"#;

/// Ring corner radius relative to the icon clip radius.
pub const ICON_RING_RATIO: f64 = 1.08;

const ICON_SIZE: u32 = 50;
const RING_SIZE: u32 = 54;

/// A finished piece of SVG markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment(String);

impl Fragment {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Top-left corner of the 50x50 icon. The ring sits 2px outside it.
#[derive(Debug, Clone, Copy)]
pub struct IconFrame {
    pub x: u32,
    pub y: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct StatsRow {
    /// Baseline of both stat labels.
    pub text_y: u32,
    /// X of the online label; its dot sits 7px to the left.
    pub online_x: u32,
    /// X of the members label, computed from the online label width.
    pub members_x: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct ButtonFrame {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub text_x: u32,
    pub text_y: u32,
}

pub fn font_import() -> Fragment {
    Fragment(FONT_IMPORT.to_string())
}

pub fn ring_radius(icon_radius: f64) -> f64 {
    (icon_radius * ICON_RING_RATIO).round()
}

pub fn icon_clip(frame: IconFrame, radius: f64) -> Fragment {
    Fragment(format!(
        r#"<clipPath id="iconClip">
      <rect width="{size}" height="{size}" x="{x}" y="{y}" rx="{radius}" ry="{radius}" />
    </clipPath>"#,
        size = ICON_SIZE,
        x = frame.x,
        y = frame.y,
        radius = radius,
    ))
}

/// Rounds the top corners only: the second rect squares off the bottom half.
pub fn banner_clip(height: u32, border_radius: f64) -> Fragment {
    Fragment(format!(
        r#"<clipPath id="bannerClip">
      <rect width="100%" height="{height}" x="0" y="0" rx="{radius}" ry="{radius}" />
      <rect width="100%" height="{half}" x="0" y="{half}" />
    </clipPath>"#,
        height = height,
        half = height / 2,
        radius = border_radius,
    ))
}

pub fn defs(children: &[Fragment]) -> Fragment {
    let mut out = String::from("<defs>\n    ");
    for child in children {
        out.push_str(child.as_str());
        out.push_str("\n    ");
    }
    out.push_str("</defs>");
    Fragment(out)
}

pub fn background(border_radius: f64) -> Fragment {
    Fragment(format!(
        r#"<rect width="100%" height="100%" rx="{r}" ry="{r}" />"#,
        r = border_radius
    ))
}

pub fn banner(height: u32, href: &str) -> Fragment {
    Fragment(format!(
        r#"<image width="100%" height="{height}" x="0" y="0" clip-path="url(#bannerClip)" preserveAspectRatio="xMidYMid slice" href="{href}" />"#,
        href = escape_xml(href),
    ))
}

/// The colored ring plus, when a source is present, the clipped icon.
pub fn icon(frame: IconFrame, ring_color: &HexColor, radius: f64, href: Option<&str>) -> Fragment {
    let ring_r = ring_radius(radius);
    let mut out = format!(
        r#"<rect width="{size}" height="{size}" x="{x}" y="{y}" rx="{r}" ry="{r}" fill="{color}" />"#,
        size = RING_SIZE,
        x = frame.x - 2,
        y = frame.y - 2,
        r = ring_r,
        color = ring_color,
    );
    if let Some(href) = href {
        out.push_str(&format!(
            r#"
  <image width="{size}" height="{size}" x="{x}" y="{y}" clip-path="url(#iconClip)" href="{href}" />"#,
            size = ICON_SIZE,
            x = frame.x,
            y = frame.y,
            href = escape_xml(href),
        ));
    }
    Fragment(out)
}

pub fn title(x: u32, y: u32, color: &HexColor, text: &str) -> Fragment {
    Fragment(format!(
        r#"<text x="{x}" y="{y}" font-weight="bold" font-size="20" fill="{color}" letter-spacing="-0.5">{text}</text>"#
    ))
}

pub fn stats(row: StatsRow, color: &HexColor, online_text: &str, members_text: &str) -> Fragment {
    let dot_y = row.text_y - 5;
    Fragment(format!(
        r#"<g fill="{color}">
    <circle cx="{online_dot_x}" cy="{dot_y}" r="4" fill="{online_green}" />
    <text x="{online_x}" y="{text_y}" letter-spacing="-0.5">{online_text}</text>

    <circle cx="{members_dot_x}" cy="{dot_y}" r="4" fill="{members_dot}" />
    <text x="{members_x}" y="{text_y}" letter-spacing="-0.5">{members_text}</text>
  </g>"#,
        online_dot_x = row.online_x - 7,
        online_green = palette::ONLINE_GREEN,
        online_x = row.online_x,
        text_y = row.text_y,
        members_dot_x = row.members_x - 7,
        members_dot = palette::STATS_GRAY,
        members_x = row.members_x,
    ))
}

pub fn button(
    frame: ButtonFrame,
    color: &HexColor,
    radius: f64,
    text_color: &HexColor,
    text: &str,
) -> Fragment {
    Fragment(format!(
        r#"<g>
    <rect width="{width}" height="{height}" x="{x}" y="{y}" rx="{radius}" ry="{radius}" fill="{color}" />
    <text x="{text_x}" y="{text_y}" text-anchor="middle" dominant-baseline="middle" font-weight="600" font-size="14" letter-spacing="-0.5" word-spacing="1.2" fill="{text_color}">{text}</text>
  </g>"#,
        width = frame.width,
        height = frame.height,
        x = frame.x,
        y = frame.y,
        text_x = frame.text_x,
        text_y = frame.text_y,
    ))
}

/// Wrap the fragments in the root `<svg>` element.
pub fn document(width: u32, height: u32, background: &HexColor, children: &[Fragment]) -> String {
    let mut out = format!(
        r#"<svg width="{width}" height="{height}" fill="{background}" xmlns="http://www.w3.org/2000/svg">"#
    );
    for child in children {
        out.push_str("\n  ");
        out.push_str(child.as_str());
    }
    out.push_str("\n</svg>");
    out
}
