use guildcard_models::{CardInput, CardShape};
use guildcard_util::text::{estimate_text_width, group_thousands, truncate_with_ellipsis};

use crate::fragments::{self, ButtonFrame, IconFrame, StatsRow};
use crate::RenderedCard;

pub const COMPACT_WIDTH: u32 = 388;
pub const COMPACT_HEIGHT: u32 = 121;
pub const DEFAULT_WIDTH: u32 = 342;
pub const DEFAULT_HEIGHT: u32 = 194;

const PADDING: u32 = 15;
const BANNER_HEIGHT: u32 = 60;

/// Extra space between the online label and the members dot.
const COMPACT_STATS_GAP: u32 = 92;
const DEFAULT_STATS_GAP: u32 = 30;

/// Formatted and escaped text shared by both layouts.
struct CardText {
    name: String,
    button: String,
    online: String,
    members: String,
}

impl CardText {
    fn prepare(input: &CardInput, shape: CardShape) -> Self {
        let style = &input.style;
        Self {
            name: truncate_with_ellipsis(
                &input.guild_name,
                style.max_text_len(shape),
                style.text_ellipsis(),
            ),
            button: truncate_with_ellipsis(
                style.button_text(),
                style.max_button_text_len(shape),
                style.button_text_ellipsis(),
            ),
            online: format!("{} online", group_thousands(input.online_members_count)),
            members: format!("{} members", group_thousands(input.members_count)),
        }
    }

    fn members_x(&self, gap: u32) -> u32 {
        PADDING + estimate_text_width(&self.online) + gap
    }
}

pub fn make_compact_card(input: &CardInput) -> RenderedCard {
    let style = &input.style;
    let text = CardText::prepare(input, CardShape::Compact);
    let icon_frame = IconFrame { x: 17, y: 17 };

    let card = fragments::document(
        COMPACT_WIDTH,
        COMPACT_HEIGHT,
        style.background_color(),
        &[
            fragments::font_import(),
            fragments::defs(&[fragments::icon_clip(icon_frame, style.icon_border_radius())]),
            fragments::background(style.border_radius()),
            fragments::icon(
                icon_frame,
                style.icon_border_color(),
                style.icon_border_radius(),
                input.icon.as_deref(),
            ),
            fragments::title(77, 40, style.text_color(), &text.name),
            fragments::stats(
                StatsRow {
                    text_y: 59,
                    online_x: 89,
                    members_x: text.members_x(COMPACT_STATS_GAP),
                },
                style.stats_text_color(),
                &text.online,
                &text.members,
            ),
            fragments::button(
                ButtonFrame {
                    x: PADDING,
                    y: 80,
                    width: COMPACT_WIDTH - 2 * PADDING,
                    height: 30,
                    text_x: 195,
                    text_y: 96,
                },
                style.button_color(),
                style.button_border_radius(),
                style.button_text_color(),
                &text.button,
            ),
        ],
    );

    RenderedCard { card }
}

pub fn make_default_card(input: &CardInput) -> RenderedCard {
    let style = &input.style;
    let text = CardText::prepare(input, CardShape::Default);
    let icon_frame = IconFrame { x: 18, y: 35 };

    let mut children = vec![
        fragments::font_import(),
        fragments::defs(&[
            fragments::banner_clip(BANNER_HEIGHT, style.border_radius()),
            fragments::icon_clip(icon_frame, style.icon_border_radius()),
        ]),
        fragments::background(style.border_radius()),
    ];
    if let Some(banner) = input.banner.as_deref() {
        children.push(fragments::banner(BANNER_HEIGHT, banner));
    }
    children.extend([
        fragments::icon(
            icon_frame,
            style.icon_border_color(),
            style.icon_border_radius(),
            input.icon.as_deref(),
        ),
        fragments::title(PADDING, 111, style.text_color(), &text.name),
        fragments::stats(
            StatsRow {
                text_y: 131,
                online_x: 27,
                members_x: text.members_x(DEFAULT_STATS_GAP),
            },
            style.stats_text_color(),
            &text.online,
            &text.members,
        ),
        fragments::button(
            ButtonFrame {
                x: PADDING,
                y: 150,
                width: DEFAULT_WIDTH - 2 * PADDING,
                height: 30,
                text_x: 171,
                text_y: 165,
            },
            style.button_color(),
            style.button_border_radius(),
            style.button_text_color(),
            &text.button,
        ),
    ]);

    RenderedCard {
        card: fragments::document(
            DEFAULT_WIDTH,
            DEFAULT_HEIGHT,
            style.background_color(),
            &children,
        ),
    }
}
