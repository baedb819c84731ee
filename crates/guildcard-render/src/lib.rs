//! Pure SVG card rendering.
//!
//! Rendering does no I/O: images arrive as data URIs and every input value
//! is escaped or validated before it reaches the markup. Identical input
//! always produces byte-identical output.

pub mod cards;
pub mod fragments;

use guildcard_models::{CardInput, CardShape};

pub use cards::{make_compact_card, make_default_card};

/// A finished SVG document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCard {
    pub card: String,
}

impl RenderedCard {
    pub fn into_string(self) -> String {
        self.card
    }
}

pub fn render(shape: CardShape, input: &CardInput) -> RenderedCard {
    match shape {
        CardShape::Default => make_default_card(input),
        CardShape::Compact => make_compact_card(input),
    }
}
