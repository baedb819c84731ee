use std::borrow::Cow;
use std::fmt;

use guildcard_util::validation::{validate_hex_color, ValidationError};
use serde::Serialize;

pub static WHITE: HexColor = HexColor::from_static("FFFFFF");
pub static STATS_GRAY: HexColor = HexColor::from_static("BCC0C0");
pub static BACKGROUND: HexColor = HexColor::from_static("141414");
pub static JOIN_GREEN: HexColor = HexColor::from_static("00863A");
pub static ONLINE_GREEN: HexColor = HexColor::from_static("43A25A");

/// A six-digit hex color, stored without the leading `#`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HexColor(Cow<'static, str>);

impl HexColor {
    /// Only for literals known to be valid.
    pub const fn from_static(hex: &'static str) -> Self {
        Self(Cow::Borrowed(hex))
    }

    pub fn parse(field: &'static str, value: &str) -> Result<Self, ValidationError> {
        validate_hex_color(field, value)?;
        Ok(Self(Cow::Owned(value.to_string())))
    }

    pub fn as_hex(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
