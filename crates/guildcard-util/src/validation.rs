use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("{field} must be a 6-digit hex color without '#', got '{got}'")]
    InvalidColor { field: &'static str, got: String },
    #[error("{field} must be between {min} and {max}, got {got}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        got: f64,
    },
    #[error("{field} is too long (max {max} characters, got {got})")]
    TooLong {
        field: &'static str,
        max: usize,
        got: usize,
    },
    #[error("invalid guild id '{0}'")]
    InvalidGuildId(String),
}

pub fn validate_hex_color(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.len() == 6 && value.chars().all(|c| c.is_ascii_hexdigit()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidColor {
            field,
            got: value.to_string(),
        })
    }
}

/// Radii are plain numbers in the query string; fractions are allowed.
pub fn validate_radius(field: &'static str, value: f64, max: f64) -> Result<(), ValidationError> {
    if value.is_finite() && (0.0..=max).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            field,
            min: 0.0,
            max,
            got: value,
        })
    }
}

pub fn validate_max_len(field: &'static str, value: usize, max: usize) -> Result<(), ValidationError> {
    if (1..=max).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            field,
            min: 1.0,
            max: max as f64,
            got: value as f64,
        })
    }
}

pub fn validate_text_len(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len > max {
        return Err(ValidationError::TooLong { field, max, got: len });
    }
    Ok(())
}

/// Guild ids are snowflakes: unsigned 64-bit integers rendered in decimal.
pub fn validate_guild_id(id: &str) -> Result<(), ValidationError> {
    let well_formed = !id.is_empty()
        && id.len() <= 20
        && id.chars().all(|c| c.is_ascii_digit())
        && id.parse::<u64>().is_ok();
    if well_formed {
        Ok(())
    } else {
        Err(ValidationError::InvalidGuildId(id.to_string()))
    }
}
