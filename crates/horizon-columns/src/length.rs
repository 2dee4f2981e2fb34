//! Column lengths.
//!
//! A [`Length`] is either an absolute pixel value or a percentage of the
//! container width. Percentages are resolved against the container width of
//! the layout pass that consumes them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LengthParseError;

/// An absolute or relative column length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LengthRepr", into = "LengthRepr")]
pub enum Length {
    /// Absolute length in layout units.
    Pixels(f32),
    /// Percentage (0-100) of the container width.
    Percent(f32),
}

impl Length {
    /// The "no upper bound" sentinel used as the default maximum width.
    pub const UNBOUNDED: Length = Length::Pixels(f32::INFINITY);

    /// A zero absolute length. For a column width this means "no preferred width".
    pub const ZERO: Length = Length::Pixels(0.0);

    /// Create an absolute length.
    #[inline]
    pub const fn px(value: f32) -> Self {
        Self::Pixels(value)
    }

    /// Create a percentage length.
    #[inline]
    pub const fn percent(value: f32) -> Self {
        Self::Percent(value)
    }

    /// The raw numeric value, ignoring the unit.
    #[inline]
    pub fn value(self) -> f32 {
        match self {
            Self::Pixels(v) | Self::Percent(v) => v,
        }
    }

    /// Resolve to an absolute value against a reference (container) width.
    ///
    /// A percentage resolved against a `NaN` reference falls back to zero.
    pub fn resolve(self, reference: f32) -> f32 {
        match self {
            Self::Pixels(v) => v,
            Self::Percent(p) if reference.is_finite() => reference * p / 100.0,
            Self::Percent(_) => 0.0,
        }
    }

    /// Returns `true` for the unbounded sentinel.
    #[inline]
    pub fn is_unbounded(self) -> bool {
        matches!(self, Self::Pixels(v) if v == f32::INFINITY)
    }
}

impl Default for Length {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pixels(v) if v.is_infinite() => write!(f, "none"),
            Self::Pixels(v) => write!(f, "{v}px"),
            Self::Percent(v) => write!(f, "{v}%"),
        }
    }
}

impl FromStr for Length {
    type Err = LengthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("none") || trimmed.eq_ignore_ascii_case("auto") {
            return Ok(Self::UNBOUNDED);
        }

        let (number, percent) = if let Some(n) = trimmed.strip_suffix('%') {
            (n, true)
        } else if let Some(n) = trimmed.strip_suffix("px") {
            (n, false)
        } else {
            (trimmed, false)
        };

        let value: f32 = number
            .trim()
            .parse()
            .map_err(|_| LengthParseError::new(s))?;
        if !value.is_finite() || value < 0.0 {
            return Err(LengthParseError::new(s));
        }

        Ok(if percent {
            Self::Percent(value)
        } else {
            Self::Pixels(value)
        })
    }
}

impl From<f32> for Length {
    fn from(value: f32) -> Self {
        Self::Pixels(value)
    }
}

/// Serialized form: a bare number (pixels) or a `"120px"` / `"25%"` string.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum LengthRepr {
    Number(f32),
    Text(String),
}

impl TryFrom<LengthRepr> for Length {
    type Error = LengthParseError;

    fn try_from(repr: LengthRepr) -> Result<Self, Self::Error> {
        match repr {
            LengthRepr::Number(v) => Ok(Self::Pixels(v)),
            LengthRepr::Text(s) => s.parse(),
        }
    }
}

impl From<Length> for LengthRepr {
    fn from(length: Length) -> Self {
        match length {
            Length::Pixels(v) if v.is_finite() => LengthRepr::Number(v),
            other => LengthRepr::Text(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lengths() {
        assert_eq!("120".parse::<Length>().unwrap(), Length::Pixels(120.0));
        assert_eq!("120px".parse::<Length>().unwrap(), Length::Pixels(120.0));
        assert_eq!(" 25% ".parse::<Length>().unwrap(), Length::Percent(25.0));
        assert_eq!("none".parse::<Length>().unwrap(), Length::UNBOUNDED);
        assert!("wide".parse::<Length>().is_err());
        assert!("-4px".parse::<Length>().is_err());
    }

    #[test]
    fn test_resolve() {
        assert_eq!(Length::px(80.0).resolve(500.0), 80.0);
        assert_eq!(Length::percent(25.0).resolve(400.0), 100.0);
        assert_eq!(Length::percent(25.0).resolve(f32::NAN), 0.0);
        assert!(Length::UNBOUNDED.is_unbounded());
        assert!(!Length::px(10.0).is_unbounded());
    }

    #[test]
    fn test_serde_forms() {
        let json = serde_json::to_string(&Length::px(42.0)).unwrap();
        assert_eq!(json, "42.0");
        let json = serde_json::to_string(&Length::UNBOUNDED).unwrap();
        assert_eq!(json, "\"none\"");

        let parsed: Length = serde_json::from_str("\"30%\"").unwrap();
        assert_eq!(parsed, Length::Percent(30.0));
        let parsed: Length = serde_json::from_str("64").unwrap();
        assert_eq!(parsed, Length::Pixels(64.0));
    }
}
