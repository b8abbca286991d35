//! Display color tiers emitted alongside classified values.
//!
//! The simulation core never draws anything; it emits a [`ColorToken`] with
//! each reading and the rendering layer decides how that tier looks. Tokens
//! map 1:1 to the dashboard stylesheet's accent variables, with RGB values
//! provided for renderers that do not consume CSS.

use core::fmt;

use serde::Serialize;

/// Color tier attached to a classified reading.
///
/// `Gray` is the "unremarkable" tier used by the heat map for zones sitting
/// at baseline temperature; every other token matches an accent color of the
/// dashboard theme.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorToken {
    Green,
    Yellow,
    Orange,
    Red,
    Blue,
    Gray,
}

impl ColorToken {
    /// Stylesheet variable name for this tier.
    pub const fn css_var(self) -> &'static str {
        match self {
            Self::Green => "--accent-green",
            Self::Yellow => "--accent-yellow",
            Self::Orange => "--accent-orange",
            Self::Red => "--accent-red",
            Self::Blue => "--accent-blue",
            Self::Gray => "--accent-gray",
        }
    }

    /// RGB value for renderers without stylesheet support.
    /// Matches the accent palette used by the dashboard theme.
    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Green => (52, 199, 89),
            Self::Yellow => (255, 204, 0),
            Self::Orange => (255, 149, 0),
            Self::Red => (255, 59, 48),
            Self::Blue => (0, 122, 255),
            Self::Gray => (120, 120, 128),
        }
    }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Orange => "orange",
            Self::Red => "red",
            Self::Blue => "blue",
            Self::Gray => "gray",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_var_names() {
        assert_eq!(ColorToken::Green.css_var(), "--accent-green");
        assert_eq!(ColorToken::Gray.css_var(), "--accent-gray");
    }

    #[test]
    fn test_rgb_values() {
        assert_eq!(ColorToken::Red.rgb(), (255, 59, 48), "Red should match the accent palette");
        assert_eq!(ColorToken::Blue.rgb(), (0, 122, 255), "Blue should match the accent palette");
    }

    #[test]
    fn test_display_is_lowercase_token() {
        assert_eq!(ColorToken::Orange.to_string(), "orange");
    }
}
