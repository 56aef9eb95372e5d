//! Icon overlay positions.
//!
//! Positions are persisted as free-form strings so that whatever a client
//! wrote is returned verbatim. Rendering goes through [`IconPosition::resolve`],
//! which is the single place an unrecognized value falls back to top-right.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Corner of the product image the icon is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum IconPosition {
    TopLeft,
    #[default]
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Error returned when strictly parsing an unknown position string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid icon position: {0}")]
pub struct ParsePositionError(pub String);

impl IconPosition {
    /// Every position, in the order the admin selector lists them.
    pub const ALL: [Self; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// Resolve a stored position string for rendering.
    ///
    /// Unrecognized input (including the empty string) resolves to the
    /// default, [`IconPosition::TopRight`].
    #[must_use]
    pub fn resolve(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }

    /// Wire/storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomRight => "bottom-right",
        }
    }

    /// Human-readable label for the admin selector.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::TopLeft => "Top Left",
            Self::TopRight => "Top Right",
            Self::BottomLeft => "Bottom Left",
            Self::BottomRight => "Bottom Right",
        }
    }

    /// Inline CSS corner offsets for an absolutely positioned overlay.
    #[must_use]
    pub const fn css_offsets(self) -> &'static str {
        match self {
            Self::TopLeft => "top: 10px; left: 10px;",
            Self::TopRight => "top: 10px; right: 10px;",
            Self::BottomLeft => "bottom: 10px; left: 10px;",
            Self::BottomRight => "bottom: 10px; right: 10px;",
        }
    }
}

impl std::fmt::Display for IconPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for IconPosition {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top-left" => Ok(Self::TopLeft),
            "top-right" => Ok(Self::TopRight),
            "bottom-left" => Ok(Self::BottomLeft),
            "bottom-right" => Ok(Self::BottomRight),
            _ => Err(ParsePositionError(s.to_string())),
        }
    }
}

/// Position → CSS offsets table shared with the browser-side renderers.
///
/// Emitted into the admin page and the storefront widget so both look up
/// offsets from the same data; `"default"` names the fallback key.
#[must_use]
pub fn position_css_table() -> serde_json::Value {
    let positions: serde_json::Map<String, serde_json::Value> = IconPosition::ALL
        .iter()
        .map(|p| (p.as_str().to_string(), p.css_offsets().into()))
        .collect();

    serde_json::json!({
        "default": IconPosition::default().as_str(),
        "positions": positions,
    })
}
