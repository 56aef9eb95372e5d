//! Per-shop icon settings and their wire shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::id::SettingsId;
use super::position::IconPosition;

/// Shop used by the admin page when none is given in the query string.
pub const DEFAULT_SHOP: &str = "demo-shop";

/// A persisted settings row. At most one exists per shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlite", derive(sqlx::FromRow))]
pub struct ShopSettings {
    pub id: SettingsId,
    pub shop: String,
    /// Absolute image URL; empty means "no icon".
    pub icon_url: String,
    /// Stored verbatim, see [`IconPosition::resolve`] for rendering.
    pub icon_position: String,
    pub created_at: DateTime<Utc>,
}

impl ShopSettings {
    /// Project the record down to what the storefront needs.
    #[must_use]
    pub fn icon(&self) -> IconSettings {
        IconSettings {
            icon_url: self.icon_url.clone(),
            icon_position: self.icon_position.clone(),
        }
    }
}

/// Public icon lookup response: only the two rendering fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlite", derive(sqlx::FromRow))]
pub struct IconSettings {
    pub icon_url: String,
    pub icon_position: String,
}

impl Default for IconSettings {
    fn default() -> Self {
        Self {
            icon_url: String::new(),
            icon_position: IconPosition::default().as_str().to_string(),
        }
    }
}

impl From<Option<ShopSettings>> for IconSettings {
    fn from(record: Option<ShopSettings>) -> Self {
        record.map_or_else(Self::default, |r| r.icon())
    }
}

/// Settings read response.
///
/// A shop with no saved row reads as the defaulted shape with the identity
/// fields omitted, the same as a row whose icon URL is empty apart from those
/// fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<SettingsId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop: Option<String>,
    pub icon_url: String,
    pub icon_position: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<Option<ShopSettings>> for SettingsResponse {
    fn from(record: Option<ShopSettings>) -> Self {
        match record {
            Some(r) => Self {
                id: Some(r.id),
                shop: Some(r.shop),
                icon_url: r.icon_url,
                icon_position: r.icon_position,
                created_at: Some(r.created_at),
            },
            None => {
                let icon = IconSettings::default();
                Self {
                    id: None,
                    shop: None,
                    icon_url: icon.icon_url,
                    icon_position: icon.icon_position,
                    created_at: None,
                }
            }
        }
    }
}

/// Settings write request.
///
/// No field contents are validated; an unrecognized position is stored as-is.
/// A missing or `null` icon field takes its default, and any other non-string
/// JSON value is stored as its JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveSettingsRequest {
    pub shop: String,
    #[serde(default, deserialize_with = "icon_url_or_empty")]
    pub icon_url: String,
    #[serde(default = "default_position", deserialize_with = "icon_position_or_default")]
    pub icon_position: String,
}

fn default_position() -> String {
    IconPosition::default().as_str().to_string()
}

/// Any JSON value as text; `null` is `None`.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    })
}

fn icon_url_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

fn icon_position_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?.unwrap_or_else(default_position))
}

/// Settings write response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveSettingsResponse {
    pub success: bool,
    pub id: SettingsId,
}
