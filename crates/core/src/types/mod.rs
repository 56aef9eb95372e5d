//! Core types for the product icon service.
//!
//! This module provides type-safe wrappers for the settings domain.

pub mod id;
pub mod position;
pub mod settings;

pub use id::*;
pub use position::{IconPosition, ParsePositionError, position_css_table};
pub use settings::{
    DEFAULT_SHOP, IconSettings, SaveSettingsRequest, SaveSettingsResponse, SettingsResponse,
    ShopSettings,
};
