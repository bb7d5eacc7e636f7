//! Theme identifiers.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Theme identifiers with a built-in stylesheet.
pub const BUILT_IN_THEMES: &[&str] = &["light", "dark"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Look up a built-in theme by identifier (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    /// Like [`Theme::from_name`], falling back to `light` for unknown names.
    pub fn resolve(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            warn!("unknown theme '{name}', falling back to light");
            Theme::Light
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}
