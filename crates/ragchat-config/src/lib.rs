//! Embed widget configuration.
//!
//! Callers supply partial [`WidgetOptions`] (in code or as a TOML file);
//! they are merged with defaults into an immutable [`WidgetConfig`] and
//! validated before a widget is mounted.
//!
//! # Quick Start
//!
//! ```rust
//! use ragchat_config::{WidgetConfig, WidgetOptions};
//!
//! let config = WidgetConfig::resolve(WidgetOptions::new().with_api_url("http://x/app"))
//!     .expect("valid options");
//! assert_eq!(config.health_url(), "http://x/app/_stcore/health");
//! assert_eq!(config.height(), "600px");
//! ```

pub mod dimensions;
pub mod schema;
pub mod theme;
pub mod toml_loader;
pub mod validation;

pub use schema::{
    WidgetConfig, WidgetOptions, DEFAULT_API_URL, DEFAULT_HEALTH_INTERVAL_SECS, DEFAULT_HEIGHT,
    DEFAULT_PROBE_TIMEOUT_SECS, DEFAULT_THEME, DEFAULT_WIDTH, HEALTH_PATH,
};
pub use theme::{Theme, BUILT_IN_THEMES};
pub use toml_loader::{load_from_path, parse_options};

/// Serialize a resolved config to a pretty-printed JSON string.
pub fn config_to_json(config: &WidgetConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
