//! TOML option file loading.
//!
//! A config file uses the same keys as the in-code options:
//!
//! ```toml
//! apiUrl = "https://chat.example.com"
//! height = "720px"
//! theme = "dark"
//! healthIntervalSecs = 15
//! ```

use std::path::Path;

use ragchat_common::ConfigError;
use tracing::info;

use crate::schema::WidgetOptions;

/// Parse widget options from TOML text. Missing keys stay unset.
pub fn parse_options(content: &str) -> Result<WidgetOptions, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))
}

/// Load widget options from a TOML file.
pub fn load_from_path(path: &Path) -> Result<WidgetOptions, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let options = parse_options(&content)?;
    info!("loaded widget options from {}", path.display());
    Ok(options)
}
