//! Widget option and configuration types.
//!
//! [`WidgetOptions`] is what a caller hands over: every field optional,
//! unknown keys kept in `extra`. [`WidgetConfig`] is the merged result and
//! cannot be changed once built.

use std::collections::BTreeMap;
use std::time::Duration;

use ragchat_common::ConfigError;
use serde::{Deserialize, Serialize};

use crate::theme::Theme;
use crate::validation;

pub const DEFAULT_API_URL: &str = "http://localhost:8501";
pub const DEFAULT_HEIGHT: &str = "600px";
pub const DEFAULT_WIDTH: &str = "100%";
pub const DEFAULT_THEME: &str = "light";
pub const DEFAULT_HEALTH_INTERVAL_SECS: u64 = 30;
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 10;

/// Health endpoint of the hosted application, relative to `apiUrl`.
pub const HEALTH_PATH: &str = "/_stcore/health";

/// Caller-supplied widget options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_interval_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probe_timeout_secs: Option<u64>,
    /// Keys the widget does not interpret; carried through unmodified.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl WidgetOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    pub fn with_height(mut self, height: impl Into<String>) -> Self {
        self.height = Some(height.into());
        self
    }

    pub fn with_width(mut self, width: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self
    }

    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    pub fn with_health_interval_secs(mut self, secs: u64) -> Self {
        self.health_interval_secs = Some(secs);
        self
    }

    pub fn with_probe_timeout_secs(mut self, secs: u64) -> Self {
        self.probe_timeout_secs = Some(secs);
        self
    }

    /// Layer `other` on top of `self`: fields set in `other` win, extra keys
    /// are unioned with `other` taking precedence.
    pub fn merge(mut self, other: WidgetOptions) -> Self {
        if other.api_url.is_some() {
            self.api_url = other.api_url;
        }
        if other.height.is_some() {
            self.height = other.height;
        }
        if other.width.is_some() {
            self.width = other.width;
        }
        if other.theme.is_some() {
            self.theme = other.theme;
        }
        if other.health_interval_secs.is_some() {
            self.health_interval_secs = other.health_interval_secs;
        }
        if other.probe_timeout_secs.is_some() {
            self.probe_timeout_secs = other.probe_timeout_secs;
        }
        self.extra.extend(other.extra);
        self
    }
}

/// Resolved, immutable widget configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfig {
    api_url: String,
    height: String,
    width: String,
    theme: String,
    health_interval_secs: u64,
    probe_timeout_secs: u64,
    #[serde(flatten)]
    extra: BTreeMap<String, serde_json::Value>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self::from_options(WidgetOptions::default())
    }
}

impl WidgetConfig {
    /// Merge options over the defaults. Absent or blank strings fall back
    /// to the default value.
    pub fn from_options(options: WidgetOptions) -> Self {
        let health_interval_secs = options
            .health_interval_secs
            .unwrap_or(DEFAULT_HEALTH_INTERVAL_SECS);
        // An unset timeout never outlasts a short interval.
        let probe_timeout_secs = options
            .probe_timeout_secs
            .unwrap_or_else(|| DEFAULT_PROBE_TIMEOUT_SECS.min(health_interval_secs));
        Self {
            api_url: or_default(options.api_url, DEFAULT_API_URL),
            height: or_default(options.height, DEFAULT_HEIGHT),
            width: or_default(options.width, DEFAULT_WIDTH),
            theme: or_default(options.theme, DEFAULT_THEME),
            health_interval_secs,
            probe_timeout_secs,
            extra: options.extra,
        }
    }

    /// Merge options over the defaults and validate the result.
    pub fn resolve(options: WidgetOptions) -> Result<Self, ConfigError> {
        let config = Self::from_options(options);
        validation::validate(&config)?;
        Ok(config)
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn height(&self) -> &str {
        &self.height
    }

    pub fn width(&self) -> &str {
        &self.width
    }

    /// Theme identifier exactly as configured.
    pub fn theme(&self) -> &str {
        &self.theme
    }

    /// Built-in theme the identifier maps to.
    pub fn resolved_theme(&self) -> Theme {
        Theme::resolve(&self.theme)
    }

    pub fn health_interval(&self) -> Duration {
        Duration::from_secs(self.health_interval_secs)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    pub fn extra(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.extra
    }

    /// `<apiUrl>/_stcore/health`, without doubling a trailing slash.
    pub fn health_url(&self) -> String {
        format!("{}{HEALTH_PATH}", self.api_url.trim_end_matches('/'))
    }
}

fn or_default(value: Option<String>, default: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => default.to_string(),
    }
}
