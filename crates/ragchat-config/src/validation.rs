//! Full configuration validation.
//!
//! Collects every problem before failing so a caller sees all of them at once.

use ragchat_common::ConfigError;

use crate::dimensions::{is_css_length, is_http_url};
use crate::schema::WidgetConfig;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &WidgetConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    if !is_http_url(config.api_url()) {
        errors.push(format!(
            "apiUrl = \"{}\" is not an http(s) URL",
            config.api_url()
        ));
    }

    validate_length(&mut errors, "width", config.width());
    validate_length(&mut errors, "height", config.height());

    let interval = config.health_interval().as_secs();
    let timeout = config.probe_timeout().as_secs();
    validate_range(&mut errors, "healthIntervalSecs", interval, 1, 3600);
    validate_range(&mut errors, "probeTimeoutSecs", timeout, 1, 120);
    if timeout > interval {
        errors.push(format!(
            "probeTimeoutSecs = {timeout} exceeds healthIntervalSecs = {interval}"
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_length(errors: &mut Vec<String>, name: &str, value: &str) {
    if !is_css_length(value) {
        errors.push(format!("{name} = \"{value}\" is not a CSS length"));
    }
}

/// Push an error if `value` is outside `[min, max]`.
fn validate_range(errors: &mut Vec<String>, name: &str, value: u64, min: u64, max: u64) {
    if value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}
