use serde::{Deserialize, Serialize};
use std::fmt;

/// Connectivity classification shown in the widget's status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectionStatus {
    Connecting,
    Connected,
    /// The health endpoint answered with a non-success status.
    Unavailable,
    /// The health endpoint could not be reached at all.
    Lost,
    /// The embedded frame failed to load.
    Error,
}

impl ConnectionStatus {
    /// Text shown next to the status indicator.
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionStatus::Connecting => "Connecting...",
            ConnectionStatus::Connected => "Connected",
            ConnectionStatus::Unavailable => "Service Unavailable",
            ConnectionStatus::Lost => "Connection Lost",
            ConnectionStatus::Error => "Connection Error",
        }
    }

    pub fn indicator(&self) -> IndicatorClass {
        match self {
            ConnectionStatus::Connecting => IndicatorClass::Pending,
            ConnectionStatus::Connected => IndicatorClass::Connected,
            ConnectionStatus::Unavailable | ConnectionStatus::Lost | ConnectionStatus::Error => {
                IndicatorClass::Error
            }
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionStatus::Connected)
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Visual class of the status indicator dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndicatorClass {
    Pending,
    Connected,
    Error,
}

impl IndicatorClass {
    /// Modifier class appended to `rag-status`. Pending has none.
    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            IndicatorClass::Pending => None,
            IndicatorClass::Connected => Some("connected"),
            IndicatorClass::Error => Some("error"),
        }
    }
}

/// Host page visibility, as reported by its `visibilitychange` signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    Visible,
    Hidden,
}

/// Lifecycle signals raised by the embedded frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameEvent {
    Load,
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_match_status_bar_text() {
        assert_eq!(ConnectionStatus::Connecting.label(), "Connecting...");
        assert_eq!(ConnectionStatus::Connected.label(), "Connected");
        assert_eq!(ConnectionStatus::Unavailable.label(), "Service Unavailable");
        assert_eq!(ConnectionStatus::Lost.label(), "Connection Lost");
        assert_eq!(ConnectionStatus::Error.label(), "Connection Error");
    }

    #[test]
    fn failures_share_the_error_indicator() {
        for status in [
            ConnectionStatus::Unavailable,
            ConnectionStatus::Lost,
            ConnectionStatus::Error,
        ] {
            assert_eq!(status.indicator(), IndicatorClass::Error);
        }
        assert_eq!(
            ConnectionStatus::Connecting.indicator(),
            IndicatorClass::Pending
        );
        assert_eq!(
            ConnectionStatus::Connected.indicator(),
            IndicatorClass::Connected
        );
    }

    #[test]
    fn indicator_css_classes() {
        assert_eq!(IndicatorClass::Pending.css_class(), None);
        assert_eq!(IndicatorClass::Connected.css_class(), Some("connected"));
        assert_eq!(IndicatorClass::Error.css_class(), Some("error"));
    }

    #[test]
    fn display_uses_label() {
        assert_eq!(ConnectionStatus::Lost.to_string(), "Connection Lost");
    }

    #[test]
    fn only_connected_is_connected() {
        assert!(ConnectionStatus::Connected.is_connected());
        assert!(!ConnectionStatus::Connecting.is_connected());
        assert!(!ConnectionStatus::Unavailable.is_connected());
    }
}
