//! CSS dimension and URL checks for values interpolated into the markup.
//!
//! Width and height end up inside an inline `style` attribute, so only plain
//! lengths are accepted: a number with one of `px`, `%`, `em`, `rem`, `vh`,
//! `vw`, or the keyword `auto`.

use regex::Regex;
use std::sync::LazyLock;

/// Regex for a non-negative CSS length with a unit.
static LENGTH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+(\.\d+)?|\.\d+)(px|%|em|rem|vh|vw)$")
        .expect("dimensions: static regex pattern must compile")
});

/// Regex for an absolute http(s) URL: scheme, non-empty host, optional port and path.
static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://[A-Za-z0-9.\-_~\[\]:]+(:\d+)?(/[^\s]*)?$")
        .expect("dimensions: static regex pattern must compile")
});

/// Validate that a string is a CSS length the widget accepts.
pub fn is_css_length(s: &str) -> bool {
    let s = s.trim();
    s == "auto" || LENGTH_RE.is_match(s)
}

/// Validate that a string is an absolute `http`/`https` URL with a host.
pub fn is_http_url(s: &str) -> bool {
    let s = s.trim();
    if s.contains(['"', '<', '>', '\'']) {
        return false;
    }
    URL_RE.is_match(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_lengths() {
        for ok in ["600px", "100%", "1.5em", "2rem", "80vh", "50vw", ".5em", "auto"] {
            assert!(is_css_length(ok), "{ok} should be accepted");
        }
    }

    #[test]
    fn rejects_bad_lengths() {
        for bad in ["", "wide", "600", "-10px", "10pt", "100%; color: red", "calc(1px)"] {
            assert!(!is_css_length(bad), "{bad} should be rejected");
        }
    }

    #[test]
    fn accepts_http_urls() {
        assert!(is_http_url("http://localhost:8501"));
        assert!(is_http_url("https://chat.example.com/app"));
        assert!(is_http_url("http://x/app"));
        assert!(is_http_url("http://127.0.0.1:1"));
    }

    #[test]
    fn rejects_non_http_urls() {
        assert!(!is_http_url("ftp://x"));
        assert!(!is_http_url("localhost:8501"));
        assert!(!is_http_url("http://"));
        assert!(!is_http_url("javascript:alert(1)"));
        assert!(!is_http_url("http://x/\"><script>"));
    }
}
