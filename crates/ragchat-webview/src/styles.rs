//! Widget stylesheet generation.
//!
//! Each theme produces one stylesheet registered with the host page under
//! [`style_key`]. Hosts keep at most one copy per key, so mounting many
//! widgets with the same theme injects the styles once.

use ragchat_config::Theme;

/// Colors used by one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub surface: &'static str,
    pub text: &'static str,
    pub muted_text: &'static str,
    pub header_start: &'static str,
    pub header_end: &'static str,
    pub frame_background: &'static str,
    pub border: &'static str,
    pub spinner_track: &'static str,
    pub pending: &'static str,
    pub connected: &'static str,
    pub error: &'static str,
}

const LIGHT: Palette = Palette {
    surface: "#ffffff",
    text: "#212529",
    muted_text: "#666666",
    header_start: "#667eea",
    header_end: "#764ba2",
    frame_background: "#f8f9fa",
    border: "#e9ecef",
    spinner_track: "#f3f3f3",
    pending: "#ffc107",
    connected: "#28a745",
    error: "#dc3545",
};

const DARK: Palette = Palette {
    surface: "#1e1f26",
    text: "#e9ecef",
    muted_text: "#a0a4ab",
    header_start: "#4c5bd4",
    header_end: "#5b3a84",
    frame_background: "#15161b",
    border: "#2c2e36",
    spinner_track: "#2c2e36",
    pending: "#ffca2c",
    connected: "#3ddc68",
    error: "#ff5c6c",
};

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => LIGHT,
            Theme::Dark => DARK,
        }
    }
}

/// Registration key for a theme's stylesheet.
pub fn style_key(theme: Theme) -> String {
    format!("ragchat-embed-{}", theme.name())
}

/// Build the stylesheet for a theme. Rules are scoped under
/// `[data-theme="<name>"]` so two themes can coexist on one page.
pub fn stylesheet(theme: Theme) -> String {
    let p = Palette::for_theme(theme);
    let scope = format!(".rag-pdf-chat-container[data-theme=\"{}\"]", theme.name());

    format!(
        r#"{scope} {{
    background: {surface};
    color: {text};
    border-radius: 15px;
    box-shadow: 0 10px 30px rgba(0, 0, 0, 0.1);
    overflow: hidden;
    margin: 20px 0;
}}
{scope} .rag-header {{
    background: linear-gradient(135deg, {header_start} 0%, {header_end} 100%);
    color: #ffffff;
    padding: 20px;
    text-align: center;
}}
{scope} .rag-header h3 {{ margin: 0 0 5px 0; font-size: 1.5rem; }}
{scope} .rag-header p {{ margin: 0; opacity: 0.9; font-size: 0.9rem; }}
{scope} .rag-iframe-wrapper {{ position: relative; background: {frame_background}; }}
{scope} .rag-loading {{
    position: absolute;
    top: 50%;
    left: 50%;
    transform: translate(-50%, -50%);
    text-align: center;
    z-index: 10;
}}
{scope} .rag-spinner {{
    width: 40px;
    height: 40px;
    border: 4px solid {spinner_track};
    border-top: 4px solid {header_start};
    border-radius: 50%;
    animation: rag-spin 1s linear infinite;
    margin: 0 auto 10px;
}}
{scope} .rag-loading p {{ color: {muted_text}; margin: 0; }}
{scope} .rag-loading p.rag-load-error {{ color: {error}; }}
{scope} .rag-iframe {{ border: none; display: block; }}
{scope} .rag-status {{
    padding: 10px 20px;
    background: {frame_background};
    border-top: 1px solid {border};
    display: flex;
    align-items: center;
    gap: 10px;
    font-size: 0.9rem;
}}
{scope} .rag-status-indicator {{
    width: 8px;
    height: 8px;
    border-radius: 50%;
    background: {pending};
    animation: rag-pulse 2s infinite;
}}
{scope} .rag-status.connected .rag-status-indicator {{ background: {connected}; animation: none; }}
{scope} .rag-status.error .rag-status-indicator {{ background: {error}; animation: none; }}
{scope} .rag-status.connected .rag-status-text {{ color: {connected}; }}
{scope} .rag-status.error .rag-status-text {{ color: {error}; }}
@keyframes rag-spin {{ 0% {{ transform: rotate(0deg); }} 100% {{ transform: rotate(360deg); }} }}
@keyframes rag-pulse {{ 0%, 100% {{ opacity: 1; }} 50% {{ opacity: 0.5; }} }}
"#,
        surface = p.surface,
        text = p.text,
        muted_text = p.muted_text,
        header_start = p.header_start,
        header_end = p.header_end,
        frame_background = p.frame_background,
        border = p.border,
        spinner_track = p.spinner_track,
        pending = p.pending,
        connected = p.connected,
        error = p.error,
    )
}
