//! HTML rendering for the embed widget.
//!
//! Markup lives in askama templates under `templates/` with HTML escaping on,
//! so a hostile `apiUrl` or mount id cannot break out of its attribute.

use askama::Template;
use ragchat_common::EmbedError;
use ragchat_config::WidgetConfig;
use tracing::warn;

use crate::status::{LoadingIndicator, WidgetView};
use crate::styles;

pub const FRAME_TITLE: &str = "RAG PDF Chat Application";
pub const LOADING_TEXT: &str = "Loading RAG PDF Chat Application...";
pub const LOAD_ERROR_TEXT: &str = "Error loading application";

#[derive(Template)]
#[template(path = "widget.html", escape = "html")]
struct WidgetTemplate<'a> {
    theme: &'a str,
    api_url: &'a str,
    title: &'a str,
    width: &'a str,
    height: &'a str,
    failed: bool,
    spinner_hidden: bool,
    loading_text: &'a str,
    load_error_text: &'a str,
    status_class: &'a str,
    status: String,
    label: &'a str,
}

#[derive(Template)]
#[template(path = "page.html", escape = "html")]
struct PageTemplate<'a> {
    title: &'a str,
    style_key: &'a str,
    css: &'a str,
    mount_id: &'a str,
    widget: &'a str,
}

fn widget_template<'a>(
    config: &'a WidgetConfig,
    view: &WidgetView,
    status_class: &'a str,
) -> WidgetTemplate<'a> {
    WidgetTemplate {
        theme: config.resolved_theme().name(),
        api_url: config.api_url(),
        title: FRAME_TITLE,
        width: config.width(),
        height: config.height(),
        failed: view.loading == LoadingIndicator::Failed,
        spinner_hidden: view.loading == LoadingIndicator::Hidden,
        loading_text: LOADING_TEXT,
        load_error_text: LOAD_ERROR_TEXT,
        status_class,
        status: format!("{:?}", view.status),
        label: view.status.label(),
    }
}

fn status_class(view: &WidgetView) -> String {
    match view.status.indicator().css_class() {
        Some(modifier) => format!("rag-status {modifier}"),
        None => "rag-status".to_string(),
    }
}

/// Render the widget markup for the given view.
///
/// A template failure is logged and yields empty markup; the widget keeps
/// tracking status regardless.
pub fn render_widget(config: &WidgetConfig, view: &WidgetView) -> String {
    let class = status_class(view);
    match widget_template(config, view, &class).render() {
        Ok(html) => html,
        Err(e) => {
            warn!(error = %e, "failed to render widget template");
            String::new()
        }
    }
}

/// Render a standalone HTML page hosting one widget in its initial state.
pub fn render_page(config: &WidgetConfig, mount_id: &str) -> Result<String, EmbedError> {
    let view = WidgetView::default();
    let class = status_class(&view);
    let widget = widget_template(config, &view, &class)
        .render()
        .map_err(|e| EmbedError::Other(format!("failed to render widget template: {e}")))?;

    let theme = config.resolved_theme();
    let style_key = styles::style_key(theme);
    let css = styles::stylesheet(theme);
    let page = PageTemplate {
        title: FRAME_TITLE,
        style_key: &style_key,
        css: &css,
        mount_id,
        widget: &widget,
    };
    page.render()
        .map_err(|e| EmbedError::Other(format!("failed to render page template: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ragchat_common::ConnectionStatus;
    use ragchat_config::WidgetOptions;

    fn config(api_url: &str) -> WidgetConfig {
        WidgetConfig::from_options(WidgetOptions::new().with_api_url(api_url))
    }

    #[test]
    fn initial_markup_shows_spinner_and_connecting() {
        let html = render_widget(&config("http://x/app"), &WidgetView::default());
        assert!(html.contains(r#"<iframe src="http://x/app""#));
        assert!(html.contains("style=\"width: 100%; height: 600px;\""));
        assert!(html.contains(LOADING_TEXT));
        assert!(html.contains(r#"<div class="rag-status" data-status="Connecting">"#));
        assert!(html.contains("Connecting..."));
    }

    #[test]
    fn connected_markup_hides_spinner() {
        let view = WidgetView {
            status: ConnectionStatus::Connected,
            loading: LoadingIndicator::Hidden,
        };
        let html = render_widget(&config("http://x/app"), &view);
        assert!(html.contains(r#"class="rag-loading" style="display: none;""#));
        assert!(html.contains(r#"class="rag-status connected""#));
        assert!(html.contains(">Connected</span>"));
    }

    #[test]
    fn failed_markup_replaces_spinner_with_error() {
        let view = WidgetView {
            status: ConnectionStatus::Error,
            loading: LoadingIndicator::Failed,
        };
        let html = render_widget(&config("http://x/app"), &view);
        assert!(html.contains(LOAD_ERROR_TEXT));
        assert!(!html.contains(LOADING_TEXT));
        assert!(!html.contains("rag-spinner"));
        assert!(html.contains(r#"class="rag-status error""#));
        assert!(html.contains("Connection Error"));
    }

    #[test]
    fn hostile_url_is_escaped() {
        let html = render_widget(&config("http://x/\"><script>"), &WidgetView::default());
        assert!(!html.contains("<script>"));
        assert!(!html.contains(r#"/"><"#));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn theme_is_tagged_on_container() {
        let config = WidgetConfig::from_options(WidgetOptions::new().with_theme("dark"));
        let html = render_widget(&config, &WidgetView::default());
        assert!(html.contains(r#"data-theme="dark""#));
    }

    #[test]
    fn page_embeds_stylesheet_and_mount() {
        let page = render_page(&config("http://x/app"), "rag-container").unwrap();
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains(r#"<div id="rag-container">"#));
        assert!(page.contains(r#"<style data-key="ragchat-embed-light">"#));
        assert!(page.contains("@keyframes rag-spin"));
        assert!(page.contains(r#"<iframe src="http://x/app""#));
    }

    #[test]
    fn page_escapes_mount_id() {
        let page = render_page(&config("http://x/app"), "a\"><b").unwrap();
        assert!(page.contains("&lt;b"));
        assert!(!page.contains("<b\""));
        assert!(!page.contains(r#"<div id="a">"#));
    }
}
