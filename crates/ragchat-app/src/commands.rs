//! Subcommand implementations.

use std::sync::Arc;
use std::time::Duration;

use ragchat_common::{ConnectionStatus, EmbedError, FrameEvent, WidgetEventKind};
use ragchat_config::WidgetConfig;
use ragchat_webview::{markup, Document, EmbedWidget, HttpHealthProbe};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use crate::cli::WidgetArgs;

fn resolve(args: &WidgetArgs) -> Result<WidgetConfig, EmbedError> {
    let config = WidgetConfig::resolve(args.options()?)?;
    debug!(api_url = config.api_url(), theme = config.theme(), "widget config resolved");
    Ok(config)
}

/// Build the standalone host page for `render`.
pub fn render_page(args: &WidgetArgs) -> Result<String, EmbedError> {
    let config = resolve(args)?;
    markup::render_page(&config, &args.mount)
}

/// Stand-in for the frame's own load: fetch the application page once.
///
/// Any HTTP answer counts as a load, like a browser frame firing `load` for
/// an error page; only a transport failure counts as a frame error.
pub async fn load_frame(http: &reqwest::Client, url: &str) -> FrameEvent {
    match http.get(url).send().await {
        Ok(response) => {
            debug!(url, status = response.status().as_u16(), "frame loaded");
            FrameEvent::Load
        }
        Err(e) => {
            warn!(url, error = %e, "frame failed to load");
            FrameEvent::Error
        }
    }
}

/// Mount a widget in an in-memory document and log until `duration`
/// elapses or Ctrl-C is pressed. Returns the status the widget ended in.
pub async fn watch(
    args: &WidgetArgs,
    duration: Option<Duration>,
) -> Result<ConnectionStatus, EmbedError> {
    let config = resolve(args)?;
    let http = reqwest::Client::builder()
        .timeout(config.probe_timeout())
        .build()
        .map_err(|e| EmbedError::Other(format!("failed to build HTTP client: {e}")))?;
    let frame_url = config.api_url().to_string();

    let doc = Arc::new(Document::new());
    doc.add_mount(args.mount.clone());
    let probe = Arc::new(HttpHealthProbe::with_client(http.clone()));
    let widget = EmbedWidget::create(args.mount.clone(), config, doc.clone(), probe)?;

    let mut status = widget.subscribe_status();
    let mut events = doc.subscribe();
    let frame = load_frame(&http, &frame_url);
    tokio::pin!(frame);
    let mut frame_done = false;

    let deadline = async {
        match duration {
            Some(d) => tokio::time::sleep(d).await,
            None => std::future::pending().await,
        }
    };
    tokio::pin!(deadline);

    info!(mount = %args.mount, url = %frame_url, "watching widget (Ctrl-C to stop)");
    loop {
        tokio::select! {
            event = &mut frame, if !frame_done => {
                frame_done = true;
                widget.handle_frame_event(event);
            }
            changed = status.changed() => {
                if changed.is_err() {
                    break;
                }
                let current = *status.borrow_and_update();
                info!(status = %current, "status changed");
            }
            received = events.recv() => match received {
                Ok(mount_event) => {
                    let event = mount_event.event;
                    match event.kind {
                        WidgetEventKind::Connected => {
                            info!(event = event.name(), timestamp = event.timestamp(), "notification");
                        }
                        WidgetEventKind::Error => {
                            warn!(event = event.name(), timestamp = event.timestamp(), "notification");
                        }
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "notification listener lagged");
                }
                Err(RecvError::Closed) => break,
            },
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                break;
            }
            _ = &mut deadline => break,
        }
    }

    let final_status = widget.status();
    widget.destroy();
    info!(status = %final_status, "widget destroyed");
    Ok(final_status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    use crate::cli::{Args, Command};

    fn widget_args(argv: &[&str]) -> WidgetArgs {
        let mut full = vec!["ragchat-embed", "render"];
        full.extend_from_slice(argv);
        match Args::try_parse_from(full).unwrap().command {
            Command::Render(widget) => widget,
            Command::Watch { widget, .. } => widget,
        }
    }

    #[test]
    fn render_page_uses_mount_and_url() {
        let page = render_page(&widget_args(&["--api-url", "http://x/app", "--mount", "chat"]))
            .unwrap();
        assert!(page.contains(r#"<div id="chat">"#));
        assert!(page.contains(r#"<iframe src="http://x/app""#));
    }

    #[test]
    fn render_page_rejects_invalid_options() {
        let result = render_page(&widget_args(&["--width", "wide"]));
        assert!(matches!(result, Err(EmbedError::Config(_))));
    }

    #[tokio::test]
    async fn any_http_answer_loads_the_frame() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server.mock("GET", "/").with_status(404).create_async().await;

        let http = reqwest::Client::new();
        let event = load_frame(&http, &format!("{}/", server.url())).await;
        assert_eq!(event, FrameEvent::Load);
    }

    #[tokio::test]
    async fn refused_connection_fails_the_frame() {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(2))
            .build()
            .unwrap();
        let event = load_frame(&http, "http://127.0.0.1:1/").await;
        assert_eq!(event, FrameEvent::Error);
    }

    #[test]
    fn short_interval_resolves_without_timeout_flag() {
        let config = resolve(&widget_args(&["--interval", "5"])).unwrap();
        assert_eq!(config.health_interval(), Duration::from_secs(5));
        assert_eq!(config.probe_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn timeout_longer_than_interval_is_rejected() {
        let result = resolve(&widget_args(&["--interval", "5", "--timeout", "8"]));
        assert!(matches!(result, Err(EmbedError::Config(_))));
    }

    #[tokio::test]
    async fn watch_connects_when_frame_loads() {
        let mut server = mockito::Server::new_async().await;
        let _page = server.mock("GET", "/").with_status(200).create_async().await;
        let _health = server
            .mock("GET", "/_stcore/health")
            .with_status(200)
            .expect_at_least(1)
            .create_async()
            .await;

        let url = server.url();
        let args = widget_args(&["--api-url", url.as_str(), "--interval", "30"]);
        let status = watch(&args, Some(Duration::from_millis(500))).await.unwrap();
        assert_eq!(status, ConnectionStatus::Connected);
    }

    #[tokio::test]
    async fn watch_ends_in_error_when_frame_cannot_load() {
        let args = widget_args(&["--api-url", "http://127.0.0.1:1", "--timeout", "2"]);
        let status = watch(&args, Some(Duration::from_millis(500))).await.unwrap();
        assert_eq!(status, ConnectionStatus::Error);
    }
}
