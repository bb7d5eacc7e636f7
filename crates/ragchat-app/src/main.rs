mod cli;
mod commands;

use std::process::ExitCode;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use crate::cli::Command;

const DEFAULT_LOG_DIRECTIVE: &str = "ragchat=info";

fn init_logging(log_level: Option<&str>) {
    let directive = log_level
        .and_then(|level| level.parse().ok())
        .or_else(|| DEFAULT_LOG_DIRECTIVE.parse().ok());

    let mut filter = EnvFilter::from_default_env();
    if let Some(directive) = directive {
        filter = filter.add_directive(directive);
    }

    // Logs go to stderr so `render` output can be piped.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();
    init_logging(args.log_level.as_deref());

    tracing::debug!("ragchat-embed v{} starting", env!("CARGO_PKG_VERSION"));

    let result = match &args.command {
        Command::Render(widget) => commands::render_page(widget).map(|page| println!("{page}")),
        Command::Watch { widget, duration } => {
            commands::watch(widget, duration.map(Duration::from_secs))
                .await
                .map(|_| ())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
