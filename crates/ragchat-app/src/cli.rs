use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ragchat_common::ConfigError;
use ragchat_config::WidgetOptions;

/// ragchat-embed: embed the RAG PDF Chat application in a web page.
#[derive(Parser, Debug)]
#[command(name = "ragchat-embed", version, about)]
pub struct Args {
    /// Log level override (debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print a standalone HTML page hosting the widget.
    Render(WidgetArgs),
    /// Mount the widget headlessly and log its status as it changes.
    Watch {
        #[command(flatten)]
        widget: WidgetArgs,

        /// Stop after this many seconds (default: run until Ctrl-C).
        #[arg(long)]
        duration: Option<u64>,
    },
}

#[derive(clap::Args, Debug, Clone)]
pub struct WidgetArgs {
    /// TOML file with widget options. Flags override its values.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Base URL of the hosted application.
    #[arg(long)]
    pub api_url: Option<String>,

    /// Frame width (CSS length).
    #[arg(long)]
    pub width: Option<String>,

    /// Frame height (CSS length).
    #[arg(long)]
    pub height: Option<String>,

    /// Theme identifier (light, dark).
    #[arg(long)]
    pub theme: Option<String>,

    /// Seconds between health probes.
    #[arg(long)]
    pub interval: Option<u64>,

    /// Seconds before a health probe gives up (default: 10, capped at the interval).
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Id of the element the widget mounts into.
    #[arg(long, default_value = "rag-container")]
    pub mount: String,
}

impl WidgetArgs {
    /// Options from the config file (if any) with flags layered on top.
    pub fn options(&self) -> Result<WidgetOptions, ConfigError> {
        let base = match &self.config {
            Some(path) => ragchat_config::load_from_path(path)?,
            None => WidgetOptions::default(),
        };
        let flags = WidgetOptions {
            api_url: self.api_url.clone(),
            height: self.height.clone(),
            width: self.width.clone(),
            theme: self.theme.clone(),
            health_interval_secs: self.interval,
            probe_timeout_secs: self.timeout,
            ..WidgetOptions::default()
        };
        Ok(base.merge(flags))
    }
}

pub fn parse() -> Args {
    Args::parse()
}
