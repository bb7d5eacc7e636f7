use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Errors surfaced to the caller of the embed widget.
///
/// Only construction can fail. Runtime degradations (frame load failure,
/// health probe failures) are reported through the widget status instead.
#[derive(Debug, thiserror::Error)]
pub enum EmbedError {
    #[error("mount point not found: {0}")]
    MountNotFound(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Other(String),
}
