use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type used across the entire application.
#[derive(Debug, Error)]
pub enum PanelError {
    #[error("config error: {0}")]
    Config(String),

    /// Every candidate file for a battery attribute was missing.
    #[error("unable to read status for {attribute}")]
    AttributeExhausted { attribute: &'static str },

    /// The file exists but reading it failed (permissions, EIO, ...).
    #[error("cannot read '{}': {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid value {value:?} for {attribute}")]
    Parse {
        attribute: &'static str,
        value: String,
    },

    #[error("command `{command}` failed: {reason}")]
    Command { command: String, reason: String },

    #[error("system error: {0}")]
    System(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub type Result<T, E = PanelError> = std::result::Result<T, E>;
