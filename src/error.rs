// Error types shared by the card. Handlers return `ActionError`, the
// startup path returns `ConfigError`/`MenuError`; `main` and the session
// loop wrap everything else in `anyhow`.

use std::io;
use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

use crate::actions::MenuChoice;

/// Failure of a single menu action.
#[derive(Debug, Error)]
pub enum ActionError {
    /// No application could be launched for the target.
    #[error("could not open {target}: {source}")]
    Open {
        target: String,
        #[source]
        source: io::Error,
    },

    /// The request never produced a response (DNS, connect, timeout...).
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response started but the body could not be read to the end.
    #[error("download from {url} broke off: {source}")]
    Transfer {
        url: String,
        #[source]
        source: io::Error,
    },

    #[error("{url} responded with {status}")]
    Status { url: String, status: StatusCode },

    #[error("could not write {}: {source}", path.display())]
    FileSystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("terminal output failed: {0}")]
    Terminal(#[from] io::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MenuError {
    #[error("menu has no entries")]
    Empty,
    #[error("menu has no exit entry")]
    MissingExit,
    #[error("menu offers {0} more than once")]
    Duplicate(MenuChoice),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} is not a valid URL ({value}): {source}")]
    Url {
        field: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("resume_file_name must be a plain file name, got {0:?}")]
    FileName(String),
}
