use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that end a search run.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("connection error for {url}: {reason}")]
    Connection { url: String, reason: String },

    #[error("request error {0}")]
    Http(u16),

    #[error("invalid search url template `{template}`: {reason}")]
    Template { template: String, reason: String },

    #[error("invalid job title marker selector `{selector}`: {reason}")]
    Marker { selector: String, reason: String },

    #[error("invalid search request: {0}")]
    InvalidRequest(String),

    #[error("failed to read state list {}", path.display())]
    StateList {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to load site config {}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed site config {}", path.display())]
    ConfigFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, SearchError>;
