use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Failure to read or parse the product catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("catalog request returned status {0}")]
    Status(StatusCode),

    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failure of a single chat completion request
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("chat request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("chat endpoint returned status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("chat reply is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("chat reply contained no message content")]
    EmptyReply,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to access storage file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode stored value: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A category name that is neither "all" nor one of the catalog categories
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConversationError {
    #[error("a reply is still pending")]
    Busy,

    #[error("message is empty")]
    EmptyInput,
}
