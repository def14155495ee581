// src/error.rs
//! Error kinds, one enum per concern.
//!
//! Resolution and fetch failures are per-item and never abort a batch; callers
//! collect them. Persistence failures are fatal to the operation that hit them.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Turning a pasted URL/handle into a channel.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("no @handle found in input")]
    NotAHandle,

    /// Zero search results. Transport and service failures land here as well.
    #[error("no channel matches @{handle}")]
    NoMatch { handle: String },
}

/// Pulling channel metrics for a ranking run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("channel {channel_id} unavailable: {reason}")]
    ChannelUnavailable { channel_id: String, reason: String },
}

impl FetchError {
    pub fn unavailable(channel_id: &str, reason: impl Into<String>) -> Self {
        FetchError::ChannelUnavailable {
            channel_id: s!(channel_id),
            reason: reason.into(),
        }
    }
}

/// Reading or writing the table files.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },
}

impl PersistenceError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        PersistenceError::Io { path: path.into(), source }
    }
}

/// Looking up configuration values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing config value {0}")]
    Missing(String),

    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: String, value: String },

    #[error("cannot read {path}: {reason}")]
    Source { path: String, reason: String },
}

/// Talking to the video platform.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{endpoint} returned {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("unexpected response from {endpoint}: {reason}")]
    Malformed { endpoint: String, reason: String },
}

/// Writing a report file.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("{table} has no channel column; per-channel export is not available")]
    PerChannelUnsupported { table: &'static str },

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
