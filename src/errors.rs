use std::{path::PathBuf, time::Duration};

use thiserror::Error;

use crate::types::TrackDescriptor;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Input file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Malformed line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },

    #[error("Authorization was denied in the browser")]
    AuthDenied,

    #[error("No authorization callback received within {} seconds", .0.as_secs())]
    AuthTimeout(Duration),

    #[error("Spotify accounts service error (status {status}): {message}")]
    AuthServiceError { status: u16, message: String },

    #[error("Failed to create playlist '{name}' (status {status}): {message}")]
    PlaylistCreateFailed {
        name: String,
        status: u16,
        message: String,
    },

    #[error("{0} could not be converted")]
    TrackNotMatched(TrackDescriptor),

    #[error("Spotify API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
