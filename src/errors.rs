/*!
 * Error types for the srtfix application.
 *
 * This module contains custom error types for different parts of the
 * application, using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur during subtitle processing
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// A timestamp token did not have the `HH:MM:SS,mmm` shape
    #[error("Malformed timestamp token: {0}")]
    MalformedTimestamp(String),

    /// A component of a timestamp token failed numeric conversion
    #[error("Invalid {component} in timestamp: {token}")]
    InvalidComponent {
        /// Which component failed (hours, minutes, seconds, milliseconds)
        component: &'static str,
        /// The full offending token
        token: String,
    },

    /// A counter line failed numeric conversion
    #[error("Invalid cue counter: {0}")]
    InvalidCounter(String),

    /// A path did not carry the .srt extension
    #[error("Not a subtitle file (expected .srt): {0}")]
    NotSubtitleFile(String),

    /// A resync bound argument could not be parsed as a timestamp
    #[error("Invalid bound timestamp: {0}")]
    InvalidBound(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
