//! Unified error type for `GemBot`.
//!
//! All fallible operations in the crate return [`Result`], so command
//! handlers can propagate failures with `?` and let the framework's error
//! hook report them.

use thiserror::Error;

/// Errors that can occur anywhere in the bot.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error (missing or invalid environment values).
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable description naming the offending value.
        message: String,
    },

    /// Environment variable lookup failure.
    #[error("environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// The Gemini API returned a non-success status.
    #[error("gemini api error (status {status}): {message}")]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// Error message extracted from the response body, if any.
        message: String,
    },

    /// The Gemini API returned 200 but the body had none of the expected
    /// fields (no candidates, no prompt feedback).
    #[error("gemini response missing expected content")]
    MalformedResponse,

    /// Transport-level HTTP failure (connection, timeout, body decode).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serenity/Poise framework error.
    #[error("discord error: {0}")]
    Discord(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Error::Discord(Box::new(value))
    }
}

/// Convenience `Result` type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
