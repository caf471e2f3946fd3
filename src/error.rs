//! Error types for the Anikai provider
//!
//! Missing page fields are never errors; they are skipped during extraction.
//! These variants cover the failures that do surface to the host: bad
//! configuration and failed page fetches.

use thiserror::Error;

/// Provider error types
#[derive(Error, Debug)]
pub enum AnikaiError {
    #[error("Invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Invalid site URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}
