//! Errors raised while talking to the catalog backend

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure, or a body that could not be decoded
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{method} {url} returned HTTP {status}")]
    Status {
        method: String,
        url: String,
        status: u16,
    },

    #[error("invalid backend URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

pub type Result<T> = std::result::Result<T, ApiError>;
