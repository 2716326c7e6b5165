//! Errors returned by the Pinata API client.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("PINATA_JWT environment variable is not set")]
    MissingJwt,

    #[error("GATEWAY_URL environment variable is not set")]
    MissingGateway,

    #[error("Failed to {action}: {status}{}", detail(.body))]
    Status {
        action: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unexpected response: {0}")]
    Unexpected(String),
}

fn detail(body: &str) -> String {
    if body.trim().is_empty() {
        String::new()
    } else {
        format!("\n{}", body.trim())
    }
}
