//! Client for the Pinata v3 REST API.
//!
//! Each method issues exactly one request (two for private gateway fetches)
//! and hands back the decoded JSON body. No retries, no pagination.

mod client;
pub mod config;
pub mod error;
mod files;
mod gateway;
mod groups;
mod keys;
pub mod types;
mod upload;
mod vectors;

pub use client::PinataClient;
pub use config::Config;
pub use error::ApiError;
pub use gateway::Fetched;
pub use types::Network;
pub use upload::Upload;
