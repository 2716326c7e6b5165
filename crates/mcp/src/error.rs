//! Fatal errors for the server binary.

use pinata_api::ApiError;
use pinata_guard::GuardError;
use thiserror::Error;

/// Fatal startup and serve errors; the binary exits with status 1 on any of these.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Guard(#[from] GuardError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("MCP server initialization error: {0}")]
    ServerInit(#[from] Box<rmcp::service::ServerInitializeError>),

    #[error("MCP server task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
