//! MCP server exposing Pinata IPFS storage as tools.
//!
//! API tools are thin wrappers over [`pinata_api::PinataClient`]. Anything
//! that touches the local filesystem (uploads, saving fetched content, `file://`
//! resources) is first checked by [`pinata_guard::PathGuard`] against the
//! allowed directories configured at startup.

use pinata_api::PinataClient;
use pinata_guard::PathGuard;
use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::router::tool::ToolRouter,
    model::{
        Implementation, ListResourcesResult, PaginatedRequestParams, ReadResourceRequestParams,
        ReadResourceResult, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    tool_handler,
};
pub mod error;
pub mod mime;
pub mod params;
pub mod resources;
pub mod tools;

pub use error::Error;

/// Pinata MCP server with directory-level access control for local files.
#[derive(Debug, Clone)]
pub struct PinataServer {
    pub(crate) guard: PathGuard,
    pub(crate) client: PinataClient,
    pub(crate) tool_router: ToolRouter<Self>,
}

#[tool_handler]
impl ServerHandler for PinataServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: "pinata-mcp".into(),
                title: Some("Pinata MCP Server".into()),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(
                "Search, upload, fetch, group and link files stored on Pinata IPFS. \
                 Local files are readable as file:// resources inside the allowed directories."
                    .into(),
            ),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult::with_all_items(resources::roots(
            &self.guard,
        )))
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        resources::read(&self.guard, &request.uri).await
    }
}
