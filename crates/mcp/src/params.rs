//! Tool parameter types.
//!
//! Field names follow the wire names agents already use for these tools,
//! which mix camelCase and snake_case.

use pinata_api::{Network, types::KeyPermissions};
use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;
use std::collections::BTreeMap;

fn private() -> Network {
    Network::Private
}

/// Parameters for searching files.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilesParams {
    /// Network to search ("public" or "private").
    #[serde(default)]
    pub network: Network,
    /// Filter by file name.
    pub name: Option<String>,
    /// Filter by CID.
    pub cid: Option<String>,
    /// Filter by MIME type.
    pub mime_type: Option<String>,
    /// Maximum number of results.
    pub limit: Option<u32>,
    /// Token from a previous page of results.
    pub page_token: Option<String>,
}

/// Parameters addressing a single file by id.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct FileIdParams {
    #[serde(default)]
    pub network: Network,
    /// Pinata file id.
    pub id: String,
}

/// Parameters for updating a file.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateFileParams {
    #[serde(default)]
    pub network: Network,
    pub id: String,
    /// New display name.
    pub name: Option<String>,
    /// Metadata key-value pairs, replacing the existing ones.
    pub keyvalues: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Parameters for signing a private download link.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DownloadLinkParams {
    /// CID of the private file.
    pub cid: String,
    /// Link lifetime in seconds.
    pub expires: u64,
}

/// Parameters for listing groups.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListGroupsParams {
    #[serde(default)]
    pub network: Network,
    /// Filter by group name.
    pub name: Option<String>,
    /// Filter by visibility.
    pub is_public: Option<bool>,
    pub limit: Option<u32>,
    pub page_token: Option<String>,
}

/// Parameters for creating a group.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateGroupParams {
    #[serde(default)]
    pub network: Network,
    pub name: String,
    /// Whether files in the group are publicly listed.
    pub is_public: Option<bool>,
}

/// Parameters addressing a single group by id.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GroupIdParams {
    #[serde(default)]
    pub network: Network,
    /// Pinata group id.
    pub id: String,
}

/// Parameters for updating a group.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateGroupParams {
    #[serde(default)]
    pub network: Network,
    pub id: String,
    pub name: Option<String>,
    pub is_public: Option<bool>,
}

/// Parameters for adding or removing a file in a group.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroupMemberParams {
    #[serde(default)]
    pub network: Network,
    pub group_id: String,
    pub file_id: String,
}

/// Parameters for listing API keys.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListKeysParams {
    pub revoked: Option<bool>,
    pub limited_use: Option<bool>,
    pub exhausted: Option<bool>,
    pub name: Option<String>,
    pub offset: Option<u32>,
}

/// Parameters for creating an API key.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateKeyParams {
    pub key_name: String,
    pub permissions: KeyPermissions,
    /// Number of uses before the key is exhausted.
    pub max_uses: Option<u32>,
}

/// Parameters for revoking an API key.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct RevokeKeyParams {
    /// The key to revoke.
    pub key: String,
}

/// Parameters for reading swap history.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SwapHistoryParams {
    #[serde(default)]
    pub network: Network,
    pub cid: String,
    /// Gateway domain the swaps apply to.
    pub domain: String,
}

/// Parameters for adding a swap.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct AddSwapParams {
    #[serde(default)]
    pub network: Network,
    /// CID being replaced.
    pub cid: String,
    /// CID served instead.
    pub swap_cid: String,
}

/// Parameters addressing content by CID.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CidParams {
    #[serde(default)]
    pub network: Network,
    pub cid: String,
}

/// Parameters for attaching a signature.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct AddSignatureParams {
    #[serde(default)]
    pub network: Network,
    pub cid: String,
    /// EIP-712 signature.
    pub signature: String,
    /// Address of the signer.
    pub address: String,
}

/// Parameters for uploading a local file.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadFileParams {
    /// The file:// URI (or path) of the file to upload.
    pub resource_uri: String,
    /// Network to upload to (public or private).
    #[serde(default = "private")]
    pub network: Network,
    /// Custom name for the uploaded file.
    pub name: Option<String>,
    /// Optional group ID to add file to.
    #[serde(rename = "group_id")]
    pub group_id: Option<String>,
    /// Optional metadata key-value pairs.
    pub keyvalues: Option<BTreeMap<String, String>>,
}

/// Parameters for vectorizing a file.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct VectorizeFileParams {
    pub file_id: String,
}

/// Parameters for a vector query.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct QueryVectorsParams {
    pub group_id: String,
    /// Query text.
    pub text: String,
}

/// Parameters for fetching content from the gateway.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct FetchParams {
    #[serde(default)]
    pub network: Network,
    pub cid: String,
    /// Local path to save the content to, inside an allowed directory.
    pub save_path: Option<String>,
}
