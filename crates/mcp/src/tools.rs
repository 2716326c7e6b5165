//! Tool implementations for the Pinata MCP server.

use crate::{PinataServer, mime, params::*};
use pinata_api::{
    PinataClient, Upload,
    types::{FileQuery, FileUpdate, GroupFields, GroupQuery, KeyCreate, KeyQuery},
};
use pinata_guard::{PathGuard, uri};
use rmcp::{handler::server::wrapper::Parameters, tool, tool_router};
use serde_json::Value;
use std::path::PathBuf;

/// Pretty-print an API response for the agent.
fn render(value: Value) -> Result<String, String> {
    serde_json::to_string_pretty(&value).map_err(|e| e.to_string())
}

#[tool_router]
impl PinataServer {
    /// Create a server over a validated sandbox and an API client.
    pub fn new(guard: PathGuard, client: PinataClient) -> Self {
        Self {
            guard,
            client,
            tool_router: Self::tool_router(),
        }
    }

    /// Turn a `file://` URI or plain path into a validated local path.
    async fn local_path(&self, reference: &str) -> Result<PathBuf, String> {
        let candidate = if reference.contains("://") {
            uri::path_from_uri(reference).map_err(|e| e.to_string())?
        } else {
            reference.to_string()
        };
        self.guard
            .validate(&candidate)
            .await
            .map_err(|e| e.to_string())
    }

    #[tool(
        name = "searchFiles",
        description = "Search for files in your Pinata account by name, CID or MIME type"
    )]
    async fn search_files(
        &self,
        Parameters(params): Parameters<SearchFilesParams>,
    ) -> Result<String, String> {
        let query = FileQuery {
            name: params.name,
            cid: params.cid,
            mime_type: params.mime_type,
            limit: params.limit,
            page_token: params.page_token,
        };
        let data = self
            .client
            .search_files(params.network, &query)
            .await
            .map_err(|e| e.to_string())?;
        render(data)
    }

    #[tool(name = "getFileById", description = "Get details of a file by its Pinata id")]
    async fn get_file_by_id(
        &self,
        Parameters(params): Parameters<FileIdParams>,
    ) -> Result<String, String> {
        let data = self
            .client
            .get_file(params.network, &params.id)
            .await
            .map_err(|e| e.to_string())?;
        render(data)
    }

    #[tool(name = "updateFile", description = "Update a file's name or key-value metadata")]
    async fn update_file(
        &self,
        Parameters(params): Parameters<UpdateFileParams>,
    ) -> Result<String, String> {
        let update = FileUpdate {
            name: params.name,
            keyvalues: params.keyvalues,
        };
        let data = self
            .client
            .update_file(params.network, &params.id, &update)
            .await
            .map_err(|e| e.to_string())?;
        render(data)
    }

    #[tool(name = "deleteFile", description = "Delete a file from Pinata")]
    async fn delete_file(
        &self,
        Parameters(params): Parameters<FileIdParams>,
    ) -> Result<String, String> {
        let data = self
            .client
            .delete_file(params.network, &params.id)
            .await
            .map_err(|e| e.to_string())?;
        render(data)
    }

    #[tool(
        name = "createPrivateDownloadLink",
        description = "Create a time-limited download link for a private file on the configured gateway"
    )]
    async fn create_private_download_link(
        &self,
        Parameters(params): Parameters<DownloadLinkParams>,
    ) -> Result<String, String> {
        let data = self
            .client
            .private_download_link(&params.cid, params.expires)
            .await
            .map_err(|e| e.to_string())?;
        render(data)
    }

    #[tool(name = "listGroups", description = "List groups, optionally filtered by name or visibility")]
    async fn list_groups(
        &self,
        Parameters(params): Parameters<ListGroupsParams>,
    ) -> Result<String, String> {
        let query = GroupQuery {
            name: params.name,
            is_public: params.is_public,
            limit: params.limit,
            page_token: params.page_token,
        };
        let data = self
            .client
            .list_groups(params.network, &query)
            .await
            .map_err(|e| e.to_string())?;
        render(data)
    }

    #[tool(name = "createGroup", description = "Create a new group")]
    async fn create_group(
        &self,
        Parameters(params): Parameters<CreateGroupParams>,
    ) -> Result<String, String> {
        let fields = GroupFields {
            name: Some(params.name),
            is_public: params.is_public,
        };
        let data = self
            .client
            .create_group(params.network, &fields)
            .await
            .map_err(|e| e.to_string())?;
        render(data)
    }

    #[tool(name = "getGroup", description = "Get details of a group by id")]
    async fn get_group(
        &self,
        Parameters(params): Parameters<GroupIdParams>,
    ) -> Result<String, String> {
        let data = self
            .client
            .get_group(params.network, &params.id)
            .await
            .map_err(|e| e.to_string())?;
        render(data)
    }

    #[tool(name = "updateGroup", description = "Rename a group or change its visibility")]
    async fn update_group(
        &self,
        Parameters(params): Parameters<UpdateGroupParams>,
    ) -> Result<String, String> {
        let fields = GroupFields {
            name: params.name,
            is_public: params.is_public,
        };
        let data = self
            .client
            .update_group(params.network, &params.id, &fields)
            .await
            .map_err(|e| e.to_string())?;
        render(data)
    }

    #[tool(name = "deleteGroup", description = "Delete a group")]
    async fn delete_group(
        &self,
        Parameters(params): Parameters<GroupIdParams>,
    ) -> Result<String, String> {
        let data = self
            .client
            .delete_group(params.network, &params.id)
            .await
            .map_err(|e| e.to_string())?;
        render(data)
    }

    #[tool(name = "addFileToGroup", description = "Add a file to a group")]
    async fn add_file_to_group(
        &self,
        Parameters(params): Parameters<GroupMemberParams>,
    ) -> Result<String, String> {
        let data = self
            .client
            .add_file_to_group(params.network, &params.group_id, &params.file_id)
            .await
            .map_err(|e| e.to_string())?;
        render(data)
    }

    #[tool(name = "removeFileFromGroup", description = "Remove a file from a group")]
    async fn remove_file_from_group(
        &self,
        Parameters(params): Parameters<GroupMemberParams>,
    ) -> Result<String, String> {
        let data = self
            .client
            .remove_file_from_group(params.network, &params.group_id, &params.file_id)
            .await
            .map_err(|e| e.to_string())?;
        render(data)
    }

    #[tool(name = "listAPIKeys", description = "List API keys on the account")]
    async fn list_api_keys(
        &self,
        Parameters(params): Parameters<ListKeysParams>,
    ) -> Result<String, String> {
        let query = KeyQuery {
            revoked: params.revoked,
            limited_use: params.limited_use,
            exhausted: params.exhausted,
            name: params.name,
            offset: params.offset,
        };
        let data = self
            .client
            .list_keys(&query)
            .await
            .map_err(|e| e.to_string())?;
        render(data)
    }

    #[tool(name = "createAPIKey", description = "Create a new API key with the given permissions")]
    async fn create_api_key(
        &self,
        Parameters(params): Parameters<CreateKeyParams>,
    ) -> Result<String, String> {
        let key = KeyCreate {
            key_name: params.key_name,
            permissions: params.permissions,
            max_uses: params.max_uses,
        };
        let data = self
            .client
            .create_key(&key)
            .await
            .map_err(|e| e.to_string())?;
        render(data)
    }

    #[tool(name = "revokeAPIKey", description = "Revoke an API key")]
    async fn revoke_api_key(
        &self,
        Parameters(params): Parameters<RevokeKeyParams>,
    ) -> Result<String, String> {
        let data = self
            .client
            .revoke_key(&params.key)
            .await
            .map_err(|e| e.to_string())?;
        render(data)
    }

    #[tool(name = "getSwapHistory", description = "Get the swap history of a CID on a gateway domain")]
    async fn get_swap_history(
        &self,
        Parameters(params): Parameters<SwapHistoryParams>,
    ) -> Result<String, String> {
        let data = self
            .client
            .swap_history(params.network, &params.cid, &params.domain)
            .await
            .map_err(|e| e.to_string())?;
        render(data)
    }

    #[tool(name = "addSwap", description = "Serve another CID in place of a CID")]
    async fn add_swap(
        &self,
        Parameters(params): Parameters<AddSwapParams>,
    ) -> Result<String, String> {
        let data = self
            .client
            .add_swap(params.network, &params.cid, &params.swap_cid)
            .await
            .map_err(|e| e.to_string())?;
        render(data)
    }

    #[tool(name = "removeSwap", description = "Remove the swap for a CID")]
    async fn remove_swap(
        &self,
        Parameters(params): Parameters<CidParams>,
    ) -> Result<String, String> {
        let data = self
            .client
            .remove_swap(params.network, &params.cid)
            .await
            .map_err(|e| e.to_string())?;
        render(data)
    }

    #[tool(name = "getSignature", description = "Get the signature attached to a CID")]
    async fn get_signature(
        &self,
        Parameters(params): Parameters<CidParams>,
    ) -> Result<String, String> {
        let data = self
            .client
            .get_signature(params.network, &params.cid)
            .await
            .map_err(|e| e.to_string())?;
        render(data)
    }

    #[tool(name = "addSignature", description = "Attach a signature to a CID")]
    async fn add_signature(
        &self,
        Parameters(params): Parameters<AddSignatureParams>,
    ) -> Result<String, String> {
        let data = self
            .client
            .add_signature(params.network, &params.cid, &params.signature, &params.address)
            .await
            .map_err(|e| e.to_string())?;
        render(data)
    }

    #[tool(name = "removeSignature", description = "Remove the signature attached to a CID")]
    async fn remove_signature(
        &self,
        Parameters(params): Parameters<CidParams>,
    ) -> Result<String, String> {
        let data = self
            .client
            .remove_signature(params.network, &params.cid)
            .await
            .map_err(|e| e.to_string())?;
        render(data)
    }

    /// Upload a local file from inside the allowed directories.
    #[tool(
        name = "uploadFile",
        description = "Upload a local file (file:// URI inside an allowed directory) to Pinata"
    )]
    async fn upload_file(
        &self,
        Parameters(params): Parameters<UploadFileParams>,
    ) -> Result<String, String> {
        let path = self.local_path(&params.resource_uri).await?;
        let meta = tokio::fs::metadata(&path)
            .await
            .map_err(|_| format!("File not found at {}. Please check the path.", path.display()))?;
        if !meta.is_file() {
            return Err(format!("{} is not a file.", path.display()));
        }
        let bytes = tokio::fs::read(&path).await.map_err(|e| e.to_string())?;

        let file_name = params.name.clone().unwrap_or_else(|| {
            path.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "file".into())
        });
        let upload = Upload {
            bytes,
            file_name,
            mime_type: mime::guess(&path).into(),
            network: params.network,
            name: params.name,
            group_id: params.group_id,
            keyvalues: params.keyvalues,
        };
        tracing::info!(path = %path.display(), network = %upload.network, "uploading file");
        let data = self
            .client
            .upload(upload)
            .await
            .map_err(|e| format!("Error uploading file: {e}"))?;
        Ok(format!("File uploaded successfully!\n\n{}", render(data)?))
    }

    #[tool(name = "vectorizeFile", description = "Vectorize a file for semantic search")]
    async fn vectorize_file(
        &self,
        Parameters(params): Parameters<VectorizeFileParams>,
    ) -> Result<String, String> {
        let data = self
            .client
            .vectorize_file(&params.file_id)
            .await
            .map_err(|e| e.to_string())?;
        render(data)
    }

    #[tool(name = "queryVectors", description = "Query the vectorized files of a group")]
    async fn query_vectors(
        &self,
        Parameters(params): Parameters<QueryVectorsParams>,
    ) -> Result<String, String> {
        let data = self
            .client
            .query_vectors(&params.group_id, &params.text)
            .await
            .map_err(|e| e.to_string())?;
        render(data)
    }

    /// Fetch content by CID, returning text inline or saving it locally.
    #[tool(
        name = "fetchFromGateway",
        description = "Fetch content by CID from the gateway. Text is returned inline; set save_path to store the content in an allowed directory"
    )]
    async fn fetch_from_gateway(
        &self,
        Parameters(params): Parameters<FetchParams>,
    ) -> Result<String, String> {
        // Validate before downloading so a rejected path costs no traffic.
        let target = match &params.save_path {
            Some(save_path) => Some(self.local_path(save_path).await?),
            None => None,
        };
        let fetched = self
            .client
            .fetch(&params.cid, params.network)
            .await
            .map_err(|e| e.to_string())?;

        if let Some(target) = target {
            tokio::fs::write(&target, &fetched.bytes)
                .await
                .map_err(|e| e.to_string())?;
            return Ok(format!(
                "Saved {} bytes from {} to {}",
                fetched.bytes.len(),
                params.cid,
                target.display()
            ));
        }

        let content_type = fetched
            .content_type
            .unwrap_or_else(|| "application/octet-stream".into());
        match String::from_utf8(fetched.bytes) {
            Ok(text) => Ok(text),
            Err(e) => Ok(format!(
                "Fetched {} bytes of {content_type} from {}; set save_path to store binary content",
                e.as_bytes().len(),
                fetched.url
            )),
        }
    }

    /// List the allowed directories this server can access.
    #[tool(
        name = "listAllowedDirectories",
        description = "List the local directories this server is allowed to access"
    )]
    async fn list_allowed_directories(&self) -> String {
        self.guard
            .roots()
            .paths()
            .iter()
            .map(|d| d.display().to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use crate::{PinataServer, params::*};
    use pinata_api::{Config, Network, PinataClient};
    use pinata_guard::{AllowedRoots, Anchor, PathGuard, uri::uri_from_path};
    use rmcp::handler::server::wrapper::Parameters;
    use serde_json::json;
    use std::{fs, path::PathBuf};
    use tempfile::TempDir;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    struct Harness {
        _tmp: TempDir,
        base: PathBuf,
        server: PinataServer,
    }

    async fn harness(mock: &MockServer, jwt: Option<&str>) -> Harness {
        let tmp = tempfile::tempdir().unwrap();
        let base = tmp.path().canonicalize().unwrap();
        fs::create_dir_all(base.join("data")).unwrap();
        fs::write(base.join("data/q1.csv"), "a,b\n").unwrap();
        fs::write(base.join("secret.txt"), "nope").unwrap();

        let anchor = Anchor::new(None, base.clone());
        let roots = AllowedRoots::establish([base.join("data")], &anchor).await.unwrap();
        let config = Config {
            jwt: jwt.map(str::to_owned),
            gateway: Some(mock.uri()),
            api_url: format!("{}/v3", mock.uri()),
            uploads_url: format!("{}/uploads/v3", mock.uri()),
        };
        let server = PinataServer::new(
            PathGuard::new(roots, anchor),
            PinataClient::new(config).unwrap(),
        );
        Harness {
            _tmp: tmp,
            base,
            server,
        }
    }

    fn upload_params(resource_uri: String) -> UploadFileParams {
        UploadFileParams {
            resource_uri,
            network: Network::Private,
            name: None,
            group_id: None,
            keyvalues: None,
        }
    }

    #[tokio::test]
    async fn search_relays_json() {
        let mock = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v3/files/public"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"files": []}})))
            .mount(&mock)
            .await;
        let h = harness(&mock, Some("jwt")).await;

        let params: SearchFilesParams = serde_json::from_value(json!({"name": "q1"})).unwrap();
        let text = h.server.search_files(Parameters(params)).await.unwrap();
        assert!(text.contains("\"files\": []"));
    }

    #[tokio::test]
    async fn missing_jwt_is_a_tool_error() {
        let mock = MockServer::start().await;
        let h = harness(&mock, None).await;
        let params: FileIdParams = serde_json::from_value(json!({"id": "f1"})).unwrap();
        let err = h.server.get_file_by_id(Parameters(params)).await.unwrap_err();
        assert_eq!(err, "PINATA_JWT environment variable is not set");
    }

    #[tokio::test]
    async fn uploads_file_inside_sandbox() {
        let mock = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/uploads/v3/files"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"cid": "bafy"}})))
            .mount(&mock)
            .await;
        let h = harness(&mock, Some("jwt")).await;

        let uri = uri_from_path(&h.base.join("data/q1.csv"));
        let text = h.server.upload_file(Parameters(upload_params(uri))).await.unwrap();
        assert!(text.starts_with("File uploaded successfully!"));
        assert!(text.contains("bafy"));
    }

    #[tokio::test]
    async fn refuses_upload_outside_sandbox() {
        let mock = MockServer::start().await;
        let h = harness(&mock, Some("jwt")).await;

        let uri = uri_from_path(&h.base.join("data/../secret.txt"));
        let err = h.server.upload_file(Parameters(upload_params(uri))).await.unwrap_err();
        assert!(err.contains("access denied"));
        assert!(mock.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn refuses_upload_of_directory() {
        let mock = MockServer::start().await;
        let h = harness(&mock, Some("jwt")).await;
        let uri = uri_from_path(&h.base.join("data"));
        let err = h.server.upload_file(Parameters(upload_params(uri))).await.unwrap_err();
        assert!(err.ends_with("is not a file."));
    }

    #[test]
    fn upload_params_default_to_private() {
        let params: UploadFileParams =
            serde_json::from_value(json!({"resourceUri": "file:///x", "group_id": "g1"})).unwrap();
        assert_eq!(params.network, Network::Private);
        assert_eq!(params.group_id.as_deref(), Some("g1"));
    }

    #[tokio::test]
    async fn fetch_saves_into_sandbox() {
        let mock = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ipfs/bafy"))
            .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
            .mount(&mock)
            .await;
        let h = harness(&mock, Some("jwt")).await;

        let save_path = h.base.join("data/hello.txt").to_string_lossy().into_owned();
        let params: FetchParams =
            serde_json::from_value(json!({"cid": "bafy", "save_path": save_path})).unwrap();
        let text = h.server.fetch_from_gateway(Parameters(params)).await.unwrap();
        assert!(text.starts_with("Saved 5 bytes"));
        assert_eq!(fs::read_to_string(h.base.join("data/hello.txt")).unwrap(), "hello");
    }

    #[tokio::test]
    async fn fetch_refuses_save_outside_sandbox() {
        let mock = MockServer::start().await;
        let h = harness(&mock, Some("jwt")).await;

        let save_path = h.base.join("escaped.txt").to_string_lossy().into_owned();
        let params: FetchParams =
            serde_json::from_value(json!({"cid": "bafy", "save_path": save_path})).unwrap();
        assert!(h.server.fetch_from_gateway(Parameters(params)).await.is_err());
        assert!(!h.base.join("escaped.txt").exists());
        assert!(mock.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn fetch_returns_text_inline() {
        let mock = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ipfs/bafy"))
            .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
            .mount(&mock)
            .await;
        let h = harness(&mock, Some("jwt")).await;

        let params: FetchParams = serde_json::from_value(json!({"cid": "bafy"})).unwrap();
        let text = h.server.fetch_from_gateway(Parameters(params)).await.unwrap();
        assert_eq!(text, "hello");
    }

    #[tokio::test]
    async fn lists_allowed_directories() {
        let mock = MockServer::start().await;
        let h = harness(&mock, None).await;
        let listing = h.server.list_allowed_directories().await;
        assert_eq!(listing, h.base.join("data").display().to_string());
    }
}
