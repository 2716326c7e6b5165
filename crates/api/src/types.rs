//! Request shapes shared by the client and the MCP tool parameters.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

/// Storage tier a file or group lives in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Public,
    Private,
}

impl Network {
    pub fn as_str(self) -> &'static str {
        match self {
            Network::Public => "public",
            Network::Private => "private",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filters for listing files.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

/// Body for updating a file's name or metadata.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyvalues: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Body for signing a time-limited private download URL.
#[derive(Debug, Clone, Serialize)]
pub struct DownloadLink {
    pub url: String,
    /// Lifetime in seconds.
    pub expires: u64,
    /// Signing time, seconds since the Unix epoch.
    pub date: i64,
    pub method: String,
}

/// Filters for listing groups.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

/// Body for creating or updating a group.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GroupFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
}

/// Filters for listing API keys.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revoked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limited_use: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exhausted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

/// Body for creating an API key.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyCreate {
    pub key_name: String,
    pub permissions: KeyPermissions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_uses: Option<u32>,
}

/// Scopes granted to a new API key.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct KeyPermissions {
    /// Grant full admin access.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin: Option<bool>,
    /// Per-endpoint grants.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoints: Option<KeyEndpoints>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct KeyEndpoints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<DataEndpoints>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinning: Option<PinningEndpoints>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DataEndpoints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin_list: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_pinned_data_total: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PinningEndpoints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash_metadata: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash_pin_policy: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin_by_hash: Option<bool>,
    #[serde(
        default,
        rename = "pinFileToIPFS",
        skip_serializing_if = "Option::is_none"
    )]
    pub pin_file_to_ipfs: Option<bool>,
    #[serde(
        default,
        rename = "pinJSONToIPFS",
        skip_serializing_if = "Option::is_none"
    )]
    pub pin_json_to_ipfs: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin_jobs: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unpin: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_pin_policy: Option<bool>,
}

/// String metadata attached to an upload.
pub type KeyValues = BTreeMap<String, String>;

#[cfg(test)]
mod tests {
    use crate::types::{KeyPermissions, Network, PinningEndpoints};

    #[test]
    fn network_wire_form() {
        assert_eq!(serde_json::to_string(&Network::Private).unwrap(), "\"private\"");
        assert_eq!(Network::default().to_string(), "public");
    }

    #[test]
    fn pinning_scopes_keep_ipfs_casing() {
        let perms: KeyPermissions = serde_json::from_str(
            r#"{"endpoints":{"pinning":{"pinFileToIPFS":true,"pinByHash":false}}}"#,
        )
        .unwrap();
        let pinning: &PinningEndpoints = perms.endpoints.as_ref().unwrap().pinning.as_ref().unwrap();
        assert_eq!(pinning.pin_file_to_ipfs, Some(true));
        assert_eq!(
            serde_json::to_value(&perms).unwrap(),
            serde_json::json!({"endpoints":{"pinning":{"pinFileToIPFS":true,"pinByHash":false}}})
        );
    }
}
