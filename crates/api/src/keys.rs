//! API key management endpoints.

use crate::{
    ApiError, PinataClient,
    client::Origin,
    types::{KeyCreate, KeyQuery},
};
use reqwest::Method;
use serde_json::Value;

impl PinataClient {
    pub async fn list_keys(&self, query: &KeyQuery) -> Result<Value, ApiError> {
        let request = self
            .request(Method::GET, Origin::Api, "pinata/keys")?
            .query(query);
        self.send("list API keys", request).await
    }

    pub async fn create_key(&self, key: &KeyCreate) -> Result<Value, ApiError> {
        let request = self
            .request(Method::POST, Origin::Api, "pinata/keys")?
            .json(key);
        self.send("create API key", request).await
    }

    pub async fn revoke_key(&self, key: &str) -> Result<Value, ApiError> {
        self.call("revoke API key", Method::PUT, &format!("pinata/keys/{key}"))
            .await
    }
}
