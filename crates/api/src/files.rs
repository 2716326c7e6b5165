//! File, swap and signature endpoints.

use crate::{
    ApiError, Network, PinataClient,
    client::Origin,
    types::{DownloadLink, FileQuery, FileUpdate},
};
use reqwest::Method;
use serde_json::{Value, json};

impl PinataClient {
    /// Search files by name, CID or MIME type.
    pub async fn search_files(&self, network: Network, query: &FileQuery) -> Result<Value, ApiError> {
        let request = self
            .request(Method::GET, Origin::Api, &format!("files/{network}"))?
            .query(query);
        self.send("search files", request).await
    }

    pub async fn get_file(&self, network: Network, id: &str) -> Result<Value, ApiError> {
        self.call("get file", Method::GET, &format!("files/{network}/{id}"))
            .await
    }

    /// Rename a file or replace its key-value metadata.
    pub async fn update_file(
        &self,
        network: Network,
        id: &str,
        update: &FileUpdate,
    ) -> Result<Value, ApiError> {
        let request = self
            .request(Method::PUT, Origin::Api, &format!("files/{network}/{id}"))?
            .json(update);
        self.send("update file", request).await
    }

    pub async fn delete_file(&self, network: Network, id: &str) -> Result<Value, ApiError> {
        self.call("delete file", Method::DELETE, &format!("files/{network}/{id}"))
            .await
    }

    /// Sign a time-limited download URL for private content.
    pub async fn create_download_link(&self, link: &DownloadLink) -> Result<Value, ApiError> {
        let request = self
            .request(Method::POST, Origin::Api, "files/private/download_link")?
            .json(link);
        self.send("create download link", request).await
    }

    /// Sign a download URL for `cid` on the configured gateway, valid for
    /// `expires` seconds from now.
    pub async fn private_download_link(&self, cid: &str, expires: u64) -> Result<Value, ApiError> {
        let gateway = self.config.gateway_origin().ok_or(ApiError::MissingGateway)?;
        let link = DownloadLink {
            url: format!("{gateway}/files/{cid}"),
            expires,
            date: chrono::Utc::now().timestamp(),
            method: "GET".into(),
        };
        self.create_download_link(&link).await
    }

    /// List the swap records that replaced `cid` on a gateway domain.
    pub async fn swap_history(
        &self,
        network: Network,
        cid: &str,
        domain: &str,
    ) -> Result<Value, ApiError> {
        let request = self
            .request(Method::GET, Origin::Api, &format!("files/{network}/swap/{cid}"))?
            .query(&[("domain", domain)]);
        self.send("get swap history", request).await
    }

    /// Serve `swap_cid` in place of `cid`.
    pub async fn add_swap(&self, network: Network, cid: &str, swap_cid: &str) -> Result<Value, ApiError> {
        let request = self
            .request(Method::PUT, Origin::Api, &format!("files/{network}/swap/{cid}"))?
            .json(&json!({ "swap_cid": swap_cid }));
        self.send("add swap", request).await
    }

    pub async fn remove_swap(&self, network: Network, cid: &str) -> Result<Value, ApiError> {
        self.call("remove swap", Method::DELETE, &format!("files/{network}/swap/{cid}"))
            .await
    }

    pub async fn get_signature(&self, network: Network, cid: &str) -> Result<Value, ApiError> {
        self.call("get signature", Method::GET, &format!("files/{network}/signature/{cid}"))
            .await
    }

    /// Attach an EIP-712 signature made by `address` to `cid`.
    pub async fn add_signature(
        &self,
        network: Network,
        cid: &str,
        signature: &str,
        address: &str,
    ) -> Result<Value, ApiError> {
        let request = self
            .request(Method::POST, Origin::Api, &format!("files/{network}/signature/{cid}"))?
            .json(&json!({ "signature": signature, "address": address }));
        self.send("add signature", request).await
    }

    pub async fn remove_signature(&self, network: Network, cid: &str) -> Result<Value, ApiError> {
        self.call(
            "remove signature",
            Method::DELETE,
            &format!("files/{network}/signature/{cid}"),
        )
        .await
    }
}
