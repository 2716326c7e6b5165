//! Content retrieval through the dedicated gateway.

use crate::{ApiError, Network, PinataClient};
use serde_json::Value;

/// Lifetime of the signed URL used for a single private fetch.
const FETCH_LINK_SECONDS: u64 = 30;

/// Content returned by the gateway.
#[derive(Debug, Clone)]
pub struct Fetched {
    pub url: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl PinataClient {
    /// Public URL of `cid` on the configured gateway.
    pub fn gateway_url(&self, cid: &str) -> Result<String, ApiError> {
        let gateway = self
            .config
            .gateway_origin()
            .ok_or(ApiError::MissingGateway)?;
        Ok(format!("{gateway}/ipfs/{cid}"))
    }

    /// Download `cid` from the gateway.
    ///
    /// Private content is fetched through a short-lived signed link.
    pub async fn fetch(&self, cid: &str, network: Network) -> Result<Fetched, ApiError> {
        let url = match network {
            Network::Public => self.gateway_url(cid)?,
            Network::Private => {
                let signed = self.private_download_link(cid, FETCH_LINK_SECONDS).await?;
                signed
                    .get("data")
                    .and_then(Value::as_str)
                    .map(str::to_owned)
                    .ok_or_else(|| {
                        ApiError::Unexpected("download link response has no data".into())
                    })?
            }
        };

        tracing::debug!(%url, "gateway fetch");
        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                action: "fetch from gateway",
                status,
                body,
            });
        }
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let bytes = response.bytes().await?.to_vec();
        Ok(Fetched {
            url,
            content_type,
            bytes,
        })
    }
}
