//! Vector search endpoints, served from the uploads origin.

use crate::{ApiError, PinataClient, client::Origin};
use reqwest::Method;
use serde_json::{Value, json};

impl PinataClient {
    /// Generate embeddings for a file so its group can be queried.
    pub async fn vectorize_file(&self, file_id: &str) -> Result<Value, ApiError> {
        let request = self.request(
            Method::POST,
            Origin::Uploads,
            &format!("vectorize/files/{file_id}"),
        )?;
        self.send("vectorize file", request).await
    }

    /// Semantic search over the vectorized files of a group.
    pub async fn query_vectors(&self, group_id: &str, text: &str) -> Result<Value, ApiError> {
        let request = self
            .request(
                Method::POST,
                Origin::Uploads,
                &format!("vectorize/groups/{group_id}/query"),
            )?
            .json(&json!({ "text": text }));
        self.send("query vectors", request).await
    }
}
