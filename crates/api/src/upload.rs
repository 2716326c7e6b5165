//! Multipart file upload.

use crate::{ApiError, Network, PinataClient, client::Origin, types::KeyValues};
use reqwest::{
    Method,
    multipart::{Form, Part},
};
use serde_json::Value;

/// A file read from disk, ready to be uploaded.
#[derive(Debug, Clone)]
pub struct Upload {
    pub bytes: Vec<u8>,
    /// File name sent in the multipart part.
    pub file_name: String,
    pub mime_type: String,
    pub network: Network,
    /// Display name stored by Pinata; defaults to the file name server side.
    pub name: Option<String>,
    pub group_id: Option<String>,
    pub keyvalues: Option<KeyValues>,
}

impl PinataClient {
    pub async fn upload(&self, upload: Upload) -> Result<Value, ApiError> {
        let part = Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(&upload.mime_type)?;
        let mut form = Form::new()
            .part("file", part)
            .text("network", upload.network.as_str());
        if let Some(name) = upload.name {
            form = form.text("name", name);
        }
        if let Some(group_id) = upload.group_id {
            form = form.text("group_id", group_id);
        }
        if let Some(keyvalues) = upload.keyvalues {
            form = form.text("keyvalues", serde_json::to_string(&keyvalues)?);
        }

        let request = self
            .request(Method::POST, Origin::Uploads, "files")?
            .multipart(form);
        self.send("upload file", request).await
    }
}

#[cfg(test)]
mod tests {
    use crate::{Network, Upload, client::tests::client};
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{header, method, path},
    };

    #[tokio::test]
    async fn sends_multipart_form() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/uploads/v3/files"))
            .and(header("authorization", "Bearer test-jwt"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"cid": "bafy"}})))
            .mount(&server)
            .await;

        let upload = Upload {
            bytes: b"a,b\n".to_vec(),
            file_name: "q1.csv".into(),
            mime_type: "text/csv".into(),
            network: Network::Private,
            name: None,
            group_id: Some("g1".into()),
            keyvalues: Some([("team".to_string(), "ops".to_string())].into()),
        };
        let data = client(&server).upload(upload).await.unwrap();
        assert_eq!(data["data"]["cid"], "bafy");

        let requests = server.received_requests().await.unwrap();
        let content_type = requests[0].headers.get("content-type").unwrap().to_str().unwrap();
        assert!(content_type.starts_with("multipart/form-data"));
        let body = String::from_utf8_lossy(&requests[0].body);
        assert!(body.contains("name=\"file\"; filename=\"q1.csv\""));
        assert!(body.contains("name=\"group_id\""));
        assert!(body.contains(r#"{"team":"ops"}"#));
        assert!(!body.contains("name=\"name\""));
    }
}
