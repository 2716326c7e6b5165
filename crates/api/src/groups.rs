//! Group and group membership endpoints.

use crate::{
    ApiError, Network, PinataClient,
    client::Origin,
    types::{GroupFields, GroupQuery},
};
use reqwest::Method;
use serde_json::Value;

impl PinataClient {
    pub async fn list_groups(&self, network: Network, query: &GroupQuery) -> Result<Value, ApiError> {
        let request = self
            .request(Method::GET, Origin::Api, &format!("groups/{network}"))?
            .query(query);
        self.send("list groups", request).await
    }

    pub async fn create_group(&self, network: Network, fields: &GroupFields) -> Result<Value, ApiError> {
        let request = self
            .request(Method::POST, Origin::Api, &format!("groups/{network}"))?
            .json(fields);
        self.send("create group", request).await
    }

    pub async fn get_group(&self, network: Network, id: &str) -> Result<Value, ApiError> {
        self.call("get group", Method::GET, &format!("groups/{network}/{id}"))
            .await
    }

    pub async fn update_group(
        &self,
        network: Network,
        id: &str,
        fields: &GroupFields,
    ) -> Result<Value, ApiError> {
        let request = self
            .request(Method::PUT, Origin::Api, &format!("groups/{network}/{id}"))?
            .json(fields);
        self.send("update group", request).await
    }

    pub async fn delete_group(&self, network: Network, id: &str) -> Result<Value, ApiError> {
        self.call("delete group", Method::DELETE, &format!("groups/{network}/{id}"))
            .await
    }

    pub async fn add_file_to_group(
        &self,
        network: Network,
        group_id: &str,
        file_id: &str,
    ) -> Result<Value, ApiError> {
        self.call(
            "add file to group",
            Method::PUT,
            &format!("groups/{network}/{group_id}/ids/{file_id}"),
        )
        .await
    }

    pub async fn remove_file_from_group(
        &self,
        network: Network,
        group_id: &str,
        file_id: &str,
    ) -> Result<Value, ApiError> {
        self.call(
            "remove file from group",
            Method::DELETE,
            &format!("groups/{network}/{group_id}/ids/{file_id}"),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Network,
        client::tests::client,
        types::{GroupFields, GroupQuery},
    };
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_json, method, path, query_param},
    };

    #[tokio::test]
    async fn list_groups_uses_camel_case_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v3/groups/public"))
            .and(query_param("isPublic", "false"))
            .and(query_param("pageToken", "next"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"groups": []}})))
            .mount(&server)
            .await;

        let query = GroupQuery {
            is_public: Some(false),
            page_token: Some("next".into()),
            ..Default::default()
        };
        client(&server).list_groups(Network::Public, &query).await.unwrap();
    }

    #[tokio::test]
    async fn create_group_omits_unset_visibility() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v3/groups/private"))
            .and(body_json(json!({"name": "reports"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"id": "g1"}})))
            .mount(&server)
            .await;

        let fields = GroupFields {
            name: Some("reports".into()),
            is_public: None,
        };
        let data = client(&server)
            .create_group(Network::Private, &fields)
            .await
            .unwrap();
        assert_eq!(data["data"]["id"], "g1");
    }

    #[tokio::test]
    async fn membership_paths() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/v3/groups/public/g1/ids/f1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(""))
            .mount(&server)
            .await;

        let data = client(&server)
            .add_file_to_group(Network::Public, "g1", "f1")
            .await
            .unwrap();
        assert!(data.is_null());
    }
}
