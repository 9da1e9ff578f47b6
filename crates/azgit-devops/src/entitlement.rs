//! Member Entitlement Management (license directory) endpoints.

use crate::client::{DevOpsClient, endpoint};
use crate::error::Result;
use crate::traits::EntitlementApi;
use crate::types::{GroupEntitlement, UserEntitlement};

/// Resource area id of the Member Entitlement Management service.
pub const ENTITLEMENT_AREA_ID: &str = "68ddce18-2501-45f1-a17b-7931a9922690";

const USER_ENTITLEMENTS_API_VERSION: &str = "6.0-preview.3";
const GROUP_ENTITLEMENTS_API_VERSION: &str = "6.0-preview.1";

/// One page of user entitlements; the token for the next page is in the body.
#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct PagedGraphMemberList {
    #[serde(default)]
    members: Vec<UserEntitlement>,
    #[serde(default)]
    continuation_token: Option<String>,
}

/// OData filter matching entitlements by user name.
fn name_filter(name: &str) -> String {
    format!("name eq '{}'", name.replace('\'', "''"))
}

impl DevOpsClient {
    /// Search user entitlements, optionally filtered by name, across all pages.
    ///
    /// # Errors
    /// Returns error if the entitlement area cannot be resolved or a page fails.
    pub async fn search_user_entitlements(
        &self,
        name: Option<&str>,
    ) -> Result<Vec<UserEntitlement>> {
        let base = self.service_base_url(ENTITLEMENT_AREA_ID).await?;
        let url = endpoint(&base, &["_apis", "userentitlements"])?;
        let filter = name.map(name_filter);

        let mut members = Vec::new();
        let mut continuation: Option<String> = None;

        loop {
            let mut params = Vec::new();
            if let Some(filter) = filter.as_deref() {
                params.push(("$filter", filter));
            }
            if let Some(token) = continuation.as_deref() {
                params.push(("continuationToken", token));
            }

            let page: PagedGraphMemberList = self
                .get(url.clone(), USER_ENTITLEMENTS_API_VERSION, &params)
                .await?;
            members.extend(page.members);

            match page.continuation_token.filter(|t| !t.is_empty()) {
                Some(token) => continuation = Some(token),
                None => break,
            }
        }

        Ok(members)
    }

    /// List group entitlement rules.
    ///
    /// # Errors
    /// Returns error if the entitlement area cannot be resolved or the call fails.
    pub async fn list_group_entitlements(&self) -> Result<Vec<GroupEntitlement>> {
        let base = self.service_base_url(ENTITLEMENT_AREA_ID).await?;
        let url = endpoint(&base, &["_apis", "groupentitlements"])?;
        self.get(url, GROUP_ENTITLEMENTS_API_VERSION, &[]).await
    }
}

impl EntitlementApi for DevOpsClient {
    async fn search_user_entitlements(&self, name: Option<&str>) -> Result<Vec<UserEntitlement>> {
        self.search_user_entitlements(name).await
    }

    async fn list_group_entitlements(&self) -> Result<Vec<GroupEntitlement>> {
        self.list_group_entitlements().await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::client::tests::test_client;
    use wiremock::matchers::{method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount_areas(server: &MockServer) {
        let location = format!("{}/vsaex/org/", server.uri());
        Mock::given(method("GET"))
            .and(path("/org/_apis/resourceAreas"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "count": 1,
                "value": [{"id": ENTITLEMENT_AREA_ID, "locationUrl": location}]
            })))
            .mount(server)
            .await;
    }

    fn entitlement_json(id: &str, name: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "user": {
                "displayName": name,
                "originId": format!("aad-{id}"),
                "origin": "aad",
                "descriptor": format!("aad.{id}")
            },
            "accessLevel": {"accountLicenseType": "express", "status": "active"},
            "lastAccessedDate": "2024-01-01T00:00:00Z"
        })
    }

    #[test]
    fn test_name_filter_escapes_quotes() {
        assert_eq!(name_filter("Bob"), "name eq 'Bob'");
        assert_eq!(name_filter("O'Brien"), "name eq 'O''Brien'");
    }

    #[tokio::test]
    async fn test_search_user_entitlements_filters_and_pages() {
        let mock_server = MockServer::start().await;
        mount_areas(&mock_server).await;

        Mock::given(method("GET"))
            .and(path("/vsaex/org/_apis/userentitlements"))
            .and(query_param("$filter", "name eq 'Bob'"))
            .and(query_param("api-version", "6.0-preview.3"))
            .and(query_param_is_missing("continuationToken"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "members": [entitlement_json("e-1", "Bob")],
                "continuationToken": "more"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/vsaex/org/_apis/userentitlements"))
            .and(query_param("continuationToken", "more"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "members": [entitlement_json("e-2", "Bobby")],
                "continuationToken": null
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let members = client.search_user_entitlements(Some("Bob")).await.unwrap();

        assert_eq!(members.len(), 2);
        assert_eq!(members[0].id, "e-1");
        assert_eq!(members[0].user.display_name, "Bob");
        assert_eq!(members[1].id, "e-2");
    }

    #[tokio::test]
    async fn test_list_group_entitlements() {
        let mock_server = MockServer::start().await;
        mount_areas(&mock_server).await;

        Mock::given(method("GET"))
            .and(path("/vsaex/org/_apis/groupentitlements"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
                "id": "ge-1",
                "group": {"displayName": "Contributors", "originId": "g", "descriptor": "vssgp.g"},
                "status": "ok"
            }])))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let groups = client.list_group_entitlements().await.unwrap();

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].group.display_name, "Contributors");
    }
}
