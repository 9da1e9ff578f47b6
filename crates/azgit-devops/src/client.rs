//! Azure DevOps API client.
//!
//! Holds the HTTP transport, the organization URL and the one-shot cache of
//! resource areas. Endpoint groups live in [`crate::git`], [`crate::graph`]
//! and [`crate::entitlement`].

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tokio::sync::OnceCell;

use crate::auth::{Auth, Credential};
use crate::error::{Error, Result};
use crate::types::{ResourceAreaInfo, ResourceAreas};

/// Response header carrying the token for the next page.
const CONTINUATION_HEADER: &str = "x-ms-continuationtoken";

/// API version of the resource-area listing.
const RESOURCE_AREAS_API_VERSION: &str = "6.0-preview.1";

/// The `{ count, value }` envelope used by list endpoints.
///
/// `value` is `null` on some on-premises responses.
#[derive(serde::Deserialize)]
pub(crate) struct ListResponse<T> {
    pub value: Option<Vec<T>>,
}

impl<T> ListResponse<T> {
    pub fn into_vec(self) -> Vec<T> {
        self.value.unwrap_or_default()
    }
}

/// Azure DevOps API client bound to one organization.
pub struct DevOpsClient {
    client: Client,
    /// Organization (collection) URL, always ending in `/`.
    server_url: String,
    credential: Credential,
    resource_areas: OnceCell<ResourceAreas>,
}

impl DevOpsClient {
    /// Host of Azure DevOps Services organizations.
    pub const DEFAULT_HOST: &'static str = "https://dev.azure.com";

    /// Create a client for an organization name on Azure DevOps Services.
    ///
    /// # Errors
    /// Returns error if authentication fails.
    pub fn for_organization(auth: &Auth, organization: &str) -> Result<Self> {
        Self::with_server_url(auth, format!("{}/{organization}/", Self::DEFAULT_HOST))
    }

    /// Create a client for a full organization or collection URL.
    ///
    /// # Errors
    /// Returns error if authentication fails or the URL is not valid.
    pub fn with_server_url(auth: &Auth, server_url: impl Into<String>) -> Result<Self> {
        let credential = auth.resolve()?;

        let mut server_url = server_url.into();
        Url::parse(&server_url).map_err(|e| Error::InvalidUrl(format!("{server_url}: {e}")))?;
        if !server_url.ends_with('/') {
            server_url.push('/');
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("azgit"));

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            server_url,
            credential,
            resource_areas: OnceCell::new(),
        })
    }

    /// The organization URL this client talks to.
    #[must_use]
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    // === Resource areas ===

    /// Resolve the base URL serving a resource area.
    ///
    /// The area list is fetched once per client. Servers that advertise no
    /// areas (on-premises) serve every area from the organization URL.
    ///
    /// # Errors
    /// Returns [`Error::ResourceAreaNotFound`] if the server lists areas but
    /// not `area_id`, or an API error if the listing fails.
    pub async fn service_base_url(&self, area_id: &str) -> Result<String> {
        let areas = self
            .resource_areas
            .get_or_try_init(|| self.fetch_resource_areas())
            .await?;

        match areas {
            ResourceAreas::Empty => Ok(self.server_url.clone()),
            ResourceAreas::Areas(_) => areas
                .location_of(area_id)
                .map(str::to_string)
                .ok_or_else(|| Error::ResourceAreaNotFound {
                    area: area_id.to_string(),
                    server: self.server_url.clone(),
                }),
        }
    }

    async fn fetch_resource_areas(&self) -> Result<ResourceAreas> {
        let url = endpoint(&self.server_url, &["_apis", "resourceAreas"])?;
        let list: ListResponse<ResourceAreaInfo> = self
            .get(url, RESOURCE_AREAS_API_VERSION, &[])
            .await?;
        Ok(ResourceAreas::from_list(list.value))
    }

    // === Transport ===

    fn request(&self, builder: RequestBuilder, api_version: &str) -> RequestBuilder {
        self.credential
            .apply(builder)
            .query(&[("api-version", api_version)])
    }

    /// Make a GET request.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        url: Url,
        api_version: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let (body, _) = self.get_page(url, api_version, query).await?;
        Ok(body)
    }

    /// Make a GET request, returning the body and the continuation header.
    pub(crate) async fn get_page<T: DeserializeOwned>(
        &self,
        url: Url,
        api_version: &str,
        query: &[(&str, &str)],
    ) -> Result<(T, Option<String>)> {
        let response = self
            .request(self.client.get(url), api_version)
            .query(query)
            .send()
            .await?;

        let continuation = response
            .headers()
            .get(CONTINUATION_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(str::to_string);

        let body = handle_response(response).await?;
        Ok((body, continuation))
    }

    /// GET every page of a list endpoint that pages through the continuation header.
    pub(crate) async fn get_all_pages<T: DeserializeOwned>(
        &self,
        url: Url,
        api_version: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut continuation: Option<String> = None;

        loop {
            let mut params = query.to_vec();
            if let Some(token) = continuation.as_deref() {
                params.push(("continuationToken", token));
            }

            let (page, next): (ListResponse<T>, _) =
                self.get_page(url.clone(), api_version, &params).await?;
            items.extend(page.into_vec());

            match next {
                Some(token) => continuation = Some(token),
                None => break,
            }
        }

        Ok(items)
    }

    /// Make a POST request.
    pub(crate) async fn post<T: DeserializeOwned, B: serde::Serialize + Sync + ?Sized>(
        &self,
        url: Url,
        api_version: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .request(self.client.post(url), api_version)
            .json(body)
            .send()
            .await?;

        handle_response(response).await
    }

    /// Make a PATCH request.
    pub(crate) async fn patch<T: DeserializeOwned, B: serde::Serialize + Sync + ?Sized>(
        &self,
        url: Url,
        api_version: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .request(self.client.patch(url), api_version)
            .json(body)
            .send()
            .await?;

        handle_response(response).await
    }
}

/// Build a URL by appending path segments to `base`.
pub(crate) fn endpoint(base: &str, segments: &[&str]) -> Result<Url> {
    let mut url = Url::parse(base).map_err(|e| Error::InvalidUrl(format!("{base}: {e}")))?;
    url.path_segments_mut()
        .map_err(|()| Error::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Handle API response.
async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();

    if status.is_success() {
        let body = response.json().await?;
        return Ok(body);
    }

    let status_code = status.as_u16();
    match status_code {
        401 => Err(Error::AuthenticationFailed),
        404 => Err(Error::NotFound(response.url().path().to_string())),
        _ => {
            let text = response.text().await.unwrap_or_default();
            Err(Error::ApiError {
                status: status_code,
                message: api_message(&text),
            })
        }
    }
}

/// Extract `message` from an Azure DevOps error body, or return the body as-is.
fn api_message(body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct ApiErrorBody {
        message: String,
    }

    serde_json::from_str::<ApiErrorBody>(body).map_or_else(|_| body.to_string(), |e| e.message)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;
    use crate::types::GitRefUpdateResult;
    use secrecy::SecretString;
    use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Create a test client pointing to the mock server.
    pub fn test_client(base_url: &str) -> DevOpsClient {
        let auth = Auth::Bearer(SecretString::from("test-token"));
        DevOpsClient::with_server_url(&auth, format!("{base_url}/org/")).unwrap()
    }

    #[test]
    fn test_list_response_without_value_is_empty() {
        let missing: ListResponse<GitRefUpdateResult> =
            serde_json::from_str(r#"{"count":0}"#).unwrap();
        let null: ListResponse<GitRefUpdateResult> =
            serde_json::from_str(r#"{"count":0,"value":null}"#).unwrap();

        assert!(missing.into_vec().is_empty());
        assert!(null.into_vec().is_empty());
    }

    #[test]
    fn test_server_url_gets_trailing_slash() {
        let auth = Auth::Bearer(SecretString::from("t"));
        let client = DevOpsClient::with_server_url(&auth, "https://tfs.example.com/tfs/Default")
            .unwrap();
        assert_eq!(client.server_url(), "https://tfs.example.com/tfs/Default/");
    }

    #[test]
    fn test_for_organization_builds_hosted_url() {
        let auth = Auth::Bearer(SecretString::from("t"));
        let client = DevOpsClient::for_organization(&auth, "contoso").unwrap();
        assert_eq!(client.server_url(), "https://dev.azure.com/contoso/");
    }

    #[test]
    fn test_invalid_server_url() {
        let auth = Auth::Bearer(SecretString::from("t"));
        let result = DevOpsClient::with_server_url(&auth, "not a url");
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let client = test_client("https://example.com");
        let url = endpoint(client.server_url(), &["My Project", "_apis"]).unwrap();
        assert_eq!(url.as_str(), "https://example.com/org/My%20Project/_apis");
    }

    #[test]
    fn test_api_message_extraction() {
        assert_eq!(
            api_message(r#"{"message":"TF401019: repo missing","typeKey":"X"}"#),
            "TF401019: repo missing"
        );
        assert_eq!(api_message("plain text"), "plain text");
    }

    // === Resource area tests ===

    #[tokio::test]
    async fn test_service_base_url_from_areas() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/org/_apis/resourceAreas"))
            .and(header("authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "count": 2,
                "value": [
                    {"id": "bb1e7ec9-e901-4b68-999a-de7012b920f8", "name": "Graph",
                     "locationUrl": "https://vssps.example.com/org/"},
                    {"id": "68ddce18-2501-45f1-a17b-7931a9922690", "name": "MemberEntitlementManagement",
                     "locationUrl": "https://vsaex.example.com/org/"}
                ]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let graph = client
            .service_base_url("BB1E7EC9-E901-4B68-999A-DE7012B920F8")
            .await
            .unwrap();
        let entitlements = client
            .service_base_url("68ddce18-2501-45f1-a17b-7931a9922690")
            .await
            .unwrap();

        assert_eq!(graph, "https://vssps.example.com/org/");
        assert_eq!(entitlements, "https://vsaex.example.com/org/");
        // `expect(1)` verifies the listing was fetched only once on drop.
    }

    #[tokio::test]
    async fn test_service_base_url_on_prem_falls_back_to_server() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/org/_apis/resourceAreas"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"count": 0, "value": null})),
            )
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let url = client.service_base_url("anything").await.unwrap();

        assert_eq!(url, format!("{}/org/", mock_server.uri()));
    }

    #[tokio::test]
    async fn test_service_base_url_missing_area() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/org/_apis/resourceAreas"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "count": 1,
                "value": [{"id": "aaaa", "name": "Other", "locationUrl": "https://x/"}]
            })))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let err = client.service_base_url("bbbb").await.unwrap_err();

        assert!(matches!(err, Error::ResourceAreaNotFound { ref area, .. } if area == "bbbb"));
        assert!(err.to_string().contains("/org/"));
    }

    // === Pagination tests ===

    #[tokio::test]
    async fn test_get_all_pages_follows_continuation_header() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/org/_apis/things"))
            .and(query_param_is_missing("continuationToken"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("X-MS-ContinuationToken", "page2")
                    .set_body_json(serde_json::json!({"count": 2, "value": [1, 2]})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/org/_apis/things"))
            .and(query_param("continuationToken", "page2"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"count": 1, "value": [3]})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let url = endpoint(client.server_url(), &["_apis", "things"]).unwrap();
        let items: Vec<u32> = client.get_all_pages(url, "6.0", &[]).await.unwrap();

        assert_eq!(items, vec![1, 2, 3]);
    }

    // === Error mapping tests ===

    #[tokio::test]
    async fn test_unauthorized_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/org/_apis/resourceAreas"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let result = client.service_base_url("x").await;

        assert!(matches!(result, Err(Error::AuthenticationFailed)));
    }

    #[tokio::test]
    async fn test_api_error_carries_service_message() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/org/_apis/resourceAreas"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "message": "bad request"
            })))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let err = client.service_base_url("x").await.unwrap_err();

        assert!(matches!(err, Error::ApiError { status: 400, ref message } if message == "bad request"));
    }
}
