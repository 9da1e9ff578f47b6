//! Graph (identity directory) endpoints.

use crate::client::{DevOpsClient, endpoint};
use crate::error::Result;
use crate::traits::GraphApi;
use crate::types::{GraphGroup, GraphUser, SubjectQuery};

/// Resource area id of the Graph service.
pub const GRAPH_AREA_ID: &str = "bb1e7ec9-e901-4b68-999a-de7012b920f8";

const GRAPH_API_VERSION: &str = "6.0-preview.1";

impl DevOpsClient {
    /// List every user visible in the query's scope, across all pages.
    ///
    /// # Errors
    /// Returns error if the Graph area cannot be resolved or a page fails.
    pub async fn list_users(&self, query: &SubjectQuery) -> Result<Vec<GraphUser>> {
        self.list_subjects("users", query).await
    }

    /// List every group visible in the query's scope, across all pages.
    ///
    /// # Errors
    /// Returns error if the Graph area cannot be resolved or a page fails.
    pub async fn list_groups(&self, query: &SubjectQuery) -> Result<Vec<GraphGroup>> {
        self.list_subjects("groups", query).await
    }

    /// Resolve the Graph descriptor of a storage key (e.g. a project id).
    ///
    /// # Errors
    /// Returns error if the key is unknown or the API call fails.
    pub async fn get_descriptor(&self, storage_key: &str) -> Result<String> {
        #[derive(serde::Deserialize)]
        struct DescriptorResult {
            value: String,
        }

        let base = self.service_base_url(GRAPH_AREA_ID).await?;
        let url = endpoint(&base, &["_apis", "graph", "descriptors", storage_key])?;
        let result: DescriptorResult = self.get(url, GRAPH_API_VERSION, &[]).await?;
        Ok(result.value)
    }

    async fn list_subjects<T: serde::de::DeserializeOwned>(
        &self,
        kind: &str,
        query: &SubjectQuery,
    ) -> Result<Vec<T>> {
        let base = self.service_base_url(GRAPH_AREA_ID).await?;
        let url = endpoint(&base, &["_apis", "graph", kind])?;

        let subject_types = query.subject_types.join(",");
        let mut params = Vec::new();
        if let Some(scope) = query.scope_descriptor.as_deref() {
            params.push(("scopeDescriptor", scope));
        }
        if !subject_types.is_empty() {
            params.push(("subjectTypes", subject_types.as_str()));
        }

        self.get_all_pages(url, GRAPH_API_VERSION, &params).await
    }
}

impl GraphApi for DevOpsClient {
    async fn list_users(&self, query: &SubjectQuery) -> Result<Vec<GraphUser>> {
        self.list_users(query).await
    }

    async fn list_groups(&self, query: &SubjectQuery) -> Result<Vec<GraphGroup>> {
        self.list_groups(query).await
    }

    async fn get_descriptor(&self, storage_key: &str) -> Result<String> {
        self.get_descriptor(storage_key).await
    }
}
