//! Git endpoints: refs, pull requests and annotated tags.

use reqwest::Url;

use crate::client::{DevOpsClient, ListResponse, endpoint};
use crate::error::Result;
use crate::traits::GitApi;
use crate::types::{
    AnnotatedTag, GitRef, GitRefUpdate, GitRefUpdateResult, IdentityRef, NewAnnotatedTag,
    NewPullRequest, PullRequest, PullRequestUpdate, Reviewer,
};

const GIT_API_VERSION: &str = "6.0";
const ANNOTATED_TAGS_API_VERSION: &str = "6.0-preview.1";

impl DevOpsClient {
    fn repo_url(&self, project: &str, repo: &str, tail: &[&str]) -> Result<Url> {
        let mut segments = vec![project, "_apis", "git", "repositories", repo];
        segments.extend_from_slice(tail);
        endpoint(self.server_url(), &segments)
    }

    // === Refs ===

    /// List refs whose names start with `refs/<filter>`.
    ///
    /// # Errors
    /// Returns error if the API call fails.
    pub async fn get_refs(&self, project: &str, repo: &str, filter: &str) -> Result<Vec<GitRef>> {
        let url = self.repo_url(project, repo, &["refs"])?;
        self.get_all_pages(url, GIT_API_VERSION, &[("filter", filter)])
            .await
    }

    /// Apply ref updates; each update succeeds or fails independently.
    ///
    /// # Errors
    /// Returns error if the API call fails. Rejected updates are reported
    /// through [`GitRefUpdateResult::success`], not as errors.
    pub async fn update_refs(
        &self,
        project: &str,
        repo: &str,
        updates: &[GitRefUpdate],
    ) -> Result<Vec<GitRefUpdateResult>> {
        let url = self.repo_url(project, repo, &["refs"])?;
        let results: ListResponse<GitRefUpdateResult> =
            self.post(url, GIT_API_VERSION, updates).await?;
        Ok(results.into_vec())
    }

    // === Pull requests ===

    /// Create a pull request.
    ///
    /// # Errors
    /// Returns error if PR creation fails.
    pub async fn create_pull_request(
        &self,
        project: &str,
        repo: &str,
        pr: &NewPullRequest,
    ) -> Result<PullRequest> {
        let url = self.repo_url(project, repo, &["pullrequests"])?;
        self.post(url, GIT_API_VERSION, pr).await
    }

    /// Add reviewers to a pull request, returning the reviewers the service recorded.
    ///
    /// # Errors
    /// Returns error if the API call fails.
    pub async fn add_reviewers(
        &self,
        project: &str,
        repo: &str,
        pull_request_id: u64,
        reviewers: &[IdentityRef],
    ) -> Result<Vec<Reviewer>> {
        let id = pull_request_id.to_string();
        let url = self.repo_url(project, repo, &["pullrequests", &id, "reviewers"])?;
        let recorded: ListResponse<Reviewer> = self.post(url, GIT_API_VERSION, reviewers).await?;
        Ok(recorded.into_vec())
    }

    /// Update a pull request.
    ///
    /// # Errors
    /// Returns error if PR update fails.
    pub async fn update_pull_request(
        &self,
        project: &str,
        repo: &str,
        pull_request_id: u64,
        update: &PullRequestUpdate,
    ) -> Result<PullRequest> {
        let id = pull_request_id.to_string();
        let url = self.repo_url(project, repo, &["pullrequests", &id])?;
        self.patch(url, GIT_API_VERSION, update).await
    }

    // === Tags ===

    /// Create an annotated tag.
    ///
    /// # Errors
    /// Returns error if the tag already exists or the API call fails.
    pub async fn create_annotated_tag(
        &self,
        project: &str,
        repo: &str,
        tag: &NewAnnotatedTag,
    ) -> Result<AnnotatedTag> {
        let url = self.repo_url(project, repo, &["annotatedtags"])?;
        self.post(url, ANNOTATED_TAGS_API_VERSION, tag).await
    }
}

impl GitApi for DevOpsClient {
    async fn get_refs(&self, project: &str, repo: &str, filter: &str) -> Result<Vec<GitRef>> {
        self.get_refs(project, repo, filter).await
    }

    async fn update_refs(
        &self,
        project: &str,
        repo: &str,
        updates: &[GitRefUpdate],
    ) -> Result<Vec<GitRefUpdateResult>> {
        self.update_refs(project, repo, updates).await
    }

    async fn create_pull_request(
        &self,
        project: &str,
        repo: &str,
        pr: &NewPullRequest,
    ) -> Result<PullRequest> {
        self.create_pull_request(project, repo, pr).await
    }

    async fn add_reviewers(
        &self,
        project: &str,
        repo: &str,
        pull_request_id: u64,
        reviewers: &[IdentityRef],
    ) -> Result<Vec<Reviewer>> {
        self.add_reviewers(project, repo, pull_request_id, reviewers)
            .await
    }

    async fn update_pull_request(
        &self,
        project: &str,
        repo: &str,
        pull_request_id: u64,
        update: &PullRequestUpdate,
    ) -> Result<PullRequest> {
        self.update_pull_request(project, repo, pull_request_id, update)
            .await
    }

    async fn create_annotated_tag(
        &self,
        project: &str,
        repo: &str,
        tag: &NewAnnotatedTag,
    ) -> Result<AnnotatedTag> {
        self.create_annotated_tag(project, repo, tag).await
    }
}
