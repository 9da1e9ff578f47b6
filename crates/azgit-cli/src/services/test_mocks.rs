//! Mock implementations for testing services.
//!
//! These mocks implement the traits from azgit-devops to enable unit testing
//! of service logic without an Azure DevOps organization. The directory mock
//! is shared with azgit-core.
#![allow(clippy::unwrap_used)]

use std::sync::Mutex;

use azgit_devops::{
    AnnotatedTag, Error, GitApi, GitRef, GitRefUpdate, GitRefUpdateResult, IdentityRef,
    NewAnnotatedTag, NewPullRequest, PullRequest, PullRequestUpdate, Result, Reviewer,
};

pub use azgit_core::testing::MockDirectory;

/// A call made against [`MockGit`], in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitCall {
    GetRefs(String),
    UpdateRefs(Vec<GitRefUpdate>),
    CreatePullRequest,
    AddReviewers,
    UpdatePullRequest,
    CreateAnnotatedTag,
}

fn api_error(message: &str) -> Error {
    Error::ApiError {
        status: 400,
        message: message.to_string(),
    }
}

/// Mock implementation of `GitApi` for testing.
#[derive(Default)]
pub struct MockGit {
    refs: Vec<GitRef>,
    rejected_status: Option<String>,
    accepted_reviewers: Option<Vec<String>>,
    fail_pull_request: bool,
    fail_reviewers: bool,
    fail_tags: bool,
    ignore_auto_complete: bool,
    calls: Mutex<Vec<GitCall>>,
    pull_requests: Mutex<Vec<NewPullRequest>>,
    reviewers: Mutex<Vec<IdentityRef>>,
    updates: Mutex<Vec<PullRequestUpdate>>,
    tags: Mutex<Vec<NewAnnotatedTag>>,
}

impl MockGit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ref(mut self, name: &str, object_id: &str) -> Self {
        self.refs.push(GitRef {
            name: name.to_string(),
            object_id: object_id.to_string(),
            peeled_object_id: None,
        });
        self
    }

    /// Every ref update comes back unsuccessful with `status`.
    pub fn with_rejected_ref_updates(mut self, status: &str) -> Self {
        self.rejected_status = Some(status.to_string());
        self
    }

    /// Only these ids are recorded when reviewers are added.
    pub fn with_accepted_reviewers(mut self, ids: &[&str]) -> Self {
        self.accepted_reviewers = Some(ids.iter().map(ToString::to_string).collect());
        self
    }

    pub const fn with_failing_pull_request(mut self) -> Self {
        self.fail_pull_request = true;
        self
    }

    pub const fn with_failing_reviewers(mut self) -> Self {
        self.fail_reviewers = true;
        self
    }

    pub const fn with_failing_tags(mut self) -> Self {
        self.fail_tags = true;
        self
    }

    /// Updates succeed but the returned pull request has no auto-complete identity.
    pub const fn with_auto_complete_ignored(mut self) -> Self {
        self.ignore_auto_complete = true;
        self
    }

    pub fn calls(&self) -> Vec<GitCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn created_pull_requests(&self) -> Vec<NewPullRequest> {
        self.pull_requests.lock().unwrap().clone()
    }

    pub fn added_reviewers(&self) -> Vec<IdentityRef> {
        self.reviewers.lock().unwrap().clone()
    }

    pub fn pull_request_updates(&self) -> Vec<PullRequestUpdate> {
        self.updates.lock().unwrap().clone()
    }

    pub fn created_tags(&self) -> Vec<NewAnnotatedTag> {
        self.tags.lock().unwrap().clone()
    }

    fn record(&self, call: GitCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn pull_request(source: &str, target: &str) -> PullRequest {
        PullRequest {
            pull_request_id: 1,
            title: "Feature".to_string(),
            source_ref_name: source.to_string(),
            target_ref_name: target.to_string(),
            status: "active".to_string(),
            is_draft: false,
            url: "https://dev.azure.com/org/proj/_apis/git/repositories/repo/pullRequests/1"
                .to_string(),
            reviewers: Vec::new(),
            auto_complete_set_by: None,
            completion_options: None,
            repository: None,
        }
    }
}

impl GitApi for MockGit {
    async fn get_refs(&self, _project: &str, _repo: &str, filter: &str) -> Result<Vec<GitRef>> {
        self.record(GitCall::GetRefs(filter.to_string()));
        let prefix = format!("refs/{filter}");
        Ok(self
            .refs
            .iter()
            .filter(|r| r.name.starts_with(&prefix))
            .cloned()
            .collect())
    }

    async fn update_refs(
        &self,
        _project: &str,
        _repo: &str,
        updates: &[GitRefUpdate],
    ) -> Result<Vec<GitRefUpdateResult>> {
        self.record(GitCall::UpdateRefs(updates.to_vec()));
        Ok(updates
            .iter()
            .map(|u| GitRefUpdateResult {
                name: u.name.clone(),
                success: self.rejected_status.is_none(),
                update_status: self
                    .rejected_status
                    .clone()
                    .unwrap_or_else(|| "succeeded".to_string()),
                old_object_id: Some(u.old_object_id.clone()),
                new_object_id: Some(u.new_object_id.clone()),
                custom_message: None,
            })
            .collect())
    }

    async fn create_pull_request(
        &self,
        _project: &str,
        _repo: &str,
        pr: &NewPullRequest,
    ) -> Result<PullRequest> {
        self.record(GitCall::CreatePullRequest);
        if self.fail_pull_request {
            return Err(api_error("TF401179: An active pull request already exists"));
        }
        self.pull_requests.lock().unwrap().push(pr.clone());
        Ok(Self::pull_request(&pr.source_ref_name, &pr.target_ref_name))
    }

    async fn add_reviewers(
        &self,
        _project: &str,
        _repo: &str,
        _pull_request_id: u64,
        reviewers: &[IdentityRef],
    ) -> Result<Vec<Reviewer>> {
        self.record(GitCall::AddReviewers);
        if self.fail_reviewers {
            return Err(api_error("reviewer service unavailable"));
        }
        self.reviewers.lock().unwrap().extend_from_slice(reviewers);
        Ok(reviewers
            .iter()
            .filter(|r| {
                self.accepted_reviewers
                    .as_ref()
                    .is_none_or(|ids| ids.contains(&r.id))
            })
            .map(|r| Reviewer {
                id: r.id.clone(),
                display_name: r.display_name.clone(),
                vote: 0,
                is_required: false,
            })
            .collect())
    }

    async fn update_pull_request(
        &self,
        _project: &str,
        _repo: &str,
        _pull_request_id: u64,
        update: &PullRequestUpdate,
    ) -> Result<PullRequest> {
        self.record(GitCall::UpdatePullRequest);
        self.updates.lock().unwrap().push(update.clone());
        let mut pr = Self::pull_request("refs/heads/feature", "refs/heads/main");
        if !self.ignore_auto_complete {
            pr.auto_complete_set_by.clone_from(&update.auto_complete_set_by);
            pr.completion_options.clone_from(&update.completion_options);
        }
        Ok(pr)
    }

    async fn create_annotated_tag(
        &self,
        _project: &str,
        _repo: &str,
        tag: &NewAnnotatedTag,
    ) -> Result<AnnotatedTag> {
        self.record(GitCall::CreateAnnotatedTag);
        if self.fail_tags {
            return Err(api_error("TF401289: The ref already exists"));
        }
        self.tags.lock().unwrap().push(tag.clone());
        Ok(AnnotatedTag {
            name: tag.name.clone(),
            object_id: "7a9b000000000000000000000000000000000000".to_string(),
            tagged_object: tag.tagged_object.clone(),
            message: tag.message.clone(),
        })
    }
}
