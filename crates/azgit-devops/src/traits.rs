//! Trait abstractions for Azure DevOps API operations.
//!
//! These traits split the client by service so that callers can depend on
//! only what they use, and tests can substitute in-memory implementations.

use crate::{
    AnnotatedTag, GitRef, GitRefUpdate, GitRefUpdateResult, GraphGroup, GraphUser,
    GroupEntitlement, IdentityRef, NewAnnotatedTag, NewPullRequest, PullRequest,
    PullRequestUpdate, Result, Reviewer, SubjectQuery, UserEntitlement,
};

/// Git repository operations.
///
/// All methods take `project` and `repo` (names or ids) to address the repository.
pub trait GitApi: Send + Sync {
    // === Ref Operations ===

    /// List refs whose names start with `refs/<filter>`.
    fn get_refs(
        &self,
        project: &str,
        repo: &str,
        filter: &str,
    ) -> impl std::future::Future<Output = Result<Vec<GitRef>>> + Send;

    /// Apply compare-and-swap ref updates.
    fn update_refs(
        &self,
        project: &str,
        repo: &str,
        updates: &[GitRefUpdate],
    ) -> impl std::future::Future<Output = Result<Vec<GitRefUpdateResult>>> + Send;

    // === PR Operations ===

    /// Create a pull request.
    fn create_pull_request(
        &self,
        project: &str,
        repo: &str,
        pr: &NewPullRequest,
    ) -> impl std::future::Future<Output = Result<PullRequest>> + Send;

    /// Add reviewers; returns the reviewers the service recorded.
    fn add_reviewers(
        &self,
        project: &str,
        repo: &str,
        pull_request_id: u64,
        reviewers: &[IdentityRef],
    ) -> impl std::future::Future<Output = Result<Vec<Reviewer>>> + Send;

    /// Update a pull request.
    fn update_pull_request(
        &self,
        project: &str,
        repo: &str,
        pull_request_id: u64,
        update: &PullRequestUpdate,
    ) -> impl std::future::Future<Output = Result<PullRequest>> + Send;

    // === Tag Operations ===

    /// Create an annotated tag.
    fn create_annotated_tag(
        &self,
        project: &str,
        repo: &str,
        tag: &NewAnnotatedTag,
    ) -> impl std::future::Future<Output = Result<AnnotatedTag>> + Send;
}

/// Identity directory (Graph) operations.
pub trait GraphApi: Send + Sync {
    /// List all users matching the query.
    fn list_users(
        &self,
        query: &SubjectQuery,
    ) -> impl std::future::Future<Output = Result<Vec<GraphUser>>> + Send;

    /// List all groups matching the query.
    fn list_groups(
        &self,
        query: &SubjectQuery,
    ) -> impl std::future::Future<Output = Result<Vec<GraphGroup>>> + Send;

    /// Resolve the descriptor of a storage key.
    fn get_descriptor(
        &self,
        storage_key: &str,
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// License directory (Member Entitlement Management) operations.
pub trait EntitlementApi: Send + Sync {
    /// Search user entitlements, optionally filtered by user name.
    fn search_user_entitlements(
        &self,
        name: Option<&str>,
    ) -> impl std::future::Future<Output = Result<Vec<UserEntitlement>>> + Send;

    /// List group entitlement rules.
    fn list_group_entitlements(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<GroupEntitlement>>> + Send;
}
