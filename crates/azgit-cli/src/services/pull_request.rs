//! Pull request service: merge branch, pull request, reviewers and auto-complete.
//!
//! Only the merge branch and the pull request itself are required to succeed.
//! Reviewer and auto-complete failures are collected as warnings and the run
//! carries on.

use anyhow::{Context, Result};
use azgit_core::{Error, IdentityResolver, RefName};
use azgit_devops::{
    CompletionOptions, EntitlementApi, GitApi, GitRefUpdate, GraphApi, IdentityRef,
    NewPullRequest, PullRequest, PullRequestUpdate, Reviewer,
};

/// Auto-complete settings applied after the pull request is created.
#[derive(Debug, Clone)]
pub struct AutoComplete {
    /// Display name of the identity that sets auto-complete.
    pub set_by: String,
    pub options: CompletionOptions,
}

/// Everything needed to open a pull request.
#[derive(Debug, Clone)]
pub struct PullRequestConfig {
    pub source_ref: RefName,
    pub target_ref: RefName,
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_draft: bool,
    /// Branch to create from the source ref and open the pull request from.
    pub merge_branch: Option<RefName>,
    /// Reviewer display names, already split and deduplicated.
    pub reviewers: Vec<String>,
    pub auto_complete: Option<AutoComplete>,
}

/// Result of a pull request run.
#[derive(Debug)]
pub struct PullRequestOutcome {
    pub pull_request: PullRequest,
    /// Commit the merge branch was created at, if one was created.
    pub merge_branch_commit: Option<String>,
    /// Non-fatal problems, in the order they happened.
    pub warnings: Vec<String>,
}

/// Service for the pull request flow with injected dependencies.
pub struct PullRequestService<'a, G, D>
where
    G: GitApi,
    D: GraphApi + EntitlementApi,
{
    git: &'a G,
    resolver: IdentityResolver<'a, D>,
    project: String,
    repo: String,
}

impl<'a, G, D> PullRequestService<'a, G, D>
where
    G: GitApi,
    D: GraphApi + EntitlementApi,
{
    /// Create a new pull request service.
    pub const fn new(
        git: &'a G,
        resolver: IdentityResolver<'a, D>,
        project: String,
        repo: String,
    ) -> Self {
        Self {
            git,
            resolver,
            project,
            repo,
        }
    }

    /// Run the whole flow.
    ///
    /// # Errors
    /// Returns error if the merge branch or the pull request cannot be created.
    pub async fn execute(&mut self, config: &PullRequestConfig) -> Result<PullRequestOutcome> {
        let mut warnings = Vec::new();

        let (source_ref, merge_branch_commit) = match &config.merge_branch {
            Some(merge_branch) => {
                let commit = self
                    .create_merge_branch(&config.source_ref, merge_branch)
                    .await?;
                (merge_branch, Some(commit))
            }
            None => (&config.source_ref, None),
        };

        let request = NewPullRequest {
            title: config.title.clone(),
            description: config.description.clone(),
            source_ref_name: source_ref.to_string(),
            target_ref_name: config.target_ref.to_string(),
            is_draft: config.is_draft,
        };
        let pull_request = self
            .git
            .create_pull_request(&self.project, &self.repo, &request)
            .await
            .with_context(|| {
                format!(
                    "Failed to create pull request from {source_ref} into {}",
                    config.target_ref
                )
            })?;

        if !config.reviewers.is_empty() {
            if let Err(e) = self
                .add_reviewers(pull_request.pull_request_id, &config.reviewers, &mut warnings)
                .await
            {
                warnings.push(format!("Failed to add reviewers: {e:#}"));
            }
        }

        if let Some(auto_complete) = &config.auto_complete {
            if let Err(e) = self
                .set_auto_complete(pull_request.pull_request_id, auto_complete, &mut warnings)
                .await
            {
                warnings.push(format!("Failed to set auto-complete: {e:#}"));
            }
        }

        Ok(PullRequestOutcome {
            pull_request,
            merge_branch_commit,
            warnings,
        })
    }

    /// Create `merge_branch` at the current commit of `source`.
    ///
    /// Returns the commit id the branch was created at.
    async fn create_merge_branch(&self, source: &RefName, merge_branch: &RefName) -> Result<String> {
        let refs = self
            .git
            .get_refs(&self.project, &self.repo, source.filter())
            .await?;

        let commit = refs
            .iter()
            .find(|r| source == r.name.as_str())
            .map(|r| r.object_id.clone())
            .ok_or_else(|| Error::SourceRefNotFound(source.to_string()))?;

        let update = GitRefUpdate::create(merge_branch.as_str(), &commit);
        let results = self
            .git
            .update_refs(&self.project, &self.repo, &[update])
            .await?;

        match results.first() {
            Some(result) if result.success => Ok(commit),
            Some(result) => Err(Error::MergeBranchRejected {
                branch: merge_branch.to_string(),
                status: result.update_status.clone(),
            }
            .into()),
            None => Err(Error::MergeBranchRejected {
                branch: merge_branch.to_string(),
                status: "no result returned".to_string(),
            }
            .into()),
        }
    }

    async fn add_reviewers(
        &mut self,
        pull_request_id: u64,
        names: &[String],
        warnings: &mut Vec<String>,
    ) -> Result<()> {
        let resolution = self.resolver.resolve_all(names).await;
        for (name, error) in &resolution.failures {
            warnings.push(format!("Reviewer '{name}' was skipped: {error}"));
        }

        if resolution.resolved.is_empty() {
            return Ok(());
        }

        let accepted = self
            .git
            .add_reviewers(&self.project, &self.repo, pull_request_id, &resolution.resolved)
            .await?;

        warnings.extend(review_mismatches(&resolution.resolved, &accepted));
        Ok(())
    }

    async fn set_auto_complete(
        &mut self,
        pull_request_id: u64,
        auto_complete: &AutoComplete,
        warnings: &mut Vec<String>,
    ) -> Result<()> {
        let identity = self.resolver.resolve(&auto_complete.set_by).await?;

        let update = PullRequestUpdate {
            auto_complete_set_by: Some(identity),
            completion_options: Some(auto_complete.options.clone()),
        };
        let updated = self
            .git
            .update_pull_request(&self.project, &self.repo, pull_request_id, &update)
            .await?;

        if updated.auto_complete_set_by.is_none() {
            warnings.push(format!(
                "'{}' is not a valid identity to set auto-complete; the pull request was left without it",
                auto_complete.set_by
            ));
        }
        Ok(())
    }
}

/// Compare the reviewers sent with the reviewers the service recorded.
fn review_mismatches(requested: &[IdentityRef], accepted: &[Reviewer]) -> Vec<String> {
    let mut warnings = Vec::new();

    let dropped: Vec<&str> = requested
        .iter()
        .filter(|r| !accepted.iter().any(|a| a.id.eq_ignore_ascii_case(&r.id)))
        .map(|r| r.display_name.as_str())
        .collect();
    if !dropped.is_empty() {
        warnings.push(format!(
            "The service did not accept these reviewers: {}",
            dropped.join(", ")
        ));
    }

    let unexpected: Vec<String> = accepted
        .iter()
        .filter(|a| !requested.iter().any(|r| r.id.eq_ignore_ascii_case(&a.id)))
        .map(|a| {
            if a.display_name.is_empty() {
                a.id.clone()
            } else {
                format!("{} ({})", a.display_name, a.id)
            }
        })
        .collect();
    if !unexpected.is_empty() {
        warnings.push(format!(
            "The service recorded reviewers that were not requested, check these principals: {}",
            unexpected.join(", ")
        ));
    }

    warnings
}
