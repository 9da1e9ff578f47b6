//! Tag service for creating and deleting annotated tags.

use anyhow::{Context, Result};
use azgit_core::{Error, RefName};
use azgit_devops::{AnnotatedTag, GitApi, GitRefUpdate, GitRefUpdateResult, NewAnnotatedTag};

/// Service for tag operations with injected dependencies.
pub struct TagService<'a, G: GitApi> {
    git: &'a G,
    project: String,
    repo: String,
}

impl<'a, G: GitApi> TagService<'a, G> {
    /// Create a new tag service.
    pub const fn new(git: &'a G, project: String, repo: String) -> Self {
        Self { git, project, repo }
    }

    /// Create an annotated tag `name` pointing at `commit_id`.
    ///
    /// # Errors
    /// Returns error if the name is invalid or the service rejects the tag.
    pub async fn create(
        &self,
        name: &str,
        commit_id: &str,
        message: Option<String>,
    ) -> Result<AnnotatedTag> {
        let tag_ref = RefName::tag(name)?;
        let short_name = tag_ref.filter().trim_start_matches("tags/");

        let tag = NewAnnotatedTag::for_commit(short_name, commit_id, message);
        let created = self
            .git
            .create_annotated_tag(&self.project, &self.repo, &tag)
            .await
            .with_context(|| format!("Failed to create tag \"{short_name}\" at {commit_id}"))?;

        Ok(created)
    }

    /// Delete the tag `name` by moving its ref to the zero object id.
    ///
    /// # Errors
    /// - [`Error::TagNotFound`] if `refs/tags/<name>` does not exist
    /// - [`Error::TagDeleteFailed`] if the service rejects the ref update
    pub async fn delete(&self, name: &str) -> Result<GitRefUpdateResult> {
        let tag_ref = RefName::tag(name)?;

        let refs = self
            .git
            .get_refs(&self.project, &self.repo, tag_ref.filter())
            .await?;
        let current = refs
            .into_iter()
            .find(|r| tag_ref == r.name.as_str())
            .ok_or_else(|| Error::TagNotFound(name.to_string()))?;

        let update = GitRefUpdate::delete(current.name, current.object_id);
        let mut results = self
            .git
            .update_refs(&self.project, &self.repo, &[update])
            .await?;

        match results.pop() {
            Some(result) if result.success => Ok(result),
            other => Err(Error::TagDeleteFailed {
                name: name.to_string(),
                raw: serde_json::to_string_pretty(&other)?,
            }
            .into()),
        }
    }
}
