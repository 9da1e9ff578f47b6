//! Azure DevOps API types.

use serde::{Deserialize, Serialize};

/// Object id meaning "ref does not exist" in a ref update.
///
/// Used as `old_object_id` to create a ref and as `new_object_id` to delete one.
pub const ZERO_OBJECT_ID: &str = "0000000000000000000000000000000000000000";

// === Identities ===

/// A reference to a principal (user or group) accepted by pull-request operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityRef {
    /// Durable principal id.
    pub id: String,

    /// Display name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub display_name: String,
}

impl IdentityRef {
    /// Create a new identity reference.
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}

/// A reviewer attached to a pull request, as reported by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reviewer {
    /// Principal id.
    pub id: String,

    /// Display name.
    #[serde(default)]
    pub display_name: String,

    /// Vote (10 approved, 5 approved with suggestions, 0 none, -5 waiting, -10 rejected).
    #[serde(default)]
    pub vote: i32,

    /// Whether the reviewer is required.
    #[serde(default)]
    pub is_required: bool,
}

/// A user from the Graph directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphUser {
    /// Display name.
    #[serde(default)]
    pub display_name: String,

    /// Id of the user in its origin provider.
    #[serde(default)]
    pub origin_id: String,

    /// Graph subject descriptor.
    #[serde(default)]
    pub descriptor: String,

    /// Origin provider tag (e.g. `vsts`, `aad`, `msa`).
    #[serde(default)]
    pub origin: String,

    /// Principal name (usually the sign-in address).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub principal_name: Option<String>,

    /// Mail address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mail_address: Option<String>,
}

/// A group from the Graph directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphGroup {
    /// Display name.
    #[serde(default)]
    pub display_name: String,

    /// Id of the group in its origin provider.
    #[serde(default)]
    pub origin_id: String,

    /// Graph subject descriptor.
    #[serde(default)]
    pub descriptor: String,

    /// Origin provider tag.
    #[serde(default)]
    pub origin: String,

    /// Fully qualified group name, e.g. `[Project]\Team`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub principal_name: Option<String>,
}

/// Filters applied when listing Graph users or groups.
#[derive(Debug, Clone, Default)]
pub struct SubjectQuery {
    /// Restrict to subjects within this scope (e.g. a project descriptor).
    pub scope_descriptor: Option<String>,

    /// Restrict to these subject types (e.g. `aad`, `vss`).
    pub subject_types: Vec<String>,
}

impl SubjectQuery {
    /// Query scoped to the given descriptor.
    #[must_use]
    pub fn scoped(scope_descriptor: impl Into<String>) -> Self {
        Self {
            scope_descriptor: Some(scope_descriptor.into()),
            subject_types: Vec::new(),
        }
    }
}

// === Entitlements ===

/// License level assigned to a user or group.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccessLevel {
    pub account_license_type: Option<String>,
    pub license_display_name: Option<String>,
    pub licensing_source: Option<String>,
    pub status: Option<String>,
}

/// A user's license entitlement record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEntitlement {
    /// Entitlement id, usable as a principal id for pull-request operations.
    pub id: String,

    /// The user this entitlement belongs to.
    pub user: GraphUser,

    #[serde(default)]
    pub access_level: Option<AccessLevel>,

    #[serde(default)]
    pub date_created: Option<String>,

    #[serde(default)]
    pub last_accessed_date: Option<String>,
}

/// A group's license entitlement rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupEntitlement {
    /// Entitlement id.
    pub id: String,

    /// The group this rule applies to.
    pub group: GraphGroup,

    #[serde(default)]
    pub license_rule: Option<AccessLevel>,

    #[serde(default)]
    pub status: Option<String>,
}

// === Resource areas ===

/// Location of one logical service area.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceAreaInfo {
    /// Area id (a GUID).
    pub id: String,

    /// Area name, e.g. `graph`.
    #[serde(default)]
    pub name: String,

    /// Base URL serving this area.
    pub location_url: String,
}

/// The resource areas advertised by a server.
///
/// Hosted organizations return a list; on-premises servers return none, in which
/// case every area is served from the organization URL itself.
#[derive(Debug, Clone)]
pub enum ResourceAreas {
    /// The server routes areas to distinct base URLs.
    Areas(Vec<ResourceAreaInfo>),
    /// The server advertises no areas.
    Empty,
}

impl ResourceAreas {
    /// Build from the optional list in a service response.
    #[must_use]
    pub fn from_list(list: Option<Vec<ResourceAreaInfo>>) -> Self {
        match list {
            Some(areas) if !areas.is_empty() => Self::Areas(areas),
            _ => Self::Empty,
        }
    }

    /// Find the location URL for an area id, compared case-insensitively.
    #[must_use]
    pub fn location_of(&self, area_id: &str) -> Option<&str> {
        match self {
            Self::Areas(areas) => areas
                .iter()
                .find(|a| a.id.eq_ignore_ascii_case(area_id))
                .map(|a| a.location_url.as_str()),
            Self::Empty => None,
        }
    }
}

// === Refs ===

/// A Git ref and the object it points to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitRef {
    /// Full ref name, e.g. `refs/heads/main`.
    pub name: String,

    /// Object the ref points to.
    pub object_id: String,

    /// For annotated tags, the commit the tag object points to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peeled_object_id: Option<String>,
}

/// A compare-and-swap update of a single ref.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitRefUpdate {
    /// Full ref name.
    pub name: String,

    /// Expected current value; [`ZERO_OBJECT_ID`] if the ref must not exist yet.
    pub old_object_id: String,

    /// New value; [`ZERO_OBJECT_ID`] deletes the ref.
    pub new_object_id: String,
}

impl GitRefUpdate {
    /// Create `name` pointing at `object_id`.
    pub fn create(name: impl Into<String>, object_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            old_object_id: ZERO_OBJECT_ID.into(),
            new_object_id: object_id.into(),
        }
    }

    /// Delete `name`, expected to currently point at `current_object_id`.
    pub fn delete(name: impl Into<String>, current_object_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            old_object_id: current_object_id.into(),
            new_object_id: ZERO_OBJECT_ID.into(),
        }
    }
}

/// Outcome of one ref update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitRefUpdateResult {
    /// Ref name.
    pub name: String,

    /// Whether the update was applied.
    pub success: bool,

    /// Status reported by the service, e.g. `succeeded` or `staleOldObjectId`.
    #[serde(default)]
    pub update_status: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_object_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_object_id: Option<String>,

    /// Message from a custom ref policy, if one rejected the update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_message: Option<String>,
}

// === Pull requests ===

/// Request to create a pull request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPullRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Source ref, e.g. `refs/heads/feature`.
    pub source_ref_name: String,

    /// Target ref, e.g. `refs/heads/main`.
    pub target_ref_name: String,

    pub is_draft: bool,
}

/// Repository summary embedded in a pull request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryRef {
    pub id: String,

    #[serde(default)]
    pub name: String,

    /// Browser URL of the repository.
    #[serde(default)]
    pub web_url: Option<String>,
}

/// A pull request as returned by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequest {
    pub pull_request_id: u64,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub source_ref_name: String,

    #[serde(default)]
    pub target_ref_name: String,

    /// Status, e.g. `active`.
    #[serde(default)]
    pub status: String,

    #[serde(default)]
    pub is_draft: bool,

    /// REST URL of the pull request.
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub reviewers: Vec<Reviewer>,

    /// Principal that set auto-complete, if it is set.
    #[serde(default)]
    pub auto_complete_set_by: Option<IdentityRef>,

    #[serde(default)]
    pub completion_options: Option<CompletionOptions>,

    #[serde(default)]
    pub repository: Option<RepositoryRef>,
}

impl PullRequest {
    /// Browser URL of the pull request, falling back to the REST URL.
    #[must_use]
    pub fn web_url(&self) -> String {
        match self.repository.as_ref().and_then(|r| r.web_url.as_deref()) {
            Some(repo_url) => format!(
                "{}/pullrequest/{}",
                repo_url.trim_end_matches('/'),
                self.pull_request_id
            ),
            None => self.url.clone(),
        }
    }
}

/// Strategy used when auto-complete merges a pull request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MergeStrategy {
    /// Merge commit with no fast-forward.
    #[default]
    NoFastForward,
    /// Squash all commits into one.
    Squash,
    /// Rebase commits onto the target and fast-forward.
    Rebase,
    /// Rebase commits onto the target and create a merge commit.
    RebaseMerge,
}

/// Options applied when a pull request completes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionOptions {
    #[serde(default)]
    pub bypass_policy: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bypass_reason: Option<String>,

    #[serde(default)]
    pub delete_source_branch: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merge_commit_message: Option<String>,

    #[serde(default)]
    pub merge_strategy: MergeStrategy,

    #[serde(default)]
    pub transition_work_items: bool,
}

/// Request to update a pull request.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_complete_set_by: Option<IdentityRef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_options: Option<CompletionOptions>,
}

// === Tags ===

/// Kind of a Git object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    Commit,
    Tree,
    Blob,
    Tag,
}

/// The object an annotated tag points to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaggedObject {
    pub object_id: String,
    pub object_type: ObjectType,
}

/// Request to create an annotated tag.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAnnotatedTag {
    /// Tag name without the `refs/tags/` prefix.
    pub name: String,

    pub tagged_object: TaggedObject,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl NewAnnotatedTag {
    /// Tag pointing at a commit.
    pub fn for_commit(
        name: impl Into<String>,
        commit_id: impl Into<String>,
        message: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            tagged_object: TaggedObject {
                object_id: commit_id.into(),
                object_type: ObjectType::Commit,
            },
            message,
        }
    }
}

/// An annotated tag as returned by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedTag {
    pub name: String,

    /// Id of the tag object itself.
    pub object_id: String,

    pub tagged_object: TaggedObject,

    #[serde(default)]
    pub message: Option<String>,
}
