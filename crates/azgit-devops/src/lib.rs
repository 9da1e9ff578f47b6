//! # azgit-devops
//!
//! Azure DevOps REST integration for azgit: Git refs, pull requests and
//! annotated tags, plus the Graph and Member Entitlement directories used to
//! turn reviewer names into principal ids.
//!
//! # Security
//!
//! Tokens are stored using `SecretString` which automatically zeroizes memory
//! when dropped, reducing credential exposure in memory dumps.

mod auth;
mod client;
mod entitlement;
mod error;
mod git;
mod graph;
mod traits;
mod types;

pub use auth::{ACCESS_TOKEN_ENV_VAR, Auth, Credential, PAT_ENV_VAR};
pub use client::DevOpsClient;
pub use entitlement::ENTITLEMENT_AREA_ID;
pub use error::{Error, Result};
pub use graph::GRAPH_AREA_ID;
// Re-export SecretString for constructing Auth::Pat / Auth::Bearer
pub use secrecy::SecretString;
pub use traits::{EntitlementApi, GitApi, GraphApi};
pub use types::{
    AccessLevel, AnnotatedTag, CompletionOptions, GitRef, GitRefUpdate, GitRefUpdateResult,
    GraphGroup, GraphUser, GroupEntitlement, IdentityRef, MergeStrategy, NewAnnotatedTag,
    NewPullRequest, ObjectType, PullRequest, PullRequestUpdate, RepositoryRef, ResourceAreaInfo,
    ResourceAreas, Reviewer, SubjectQuery, TaggedObject, UserEntitlement, ZERO_OBJECT_ID,
};
