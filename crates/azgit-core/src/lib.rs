//! # azgit-core
//!
//! Task-level logic for azgit that does not talk HTTP directly: reading
//! pipeline configuration, validating ref names, parsing reviewer lists and
//! resolving reviewer names to principal ids through the directory traits
//! of `azgit-devops`.

pub mod config;
pub mod error;
pub mod identity;
pub mod ref_name;
pub mod reviewers;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use config::{
    COLLECTION_URI_ENV, ConnectionConfig, PROJECT_ID_ENV, parse_bool_input, parse_merge_strategy,
    require_input, required_env,
};
pub use error::{Error, Result};
pub use identity::{DirectOrigins, DirectoryCache, IdentityResolver, Origin, Resolution};
pub use ref_name::{RefName, validate_ref_name};
pub use reviewers::parse_reviewers;
