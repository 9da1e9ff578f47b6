//! Task configuration: connection settings and typed input parsing.
//!
//! Values normally come from the pipeline agent's environment. Functions that
//! read the environment take a lookup so they can be exercised without it.

use azgit_devops::MergeStrategy;

use crate::error::{Error, Result};

/// Collection URL of the running pipeline.
pub const COLLECTION_URI_ENV: &str = "SYSTEM_TEAMFOUNDATIONCOLLECTIONURI";

/// Project id of the running pipeline.
pub const PROJECT_ID_ENV: &str = "SYSTEM_TEAMPROJECTID";

/// Host used when `organization` is a bare name.
const HOSTED_URL: &str = "https://dev.azure.com";

/// Where the task connects to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Organization or collection URL.
    pub organization_url: String,

    /// Project name or id.
    pub project: String,
}

impl ConnectionConfig {
    /// Build from task inputs, falling back to the process environment.
    ///
    /// # Errors
    /// Returns [`Error::MissingEnv`] if neither input nor environment supplies a value.
    pub fn from_inputs(organization: Option<&str>, project: Option<&str>) -> Result<Self> {
        Self::from_inputs_with(organization, project, |name| std::env::var(name).ok())
    }

    /// Build from task inputs, falling back to `lookup` for environment values.
    ///
    /// `organization` may be an organization name or a full URL.
    ///
    /// # Errors
    /// Returns [`Error::MissingEnv`] if neither input nor `lookup` supplies a value.
    pub fn from_inputs_with(
        organization: Option<&str>,
        project: Option<&str>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let organization_url = match non_empty(organization) {
            Some(org) if org.starts_with("https://") || org.starts_with("http://") => {
                org.to_string()
            }
            Some(org) => format!("{HOSTED_URL}/{org}/"),
            None => required_with(COLLECTION_URI_ENV, &lookup)?,
        };

        let project = match non_empty(project) {
            Some(project) => project.to_string(),
            None => required_with(PROJECT_ID_ENV, &lookup)?,
        };

        Ok(Self {
            organization_url,
            project,
        })
    }
}

/// Read a required environment variable.
///
/// # Errors
/// Returns [`Error::MissingEnv`] if the variable is unset or empty.
pub fn required_env(name: &str) -> Result<String> {
    required_with(name, |n| std::env::var(n).ok())
}

fn required_with(name: &str, lookup: impl Fn(&str) -> Option<String>) -> Result<String> {
    lookup(name)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| Error::MissingEnv(name.to_string()))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Return the input's value, or [`Error::MissingInput`] naming it.
///
/// # Errors
/// Returns [`Error::MissingInput`] if the value is absent or blank.
pub fn require_input<'a>(name: &str, value: Option<&'a str>) -> Result<&'a str> {
    non_empty(value).ok_or_else(|| Error::MissingInput(name.to_string()))
}

/// Parse a boolean task input; accepts `true`/`false` in any case.
///
/// An empty value means the input was left blank and reads as `false`.
///
/// # Errors
/// Returns [`Error::InvalidBoolean`] for any other value.
pub fn parse_bool_input(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" | "" => Ok(false),
        _ => Err(Error::InvalidBoolean(value.to_string())),
    }
}

/// Parse the `mergeStrategy` task input.
///
/// # Errors
/// Returns [`Error::InvalidMergeStrategy`] for unknown values.
pub fn parse_merge_strategy(value: &str) -> Result<MergeStrategy> {
    match value.trim() {
        "noFastForward" => Ok(MergeStrategy::NoFastForward),
        "squash" => Ok(MergeStrategy::Squash),
        "rebase" => Ok(MergeStrategy::Rebase),
        "rebaseMerge" => Ok(MergeStrategy::RebaseMerge),
        other => Err(Error::InvalidMergeStrategy(other.to_string())),
    }
}
