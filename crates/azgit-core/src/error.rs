//! Error types for azgit-core.

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in azgit-core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required environment variable is missing or empty.
    #[error("environment variable \"{0}\" is not set")]
    MissingEnv(String),

    /// A required task input is missing or empty.
    #[error("input required: {0}")]
    MissingInput(String),

    /// Merge strategy input is not one of the known values.
    #[error("'{0}' is not a valid merge strategy")]
    InvalidMergeStrategy(String),

    /// Boolean input is not `true` or `false`.
    #[error("'{0}' is not a valid boolean - expected true or false")]
    InvalidBoolean(String),

    /// Invalid ref name.
    #[error("invalid ref name '{name}': {reason}")]
    InvalidRefName {
        /// The invalid name.
        name: String,
        /// Why the name is invalid.
        reason: String,
    },

    /// No group or user in the identity directory has this display name.
    #[error("no user or group named '{0}' was found")]
    IdentityNotFound(String),

    /// The user exists but no license entitlement carries its name.
    #[error("'{0}' has no license entitlement usable as a reviewer identity")]
    EntitlementNotFound(String),

    /// A Graph listing failed. The failure is reported again, unrefetched, for
    /// every later lookup in the run.
    #[error("the {directory} directory could not be listed: {message}")]
    DirectoryUnavailable {
        directory: &'static str,
        message: String,
    },

    /// The entitlement directory could not be queried.
    #[error("entitlement lookup for '{name}' failed: {source}")]
    EntitlementLookup {
        name: String,
        #[source]
        source: azgit_devops::Error,
    },

    /// The source ref of a merge branch does not exist.
    #[error("source ref '{0}' was not found")]
    SourceRefNotFound(String),

    /// The service rejected creation of the merge branch.
    #[error("failed to create {branch} branch ({status})")]
    MergeBranchRejected { branch: String, status: String },

    /// Tag to delete does not exist.
    #[error("\"{0}\" doesn't exist.")]
    TagNotFound(String),

    /// The service rejected deletion of the tag ref.
    #[error("failed to delete tag \"{name}\"")]
    TagDeleteFailed {
        name: String,
        /// The ref update result as returned by the service, for diagnostics.
        raw: String,
    },

    /// Azure DevOps API error.
    #[error(transparent)]
    DevOps(#[from] azgit_devops::Error),
}
