//! Error types for azgit-devops.

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during Azure DevOps API operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The service rejected the credentials.
    #[error("Azure DevOps authentication failed - check SYSTEM_ACCESSTOKEN or AZURE_DEVOPS_EXT_PAT")]
    AuthenticationFailed,

    /// No credential was available.
    #[error("PAT or access token should be provided - set AZURE_DEVOPS_EXT_PAT or SYSTEM_ACCESSTOKEN")]
    NoToken,

    /// Resource not found or no access.
    #[error("resource not found or no access: {0}")]
    NotFound(String),

    /// The server lists resource areas, but not the one requested.
    #[error("could not find information for resource area {area} from server: {server}")]
    ResourceAreaNotFound { area: String, server: String },

    /// A URL could not be built from the configured organization.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// API error with status code.
    #[error("Azure DevOps API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    /// Network error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("failed to parse Azure DevOps response: {0}")]
    Parse(#[from] serde_json::Error),
}
