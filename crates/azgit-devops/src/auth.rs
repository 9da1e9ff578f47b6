//! Authentication handling for the Azure DevOps API.

use reqwest::RequestBuilder;
use secrecy::{ExposeSecret, SecretString};

use crate::error::{Error, Result};

/// Environment variable holding a personal access token.
pub const PAT_ENV_VAR: &str = "AZURE_DEVOPS_EXT_PAT";

/// Environment variable holding the pipeline's OAuth access token.
pub const ACCESS_TOKEN_ENV_VAR: &str = "SYSTEM_ACCESSTOKEN";

/// Authentication method for the Azure DevOps API.
#[derive(Debug, Clone)]
pub enum Auth {
    /// Personal access token read from an environment variable.
    PatEnvVar(String),

    /// Bearer token read from an environment variable.
    BearerEnvVar(String),

    /// A specific personal access token.
    Pat(SecretString),

    /// A specific bearer token.
    Bearer(SecretString),
}

impl Auth {
    /// Create auth from the first available method.
    ///
    /// Tries in order: `AZURE_DEVOPS_EXT_PAT`, `SYSTEM_ACCESSTOKEN`.
    #[must_use]
    pub fn auto() -> Self {
        if env_non_empty(PAT_ENV_VAR).is_some() {
            Self::PatEnvVar(PAT_ENV_VAR.into())
        } else {
            Self::BearerEnvVar(ACCESS_TOKEN_ENV_VAR.into())
        }
    }

    /// Resolve the authentication to a credential.
    ///
    /// # Errors
    /// Returns [`Error::NoToken`] if the token is missing or empty.
    pub fn resolve(&self) -> Result<Credential> {
        match self {
            Self::PatEnvVar(var) => env_non_empty(var)
                .map(|t| Credential::Pat(SecretString::from(t)))
                .ok_or(Error::NoToken),
            Self::BearerEnvVar(var) => env_non_empty(var)
                .map(|t| Credential::Bearer(SecretString::from(t)))
                .ok_or(Error::NoToken),
            Self::Pat(t) if !t.expose_secret().is_empty() => Ok(Credential::Pat(t.clone())),
            Self::Bearer(t) if !t.expose_secret().is_empty() => Ok(Credential::Bearer(t.clone())),
            Self::Pat(_) | Self::Bearer(_) => Err(Error::NoToken),
        }
    }
}

impl Default for Auth {
    fn default() -> Self {
        Self::auto()
    }
}

/// A resolved credential, attached to every request.
#[derive(Debug, Clone)]
pub enum Credential {
    /// Sent as HTTP Basic with an empty user name.
    Pat(SecretString),
    /// Sent as `Authorization: Bearer`.
    Bearer(SecretString),
}

impl Credential {
    pub(crate) fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Self::Pat(token) => request.basic_auth("", Some(token.expose_secret())),
            Self::Bearer(token) => request.bearer_auth(token.expose_secret()),
        }
    }
}

fn env_non_empty(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.trim().is_empty())
}
