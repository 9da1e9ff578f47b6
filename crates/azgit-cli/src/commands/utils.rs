use anyhow::{Context, Result};
use azgit_core::{ConnectionConfig, require_input};
use azgit_devops::{Auth, DevOpsClient};

use super::RepositoryArgs;

/// Connection details shared by every task.
pub struct Connection {
    pub client: DevOpsClient,
    pub project: String,
    pub repository: String,
}

/// Validate repository inputs and build an authenticated client.
pub fn connect(args: &RepositoryArgs) -> Result<Connection> {
    let repository = require_input("repositoryId", args.repository_id.as_deref())?.to_string();
    let config =
        ConnectionConfig::from_inputs(args.organization.as_deref(), args.project_id.as_deref())?;

    let client = DevOpsClient::with_server_url(&Auth::auto(), &config.organization_url)
        .context("Failed to connect to Azure DevOps")?;

    Ok(Connection {
        client,
        project: config.project,
        repository,
    })
}

/// Treat blank optional inputs as absent.
pub fn optional(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}
