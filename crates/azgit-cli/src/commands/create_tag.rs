//! `azgit create-tag` command - create an annotated tag on a commit.

use anyhow::Result;
use azgit_core::require_input;

use super::CreateTagArgs;
use super::utils::{self, Connection};
use crate::output;
use crate::services::TagService;

/// Run the create-tag command.
pub fn run(args: &CreateTagArgs) -> Result<()> {
    let name = require_input("name", args.name.as_deref())?;
    let commit_id = require_input("commitId", args.commit_id.as_deref())?;
    let message = utils::optional(args.message.as_ref());

    let Connection {
        client,
        project,
        repository,
    } = utils::connect(&args.repository)?;

    let rt = tokio::runtime::Runtime::new()?;
    let service = TagService::new(&client, project, repository);

    let tag = rt.block_on(service.create(name, commit_id, message))?;

    output::debug(&format!("tag object id = {}", tag.object_id));
    output::success(&format!("Created tag {} at {commit_id}", tag.name));

    Ok(())
}
