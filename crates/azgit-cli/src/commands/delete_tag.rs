//! `azgit delete-tag` command - delete an annotated tag.

use anyhow::Result;
use azgit_core::{Error, require_input};

use super::DeleteTagArgs;
use super::utils::{self, Connection};
use crate::output;
use crate::services::TagService;

/// Run the delete-tag command.
pub fn run(args: &DeleteTagArgs) -> Result<()> {
    let name = require_input("name", args.name.as_deref())?;

    let Connection {
        client,
        project,
        repository,
    } = utils::connect(&args.repository)?;

    let rt = tokio::runtime::Runtime::new()?;
    let service = TagService::new(&client, project, repository);

    match rt.block_on(service.delete(name)) {
        Ok(result) => {
            output::success(&format!("Deleted tag {name}"));
            output::debug(&format!("{} -> {}", result.name, result.update_status));
            Ok(())
        }
        Err(e) => {
            if let Some(Error::TagDeleteFailed { raw, .. }) = e.downcast_ref::<Error>() {
                output::diagnostic(raw);
            }
            Err(e)
        }
    }
}
