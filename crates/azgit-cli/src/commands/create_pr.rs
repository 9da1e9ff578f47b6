//! `azgit create-pr` command - open a pull request with reviewers and auto-complete.

use anyhow::{Context, Result};
use azgit_core::{DirectOrigins, IdentityResolver, RefName, parse_reviewers, require_input};
use azgit_devops::CompletionOptions;

use super::CreatePrArgs;
use super::utils::{self, Connection};
use crate::output;
use crate::services::{AutoComplete, PullRequestConfig, PullRequestService};

/// Run the create-pr command.
pub fn run(args: &CreatePrArgs) -> Result<()> {
    // Validate every input before touching the network.
    let config = build_config(args)?;
    let Connection {
        client,
        project,
        repository,
    } = utils::connect(&args.repository)?;

    let rt = tokio::runtime::Runtime::new()?;

    let mut resolver = IdentityResolver::new(&client)
        .with_direct_origins(DirectOrigins::parse_list(&args.direct_origins));
    if args.scope_reviewers_to_project {
        let scope = rt
            .block_on(client.get_descriptor(&project))
            .context("Failed to resolve the project scope for reviewers")?;
        output::debug(&format!("reviewer scope descriptor = {scope}"));
        resolver = resolver.with_scope(scope);
    }

    let mut service = PullRequestService::new(&client, resolver, project, repository);

    if let Some(merge_branch) = &config.merge_branch {
        output::info(&format!(
            "Creating {merge_branch} from {}...",
            config.source_ref
        ));
    }

    let outcome = rt.block_on(service.execute(&config))?;

    if let Some(commit) = &outcome.merge_branch_commit {
        output::debug(&format!(
            "object ID of {} branch = {commit}",
            config.source_ref
        ));
    }
    for warning in &outcome.warnings {
        output::warn(warning);
    }

    let pr = &outcome.pull_request;
    let url = pr.web_url();
    output::success(&format!("Created pull request #{}", pr.pull_request_id));
    output::set_output_variable("pullRequestId", &pr.pull_request_id.to_string());
    output::set_output_variable("pullRequestUrl", &url);
    output::essential(&url);

    Ok(())
}

/// Turn the raw inputs into a validated pull request configuration.
fn build_config(args: &CreatePrArgs) -> Result<PullRequestConfig> {
    let source_ref = RefName::branch(require_input(
        "sourceRefName",
        args.source_ref_name.as_deref(),
    )?)?;
    let target_ref = RefName::branch(require_input(
        "targetRefName",
        args.target_ref_name.as_deref(),
    )?)?;

    let merge_branch = if args.create_merge_branch {
        Some(RefName::branch(require_input(
            "mergeBranchName",
            args.merge_branch_name.as_deref(),
        )?)?)
    } else {
        None
    };

    let auto_complete = if args.set_auto_complete {
        let set_by = require_input("autoCompleteSetBy", args.auto_complete_set_by.as_deref())?;
        Some(AutoComplete {
            set_by: set_by.to_string(),
            options: CompletionOptions {
                bypass_policy: args.bypass_policy,
                bypass_reason: utils::optional(args.bypass_reason.as_ref()),
                delete_source_branch: args.delete_source_branch,
                merge_commit_message: utils::optional(args.merge_commit_message.as_ref()),
                merge_strategy: args.merge_strategy,
                transition_work_items: args.transition_work_items,
            },
        })
    } else {
        None
    };

    Ok(PullRequestConfig {
        source_ref,
        target_ref,
        title: utils::optional(args.title.as_ref()),
        description: utils::optional(args.description.as_ref()),
        is_draft: args.is_draft,
        merge_branch,
        reviewers: args
            .reviewers
            .as_deref()
            .map(parse_reviewers)
            .unwrap_or_default(),
        auto_complete,
    })
}
