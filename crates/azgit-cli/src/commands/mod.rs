//! Command definitions and dispatch.
//!
//! Every input can be given as a flag or through the `INPUT_<NAME>`
//! variable the pipeline agent sets for task inputs.

use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;

use azgit_core::{parse_bool_input, parse_merge_strategy};
use azgit_devops::MergeStrategy;

pub mod completions;
pub mod create_pr;
pub mod create_tag;
pub mod delete_tag;
mod utils;

/// Azure DevOps Git tasks for pipelines: pull requests and annotated tags.
#[derive(Parser)]
#[command(name = "azgit", version, about, long_about = None)]
pub struct Cli {
    /// Only print errors, warnings and essential output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a pull request, optionally from a fresh merge branch.
    CreatePr(CreatePrArgs),

    /// Create an annotated tag on a commit.
    CreateTag(CreateTagArgs),

    /// Delete an annotated tag.
    DeleteTag(DeleteTagArgs),

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// Where the repository lives.
#[derive(Args, Debug, Clone)]
pub struct RepositoryArgs {
    /// Organization name or collection URL [default: $SYSTEM_TEAMFOUNDATIONCOLLECTIONURI].
    #[arg(long, env = "INPUT_ORGANIZATION")]
    pub organization: Option<String>,

    /// Project name or id [default: $SYSTEM_TEAMPROJECTID].
    #[arg(long, env = "INPUT_PROJECTID")]
    pub project_id: Option<String>,

    /// Repository name or id.
    #[arg(long, env = "INPUT_REPOSITORYID")]
    pub repository_id: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct CreatePrArgs {
    #[command(flatten)]
    pub repository: RepositoryArgs,

    /// Branch to merge from, e.g. `refs/heads/feature`.
    #[arg(long, env = "INPUT_SOURCEREFNAME")]
    pub source_ref_name: Option<String>,

    /// Branch to merge into, e.g. `refs/heads/main`.
    #[arg(long, env = "INPUT_TARGETREFNAME")]
    pub target_ref_name: Option<String>,

    #[arg(long, env = "INPUT_TITLE")]
    pub title: Option<String>,

    #[arg(long, env = "INPUT_DESCRIPTION")]
    pub description: Option<String>,

    /// Create the pull request as a draft.
    #[arg(long, env = "INPUT_ISDRAFT", action = ArgAction::Set, default_value = "false", value_parser = parse_bool_input)]
    pub is_draft: bool,

    /// Create `merge-branch-name` from the source branch and open the pull request from it.
    #[arg(long, env = "INPUT_CREATEMERGEBRANCH", action = ArgAction::Set, default_value = "false", value_parser = parse_bool_input)]
    pub create_merge_branch: bool,

    #[arg(long, env = "INPUT_MERGEBRANCHNAME")]
    pub merge_branch_name: Option<String>,

    /// Comma-separated reviewer display names or group names.
    #[arg(long, env = "INPUT_REVIEWERS")]
    pub reviewers: Option<String>,

    /// Resolve reviewers only among the project's users and groups.
    #[arg(long, env = "INPUT_SCOPEREVIEWERSTOPROJECT", action = ArgAction::Set, default_value = "false", value_parser = parse_bool_input)]
    pub scope_reviewers_to_project: bool,

    /// User origins whose directory id is usable as a reviewer id.
    #[arg(long, env = "INPUT_DIRECTORIGINS", default_value = "vsts")]
    pub direct_origins: String,

    #[arg(long, env = "INPUT_SETAUTOCOMPLETE", action = ArgAction::Set, default_value = "false", value_parser = parse_bool_input)]
    pub set_auto_complete: bool,

    /// Display name of the identity that sets auto-complete.
    #[arg(long, env = "INPUT_AUTOCOMPLETESETBY")]
    pub auto_complete_set_by: Option<String>,

    #[arg(long, env = "INPUT_BYPASSPOLICY", action = ArgAction::Set, default_value = "false", value_parser = parse_bool_input)]
    pub bypass_policy: bool,

    #[arg(long, env = "INPUT_BYPASSREASON")]
    pub bypass_reason: Option<String>,

    #[arg(long, env = "INPUT_DELETESOURCEBRANCH", action = ArgAction::Set, default_value = "false", value_parser = parse_bool_input)]
    pub delete_source_branch: bool,

    #[arg(long, env = "INPUT_MERGECOMMITMESSAGE")]
    pub merge_commit_message: Option<String>,

    /// One of noFastForward, squash, rebase, rebaseMerge.
    #[arg(long, env = "INPUT_MERGESTRATEGY", default_value = "noFastForward", value_parser = parse_merge_strategy)]
    pub merge_strategy: MergeStrategy,

    #[arg(long, env = "INPUT_TRANSITIONWORKITEMS", action = ArgAction::Set, default_value = "false", value_parser = parse_bool_input)]
    pub transition_work_items: bool,
}

#[derive(Args, Debug, Clone)]
pub struct CreateTagArgs {
    #[command(flatten)]
    pub repository: RepositoryArgs,

    /// Tag name, without `refs/tags/`.
    #[arg(long, env = "INPUT_NAME")]
    pub name: Option<String>,

    /// Tag message.
    #[arg(long, env = "INPUT_MESSAGE")]
    pub message: Option<String>,

    /// Commit to tag.
    #[arg(long, env = "INPUT_COMMITID")]
    pub commit_id: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct DeleteTagArgs {
    #[command(flatten)]
    pub repository: RepositoryArgs,

    /// Tag name, without `refs/tags/`.
    #[arg(long, env = "INPUT_NAME")]
    pub name: Option<String>,
}
