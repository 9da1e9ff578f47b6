//! azgit - Azure DevOps Git tasks for pipelines.

use clap::Parser;

mod commands;
mod output;
mod services;

use commands::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    output::set_quiet(cli.quiet);

    let result = match &cli.command {
        Commands::CreatePr(args) => commands::create_pr::run(args),
        Commands::CreateTag(args) => commands::create_tag::run(args),
        Commands::DeleteTag(args) => commands::delete_tag::run(args),
        Commands::Completions { shell } => commands::completions::run(*shell),
    };

    if let Err(e) = result {
        output::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}
