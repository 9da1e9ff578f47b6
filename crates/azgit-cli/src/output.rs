//! Terminal and pipeline-agent output.
//!
//! Under an Azure Pipelines agent (`TF_BUILD` set) warnings, errors, debug
//! lines and output variables are written as `##vso` logging commands on
//! stdout so the agent can pick them up. Elsewhere they get colored prefixes.

use std::sync::atomic::{AtomicBool, Ordering};

use colored::Colorize;

static QUIET_MODE: AtomicBool = AtomicBool::new(false);

/// Set quiet mode globally. Call once at startup.
pub fn set_quiet(quiet: bool) {
    QUIET_MODE.store(quiet, Ordering::Relaxed);
}

fn is_quiet() -> bool {
    QUIET_MODE.load(Ordering::Relaxed)
}

fn on_agent() -> bool {
    std::env::var_os("TF_BUILD").is_some()
}

fn debug_enabled() -> bool {
    std::env::var("SYSTEM_DEBUG").is_ok_and(|v| v.eq_ignore_ascii_case("true"))
}

/// Escape a logging command message.
#[must_use]
pub fn escape_data(value: &str) -> String {
    value
        .replace('%', "%AZP25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Escape a logging command property value.
#[must_use]
pub fn escape_property(value: &str) -> String {
    escape_data(value).replace(';', "%3B").replace(']', "%5D")
}

/// Format a `##vso[area.action k=v;...]message` logging command.
#[must_use]
pub fn logging_command(command: &str, properties: &[(&str, &str)], message: &str) -> String {
    let mut line = format!("##vso[{command}");
    if !properties.is_empty() {
        line.push(' ');
        for (key, value) in properties {
            line.push_str(key);
            line.push('=');
            line.push_str(&escape_property(value));
            line.push(';');
        }
    }
    line.push(']');
    line.push_str(&escape_data(message));
    line
}

/// Print a success message (suppressed in quiet mode).
pub fn success(msg: &str) {
    if !is_quiet() {
        println!("{} {}", "✓".green(), msg);
    }
}

/// Print an error and mark the task failed.
pub fn error(msg: &str) {
    if on_agent() {
        println!(
            "{}",
            logging_command("task.logissue", &[("type", "error")], msg)
        );
        println!(
            "{}",
            logging_command("task.complete", &[("result", "Failed")], msg)
        );
    } else {
        eprintln!("{} {}", "✗".red(), msg);
    }
}

/// Print a warning (never suppressed).
pub fn warn(msg: &str) {
    if on_agent() {
        println!(
            "{}",
            logging_command("task.logissue", &[("type", "warning")], msg)
        );
    } else {
        eprintln!("{} {}", "!".yellow(), msg);
    }
}

/// Print an info message (suppressed in quiet mode).
pub fn info(msg: &str) {
    if !is_quiet() {
        println!("{} {}", "→".blue(), msg);
    }
}

/// Print raw diagnostic data on stderr (never suppressed).
///
/// Use for service payloads that explain a failure.
pub fn diagnostic(msg: &str) {
    eprintln!("{msg}");
}

/// Print a debug line, only when the pipeline runs with `system.debug`.
pub fn debug(msg: &str) {
    if debug_enabled() {
        for line in msg.lines() {
            println!("##[debug]{line}");
        }
    }
}

/// Print essential machine-readable output (always prints).
///
/// Use for results that should be available for piping, like PR URLs.
pub fn essential(msg: &str) {
    println!("{msg}");
}

/// Publish an output variable for later pipeline steps (agent only).
pub fn set_output_variable(name: &str, value: &str) {
    if on_agent() {
        println!(
            "{}",
            logging_command(
                "task.setvariable",
                &[("variable", name), ("isOutput", "true")],
                value,
            )
        );
    }
}
