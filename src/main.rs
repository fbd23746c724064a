//! dotship CLI
//!
//! Usage: dotship [OPTIONS] [COMMAND]
//!
//! Commands:
//!   publish     Publish the project or batch in the current folder (default)
//!   init-batch  Write a sample dotship-solution.json
//!   set         Store NuGet credentials
//!   detect      Show what would be published

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use dotship::error::{DeployError, DotshipError, ResolveError};
use dotship::logging::{init_logging, LoggingConfig};
use dotship::presentation::{Cli, Commands};

mod commands;
mod ui;

use crate::ui::blocks::error::ErrorBlock;
use crate::ui::terminal::detect_capabilities;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let caps = detect_capabilities();
    init_logging(
        &LoggingConfig::from_flags(cli.verbose, cli.quiet).with_color(caps.supports_color),
    );

    match run(&cli) {
        Ok(code) => exit_code(code),
        Err(err) => {
            let mut block = ErrorBlock::new(format!("{}", err));
            for cause in err.chain().skip(1) {
                block = block.with_detail(cause.to_string());
            }
            if let Some(hint) = hint_for(&err) {
                block = block.with_fix(hint);
            }
            eprint!("{}", block.render(caps.supports_color, caps.supports_unicode));
            exit_code(exit_code_for(&err))
        }
    }
}

fn run(cli: &Cli) -> Result<i32> {
    let working_dir = std::env::current_dir().context("Failed to read the current directory")?;

    match cli.command() {
        Commands::Publish => commands::publish::cmd_publish(cli, &working_dir),
        Commands::InitBatch { output, force } => {
            commands::init_batch::cmd_init_batch(output.as_deref(), force, &working_dir)
        }
        Commands::Set {
            nuget_debug_package_path,
            nuget_key_path,
            shared,
        } => commands::set::cmd_set(
            nuget_debug_package_path.as_deref(),
            nuget_key_path.as_deref(),
            shared,
        ),
        Commands::Detect => commands::detect::cmd_detect(&working_dir),
    }
}

/// Resolution errors keep their distinct codes; everything else is 1.
fn exit_code_for(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<DotshipError>() {
            return e.exit_code();
        }
        if let Some(e) = cause.downcast_ref::<ResolveError>() {
            return e.exit_code();
        }
    }
    1
}

fn hint_for(err: &anyhow::Error) -> Option<String> {
    let resolve = err.chain().find_map(|cause| {
        cause.downcast_ref::<ResolveError>().or_else(|| {
            match cause.downcast_ref::<DotshipError>() {
                Some(DotshipError::Resolve(e)) => Some(e),
                _ => None,
            }
        })
    });
    if let Some(e) = resolve {
        return match e {
            ResolveError::NoProjectFound { .. } => {
                Some("Run dotship in a project folder or pass --csproj <path>".to_string())
            }
            ResolveError::AmbiguousProjects { .. } => Some(
                "Pick one with --csproj <path>, or create a batch: dotship init-batch".to_string(),
            ),
            ResolveError::MissingConfigSection { section, .. } => Some(format!(
                "Add a \"{}\" section to appsettings.json or dotship.json",
                section
            )),
            _ => None,
        };
    }

    err.chain().find_map(|cause| match cause.downcast_ref::<DotshipError>() {
        Some(DotshipError::Deploy(DeployError::CredentialMissing { hint, .. })) => {
            Some(hint.clone())
        }
        _ => None,
    })
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
