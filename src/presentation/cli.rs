//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Deployment flags (`--migrate`, `--updateservice`, `--updatenginx`) and
//!   project selection flags are global, so `dotship publish -m` and
//!   `dotship -m` mean the same thing
//! - Running `dotship` without a subcommand publishes

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::entities::DeployIntent;

/// dotship - publish .NET projects to NuGet feeds or Linux hosts
#[derive(Parser, Debug)]
#[command(name = "dotship")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Run 'dotship' in a project folder to publish it.")]
pub struct Cli {
    /// Run database migrations after deploying a service
    #[arg(short = 'm', long, global = true)]
    pub migrate: bool,

    /// Replace the systemd unit of an existing service
    #[arg(short = 's', long = "updateservice", global = true)]
    pub update_service: bool,

    /// Replace the nginx site of an existing service
    #[arg(short = 'n', long = "updatenginx", global = true)]
    pub update_nginx: bool,

    /// Project file to publish
    #[arg(short = 'p', long, global = true, value_name = "PATH")]
    pub csproj: Option<PathBuf>,

    /// Folder holding dotship-solution.json; publishes every enabled project
    #[arg(short = 'd', long, global = true, value_name = "FOLDER")]
    pub solution: Option<PathBuf>,

    /// Explicit batch config file
    #[arg(long, global = true, value_name = "FILE")]
    pub batch: Option<PathBuf>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Publish the project (or batch) found in the current folder (default)
    Publish,

    /// Write a sample dotship-solution.json
    InitBatch {
        /// Where to write the file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Overwrite an existing file without asking
        #[arg(short, long)]
        force: bool,
    },

    /// Store NuGet credentials for later runs
    Set {
        /// Local folder used as the pre-release package feed
        #[arg(long, value_name = "FOLDER")]
        nuget_debug_package_path: Option<String>,

        /// File containing the NuGet API key
        #[arg(long, value_name = "FILE")]
        nuget_key_path: Option<String>,

        /// Write to the shared profile store instead of the machine-local one
        #[arg(long)]
        shared: bool,
    },

    /// Show what `dotship` would publish from the current folder
    Detect,
}

impl Cli {
    pub fn intent(&self) -> DeployIntent {
        DeployIntent {
            migrate: self.migrate,
            update_service: self.update_service,
            update_nginx: self.update_nginx,
        }
    }

    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Publish)
    }
}
