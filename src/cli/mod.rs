//! CLI argument parsing for destyle.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Destyle: move inline `style="..."` attributes into shared CSS classes.
///
/// Every distinct declaration becomes one generated class (`inl-<hash>`)
/// appended to the project stylesheet, and each tag that carried the style
/// references the class instead.
#[derive(Parser, Debug)]
#[command(name = "destyle")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for destyle.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert inline styles into classes.
    ///
    /// Rewrites every selected document, backs up originals, and appends
    /// the new rules to the stylesheet. Nothing is written if any document
    /// fails (for example on a class id collision).
    Convert(ConvertArgs),

    /// List the inline styles that `convert` would extract.
    ///
    /// Read-only: shows each distinct declaration, its class name, how often
    /// it occurs, and whether the stylesheet already defines it.
    Scan(ScanArgs),
}

/// Options shared by every command that reads a project.
#[derive(Args, Debug, Default)]
pub struct ProjectArgs {
    /// Documents or directories to process, relative to the project root.
    /// Defaults to the whole project.
    pub paths: Vec<PathBuf>,

    /// Project root (default: current directory).
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Config file (default: `<root>/destyle.yaml` if present).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Stylesheet receiving generated rules (overrides config).
    #[arg(long)]
    pub stylesheet: Option<PathBuf>,

    /// Prefix of generated class names (overrides config).
    #[arg(long)]
    pub prefix: Option<String>,
}

/// Arguments for the `convert` command.
#[derive(Parser, Debug, Default)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Show what would change without writing anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Do not create `.bak` copies of rewritten documents.
    #[arg(long)]
    pub no_backup: bool,

    /// Append a run event to this NDJSON file (overrides config).
    #[arg(long)]
    pub log: Option<PathBuf>,
}

/// Arguments for the `scan` command.
#[derive(Parser, Debug, Default)]
pub struct ScanArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
