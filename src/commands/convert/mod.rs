//! Implementation of the `destyle convert` command.
//!
//! Moves inline styles of the selected documents into generated classes:
//! - Every document is rewritten in memory first (plan phase)
//! - Only when all documents succeeded are files written (commit phase)
//!
//! # Safety
//!
//! - A class id collision or unreadable document aborts before any write
//! - `--dry-run` prints the plan and writes nothing
//! - Originals are copied to `<file>.bak` unless backups are disabled
//! - `<stylesheet>.lock` is held from planning to the stylesheet write, so
//!   two runs cannot append against the same stylesheet snapshot
//!
//! # Logging
//!
//! Appends a `convert` event when an event log is configured or `--log` is
//! given.

mod display;
mod execution;
mod logging;
mod planning;
mod types;


use crate::cli::ConvertArgs;
use crate::context::ProjectContext;
use crate::error::Result;
use crate::locks::acquire_stylesheet_lock;

use display::{print_convert_plan, print_summary, print_warnings};
use execution::execute_convert;
use logging::log_convert_event;
use planning::build_convert_plan;

pub(crate) use planning::read_stylesheet;

/// Execute the `destyle convert` command.
pub fn cmd_convert(args: ConvertArgs) -> Result<()> {
    let ctx = ProjectContext::from_args(&args.project)?;
    run_convert(&ctx, &args)
}

fn run_convert(ctx: &ProjectContext, args: &ConvertArgs) -> Result<()> {
    let stylesheet_path = ctx.stylesheet_path();
    let _lock = if args.dry_run {
        None
    } else {
        Some(acquire_stylesheet_lock(&stylesheet_path, "convert")?)
    };

    let plan = build_convert_plan(ctx, &args.project.paths)?;
    print_warnings(&plan.documents);

    if !plan.has_changes() {
        println!(
            "No inline styles to convert in {} document(s).",
            plan.documents.len()
        );
    } else {
        print_convert_plan(&plan, &ctx.relative(&stylesheet_path));
    }

    let result = if args.dry_run || !plan.has_changes() {
        None
    } else {
        let backup = ctx.config.backup && !args.no_backup;
        Some(execute_convert(ctx, &plan, backup)?)
    };

    if args.dry_run {
        print_summary(&plan, None);
        println!();
        println!("Dry-run mode: no changes made.");
    } else if let Some(result) = &result {
        println!();
        print_summary(&plan, Some(result));
    }

    let log_path = args
        .log
        .as_ref()
        .map(|path| ctx.resolve_path(path))
        .or_else(|| ctx.events_log_path());
    if let Some(log_path) = log_path {
        log_convert_event(ctx, &log_path, &plan, result.as_ref(), args.dry_run)?;
    }

    Ok(())
}
