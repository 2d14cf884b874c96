//! Display and formatting utilities for convert command output.

use super::types::{ConvertPlan, ConvertResult, DocumentPlan};
use crate::engine::Position;
use crate::engine::emit::render_rule;

/// Print every skipped attribute as `Warning: <doc>:<line>:<col>: ...`.
pub fn print_warnings(documents: &[DocumentPlan]) {
    for doc in documents {
        for warning in &doc.outcome.warnings {
            eprintln!("Warning: {}:{}", doc.name, warning);
        }
    }
}

/// Print the changes a plan would make.
pub fn print_convert_plan(plan: &ConvertPlan, stylesheet_name: &str) {
    println!("Convert plan:");
    println!();

    let modified: Vec<&DocumentPlan> = plan.modified().collect();
    if !modified.is_empty() {
        println!("Documents to rewrite ({}):", modified.len());
        for doc in modified {
            println!("  - {} ({})", doc.name, describe_document(doc));
            for line in rewritten_tags(doc) {
                println!("      {}", line);
            }
        }
        println!();
    }

    if !plan.added.is_empty() {
        println!(
            "Rules to append to {} ({}):",
            stylesheet_name,
            plan.added.len()
        );
        for (declaration, id) in &plan.added {
            println!("  {}", render_rule(id, declaration));
        }
        println!();
    }
}

fn describe_document(doc: &DocumentPlan) -> String {
    let outcome = &doc.outcome;
    let mut parts = vec![format!("{} style(s)", outcome.converted())];
    if !outcome.allocated.is_empty() {
        parts.push(format!("{} new class(es)", outcome.allocated.len()));
    }
    if outcome.stripped > 0 {
        parts.push(format!("{} empty", outcome.stripped));
    }
    parts.join(", ")
}

/// Each rewritten tag as `<line>:<col>: <tag>`, positioned in the new text.
fn rewritten_tags(doc: &DocumentPlan) -> Vec<String> {
    let text = &doc.outcome.text;
    doc.outcome
        .edits
        .iter()
        .map(|edit| {
            let at = Position::locate(text, edit.rewritten.start);
            let tag = text[edit.rewritten.clone()]
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ");
            format!("{}: {}", at, tag)
        })
        .collect()
}

/// Print the counts of a plan or a committed run.
pub fn print_summary(plan: &ConvertPlan, result: Option<&ConvertResult>) {
    let heading = if result.is_some() {
        "Convert complete:"
    } else {
        "Dry-run summary:"
    };

    println!("{}", heading);
    println!("  Documents scanned:  {}", plan.documents.len());
    println!(
        "  Documents modified: {}",
        result.map_or(plan.modified_count(), |r| r.documents_written)
    );
    println!("  Classes added:      {}", plan.added.len());
    println!("  Classes reused:     {}", plan.reused_count());
    if plan.stripped_count() > 0 {
        println!("  Empty styles:       {}", plan.stripped_count());
    }
    if plan.warning_count() > 0 {
        println!("  Warnings:           {}", plan.warning_count());
    }
    if let Some(result) = result {
        if !result.backups.is_empty() {
            println!("  Backups created:    {}", result.backups.len());
        }
        if result.stylesheet_written {
            println!("  Stylesheet updated: yes");
        }
    }
}
