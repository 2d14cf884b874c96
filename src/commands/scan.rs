//! Implementation of the `destyle scan` command.
//!
//! Lists every distinct inline declaration in the selected documents with
//! the class it maps to. Nothing is written except an optional event line.

use crate::cli::ScanArgs;
use crate::commands::convert::read_stylesheet;
use crate::context::ProjectContext;
use crate::discover::discover_documents;
use crate::engine::{CanonicalDeclaration, ClassId, ClassRegistry, Locator, normalize};
use crate::error::{DestyleError, Result};
use crate::events::{Event, EventAction, append_event};
use serde_json::json;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::PathBuf;

/// One distinct declaration and where it occurs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryEntry {
    pub declaration: CanonicalDeclaration,
    pub id: ClassId,
    /// Number of `style` attributes with this declaration.
    pub occurrences: usize,
    /// Root-relative names of the documents containing it.
    pub documents: BTreeSet<String>,
    /// Whether the stylesheet already defines the class.
    pub existing: bool,
}

/// Result of scanning a set of documents.
#[derive(Debug, Default)]
pub struct Inventory {
    /// Entries ordered by occurrence count, most frequent first.
    pub entries: Vec<InventoryEntry>,
    pub documents_scanned: usize,
    /// Empty `style` attributes, which convert strips.
    pub empty: usize,
    /// Skipped attributes, as `<doc>:<line>:<col>: <reason>`.
    pub warnings: Vec<String>,
}

/// Execute the `destyle scan` command.
pub fn cmd_scan(args: ScanArgs) -> Result<()> {
    let ctx = ProjectContext::from_args(&args.project)?;
    let inventory = build_inventory(&ctx, &args.project.paths)?;

    for warning in &inventory.warnings {
        eprintln!("Warning: {}", warning);
    }
    print_inventory(&inventory);

    if let Some(log_path) = ctx.events_log_path() {
        let event = Event::new(EventAction::Scan).with_details(json!({
            "documents_scanned": inventory.documents_scanned,
            "distinct": inventory.entries.len(),
            "new": inventory.entries.iter().filter(|e| !e.existing).count(),
            "warnings": inventory.warnings.len(),
        }));
        append_event(&log_path, &event)?;
    }

    Ok(())
}

/// Collect the inventory without modifying anything.
///
/// Classes are allocated in a scratch registry seeded from the stylesheet,
/// so collisions are reported exactly as `convert` would report them.
pub fn build_inventory(ctx: &ProjectContext, paths: &[PathBuf]) -> Result<Inventory> {
    let stylesheet_path = ctx.stylesheet_path();
    let existing = read_stylesheet(&stylesheet_path)?;
    let mut registry = ClassRegistry::seed_from_stylesheet(&ctx.config.class_prefix, &existing)?;

    let mut inventory = Inventory::default();
    let mut by_declaration: HashMap<CanonicalDeclaration, usize> = HashMap::new();

    for path in discover_documents(ctx, paths)? {
        if path == stylesheet_path {
            continue;
        }
        let name = ctx.relative(&path);
        let text =
            fs::read_to_string(&path).map_err(|e| DestyleError::io("read document", &path, e))?;
        inventory.documents_scanned += 1;

        for located in Locator::new(&text) {
            let attr = match located {
                Ok(attr) => attr,
                Err(warning) => {
                    inventory.warnings.push(format!("{}:{}", name, warning));
                    continue;
                }
            };

            let declaration = normalize(&text[attr.value.clone()]);
            if declaration.is_empty() {
                inventory.empty += 1;
                continue;
            }

            let index = match by_declaration.get(&declaration) {
                Some(&index) => index,
                None => {
                    let existing = registry.lookup(&declaration).is_some();
                    let allocation = registry
                        .allocate(&declaration)
                        .map_err(|e| e.in_source(&name))?;
                    inventory.entries.push(InventoryEntry {
                        declaration: declaration.clone(),
                        id: allocation.id,
                        occurrences: 0,
                        documents: BTreeSet::new(),
                        existing,
                    });
                    by_declaration.insert(declaration, inventory.entries.len() - 1);
                    inventory.entries.len() - 1
                }
            };

            let entry = &mut inventory.entries[index];
            entry.occurrences += 1;
            entry.documents.insert(name.clone());
        }
    }

    inventory
        .entries
        .sort_by(|a, b| b.occurrences.cmp(&a.occurrences).then_with(|| a.id.cmp(&b.id)));
    Ok(inventory)
}

fn print_inventory(inventory: &Inventory) {
    if inventory.entries.is_empty() {
        println!(
            "No inline styles found in {} document(s).",
            inventory.documents_scanned
        );
    } else {
        let total: usize = inventory.entries.iter().map(|e| e.occurrences).sum();
        println!(
            "Inline styles ({} distinct, {} occurrence(s) in {} document(s)):",
            inventory.entries.len(),
            total,
            inventory.documents_scanned
        );
        println!();
        for entry in &inventory.entries {
            println!(
                "  {} [{}] {}x in {} document(s)",
                entry.id,
                if entry.existing { "exists" } else { "new" },
                entry.occurrences,
                entry.documents.len()
            );
            println!("    {}", entry.declaration);
        }
    }

    if inventory.empty > 0 {
        println!();
        println!("Empty style attributes: {}", inventory.empty);
    }
}
