//! Selecting the markup documents a run operates on.
//!
//! Directories are walked recursively and filtered with the configured
//! `include`/`exclude` globs, matched against the root-relative path with
//! forward slashes. Files named explicitly on the command line bypass the
//! globs. Symlinked directories are not followed.

use crate::config::Config;
use crate::context::ProjectContext;
use crate::error::{DestyleError, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::fs;
use std::path::{Path, PathBuf};

/// Compiled include/exclude globs.
#[derive(Debug, Clone)]
pub struct DocumentSelector {
    include: GlobSet,
    exclude: GlobSet,
}

impl DocumentSelector {
    /// Compile the globs from config.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            include: build_globset(&config.include, "include")?,
            exclude: build_globset(&config.exclude, "exclude")?,
        })
    }

    /// Whether a root-relative path (forward slashes) is selected.
    pub fn matches(&self, rel_path: &str) -> bool {
        self.include.is_match(rel_path) && !self.exclude.is_match(rel_path)
    }
}

fn build_globset(patterns: &[String], key: &str) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| {
            DestyleError::UserError(format!("invalid glob in {}: '{}' - {}", key, pattern, e))
        })?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| DestyleError::UserError(format!("failed to build {} globs: {}", key, e)))
}

/// Collect the documents named by `paths` (the whole project when empty).
///
/// The result is absolute, sorted and free of duplicates.
pub fn discover_documents(ctx: &ProjectContext, paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let selector = DocumentSelector::from_config(&ctx.config)?;
    let targets: Vec<PathBuf> = if paths.is_empty() {
        vec![ctx.root.clone()]
    } else {
        paths.iter().map(|p| ctx.resolve_path(p)).collect()
    };

    let mut documents = Vec::new();
    for target in targets {
        let metadata = fs::metadata(&target).map_err(|e| {
            DestyleError::UserError(format!("cannot read '{}': {}", target.display(), e))
        })?;

        if metadata.is_dir() {
            walk(ctx, &selector, &target, &mut documents)?;
        } else {
            documents.push(target);
        }
    }

    documents.sort();
    documents.dedup();
    Ok(documents)
}

fn walk(
    ctx: &ProjectContext,
    selector: &DocumentSelector,
    dir: &Path,
    documents: &mut Vec<PathBuf>,
) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(|e| DestyleError::io("read directory", dir, e))?;

    for entry in entries {
        let entry = entry.map_err(|e| DestyleError::io("read directory", dir, e))?;
        let path = entry.path();
        let file_type = entry
            .file_type()
            .map_err(|e| DestyleError::io("inspect", &path, e))?;

        if file_type.is_dir() {
            walk(ctx, selector, &path, documents)?;
        } else if file_type.is_file() && selector.matches(&ctx.relative(&path)) {
            documents.push(path);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::create_test_project;

    fn rel_names(ctx: &ProjectContext, docs: &[PathBuf]) -> Vec<String> {
        docs.iter().map(|d| ctx.relative(d)).collect()
    }

    #[test]
    fn test_selector_default_globs() {
        let selector = DocumentSelector::from_config(&Config::default()).unwrap();

        assert!(selector.matches("index.html"));
        assert!(selector.matches("pages/deep/a.html"));
        assert!(!selector.matches("css/styles.css"));
        assert!(!selector.matches("index.html.bak"));
        assert!(!selector.matches("node_modules/pkg/readme.html"));
    }

    #[test]
    fn test_discover_whole_project_sorted() {
        let project = create_test_project(&[
            ("z.html", ""),
            ("a.html", ""),
            ("pages/b.html", ""),
            ("pages/b.html.bak", ""),
            ("css/styles.css", ""),
            ("node_modules/x/y.html", ""),
        ]);
        let ctx = ProjectContext::resolve_from(project.path()).unwrap();

        let docs = discover_documents(&ctx, &[]).unwrap();

        assert_eq!(rel_names(&ctx, &docs), vec!["a.html", "pages/b.html", "z.html"]);
    }

    #[test]
    fn test_discover_subdirectory_uses_root_relative_globs() {
        let project = create_test_project(&[
            ("pages/a.html", ""),
            ("pages/vendor/b.html", ""),
            ("other/c.html", ""),
        ]);
        let mut ctx = ProjectContext::resolve_from(project.path()).unwrap();
        ctx.config.exclude = vec!["pages/vendor/**".to_string()];

        let docs = discover_documents(&ctx, &[PathBuf::from("pages")]).unwrap();

        assert_eq!(rel_names(&ctx, &docs), vec!["pages/a.html"]);
    }

    #[test]
    fn test_explicit_files_bypass_globs_and_dedup() {
        let project = create_test_project(&[("template.htm", ""), ("a.html", "")]);
        let ctx = ProjectContext::resolve_from(project.path()).unwrap();

        let docs = discover_documents(
            &ctx,
            &[
                PathBuf::from("template.htm"),
                PathBuf::from("a.html"),
                PathBuf::from("."),
            ],
        )
        .unwrap();

        assert_eq!(rel_names(&ctx, &docs), vec!["a.html", "template.htm"]);
    }

    #[test]
    fn test_missing_path_is_user_error() {
        let project = create_test_project(&[]);
        let ctx = ProjectContext::resolve_from(project.path()).unwrap();

        let err = discover_documents(&ctx, &[PathBuf::from("nope.html")]).unwrap_err();
        assert!(matches!(err, DestyleError::UserError(_)));
    }
}
