//! Project context resolution for destyle.
//!
//! A project is a directory holding the markup documents, the target
//! stylesheet and optionally a `destyle.yaml`. Every relative path the user
//! gives (documents, stylesheet, event log) is resolved against its root.

use crate::cli::ProjectArgs;
use crate::config::{CONFIG_FILE_NAME, Config};
use crate::error::{DestyleError, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Resolved paths and settings for one invocation.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    /// Absolute path to the project root.
    pub root: PathBuf,

    /// Config file location (may not exist).
    pub config_path: PathBuf,

    /// Effective configuration after CLI overrides.
    pub config: Config,
}

impl ProjectContext {
    /// Resolve the project from the current working directory.
    pub fn resolve() -> Result<Self> {
        let cwd = env::current_dir().map_err(|e| {
            DestyleError::UserError(format!("failed to get current working directory: {}", e))
        })?;

        Self::resolve_from(&cwd)
    }

    /// Resolve the project rooted at `dir`, loading its config if present.
    pub fn resolve_from<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let root = dir.canonicalize().map_err(|e| {
            DestyleError::UserError(format!(
                "project root '{}' is not accessible: {}",
                dir.display(),
                e
            ))
        })?;

        if !root.is_dir() {
            return Err(DestyleError::UserError(format!(
                "project root '{}' is not a directory",
                root.display()
            )));
        }

        let config_path = root.join(CONFIG_FILE_NAME);
        let config = Config::load_or_default(&config_path)?;

        Ok(Self {
            root,
            config_path,
            config,
        })
    }

    /// Resolve the project described by command-line options.
    ///
    /// `--root` picks the directory, `--config` an explicit config file (which
    /// must exist), and `--stylesheet`/`--prefix` override config values.
    pub fn from_args(args: &ProjectArgs) -> Result<Self> {
        let mut ctx = match &args.root {
            Some(root) => Self::resolve_from(root)?,
            None => Self::resolve()?,
        };

        if let Some(config_path) = &args.config {
            let config_path = ctx.resolve_path(config_path);
            ctx.config = Config::load(&config_path)?;
            ctx.config_path = config_path;
        }

        if let Some(stylesheet) = &args.stylesheet {
            ctx.config.stylesheet = stylesheet.to_string_lossy().into_owned();
        }
        if let Some(prefix) = &args.prefix {
            ctx.config.class_prefix = prefix.clone();
        }
        ctx.config.validate()?;

        Ok(ctx)
    }

    /// Make `path` absolute by joining relative paths onto the root.
    pub fn resolve_path<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Absolute path of the target stylesheet.
    pub fn stylesheet_path(&self) -> PathBuf {
        self.resolve_path(&self.config.stylesheet)
    }

    /// Absolute path of the event log, if one is configured.
    pub fn events_log_path(&self) -> Option<PathBuf> {
        self.config
            .events_log
            .as_ref()
            .map(|path| self.resolve_path(path))
    }

    /// Root-relative display form of `path` with forward slashes.
    pub fn relative(&self, path: &Path) -> String {
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        rel.to_string_lossy().replace('\\', "/")
    }
}
