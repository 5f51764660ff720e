//! Directory-alias resolution.
//!
//! Configured file paths can anchor themselves to a named alias instead of
//! an absolute path. The overlay cares about exactly one alias, [`LOG_DIR`],
//! which the surrounding system maps to the current log directory. The
//! mapping is supplied through [`DirectoryResolver`] so the overlay never
//! owns path configuration itself.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// The well-known alias for the server log directory.
pub const LOG_DIR: &str = "log.dir";

/// Resolves well-known directory aliases to configured absolute paths.
///
/// `None` means the alias is legitimately unconfigured, which queries
/// treat as "no files" rather than an error.
pub trait DirectoryResolver: Send + Sync {
    /// The directory currently configured for `alias`, if any.
    fn resolve(&self, alias: &str) -> Option<PathBuf>;
}

/// Fixed alias table backed by a `HashMap`.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectories {
    dirs: HashMap<String, PathBuf>,
}

impl StaticDirectories {
    /// Create an empty table (every alias unresolved).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table with only [`LOG_DIR`] configured.
    pub fn with_log_dir(path: impl AsRef<Path>) -> Self {
        let mut dirs = Self::new();
        dirs.insert(LOG_DIR, path.as_ref());
        dirs
    }

    /// Map `alias` to `path`, replacing any previous mapping.
    pub fn insert(&mut self, alias: impl Into<String>, path: impl Into<PathBuf>) {
        self.dirs.insert(alias.into(), path.into());
    }
}

impl DirectoryResolver for StaticDirectories {
    fn resolve(&self, alias: &str) -> Option<PathBuf> {
        self.dirs.get(alias).cloned()
    }
}
