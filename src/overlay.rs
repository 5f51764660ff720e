//! LogFileOverlay: synthesizes `log-file` children while delegating
//! everything else.
//!
//! The overlay wraps a real tree node and intercepts only the reserved
//! [`LOG_FILE`] child type. Queries against that type are answered from
//! handler configuration plus a filesystem scan; the entries returned are
//! transient placeholders, never stored anywhere. Every other operation
//! passes through to the wrapped node unchanged.
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use logtree::{BasicResource, LogFileOverlay, Resource, StaticDirectories};
//!
//! let dirs = Arc::new(StaticDirectories::with_log_dir("/var/log/server"));
//! let root = LogFileOverlay::new(Box::new(BasicResource::new()), dirs);
//! assert!(root.child_types().contains("log-file"));
//! ```

use std::collections::{BTreeSet, HashSet};
use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value as JsonValue;

use crate::discovery;
use crate::handlers::{file_handler_model, resolve_file_names};
use crate::paths::{DirectoryResolver, LOG_DIR};
use crate::tree::{
    PLACEHOLDER, PathAddress, PathElement, PlaceholderResource, Resource, ResourceEntry,
    ResourceError,
};

/// Reserved child type for virtual log-file entries.
///
/// This type never appears as a real stored child in the underlying tree;
/// the overlay is its sole producer.
pub const LOG_FILE: &str = "log-file";

/// Decorator exposing readable log files as virtual `log-file` children.
///
/// Stateless per call: the set of interesting names and the matching files
/// are recomputed on every query, so concurrent callers may observe
/// different filesystem snapshots but each call is internally consistent.
pub struct LogFileOverlay {
    delegate: Box<dyn Resource>,
    dirs: Arc<dyn DirectoryResolver>,
}

impl LogFileOverlay {
    /// Wrap `delegate`, resolving the log directory through `dirs`.
    ///
    /// The resolver is shared, not owned; clones of the overlay keep
    /// resolving through the same instance.
    pub fn new(delegate: Box<dyn Resource>, dirs: Arc<dyn DirectoryResolver>) -> Self {
        Self { delegate, dirs }
    }

    /// The wrapped real node.
    pub fn delegate(&self) -> &dyn Resource {
        self.delegate.as_ref()
    }

    fn log_dir(&self) -> Option<PathBuf> {
        self.dirs.resolve(LOG_DIR)
    }

    /// File names configured on the delegate's file handlers, resolved
    /// fresh from the tree.
    fn resolved_names(&self) -> HashSet<String> {
        resolve_file_names(&file_handler_model(self.delegate.as_ref()))
    }

    /// Single-name probe for a virtual child called `candidate`.
    fn has_readable(&self, candidate: &str) -> bool {
        let dir = self.log_dir();
        discovery::has_readable_file(dir.as_deref(), &self.resolved_names(), candidate)
    }
}

impl std::fmt::Debug for LogFileOverlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogFileOverlay")
            .field("log_dir", &self.log_dir())
            .finish()
    }
}

impl Resource for LogFileOverlay {
    // ── Model: always the delegate's ───────────────────────────────────

    fn model(&self) -> JsonValue {
        self.delegate.model()
    }

    fn write_model(&mut self, model: JsonValue) -> Result<(), ResourceError> {
        self.delegate.write_model(model)
    }

    fn is_model_defined(&self) -> bool {
        self.delegate.is_model_defined()
    }

    // ── Children ───────────────────────────────────────────────────────

    fn has_child(&self, element: &PathElement) -> bool {
        if element.key() == LOG_FILE {
            return self.has_readable(element.value());
        }
        self.delegate.has_child(element)
    }

    fn get_child(&self, element: &PathElement) -> Option<&dyn Resource> {
        if element.key() == LOG_FILE {
            if self.has_readable(element.value()) {
                return Some(&PLACEHOLDER);
            }
            return None;
        }
        self.delegate.get_child(element)
    }

    fn require_child(&self, element: &PathElement) -> Result<&dyn Resource, ResourceError> {
        if element.key() == LOG_FILE {
            if self.has_readable(element.value()) {
                return Ok(&PLACEHOLDER);
            }
            return Err(ResourceError::NoSuchResource(element.clone()));
        }
        self.delegate.require_child(element)
    }

    fn has_children(&self, child_type: &str) -> bool {
        if child_type == LOG_FILE {
            let dir = self.log_dir();
            return discovery::any_file_exists(dir.as_deref(), &self.resolved_names());
        }
        self.delegate.has_children(child_type)
    }

    fn navigate(&self, address: &PathAddress) -> Result<&dyn Resource, ResourceError> {
        if let Some(first) = address.element(0)
            && first.key() == LOG_FILE
        {
            // The virtual namespace is flat: one level, nothing below it.
            if let Some(below) = address.element(1) {
                return Err(ResourceError::NoSuchResource(below.clone()));
            }
            if self.has_readable(first.value()) {
                return Ok(&PLACEHOLDER);
            }
            return Err(ResourceError::NoSuchResource(first.clone()));
        }
        self.delegate.navigate(address)
    }

    fn child_types(&self) -> BTreeSet<String> {
        let mut types = self.delegate.child_types();
        types.insert(LOG_FILE.to_string());
        types
    }

    fn children_names(&self, child_type: &str) -> BTreeSet<String> {
        if child_type == LOG_FILE {
            let dir = self.log_dir();
            return match discovery::find_files(dir.as_deref(), &self.resolved_names(), true) {
                Ok(paths) => paths
                    .iter()
                    .map(|path| path.to_string_lossy().into_owned())
                    .collect(),
                Err(err) => {
                    // Degrade to empty; enumeration must never abort a
                    // larger management read.
                    tracing::error!(%err, log_dir = ?dir, "failed processing log directory");
                    BTreeSet::new()
                }
            };
        }
        self.delegate.children_names(child_type)
    }

    fn children(&self, child_type: &str) -> Vec<ResourceEntry> {
        if child_type == LOG_FILE {
            return self
                .children_names(LOG_FILE)
                .into_iter()
                .map(|name| PlaceholderResource::entry(LOG_FILE, name))
                .collect();
        }
        self.delegate.children(child_type)
    }

    // ── Mutation: the virtual type is derived, not stored ──────────────

    fn register_child(
        &mut self,
        element: PathElement,
        resource: Box<dyn Resource>,
    ) -> Result<(), ResourceError> {
        if element.key() == LOG_FILE {
            return Err(ResourceError::CannotRegister(LOG_FILE.to_string()));
        }
        self.delegate.register_child(element, resource)
    }

    fn register_child_at(
        &mut self,
        element: PathElement,
        index: usize,
        resource: Box<dyn Resource>,
    ) -> Result<(), ResourceError> {
        if element.key() == LOG_FILE {
            return Err(ResourceError::CannotRegister(LOG_FILE.to_string()));
        }
        self.delegate.register_child_at(element, index, resource)
    }

    fn remove_child(&mut self, element: &PathElement) -> Result<Box<dyn Resource>, ResourceError> {
        if element.key() == LOG_FILE {
            return Err(ResourceError::CannotRemove(LOG_FILE.to_string()));
        }
        self.delegate.remove_child(element)
    }

    // ── Flags and cloning ──────────────────────────────────────────────

    fn is_runtime(&self) -> bool {
        self.delegate.is_runtime()
    }

    fn is_proxy(&self) -> bool {
        self.delegate.is_proxy()
    }

    fn clone_resource(&self) -> Box<dyn Resource> {
        Box::new(Self {
            delegate: self.delegate.clone_resource(),
            dirs: Arc::clone(&self.dirs),
        })
    }
}
