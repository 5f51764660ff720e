//! logtree: a virtual log-file overlay for hierarchical management trees.
//!
//! This crate exposes rotated log files as addressable, read-only entries
//! inside a larger configuration tree without ever storing them there:
//!
//! - **Tree**: a generic resource-tree abstraction (`Resource` trait, an
//!   in-memory `BasicResource`, and an immutable `PlaceholderResource`)
//! - **Handlers**: the closed set of file-producing handler kinds and the
//!   resolver that extracts configured file names from their models
//! - **Discovery**: filesystem scanning that matches exact names and
//!   rotated variants (`server.log.1`, `server.log-2024-01-01`, ...)
//! - **Overlay**: `LogFileOverlay`, a decorator that answers all queries
//!   for the reserved `log-file` child type from the filesystem and
//!   delegates everything else to the wrapped real node
//!
//! # Design
//!
//! ```text
//! caller ── Resource ops ──▶ LogFileOverlay
//!                              ├── "log-file" type ──▶ handlers + discovery
//!                              └── everything else ──▶ wrapped real node
//! ```
//!
//! Virtual entries are recomputed on every query; nothing is cached and
//! nothing is persisted. Mutating the `log-file` namespace always fails.

pub mod discovery;
pub mod handlers;
pub mod overlay;
pub mod paths;
pub mod tree;

pub use handlers::{HandlerKind, file_handler_model, resolve_file_names};
pub use overlay::{LOG_FILE, LogFileOverlay};
pub use paths::{DirectoryResolver, LOG_DIR, StaticDirectories};
pub use tree::{
    BasicResource, PathAddress, PathElement, PlaceholderResource, Resource, ResourceEntry,
    ResourceError,
};
