//! File-producing handler configuration.
//!
//! Only a fixed, closed set of handler kinds writes log files. This module
//! projects the configuration tree down to those entries and extracts the
//! file names they are configured to produce, so discovery knows what to
//! look for on disk.

use std::collections::HashSet;

use serde_json::{Map, Value as JsonValue};

use crate::paths::LOG_DIR;
use crate::tree::{PathElement, Resource};

/// Handler model attribute holding the file specification.
pub const FILE: &str = "file";
/// File-spec field: the configured path.
pub const PATH: &str = "path";
/// File-spec field: the alias the path is anchored to.
pub const RELATIVE_TO: &str = "relative-to";

/// The closed set of handler kinds that produce files.
///
/// Unsupported kinds simply do not exist as variants, so the "is this a
/// file handler" question is settled at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlerKind {
    File,
    PeriodicRotatingFile,
    PeriodicSizeRotatingFile,
    SizeRotatingFile,
}

impl HandlerKind {
    /// Every file-producing kind.
    pub const ALL: [HandlerKind; 4] = [
        HandlerKind::File,
        HandlerKind::PeriodicRotatingFile,
        HandlerKind::PeriodicSizeRotatingFile,
        HandlerKind::SizeRotatingFile,
    ];

    /// The child-type key this kind uses in the configuration tree.
    pub fn key(&self) -> &'static str {
        match self {
            HandlerKind::File => "file-handler",
            HandlerKind::PeriodicRotatingFile => "periodic-rotating-file-handler",
            HandlerKind::PeriodicSizeRotatingFile => "periodic-size-rotating-file-handler",
            HandlerKind::SizeRotatingFile => "size-rotating-file-handler",
        }
    }

    /// Parse a child-type key back into a kind.
    pub fn from_key(key: &str) -> Option<HandlerKind> {
        HandlerKind::ALL.into_iter().find(|kind| kind.key() == key)
    }
}

/// Read-only projection of `root` restricted to file-producing handlers.
///
/// The result maps each present handler-kind key to a `{name: model}`
/// object. The source tree is never mutated.
pub fn file_handler_model(root: &dyn Resource) -> JsonValue {
    let mut result = Map::new();
    for kind in HandlerKind::ALL {
        let key = kind.key();
        let mut handlers = Map::new();
        for name in root.children_names(key) {
            if let Some(child) = root.get_child(&PathElement::new(key, name.as_str())) {
                handlers.insert(name, child.model());
            }
        }
        if !handlers.is_empty() {
            result.insert(key.to_string(), JsonValue::Object(handlers));
        }
    }
    JsonValue::Object(result)
}

/// Extract the configured file names from a handler model projection.
///
/// A handler contributes a name only when its file spec is present,
/// anchored to [`LOG_DIR`], and carries a path. Under-specified or
/// externally-rooted handlers are skipped rather than failing the whole
/// resolution. Duplicates across handlers collapse; iteration order of the
/// result is deliberately unspecified.
pub fn resolve_file_names(model: &JsonValue) -> HashSet<String> {
    let mut names = HashSet::new();
    let Some(kinds) = model.as_object() else {
        return names;
    };
    for (key, handlers) in kinds {
        if HandlerKind::from_key(key).is_none() {
            continue;
        }
        let Some(handlers) = handlers.as_object() else {
            continue;
        };
        for handler in handlers.values() {
            let Some(file) = handler.get(FILE) else {
                continue;
            };
            // Only paths anchored to the log directory are interesting.
            if file.get(RELATIVE_TO).and_then(JsonValue::as_str) != Some(LOG_DIR) {
                continue;
            }
            if let Some(path) = file.get(PATH).and_then(JsonValue::as_str) {
                names.insert(path.to_string());
            }
        }
    }
    names
}
