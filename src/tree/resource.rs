//! Core tree trait and addressing types.

use std::collections::BTreeSet;
use std::fmt;

use serde_json::Value as JsonValue;
use thiserror::Error;

/// Errors raised by tree operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResourceError {
    #[error("no resource at {0}")]
    NoSuchResource(PathElement),
    #[error("resource already registered at {0}")]
    DuplicateResource(PathElement),
    #[error("resources of type {0} cannot be registered")]
    CannotRegister(String),
    #[error("resources of type {0} cannot be removed")]
    CannotRemove(String),
    #[error("indexed registration is not supported for type {0}")]
    IndexedRegistrationUnsupported(String),
    #[error("resource is read-only")]
    ReadOnly,
}

/// One addressing step: a `(child-type, child-name)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathElement {
    key: String,
    value: String,
}

impl PathElement {
    /// Create an element from a child type and a child name.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// The child type (e.g. `file-handler`).
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The child name (e.g. `srv`).
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for PathElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// A sequence of [`PathElement`]s addressing a node from some root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathAddress {
    elements: Vec<PathElement>,
}

impl PathAddress {
    /// Create an address from its elements.
    pub fn new(elements: Vec<PathElement>) -> Self {
        Self { elements }
    }

    /// The empty address (the node itself).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of elements.
    pub fn size(&self) -> usize {
        self.elements.len()
    }

    /// True if this is the empty address.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Element at `index`, if any.
    pub fn element(&self, index: usize) -> Option<&PathElement> {
        self.elements.get(index)
    }

    /// Iterate over the elements in order.
    pub fn iter(&self) -> std::slice::Iter<'_, PathElement> {
        self.elements.iter()
    }
}

impl fmt::Display for PathAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.elements.is_empty() {
            return write!(f, "/");
        }
        for element in &self.elements {
            write!(f, "/{}", element)?;
        }
        Ok(())
    }
}

impl From<PathElement> for PathAddress {
    fn from(element: PathElement) -> Self {
        Self::new(vec![element])
    }
}

/// An enumerated child: its address element plus the resource itself.
pub struct ResourceEntry {
    /// The `(type, name)` step that addresses this child from its parent.
    pub element: PathElement,
    /// The child resource.
    pub resource: Box<dyn Resource>,
}

impl ResourceEntry {
    /// Create an entry for a child of the given type and name.
    pub fn new(
        key: impl Into<String>,
        value: impl Into<String>,
        resource: Box<dyn Resource>,
    ) -> Self {
        Self {
            element: PathElement::new(key, value),
            resource,
        }
    }

    /// The child name.
    pub fn name(&self) -> &str {
        self.element.value()
    }
}

impl fmt::Debug for ResourceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceEntry")
            .field("element", &self.element)
            .finish()
    }
}

/// A position in a hierarchical management tree.
///
/// Nodes expose a JSON attribute model, typed children, and mutation
/// operations. Implementations must tolerate concurrent readers; this
/// trait adds no locking of its own.
pub trait Resource: Send + Sync + fmt::Debug {
    // ── Model ──────────────────────────────────────────────────────────

    /// The node's attribute model. `Null` when undefined.
    fn model(&self) -> JsonValue;

    /// Replace the node's attribute model.
    fn write_model(&mut self, model: JsonValue) -> Result<(), ResourceError>;

    /// True if the model has been defined (is not `Null`).
    fn is_model_defined(&self) -> bool;

    // ── Children ───────────────────────────────────────────────────────

    /// True if a child exists at `element`.
    fn has_child(&self, element: &PathElement) -> bool {
        self.get_child(element).is_some()
    }

    /// The child at `element`, if any.
    fn get_child(&self, element: &PathElement) -> Option<&dyn Resource>;

    /// The child at `element`, or [`ResourceError::NoSuchResource`].
    fn require_child(&self, element: &PathElement) -> Result<&dyn Resource, ResourceError> {
        self.get_child(element)
            .ok_or_else(|| ResourceError::NoSuchResource(element.clone()))
    }

    /// True if at least one child of `child_type` exists.
    fn has_children(&self, child_type: &str) -> bool;

    /// Follow `address` down from this node.
    fn navigate(&self, address: &PathAddress) -> Result<&dyn Resource, ResourceError>;

    /// All child types present on this node, sorted.
    fn child_types(&self) -> BTreeSet<String>;

    /// Names of all children of `child_type`, sorted and deduplicated.
    fn children_names(&self, child_type: &str) -> BTreeSet<String>;

    /// All children of `child_type` as entries, in name order.
    fn children(&self, child_type: &str) -> Vec<ResourceEntry>;

    // ── Mutation ───────────────────────────────────────────────────────

    /// Register a child at `element`.
    fn register_child(
        &mut self,
        element: PathElement,
        resource: Box<dyn Resource>,
    ) -> Result<(), ResourceError>;

    /// Register a child at `element` at the given sibling index.
    fn register_child_at(
        &mut self,
        element: PathElement,
        index: usize,
        resource: Box<dyn Resource>,
    ) -> Result<(), ResourceError>;

    /// Remove and return the child at `element`.
    fn remove_child(&mut self, element: &PathElement) -> Result<Box<dyn Resource>, ResourceError>;

    // ── Flags and cloning ──────────────────────────────────────────────

    /// True if this node is runtime-only state.
    fn is_runtime(&self) -> bool;

    /// True if this node proxies a remote tree.
    fn is_proxy(&self) -> bool;

    /// Deep copy of this node and its children.
    fn clone_resource(&self) -> Box<dyn Resource>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_element_display() {
        let element = PathElement::new("file-handler", "srv");
        assert_eq!(element.to_string(), "file-handler=srv");
        assert_eq!(element.key(), "file-handler");
        assert_eq!(element.value(), "srv");
    }

    #[test]
    fn test_path_address_display() {
        assert_eq!(PathAddress::empty().to_string(), "/");

        let address = PathAddress::new(vec![
            PathElement::new("subsystem", "logging"),
            PathElement::new("log-file", "server.log"),
        ]);
        assert_eq!(address.to_string(), "/subsystem=logging/log-file=server.log");
        assert_eq!(address.size(), 2);
        assert_eq!(address.element(1).map(|e| e.value()), Some("server.log"));
        assert!(address.element(2).is_none());
    }

    #[test]
    fn test_address_from_element() {
        let address = PathAddress::from(PathElement::new("log-file", "a.log"));
        assert_eq!(address.size(), 1);
    }

    #[test]
    fn test_error_messages() {
        let err = ResourceError::NoSuchResource(PathElement::new("log-file", "x"));
        assert_eq!(err.to_string(), "no resource at log-file=x");

        let err = ResourceError::CannotRegister("log-file".into());
        assert_eq!(err.to_string(), "resources of type log-file cannot be registered");
    }
}
