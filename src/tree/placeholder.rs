//! Immutable placeholder node for derived children.

use std::collections::BTreeSet;

use serde_json::Value as JsonValue;

use super::resource::{PathAddress, PathElement, Resource, ResourceEntry, ResourceError};

/// Shared placeholder instance for borrowed returns.
pub static PLACEHOLDER: PlaceholderResource = PlaceholderResource;

/// An immutable, attribute-less stand-in for a virtual child.
///
/// Returned for entries that exist only as the result of a query (like
/// discovered log files) and are never stored in the real tree. The model
/// is always undefined and every mutation fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderResource;

impl PlaceholderResource {
    /// Build an enumeration entry wrapping a placeholder.
    pub fn entry(key: impl Into<String>, name: impl Into<String>) -> ResourceEntry {
        ResourceEntry::new(key, name, Box::new(PlaceholderResource))
    }
}

impl Resource for PlaceholderResource {
    fn model(&self) -> JsonValue {
        JsonValue::Null
    }

    fn write_model(&mut self, _model: JsonValue) -> Result<(), ResourceError> {
        Err(ResourceError::ReadOnly)
    }

    fn is_model_defined(&self) -> bool {
        false
    }

    fn get_child(&self, _element: &PathElement) -> Option<&dyn Resource> {
        None
    }

    fn has_children(&self, _child_type: &str) -> bool {
        false
    }

    fn navigate(&self, address: &PathAddress) -> Result<&dyn Resource, ResourceError> {
        match address.element(0) {
            None => Ok(self),
            Some(element) => Err(ResourceError::NoSuchResource(element.clone())),
        }
    }

    fn child_types(&self) -> BTreeSet<String> {
        BTreeSet::new()
    }

    fn children_names(&self, _child_type: &str) -> BTreeSet<String> {
        BTreeSet::new()
    }

    fn children(&self, _child_type: &str) -> Vec<ResourceEntry> {
        Vec::new()
    }

    fn register_child(
        &mut self,
        element: PathElement,
        _resource: Box<dyn Resource>,
    ) -> Result<(), ResourceError> {
        Err(ResourceError::CannotRegister(element.key().to_string()))
    }

    fn register_child_at(
        &mut self,
        element: PathElement,
        _index: usize,
        _resource: Box<dyn Resource>,
    ) -> Result<(), ResourceError> {
        Err(ResourceError::CannotRegister(element.key().to_string()))
    }

    fn remove_child(&mut self, element: &PathElement) -> Result<Box<dyn Resource>, ResourceError> {
        Err(ResourceError::CannotRemove(element.key().to_string()))
    }

    fn is_runtime(&self) -> bool {
        true
    }

    fn is_proxy(&self) -> bool {
        false
    }

    fn clone_resource(&self) -> Box<dyn Resource> {
        Box::new(PlaceholderResource)
    }
}
