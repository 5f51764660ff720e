//! In-memory tree node.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value as JsonValue;

use super::resource::{PathAddress, PathElement, Resource, ResourceEntry, ResourceError};

/// In-memory tree node holding real configuration state.
///
/// Children are kept in `BTreeMap`s keyed by type and then name, so
/// enumeration order is deterministic. Ordered child types are not
/// supported; indexed registration fails.
#[derive(Default)]
pub struct BasicResource {
    model: JsonValue,
    children: BTreeMap<String, BTreeMap<String, Box<dyn Resource>>>,
}

impl BasicResource {
    /// Create an empty node with an undefined model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a node with the given model.
    pub fn with_model(model: JsonValue) -> Self {
        Self {
            model,
            children: BTreeMap::new(),
        }
    }
}

impl std::fmt::Debug for BasicResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicResource")
            .field("model", &self.model)
            .field("child_types", &self.children.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Resource for BasicResource {
    fn model(&self) -> JsonValue {
        self.model.clone()
    }

    fn write_model(&mut self, model: JsonValue) -> Result<(), ResourceError> {
        self.model = model;
        Ok(())
    }

    fn is_model_defined(&self) -> bool {
        !self.model.is_null()
    }

    fn get_child(&self, element: &PathElement) -> Option<&dyn Resource> {
        self.children
            .get(element.key())
            .and_then(|named| named.get(element.value()))
            .map(|child| child.as_ref())
    }

    fn has_children(&self, child_type: &str) -> bool {
        self.children
            .get(child_type)
            .is_some_and(|named| !named.is_empty())
    }

    fn navigate(&self, address: &PathAddress) -> Result<&dyn Resource, ResourceError> {
        let mut current: &dyn Resource = self;
        for element in address.iter() {
            current = current.require_child(element)?;
        }
        Ok(current)
    }

    fn child_types(&self) -> BTreeSet<String> {
        self.children.keys().cloned().collect()
    }

    fn children_names(&self, child_type: &str) -> BTreeSet<String> {
        self.children
            .get(child_type)
            .map(|named| named.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn children(&self, child_type: &str) -> Vec<ResourceEntry> {
        self.children
            .get(child_type)
            .map(|named| {
                named
                    .iter()
                    .map(|(name, child)| {
                        ResourceEntry::new(child_type, name.clone(), child.clone_resource())
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn register_child(
        &mut self,
        element: PathElement,
        resource: Box<dyn Resource>,
    ) -> Result<(), ResourceError> {
        let named = self.children.entry(element.key().to_string()).or_default();
        if named.contains_key(element.value()) {
            return Err(ResourceError::DuplicateResource(element));
        }
        named.insert(element.value().to_string(), resource);
        Ok(())
    }

    fn register_child_at(
        &mut self,
        element: PathElement,
        _index: usize,
        _resource: Box<dyn Resource>,
    ) -> Result<(), ResourceError> {
        // No ordered child types here, same as a plain factory-created node.
        Err(ResourceError::IndexedRegistrationUnsupported(
            element.key().to_string(),
        ))
    }

    fn remove_child(&mut self, element: &PathElement) -> Result<Box<dyn Resource>, ResourceError> {
        let removed = self
            .children
            .get_mut(element.key())
            .and_then(|named| named.remove(element.value()));
        removed.ok_or_else(|| ResourceError::NoSuchResource(element.clone()))
    }

    fn is_runtime(&self) -> bool {
        false
    }

    fn is_proxy(&self) -> bool {
        false
    }

    fn clone_resource(&self) -> Box<dyn Resource> {
        let children = self
            .children
            .iter()
            .map(|(kind, named)| {
                let named = named
                    .iter()
                    .map(|(name, child)| (name.clone(), child.clone_resource()))
                    .collect();
                (kind.clone(), named)
            })
            .collect();
        Box::new(Self {
            model: self.model.clone(),
            children,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn child_with_model(model: JsonValue) -> Box<dyn Resource> {
        Box::new(BasicResource::with_model(model))
    }

    #[test]
    fn test_model_roundtrip() {
        let mut node = BasicResource::new();
        assert!(!node.is_model_defined());

        node.write_model(json!({"level": "INFO"})).unwrap();
        assert!(node.is_model_defined());
        assert_eq!(node.model(), json!({"level": "INFO"}));
    }

    #[test]
    fn test_register_and_lookup() {
        let mut node = BasicResource::new();
        let element = PathElement::new("file-handler", "srv");
        node.register_child(element.clone(), child_with_model(json!({"a": 1})))
            .unwrap();

        assert!(node.has_child(&element));
        assert!(node.has_children("file-handler"));
        assert!(!node.has_children("console-handler"));
        assert_eq!(
            node.get_child(&element).map(|c| c.model()),
            Some(json!({"a": 1}))
        );
        assert!(node.get_child(&PathElement::new("file-handler", "other")).is_none());
    }

    #[test]
    fn test_register_duplicate_fails() {
        let mut node = BasicResource::new();
        let element = PathElement::new("file-handler", "srv");
        node.register_child(element.clone(), child_with_model(JsonValue::Null))
            .unwrap();

        let err = node
            .register_child(element.clone(), child_with_model(JsonValue::Null))
            .unwrap_err();
        assert_eq!(err, ResourceError::DuplicateResource(element));
    }

    #[test]
    fn test_register_at_index_unsupported() {
        let mut node = BasicResource::new();
        let err = node
            .register_child_at(
                PathElement::new("file-handler", "srv"),
                0,
                child_with_model(JsonValue::Null),
            )
            .unwrap_err();
        assert!(matches!(err, ResourceError::IndexedRegistrationUnsupported(_)));
    }

    #[test]
    fn test_remove_child() {
        let mut node = BasicResource::new();
        let element = PathElement::new("file-handler", "srv");
        node.register_child(element.clone(), child_with_model(json!({"a": 1})))
            .unwrap();

        let removed = node.remove_child(&element).unwrap();
        assert_eq!(removed.model(), json!({"a": 1}));
        assert!(!node.has_child(&element));
        assert!(matches!(
            node.remove_child(&element),
            Err(ResourceError::NoSuchResource(_))
        ));
    }

    #[test]
    fn test_enumeration_is_sorted() {
        let mut node = BasicResource::new();
        for name in ["zeta", "alpha", "mid"] {
            node.register_child(
                PathElement::new("file-handler", name),
                child_with_model(JsonValue::Null),
            )
            .unwrap();
        }

        let names: Vec<String> = node.children_names("file-handler").into_iter().collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);

        let entries = node.children("file-handler");
        let entry_names: Vec<&str> = entries.iter().map(|e| e.name()).collect();
        assert_eq!(entry_names, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_navigate() {
        let mut inner = BasicResource::new();
        inner
            .register_child(
                PathElement::new("file-handler", "srv"),
                child_with_model(json!({"deep": true})),
            )
            .unwrap();

        let mut root = BasicResource::new();
        root.register_child(PathElement::new("subsystem", "logging"), Box::new(inner))
            .unwrap();

        let address = PathAddress::new(vec![
            PathElement::new("subsystem", "logging"),
            PathElement::new("file-handler", "srv"),
        ]);
        let found = root.navigate(&address).unwrap();
        assert_eq!(found.model(), json!({"deep": true}));

        let missing = PathAddress::from(PathElement::new("subsystem", "web"));
        assert!(matches!(
            root.navigate(&missing),
            Err(ResourceError::NoSuchResource(_))
        ));
        assert_eq!(root.navigate(&PathAddress::empty()).unwrap().model(), JsonValue::Null);
    }

    #[test]
    fn test_clone_is_deep() {
        let mut node = BasicResource::new();
        node.register_child(
            PathElement::new("file-handler", "srv"),
            child_with_model(json!({"a": 1})),
        )
        .unwrap();

        let clone = node.clone_resource();
        node.remove_child(&PathElement::new("file-handler", "srv"))
            .unwrap();

        // The clone keeps its own copy of the child.
        assert!(clone.has_child(&PathElement::new("file-handler", "srv")));
    }
}
