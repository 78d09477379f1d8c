use crate::node::{BindingMethod, Component, DataEntry, MethodKey};
use serde::Serialize;
use std::collections::BTreeMap;

///
/// Graph
///
/// The resolved binding graph for one run. Built once by the resolver,
/// read-only afterwards.
///
/// - `methods`: binding-method table keyed by simple `(component, data)` names
/// - `components`: keyed by full component type path
/// - `data`: keyed by full data type path
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Graph {
    pub methods: BTreeMap<MethodKey, BindingMethod>,
    pub components: BTreeMap<String, Component>,
    pub data: BTreeMap<String, DataEntry>,
}

impl Graph {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            methods: BTreeMap::new(),
            components: BTreeMap::new(),
            data: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn method(&self, key: &MethodKey) -> Option<&BindingMethod> {
        self.methods.get(key)
    }

    #[must_use]
    pub fn has_method(&self, key: &MethodKey) -> bool {
        self.methods.contains_key(key)
    }

    #[must_use]
    pub fn component(&self, component_type: &str) -> Option<&Component> {
        self.components.get(component_type)
    }

    #[must_use]
    pub fn data_entry(&self, data_type: &str) -> Option<&DataEntry> {
        self.data.get(data_type)
    }

    /// Component for a data entry, if that component was declared at all.
    #[must_use]
    pub fn component_for_data(&self, entry: &DataEntry) -> Option<&Component> {
        self.component(&entry.component_type)
    }

    /// Fetch a component, registering it implicitly if it is not known yet.
    pub(crate) fn upsert_component(&mut self, component_type: &str) -> &mut Component {
        self.components
            .entry(component_type.to_string())
            .or_insert_with(|| Component::new(component_type))
    }

    /// True when there is nothing to dispatch.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}
