use serde::Serialize;
use std::collections::BTreeMap;

///
/// Component
///
/// Everything attached to one component type. The three maps are keyed by the
/// simple name of the data type a path starts from; list order is declaration order.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Component {
    pub component_type: String,
    pub implements_capability: bool,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub field_bindings: BTreeMap<String, Vec<FieldBinding>>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub field_actions: BTreeMap<String, Vec<FieldAction>>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub actions: BTreeMap<String, Action>,
}

impl Component {
    pub fn new(component_type: impl Into<String>) -> Self {
        Self {
            component_type: component_type.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn field_bindings_for(&self, data: &str) -> &[FieldBinding] {
        self.field_bindings.get(data).map(Vec::as_slice).unwrap_or_default()
    }

    #[must_use]
    pub fn field_actions_for(&self, data: &str) -> &[FieldAction] {
        self.field_actions.get(data).map(Vec::as_slice).unwrap_or_default()
    }

    #[must_use]
    pub fn action_for(&self, data: &str) -> Option<&Action> {
        self.actions.get(data)
    }
}

///
/// FieldBinding
///
/// A component field bound to a nested value through another binding method.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct FieldBinding {
    pub field_name: String,
    pub access_path: String,
    pub field_component_type: String,

    /// Simple name taken from the path's `:Target` suffix.
    pub field_data_type: String,
}

///
/// FieldAction
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct FieldAction {
    pub field_name: String,
    pub access_path: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_component_type: Option<String>,
}

///
/// Action
///
/// An action wired onto the component itself.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Action {
    pub component_type: String,
    pub data_type: String,
    pub access_path: String,
}
