use crate::types::simple_name;
use derive_more::Display;
use serde::{Serialize, Serializer};

///
/// MethodKey
///
/// Binding-method table key: simple component and data type names.
///

#[derive(Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[display("{component}:{data}")]
pub struct MethodKey {
    pub component: String,
    pub data: String,
}

impl MethodKey {
    pub fn new(component: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            data: data.into(),
        }
    }

    /// Key for two full type paths.
    #[must_use]
    pub fn for_types(component_type: &str, data_type: &str) -> Self {
        Self::new(simple_name(component_type), simple_name(data_type))
    }

    /// Runtime lookup key used by the adapter dispatcher (`TextViewTextModel`).
    #[must_use]
    pub fn adapter_key(&self) -> String {
        format!("{}{}", self.component, self.data)
    }
}

// serialized as `Component:Data` so it can key a JSON object
impl Serialize for MethodKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

///
/// BindingMethod
///
/// An accepted binding method: `owner_type::method_name(component, data, deps..)`.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct BindingMethod {
    pub owner_type: String,
    pub method_name: String,
    pub component_type: String,
    pub data_type: String,
    pub dependency_types: Vec<String>,
}

impl BindingMethod {
    #[must_use]
    pub fn key(&self) -> MethodKey {
        MethodKey::for_types(&self.component_type, &self.data_type)
    }

    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("{}::{}", self.owner_type, self.method_name)
    }
}
