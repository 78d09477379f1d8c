//! Declaration records: the pre-extracted input of one resolution run.
//!
//! One record per annotated site. Records are immutable and carry capability
//! markers as plain values; nothing here looks at host reflection.

mod source;

pub use source::*;

use crate::types::ParamTag;
use serde::{Deserialize, Serialize};

const fn default_true() -> bool {
    true
}

///
/// DeclarationSet
///
/// The full, ordered declaration list for one run.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeclarationSet {
    pub binding_methods: Vec<BindingMethodDecl>,
    pub components: Vec<BindableComponentDecl>,
    pub field_bindings: Vec<FieldBindingDecl>,
    pub field_actions: Vec<FieldActionDecl>,
    pub class_actions: Vec<ClassActionDecl>,
    pub data: Vec<BindableDataDecl>,
}

impl DeclarationSet {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            binding_methods: Vec::new(),
            components: Vec::new(),
            field_bindings: Vec::new(),
            field_actions: Vec::new(),
            class_actions: Vec::new(),
            data: Vec::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.binding_methods.len()
            + self.components.len()
            + self.field_bindings.len()
            + self.field_actions.len()
            + self.class_actions.len()
            + self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

///
/// BindingMethodDecl
///
/// A function binding one component/data pair. Parameters keep their host
/// tags so that the resolver can check the expected shape
/// `(component, data, dependency*)`.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BindingMethodDecl {
    pub owner_type: String,
    pub method_name: String,

    #[serde(default)]
    pub parameters: Vec<ParamDecl>,

    #[serde(default = "default_true")]
    pub is_public: bool,

    /// Associated function with no receiver.
    #[serde(default = "default_true")]
    pub is_static: bool,
}

impl BindingMethodDecl {
    /// A well-formed public static method `(component, data, deps..)`.
    pub fn new<I, S>(
        owner_type: impl Into<String>,
        method_name: impl Into<String>,
        component_type: impl Into<String>,
        data_type: impl Into<String>,
        dependency_types: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut parameters = vec![
            ParamDecl::tagged(component_type, ParamTag::Component),
            ParamDecl::tagged(data_type, ParamTag::Data),
        ];
        parameters.extend(
            dependency_types
                .into_iter()
                .map(|ty| ParamDecl::tagged(ty, ParamTag::Dependency)),
        );

        Self {
            owner_type: owner_type.into(),
            method_name: method_name.into(),
            parameters,
            is_public: true,
            is_static: true,
        }
    }
}

///
/// ParamDecl
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ParamDecl {
    pub ty: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<ParamTag>,
}

impl ParamDecl {
    pub fn tagged(ty: impl Into<String>, tag: ParamTag) -> Self {
        Self {
            ty: ty.into(),
            tag: Some(tag),
        }
    }

    pub fn untagged(ty: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            tag: None,
        }
    }
}

///
/// BindableComponentDecl
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BindableComponentDecl {
    pub component_type: String,

    /// Whether the component can be instantiated through the capability trait.
    #[serde(default)]
    pub implements_capability: bool,
}

impl BindableComponentDecl {
    pub fn new(component_type: impl Into<String>, implements_capability: bool) -> Self {
        Self {
            component_type: component_type.into(),
            implements_capability,
        }
    }
}

///
/// FieldBindingDecl
///
/// A component field that is itself bound, through data paths
/// `Leading.(nested.)*field:Target`.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FieldBindingDecl {
    pub owner_component_type: String,
    pub field_name: String,
    pub field_component_type: String,
    pub paths: Vec<String>,
}

impl FieldBindingDecl {
    pub fn new<I, S>(
        owner_component_type: impl Into<String>,
        field_name: impl Into<String>,
        field_component_type: impl Into<String>,
        paths: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            owner_component_type: owner_component_type.into(),
            field_name: field_name.into(),
            field_component_type: field_component_type.into(),
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }
}

///
/// FieldActionDecl
///
/// A component field receiving an action, through action paths
/// `Leading.(nested.)*field`.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FieldActionDecl {
    pub owner_component_type: String,
    pub field_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_component_type: Option<String>,

    pub paths: Vec<String>,
}

impl FieldActionDecl {
    pub fn new<I, S>(
        owner_component_type: impl Into<String>,
        field_name: impl Into<String>,
        paths: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            owner_component_type: owner_component_type.into(),
            field_name: field_name.into(),
            field_component_type: None,
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }
}

///
/// ClassActionDecl
///
/// The component itself receives an action.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ClassActionDecl {
    pub component_type: String,
    pub paths: Vec<String>,
}

impl ClassActionDecl {
    pub fn new<I, S>(component_type: impl Into<String>, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            component_type: component_type.into(),
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }
}

///
/// BindableDataDecl
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BindableDataDecl {
    pub data_type: String,
    pub component_type: String,
}

impl BindableDataDecl {
    pub fn new(data_type: impl Into<String>, component_type: impl Into<String>) -> Self {
        Self {
            data_type: data_type.into(),
            component_type: component_type.into(),
        }
    }
}
