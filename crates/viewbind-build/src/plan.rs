//! Dispatch planning: a pure projection of the resolved graph into the
//! instruction lists the emitters render.

use serde::Serialize;
use std::collections::BTreeSet;
use viewbind_schema::{
    node::{BindingMethod, Graph, MethodKey},
    types::simple_name,
};

///
/// Instruction
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Instruction {
    /// `Owner::method(component, data, deps..)`
    InvokeBinder {
        owner_type: String,
        method_name: String,
        dependencies: Vec<String>,
    },

    /// Attach the data value's action to the component itself.
    AttachAction { access_path: String },

    /// Bind a child field with the method registered for its own pair.
    RecurseBind {
        field_name: String,
        access_path: String,
        component_type: String,
        data_type: String,
    },

    /// Attach the data value's action to a child field.
    AttachFieldAction {
        field_name: String,
        access_path: String,
    },
}

///
/// PlanEntry
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PlanEntry {
    pub key: MethodKey,
    pub component_type: String,
    pub data_type: String,
    pub instructions: Vec<Instruction>,
}

///
/// DispatchPlan
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct DispatchPlan {
    pub entries: Vec<PlanEntry>,
}

impl DispatchPlan {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct dependency types in first-use order.
    #[must_use]
    pub fn dependencies(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();

        self.entries
            .iter()
            .flat_map(|entry| &entry.instructions)
            .filter_map(|ins| match ins {
                Instruction::InvokeBinder { dependencies, .. } => Some(dependencies),
                _ => None,
            })
            .flatten()
            .map(String::as_str)
            .filter(|dep| seen.insert(*dep))
            .collect()
    }
}

/// One entry per binding method, in method-table order.
#[must_use]
pub fn plan(graph: &Graph) -> DispatchPlan {
    let entries = graph
        .methods
        .iter()
        .map(|(key, method)| plan_entry(graph, key, method))
        .collect();

    DispatchPlan { entries }
}

fn plan_entry(graph: &Graph, key: &MethodKey, method: &BindingMethod) -> PlanEntry {
    let mut instructions = vec![Instruction::InvokeBinder {
        owner_type: method.owner_type.clone(),
        method_name: method.method_name.clone(),
        dependencies: method.dependency_types.clone(),
    }];

    let data = simple_name(&method.data_type);

    if let Some(component) = graph.component(&method.component_type) {
        if let Some(action) = component.action_for(data) {
            instructions.push(Instruction::AttachAction {
                access_path: action.access_path.clone(),
            });
        }

        for binding in component.field_bindings_for(data) {
            let field_key = MethodKey::new(
                simple_name(&binding.field_component_type),
                binding.field_data_type.as_str(),
            );

            // resolution only accepts bindings whose pair has a method
            let Some(target) = graph.method(&field_key) else {
                continue;
            };

            instructions.push(Instruction::RecurseBind {
                field_name: binding.field_name.clone(),
                access_path: binding.access_path.clone(),
                component_type: target.component_type.clone(),
                data_type: target.data_type.clone(),
            });
        }

        for action in component.field_actions_for(data) {
            instructions.push(Instruction::AttachFieldAction {
                field_name: action.field_name.clone(),
                access_path: action.access_path.clone(),
            });
        }
    }

    PlanEntry {
        key: key.clone(),
        component_type: method.component_type.clone(),
        data_type: method.data_type.clone(),
        instructions,
    }
}

///
/// AdapterCase
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct AdapterCase {
    /// `ComponentData`, the concatenated simple names.
    pub key: String,
    pub component_type: String,
    pub data_type: String,
}

/// One case per bindable data entry whose pair has a binding method.
#[must_use]
pub fn plan_adapter(graph: &Graph) -> Vec<AdapterCase> {
    let mut seen = BTreeSet::new();

    graph
        .data
        .values()
        .filter_map(|entry| graph.method(&MethodKey::for_types(&entry.component_type, &entry.data_type)))
        .filter_map(|method| {
            let key = method.key().adapter_key();

            seen.insert(key.clone()).then(|| AdapterCase {
                key,
                component_type: method.component_type.clone(),
                data_type: method.data_type.clone(),
            })
        })
        .collect()
}

///
/// FactoryCase
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct FactoryCase {
    pub data_name: String,
    pub component_type: String,
}

/// One case per bindable data entry whose component can be built.
#[must_use]
pub fn plan_factory(graph: &Graph) -> Vec<FactoryCase> {
    let mut seen = BTreeSet::new();

    graph
        .data
        .values()
        .filter(|entry| {
            graph
                .component_for_data(entry)
                .is_some_and(|component| component.implements_capability)
        })
        .filter_map(|entry| {
            let data_name = simple_name(&entry.data_type).to_string();

            seen.insert(data_name.clone()).then(|| FactoryCase {
                data_name,
                component_type: entry.component_type.clone(),
            })
        })
        .collect()
}
