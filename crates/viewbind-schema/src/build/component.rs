use super::{Builder, validate::check_type_path};
use crate::{
    decl::{BindableComponentDecl, BindableDataDecl},
    error::ErrorTree,
    node::DataEntry,
};
use tracing::{debug, warn};

impl Builder {
    // Explicit declarations upsert; a component first seen through a field or
    // action reference keeps `implements_capability = false` until declared.
    pub(crate) fn components(&mut self, decls: &[BindableComponentDecl]) {
        for decl in decls {
            let mut errs = ErrorTree::new();
            if !check_type_path(&decl.component_type, &mut errs) {
                self.errors.merge_route(decl.component_type.clone(), errs);
                continue;
            }

            let component = self.graph.upsert_component(&decl.component_type);
            component.implements_capability |= decl.implements_capability;
        }

        debug!(count = self.graph.components.len(), "components resolved");
    }

    // Last write wins when a data type is declared twice.
    pub(crate) fn data(&mut self, decls: &[BindableDataDecl]) {
        for decl in decls {
            let mut errs = ErrorTree::new();
            let data_ok = check_type_path(&decl.data_type, &mut errs);
            let component_ok = check_type_path(&decl.component_type, &mut errs);
            if !(data_ok && component_ok) {
                self.errors.merge_route(decl.data_type.clone(), errs);
                continue;
            }

            let entry = DataEntry {
                data_type: decl.data_type.clone(),
                component_type: decl.component_type.clone(),
            };

            if let Some(previous) = self.graph.data.insert(decl.data_type.clone(), entry)
                && previous.component_type != decl.component_type
            {
                warn!(
                    data = %decl.data_type,
                    previous = %previous.component_type,
                    current = %decl.component_type,
                    "data type redeclared with a different component, keeping the last one"
                );
            }
        }

        debug!(count = self.graph.data.len(), "data entries resolved");
    }
}
