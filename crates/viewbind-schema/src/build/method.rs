use super::{
    Builder,
    validate::{check_method_name, check_type_path},
};
use crate::{
    decl::BindingMethodDecl,
    error::{ErrorTree, MethodShapeReason, ResolveError},
    node::BindingMethod,
    types::ParamTag,
};
use std::cmp::Ordering;
use tracing::debug;

impl Builder {
    pub(crate) fn binding_methods(&mut self, decls: &[BindingMethodDecl]) {
        for decl in decls {
            let route = format!("{}::{}", decl.owner_type, decl.method_name);

            match shape_method(decl) {
                Ok(method) => self.register_method(&route, method),
                Err(errs) => {
                    debug!(method = %route, errors = errs.len(), "binding method rejected");
                    self.errors.merge_route(route, errs);
                }
            }
        }

        debug!(count = self.graph.methods.len(), "binding methods resolved");
    }

    // Two methods for one key keep the lexicographically smaller qualified
    // name, whichever order they arrive in.
    fn register_method(&mut self, route: &str, method: BindingMethod) {
        let key = method.key();

        let Some(existing) = self.graph.methods.get(&key) else {
            self.graph.methods.insert(key, method);
            return;
        };

        let (kept, rejected) = match existing.qualified_name().cmp(&method.qualified_name()) {
            Ordering::Greater => {
                let previous = existing.qualified_name();
                self.graph.methods.insert(key.clone(), method);

                (self.graph.methods[&key].qualified_name(), previous)
            }
            _ => (existing.qualified_name(), method.qualified_name()),
        };

        debug!(method = %route, rejected = %rejected, "duplicate binding method");

        self.errors.add_route(
            rejected.clone(),
            ResolveError::DuplicateMethod {
                key,
                existing: kept,
                rejected,
            },
        );
    }
}

// Check the `(component, data, dependency*)` parameter shape and build the
// table entry. All violations of one method are reported together.
fn shape_method(decl: &BindingMethodDecl) -> Result<BindingMethod, ErrorTree> {
    let mut errs = ErrorTree::new();

    check_type_path(&decl.owner_type, &mut errs);
    check_method_name(&decl.method_name, &mut errs);

    if !(decl.is_public && decl.is_static) {
        errs.add(MethodShapeReason::NotPublicStatic);
        return Err(errs);
    }

    let mut component_type = None;
    let mut data_type = None;
    let mut dependency_types = Vec::new();

    for (position, param) in decl.parameters.iter().enumerate() {
        match param.tag {
            Some(ParamTag::Component) if position == 0 => component_type = Some(&param.ty),
            Some(ParamTag::Component) => errs.add(MethodShapeReason::MisplacedComponent { position }),
            Some(ParamTag::Data) if position == 1 => data_type = Some(&param.ty),
            Some(ParamTag::Data) => errs.add(MethodShapeReason::MisplacedData { position }),
            Some(ParamTag::Dependency) if position >= 2 => dependency_types.push(param.ty.clone()),
            Some(ParamTag::Dependency) => {
                errs.add(MethodShapeReason::MisplacedDependency { position });
            }
            None => errs.add(MethodShapeReason::Untagged { position }),
        }

        check_type_path(&param.ty, &mut errs);
    }

    let (Some(component_type), Some(data_type)) = (component_type, data_type) else {
        errs.add(MethodShapeReason::MissingComponentOrData);
        return Err(errs);
    };

    errs.result()?;

    Ok(BindingMethod {
        owner_type: decl.owner_type.clone(),
        method_name: decl.method_name.clone(),
        component_type: component_type.clone(),
        data_type: data_type.clone(),
        dependency_types,
    })
}
