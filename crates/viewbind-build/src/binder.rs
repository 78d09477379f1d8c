use crate::{
    CodeBuilder, EmitError,
    plan::{Instruction, PlanEntry},
    unit::{Unit, access_tokens, parse_ident, parse_path},
};
use convert_case::{Case, Casing};
use proc_macro2::TokenStream;
use quote::quote;
use std::collections::BTreeMap;
use syn::{Ident, Path};
use viewbind_schema::types::simple_name;

/// Binder unit: dependency holder, one `Bind` impl per method, and the
/// runtime `Dispatch` over every method-table pair.
pub(crate) fn generate(builder: &CodeBuilder) -> Result<Unit, EmitError> {
    let mut unit = Unit::new();
    for item in ["Bind", "Component", "Data", "Dispatch", "Error", "dispatch_as"] {
        unit.import(&builder.runtime_item(item))?;
    }
    if builder.plan.entries.iter().any(has_actions) {
        unit.import(&builder.runtime_item("bind_action"))?;
    }

    let binder = parse_ident(&builder.config.binder.type_name)?;
    let deps = DependencyFields::new(&builder.plan.dependencies())?;

    unit.push(binder_struct(&binder, &deps));
    for entry in &builder.plan.entries {
        unit.push(bind_impl(&binder, &deps, entry)?);
    }
    unit.push(dispatch_impl(&binder, &builder.plan.entries)?);

    Ok(unit)
}

fn has_actions(entry: &PlanEntry) -> bool {
    entry.instructions.iter().any(|ins| {
        matches!(
            ins,
            Instruction::AttachAction { .. } | Instruction::AttachFieldAction { .. }
        )
    })
}

///
/// DependencyFields
///
/// Binder field per distinct dependency type, named after the type in
/// snake case.
///

struct DependencyFields {
    fields: Vec<(Ident, Path)>,
    by_type: BTreeMap<String, usize>,
}

impl DependencyFields {
    fn new(types: &[&str]) -> Result<Self, EmitError> {
        let mut fields: Vec<(Ident, Path)> = Vec::with_capacity(types.len());
        let mut by_type = BTreeMap::new();

        for ty in types {
            let base = simple_name(ty).to_case(Case::Snake);
            let mut name = if parse_ident(&base).is_ok() {
                base.clone()
            } else {
                format!("{base}_")
            };

            let mut n = 2;
            while fields.iter().any(|(ident, _)| *ident == name) {
                name = format!("{base}_{n}");
                n += 1;
            }

            by_type.insert((*ty).to_string(), fields.len());
            fields.push((parse_ident(&name)?, parse_path(ty)?));
        }

        Ok(Self { fields, by_type })
    }

    fn field(&self, ty: &str) -> Option<&Ident> {
        self.by_type.get(ty).map(|idx| &self.fields[*idx].0)
    }
}

fn binder_struct(binder: &Ident, deps: &DependencyFields) -> TokenStream {
    let names: Vec<_> = deps.fields.iter().map(|(name, _)| name).collect();
    let types: Vec<_> = deps.fields.iter().map(|(_, ty)| ty).collect();

    quote! {
        pub struct #binder {
            #(pub #names: #types,)*
        }

        impl #binder {
            #[must_use]
            pub const fn new(#(#names: #types),*) -> Self {
                Self { #(#names),* }
            }
        }
    }
}

fn bind_impl(
    binder: &Ident,
    deps: &DependencyFields,
    entry: &PlanEntry,
) -> Result<TokenStream, EmitError> {
    let component = parse_path(&entry.component_type)?;
    let data = parse_path(&entry.data_type)?;

    let mut body = quote!();
    for ins in &entry.instructions {
        body.extend(statement(deps, ins)?);
    }

    Ok(quote! {
        impl Bind<#component, #data> for #binder {
            fn bind(&self, component: &mut #component, data: &#data) {
                #body
            }
        }
    })
}

fn statement(deps: &DependencyFields, ins: &Instruction) -> Result<TokenStream, EmitError> {
    let tokens = match ins {
        Instruction::InvokeBinder {
            owner_type,
            method_name,
            dependencies,
        } => {
            let owner = parse_path(owner_type)?;
            let method = parse_ident(method_name)?;
            let args = dependencies
                .iter()
                .map(|ty| {
                    deps.field(ty).ok_or_else(|| EmitError::TypePath { path: ty.clone() })
                })
                .collect::<Result<Vec<_>, _>>()?;

            quote!(#owner::#method(component, data #(, &self.#args)*);)
        }
        Instruction::AttachAction { access_path } => {
            let access = access_tokens(access_path)?;

            quote!(bind_action(&mut *component, &data #access);)
        }
        Instruction::RecurseBind {
            field_name,
            access_path,
            component_type,
            data_type,
        } => {
            let field = parse_ident(field_name)?;
            let access = access_tokens(access_path)?;
            let field_component = parse_path(component_type)?;
            let field_data = parse_path(data_type)?;

            quote! {
                Bind::<#field_component, #field_data>::bind(self, &mut component.#field, &data #access);
            }
        }
        Instruction::AttachFieldAction {
            field_name,
            access_path,
        } => {
            let field = parse_ident(field_name)?;
            let access = access_tokens(access_path)?;

            quote!(bind_action(&mut component.#field, &data #access);)
        }
    };

    Ok(tokens)
}

fn dispatch_impl(binder: &Ident, entries: &[PlanEntry]) -> Result<TokenStream, EmitError> {
    let mut arms = quote!();

    for entry in entries {
        let component_name = entry.key.component.as_str();
        let data_name = entry.key.data.as_str();
        let component = parse_path(&entry.component_type)?;
        let data = parse_path(&entry.data_type)?;

        arms.extend(quote! {
            (#component_name, #data_name) => {
                dispatch_as::<#component, #data, Self>(self, component, data)
            }
        });
    }

    Ok(quote! {
        impl Dispatch for #binder {
            fn dispatch(&self, component: &mut dyn Component, data: &dyn Data) -> Result<(), Error> {
                match (component.name(), data.name()) {
                    #arms
                    (component_name, data_name) => Err(Error::unbound_pair(component_name, data_name)),
                }
            }
        }
    })
}
