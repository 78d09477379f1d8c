use crate::{
    CodeBuilder, EmitError,
    unit::{Unit, parse_ident, parse_path},
};
use quote::quote;

/// Adapter unit: dispatches on the concatenated `ComponentData` key, and
/// only for pairs declared as bindable data.
pub(crate) fn generate(builder: &CodeBuilder) -> Result<Unit, EmitError> {
    let config = builder.config;
    let cases = &builder.adapter_cases;

    let mut unit = Unit::new();
    for item in ["Component", "Data", "Dispatch", "Error"] {
        unit.import(&builder.runtime_item(item))?;
    }
    if !cases.is_empty() {
        unit.import(&builder.runtime_item("dispatch_as"))?;
    }
    unit.import(&format!(
        "super::{}::{}",
        config.binder.module, config.binder.type_name
    ))?;

    let adapter = parse_ident(&config.adapter.type_name)?;
    let binder = parse_ident(&config.binder.type_name)?;

    let mut arms = quote!();
    for case in cases {
        let key = case.key.as_str();
        let component = parse_path(&case.component_type)?;
        let data = parse_path(&case.data_type)?;

        arms.extend(quote! {
            #key => dispatch_as::<#component, #data, #binder>(self.binder, component, data),
        });
    }

    unit.push(quote! {
        pub struct #adapter<'a> {
            binder: &'a #binder,
        }

        impl<'a> #adapter<'a> {
            #[must_use]
            pub const fn new(binder: &'a #binder) -> Self {
                Self { binder }
            }
        }

        impl Dispatch for #adapter<'_> {
            fn dispatch(&self, component: &mut dyn Component, data: &dyn Data) -> Result<(), Error> {
                let key = format!("{}{}", component.name(), data.name());

                match key.as_str() {
                    #arms
                    _ => Err(Error::unbound_pair(component.name(), data.name())),
                }
            }
        }
    });

    Ok(unit)
}
