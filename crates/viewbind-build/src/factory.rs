use crate::{
    CodeBuilder, EmitError,
    unit::{Unit, parse_ident, parse_path},
};
use quote::quote;

/// Factory unit: builds the component registered for a data value, when that
/// component is `Buildable`.
pub(crate) fn generate(builder: &CodeBuilder) -> Result<Unit, EmitError> {
    let cases = &builder.factory_cases;

    let mut unit = Unit::new();
    for item in ["Component", "ComponentFactory", "Data", "Error"] {
        unit.import(&builder.runtime_item(item))?;
    }
    if !cases.is_empty() {
        unit.import(&builder.runtime_item("Buildable"))?;
    }

    let factory = parse_ident(&builder.config.factory.type_name)?;

    let mut arms = quote!();
    for case in cases {
        let data_name = case.data_name.as_str();
        let component = parse_path(&case.component_type)?;

        arms.extend(quote! {
            #data_name => Ok(Box::new(<#component as Buildable>::create())),
        });
    }

    unit.push(quote! {
        pub struct #factory;

        impl ComponentFactory for #factory {
            fn build(&self, data: &dyn Data) -> Result<Box<dyn Component>, Error> {
                match data.name() {
                    #arms
                    name => Err(Error::unbuildable_data(name)),
                }
            }
        }
    });

    Ok(unit)
}
