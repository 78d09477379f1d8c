//! Runtime contract for generated view binders.
//!
//! A build script runs [`build::build!`] over a declaration file; the crate
//! then pulls the generated `binder`, `adapter` and `factory` modules in with
//! [`start!`]. Everything the generated code names lives in this crate.

#[macro_use]
mod macros;
mod action;

pub use action::{Action, Actionable, bind_action};
pub use viewbind_build as build;
pub use viewbind_config_build as config;
pub use viewbind_schema as schema;

use std::any::Any;
use thiserror::Error as ThisError;

///
/// Error
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum Error {
    #[error("cannot bind view for {component} and {data}")]
    UnboundPair {
        component: &'static str,
        data: &'static str,
    },

    #[error("cannot create view for {data}")]
    UnbuildableData { data: &'static str },
}

impl Error {
    #[must_use]
    pub const fn unbound_pair(component: &'static str, data: &'static str) -> Self {
        Self::UnboundPair { component, data }
    }

    #[must_use]
    pub const fn unbuildable_data(data: &'static str) -> Self {
        Self::UnbuildableData { data }
    }
}

///
/// Named
///
/// Simple type name used as the runtime dispatch key. Implement with
/// [`named!`].
///

pub trait Named {
    fn name(&self) -> &'static str;
}

///
/// Component
///

pub trait Component: Named + Any {
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Named + Any> Component for T {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

///
/// Data
///

pub trait Data: Named + Any {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Named + Any> Data for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

///
/// Buildable
///
/// Components the factory may construct from a data value alone.
///

pub trait Buildable: Component + Sized {
    fn create() -> Self;
}

///
/// Bind
///
/// One binding for a statically known `(component, data)` pair.
///

pub trait Bind<C: ?Sized, D: ?Sized> {
    fn bind(&self, component: &mut C, data: &D);
}

///
/// Dispatch
///
/// Binding for a pair only known at runtime.
///

pub trait Dispatch {
    fn dispatch(&self, component: &mut dyn Component, data: &dyn Data) -> Result<(), Error>;
}

///
/// ComponentFactory
///

pub trait ComponentFactory {
    fn build(&self, data: &dyn Data) -> Result<Box<dyn Component>, Error>;
}

/// Downcast both sides to `C` and `D`, then bind them.
///
/// Fails with [`Error::UnboundPair`] when the concrete types differ, which
/// happens when two types share a simple name.
pub fn dispatch_as<C, D, B>(
    binder: &B,
    component: &mut dyn Component,
    data: &dyn Data,
) -> Result<(), Error>
where
    C: Component,
    D: Data,
    B: Bind<C, D> + ?Sized,
{
    let (component_name, data_name) = (component.name(), data.name());

    match (
        component.as_any_mut().downcast_mut::<C>(),
        data.as_any().downcast_ref::<D>(),
    ) {
        (Some(component), Some(data)) => {
            binder.bind(component, data);
            Ok(())
        }
        _ => Err(Error::unbound_pair(component_name, data_name)),
    }
}
