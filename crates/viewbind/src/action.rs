use std::{fmt, sync::Arc};

///
/// Action
///
/// Shared callback carried by data values and attached to components.
///

#[derive(Clone)]
pub struct Action(Arc<dyn Fn() + Send + Sync>);

impl Action {
    pub fn new(f: impl Fn() + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn invoke(&self) {
        (self.0)();
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Action(..)")
    }
}

///
/// Actionable
///

pub trait Actionable {
    fn set_action(&mut self, action: Action);
}

/// Attach `action` to `component`.
pub fn bind_action<C: Actionable + ?Sized>(component: &mut C, action: &Action) {
    component.set_action(action.clone());
}
