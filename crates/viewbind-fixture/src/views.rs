use crate::models::{Caption, CardModel, TextModel};
use viewbind::{Action, Actionable, Buildable, named};

///
/// Prefix
///
/// Binder dependency prepended to every card heading.
///

#[derive(Clone, Debug)]
pub struct Prefix(pub String);

#[derive(Debug, Default)]
pub struct TextView {
    pub text: String,
}

#[derive(Debug, Default)]
pub struct Label {
    pub text: String,
}

#[derive(Debug, Default)]
pub struct Button {
    pub on_click: Option<Action>,
}

impl Actionable for Button {
    fn set_action(&mut self, action: Action) {
        self.on_click = Some(action);
    }
}

///
/// Card
///

#[derive(Debug, Default)]
pub struct Card {
    pub heading: String,
    pub title: TextView,
    pub button: Button,
    pub on_tap: Option<Action>,
}

impl Actionable for Card {
    fn set_action(&mut self, action: Action) {
        self.on_tap = Some(action);
    }
}

impl Buildable for Card {
    fn create() -> Self {
        Self::default()
    }
}

named!(Card, Label, TextView);

///
/// Binders
///

pub struct Binders;

impl Binders {
    pub fn bind_card(component: &mut Card, data: &CardModel, prefix: &Prefix) {
        component.heading = format!("{}{}", prefix.0, data.heading);
    }

    pub fn bind_text(component: &mut TextView, data: &TextModel) {
        component.text.clone_from(&data.text);
    }

    pub fn bind_label(component: &mut Label, data: &Caption) {
        component.text.clone_from(&data.text);
    }
}
