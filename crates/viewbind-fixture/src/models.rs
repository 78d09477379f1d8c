use viewbind::{Action, named};

#[derive(Clone, Debug, Default)]
pub struct TextModel {
    pub text: String,
}

#[derive(Clone, Debug)]
pub struct CardActions {
    pub open: Action,
}

#[derive(Clone, Debug)]
pub struct CardModel {
    pub heading: String,
    pub title: TextModel,
    pub actions: CardActions,
    pub on_tap: Action,
}

/// Bound by the binder, but never declared as bindable data.
#[derive(Clone, Debug, Default)]
pub struct Caption {
    pub text: String,
}

named!(CardModel, Caption, TextModel);
