//! A small card view tree wired up by the code `build.rs` generates from
//! `bindings.json`, with the binder unit renamed in `viewbind.toml`.

pub mod models;
pub mod views;

viewbind::start!(
    view_binder => "view_binder.rs",
    adapter => "adapter.rs",
    factory => "factory.rs",
);
