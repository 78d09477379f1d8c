/// Implement [`Named`](crate::Named) with the simple type name.
#[macro_export]
macro_rules! named {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl $crate::Named for $ty {
                fn name(&self) -> &'static str {
                    stringify!($ty)
                }
            }
        )+
    };
}

/// Include the units generated by `viewbind::build::build!`.
///
/// With no arguments the default `binder`, `adapter` and `factory` units are
/// included. Otherwise list each `module => "file.rs"` pair as configured in
/// `viewbind.toml`; every module becomes a public child of the calling module.
#[macro_export]
macro_rules! start {
    () => {
        $crate::start!(
            binder => "binder.rs",
            adapter => "adapter.rs",
            factory => "factory.rs",
        );
    };

    ($($module:ident => $file:literal),+ $(,)?) => {
        $(
            pub mod $module {
                include!(concat!(env!("OUT_DIR"), "/", $file));
            }
        )+
    };
}
