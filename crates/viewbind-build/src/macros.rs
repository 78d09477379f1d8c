/// Build-script helper: generate the dispatch units for a JSON declaration
/// file and write them to `OUT_DIR`.
///
/// A `viewbind.toml` next to the declaration file is picked up when present.
/// Rejected declarations are reported as cargo warnings; I/O, config, and
/// emit failures are returned through `?`.
#[macro_export]
macro_rules! build {
    ($decls:expr) => {
        use std::{env::var, path::{Path, PathBuf}};

        //
        // CARGO
        //

        println!("cargo:rerun-if-changed=build.rs");
        println!("cargo:rerun-if-changed={}", $decls);

        let out_dir = PathBuf::from(var("OUT_DIR")?);
        let config_path = Path::new($decls).with_file_name($crate::config::CONFIG_FILE);
        println!("cargo:rerun-if-changed={}", config_path.display());

        //
        // DISPATCH CODE
        //

        let config = $crate::config::BuildConfig::load_or_default(&config_path)?;
        let generated = $crate::generate($crate::JsonSource::new($decls), &config)?;

        let mut sink = $crate::CargoSink;
        generated.report(&mut sink);
        $crate::write_artifacts(&generated, &out_dir, &mut sink)?;
    };
}
