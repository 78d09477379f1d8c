//! viewbind CLI: inspect and generate binding dispatchers from a JSON
//! declaration file.

use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};
use thiserror::Error as ThisError;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use viewbind_build::plan::{
    AdapterCase, DispatchPlan, FactoryCase, plan, plan_adapter, plan_factory,
};
use viewbind_config_build::{BuildConfig, CONFIG_FILE, ConfigError};
use viewbind_schema::{
    build::{Resolution, resolve_source},
    decl::{JsonSource, SourceError},
    diagnostic::Diagnostic,
};

///
/// Cli
///

#[derive(Debug, Parser)]
#[command(name = "viewbind", version)]
#[command(about = "Resolve view binding declarations and generate dispatchers")]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace). `RUST_LOG` wins when set.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve declarations and report every rejected one
    Check {
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Print the dispatch plan as JSON
    Plan {
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Write the binder, adapter, and factory sources
    Generate {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        out_dir: PathBuf,

        /// Defaults to `viewbind.toml` next to the input, if present
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

///
/// CliError
///

#[derive(Debug, ThisError)]
enum CliError {
    #[error(transparent)]
    Build(#[from] viewbind_build::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("cannot create '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Source(#[from] SourceError),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .init();
}

/// `Ok(false)` when any declaration was rejected.
fn run(command: Command) -> Result<bool, CliError> {
    match command {
        Command::Check { input } => {
            let resolution = resolve_source(JsonSource::new(&input))?;
            let diagnostics = resolution.diagnostics();

            print_diagnostics(&diagnostics);
            println!("{}", summary(&resolution));

            Ok(diagnostics.is_empty())
        }
        Command::Plan { input } => {
            let resolution = resolve_source(JsonSource::new(&input))?;
            let diagnostics = resolution.diagnostics();

            print_diagnostics(&diagnostics);
            println!("{}", serde_json::to_string_pretty(&PlanReport::new(&resolution))?);

            Ok(diagnostics.is_empty())
        }
        Command::Generate {
            input,
            out_dir,
            config,
        } => generate(&input, &out_dir, config.as_deref()),
    }
}

fn generate(input: &Path, out_dir: &Path, config: Option<&Path>) -> Result<bool, CliError> {
    let config = match config {
        Some(path) => BuildConfig::load(path)?,
        None => BuildConfig::load_or_default(input.with_file_name(CONFIG_FILE))?,
    };

    let generated = viewbind_build::generate(JsonSource::new(input), &config)?;
    print_diagnostics(&generated.diagnostics);

    fs::create_dir_all(out_dir).map_err(|source| CliError::Io {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let mut fatal = Vec::new();
    let written = viewbind_build::write_artifacts(&generated, out_dir, &mut fatal);
    print_diagnostics(&fatal);

    for path in written? {
        println!("wrote {}", path.display());
    }
    if generated.artifacts.is_empty() {
        println!("no binding methods, nothing written");
    }

    Ok(generated.diagnostics.is_empty())
}

fn print_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        eprintln!("{diagnostic}");
    }
}

fn summary(resolution: &Resolution) -> String {
    let graph = &resolution.graph;
    debug!(errors = resolution.errors.len(), "check finished");

    format!(
        "{} binding methods, {} components, {} data types, {} rejected",
        graph.methods.len(),
        graph.components.len(),
        graph.data.len(),
        resolution.errors.len()
    )
}

///
/// PlanReport
///

#[derive(Debug, Serialize)]
struct PlanReport {
    binder: DispatchPlan,
    adapter: Vec<AdapterCase>,
    factory: Vec<FactoryCase>,
}

impl PlanReport {
    fn new(resolution: &Resolution) -> Self {
        let graph = &resolution.graph;

        Self {
            binder: plan(graph),
            adapter: plan_adapter(graph),
            factory: plan_factory(graph),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DECLARATIONS: &str = r#"{
        "binding_methods": [{
            "owner_type": "crate::Binders",
            "method_name": "bind_text",
            "parameters": [
                { "ty": "crate::TextView", "tag": "component" },
                { "ty": "crate::TextModel", "tag": "data" }
            ]
        }],
        "components": [{ "component_type": "crate::TextView", "implements_capability": true }],
        "data": [{ "data_type": "crate::TextModel", "component_type": "crate::TextView" }]
    }"#;

    fn write_input(dir: &Path, json: &str) -> PathBuf {
        let path = dir.join("bindings.json");
        fs::write(&path, json).expect("write declarations");

        path
    }

    #[test]
    fn parses_generate_arguments() {
        let cli = Cli::try_parse_from([
            "viewbind", "-v", "generate", "--input", "b.json", "--out-dir", "gen",
        ])
        .expect("valid arguments");

        assert_eq!(cli.verbose, 1);
        assert!(matches!(
            cli.command,
            Command::Generate { ref input, config: None, .. } if input == Path::new("b.json")
        ));
    }

    #[test]
    fn check_decodes_json_declarations() {
        let dir = tempfile::tempdir().expect("temp dir");
        let input = write_input(dir.path(), DECLARATIONS);

        let resolution = resolve_source(JsonSource::new(&input)).expect("resolve");

        assert_eq!(
            summary(&resolution),
            "1 binding methods, 1 components, 1 data types, 0 rejected"
        );
        assert!(run(Command::Check { input }).expect("check"));
    }

    #[test]
    fn rejected_declarations_fail_the_check() {
        let dir = tempfile::tempdir().expect("temp dir");
        let input = write_input(
            dir.path(),
            r#"{ "class_actions": [{ "component_type": "crate::Card", "paths": ["card.tap"] }] }"#,
        );

        assert!(!run(Command::Check { input }).expect("check"));
    }

    #[test]
    fn unknown_fields_fail_to_decode() {
        let dir = tempfile::tempdir().expect("temp dir");
        let input = write_input(dir.path(), r#"{ "bindings": [] }"#);

        assert!(matches!(
            run(Command::Check { input }),
            Err(CliError::Source(SourceError::Json(_)))
        ));
    }

    #[test]
    fn generate_writes_into_new_directory() {
        let dir = tempfile::tempdir().expect("temp dir");
        let input = write_input(dir.path(), DECLARATIONS);
        let out_dir = dir.path().join("generated");

        let clean = generate(&input, &out_dir, None).expect("generate");

        assert!(clean);
        for file in ["binder.rs", "adapter.rs", "factory.rs"] {
            assert!(out_dir.join(file).is_file(), "{file} missing");
        }
    }

    #[test]
    fn plan_report_lists_factory_cases() {
        let dir = tempfile::tempdir().expect("temp dir");
        let input = write_input(dir.path(), DECLARATIONS);
        let resolution = resolve_source(JsonSource::new(&input)).expect("resolve");

        let report = serde_json::to_value(PlanReport::new(&resolution)).expect("json");

        assert_eq!(report["factory"][0]["data_name"], "TextModel");
        assert_eq!(report["binder"]["entries"][0]["key"], "TextView:TextModel");
        assert_eq!(
            report["binder"]["entries"][0]["instructions"][0]["kind"],
            "invoke_binder"
        );
    }
}
