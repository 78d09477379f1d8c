use viewbind_build::{
    ArtifactKind, Generated, JsonStr, config::BuildConfig, generate, unit::GENERATED_HEADER,
    write_artifacts,
};

const DECLARATIONS: &str = r#"{
    "binding_methods": [
        {
            "owner_type": "crate::views::Binders",
            "method_name": "bind_card",
            "parameters": [
                { "ty": "crate::views::Card", "tag": "component" },
                { "ty": "crate::models::CardModel", "tag": "data" },
                { "ty": "crate::assets::ImageLoader", "tag": "dependency" }
            ]
        },
        {
            "owner_type": "crate::views::Binders",
            "method_name": "bind_text",
            "parameters": [
                { "ty": "crate::views::TextView", "tag": "component" },
                { "ty": "crate::models::TextModel", "tag": "data" }
            ]
        }
    ],
    "components": [
        { "component_type": "crate::views::Card", "implements_capability": true },
        { "component_type": "crate::views::TextView", "implements_capability": false }
    ],
    "field_bindings": [
        {
            "owner_component_type": "crate::views::Card",
            "field_name": "title",
            "field_component_type": "crate::views::TextView",
            "paths": ["CardModel.title:TextModel"]
        }
    ],
    "field_actions": [
        {
            "owner_component_type": "crate::views::Card",
            "field_name": "button",
            "paths": ["CardModel.actions.open"]
        }
    ],
    "class_actions": [
        { "component_type": "crate::views::Card", "paths": ["CardModel.on_tap"] }
    ],
    "data": [
        { "data_type": "crate::models::CardModel", "component_type": "crate::views::Card" },
        { "data_type": "crate::models::TextModel", "component_type": "crate::views::TextView" }
    ]
}"#;

fn run(json: &str) -> Generated {
    generate(JsonStr(json), &BuildConfig::default()).expect("generate")
}

fn source(generated: &Generated, kind: ArtifactKind) -> String {
    generated.artifact(kind).expect("artifact").source.clone()
}

// whitespace-free form, so assertions do not depend on token spacing
fn compact(source: &str) -> String {
    source.chars().filter(|c| !c.is_whitespace()).collect()
}

#[test]
fn generates_three_clean_artifacts() {
    let generated = run(DECLARATIONS);

    assert!(generated.diagnostics.is_empty(), "{:?}", generated.diagnostics);
    let names: Vec<_> = generated
        .artifacts
        .iter()
        .map(|artifact| artifact.file_name.as_str())
        .collect();
    assert_eq!(names, ["binder.rs", "adapter.rs", "factory.rs"]);
}

#[test]
fn artifacts_are_valid_rust() {
    for artifact in run(DECLARATIONS).artifacts {
        assert!(artifact.source.starts_with(GENERATED_HEADER));
        if let Err(err) = syn::parse_file(&artifact.source) {
            panic!("{} does not parse: {err}\n{}", artifact.file_name, artifact.source);
        }
    }
}

#[test]
fn card_binder_invokes_method_before_recursing() {
    let binder = compact(&source(&run(DECLARATIONS), ArtifactKind::Binder));

    let statements = [
        "crate::views::Binders::bind_card(component,data,&self.image_loader);",
        "bind_action(&mut*component,&data.on_tap);",
        "Bind::<crate::views::TextView,crate::models::TextModel>::bind(self,&mutcomponent.title,&data.title);",
        "bind_action(&mutcomponent.button,&data.actions.open);",
    ];

    let positions: Vec<_> = statements
        .iter()
        .map(|stmt| binder.find(stmt).unwrap_or_else(|| panic!("missing `{stmt}` in {binder}")))
        .collect();
    assert!(positions.is_sorted(), "{positions:?}");

    assert!(binder.contains("pubstructBinder{pubimage_loader:crate::assets::ImageLoader,}"));
    assert!(binder.contains("implBind<crate::views::Card,crate::models::CardModel>forBinder"));
}

#[test]
fn unknown_pairs_are_errors_in_every_dispatcher() {
    let generated = run(DECLARATIONS);

    let binder = compact(&source(&generated, ArtifactKind::Binder));
    assert!(binder.contains("(\"TextView\",\"TextModel\")=>{dispatch_as::<crate::views::TextView,crate::models::TextModel,Self>(self,component,data)}"));
    assert!(binder.contains("(component_name,data_name)=>Err(Error::unbound_pair(component_name,data_name))"));

    let adapter = compact(&source(&generated, ArtifactKind::Adapter));
    assert!(adapter.contains("\"CardCardModel\"=>dispatch_as::<crate::views::Card,crate::models::CardModel,Binder>(self.binder,component,data),"));
    assert!(adapter.contains("_=>Err(Error::unbound_pair(component.name(),data.name()))"));
}

#[test]
fn factory_skips_components_without_capability() {
    let factory = compact(&source(&run(DECLARATIONS), ArtifactKind::Factory));

    assert!(factory.contains("\"CardModel\"=>Ok(Box::new(<crate::views::CardasBuildable>::create()))"));
    assert!(!factory.contains("\"TextModel\""));
    assert!(factory.contains("name=>Err(Error::unbuildable_data(name))"));
}

#[test]
fn output_is_byte_identical_across_runs() {
    assert_eq!(run(DECLARATIONS).artifacts, run(DECLARATIONS).artifacts);
}

#[test]
fn record_order_does_not_change_output() {
    let mut decls: serde_json::Value = serde_json::from_str(DECLARATIONS).expect("json");
    for key in ["binding_methods", "components", "data"] {
        if let Some(list) = decls[key].as_array_mut() {
            list.reverse();
        }
    }
    let reordered = serde_json::to_string(&decls).expect("json");

    assert_eq!(run(DECLARATIONS).artifacts, run(&reordered).artifacts);
}

#[test]
fn imports_are_listed_once() {
    let binder = source(&run(DECLARATIONS), ArtifactKind::Binder);
    let imports: Vec<_> = binder.lines().filter(|line| line.starts_with("use ")).collect();

    let mut distinct = imports.clone();
    distinct.dedup();
    assert_eq!(imports, distinct);
    assert!(imports.is_sorted());
    assert_eq!(imports.iter().filter(|line| line.contains("bind_action")).count(), 1);
}

#[test]
fn rejected_declarations_become_diagnostics() {
    let mut decls: serde_json::Value = serde_json::from_str(DECLARATIONS).expect("json");
    decls["field_bindings"][0]["paths"] =
        serde_json::json!(["CardModel.title:TextModel", "CardModel.subtitle:TextModel"]);
    let generated = run(&serde_json::to_string(&decls).expect("json"));

    assert_eq!(generated.diagnostics.len(), 1);
    assert_eq!(generated.diagnostics[0].route, "crate::views::Card.title");
    assert!(generated.diagnostics[0].message.contains("duplicate path"));

    // the card still binds, just without the title recursion
    let binder = compact(&source(&generated, ArtifactKind::Binder));
    assert!(binder.contains("bind_card"));
    assert!(!binder.contains("&mutcomponent.title"));
}

#[test]
fn keyword_segments_drop_only_their_path() {
    let mut decls: serde_json::Value = serde_json::from_str(DECLARATIONS).expect("json");
    decls["field_actions"][0]["paths"] = serde_json::json!(["CardModel.type"]);
    let generated = run(&serde_json::to_string(&decls).expect("json"));

    assert_eq!(generated.diagnostics.len(), 1);
    assert!(generated.diagnostics[0].message.contains("'CardModel.type'"));
    assert_eq!(generated.artifacts.len(), 3);

    let binder = compact(&source(&generated, ArtifactKind::Binder));
    assert!(binder.contains("bind_action(&mut*component,&data.on_tap);"));
    assert!(!binder.contains("&mutcomponent.button"));
}

#[test]
fn unrenderable_tuple_indices_are_diagnostics() {
    let mut decls: serde_json::Value = serde_json::from_str(DECLARATIONS).expect("json");
    decls["field_bindings"][0]["paths"] =
        serde_json::json!(["CardModel.99999999999:TextModel"]);
    let generated = run(&serde_json::to_string(&decls).expect("json"));

    assert_eq!(generated.diagnostics.len(), 1);
    assert_eq!(generated.diagnostics[0].route, "crate::views::Card.title");
    assert!(binder_parses(&generated));
}

fn binder_parses(generated: &Generated) -> bool {
    syn::parse_file(&source(generated, ArtifactKind::Binder)).is_ok()
}

#[test]
fn no_binding_methods_means_no_artifacts() {
    let generated = run(r#"{ "components": [{ "component_type": "crate::views::Card" }] }"#);

    assert!(generated.artifacts.is_empty());
}

#[test]
fn writes_artifacts_to_out_dir() {
    let dir = tempfile::tempdir().expect("temp dir");
    let generated = run(DECLARATIONS);

    let mut sink = Vec::new();
    let written = write_artifacts(&generated, dir.path(), &mut sink).expect("write");

    assert_eq!(written.len(), 3);
    assert!(sink.is_empty());
    for (path, artifact) in written.iter().zip(&generated.artifacts) {
        let on_disk = std::fs::read_to_string(path).expect("read artifact");
        assert_eq!(on_disk, artifact.source);
    }
}
