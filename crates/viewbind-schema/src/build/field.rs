use super::{
    Builder,
    validate::{check_field_name, check_type_path, duplicate_target},
};
use crate::{
    decl::{ClassActionDecl, FieldActionDecl, FieldBindingDecl},
    error::{ErrorTree, ResolveError},
    node::{Action, FieldAction, FieldBinding, MethodKey},
    path::{ParsedPath, target_data_type},
    types::{PathDialect, simple_name},
};
use tracing::debug;

impl Builder {
    pub(crate) fn field_bindings(&mut self, decls: &[FieldBindingDecl]) {
        for decl in decls {
            let mut errs = ErrorTree::new();
            self.field_binding(decl, &mut errs);

            let route = format!("{}.{}", decl.owner_component_type, decl.field_name);
            self.errors.merge_route(route, errs);
        }
    }

    fn field_binding(&mut self, decl: &FieldBindingDecl, errs: &mut ErrorTree) {
        let owner_ok = check_type_path(&decl.owner_component_type, errs);
        let field_type_ok = check_type_path(&decl.field_component_type, errs);
        let field_ok = check_field_name(&decl.field_name, errs);
        if !(owner_ok && field_type_ok && field_ok) {
            return;
        }

        if let Some(err) = duplicate_target(&decl.paths, PathDialect::Data) {
            debug!(field = %decl.field_name, "field binding has duplicate targets");
            errs.add(err);
            return;
        }

        let field_component = simple_name(&decl.field_component_type);
        let mut accepted = Vec::new();

        for raw in &decl.paths {
            let Some(path) = ParsedPath::parse(raw, PathDialect::Data) else {
                errs.add(ResolveError::Grammar {
                    path: raw.clone(),
                    dialect: PathDialect::Data,
                });
                continue;
            };

            let target = target_data_type(path.raw);
            let key = MethodKey::new(field_component, target);
            if !self.graph.has_method(&key) {
                errs.add(ResolveError::UnresolvedBinding { key });
                continue;
            }

            accepted.push((
                path.leading.to_string(),
                FieldBinding {
                    field_name: decl.field_name.clone(),
                    access_path: path.access.to_string(),
                    field_component_type: decl.field_component_type.clone(),
                    field_data_type: target.to_string(),
                },
            ));
        }

        let component = self.graph.upsert_component(&decl.owner_component_type);
        for (data, binding) in accepted {
            component.field_bindings.entry(data).or_default().push(binding);
        }
    }

    pub(crate) fn field_actions(&mut self, decls: &[FieldActionDecl]) {
        for decl in decls {
            let mut errs = ErrorTree::new();
            self.field_action(decl, &mut errs);

            let route = format!("{}.{}", decl.owner_component_type, decl.field_name);
            self.errors.merge_route(route, errs);
        }
    }

    fn field_action(&mut self, decl: &FieldActionDecl, errs: &mut ErrorTree) {
        let owner_ok = check_type_path(&decl.owner_component_type, errs);
        let field_type_ok = decl
            .field_component_type
            .as_deref()
            .is_none_or(|ty| check_type_path(ty, errs));
        let field_ok = check_field_name(&decl.field_name, errs);
        if !(owner_ok && field_type_ok && field_ok) {
            return;
        }

        if let Some(err) = duplicate_target(&decl.paths, PathDialect::Action) {
            debug!(field = %decl.field_name, "field action has duplicate targets");
            errs.add(err);
            return;
        }

        let component = self.graph.upsert_component(&decl.owner_component_type);

        for raw in &decl.paths {
            let Some(path) = ParsedPath::parse(raw, PathDialect::Action) else {
                errs.add(ResolveError::Grammar {
                    path: raw.clone(),
                    dialect: PathDialect::Action,
                });
                continue;
            };

            component
                .field_actions
                .entry(path.leading.to_string())
                .or_default()
                .push(FieldAction {
                    field_name: decl.field_name.clone(),
                    access_path: path.access.to_string(),
                    field_component_type: decl.field_component_type.clone(),
                });
        }
    }

    // Class actions only go through the grammar check; a later path with the
    // same leading type replaces the earlier one.
    pub(crate) fn class_actions(&mut self, decls: &[ClassActionDecl]) {
        for decl in decls {
            let mut errs = ErrorTree::new();

            if check_type_path(&decl.component_type, &mut errs) {
                let component = self.graph.upsert_component(&decl.component_type);

                for raw in &decl.paths {
                    let Some(path) = ParsedPath::parse(raw, PathDialect::Action) else {
                        errs.add(ResolveError::Grammar {
                            path: raw.clone(),
                            dialect: PathDialect::Action,
                        });
                        continue;
                    };

                    component.actions.insert(
                        path.leading.to_string(),
                        Action {
                            component_type: decl.component_type.clone(),
                            data_type: path.leading.to_string(),
                            access_path: path.access.to_string(),
                        },
                    );
                }
            }

            self.errors.merge_route(decl.component_type.clone(), errs);
        }

        debug!("actions resolved");
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        build::resolve,
        decl::*,
        error::{ErrorTree, ResolveError},
        node::MethodKey,
        types::PathDialect,
    };

    fn text_method() -> BindingMethodDecl {
        BindingMethodDecl::new(
            "app::Binders",
            "bind_text",
            "app::TextView",
            "app::TextModel",
            Vec::<String>::new(),
        )
    }

    fn route_errors<'a>(errors: &'a ErrorTree, route: &str) -> Vec<&'a ResolveError> {
        errors
            .children
            .get(route)
            .map(|child| child.errors.iter().collect())
            .unwrap_or_default()
    }

    #[test]
    fn duplicate_target_rejects_whole_declaration() {
        let decls = DeclarationSet {
            binding_methods: vec![text_method()],
            field_bindings: vec![FieldBindingDecl::new(
                "app::Card",
                "title",
                "app::TextView",
                ["Foo.x:TextModel", "Foo.y:TextModel"],
            )],
            ..Default::default()
        };

        let resolution = resolve(&decls);
        let errors = route_errors(&resolution.errors, "app::Card.title");

        assert!(matches!(errors[..], [ResolveError::DuplicateTarget { .. }]));
        assert!(resolution.graph.component("app::Card").is_none());
    }

    #[test]
    fn duplicate_rule_is_scoped_to_one_declaration() {
        let decls = DeclarationSet {
            binding_methods: vec![text_method()],
            field_bindings: vec![
                FieldBindingDecl::new("app::Card", "title", "app::TextView", ["Foo.x:TextModel"]),
                FieldBindingDecl::new("app::Card", "subtitle", "app::TextView", ["Foo.y:TextModel"]),
            ],
            ..Default::default()
        };

        let resolution = resolve(&decls);
        assert!(resolution.is_clean(), "{}", resolution.errors);

        let card = resolution.graph.component("app::Card").expect("card component");
        let names: Vec<_> = card
            .field_bindings_for("Foo")
            .iter()
            .map(|binding| binding.field_name.as_str())
            .collect();
        assert_eq!(names, ["title", "subtitle"]);
    }

    #[test]
    fn bad_path_does_not_block_siblings() {
        let decls = DeclarationSet {
            binding_methods: vec![text_method()],
            field_bindings: vec![FieldBindingDecl::new(
                "app::Card",
                "title",
                "app::TextView",
                ["CardModel.title", "ListModel.header.title:TextModel", "RowModel.x:Image"],
            )],
            ..Default::default()
        };

        let resolution = resolve(&decls);
        let errors = route_errors(&resolution.errors, "app::Card.title");

        assert_eq!(
            errors,
            [
                &ResolveError::Grammar {
                    path: "CardModel.title".to_string(),
                    dialect: PathDialect::Data,
                },
                &ResolveError::UnresolvedBinding {
                    key: MethodKey::new("TextView", "Image"),
                },
            ]
        );

        let card = resolution.graph.component("app::Card").expect("card component");
        assert_eq!(card.field_bindings.len(), 1);
        assert_eq!(card.field_bindings_for("ListModel")[0].access_path, "header.title");
    }

    #[test]
    fn field_actions_need_no_binding_method() {
        let decls = DeclarationSet {
            field_actions: vec![FieldActionDecl::new(
                "app::Card",
                "button",
                ["CardModel.actions.open", "RowModel.open"],
            )],
            ..Default::default()
        };

        let resolution = resolve(&decls);
        assert!(resolution.is_clean());

        let card = resolution.graph.component("app::Card").expect("card component");
        assert_eq!(card.field_actions_for("CardModel")[0].access_path, "actions.open");
        assert_eq!(card.field_actions_for("RowModel")[0].field_name, "button");
    }

    #[test]
    fn field_action_duplicates_are_rejected() {
        let decls = DeclarationSet {
            field_actions: vec![FieldActionDecl::new(
                "app::Card",
                "button",
                ["CardModel.open", "CardModel.close"],
            )],
            ..Default::default()
        };

        let resolution = resolve(&decls);

        assert_eq!(resolution.errors.len(), 1);
        assert!(resolution.graph.component("app::Card").is_none());
    }

    // Class actions are not subject to the duplicate rule: the second path for
    // the same data type replaces the first.
    #[test]
    fn class_actions_skip_duplicate_check() {
        let decls = DeclarationSet {
            class_actions: vec![ClassActionDecl::new(
                "app::Card",
                ["CardModel.open", "CardModel.close", "card_model.bad"],
            )],
            ..Default::default()
        };

        let resolution = resolve(&decls);
        let errors = route_errors(&resolution.errors, "app::Card");

        assert!(matches!(errors[..], [ResolveError::Grammar { .. }]));

        let card = resolution.graph.component("app::Card").expect("card component");
        assert_eq!(card.actions.len(), 1);
        assert_eq!(
            card.action_for("CardModel").map(|action| action.access_path.as_str()),
            Some("close")
        );
    }

    // Same replacement across separate records: declaration order decides.
    #[test]
    fn class_actions_across_records_keep_last() {
        let open = ClassActionDecl::new("app::Card", ["CardModel.open"]);
        let close = ClassActionDecl::new("app::Card", ["CardModel.close"]);

        for (decls, expected) in [
            (vec![open.clone(), close.clone()], "close"),
            (vec![close, open], "open"),
        ] {
            let resolution = resolve(&DeclarationSet {
                class_actions: decls,
                ..Default::default()
            });
            assert!(resolution.is_clean(), "{}", resolution.errors);

            let card = resolution.graph.component("app::Card").expect("card component");
            assert_eq!(card.actions.len(), 1);
            assert_eq!(
                card.action_for("CardModel").map(|action| action.access_path.as_str()),
                Some(expected)
            );
        }
    }
}
