use crate::{
    error::{ErrorTree, NameKind, ResolveError},
    path,
    types::{PathDialect, is_ident, is_type_path},
};

/// Record an error unless `value` is a well-formed type path.
pub(super) fn check_type_path(value: &str, errs: &mut ErrorTree) -> bool {
    let ok = is_type_path(value);
    if !ok {
        errs.add(ResolveError::invalid_name(NameKind::TypePath, value));
    }

    ok
}

pub(super) fn check_field_name(value: &str, errs: &mut ErrorTree) -> bool {
    let ok = is_ident(value);
    if !ok {
        errs.add(ResolveError::invalid_name(NameKind::Field, value));
    }

    ok
}

pub(super) fn check_method_name(value: &str, errs: &mut ErrorTree) -> bool {
    let ok = is_ident(value);
    if !ok {
        errs.add(ResolveError::invalid_name(NameKind::Method, value));
    }

    ok
}

/// First pair of grammatical paths in one declaration that start at the same
/// data type. Paths that fail the grammar never count as duplicates.
pub(super) fn duplicate_target(paths: &[String], dialect: PathDialect) -> Option<ResolveError> {
    for (i, first) in paths.iter().enumerate() {
        if !path::is_valid(first, dialect) {
            continue;
        }

        for second in &paths[i + 1..] {
            if !path::is_valid(second, dialect) {
                continue;
            }

            let data_type = path::leading_data_type(first);
            if data_type == path::leading_data_type(second) {
                return Some(ResolveError::DuplicateTarget {
                    first: first.clone(),
                    second: second.clone(),
                    data_type: data_type.to_string(),
                });
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn duplicate_target_finds_shared_leading_type() {
        let err = duplicate_target(&paths(&["Foo.x:Bar", "Foo.y:Baz"]), PathDialect::Data);

        assert_eq!(
            err,
            Some(ResolveError::DuplicateTarget {
                first: "Foo.x:Bar".to_string(),
                second: "Foo.y:Baz".to_string(),
                data_type: "Foo".to_string(),
            })
        );
    }

    #[test]
    fn duplicate_target_ignores_invalid_paths() {
        let err = duplicate_target(&paths(&["Foo.x:Bar", "Foo.y"]), PathDialect::Data);

        assert_eq!(err, None);
    }

    #[test]
    fn distinct_leading_types_are_fine() {
        let err = duplicate_target(&paths(&["Foo.open", "Bar.open"]), PathDialect::Action);

        assert_eq!(err, None);
    }

    #[test]
    fn name_checks_record_errors() {
        let mut errs = ErrorTree::new();

        assert!(check_type_path("app::Card", &mut errs));
        assert!(!check_type_path("app.Card", &mut errs));
        assert!(!check_field_name("title.text", &mut errs));
        assert!(check_method_name("bind_card", &mut errs));

        assert_eq!(errs.len(), 2);
    }

    #[test]
    fn keywords_are_invalid_names() {
        let mut errs = ErrorTree::new();

        assert!(!check_field_name("type", &mut errs));
        assert!(!check_field_name("_", &mut errs));
        assert!(!check_method_name("fn", &mut errs));
        assert!(!check_type_path("app::mod::Card", &mut errs));
        assert!(check_type_path("crate::views::Card", &mut errs));

        assert_eq!(errs.len(), 4);
        assert!(
            errs.errors
                .iter()
                .all(|err| matches!(err, ResolveError::InvalidName { .. }))
        );
    }
}
