//! Key and identifier naming.
//!
//! Cursor keys are dotted paths into the state tree. Accessor identifiers are
//! derived from keys; camel casing can still map two keys to one identifier
//! (`todo.items` and `todoItems`), so callers pick the final name with
//! [`create_unused_name`].

use crate::schema::ImportRecord;

/// Join the present, non-empty parts with `.`.
///
/// ```
/// use cursors::naming::compose_key;
///
/// assert_eq!(compose_key(&[None, Some("todos"), Some("items")]), "todos.items");
/// assert_eq!(compose_key(&[Some("root"), Some("")]), "root");
/// ```
pub fn compose_key(parts: &[Option<&str>]) -> String {
    parts
        .iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(".")
}

/// First of `base`, `base1`, `base2`, … for which `taken` is false.
///
/// ```
/// use cursors::naming::create_unused_name;
///
/// let used = ["todoItems", "todoItems1"];
/// assert_eq!(create_unused_name("todoItems", |n| used.contains(&n)), "todoItems2");
/// assert_eq!(create_unused_name("title", |n| used.contains(&n)), "title");
/// ```
pub fn create_unused_name(base: &str, taken: impl Fn(&str) -> bool) -> String {
    if !taken(base) {
        return base.to_string();
    }
    (1..)
        .map(|n| format!("{base}{n}"))
        .find(|name| !taken(name))
        .unwrap_or_else(|| base.to_string())
}

/// First of `base`, `base1`, `base2`, … that no import uses as its prefix.
pub fn create_unused_alias(base: &str, imports: &[ImportRecord]) -> String {
    create_unused_name(base, |alias| imports.iter().any(|i| i.prefix == alias))
}

/// Identifier of a nested accessor: the key prefix and field name in camel case.
///
/// ```
/// use cursors::naming::accessor_name;
///
/// assert_eq!(accessor_name("todo", "items"), "todoItems");
/// assert_eq!(accessor_name("todo.owner", "name"), "todoOwnerName");
/// ```
pub fn accessor_name(prefix: &str, field_name: &str) -> String {
    let mut segments = prefix.split('.').filter(|s| !s.is_empty());
    let mut name = segments.next().map(str::to_string).unwrap_or_default();
    for segment in segments.chain(std::iter::once(field_name)) {
        if name.is_empty() {
            name.push_str(segment);
        } else {
            name.push_str(&capitalize(segment));
        }
    }
    name
}

/// Split `alias.Type` on the first dot.
pub fn split_qualified(ty: &str) -> Option<(&str, &str)> {
    ty.split_once('.')
        .filter(|(alias, name)| !alias.is_empty() && !name.is_empty())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&[None, Some("a")], "a")]
    #[case(&[None, None, Some("a")], "a")]
    #[case(&[Some("p"), Some("a")], "p.a")]
    #[case(&[Some("root.sub"), Some("p.q"), Some("a")], "root.sub.p.q.a")]
    #[case(&[Some(""), Some("a")], "a")]
    #[case(&[None, None], "")]
    fn test_compose_key(#[case] parts: &[Option<&str>], #[case] expected: &str) {
        assert_eq!(compose_key(parts), expected);
    }

    #[test]
    fn test_unused_alias_prefers_base() {
        let imports = vec![ImportRecord::new("bf", "bobflux")];
        assert_eq!(create_unused_alias("s", &imports), "s");
    }

    #[test]
    fn test_unused_alias_skips_taken_names() {
        let imports = vec![
            ImportRecord::new("s", "./a"),
            ImportRecord::new("s1", "./b"),
            ImportRecord::new("s3", "./c"),
        ];
        assert_eq!(create_unused_alias("s", &imports), "s2");
    }

    #[rstest]
    #[case("a", "b", "aB")]
    #[case("todo.items", "title", "todoItemsTitle")]
    #[case("a", "bC", "aBC")]
    #[case("", "b", "b")]
    fn test_accessor_name(#[case] prefix: &str, #[case] field: &str, #[case] expected: &str) {
        assert_eq!(accessor_name(prefix, field), expected);
    }

    #[test]
    fn test_unused_name_resolves_camel_case_collisions() {
        let used = [accessor_name("a", "bC")];
        let taken = |n: &str| used.iter().any(|u| u == n);
        assert_eq!(create_unused_name(&accessor_name("a.b", "c"), taken), "aBC1");
    }

    #[test]
    fn test_accessor_names_differ_for_different_parents() {
        assert_ne!(accessor_name("left", "value"), accessor_name("right", "value"));
    }

    #[test]
    fn test_split_qualified() {
        assert_eq!(split_qualified("ns.IState"), Some(("ns", "IState")));
        assert_eq!(split_qualified("a.b.C"), Some(("a", "b.C")));
        assert_eq!(split_qualified("IState"), None);
        assert_eq!(split_qualified(".x"), None);
    }
}
