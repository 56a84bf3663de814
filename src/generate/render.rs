//! Text rendering of cursor declarations.
//!
//! Pure functions; the engine decides what to render and in which order.

use crate::schema::ImportRecord;

/// Namespace imports of the state file, then the state module itself.
pub fn render_imports(
    state_alias: &str,
    state_module: &str,
    imports: &[ImportRecord],
) -> String {
    let mut out = String::new();
    for import in imports {
        out.push_str(&format!(
            "import * as {} from '{}';\n",
            import.prefix, import.relative_path
        ));
    }
    out.push_str(&format!("import * as {state_alias} from '{state_module}';\n\n"));
    out
}

/// `export const rootKey = ...;` using the override or the library default.
pub fn render_root_key(root_key: Option<&str>, library_alias: &str) -> String {
    match root_key {
        Some(key) => format!("export const rootKey = '{key}';\n\n"),
        None => format!("export const rootKey = {library_alias}.rootCursor.key;\n\n"),
    }
}

/// `export const rootCursor: ...` typed with the root state.
pub fn render_root_cursor(
    root_key: Option<&str>,
    library_alias: &str,
    state_alias: &str,
    type_name: &str,
) -> String {
    let declaration =
        format!("export const rootCursor: {library_alias}.ICursor<{state_alias}.{type_name}> =");
    match root_key {
        Some(_) => format!("{declaration} {{\n    key: rootKey\n}}\n\n"),
        None => format!("{declaration} {library_alias}.rootCursor\n\n"),
    }
}

/// One field accessor.
///
/// `name` is the identifier without its `Cursor` suffix. With a root key the
/// key is computed relative to `rootKey`, otherwise it is a literal.
pub fn render_field_accessor(
    name: &str,
    key: &str,
    library_alias: &str,
    declared_type: &str,
    has_root: bool,
) -> String {
    let key_expr = if has_root {
        format!("rootKey + '.{key}'")
    } else {
        format!("'{key}'")
    };
    format!(
        "export const {name}Cursor: {library_alias}.ICursor<{declared_type}> = {{\n    key: {key_expr}\n}}\n"
    )
}
