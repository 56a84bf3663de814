//! Domain constants.

/// Extension of the source files that declare application state.
pub const SOURCE_EXT: &str = "ts";

/// Suffix inserted before the extension of generated files (`app.cursors.ts`).
pub const CURSORS_SUFFIX: &str = "cursors";

/// Base name of the alias under which the state module is imported into a
/// generated file. Numbered variants are used when the base name is taken.
pub const STATE_ALIAS_BASE: &str = "s";

/// Library alias used when the root state does not name one through its
/// heritage list.
pub const DEFAULT_LIBRARY_ALIAS: &str = "bf";

/// Heritage names that mark a record as application state.
pub const STATE_CAPABILITY: &str = "IState";
pub const COMPONENT_CAPABILITY: &str = "IComponentState";
pub const ROUTE_COMPONENT_CAPABILITY: &str = "IRouteComponentState";
