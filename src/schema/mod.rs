//! # Schema
//!
//! Structured description of the state declarations in one source file:
//! state records with their fields and heritage lists, enum names, and the
//! namespace imports that qualified field types refer to.
//!
//! A [`SourceSchema`] is produced by a [`SchemaExtractor`] from a loaded
//! [`SourceFile`](crate::project::SourceFile). Schemas are plain data, rebuilt
//! on every extraction.

mod extract;

pub use extract::{CachedExtractor, DeclarationExtractor, SchemaExtractor};

use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use crate::base::constants::{COMPONENT_CAPABILITY, ROUTE_COMPONENT_CAPABILITY, STATE_CAPABILITY};

/// One field of a state record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRecord {
    pub name: SmolStr,
    /// Element type for arrays, the full type otherwise.
    pub ty: SmolStr,
    pub is_array: bool,
}

impl FieldRecord {
    pub fn new(name: impl Into<SmolStr>, ty: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            is_array: false,
        }
    }

    pub fn array(name: impl Into<SmolStr>, ty: impl Into<SmolStr>) -> Self {
        Self {
            is_array: true,
            ..Self::new(name, ty)
        }
    }

    /// The type as written in a declaration: `ty`, or `ty[]` for arrays.
    pub fn declared_type(&self) -> String {
        if self.is_array {
            format!("{}[]", self.ty)
        } else {
            self.ty.to_string()
        }
    }

    /// Whether the type is qualified by an import alias (`ns.Type`).
    pub fn is_qualified(&self) -> bool {
        self.ty.contains('.')
    }
}

/// A declared state record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateRecord {
    pub type_name: SmolStr,
    pub fields: Vec<FieldRecord>,
    /// Supertypes as written, e.g. `bf.IComponentState`.
    pub heritages: Vec<SmolStr>,
}

impl StateRecord {
    pub fn new(type_name: impl Into<SmolStr>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Vec::new(),
            heritages: Vec::new(),
        }
    }

    pub fn with_fields(mut self, fields: impl IntoIterator<Item = FieldRecord>) -> Self {
        self.fields.extend(fields);
        self
    }

    pub fn with_heritage(mut self, heritage: impl Into<SmolStr>) -> Self {
        self.heritages.push(heritage.into());
        self
    }

    /// Capabilities declared through the heritage list.
    pub fn capabilities(&self) -> impl Iterator<Item = Capability> + '_ {
        self.heritages.iter().filter_map(|h| Capability::from_heritage(h))
    }

    /// How the record behaves when reached through another file.
    pub fn role(&self) -> StateRole {
        let mut role = StateRole::Plain;
        for capability in self.capabilities() {
            match capability {
                Capability::RouteComponent => return StateRole::RouteRooted,
                Capability::Component => role = StateRole::Component,
                Capability::State => {}
            }
        }
        role
    }

    /// Import alias of the first capability heritage (`bf` for `bf.IState`).
    pub fn library_alias(&self) -> Option<&str> {
        self.heritages
            .iter()
            .filter(|h| Capability::from_heritage(h).is_some())
            .find_map(|h| h.split_once('.').map(|(alias, _)| alias))
    }
}

/// A capability a state record opts into by extending a marker interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// `IState`
    State,
    /// `IComponentState`
    Component,
    /// `IRouteComponentState`
    RouteComponent,
}

impl Capability {
    /// Classify a heritage entry by its last path segment.
    pub fn from_heritage(heritage: &str) -> Option<Self> {
        let name = heritage.rsplit('.').next().unwrap_or(heritage);
        match name {
            STATE_CAPABILITY => Some(Self::State),
            COMPONENT_CAPABILITY => Some(Self::Component),
            ROUTE_COMPONENT_CAPABILITY => Some(Self::RouteComponent),
            _ => None,
        }
    }
}

/// Role of a state record, derived from its capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateRole {
    /// Gets its own cursors file, rooted at the key that reached it.
    RouteRooted,
    /// Flattened into the cursors file of the state that references it.
    Component,
    /// Not expanded when reached through another file.
    Plain,
}

/// `import * as <prefix> from '<relative_path>'`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRecord {
    pub prefix: SmolStr,
    pub relative_path: String,
}

impl ImportRecord {
    pub fn new(prefix: impl Into<SmolStr>, relative_path: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            relative_path: relative_path.into(),
        }
    }
}

/// Everything the generator needs to know about one source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceSchema {
    /// File stem, used to import the state module (`./<file_name>`).
    pub file_name: String,
    pub states: Vec<StateRecord>,
    pub enums: FxHashSet<SmolStr>,
    pub imports: Vec<ImportRecord>,
}

impl SourceSchema {
    /// First state declared with this name.
    pub fn state(&self, type_name: &str) -> Option<&StateRecord> {
        self.states.iter().find(|s| s.type_name == type_name)
    }

    /// Every state declared with this name; more than one is a schema error.
    pub fn states_named<'a>(
        &'a self,
        type_name: &'a str,
    ) -> impl Iterator<Item = &'a StateRecord> {
        self.states.iter().filter(move |s| s.type_name == type_name)
    }

    pub fn is_enum(&self, type_name: &str) -> bool {
        self.enums.contains(type_name)
    }

    pub fn import(&self, prefix: &str) -> Option<&ImportRecord> {
        self.imports.iter().find(|i| i.prefix == prefix)
    }
}
