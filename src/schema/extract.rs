//! Schema extraction from parsed source files.

use std::path::PathBuf;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::{FieldRecord, ImportRecord, SourceSchema, StateRecord};
use crate::parser::{InterfaceDecl, PropertySignature};
use crate::project::SourceFile;

/// Produces the schema of a loaded source file.
///
/// Extraction must be free of side effects: the traversal re-extracts a file
/// every time it is reached through an import.
pub trait SchemaExtractor: Send + Sync {
    fn extract(&self, file: &SourceFile) -> SourceSchema;
}

/// Default extractor: interfaces become state records, enum declarations
/// become enum names, namespace imports become import records.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeclarationExtractor;

impl DeclarationExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl SchemaExtractor for DeclarationExtractor {
    fn extract(&self, file: &SourceFile) -> SourceSchema {
        let module = file.module();
        SourceSchema {
            file_name: file.stem(),
            states: module.interfaces().map(state_from_interface).collect(),
            enums: module.enums().map(|e| e.name.clone()).collect(),
            imports: module
                .imports()
                .map(|i| ImportRecord::new(i.alias.clone(), i.specifier.clone()))
                .collect(),
        }
    }
}

fn state_from_interface(interface: &InterfaceDecl) -> StateRecord {
    StateRecord {
        type_name: interface.name.clone(),
        fields: interface.members.iter().map(field_from_member).collect(),
        heritages: interface.extends.clone(),
    }
}

fn field_from_member(member: &PropertySignature) -> FieldRecord {
    let (ty, is_array) = split_array_type(&member.ty);
    FieldRecord {
        name: member.name.clone(),
        ty: SmolStr::new(ty),
        is_array,
    }
}

/// Strip one level of array-ness: `T[]`, `readonly T[]` and `Array<T>`.
fn split_array_type(ty: &str) -> (&str, bool) {
    let ty = ty.trim();
    if let Some(element) = ty.strip_suffix("[]") {
        let element = element.strip_prefix("readonly ").unwrap_or(element);
        return (element.trim_end(), true);
    }
    if let Some(element) = ty
        .strip_prefix("Array<")
        .or_else(|| ty.strip_prefix("ReadonlyArray<"))
        .and_then(|rest| rest.strip_suffix('>'))
    {
        return (element.trim(), true);
    }
    (ty, false)
}

/// Memoizes another extractor per file path.
///
/// Output is identical to the wrapped extractor's; only repeated extraction
/// of files reached from several parents is saved.
pub struct CachedExtractor<E> {
    inner: E,
    cache: Mutex<FxHashMap<PathBuf, SourceSchema>>,
}

impl<E: SchemaExtractor> CachedExtractor<E> {
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            cache: Mutex::new(FxHashMap::default()),
        }
    }

    /// Number of distinct files extracted so far.
    pub fn cached_len(&self) -> usize {
        self.cache.lock().len()
    }
}

impl<E: SchemaExtractor> SchemaExtractor for CachedExtractor<E> {
    fn extract(&self, file: &SourceFile) -> SourceSchema {
        if let Some(schema) = self.cache.lock().get(file.path()) {
            return schema.clone();
        }
        let schema = self.inner.extract(file);
        self.cache
            .lock()
            .insert(file.path().to_path_buf(), schema.clone());
        schema
    }
}
