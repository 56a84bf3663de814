//! Traversal of the state graph and emission of cursor declarations.
//!
//! One [`Traversal`] serves one top-level generation target. It renders the
//! file for the target's root state and, in recursive mode, the files of
//! every route-rooted state reached through imports. Files are collected in
//! completion order: a route-rooted file finishes before the file that
//! reached it.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use super::GeneratorOptions;
use super::error::GenerationError;
use super::render::{render_field_accessor, render_imports, render_root_cursor, render_root_key};
use crate::base::{cursors_file_path, resolve_import_path};
use crate::naming;
use crate::project::{LoadedProject, SourceFile};
use crate::schema::{SchemaExtractor, SourceSchema, StateRecord, StateRole};

/// A rendered cursors file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub contents: String,
}

/// A state identified by its declaring file and name.
type StateId = (PathBuf, SmolStr);

/// A record whose fields are flattened into the current file under `prefix`.
#[derive(Debug, Clone)]
struct PendingExpansion {
    state: StateRecord,
    prefix: Option<String>,
    /// Records this expansion was reached through, the root first and
    /// `state` last.
    chain: Vec<StateId>,
}

impl PendingExpansion {
    /// Expansion of `state` under `key`, or `None` when `state` is already
    /// being expanded further up the chain.
    fn descend(&self, state: StateRecord, id: StateId, key: &str) -> Option<Self> {
        if self.chain.contains(&id) {
            tracing::warn!(
                "Not expanding `{}` at `{}`: it refers back to itself",
                id.1,
                key
            );
            return None;
        }
        let mut chain = self.chain.clone();
        chain.push(id);
        Some(Self {
            state,
            prefix: Some(key.to_string()),
            chain,
        })
    }
}

/// Per-file rendering context.
struct FileContext<'f> {
    path: &'f Path,
    state_alias: String,
    library_alias: String,
    root_key: Option<&'f str>,
}

/// A state found in another file through a namespace import.
struct ExternalState<'p> {
    file: &'p SourceFile,
    schema: SourceSchema,
    state: StateRecord,
}

pub(crate) struct Traversal<'a> {
    project: &'a LoadedProject,
    extractor: &'a dyn SchemaExtractor,
    options: &'a GeneratorOptions,
    recurse: bool,
    outputs: Vec<GeneratedFile>,
    /// Route-rooted generations in progress, innermost last.
    active: Vec<StateId>,
}

impl<'a> Traversal<'a> {
    pub(crate) fn new(
        project: &'a LoadedProject,
        extractor: &'a dyn SchemaExtractor,
        options: &'a GeneratorOptions,
        recurse: bool,
    ) -> Self {
        Self {
            project,
            extractor,
            options,
            recurse,
            outputs: Vec::new(),
            active: Vec::new(),
        }
    }

    pub(crate) fn finish(self) -> Vec<GeneratedFile> {
        self.outputs
    }

    /// Render the cursors file for `state_name` declared in `file`.
    ///
    /// A file that does not declare the state produces nothing.
    pub(crate) fn generate_file(
        &mut self,
        file: &SourceFile,
        schema: &SourceSchema,
        state_name: &str,
        root_key: Option<&str>,
    ) -> Result<(), GenerationError> {
        let Some(root) = schema.state(state_name) else {
            tracing::trace!("{} declares no `{}`", file.path().display(), state_name);
            return Ok(());
        };

        let target = (file.path().to_path_buf(), root.type_name.clone());
        if self.active.contains(&target) {
            tracing::warn!(
                "Skipping `{}` in {}: it is already being generated higher up the route chain",
                root.type_name,
                file.path().display()
            );
            return Ok(());
        }

        self.active.push(target);
        let result = self.generate_root(file, schema, root, root_key);
        self.active.pop();
        result
    }

    fn generate_root(
        &mut self,
        file: &SourceFile,
        schema: &SourceSchema,
        root: &StateRecord,
        root_key: Option<&str>,
    ) -> Result<(), GenerationError> {
        let ctx = FileContext {
            path: file.path(),
            state_alias: naming::create_unused_alias(
                &self.options.state_alias_base,
                &schema.imports,
            ),
            library_alias: root
                .library_alias()
                .unwrap_or(&self.options.default_library_alias)
                .to_string(),
            root_key,
        };

        tracing::info!("Generating has been started for: {}", ctx.path.display());

        let mut contents = render_imports(
            &ctx.state_alias,
            &format!("./{}", schema.file_name),
            &schema.imports,
        );
        contents.push_str(&render_root_key(root_key, &ctx.library_alias));
        contents.push_str(&render_root_cursor(
            root_key,
            &ctx.library_alias,
            &ctx.state_alias,
            &root.type_name,
        ));
        contents.push_str(&self.expand(&ctx, schema, root)?);

        self.outputs.push(GeneratedFile {
            path: cursors_file_path(ctx.path),
            contents,
        });

        tracing::info!("Generating ended for: {}", ctx.path.display());
        Ok(())
    }

    /// Accessors for `root` followed by its sibling expansions, in preorder.
    fn expand(
        &mut self,
        ctx: &FileContext<'_>,
        schema: &SourceSchema,
        root: &StateRecord,
    ) -> Result<String, GenerationError> {
        // `rootCursor` is already declared.
        let mut names: FxHashSet<String> = FxHashSet::default();
        names.insert("root".to_string());

        let mut blocks = Vec::new();
        let mut stack = vec![PendingExpansion {
            state: root.clone(),
            prefix: None,
            chain: vec![(ctx.path.to_path_buf(), root.type_name.clone())],
        }];

        while let Some(item) = stack.pop() {
            let (block, pending) = self.expand_fields(ctx, schema, &item, &mut names)?;
            blocks.push(block);
            // Reversed so the first queued expansion is popped next.
            stack.extend(pending.into_iter().rev());
        }

        Ok(blocks.join("\n"))
    }

    /// Accessors for the direct fields of `item.state`, plus the records
    /// queued for sibling expansion.
    fn expand_fields(
        &mut self,
        ctx: &FileContext<'_>,
        schema: &SourceSchema,
        item: &PendingExpansion,
        names: &mut FxHashSet<String>,
    ) -> Result<(String, Vec<PendingExpansion>), GenerationError> {
        let prefix = item.prefix.as_deref();
        let mut pending = Vec::new();
        let mut accessors = Vec::with_capacity(item.state.fields.len());

        for field in &item.state.fields {
            let key = naming::compose_key(&[prefix, Some(field.name.as_str())]);

            if self.recurse && !field.is_array && field.is_qualified() {
                if let Some(external) = self.resolve_external(ctx.path, schema, &field.ty) {
                    match external.state.role() {
                        StateRole::RouteRooted => {
                            let nested_root =
                                naming::compose_key(&[ctx.root_key, Some(key.as_str())]);
                            self.generate_file(
                                external.file,
                                &external.schema,
                                &external.state.type_name,
                                Some(&nested_root),
                            )?;
                        }
                        StateRole::Component => {
                            let id = (
                                external.file.path().to_path_buf(),
                                external.state.type_name.clone(),
                            );
                            pending.extend(item.descend(external.state, id, &key));
                        }
                        StateRole::Plain => {}
                    }
                }
            }

            let mut local = schema.states_named(&field.ty);
            let nested = local.next();
            let duplicated = local.next().is_some();

            let mut declared = field.declared_type();
            if nested.is_some() || (!field.is_array && schema.is_enum(&field.ty)) {
                declared = format!("{}.{declared}", ctx.state_alias);
            }

            if let Some(nested) = nested.filter(|_| !field.is_array) {
                if duplicated {
                    return Err(GenerationError::DuplicateState {
                        path: ctx.path.to_path_buf(),
                        name: nested.type_name.clone(),
                    });
                }
                let id = (ctx.path.to_path_buf(), nested.type_name.clone());
                pending.extend(item.descend(nested.clone(), id, &key));
            }

            let name = match prefix {
                None => field.name.to_string(),
                Some(prefix) => naming::accessor_name(prefix, &field.name),
            };
            let name = naming::create_unused_name(&name, |n| names.contains(n));
            accessors.push(render_field_accessor(
                &name,
                &key,
                &ctx.library_alias,
                &declared,
                ctx.root_key.is_some(),
            ));
            names.insert(name);
        }

        Ok((accessors.join("\n"), pending))
    }

    /// Follow a qualified field type through the file's imports.
    ///
    /// Every miss is silent: the field keeps its own accessor and is simply
    /// not expanded.
    fn resolve_external(
        &self,
        importing: &Path,
        schema: &SourceSchema,
        ty: &str,
    ) -> Option<ExternalState<'a>> {
        let (alias, type_name) = naming::split_qualified(ty)?;

        let Some(import) = schema.import(alias) else {
            tracing::trace!("No import for `{}` in {}", alias, importing.display());
            return None;
        };

        let path = resolve_import_path(importing, &import.relative_path);
        let project: &'a LoadedProject = self.project;
        let Some(file) = project.get(&path) else {
            tracing::trace!("{} is not part of the project", path.display());
            return None;
        };

        let schema = self.extractor.extract(file);
        let Some(state) = schema.state(type_name).cloned() else {
            tracing::trace!("{} declares no `{}`", path.display(), type_name);
            return None;
        };

        Some(ExternalState {
            file,
            schema,
            state,
        })
    }
}
