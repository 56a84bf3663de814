#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::io;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::schema::{DeclarationExtractor, SourceSchema};

const ROOT: &str = "IAppState";

fn generator(
    state_file: Option<&str>,
    options: GeneratorOptions,
) -> CursorsGenerator<DeclarationExtractor, MemoryWriter> {
    let mut project = GenerationProject::new("app", ROOT);
    if let Some(path) = state_file {
        project = project.with_state_file(path);
    }
    CursorsGenerator::new(project, DeclarationExtractor, MemoryWriter::new()).with_options(options)
}

fn output(generator: &CursorsGenerator<DeclarationExtractor, MemoryWriter>, path: &str) -> String {
    generator
        .writer()
        .get(Path::new(path))
        .unwrap_or_else(|| panic!("{path} was not written: {:?}", generator.writer().paths()))
}

/// Position of `needle` in `haystack`, failing the test when absent.
fn position(haystack: &str, needle: &str) -> usize {
    haystack
        .find(needle)
        .unwrap_or_else(|| panic!("`{needle}` not found in:\n{haystack}"))
}

#[test]
fn test_plain_and_array_fields() {
    let project = LoadedProject::from_sources([(
        "app/state.ts",
        r#"
import * as bf from 'bobflux';

export interface IAppState extends bf.IState {
    a: string
    b: Bar[]
}
"#,
    )]);
    let generator = generator(None, GeneratorOptions::default());
    let report = generator.generate(&project, false);

    assert!(report.is_success());
    assert_eq!(
        output(&generator, "app/state.cursors.ts"),
        "import * as bf from 'bobflux';
import * as s from './state';

export const rootKey = bf.rootCursor.key;

export const rootCursor: bf.ICursor<s.IAppState> = bf.rootCursor

export const aCursor: bf.ICursor<string> = {
    key: 'a'
}

export const bCursor: bf.ICursor<Bar[]> = {
    key: 'b'
}
"
    );
}

#[test]
fn test_local_records_expand_as_siblings() {
    let project = LoadedProject::from_sources([(
        "app/state.ts",
        r#"
import * as bf from 'bobflux';

export interface IAppState extends bf.IState {
    todo: ITodoState
    title: string
}

export interface ITodoState {
    items: string[]
    owner: IUser
}

export interface IUser {
    name: string
}
"#,
    )]);
    let generator = generator(None, GeneratorOptions::default());
    generator.generate(&project, false);

    assert_eq!(
        output(&generator, "app/state.cursors.ts"),
        "import * as bf from 'bobflux';
import * as s from './state';

export const rootKey = bf.rootCursor.key;

export const rootCursor: bf.ICursor<s.IAppState> = bf.rootCursor

export const todoCursor: bf.ICursor<s.ITodoState> = {
    key: 'todo'
}

export const titleCursor: bf.ICursor<string> = {
    key: 'title'
}

export const todoItemsCursor: bf.ICursor<string[]> = {
    key: 'todo.items'
}

export const todoOwnerCursor: bf.ICursor<s.IUser> = {
    key: 'todo.owner'
}

export const todoOwnerNameCursor: bf.ICursor<string> = {
    key: 'todo.owner.name'
}
"
    );
}

#[test]
fn test_sibling_expansions_run_in_preorder() {
    let project = LoadedProject::from_sources([(
        "app/state.ts",
        r#"
export interface IAppState { a: A; b: B }
export interface A { x: C }
export interface B { z: number }
export interface C { y: number }
"#,
    )]);
    let generator = generator(None, GeneratorOptions::default());
    generator.generate(&project, false);
    let text = output(&generator, "app/state.cursors.ts");

    let order = [
        "export const aCursor",
        "export const bCursor",
        "export const aXCursor",
        "export const aXYCursor",
        "export const bZCursor",
    ];
    let positions: Vec<_> = order.iter().map(|n| position(&text, n)).collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{text}");
    assert!(text.contains("key: 'a.x.y'"));
}

#[test]
fn test_arrays_of_records_are_not_expanded() {
    let project = LoadedProject::from_sources([(
        "app/state.ts",
        "export interface IAppState { items: ITodo[] }\nexport interface ITodo { title: string }",
    )]);
    let generator = generator(None, GeneratorOptions::default());
    generator.generate(&project, false);
    let text = output(&generator, "app/state.cursors.ts");

    assert!(text.contains("export const itemsCursor: bf.ICursor<s.ITodo[]> = {"));
    assert!(!text.contains("itemsTitle"));
}

#[test]
fn test_enum_scalars_are_qualified_but_enum_arrays_are_not() {
    let project = LoadedProject::from_sources([(
        "app/state.ts",
        "export enum Color { Red }\nexport interface IAppState { color: Color; colors: Color[] }",
    )]);
    let generator = generator(None, GeneratorOptions::default());
    generator.generate(&project, false);
    let text = output(&generator, "app/state.cursors.ts");

    assert!(text.contains("colorCursor: bf.ICursor<s.Color>"));
    assert!(text.contains("colorsCursor: bf.ICursor<Color[]>"));
}

#[test]
fn test_state_alias_avoids_import_prefixes() {
    let project = LoadedProject::from_sources([(
        "app/state.ts",
        "import * as s from './s';\nexport interface IAppState { a: IAppState2 }\nexport interface IAppState2 { b: string }",
    )]);
    let generator = generator(None, GeneratorOptions::default());
    generator.generate(&project, false);
    let text = output(&generator, "app/state.cursors.ts");

    assert!(text.starts_with("import * as s from './s';\nimport * as s1 from './state';\n\n"));
    assert!(text.contains("aCursor: bf.ICursor<s1.IAppState2>"));
}

#[test]
fn test_root_key_override() {
    let project = LoadedProject::from_sources([(
        "app/state.ts",
        "import * as bf from 'bobflux';\nexport interface IAppState extends bf.IState { a: string }",
    )]);
    let generator = generator(None, GeneratorOptions::default().with_root_key("foo"));
    generator.generate(&project, false);

    assert_eq!(
        output(&generator, "app/state.cursors.ts"),
        "import * as bf from 'bobflux';
import * as s from './state';

export const rootKey = 'foo';

export const rootCursor: bf.ICursor<s.IAppState> = {
    key: rootKey
}

export const aCursor: bf.ICursor<string> = {
    key: rootKey + '.a'
}
"
    );
}

#[test]
fn test_duplicate_state_fails_only_its_root() {
    let project = LoadedProject::from_sources([
        (
            "app/a.ts",
            "export interface IAppState { d: Dup }\ninterface Dup { x: number }\ninterface Dup { y: number }",
        ),
        ("app/b.ts", "export interface IAppState { ok: string }"),
    ]);
    let generator = generator(None, GeneratorOptions::default());
    let report = generator.generate(&project, false);

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].path, Path::new("app/a.ts"));
    assert!(matches!(
        &report.failures[0].error,
        GenerationError::DuplicateState { name, .. } if name == "Dup"
    ));
    assert_eq!(report.written, vec![PathBuf::from("app/b.cursors.ts")]);
    assert!(generator.writer().get(Path::new("app/a.cursors.ts")).is_none());
}

#[test]
fn test_duplicate_array_element_type_is_tolerated() {
    let project = LoadedProject::from_sources([(
        "app/state.ts",
        "export interface IAppState { d: Dup[] }\ninterface Dup { x: number }\ninterface Dup { y: number }",
    )]);
    let generator = generator(None, GeneratorOptions::default());
    let report = generator.generate(&project, false);
    assert!(report.is_success());
    assert_eq!(report.written.len(), 1);
}

#[test]
fn test_files_without_root_state_produce_nothing() {
    let project =
        LoadedProject::from_sources([("app/other.ts", "export interface IOther { a: string }")]);
    let generator = generator(None, GeneratorOptions::default());
    let report = generator.generate(&project, false);

    assert!(report.is_success());
    assert!(report.written.is_empty());
    assert!(generator.writer().is_empty());
}

#[test]
fn test_self_referencing_record_terminates() {
    let project = LoadedProject::from_sources([(
        "app/state.ts",
        r#"
export interface IAppState {
    tree: INode
}

export interface INode {
    name: string
    parent: INode
}
"#,
    )]);
    let generator = generator(None, GeneratorOptions::default());
    let report = generator.generate(&project, false);

    assert!(report.is_success());
    assert_eq!(
        output(&generator, "app/state.cursors.ts"),
        "import * as s from './state';

export const rootKey = bf.rootCursor.key;

export const rootCursor: bf.ICursor<s.IAppState> = bf.rootCursor

export const treeCursor: bf.ICursor<s.INode> = {
    key: 'tree'
}

export const treeNameCursor: bf.ICursor<string> = {
    key: 'tree.name'
}

export const treeParentCursor: bf.ICursor<s.INode> = {
    key: 'tree.parent'
}
"
    );
}

#[test]
fn test_mutually_referencing_records_terminate() {
    let project = LoadedProject::from_sources([(
        "app/state.ts",
        r#"
export interface IAppState { a: A }
export interface A { b: B; n: number }
export interface B { a: A }
"#,
    )]);
    let generator = generator(None, GeneratorOptions::default());
    generator.generate(&project, false);
    let text = output(&generator, "app/state.cursors.ts");

    assert!(text.contains("key: 'a.b.a'"));
    assert!(!text.contains("key: 'a.b.a.b'"));
    assert_eq!(text.matches("export const").count(), 6);
}

#[test]
fn test_accessor_identifiers_are_unique_per_file() {
    let project = LoadedProject::from_sources([(
        "app/state.ts",
        r#"
export interface IAppState {
    todo: ITodo
    todoItems: string
    root: number
}

export interface ITodo {
    items: number
}
"#,
    )]);
    let generator = generator(None, GeneratorOptions::default());
    generator.generate(&project, false);
    let text = output(&generator, "app/state.cursors.ts");

    assert!(
        text.contains("export const todoItemsCursor: bf.ICursor<string> = {\n    key: 'todoItems'")
    );
    assert!(
        text.contains("export const todoItems1Cursor: bf.ICursor<number> = {\n    key: 'todo.items'")
    );
    assert!(text.contains("export const root1Cursor: bf.ICursor<number> = {\n    key: 'root'"));

    let mut names: Vec<_> = text
        .lines()
        .filter_map(|line| line.strip_prefix("export const "))
        .filter_map(|rest| rest.split(&[':', ' '][..]).next())
        .collect();
    let count = names.len();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), count, "{text}");
}

#[test]
fn test_generation_is_idempotent() {
    let sources = [(
        "app/state.ts",
        "export interface IAppState { a: A; b: string[] }\nexport interface A { c: number }",
    )];
    let first = generator(None, GeneratorOptions::default());
    first.generate(&LoadedProject::from_sources(sources), true);
    let second = generator(None, GeneratorOptions::default());
    second.generate(&LoadedProject::from_sources(sources), true);

    assert_eq!(
        output(&first, "app/state.cursors.ts"),
        output(&second, "app/state.cursors.ts")
    );
}

// ============================================================================
// Cross-file expansion
// ============================================================================

fn cross_file_project() -> LoadedProject {
    LoadedProject::from_sources([
        (
            "app/state.ts",
            r#"
import * as bf from 'bobflux';
import * as todo from './todo/state';
import * as page from './page/state';
import * as misc from './misc';

export interface IAppState extends bf.IState {
    todo: todo.ITodoState
    page: page.IPageState
    misc: misc.IPlain
    missing: nope.IThing
    gone: misc.IUnknown
}
"#,
        ),
        (
            "app/todo/state.ts",
            "import * as bf from 'bobflux';\nexport interface ITodoState extends bf.IComponentState { count: number }",
        ),
        (
            "app/page/state.ts",
            "import * as bf from 'bobflux';\nexport interface IPageState extends bf.IRouteComponentState { title: string }",
        ),
        ("app/misc.ts", "export interface IPlain { z: number }"),
    ])
}

#[test]
fn test_recursive_component_state_is_flattened() {
    let generator = generator(None, GeneratorOptions::default());
    let report = generator.generate(&cross_file_project(), true);
    assert!(report.is_success());

    let text = output(&generator, "app/state.cursors.ts");
    assert!(
        text.contains("export const todoCursor: bf.ICursor<todo.ITodoState> = {\n    key: 'todo'\n}")
    );
    assert!(
        text.contains("export const todoCountCursor: bf.ICursor<number> = {\n    key: 'todo.count'\n}")
    );
    // Plain and unresolvable external states keep their own accessor only.
    assert!(text.contains("export const miscCursor: bf.ICursor<misc.IPlain>"));
    assert!(!text.contains("miscZ"));
    assert!(text.contains("export const missingCursor: bf.ICursor<nope.IThing>"));
    assert!(text.contains("export const goneCursor: bf.ICursor<misc.IUnknown>"));
}

#[test]
fn test_recursive_route_state_gets_own_file() {
    let generator = generator(None, GeneratorOptions::default());
    let report = generator.generate(&cross_file_project(), true);

    assert_eq!(
        report.written,
        vec![
            PathBuf::from("app/page/state.cursors.ts"),
            PathBuf::from("app/state.cursors.ts"),
        ]
    );
    assert_eq!(
        output(&generator, "app/page/state.cursors.ts"),
        "import * as bf from 'bobflux';
import * as s from './state';

export const rootKey = 'page';

export const rootCursor: bf.ICursor<s.IPageState> = {
    key: rootKey
}

export const titleCursor: bf.ICursor<string> = {
    key: rootKey + '.title'
}
"
    );
    // The route field itself still has an accessor in the parent file.
    let parent = output(&generator, "app/state.cursors.ts");
    assert!(parent.contains("pageCursor: bf.ICursor<page.IPageState>"));
}

#[test]
fn test_component_fields_resolve_against_originating_file() {
    let project = LoadedProject::from_sources([
        (
            "app/state.ts",
            r#"
import * as bf from 'bobflux';
import * as todo from './todo/state';

export interface IAppState extends bf.IState {
    todo: todo.ITodoState
}

export interface IUser {
    name: string
}
"#,
        ),
        (
            "app/todo/state.ts",
            r#"
import * as bf from 'bobflux';

export interface ITodoState extends bf.IComponentState {
    owner: IUser
}
"#,
        ),
    ]);
    let generator = generator(None, GeneratorOptions::default());
    let report = generator.generate(&project, true);
    assert!(report.is_success());

    let text = output(&generator, "app/state.cursors.ts");
    assert!(
        text.contains("export const todoOwnerCursor: bf.ICursor<s.IUser> = {\n    key: 'todo.owner'")
    );
    assert!(
        text.contains("export const todoOwnerNameCursor: bf.ICursor<string> = {\n    key: 'todo.owner.name'")
    );
}

#[test]
fn test_route_root_key_extends_override() {
    let generator = generator(None, GeneratorOptions::default().with_root_key("app"));
    generator.generate(&cross_file_project(), true);

    let page = output(&generator, "app/page/state.cursors.ts");
    assert!(page.contains("export const rootKey = 'app.page';"));
}

#[test]
fn test_non_recursive_run_never_extracts_other_files() {
    struct Counting(Arc<AtomicUsize>);
    impl SchemaExtractor for Counting {
        fn extract(&self, file: &SourceFile) -> SourceSchema {
            self.0.fetch_add(1, Ordering::SeqCst);
            DeclarationExtractor.extract(file)
        }
    }

    let calls = Arc::new(AtomicUsize::new(0));
    let project = GenerationProject::new("app", ROOT).with_state_file("state.ts");
    let generator =
        CursorsGenerator::new(project, Counting(Arc::clone(&calls)), MemoryWriter::new());
    let report = generator.generate(&cross_file_project(), false);

    assert_eq!(report.written, vec![PathBuf::from("app/state.cursors.ts")]);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    let text = generator.writer().get(Path::new("app/state.cursors.ts")).unwrap();
    assert!(text.contains("todoCursor: bf.ICursor<todo.ITodoState>"));
    assert!(!text.contains("todoCount"));
}

#[test]
fn test_route_cycle_terminates() {
    let project = LoadedProject::from_sources([
        (
            "app/state.ts",
            "import * as page from './page';\nexport interface IAppState { page: page.IPage }",
        ),
        (
            "app/page.ts",
            "import * as bf from 'bobflux';\nimport * as sub from './sub';\nexport interface IPage extends bf.IRouteComponentState { sub: sub.ISub }",
        ),
        (
            "app/sub.ts",
            "import * as bf from 'bobflux';\nimport * as page from './page';\nexport interface ISub extends bf.IRouteComponentState { parent: page.IPage }",
        ),
    ]);
    let generator = generator(Some("state.ts"), GeneratorOptions::default());
    let report = generator.generate(&project, true);

    assert!(report.is_success());
    assert_eq!(
        report.written,
        vec![
            PathBuf::from("app/sub.cursors.ts"),
            PathBuf::from("app/page.cursors.ts"),
            PathBuf::from("app/state.cursors.ts"),
        ]
    );
    let sub = output(&generator, "app/sub.cursors.ts");
    assert!(sub.contains("export const rootKey = 'page.sub';"));
    assert!(sub.contains("parentCursor: bf.ICursor<page.IPage>"));
}

// ============================================================================
// Writers and originating files
// ============================================================================

#[test]
fn test_write_failures_are_reported_and_do_not_stop_the_run() {
    let project = LoadedProject::from_sources([
        ("app/a.ts", "export interface IAppState { a: string }"),
        ("app/b.ts", "export interface IAppState { b: string }"),
    ]);
    let writer = |path: &Path, _contents: &[u8]| -> io::Result<()> {
        if path.ends_with("a.cursors.ts") {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
        } else {
            Ok(())
        }
    };
    let target = GenerationProject::new("app", ROOT);
    let generator = CursorsGenerator::new(target, DeclarationExtractor, writer);
    let report = generator.generate(&project, false);

    assert!(!report.is_success());
    assert_eq!(report.write_failures.len(), 1);
    assert_eq!(report.write_failures[0].path, Path::new("app/a.cursors.ts"));
    assert_eq!(report.written, vec![PathBuf::from("app/b.cursors.ts")]);
}

#[test]
fn test_unknown_state_file_is_skipped() {
    let project =
        LoadedProject::from_sources([("app/a.ts", "export interface IAppState { a: string }")]);
    let generator = generator(Some("missing.ts"), GeneratorOptions::default());
    let report = generator.generate(&project, false);

    assert!(report.is_success());
    assert!(report.written.is_empty());
}
