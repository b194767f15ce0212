use eject_enum_parser::{DeclarationKind, NodeArena, NodeIndex, ParserState};

use crate::binder::FileBinder;

struct Bound {
    text: String,
    arena: NodeArena,
    root: NodeIndex,
    binder: FileBinder,
}

fn bind(source: &str) -> Bound {
    let mut parser = ParserState::new("input.ts".to_string(), source.to_string());
    let root = parser.parse_source_file();
    assert!(parser.get_diagnostics().is_empty());
    let arena = parser.into_arena();
    let binder = FileBinder::bind(&arena, root);
    Bound {
        text: source.to_string(),
        arena,
        root,
        binder,
    }
}

impl Bound {
    /// Resolve the first `Name.Member` type site after `marker`.
    fn resolve_after(&self, marker: &str) -> Option<NodeIndex> {
        let offset = self.text.find(marker).unwrap() as u32;
        let file = self.arena.get_source_file(self.root).unwrap();
        let site = file
            .type_sites
            .iter()
            .filter_map(|&site| self.arena.get_type_site(site))
            .filter(|site| site.pos > offset)
            .min_by_key(|site| site.pos)
            .unwrap();
        self.binder.resolve_enum(site.scope, &site.qualifier)
    }

    fn enum_named(&self, nth: usize) -> NodeIndex {
        self.arena.get_source_file(self.root).unwrap().enums[nth]
    }

    fn file_scope(&self) -> NodeIndex {
        self.arena.get_source_file(self.root).unwrap().scope
    }
}

const SCOPES: &str = "\
enum Kind { A, B }
namespace Outer {
  namespace Kind { export type A = 1; }
  interface Shadowed { k: Kind.A; }
}
namespace Aliased {
  import Kind = Other.Kind;
  interface Imported { k: Kind.A; }
}
function f() {
  const Kind = 1;
  interface Value { k: Kind.A; }
}
class Holder {
  field: Kind.B;
}
interface Top { k: Kind.B; }
";

#[test]
fn type_names_resolve_to_the_file_enum() {
    let bound = bind(SCOPES);
    let kind = bound.enum_named(0);
    assert_eq!(bound.resolve_after("interface Top"), Some(kind));
    assert_eq!(bound.resolve_after("class Holder"), Some(kind));
}

#[test]
fn namespaces_and_imports_hide_an_outer_enum() {
    let bound = bind(SCOPES);
    assert_eq!(bound.resolve_after("interface Shadowed"), None);
    assert_eq!(bound.resolve_after("interface Imported"), None);
}

#[test]
fn values_do_not_hide_an_outer_enum_in_type_position() {
    let bound = bind(SCOPES);
    assert_eq!(bound.resolve_after("interface Value"), Some(bound.enum_named(0)));
}

#[test]
fn inner_enum_wins_over_outer_enum() {
    let bound = bind(
        "enum E { A }\nfunction f() {\n  enum E { A = 5 }\n  interface I { e: E.A; }\n}\n",
    );
    assert_eq!(bound.resolve_after("interface I"), Some(bound.enum_named(1)));
}

#[test]
fn unknown_qualifier_resolves_to_nothing() {
    let bound = bind("enum E { A }\ninterface I { e: Missing.A; }\n");
    assert_eq!(bound.resolve_after("interface I"), None);
}

#[test]
fn repeated_enum_or_namespace_names_merge() {
    let bound = bind(
        "enum E { A }\nenum E { B = 1 }\nnamespace N {}\nenum N { X }\nfunction F() {}\nnamespace F {}\nenum Solo { Y }\n",
    );
    let scope = bound.file_scope();
    assert!(bound.binder.is_merged(scope, "E"));
    assert!(bound.binder.is_merged(scope, "N"));
    assert!(!bound.binder.is_merged(scope, "F"));
    assert!(!bound.binder.is_merged(scope, "Solo"));
    assert_eq!(bound.binder.declarations(scope, "F").len(), 2);
    assert!(bound.binder.declarations(scope, "missing").is_empty());
}

#[test]
fn any_value_declaration_hides_an_outer_enum_in_expressions() {
    let bound = bind(SCOPES);
    let function_scope = bound
        .arena
        .child_scopes(file_statement_containing(&bound, "function f"))
        .next()
        .unwrap();

    let outer = bound.binder.resolve_value(bound.file_scope(), "Kind");
    assert_eq!(outer.len(), 1);
    assert_eq!(outer[0].node, bound.enum_named(0));

    let inner = bound.binder.resolve_value(function_scope, "Kind");
    assert_eq!(inner.len(), 1);
    assert_eq!(inner[0].kind, DeclarationKind::Variable);

    assert!(bound.binder.resolve_value(bound.file_scope(), "Top").is_empty());
}

fn file_statement_containing(bound: &Bound, marker: &str) -> NodeIndex {
    let offset = bound.text.find(marker).unwrap() as u32;
    let file = bound.arena.get_source_file(bound.root).unwrap();
    let scope = bound.arena.get_scope(file.scope).unwrap();
    scope
        .statements
        .iter()
        .copied()
        .find(|&statement| {
            let node = bound.arena.get(statement).unwrap();
            node.pos() <= offset && offset < node.end()
        })
        .unwrap()
}
