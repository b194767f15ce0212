use eject_enum_common::diagnostics::diagnostic_codes;
use eject_enum_parser::parser::{BinaryExprData, UnaryExprData};
use eject_enum_parser::{
    DeclarationKind, MemberName, ModifierFlags, Node, NodeArena, NodeIndex, ParseDiagnostic,
    ParserState, ScopeKind, StatementKind,
};
use eject_enum_scanner::SyntaxKind;

fn parse(file_name: &str, source: &str) -> (NodeArena, NodeIndex, Vec<ParseDiagnostic>) {
    let mut parser = ParserState::new(file_name.to_string(), source.to_string());
    let root = parser.parse_source_file();
    let diagnostics = parser.get_diagnostics().to_vec();
    (parser.into_arena(), root, diagnostics)
}

fn parse_ok(source: &str) -> (NodeArena, NodeIndex) {
    let (arena, root, diagnostics) = parse("test.ts", source);
    assert!(diagnostics.is_empty(), "unexpected diagnostics: {diagnostics:?}");
    (arena, root)
}

fn enum_names(arena: &NodeArena, root: NodeIndex) -> Vec<String> {
    let file = arena.get_source_file(root).expect("source file");
    file.enums
        .iter()
        .map(|&e| arena.get_enum(e).expect("enum").name.clone())
        .collect()
}

fn text_of(source: &str, node: &Node) -> String {
    source[node.pos() as usize..node.end() as usize].to_string()
}

#[test]
fn parses_enum_declaration_with_modifiers_and_members() {
    let source = "export enum YesNo {\n  No,\n  Yes = 1,\n}\n";
    let (arena, root) = parse_ok(source);
    let file = arena.get_source_file(root).unwrap();
    assert_eq!(file.enums.len(), 1);

    let data = arena.get_enum(file.enums[0]).unwrap();
    assert_eq!(data.name, "YesNo");
    assert_eq!(data.modifiers, ModifierFlags::EXPORT);
    assert!(data.is_exported());
    assert!(!data.is_ambient());
    assert_eq!(data.pos, 0);
    assert_eq!(data.end as usize, source.len() - 1);
    assert_eq!(&source[data.name_start as usize..][..5], "YesNo");
    assert_eq!(&source[data.open_brace_end as usize - 1..][..1], "{");
    assert_eq!(&source[data.close_brace_start as usize..][..1], "}");
    assert_eq!(data.members.len(), 2);

    let no = arena.get_enum_member(data.members[0]).unwrap();
    assert_eq!(no.name, MemberName::Identifier("No".to_string()));
    assert!(no.initializer.is_none());
    assert!(no.separator_end.is_some());

    let yes = arena.get_enum_member(data.members[1]).unwrap();
    assert_eq!(yes.name_text, "Yes");
    match arena.get(yes.initializer) {
        Some(Node::NumericLiteral(literal)) => assert_eq!(literal.value, Some(1.0)),
        other => panic!("expected numeric literal, got {other:?}"),
    }
}

#[test]
fn enum_statement_is_listed_in_file_scope() {
    let (arena, root) = parse_ok("const a = 1\nenum E { A }\nlet b = 2;\n");
    let file = arena.get_source_file(root).unwrap();
    let scope = arena.get_scope(file.scope).unwrap();
    assert_eq!(scope.kind, ScopeKind::SourceFile);
    assert_eq!(scope.statements.len(), 3);
    assert!(matches!(arena.get(scope.statements[1]), Some(Node::Enum(_))));
    assert_eq!(file.enums, vec![scope.statements[1]]);
}

#[test]
fn const_and_declare_enums_record_modifiers() {
    let (arena, root) = parse_ok("export declare const enum A { X }\nconst enum B { Y }\n");
    let file = arena.get_source_file(root).unwrap();
    let a = arena.get_enum(file.enums[0]).unwrap();
    assert_eq!(
        a.modifiers,
        ModifierFlags::EXPORT | ModifierFlags::DECLARE | ModifierFlags::CONST
    );
    assert!(a.is_ambient());
    let b = arena.get_enum(file.enums[1]).unwrap();
    assert_eq!(b.modifiers, ModifierFlags::CONST);
}

#[test]
fn enums_in_ambient_contexts_are_ambient() {
    let (arena, root) = parse_ok("declare namespace N {\n  enum E { A }\n}\n");
    let file = arena.get_source_file(root).unwrap();
    let e = arena.get_enum(file.enums[0]).unwrap();
    assert!(e.modifiers.contains(ModifierFlags::AMBIENT));
    assert!(e.is_ambient());

    let (arena, root, diagnostics) = parse("types.d.ts", "export enum E { A }\n");
    assert!(diagnostics.is_empty());
    let file = arena.get_source_file(root).unwrap();
    assert!(file.is_declaration_file);
    assert!(arena.get_enum(file.enums[0]).unwrap().is_ambient());
}

#[test]
fn finds_enums_in_nested_function_scopes() {
    let source = r#"export function f1() {
  enum A { X }
  return A.X;
}
export const f2 = () => {
  enum B { X }
};
export const obj = {
  method() {
    enum C { X }
  },
  arrow: () => {
    enum D { X }
  },
};
export class K {
  constructor() {
    enum E { X }
  }
  static {
    enum F { X }
  }
  get value() {
    enum G { X }
    return 1;
  }
}
const fe = function () {
  enum H { X }
};
"#;
    let (arena, root) = parse_ok(source);
    assert_eq!(
        enum_names(&arena, root),
        vec!["A", "B", "C", "D", "E", "F", "G", "H"]
    );

    let file = arena.get_source_file(root).unwrap();
    let f = arena.get_enum(file.enums[5]).unwrap();
    assert_eq!(arena.get_scope(f.scope).unwrap().kind, ScopeKind::ClassStaticBlock);
    let a = arena.get_enum(file.enums[0]).unwrap();
    let body = arena.get_scope(a.scope).unwrap();
    assert_eq!(body.kind, ScopeKind::FunctionBody);
    assert_eq!(body.parent, file.scope);
}

#[test]
fn statement_holes_list_child_scopes_in_order() {
    let (arena, root) = parse_ok("if (x) { a(); } else { b(); }\n");
    let file = arena.get_source_file(root).unwrap();
    let scope = arena.get_scope(file.scope).unwrap();
    let statement = arena.get_statement(scope.statements[0]).unwrap();
    assert_eq!(statement.kind, StatementKind::If);
    let children: Vec<_> = arena.child_scopes(scope.statements[0]).collect();
    assert_eq!(children.len(), 2);
    let first = arena.get_scope(children[0]).unwrap();
    let second = arena.get_scope(children[1]).unwrap();
    assert!(first.end < second.pos);
}

#[test]
fn switch_clauses_are_scopes() {
    let source = "switch (x) {\n  case 1:\n    enum E { A }\n    break;\n  case 2: {\n    enum F { B }\n  }\n  default:\n}\n";
    let (arena, root) = parse_ok(source);
    assert_eq!(enum_names(&arena, root), vec!["E", "F"]);

    let file = arena.get_source_file(root).unwrap();
    let e = arena.get_enum(file.enums[0]).unwrap();
    let clause = arena.get_scope(e.scope).unwrap();
    assert_eq!(clause.kind, ScopeKind::CaseClause);
    assert_eq!(clause.statements.len(), 2);
    assert_eq!(&source[clause.pos as usize - 1..][..1], ":");
    assert!(source[..clause.end as usize].ends_with("break;"));

    let f = arena.get_enum(file.enums[1]).unwrap();
    let block = arena.get_scope(f.scope).unwrap();
    assert_eq!(block.kind, ScopeKind::Block);
    assert_eq!(arena.get_scope(block.parent).unwrap().kind, ScopeKind::CaseClause);
}

#[test]
fn conditional_case_label_does_not_end_at_inner_colon() {
    let (arena, root) = parse_ok("switch (x) {\n  case a ? b : c:\n    enum E { A }\n}\n");
    assert_eq!(enum_names(&arena, root), vec!["E"]);
}

#[test]
fn records_member_type_sites() {
    let source = r#"export interface Circle {
  kind: ShapeKind.Circle;
  other?: ShapeKind.Square
  union: ShapeKind.Circle | ShapeKind.Square;
  [key: string]: unknown;
}
type Literal = { tag: Tag.A };
class Holder {
  field: Tag.B = Tag.B;
  constructor(private readonly held: Tag.C, plain: Tag.D) {}
}
"#;
    let (arena, root) = parse_ok(source);
    let file = arena.get_source_file(root).unwrap();
    let sites: Vec<(String, String, String)> = file
        .type_sites
        .iter()
        .map(|&site| {
            let data = arena.get_type_site(site).unwrap();
            (
                data.qualifier.clone(),
                data.member.clone(),
                source[data.pos as usize..data.end as usize].to_string(),
            )
        })
        .collect();
    let expected = [
        ("ShapeKind", "Circle"),
        ("ShapeKind", "Square"),
        ("Tag", "A"),
        ("Tag", "B"),
        ("Tag", "C"),
    ];
    assert_eq!(sites.len(), expected.len(), "{sites:?}");
    for ((qualifier, member, text), (q, m)) in sites.iter().zip(expected) {
        assert_eq!(qualifier, q);
        assert_eq!(member, m);
        assert_eq!(text, &format!("{q}.{m}"));
    }
}

#[test]
fn object_literal_values_are_not_type_sites() {
    let (arena, root) = parse_ok("const o = { kind: Shape.Circle };\n");
    let file = arena.get_source_file(root).unwrap();
    assert!(file.type_sites.is_empty());
}

#[test]
fn builds_constant_expression_trees() {
    let source = "enum E { A = 1 + 2 * 3, B = -(A), C = 2 ** 3 ** 2, D = E[\"A\"] | E.B }\n";
    let (arena, root) = parse_ok(source);
    let file = arena.get_source_file(root).unwrap();
    let members = &arena.get_enum(file.enums[0]).unwrap().members;
    let initializer =
        |i: usize| arena.get(arena.get_enum_member(members[i]).unwrap().initializer).unwrap();

    match initializer(0) {
        Node::BinaryExpression(BinaryExprData {
            operator, right, ..
        }) => {
            assert_eq!(*operator, SyntaxKind::PlusToken);
            assert!(matches!(
                arena.get(*right),
                Some(Node::BinaryExpression(BinaryExprData {
                    operator: SyntaxKind::AsteriskToken,
                    ..
                }))
            ));
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(text_of(source, initializer(0)), "1 + 2 * 3");

    match initializer(1) {
        Node::PrefixUnaryExpression(UnaryExprData {
            operator, operand, ..
        }) => {
            assert_eq!(*operator, SyntaxKind::MinusToken);
            assert!(matches!(
                arena.get(*operand),
                Some(Node::ParenthesizedExpression(_))
            ));
        }
        other => panic!("unexpected {other:?}"),
    }

    // Exponentiation is right-associative.
    match initializer(2) {
        Node::BinaryExpression(BinaryExprData { left, right, .. }) => {
            assert!(matches!(arena.get(*left), Some(Node::NumericLiteral(_))));
            assert!(matches!(arena.get(*right), Some(Node::BinaryExpression(_))));
        }
        other => panic!("unexpected {other:?}"),
    }

    match initializer(3) {
        Node::BinaryExpression(BinaryExprData { left, right, .. }) => {
            assert!(matches!(
                arena.get(*left),
                Some(Node::ElementAccessExpression(_))
            ));
            assert!(matches!(
                arena.get(*right),
                Some(Node::PropertyAccessExpression(_))
            ));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn multi_line_initializer_spans_its_source_text() {
    let source = "enum E {\n  A = 1,\n  Sum = A +\n    A,\n}\n";
    let (arena, root) = parse_ok(source);
    let file = arena.get_source_file(root).unwrap();
    let members = &arena.get_enum(file.enums[0]).unwrap().members;
    let sum = arena.get_enum_member(members[1]).unwrap();
    let node = arena.get(sum.initializer).unwrap();
    assert_eq!(text_of(source, node), "A +\n    A");
}

#[test]
fn unsupported_initializers_keep_their_span() {
    let source = "enum E { A = foo(1, 2), B = \"x\".length, C = cond ? 1 : 2 }\n";
    let (arena, root) = parse_ok(source);
    let file = arena.get_source_file(root).unwrap();
    let members = &arena.get_enum(file.enums[0]).unwrap().members;
    assert_eq!(members.len(), 3);

    let a = arena.get(arena.get_enum_member(members[0]).unwrap().initializer).unwrap();
    assert!(matches!(a, Node::UnsupportedExpression(_)));
    assert_eq!(text_of(source, a), "foo(1, 2)");

    let b = arena.get(arena.get_enum_member(members[1]).unwrap().initializer).unwrap();
    assert!(matches!(b, Node::PropertyAccessExpression(_)));

    let c = arena.get(arena.get_enum_member(members[2]).unwrap().initializer).unwrap();
    assert!(matches!(c, Node::UnsupportedExpression(_)));
    assert_eq!(text_of(source, c), "cond ? 1 : 2");
}

#[test]
fn member_names_of_every_form() {
    let source = "enum E { plain, 'quoted', \"dq\\u0041\", 1, [computed], default }\n";
    let (arena, root) = parse_ok(source);
    let file = arena.get_source_file(root).unwrap();
    let names: Vec<(MemberName, String)> = arena
        .get_enum(file.enums[0])
        .unwrap()
        .members
        .iter()
        .map(|&m| {
            let data = arena.get_enum_member(m).unwrap();
            (data.name.clone(), data.name_text.clone())
        })
        .collect();
    assert_eq!(
        names,
        vec![
            (MemberName::Identifier("plain".into()), "plain".into()),
            (MemberName::String("quoted".into()), "'quoted'".into()),
            (MemberName::String("dqA".into()), "\"dq\\u0041\"".into()),
            (MemberName::Numeric("1".into()), "1".into()),
            (MemberName::Computed, "[computed]".into()),
            (MemberName::Identifier("default".into()), "default".into()),
        ]
    );
}

#[test]
fn records_declared_names() {
    let source = r#"import Def, { a as b, type T } from "m";
import * as NS from "n";
import Eq = require("eq");
namespace Space.Inner {}
class Klass {}
function fn() {}
var v1 = 1, v2;
interface Face {}
type Alias = string;
"#;
    let (arena, root) = parse_ok(source);
    let file = arena.get_source_file(root).unwrap();
    let scope = arena.get_scope(file.scope).unwrap();
    let mut declared = Vec::new();
    for &statement in &scope.statements {
        for name in &arena.get_statement(statement).unwrap().declarations {
            declared.push((name.name.clone(), name.kind));
        }
    }
    assert_eq!(
        declared,
        vec![
            ("Def".to_string(), DeclarationKind::Import),
            ("b".to_string(), DeclarationKind::Import),
            ("T".to_string(), DeclarationKind::Import),
            ("NS".to_string(), DeclarationKind::Import),
            ("Eq".to_string(), DeclarationKind::Import),
            ("Space".to_string(), DeclarationKind::Namespace),
            ("Klass".to_string(), DeclarationKind::Class),
            ("fn".to_string(), DeclarationKind::Function),
            ("v1".to_string(), DeclarationKind::Variable),
            ("v2".to_string(), DeclarationKind::Variable),
            ("Face".to_string(), DeclarationKind::Interface),
            ("Alias".to_string(), DeclarationKind::TypeAlias),
        ]
    );
}

#[test]
fn braces_inside_literals_do_not_open_scopes() {
    let source = "const r = /{[}]/g;\nconst s = \"{\";\nconst t = `${ {a: 1}.a }}`;\nenum E { A }\n";
    let (arena, root) = parse_ok(source);
    assert_eq!(enum_names(&arena, root), vec!["E"]);
    let file = arena.get_source_file(root).unwrap();
    assert_eq!(arena.get_scope(file.scope).unwrap().statements.len(), 4);
}

#[test]
fn generic_types_and_arrow_bodies() {
    let source = r#"function g<T extends Array<Map<string, number>>>(x: T): Promise<void> {
  enum A { X }
}
const h = async (v: number): Promise<number> => {
  enum B { X }
  return v;
};
"#;
    let (arena, root) = parse_ok(source);
    assert_eq!(enum_names(&arena, root), vec!["A", "B"]);
}

#[test]
fn tsx_elements_are_opaque() {
    let source = "const el = <div>{items.map(i => <span>{i}</span>)}</div>;\nenum E { A }\n";
    let (arena, root, diagnostics) = parse("view.tsx", source);
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    assert_eq!(enum_names(&arena, root), vec!["E"]);
}

#[test]
fn reports_unbalanced_braces() {
    let (_, _, diagnostics) = parse("test.ts", "function f() {\n  enum E { A }\n");
    assert!(
        diagnostics
            .iter()
            .any(|d| d.code == diagnostic_codes::EXPECTED && d.message == "'}' expected.")
    );

    let (_, _, diagnostics) = parse("test.ts", "}\n");
    assert_eq!(
        diagnostics[0].code,
        diagnostic_codes::DECLARATION_OR_STATEMENT_EXPECTED
    );
}

#[test]
fn reports_scanner_errors() {
    let (_, _, diagnostics) = parse("test.ts", "const s = \"open;\nenum E { A }\n");
    assert!(
        diagnostics
            .iter()
            .any(|d| d.code == diagnostic_codes::UNTERMINATED_STRING_LITERAL)
    );
}

#[test]
fn excessive_nesting_is_a_diagnostic() {
    let source = format!("x = {}1;\n", "(".repeat(400));
    let (_, _, diagnostics) = parse("test.ts", &source);
    assert!(
        diagnostics
            .iter()
            .any(|d| d.code == diagnostic_codes::NESTING_TOO_DEEP)
    );
}

#[test]
fn empty_file_has_empty_scope() {
    let (arena, root) = parse_ok("");
    let file = arena.get_source_file(root).unwrap();
    let scope = arena.get_scope(file.scope).unwrap();
    assert!(scope.statements.is_empty());
    assert_eq!((scope.pos, scope.end), (0, 0));
}
