use eject_enum_parser::parser::SynthesizedData;
use eject_enum_parser::{Node, NodeIndex, ParserState, TextSpan, print_source_file};

fn round_trip(file_name: &str, source: &str) -> String {
    let mut parser = ParserState::new(file_name.to_string(), source.to_string());
    let root = parser.parse_source_file();
    assert!(
        parser.get_diagnostics().is_empty(),
        "unexpected diagnostics: {:?}",
        parser.get_diagnostics()
    );
    print_source_file(parser.get_arena(), root)
}

#[test]
fn untouched_tree_prints_source_verbatim() {
    let sources = [
        "",
        "\n\n",
        "// only a comment",
        "#!/usr/bin/env node\nconsole.log(1)\n",
        "export enum YesNo {\n  /** No */\n  No, // zero\n  Yes = 1 << 2,\n}\n\n// tail\n",
        "function f() {\r\n  enum E { A }\r\n  return E.A;\r\n}\r\n",
        "namespace N {\n  export namespace M {\n    const enum K { A = 'a' }\n  }\n}\n",
        "switch (k) {\n  case 1:\n    enum A { X }\n  // dangling\n  default: {\n  }\n}\n",
        "class C<T> extends B<T> implements I {\n  @dec() field: E.A = E.A;\n  static { enum S { Q } }\n}\n",
        "const t = `a${b}c${`nested ${d}`}`;\nconst r = /[/]{2}/u;\n",
        "label: for (const x of xs) if (x) continue label; else break\n",
        "\u{FEFF}enum Bom { A }\n",
    ];
    for source in sources {
        assert_eq!(round_trip("input.ts", source), source);
    }
}

#[test]
fn untouched_tsx_prints_verbatim() {
    let source = "export const View = () => (\n  <div className=\"x\">\n    {items.map((i) => <Item key={i} />)}\n  </div>\n);\nenum E { A }\n";
    assert_eq!(round_trip("view.tsx", source), source);
}

#[test]
fn replaced_type_site_prints_synthesized_text() {
    let source = "interface I {\n  kind: E.A;\n}\n";
    let mut parser = ParserState::new("input.ts".to_string(), source.to_string());
    let root = parser.parse_source_file();
    let mut arena = parser.into_arena();
    let site = arena.get_source_file(root).unwrap().type_sites[0];
    let (pos, end) = {
        let data = arena.get_type_site(site).unwrap();
        (data.pos, data.end)
    };
    arena.replace(
        site,
        Node::Synthesized(SynthesizedData {
            pos,
            end,
            detached: TextSpan::empty_at(pos),
            carried: TextSpan::empty_at(pos),
            leading: String::new(),
            text: "typeof E.A".to_string(),
        }),
    );
    assert_eq!(
        print_source_file(&arena, root),
        "interface I {\n  kind: typeof E.A;\n}\n"
    );
}

#[test]
fn spliced_statements_print_in_place_of_the_original() {
    let source = "const a = 1;\n/** doc */\nenum E { A }\nconst b = 2;\n";
    let mut parser = ParserState::new("input.ts".to_string(), source.to_string());
    let root = parser.parse_source_file();
    let mut arena = parser.into_arena();
    let file_scope = arena.get_source_file(root).unwrap().scope;
    let enum_index = arena.get_source_file(root).unwrap().enums[0];
    let (pos, start, end) = {
        let data = arena.get_enum(enum_index).unwrap();
        (data.pos, data.start, data.end)
    };
    let doc_start = source.find("/**").unwrap() as u32;

    let constant = arena.add(Node::Synthesized(SynthesizedData {
        pos,
        end,
        detached: TextSpan::new(pos, doc_start),
        carried: TextSpan::new(doc_start, start),
        leading: String::new(),
        text: "const E = { A: 0 } as const;".to_string(),
    }));
    let alias = arena.add(Node::Synthesized(SynthesizedData {
        pos: end,
        end,
        detached: TextSpan::empty_at(end),
        carried: TextSpan::empty_at(end),
        leading: "\n\n".to_string(),
        text: "type E = (typeof E)[keyof typeof E];".to_string(),
    }));
    let index = arena
        .get_scope(file_scope)
        .unwrap()
        .statements
        .iter()
        .position(|&s| s == enum_index)
        .unwrap();
    assert!(arena.splice_statements(file_scope, index, 1, &[constant, alias]));
    assert!(!arena.splice_statements(file_scope, 10, 1, &[]));
    assert!(!arena.splice_statements(NodeIndex::NONE, 0, 0, &[]));

    assert_eq!(
        print_source_file(&arena, root),
        "const a = 1;\n/** doc */\nconst E = { A: 0 } as const;\n\ntype E = (typeof E)[keyof typeof E];\nconst b = 2;\n"
    );
}
