use eject_enum_parser::ParserState;

use crate::evaluator::{
    EnumEvaluator, EnumValue, OuterEnumValues, ResolvedValue, to_int32, to_uint32,
};

/// `Other.X = 40` and `Other.Name = "other"`.
struct OtherEnum;

impl OuterEnumValues for OtherEnum {
    fn member_value(&self, qualifier: &str, member: &str) -> Option<EnumValue> {
        match (qualifier, member) {
            ("Other", "X") => Some(EnumValue::Number(40.0)),
            ("Other", "Name") => Some(EnumValue::String("other".to_string())),
            _ => None,
        }
    }
}

/// Resolve every member of the first enum in `source`.
fn resolve(source: &str) -> Vec<ResolvedValue> {
    resolve_with(source, None)
}

fn resolve_with(source: &str, outer: Option<&dyn OuterEnumValues>) -> Vec<ResolvedValue> {
    let mut parser = ParserState::new("test.ts".to_string(), source.to_string());
    let root = parser.parse_source_file();
    assert!(parser.get_diagnostics().is_empty(), "{:?}", parser.get_diagnostics());
    let arena = parser.get_arena();
    let enum_index = arena.get_source_file(root).unwrap().enums[0];
    let decl = arena.get_enum(enum_index).unwrap();

    let mut evaluator = EnumEvaluator::new(arena, &decl.name);
    if let Some(outer) = outer {
        evaluator = evaluator.with_outer(outer);
    }
    let mut previous: Option<ResolvedValue> = None;
    let mut values = Vec::new();
    for &member in &decl.members {
        let value = evaluator.resolve_member(arena.get_enum_member(member).unwrap(), previous.as_ref());
        values.push(value.clone());
        previous = Some(value);
    }
    values
}

fn numbers(values: &[f64]) -> Vec<ResolvedValue> {
    values.iter().map(|&v| ResolvedValue::Number(v)).collect()
}

#[test]
fn omitted_initializers_count_up_from_previous() {
    assert_eq!(resolve("enum E { A, B = 10, C }"), numbers(&[0.0, 10.0, 11.0]));
    assert_eq!(resolve("enum E { A = -2, B, C }"), numbers(&[-2.0, -1.0, 0.0]));
    assert_eq!(resolve("enum E { A = 0.5, B }"), numbers(&[0.5, 1.5]));
}

#[test]
fn omitted_initializer_after_string_is_unresolvable() {
    assert_eq!(
        resolve("enum E { A = 'a', B }"),
        vec![ResolvedValue::String("a".to_string()), ResolvedValue::Unresolvable]
    );
}

#[test]
fn arithmetic_and_bitwise_operators_follow_javascript() {
    let values = resolve(
        "enum ConstExpr {
          Add = 1 + 2,
          Sub = 3 - 1,
          Mul = 2 * 3,
          Div = 10 / 2,
          Mod = 9 % 5,
          Shl = 1 << 3,
          Shr = -32 >> 1,
          Ushr = 32 >>> 1,
          And = 0x1234 & 0xff00,
          Or = 0x1200 | 0x34,
          Xor = 0b1100 ^ 0b0101,
          Minus = -(1 + 2),
          Inv = ~0,
          Pow = 2 ** 3 ** 2,
        }",
    );
    assert_eq!(
        values,
        numbers(&[
            3.0, 2.0, 6.0, 5.0, 4.0, 8.0, -16.0, 16.0, 4608.0, 4660.0, 9.0, -3.0, -1.0, 512.0
        ])
    );
}

#[test]
fn shifts_mask_count_and_wrap_to_32_bits() {
    let values = resolve(
        "enum E {
          A = 1 << 32,
          B = 1 << 31,
          C = -1 >>> 0,
          D = -1 >>> 28,
          E = 0xffffffff | 0,
          F = 2147483648 >> 31,
        }",
    );
    assert_eq!(
        values,
        numbers(&[1.0, -2147483648.0, 4294967295.0, 15.0, -1.0, -1.0])
    );
}

#[test]
fn siblings_resolve_by_name_and_through_self() {
    let values = resolve(
        "enum Flags {
          A = 1,
          B = A << 1,
          C = Flags.A | Flags.B,
          D = Flags['C'] + 1,
          E = Flags[`D`] * 2,
        }",
    );
    assert_eq!(values, numbers(&[1.0, 2.0, 3.0, 4.0, 8.0]));
}

#[test]
fn forward_and_external_references_are_unresolvable() {
    let values = resolve("enum E { A = B, B = 1, C = Other.X, D = Math.PI }");
    assert_eq!(
        values,
        vec![
            ResolvedValue::Unresolvable,
            ResolvedValue::Number(1.0),
            ResolvedValue::Unresolvable,
            ResolvedValue::Unresolvable,
        ]
    );
}

#[test]
fn members_of_other_enums_resolve_through_the_outer_table() {
    let values = resolve_with(
        "enum E { A = Other.X + 2, B, C = Other['Name'] + '!', D = Other.Missing }",
        Some(&OtherEnum),
    );
    assert_eq!(
        values,
        vec![
            ResolvedValue::Number(42.0),
            ResolvedValue::Number(43.0),
            ResolvedValue::String("other!".to_string()),
            ResolvedValue::Unresolvable,
        ]
    );
}

#[test]
fn own_members_shadow_the_outer_table() {
    let values = resolve_with("enum Other { X = 1, Y = Other.X }", Some(&OtherEnum));
    assert_eq!(values, numbers(&[1.0, 1.0]));
}

#[test]
fn strings_concatenate_with_numbers_and_templates() {
    let values = resolve(
        "enum S {
          A = 'abc' + \"def\",
          B = 'n' + 1.5,
          C = 2 + 'x',
          D = `${A}-${B}`,
          E = `plain`,
          F = 'tab\\there',
        }",
    );
    let strings: Vec<ResolvedValue> = ["abcdef", "n1.5", "2x", "abcdef-n1.5", "plain", "tab\there"]
        .iter()
        .map(|s| ResolvedValue::String(s.to_string()))
        .collect();
    assert_eq!(values, strings);
}

#[test]
fn unsupported_operators_and_values_are_unresolvable() {
    let values = resolve(
        "enum E {
          A = !0,
          B = 1 < 2 ? 1 : 2,
          C = 1 && 2,
          D = 10n,
          E = 1 / 0,
          F = 0 / 0,
          G = 'a' - 1,
          H = -'a',
          I = f(),
        }",
    );
    assert!(values.iter().all(|value| *value == ResolvedValue::Unresolvable), "{values:?}");
}

#[test]
fn computed_and_numeric_member_names_are_unresolvable() {
    let values = resolve("enum E { ['a'] = 1, 1 = 2, 'ok' = 3 }");
    assert_eq!(
        values,
        vec![
            ResolvedValue::Unresolvable,
            ResolvedValue::Unresolvable,
            ResolvedValue::Number(3.0),
        ]
    );
}

#[test]
fn int32_conversions_wrap_and_truncate() {
    assert_eq!(to_int32(4294967295.0), -1);
    assert_eq!(to_int32(2147483648.0), -2147483648);
    assert_eq!(to_int32(-1.9), -1);
    assert_eq!(to_int32(f64::NAN), 0);
    assert_eq!(to_uint32(-1.0), 4294967295);
    assert_eq!(to_uint32(4294967296.0 + 5.0), 5);
}
