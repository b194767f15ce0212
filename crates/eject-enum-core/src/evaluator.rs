//! Enum member value resolution.
//!
//! Members are resolved in declaration order. Each one sees the values of the
//! members before it, so `B = A << 1` works but forward references do not.
//! Constant expressions follow JavaScript semantics: bitwise operators work
//! on 32-bit integers and `+` concatenates when either side is a string.
//! `Other.Member` reads the value of a member of another enum, through
//! [`OuterEnumValues`].

use eject_enum_parser::{EnumMemberData, MemberName, Node, NodeArena, NodeIndex};
use eject_enum_scanner::SyntaxKind;
use indexmap::IndexMap;

use crate::number_text::number_to_string;

/// The value of a member that resolved.
#[derive(Clone, Debug, PartialEq)]
pub enum EnumValue {
    Number(f64),
    String(String),
}

/// Outcome of resolving one member or sub-expression.
#[derive(Clone, Debug, PartialEq)]
pub enum ResolvedValue {
    Number(f64),
    String(String),
    Unresolvable,
}

impl ResolvedValue {
    pub fn is_resolved(&self) -> bool {
        !matches!(self, ResolvedValue::Unresolvable)
    }

    pub fn into_enum_value(self) -> Option<EnumValue> {
        match self {
            ResolvedValue::Number(value) => Some(EnumValue::Number(value)),
            ResolvedValue::String(value) => Some(EnumValue::String(value)),
            ResolvedValue::Unresolvable => None,
        }
    }
}

impl From<EnumValue> for ResolvedValue {
    fn from(value: EnumValue) -> Self {
        match value {
            EnumValue::Number(value) => ResolvedValue::Number(value),
            EnumValue::String(value) => ResolvedValue::String(value),
        }
    }
}

/// Values of members of enums other than the one being resolved.
pub trait OuterEnumValues {
    /// The value of `qualifier.member`, when `qualifier` names an enum whose
    /// member is already known.
    fn member_value(&self, qualifier: &str, member: &str) -> Option<EnumValue>;
}

pub struct EnumEvaluator<'a> {
    arena: &'a NodeArena,
    enum_name: &'a str,
    resolved: IndexMap<String, EnumValue>,
    outer: Option<&'a dyn OuterEnumValues>,
}

impl<'a> EnumEvaluator<'a> {
    pub fn new(arena: &'a NodeArena, enum_name: &'a str) -> EnumEvaluator<'a> {
        EnumEvaluator {
            arena,
            enum_name,
            resolved: IndexMap::new(),
            outer: None,
        }
    }

    pub fn with_outer(mut self, outer: &'a dyn OuterEnumValues) -> EnumEvaluator<'a> {
        self.outer = Some(outer);
        self
    }

    /// Values of every member that resolved, by name.
    pub fn into_resolved(self) -> IndexMap<String, EnumValue> {
        self.resolved
    }

    /// Resolve the next member. `previous` is the outcome for the member
    /// declared just before it, if any.
    pub fn resolve_member(
        &mut self,
        member: &EnumMemberData,
        previous: Option<&ResolvedValue>,
    ) -> ResolvedValue {
        let key = match &member.name {
            MemberName::Identifier(name) | MemberName::String(name) => name.clone(),
            MemberName::Numeric(_) | MemberName::Computed => return ResolvedValue::Unresolvable,
        };

        let value = if member.initializer.is_some() {
            self.evaluate(member.initializer)
        } else {
            match previous {
                None => ResolvedValue::Number(0.0),
                Some(ResolvedValue::Number(value)) => ResolvedValue::Number(value + 1.0),
                Some(_) => ResolvedValue::Unresolvable,
            }
        };
        let value = match value {
            ResolvedValue::Number(number) if !number.is_finite() => ResolvedValue::Unresolvable,
            other => other,
        };

        if let Some(resolved) = value.clone().into_enum_value() {
            self.resolved.insert(key, resolved);
        }
        value
    }

    /// Evaluate a constant expression against the members resolved so far.
    pub fn evaluate(&self, expression: NodeIndex) -> ResolvedValue {
        let Some(node) = self.arena.get(expression) else {
            return ResolvedValue::Unresolvable;
        };
        match node {
            Node::NumericLiteral(literal) => match literal.value {
                Some(value) => ResolvedValue::Number(value),
                None => ResolvedValue::Unresolvable,
            },
            Node::StringLiteral(literal) | Node::NoSubstitutionTemplateLiteral(literal) => {
                ResolvedValue::String(literal.text.clone())
            }
            Node::TemplateExpression(template) => {
                let mut text = template.head.clone();
                for span in &template.spans {
                    match self.evaluate(span.expression) {
                        ResolvedValue::String(value) => text.push_str(&value),
                        ResolvedValue::Number(value) => text.push_str(&number_to_string(value)),
                        ResolvedValue::Unresolvable => return ResolvedValue::Unresolvable,
                    }
                    text.push_str(&span.literal);
                }
                ResolvedValue::String(text)
            }
            Node::Identifier(identifier) => self.sibling(&identifier.escaped_text),
            Node::PropertyAccessExpression(access) => {
                self.qualified_member(access.expression, &access.name)
            }
            Node::ElementAccessExpression(access) => match self.arena.get(access.argument) {
                Some(Node::StringLiteral(key) | Node::NoSubstitutionTemplateLiteral(key)) => {
                    self.qualified_member(access.expression, &key.text)
                }
                _ => ResolvedValue::Unresolvable,
            },
            Node::ParenthesizedExpression(paren) => self.evaluate(paren.expression),
            Node::PrefixUnaryExpression(unary) => {
                let ResolvedValue::Number(operand) = self.evaluate(unary.operand) else {
                    return ResolvedValue::Unresolvable;
                };
                match unary.operator {
                    SyntaxKind::PlusToken => ResolvedValue::Number(operand),
                    SyntaxKind::MinusToken => ResolvedValue::Number(-operand),
                    SyntaxKind::TildeToken => ResolvedValue::Number(f64::from(!to_int32(operand))),
                    _ => ResolvedValue::Unresolvable,
                }
            }
            Node::BinaryExpression(binary) => {
                let left = self.evaluate(binary.left);
                if !left.is_resolved() {
                    return left;
                }
                let right = self.evaluate(binary.right);
                evaluate_binary(binary.operator, left, right)
            }
            _ => ResolvedValue::Unresolvable,
        }
    }

    fn sibling(&self, name: &str) -> ResolvedValue {
        self.resolved
            .get(name)
            .cloned()
            .map_or(ResolvedValue::Unresolvable, ResolvedValue::from)
    }

    /// `Q.M` or `Q["M"]`. `Q` is this enum first, then any other enum.
    fn qualified_member(&self, qualifier: NodeIndex, member: &str) -> ResolvedValue {
        let Some(Node::Identifier(identifier)) = self.arena.get(qualifier) else {
            return ResolvedValue::Unresolvable;
        };
        let qualifier = identifier.escaped_text.as_str();
        if qualifier == self.enum_name
            && let Some(value) = self.resolved.get(member)
        {
            return value.clone().into();
        }
        self.outer
            .and_then(|outer| outer.member_value(qualifier, member))
            .map_or(ResolvedValue::Unresolvable, ResolvedValue::from)
    }
}

fn evaluate_binary(operator: SyntaxKind, left: ResolvedValue, right: ResolvedValue) -> ResolvedValue {
    match (left, right) {
        (ResolvedValue::Number(a), ResolvedValue::Number(b)) => evaluate_numeric(operator, a, b),
        (left, right) if operator == SyntaxKind::PlusToken => match (left, right) {
            (ResolvedValue::String(a), ResolvedValue::String(b)) => ResolvedValue::String(a + &b),
            (ResolvedValue::String(a), ResolvedValue::Number(b)) => {
                ResolvedValue::String(a + &number_to_string(b))
            }
            (ResolvedValue::Number(a), ResolvedValue::String(b)) => {
                ResolvedValue::String(number_to_string(a) + &b)
            }
            _ => ResolvedValue::Unresolvable,
        },
        _ => ResolvedValue::Unresolvable,
    }
}

fn evaluate_numeric(operator: SyntaxKind, a: f64, b: f64) -> ResolvedValue {
    let value = match operator {
        SyntaxKind::PlusToken => a + b,
        SyntaxKind::MinusToken => a - b,
        SyntaxKind::AsteriskToken => a * b,
        SyntaxKind::SlashToken => a / b,
        SyntaxKind::PercentToken => a % b,
        SyntaxKind::AsteriskAsteriskToken => exponentiate(a, b),
        SyntaxKind::BarToken => f64::from(to_int32(a) | to_int32(b)),
        SyntaxKind::AmpersandToken => f64::from(to_int32(a) & to_int32(b)),
        SyntaxKind::CaretToken => f64::from(to_int32(a) ^ to_int32(b)),
        SyntaxKind::LessThanLessThanToken => f64::from(to_int32(a).wrapping_shl(shift_count(b))),
        SyntaxKind::GreaterThanGreaterThanToken => {
            f64::from(to_int32(a).wrapping_shr(shift_count(b)))
        }
        SyntaxKind::GreaterThanGreaterThanGreaterThanToken => {
            f64::from(to_uint32(a).wrapping_shr(shift_count(b)))
        }
        _ => return ResolvedValue::Unresolvable,
    };
    ResolvedValue::Number(value)
}

/// `Math.pow` as JavaScript defines it where it differs from `powf`.
fn exponentiate(base: f64, exponent: f64) -> f64 {
    if exponent.is_nan() || (base.abs() == 1.0 && exponent.is_infinite()) {
        return f64::NAN;
    }
    base.powf(exponent)
}

fn shift_count(value: f64) -> u32 {
    to_uint32(value) & 31
}

/// ECMAScript ToUint32.
pub(crate) fn to_uint32(value: f64) -> u32 {
    if !value.is_finite() {
        return 0;
    }
    value.trunc().rem_euclid(4_294_967_296.0) as u32
}

/// ECMAScript ToInt32.
pub(crate) fn to_int32(value: f64) -> i32 {
    to_uint32(value) as i32
}
