//! Decides which enum declarations can be converted.
//!
//! A declaration is eligible when every member resolves to a number or a
//! string (possibly through a member of an enum declared before it), it is not ambient, and it does not merge with another enum or
//! namespace of the same name. Results are computed once per file and shared
//! by the type reference rewrite and the scope walk.

use eject_enum_parser::{DeclarationKind, EnumData, NodeArena, NodeIndex};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::binder::FileBinder;
use crate::evaluator::{EnumEvaluator, EnumValue, OuterEnumValues, ResolvedValue};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    UnresolvableMember,
    AmbientDeclaration,
    MergedDeclaration,
}

impl SkipReason {
    pub fn describe(self) -> &'static str {
        match self {
            SkipReason::UnresolvableMember => {
                "it has a member whose value can't be known at compile-time"
            }
            SkipReason::AmbientDeclaration => "it is an ambient declaration",
            SkipReason::MergedDeclaration => "it merges with another declaration of the same name",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Convertibility {
    /// Member values in declaration order.
    Eligible(Vec<EnumValue>),
    Ineligible(SkipReason),
}

impl Convertibility {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Convertibility::Eligible(_))
    }
}

/// The log line for a skipped declaration.
pub fn skip_message(file: &str, enum_name: &str, reason: SkipReason) -> String {
    format!("{file} > {enum_name}: {}. skipped.", reason.describe())
}

/// Member values of the enums analyzed so far, seen from one scope.
struct EarlierEnums<'a> {
    binder: &'a FileBinder,
    scope: NodeIndex,
    members: &'a FxHashMap<NodeIndex, IndexMap<String, EnumValue>>,
}

impl OuterEnumValues for EarlierEnums<'_> {
    fn member_value(&self, qualifier: &str, member: &str) -> Option<EnumValue> {
        self.binder
            .resolve_value(self.scope, qualifier)
            .iter()
            .filter(|symbol| symbol.kind == DeclarationKind::Enum)
            .find_map(|symbol| self.members.get(&symbol.node)?.get(member).cloned())
    }
}

/// Analyze one declaration.
///
/// Also returns the values of every member that resolved, eligible or not,
/// so later enums can refer to them.
pub fn analyze_enum(
    arena: &NodeArena,
    binder: &FileBinder,
    decl: &EnumData,
    outer: &dyn OuterEnumValues,
) -> (Convertibility, IndexMap<String, EnumValue>) {
    let mut evaluator = EnumEvaluator::new(arena, &decl.name).with_outer(outer);
    let mut values = Vec::with_capacity(decl.members.len());
    let mut all_resolved = true;
    let mut previous: Option<ResolvedValue> = None;
    for &member_index in &decl.members {
        let Some(member) = arena.get_enum_member(member_index) else {
            all_resolved = false;
            previous = Some(ResolvedValue::Unresolvable);
            continue;
        };
        let resolved = evaluator.resolve_member(member, previous.as_ref());
        match resolved.clone().into_enum_value() {
            Some(value) => values.push(value),
            None if all_resolved => {
                debug!(
                    enum_name = %decl.name,
                    member = %member.name_text,
                    "member value is not a compile-time constant"
                );
                all_resolved = false;
            }
            None => {}
        }
        previous = Some(resolved);
    }

    let convertibility = if decl.is_ambient() {
        Convertibility::Ineligible(SkipReason::AmbientDeclaration)
    } else if binder.is_merged(decl.scope, &decl.name) {
        Convertibility::Ineligible(SkipReason::MergedDeclaration)
    } else if !all_resolved {
        Convertibility::Ineligible(SkipReason::UnresolvableMember)
    } else {
        Convertibility::Eligible(values)
    };
    (convertibility, evaluator.into_resolved())
}

/// Analysis results for every enum of a file.
#[derive(Debug, Default)]
pub struct ConvertibilityCache {
    results: FxHashMap<NodeIndex, Convertibility>,
}

impl ConvertibilityCache {
    /// Analyze `enums` in source order; each may refer to members of the
    /// ones before it.
    pub fn analyze(arena: &NodeArena, binder: &FileBinder, enums: &[NodeIndex]) -> Self {
        let mut results = FxHashMap::default();
        let mut members = FxHashMap::default();
        for &index in enums {
            let Some(decl) = arena.get_enum(index) else {
                continue;
            };
            let earlier = EarlierEnums {
                binder,
                scope: decl.scope,
                members: &members,
            };
            let (result, resolved) = analyze_enum(arena, binder, decl, &earlier);
            debug!(
                enum_name = %decl.name,
                eligible = result.is_eligible(),
                "analyzed enum declaration"
            );
            members.insert(index, resolved);
            results.insert(index, result);
        }
        ConvertibilityCache { results }
    }

    pub fn get(&self, enum_index: NodeIndex) -> Option<&Convertibility> {
        self.results.get(&enum_index)
    }
}
