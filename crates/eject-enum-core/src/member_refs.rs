//! Rewrites `E.M` property types to `typeof E.M`.
//!
//! A type annotation naming one enum member denotes that member's literal
//! type. Once the enum becomes a `const` object the same type is spelled
//! `typeof E.M`, so every such site whose enum gets converted is rewritten
//! before any declaration is removed.

use eject_enum_parser::{Node, NodeArena, NodeIndex, SynthesizedData, TextSpan};
use tracing::debug;

use crate::binder::FileBinder;
use crate::convertibility::ConvertibilityCache;

/// Answers which enum member, if any, a type site denotes.
pub trait MemberLiteralTypes {
    /// The enum declaration and member name `site` refers to, when the
    /// site's type is a member literal type of a convertible enum.
    fn member_literal_type(&self, site: NodeIndex) -> Option<(NodeIndex, String)>;
}

/// Lexical resolution of type sites against the enums of one file.
pub struct EnumMemberTypes<'a> {
    arena: &'a NodeArena,
    binder: &'a FileBinder,
    analysis: &'a ConvertibilityCache,
}

impl<'a> EnumMemberTypes<'a> {
    pub fn new(
        arena: &'a NodeArena,
        binder: &'a FileBinder,
        analysis: &'a ConvertibilityCache,
    ) -> EnumMemberTypes<'a> {
        EnumMemberTypes {
            arena,
            binder,
            analysis,
        }
    }
}

impl MemberLiteralTypes for EnumMemberTypes<'_> {
    fn member_literal_type(&self, site: NodeIndex) -> Option<(NodeIndex, String)> {
        let data = self.arena.get_type_site(site)?;
        let enum_index = self.binder.resolve_enum(data.scope, &data.qualifier)?;
        if !self.analysis.get(enum_index)?.is_eligible() {
            return None;
        }
        let decl = self.arena.get_enum(enum_index)?;
        let declares_member = decl
            .members
            .iter()
            .filter_map(|&member| self.arena.get_enum_member(member))
            .any(|member| member.name.key() == Some(data.member.as_str()));
        declares_member.then(|| (enum_index, data.member.clone()))
    }
}

/// Replacements for every site in `sites` that `types` resolves.
pub fn plan_member_type_rewrites(
    arena: &NodeArena,
    text: &str,
    sites: &[NodeIndex],
    types: &dyn MemberLiteralTypes,
) -> Vec<(NodeIndex, SynthesizedData)> {
    sites
        .iter()
        .filter_map(|&site| {
            let (_, member) = types.member_literal_type(site)?;
            let data = arena.get_type_site(site)?;
            let written = text.get(data.pos as usize..data.end as usize)?;
            debug!(qualifier = %data.qualifier, member = %member, "rewriting member literal type");
            Some((
                site,
                SynthesizedData {
                    pos: data.pos,
                    end: data.end,
                    detached: TextSpan::empty_at(data.pos),
                    carried: TextSpan::empty_at(data.pos),
                    leading: String::new(),
                    text: format!("typeof {written}"),
                },
            ))
        })
        .collect()
}

/// Rewrite the member literal types among `sites`, resolving qualifiers
/// lexically. Returns the number of sites rewritten.
pub fn rewrite_enum_member_types(
    arena: &mut NodeArena,
    text: &str,
    sites: &[NodeIndex],
    binder: &FileBinder,
    analysis: &ConvertibilityCache,
) -> usize {
    let rewrites = {
        let types = EnumMemberTypes::new(arena, binder, analysis);
        plan_member_type_rewrites(arena, text, sites, &types)
    };
    let count = rewrites.len();
    for (site, replacement) in rewrites {
        arena.replace(site, Node::Synthesized(replacement));
    }
    count
}
