//! Depth-first walk over the statement-holding scopes of a file.
//!
//! Each scope converts the enums it owns directly, in order, before the walk
//! descends into its child scopes in source order.

use eject_enum_parser::{Node, NodeArena, NodeIndex};
use tracing::{debug, trace};

use crate::convertibility::{Convertibility, ConvertibilityCache, skip_message};
use crate::driver::EjectionContext;
use crate::error::EjectError;
use crate::logger::ProgressLogger;
use crate::synthesizer::{ConvertedPair, synthesize_pair};

pub struct ScopeWalker<'a> {
    text: &'a str,
    analysis: &'a ConvertibilityCache,
}

impl<'a> ScopeWalker<'a> {
    pub fn new(text: &'a str, analysis: &'a ConvertibilityCache) -> ScopeWalker<'a> {
        ScopeWalker { text, analysis }
    }

    pub fn walk(
        &self,
        arena: &mut NodeArena,
        root_scope: NodeIndex,
        ctx: &mut EjectionContext<'_>,
        logger: &mut dyn ProgressLogger,
    ) -> Result<(), EjectError> {
        let mut pending = vec![root_scope];
        while let Some(scope) = pending.pop() {
            let Some(data) = arena.get_scope(scope) else {
                continue;
            };
            trace!(kind = ?data.kind, statements = data.statements.len(), "visiting scope");

            let owned_enums: Vec<NodeIndex> = data
                .statements
                .iter()
                .copied()
                .filter(|&statement| arena.get_enum(statement).is_some())
                .collect();
            for enum_index in owned_enums {
                self.visit_enum(arena, scope, enum_index, ctx, logger)?;
            }

            let children: Vec<NodeIndex> = arena
                .get_scope(scope)
                .map(|data| {
                    data.statements
                        .iter()
                        .flat_map(|&statement| arena.child_scopes(statement))
                        .collect()
                })
                .unwrap_or_default();
            pending.extend(children.into_iter().rev());
        }
        Ok(())
    }

    fn visit_enum(
        &self,
        arena: &mut NodeArena,
        scope: NodeIndex,
        enum_index: NodeIndex,
        ctx: &mut EjectionContext<'_>,
        logger: &mut dyn ProgressLogger,
    ) -> Result<(), EjectError> {
        let Some(decl) = arena.get_enum(enum_index) else {
            return Ok(());
        };
        let values = match self.analysis.get(enum_index) {
            Some(Convertibility::Eligible(values)) => values,
            Some(Convertibility::Ineligible(reason)) => {
                debug!(enum_name = %decl.name, reason = ?reason, "skipping enum");
                ctx.skipped += 1;
                logger.log(&skip_message(ctx.file_name, &decl.name, *reason));
                return Ok(());
            }
            None => return Ok(()),
        };

        let ConvertedPair { constant, alias } =
            synthesize_pair(arena, self.text, ctx.file_name, decl, values, ctx.style())?;
        debug!(enum_name = %decl.name, members = values.len(), "ejecting enum");

        // Earlier conversions in this scope shift positions, so look it up now.
        let Some(position) = arena
            .get_scope(scope)
            .and_then(|data| data.statements.iter().position(|&s| s == enum_index))
        else {
            return Ok(());
        };
        let constant = arena.add(Node::Synthesized(constant));
        let alias = arena.add(Node::Synthesized(alias));
        if arena.splice_statements(scope, position, 1, &[constant, alias]) {
            ctx.ejected += 1;
        }
        Ok(())
    }
}
