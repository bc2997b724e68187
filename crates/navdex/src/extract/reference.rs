//! Find-references entries collected from method declarations.

use tracing::trace;

use super::{Extractor, identifier, identifier_text, resolve_named};
use crate::context::IndexContext;
use crate::dispatch::route;
use crate::error::Result;
use crate::tree::{Node, NodeKind};
use crate::types::IndexRecord;
use crate::walk::VisitSignal;

/// Records the references found inside a method declaration.
///
/// Emits the method's own name as a declaration reference, then one
/// reference per resolved identifier in the signature and body. Segments of
/// a qualified name are not reported separately; the qualified name is.
/// Invocations and qualified names whose owner type is unknown are skipped
/// together with everything under them.
#[derive(Debug, Default)]
pub struct ReferenceExtractor;

impl ReferenceExtractor {
    fn emit_reference(
        ctx: &mut IndexContext<'_>,
        owner: Node<'_>,
        ident: Node<'_>,
    ) -> Result<()> {
        let Some((symbol, binding)) = resolve_named(ctx, owner, ident) else {
            trace!(node = %ident.id(), kind = %owner.kind(), "Unresolved identifier, no reference");
            return Ok(());
        };

        let range = ident.span();
        let target = binding.declaration();
        ctx.emit(IndexRecord::Reference {
            range,
            target,
            symbol,
            name: identifier_text(ident)?.to_string(),
            is_declaration: target == Some(range),
        })?;
        Ok(())
    }
}

impl Extractor for ReferenceExtractor {
    fn extract(&mut self, node: Node<'_>, ctx: &mut IndexContext<'_>) -> Result<()> {
        let declared = identifier(node)?;
        Self::emit_reference(ctx, node, declared)?;

        let mut pending: Vec<Node<'_>> = node.children().collect();
        pending.reverse();
        while let Some(inner) = pending.pop() {
            if is_pruned_site(inner, ctx) {
                continue;
            }
            pending.extend(inner.children().collect::<Vec<_>>().into_iter().rev());

            if inner.id() == declared.id() || !inner.kind().is_name() {
                continue;
            }
            if inner.parent_kind() == Some(NodeKind::QualifiedName) {
                continue;
            }
            Self::emit_reference(ctx, inner, inner)?;
        }
        Ok(())
    }
}

/// Invocations and qualified names the dispatcher would not descend into.
/// Nothing inside them is reported.
fn is_pruned_site(node: Node<'_>, ctx: &IndexContext<'_>) -> bool {
    let gated = matches!(node.kind(), NodeKind::MethodInvocation | NodeKind::QualifiedName);
    if gated && route(node, ctx.bindings()).signal == VisitSignal::Prune {
        trace!(node = %node.id(), kind = %node.kind(), "Skipping references under pruned node");
        return true;
    }
    false
}
