//! Go-to-definition links.

use tracing::debug;

use super::{Extractor, identifier, identifier_text, resolve_named};
use crate::context::IndexContext;
use crate::error::Result;
use crate::tree::Node;
use crate::types::IndexRecord;

/// Links an identifier to the declaration of the symbol it denotes.
///
/// When the binding has no declaration in indexed source, the identifier
/// itself is used as the target, which is right for declarations and keeps
/// the link usable for external symbols.
#[derive(Debug, Default)]
pub struct DefinitionExtractor;

impl Extractor for DefinitionExtractor {
    fn extract(&mut self, node: Node<'_>, ctx: &mut IndexContext<'_>) -> Result<()> {
        let ident = identifier(node)?;
        let Some((symbol, binding)) = resolve_named(ctx, node, ident) else {
            debug!(node = %node.id(), kind = %node.kind(), "No binding, skipping definition");
            return Ok(());
        };

        let range = ident.span();
        ctx.emit(IndexRecord::Definition {
            range,
            target: binding.declaration().unwrap_or(range),
            symbol,
            name: identifier_text(ident)?.to_string(),
        })?;
        Ok(())
    }
}
