//! Fact extractors.
//!
//! Each extractor turns one node (plus the shared [`IndexContext`]) into zero
//! or more records of a single fact kind. The dispatcher decides which
//! extractor sees which node; extractors only decide what to write.
//!
//! An extractor that cannot resolve the binding it needs writes nothing and
//! returns `Ok(())`. Errors are reserved for malformed trees (a declaration
//! without its identifier) and sink failures.
//!
//! ## Adding an Extractor
//!
//! 1. Add a variant to `FactKind` in `types.rs`
//! 2. Implement [`Extractor`] in a new module here
//! 3. Add a slot to `Extractors` in `dispatch.rs` and route nodes to it

mod definition;
mod hover;
mod implementation;
mod reference;

pub use definition::DefinitionExtractor;
pub use hover::HoverExtractor;
pub use implementation::ImplementationExtractor;
pub use reference::ReferenceExtractor;

use crate::binding::Binding;
use crate::context::IndexContext;
use crate::error::{Error, Result};
use crate::tree::{Node, NodeKind};
use crate::types::SymbolId;

/// Produces records of one fact kind from a node.
pub trait Extractor {
    /// Inspect `node` and emit records into `ctx`.
    ///
    /// The context must not be retained beyond the call.
    ///
    /// # Errors
    ///
    /// Malformed input or sink failure. Unresolved bindings are not errors.
    fn extract(&mut self, node: Node<'_>, ctx: &mut IndexContext<'_>) -> Result<()>;
}

/// The identifier node that names `node`.
///
/// Names are their own identifier. Declarations and type references are
/// named by their first `SimpleName` (or `QualifiedName`) child; without
/// one, a node carrying identifier text names itself.
pub(crate) fn identifier<'t>(node: Node<'t>) -> Result<Node<'t>> {
    if node.kind().is_name() {
        return Ok(node);
    }
    if let Some(child) = node.children().find(|c| c.kind().is_name()) {
        return Ok(child);
    }
    if node.name().is_some() {
        return Ok(node);
    }
    Err(Error::MissingName {
        node: node.id(),
        kind: node.kind(),
    })
}

/// Identifier text of `ident`.
pub(crate) fn identifier_text<'t>(ident: Node<'t>) -> Result<&'t str> {
    ident.name().ok_or(Error::MissingName {
        node: ident.id(),
        kind: ident.kind(),
    })
}

/// Resolve the binding for a node and its identifier.
///
/// The identifier's own binding wins; the node's binding is the fallback
/// for frontends that attach bindings to declarations instead of names.
pub(crate) fn resolve_named<'a>(
    ctx: &IndexContext<'a>,
    node: Node<'_>,
    ident: Node<'_>,
) -> Option<(SymbolId, &'a Binding)> {
    ctx.resolve(ident.id()).or_else(|| ctx.resolve(node.id()))
}

/// Whether `node` is the identifier of a type declaration.
pub(crate) fn names_type_decl(node: Node<'_>) -> bool {
    node.parent_kind() == Some(NodeKind::TypeDecl)
}

/// Qualified name of a type symbol, if `id` denotes a type.
pub(crate) fn type_name<'a>(ctx: &IndexContext<'a>, id: SymbolId) -> Option<&'a str> {
    ctx.symbol(id)
        .and_then(Binding::as_type)
        .map(|t| t.qualified_name.as_str())
}
