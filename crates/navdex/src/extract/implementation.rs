//! Type-to-supertype implementation edges.

use tracing::debug;

use super::{Extractor, identifier, names_type_decl, resolve_named, type_name};
use crate::context::IndexContext;
use crate::error::Result;
use crate::tree::Node;
use crate::types::IndexRecord;

/// Emits one implementation edge per direct supertype of a declared type.
///
/// Only the declaring identifier of a type carries these edges, so the
/// extractor ignores names that do not sit directly under a type
/// declaration, and supertypes the symbol table does not know as types.
#[derive(Debug, Default)]
pub struct ImplementationExtractor;

impl Extractor for ImplementationExtractor {
    fn extract(&mut self, node: Node<'_>, ctx: &mut IndexContext<'_>) -> Result<()> {
        let ident = identifier(node)?;
        if !names_type_decl(ident) {
            return Ok(());
        }
        let Some(declared) = resolve_named(ctx, node, ident).and_then(|(_, b)| b.as_type()) else {
            debug!(node = %node.id(), "No type binding, skipping implementations");
            return Ok(());
        };

        for supertype in declared.supertypes() {
            let Some(implemented) = type_name(ctx, supertype) else {
                debug!(symbol = %supertype, "Supertype is not a known type");
                continue;
            };
            let target = ctx.symbol(supertype).and_then(|b| b.declaration());
            ctx.emit(IndexRecord::Implementation {
                range: ident.span(),
                implementor: declared.qualified_name.clone(),
                implemented: implemented.to_string(),
                target,
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::test_support::{fixture, span};

    #[test]
    fn one_edge_per_supertype() {
        let (tree, table, ids) = fixture();
        let mut records = Vec::new();
        let mut ctx = IndexContext::new("Foo.java", &table, &mut records);

        ImplementationExtractor
            .extract(tree.node(ids.class_name).unwrap(), &mut ctx)
            .unwrap();
        ctx.finish().unwrap();

        assert_eq!(
            records,
            vec![
                IndexRecord::Implementation {
                    range: span(1, 7, 10),
                    implementor: "demo.Foo".to_string(),
                    implemented: "demo.Base".to_string(),
                    target: Some(span(9, 14, 18)),
                },
                IndexRecord::Implementation {
                    range: span(1, 7, 10),
                    implementor: "demo.Foo".to_string(),
                    implemented: "java.lang.Runnable".to_string(),
                    target: None,
                },
            ]
        );
    }

    #[test]
    fn names_outside_type_declarations_are_ignored() {
        let (tree, table, ids) = fixture();
        let mut ctx = IndexContext::new("Foo.java", &table, Vec::<IndexRecord>::new());

        ImplementationExtractor
            .extract(tree.node(ids.call_name).unwrap(), &mut ctx)
            .unwrap();
        ImplementationExtractor
            .extract(tree.node(ids.arg).unwrap(), &mut ctx)
            .unwrap();

        assert_eq!(ctx.counts().total(), 0);
    }
}
