//! Hover text.

use tracing::debug;

use super::{Extractor, identifier, resolve_named, type_name};
use crate::binding::{Binding, TypeBinding, TypeKind};
use crate::config::HoverConfig;
use crate::context::IndexContext;
use crate::error::Result;
use crate::tree::Node;
use crate::types::IndexRecord;

/// Renders a one-line description of the symbol under an identifier.
///
/// - types: `class demo.Foo extends demo.Base implements java.lang.Runnable`
/// - methods: the signature as given by the binding
/// - variables: `int n`
#[derive(Debug, Default)]
pub struct HoverExtractor {
    config: HoverConfig,
}

impl HoverExtractor {
    /// Create a hover extractor with the given rendering options.
    #[must_use]
    pub fn new(config: HoverConfig) -> Self {
        Self { config }
    }

    fn render(&self, binding: &Binding, ctx: &IndexContext<'_>) -> String {
        match binding {
            Binding::Type(t) => self.render_type(t, ctx),
            Binding::Method(m) => m.signature.clone(),
            Binding::Variable(v) => format!("{} {}", v.type_name, v.name),
        }
    }

    fn render_type(&self, binding: &TypeBinding, ctx: &IndexContext<'_>) -> String {
        let mut text = format!("{} {}", binding.kind.keyword(), binding.qualified_name);
        if !self.config.show_supertypes {
            return text;
        }

        let interfaces: Vec<&str> = binding
            .interfaces
            .iter()
            .filter_map(|&id| type_name(ctx, id))
            .collect();

        if let Some(superclass) = binding.superclass.and_then(|id| type_name(ctx, id)) {
            text.push_str(" extends ");
            text.push_str(superclass);
        }
        if !interfaces.is_empty() {
            // Interfaces extend other interfaces; classes, enums and records implement them.
            let keyword = if binding.kind == TypeKind::Interface {
                " extends "
            } else {
                " implements "
            };
            text.push_str(keyword);
            text.push_str(&interfaces.join(", "));
        }
        text
    }
}

impl Extractor for HoverExtractor {
    fn extract(&mut self, node: Node<'_>, ctx: &mut IndexContext<'_>) -> Result<()> {
        let ident = identifier(node)?;
        let Some((symbol, binding)) = resolve_named(ctx, node, ident) else {
            debug!(node = %node.id(), kind = %node.kind(), "No binding, skipping hover");
            return Ok(());
        };

        let contents = self.render(binding, ctx);
        ctx.emit(IndexRecord::Hover {
            range: ident.span(),
            symbol,
            contents,
        })?;
        Ok(())
    }
}
