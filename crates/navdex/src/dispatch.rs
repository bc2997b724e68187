//! Per-node routing of syntax nodes to fact extractors.
//!
//! The [`Dispatcher`] is the [`Visitor`] the walk calls for every node. For
//! each node it decides:
//!
//! - which extractors run (zero, one, or two of them)
//! - whether the walk descends into the node's children
//!
//! ## Routing Table
//!
//! | Node kind | Condition | Extractors | Signal |
//! |-----------|-----------|------------|--------|
//! | field declaration | | none | continue |
//! | simple variable declaration | | definition | prune |
//! | simple type | parent is a type declaration | definition, hover | prune |
//! | simple type | otherwise | none | continue |
//! | type declaration | | definition, hover | continue |
//! | method declaration | | reference | continue |
//! | method invocation | unresolved, or declaring type not a known type | none | prune |
//! | method invocation | otherwise | none | continue |
//! | qualified name | not a variable, or declaring type not a known type | none | prune |
//! | qualified name | otherwise | none | continue |
//! | simple name | parent is a type declaration | definition, implementation | prune |
//! | simple name | otherwise | none | continue |
//! | anything else | | none | continue |
//!
//! A decision depends only on the node's kind, its parent's kind and its
//! binding. [`route`] computes it without side effects; the dispatcher then
//! runs the chosen extractors. Unresolved bindings are branches of the table,
//! not errors.

use tracing::trace;

use crate::binding::{Binding, BindingResolver};
use crate::config::{FactToggles, IndexerConfig};
use crate::context::IndexContext;
use crate::error::Result;
use crate::extract::{
    DefinitionExtractor, Extractor, HoverExtractor, ImplementationExtractor, ReferenceExtractor,
};
use crate::tree::{Node, NodeKind};
use crate::types::{FactKind, SymbolId};
use crate::walk::{VisitSignal, Visitor};

/// Routing decision for one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    /// Extractors to run, in order
    pub facts: &'static [FactKind],
    /// Whether to descend into the node's children
    pub signal: VisitSignal,
}

impl Route {
    const PASS: Route = Route {
        facts: &[],
        signal: VisitSignal::Continue,
    };

    const PRUNE: Route = Route {
        facts: &[],
        signal: VisitSignal::Prune,
    };

    const fn extract(facts: &'static [FactKind], signal: VisitSignal) -> Route {
        Route { facts, signal }
    }
}

const DEFINITION: &[FactKind] = &[FactKind::Definition];
const DEFINITION_HOVER: &[FactKind] = &[FactKind::Definition, FactKind::Hover];
const DEFINITION_IMPLEMENTATION: &[FactKind] = &[FactKind::Definition, FactKind::Implementation];
const REFERENCE: &[FactKind] = &[FactKind::Reference];

/// Decide extractors and traversal for `node`.
///
/// Total over [`NodeKind`]: every kind is listed, so a new kind cannot be
/// added without choosing its route.
#[must_use]
pub fn route(node: Node<'_>, bindings: &dyn BindingResolver) -> Route {
    match node.kind() {
        NodeKind::FieldDecl => Route::PASS,
        NodeKind::SimpleVarDecl => Route::extract(DEFINITION, VisitSignal::Prune),
        NodeKind::SimpleType => {
            if parent_is_type_decl(node) {
                Route::extract(DEFINITION_HOVER, VisitSignal::Prune)
            } else {
                Route::PASS
            }
        }
        NodeKind::TypeDecl => Route::extract(DEFINITION_HOVER, VisitSignal::Continue),
        NodeKind::MethodDecl => Route::extract(REFERENCE, VisitSignal::Continue),
        NodeKind::MethodInvocation => invocation_route(node, bindings),
        NodeKind::QualifiedName => qualified_name_route(node, bindings),
        NodeKind::SimpleName => {
            if parent_is_type_decl(node) {
                Route::extract(DEFINITION_IMPLEMENTATION, VisitSignal::Prune)
            } else {
                Route::PASS
            }
        }
        NodeKind::CompilationUnit
        | NodeKind::PackageDecl
        | NodeKind::ImportDecl
        | NodeKind::VariableDeclFragment
        | NodeKind::VariableDeclStatement
        | NodeKind::Block
        | NodeKind::ExpressionStatement
        | NodeKind::ReturnStatement
        | NodeKind::FieldAccess
        | NodeKind::PrimitiveType
        | NodeKind::Literal => Route::PASS,
    }
}

fn parent_is_type_decl(node: Node<'_>) -> bool {
    node.parent_kind() == Some(NodeKind::TypeDecl)
}

fn invocation_route(node: Node<'_>, bindings: &dyn BindingResolver) -> Route {
    let Some(method) = bindings
        .resolve(node.id())
        .and_then(|(_, b)| b.as_method())
    else {
        trace!(node = %node.id(), "Unresolved method invocation, pruning");
        return Route::PRUNE;
    };
    if !names_known_type(bindings, method.declaring_type) {
        trace!(
            node = %node.id(),
            method = %method.name,
            "Invocation without declaring type, pruning"
        );
        return Route::PRUNE;
    }
    Route::PASS
}

fn qualified_name_route(node: Node<'_>, bindings: &dyn BindingResolver) -> Route {
    let Some(variable) = bindings
        .resolve(node.id())
        .and_then(|(_, b)| b.as_variable())
    else {
        trace!(node = %node.id(), "Qualified name is not a resolved variable, pruning");
        return Route::PRUNE;
    };
    if !names_known_type(bindings, variable.declaring_type) {
        trace!(
            node = %node.id(),
            variable = %variable.name,
            "Variable without declaring type, pruning"
        );
        return Route::PRUNE;
    }
    Route::PASS
}

/// A declaring type is determined only if it resolves to a type symbol.
fn names_known_type(bindings: &dyn BindingResolver, owner: Option<SymbolId>) -> bool {
    owner
        .and_then(|id| bindings.symbol(id))
        .and_then(Binding::as_type)
        .is_some()
}

/// The four extractor handles a dispatcher owns.
pub struct Extractors {
    /// Handles [`FactKind::Definition`]
    pub definition: Box<dyn Extractor>,
    /// Handles [`FactKind::Reference`]
    pub reference: Box<dyn Extractor>,
    /// Handles [`FactKind::Hover`]
    pub hover: Box<dyn Extractor>,
    /// Handles [`FactKind::Implementation`]
    pub implementation: Box<dyn Extractor>,
}

impl Extractors {
    /// The built-in extractors, configured from `config`.
    #[must_use]
    pub fn from_config(config: &IndexerConfig) -> Self {
        Self {
            definition: Box::new(DefinitionExtractor),
            reference: Box::new(ReferenceExtractor),
            hover: Box::new(HoverExtractor::new(config.hover)),
            implementation: Box::new(ImplementationExtractor),
        }
    }

    fn get_mut(&mut self, kind: FactKind) -> &mut dyn Extractor {
        match kind {
            FactKind::Definition => self.definition.as_mut(),
            FactKind::Reference => self.reference.as_mut(),
            FactKind::Hover => self.hover.as_mut(),
            FactKind::Implementation => self.implementation.as_mut(),
        }
    }
}

impl std::fmt::Debug for Extractors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Extractors").finish_non_exhaustive()
    }
}

/// Routes nodes to extractors during one file's walk.
///
/// Created per file with the file's [`IndexContext`], used for exactly one
/// walk, then dropped. Holds no state besides its extractors, so dropping it
/// mid-walk needs no cleanup.
#[derive(Debug)]
pub struct Dispatcher<'c, 'a> {
    context: &'c mut IndexContext<'a>,
    extractors: Extractors,
    enabled: FactToggles,
}

impl<'c, 'a> Dispatcher<'c, 'a> {
    /// Dispatcher with the built-in extractors.
    pub fn new(context: &'c mut IndexContext<'a>, config: &IndexerConfig) -> Self {
        Self::with_extractors(context, Extractors::from_config(config), config.facts)
    }

    /// Dispatcher with caller-supplied extractors.
    ///
    /// Extractors whose fact kind is disabled in `enabled` are never called.
    pub fn with_extractors(
        context: &'c mut IndexContext<'a>,
        extractors: Extractors,
        enabled: FactToggles,
    ) -> Self {
        Self {
            context,
            extractors,
            enabled,
        }
    }
}

impl Visitor for Dispatcher<'_, '_> {
    fn on_enter(&mut self, node: Node<'_>) -> Result<VisitSignal> {
        let route = route(node, self.context.bindings());
        for &fact in route.facts {
            if !self.enabled.enabled(fact) {
                continue;
            }
            self.extractors
                .get_mut(fact)
                .extract(node, &mut *self.context)?;
        }
        Ok(route.signal)
    }
}
