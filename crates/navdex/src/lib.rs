//! # Navdex: Syntax-Tree Fact Dispatcher for Code-Navigation Indexes
//!
//! Navdex walks a resolved syntax tree of one source file and turns it into
//! code-navigation facts: definitions, references, hover text and
//! implementation edges. A language frontend supplies the tree and the
//! binding table; navdex decides, node by node, which facts to extract and
//! whether to descend further.
//!
//! ## Design
//!
//! - **Routing is a pure function** of node kind, parent kind and binding
//!   ([`dispatch::route`]), matched exhaustively over [`NodeKind`]
//! - **Extractors are pluggable** behind the [`Extractor`] trait
//! - **Unresolved code is normal**: missing bindings prune or skip, never fail
//! - **Records stream to a sink**: a `Vec`, a JSON Lines writer, or your own
//!
//! ## Quick Start
//!
//! ```
//! use navdex::{
//!     Binding, BindingTable, IndexRecord, IndexerConfig, NodeKind, Span, TreeBuilder,
//!     TypeBinding, TypeKind, index_tree,
//! };
//!
//! let name = Span::new(1, 7, 1, 10).unwrap();
//! let mut builder = TreeBuilder::new();
//! let unit = builder.root(NodeKind::CompilationUnit, Span::new(1, 1, 1, 13).unwrap())?;
//! let class = builder.named(unit, NodeKind::TypeDecl, "Foo", Span::new(1, 1, 1, 13).unwrap())?;
//! let ident = builder.named(class, NodeKind::SimpleName, "Foo", name)?;
//! let tree = builder.build();
//!
//! let mut bindings = BindingTable::new();
//! let foo = bindings.define(Binding::Type(TypeBinding {
//!     qualified_name: "demo.Foo".to_string(),
//!     kind: TypeKind::Class,
//!     superclass: None,
//!     interfaces: Vec::new(),
//!     declaration: Some(name),
//! }));
//! bindings.bind(ident, foo)?;
//!
//! let mut records: Vec<IndexRecord> = Vec::new();
//! let config = IndexerConfig::default();
//! let summary = index_tree("Foo.java", &tree, &bindings, &config, &mut records)?;
//!
//! assert_eq!(summary.facts.definitions, 1);
//! assert_eq!(summary.facts.hovers, 1);
//! # Ok::<(), navdex::Error>(())
//! ```

pub mod binding;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod extract;
pub mod parallel;
pub mod sink;
pub mod tree;
pub mod types;
pub mod walk;

pub use binding::{
    Binding, BindingResolver, BindingTable, MethodBinding, TypeBinding, TypeKind, VariableBinding,
};
pub use config::{FactToggles, HoverConfig, IndexerConfig};
pub use context::IndexContext;
pub use dispatch::{Dispatcher, Extractors, Route};
pub use error::{Error, Result};
pub use extract::{
    DefinitionExtractor, Extractor, HoverExtractor, ImplementationExtractor, ReferenceExtractor,
};
pub use parallel::{FileIndex, FileInput, FileOutcome, index_files};
pub use sink::{JsonlSink, RecordSink};
pub use tree::{Node, NodeKind, SyntaxTree, TreeBuilder};
pub use types::{FactCounts, FactKind, IndexRecord, IndexSummary, NodeId, Span, SymbolId};
pub use walk::{VisitSignal, Visitor, WalkStats, walk};

use tracing::{debug, info_span};

/// Index one file: walk `tree` with the built-in extractors and write the
/// resulting records to `sink`.
///
/// The sink is flushed before returning.
///
/// # Errors
///
/// Returns the first extractor or sink error. Records emitted before the
/// error have already reached the sink.
pub fn index_tree(
    document: &str,
    tree: &SyntaxTree,
    bindings: &dyn BindingResolver,
    config: &IndexerConfig,
    sink: impl RecordSink,
) -> Result<IndexSummary> {
    let span = info_span!("index_tree", document = %document, nodes = tree.len());
    let _guard = span.enter();

    let mut context = IndexContext::new(document, bindings, sink);
    let stats = {
        let mut dispatcher = Dispatcher::new(&mut context, config);
        walk(tree, &mut dispatcher)?
    };
    let facts = context.finish()?;

    let summary = IndexSummary {
        nodes_visited: stats.visited,
        subtrees_pruned: stats.pruned,
        facts,
    };
    debug!(
        visited = summary.nodes_visited,
        pruned = summary.subtrees_pruned,
        facts = summary.facts.total(),
        duplicates = summary.facts.duplicates_suppressed,
        "Indexed file"
    );
    Ok(summary)
}
