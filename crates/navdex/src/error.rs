//! Error types for navdex operations.
//!
//! ## Error Philosophy
//!
//! An unresolved or incomplete binding is never an error. The dispatcher
//! treats it as a pruning decision and moves on. Errors are reserved for:
//!
//! - Malformed input handed over by the frontend (unknown node ids, a
//!   declaration without its identifier)
//! - Sink failures (I/O, JSON encoding)
//! - Invalid configuration
//!
//! Extractor errors travel through the dispatcher unchanged and stop the
//! walk of the file that produced them.

use thiserror::Error;

use crate::tree::NodeKind;
use crate::types::{NodeId, SymbolId};

/// Result type for navdex operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for navdex operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A node id that does not belong to the tree
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    /// A node bound to a symbol the binding table never defined
    #[error("unknown symbol {0}")]
    UnknownSymbol(SymbolId),

    /// Structural misuse while building a tree
    #[error("malformed tree: {0}")]
    MalformedTree(String),

    /// An extractor needed an identifier the node does not carry
    #[error("{kind} node {node} has no identifier")]
    MissingName {
        /// The offending node
        node: NodeId,
        /// Its kind
        kind: NodeKind,
    },

    /// Writing to a record sink failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding a record failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(String),
}
