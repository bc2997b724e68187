//! Domain types for navdex.
//!
//! - **Ids**: `NodeId`, `SymbolId` (arena and symbol-table indexes)
//! - **Positions**: `Span`
//! - **Facts**: `FactKind`, `IndexRecord` (what extractors emit)
//! - **Results**: `FactCounts`, `IndexSummary`
//!
//! ## Design Decisions
//!
//! | Decision | Choice | Rationale |
//! |----------|--------|-----------|
//! | Ids | Newtypes over u32 | Node and symbol ids cannot be swapped |
//! | Records | One tagged enum | A single sink type serves every fact kind |
//! | Span | 1-indexed, end-exclusive column | Matches editor conventions |

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Strongly-typed ID wrappers
// ============================================================================

/// Index of a node inside its `SyntaxTree` arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Arena slot of this node.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Index of a symbol inside a `BindingTable`.
///
/// Kept distinct from `NodeId` so a node can never be looked up as a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SymbolId(pub u32);

impl SymbolId {
    /// Table slot of this symbol.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

// ============================================================================
// Positions
// ============================================================================

/// A source range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Starting line (1-indexed)
    pub start_line: u32,
    /// Starting column (1-indexed)
    pub start_column: u32,
    /// Ending line (1-indexed, inclusive)
    pub end_line: u32,
    /// Ending column (1-indexed, exclusive)
    pub end_column: u32,
}

impl Span {
    /// Create a new span with validation.
    ///
    /// Returns `None` if the end position is before the start position.
    #[must_use]
    pub fn new(start_line: u32, start_column: u32, end_line: u32, end_column: u32) -> Option<Self> {
        if end_line < start_line || (end_line == start_line && end_column < start_column) {
            return None;
        }
        Some(Self {
            start_line,
            start_column,
            end_line,
            end_column,
        })
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}-{}:{}",
            self.start_line, self.start_column, self.end_line, self.end_column
        )
    }
}

// ============================================================================
// Facts
// ============================================================================

/// The four kinds of navigation facts, one per extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactKind {
    /// Go-to-definition links
    Definition,
    /// Find-references entries
    Reference,
    /// Hover text
    Hover,
    /// Type-to-supertype implementation edges
    Implementation,
}

impl FactKind {
    /// All fact kinds, in dispatch order.
    pub const ALL: [FactKind; 4] = [
        FactKind::Definition,
        FactKind::Reference,
        FactKind::Hover,
        FactKind::Implementation,
    ];

    /// Stable lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Definition => "definition",
            Self::Reference => "reference",
            Self::Hover => "hover",
            Self::Implementation => "implementation",
        }
    }
}

impl fmt::Display for FactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the navigation index.
///
/// Serialized with a `"fact"` tag so a JSONL stream can mix all kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "fact", rename_all = "snake_case")]
pub enum IndexRecord {
    /// `range` resolves to the declaration at `target`.
    Definition {
        /// Identifier the user clicks on
        range: Span,
        /// Declaration location
        target: Span,
        /// Symbol both ranges denote
        symbol: SymbolId,
        /// Identifier text
        name: String,
    },
    /// `range` is a use (or the declaration) of `symbol`.
    Reference {
        /// Location of the use
        range: Span,
        /// Declaration location, when known
        target: Option<Span>,
        /// Referenced symbol
        symbol: SymbolId,
        /// Identifier text
        name: String,
        /// Whether `range` is the declaration itself
        is_declaration: bool,
    },
    /// Hover text shown over `range`.
    Hover {
        /// Hovered identifier
        range: Span,
        /// Symbol described
        symbol: SymbolId,
        /// Rendered description
        contents: String,
    },
    /// The type named at `range` implements or extends `implemented`.
    Implementation {
        /// The implementing type's own name
        range: Span,
        /// Qualified name of the implementing type
        implementor: String,
        /// Qualified name of the supertype
        implemented: String,
        /// Supertype declaration location, when known
        target: Option<Span>,
    },
}

impl IndexRecord {
    /// The fact kind this record belongs to.
    #[must_use]
    pub fn fact_kind(&self) -> FactKind {
        match self {
            Self::Definition { .. } => FactKind::Definition,
            Self::Reference { .. } => FactKind::Reference,
            Self::Hover { .. } => FactKind::Hover,
            Self::Implementation { .. } => FactKind::Implementation,
        }
    }

    /// The source range the record is attached to.
    #[must_use]
    pub fn range(&self) -> Span {
        match self {
            Self::Definition { range, .. }
            | Self::Reference { range, .. }
            | Self::Hover { range, .. }
            | Self::Implementation { range, .. } => *range,
        }
    }
}

// ============================================================================
// Results
// ============================================================================

/// Records emitted for one file, per fact kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactCounts {
    /// Definition records written
    pub definitions: usize,
    /// Reference records written
    pub references: usize,
    /// Hover records written
    pub hovers: usize,
    /// Implementation records written
    pub implementations: usize,
    /// Records dropped because an identical one was already written
    pub duplicates_suppressed: usize,
}

impl FactCounts {
    /// Count one written record.
    pub fn record(&mut self, kind: FactKind) {
        match kind {
            FactKind::Definition => self.definitions += 1,
            FactKind::Reference => self.references += 1,
            FactKind::Hover => self.hovers += 1,
            FactKind::Implementation => self.implementations += 1,
        }
    }

    /// Records written, across all kinds.
    #[must_use]
    pub fn total(&self) -> usize {
        self.definitions + self.references + self.hovers + self.implementations
    }
}

/// Outcome of indexing one file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSummary {
    /// Nodes the dispatcher was called for
    pub nodes_visited: usize,
    /// Nodes whose children were skipped
    pub subtrees_pruned: usize,
    /// Records written to the sink
    pub facts: FactCounts,
}
