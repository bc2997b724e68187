//! Parallel indexing of many files.
//!
//! Files are independent: each gets its own [`IndexContext`](crate::IndexContext),
//! dispatcher and record buffer, so they are indexed on the rayon pool with
//! no shared mutable state.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                      index_files                          │
//! ├───────────────────────────────────────────────────────────┤
//! │  rayon::par_iter()   one walk per file, records buffered  │
//! │  collect()           outcomes returned in input order     │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! A failing file does not stop the batch; its error is reported in its
//! [`FileOutcome`] and logged.

use rayon::prelude::*;
use tracing::warn;

use crate::binding::BindingResolver;
use crate::config::IndexerConfig;
use crate::error::Result;
use crate::tree::SyntaxTree;
use crate::types::{IndexRecord, IndexSummary};

/// One file to index.
#[derive(Clone, Copy)]
pub struct FileInput<'a> {
    /// Document path or URI written to logs and outcomes
    pub document: &'a str,
    /// The file's syntax tree
    pub tree: &'a SyntaxTree,
    /// The file's bindings
    pub bindings: &'a (dyn BindingResolver + Sync),
}

impl std::fmt::Debug for FileInput<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileInput")
            .field("document", &self.document)
            .field("nodes", &self.tree.len())
            .finish_non_exhaustive()
    }
}

/// Records and counters for one successfully indexed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileIndex {
    /// Records in emission order
    pub records: Vec<IndexRecord>,
    /// Walk and fact counters
    pub summary: IndexSummary,
}

/// Result of indexing one file in a batch.
#[derive(Debug)]
pub struct FileOutcome {
    /// Document the outcome belongs to
    pub document: String,
    /// The file's records, or the error that stopped its walk
    pub result: Result<FileIndex>,
}

/// Index `files` in parallel.
///
/// The returned outcomes are in the same order as `files`.
#[must_use]
pub fn index_files(files: &[FileInput<'_>], config: &IndexerConfig) -> Vec<FileOutcome> {
    files
        .par_iter()
        .map(|input| {
            let result = index_one(input, config);
            if let Err(e) = &result {
                warn!(document = %input.document, error = %e, "Failed to index file");
            }
            FileOutcome {
                document: input.document.to_string(),
                result,
            }
        })
        .collect()
}

fn index_one(input: &FileInput<'_>, config: &IndexerConfig) -> Result<FileIndex> {
    let mut records = Vec::new();
    let summary = crate::index_tree(
        input.document,
        input.tree,
        input.bindings,
        config,
        &mut records,
    )?;
    Ok(FileIndex { records, summary })
}
