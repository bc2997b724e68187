//! Shared per-file state that extractors write into.
//!
//! One `IndexContext` exists per file pass. It is created by the caller,
//! lent to the dispatcher for the walk, and finished afterwards. It holds:
//!
//! - the record sink (owned)
//! - the binding resolver for the file (borrowed from the frontend)
//! - the set of records already emitted, so that two routes producing the
//!   same fact for the same position write it once

use std::collections::HashSet;

use tracing::debug;

use crate::binding::{Binding, BindingResolver};
use crate::error::Result;
use crate::sink::RecordSink;
use crate::types::{FactCounts, IndexRecord, NodeId, SymbolId};

/// Per-file emission target and symbol lookup.
pub struct IndexContext<'a> {
    document: String,
    bindings: &'a dyn BindingResolver,
    sink: Box<dyn RecordSink + 'a>,
    emitted: HashSet<IndexRecord>,
    counts: FactCounts,
}

impl<'a> IndexContext<'a> {
    /// Create a context for `document`.
    pub fn new(
        document: impl Into<String>,
        bindings: &'a dyn BindingResolver,
        sink: impl RecordSink + 'a,
    ) -> Self {
        Self {
            document: document.into(),
            bindings,
            sink: Box::new(sink),
            emitted: HashSet::new(),
            counts: FactCounts::default(),
        }
    }

    /// Document (file path or URI) being indexed.
    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    /// The file's binding resolver.
    #[must_use]
    pub fn bindings(&self) -> &'a dyn BindingResolver {
        self.bindings
    }

    /// Resolve the binding of `node`.
    #[must_use]
    pub fn resolve(&self, node: NodeId) -> Option<(SymbolId, &'a Binding)> {
        self.bindings.resolve(node)
    }

    /// Look up a symbol by id.
    #[must_use]
    pub fn symbol(&self, id: SymbolId) -> Option<&'a Binding> {
        self.bindings.symbol(id)
    }

    /// Send `record` to the sink unless an identical record was already
    /// emitted for this file.
    ///
    /// Returns `Ok(false)` when the record was suppressed as a duplicate.
    ///
    /// # Errors
    ///
    /// Propagates sink errors.
    pub fn emit(&mut self, record: IndexRecord) -> Result<bool> {
        if self.emitted.contains(&record) {
            debug!(
                document = %self.document,
                fact = %record.fact_kind(),
                range = %record.range(),
                "Suppressed duplicate record"
            );
            self.counts.duplicates_suppressed += 1;
            return Ok(false);
        }

        self.sink.emit(&record)?;
        self.counts.record(record.fact_kind());
        self.emitted.insert(record);
        Ok(true)
    }

    /// Records written so far.
    #[must_use]
    pub fn counts(&self) -> FactCounts {
        self.counts
    }

    /// Flush the sink and return the final counts.
    ///
    /// # Errors
    ///
    /// Propagates sink flush errors.
    pub fn finish(mut self) -> Result<FactCounts> {
        self.sink.flush()?;
        Ok(self.counts)
    }
}

impl std::fmt::Debug for IndexContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexContext")
            .field("document", &self.document)
            .field("counts", &self.counts)
            .finish_non_exhaustive()
    }
}
