//! Depth-first traversal engine.
//!
//! [`walk`] calls [`Visitor::on_enter`] once per node in document pre-order
//! and honours the returned [`VisitSignal`]:
//!
//! - `VisitSignal::Continue` - descend into the node's children
//! - `VisitSignal::Prune` - skip the children, continue with siblings
//!
//! The first `Err` from the visitor ends the walk and is returned as is.
//!
//! Traversal uses an explicit stack, so deeply nested expressions cannot
//! overflow the call stack.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::tree::{Node, SyntaxTree};

/// Traversal control returned for every visited node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitSignal {
    /// Visit the node's children.
    Continue,
    /// Skip the node's children.
    Prune,
}

/// Per-node callback driven by [`walk`].
pub trait Visitor {
    /// Called when the walk reaches `node`, before any of its children.
    ///
    /// # Errors
    ///
    /// Any error stops the walk.
    fn on_enter(&mut self, node: Node<'_>) -> Result<VisitSignal>;
}

/// Counters for one walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkStats {
    /// Nodes passed to `on_enter`
    pub visited: usize,
    /// Nodes for which `on_enter` returned `Prune`
    pub pruned: usize,
}

/// Walk `tree` from the root, calling `visitor` for every reachable node.
///
/// An empty tree visits nothing.
///
/// # Errors
///
/// Returns the first error produced by `visitor`.
pub fn walk<V: Visitor + ?Sized>(tree: &SyntaxTree, visitor: &mut V) -> Result<WalkStats> {
    let mut stats = WalkStats::default();
    let Some(root) = tree.root() else {
        return Ok(stats);
    };

    let mut stack: Vec<Node<'_>> = vec![root];
    while let Some(node) = stack.pop() {
        stats.visited += 1;
        match visitor.on_enter(node)? {
            VisitSignal::Continue => {
                let start = stack.len();
                stack.extend(node.children());
                stack[start..].reverse();
            }
            VisitSignal::Prune => stats.pruned += 1,
        }
    }

    Ok(stats)
}
