//! Read-only syntax trees handed over by the frontend.
//!
//! Nodes live in an arena owned by [`SyntaxTree`]. A node refers to its
//! parent by index, so the parent link never owns anything and lives exactly
//! as long as the tree. [`Node`] is a cheap `Copy` handle pairing the tree
//! with an id; every structural query goes through it.
//!
//! Trees are assembled with [`TreeBuilder`] and are immutable afterwards:
//! every non-root node has exactly one parent, children stay in document
//! order, and ids are assigned in insertion order.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{NodeId, Span};

/// Syntactic kinds the frontend produces.
///
/// This is a closed set. The dispatcher matches on it exhaustively, so adding
/// a kind forces a routing decision for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Root of a source file
    CompilationUnit,
    /// `package a.b;`
    PackageDecl,
    /// `import a.b.C;`
    ImportDecl,
    /// Class, interface or enum declaration
    TypeDecl,
    /// Field declaration (may declare several fragments)
    FieldDecl,
    /// Method or constructor declaration
    MethodDecl,
    /// Single variable declaration such as a method parameter
    SimpleVarDecl,
    /// One declarator of a field or local variable statement
    VariableDeclFragment,
    /// Local variable declaration statement
    VariableDeclStatement,
    /// `{ ... }`
    Block,
    /// Expression used as a statement
    ExpressionStatement,
    /// `return ...;`
    ReturnStatement,
    /// `receiver.method(args)`
    MethodInvocation,
    /// `expr.field`
    FieldAccess,
    /// Dotted name such as `a.b.c`
    QualifiedName,
    /// Bare identifier
    SimpleName,
    /// Type reference by name
    SimpleType,
    /// `int`, `boolean`, ...
    PrimitiveType,
    /// Literal value
    Literal,
}

impl NodeKind {
    /// Stable snake_case name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CompilationUnit => "compilation_unit",
            Self::PackageDecl => "package_decl",
            Self::ImportDecl => "import_decl",
            Self::TypeDecl => "type_decl",
            Self::FieldDecl => "field_decl",
            Self::MethodDecl => "method_decl",
            Self::SimpleVarDecl => "simple_var_decl",
            Self::VariableDeclFragment => "variable_decl_fragment",
            Self::VariableDeclStatement => "variable_decl_statement",
            Self::Block => "block",
            Self::ExpressionStatement => "expression_statement",
            Self::ReturnStatement => "return_statement",
            Self::MethodInvocation => "method_invocation",
            Self::FieldAccess => "field_access",
            Self::QualifiedName => "qualified_name",
            Self::SimpleName => "simple_name",
            Self::SimpleType => "simple_type",
            Self::PrimitiveType => "primitive_type",
            Self::Literal => "literal",
        }
    }

    /// Whether nodes of this kind are identifiers that can carry a binding.
    #[must_use]
    pub fn is_name(self) -> bool {
        matches!(self, Self::SimpleName | Self::QualifiedName)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    name: Option<String>,
    span: Span,
}

/// An immutable, arena-backed syntax tree.
#[derive(Debug, Clone, Default)]
pub struct SyntaxTree {
    nodes: Vec<NodeData>,
}

impl SyntaxTree {
    /// The root node, or `None` for an empty tree.
    #[must_use]
    pub fn root(&self) -> Option<Node<'_>> {
        if self.nodes.is_empty() {
            None
        } else {
            Some(Node {
                tree: self,
                id: NodeId(0),
            })
        }
    }

    /// Look up a node by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] if `id` is not part of this tree.
    pub fn node(&self, id: NodeId) -> Result<Node<'_>> {
        if id.index() < self.nodes.len() {
            Ok(Node { tree: self, id })
        } else {
            Err(Error::UnknownNode(id))
        }
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no nodes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in id order (which is also document pre-order for trees
    /// built top-down).
    pub fn nodes(&self) -> impl Iterator<Item = Node<'_>> + '_ {
        (0..self.nodes.len()).filter_map(move |index| {
            let raw = u32::try_from(index).ok()?;
            Some(Node {
                tree: self,
                id: NodeId(raw),
            })
        })
    }
}

/// A handle to one node of a [`SyntaxTree`].
///
/// Only constructed for ids that exist in the tree, so accessors never fail.
#[derive(Clone, Copy)]
pub struct Node<'t> {
    tree: &'t SyntaxTree,
    id: NodeId,
}

impl<'t> Node<'t> {
    fn data(&self) -> &'t NodeData {
        &self.tree.nodes[self.id.index()]
    }

    fn at(&self, id: NodeId) -> Node<'t> {
        Node {
            tree: self.tree,
            id,
        }
    }

    /// This node's id.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// This node's kind.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.data().kind
    }

    /// The enclosing node, `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<Node<'t>> {
        self.data().parent.map(|id| self.at(id))
    }

    /// Kind of the enclosing node.
    #[must_use]
    pub fn parent_kind(&self) -> Option<NodeKind> {
        self.parent().map(|p| p.kind())
    }

    /// Direct children in document order.
    pub fn children(&self) -> impl Iterator<Item = Node<'t>> + use<'t> {
        let tree = self.tree;
        self.data()
            .children
            .iter()
            .map(move |&id| Node { tree, id })
    }

    /// First direct child of the given kind.
    #[must_use]
    pub fn first_child_of_kind(&self, kind: NodeKind) -> Option<Node<'t>> {
        self.children().find(|c| c.kind() == kind)
    }

    /// Identifier text, for names and named declarations.
    #[must_use]
    pub fn name(&self) -> Option<&'t str> {
        self.data().name.as_deref()
    }

    /// Source range covered by this node.
    #[must_use]
    pub fn span(&self) -> Span {
        self.data().span
    }

    /// All nodes below this one, in document pre-order (excluding `self`).
    #[must_use]
    pub fn descendants(&self) -> Descendants<'t> {
        let mut stack: Vec<NodeId> = self.data().children.clone();
        stack.reverse();
        Descendants {
            tree: self.tree,
            stack,
        }
    }
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("kind", &self.kind())
            .field("name", &self.name())
            .finish()
    }
}

/// Pre-order iterator over a subtree, see [`Node::descendants`].
pub struct Descendants<'t> {
    tree: &'t SyntaxTree,
    stack: Vec<NodeId>,
}

impl<'t> Iterator for Descendants<'t> {
    type Item = Node<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let children = &self.tree.nodes[id.index()].children;
        self.stack.extend(children.iter().rev().copied());
        Some(Node {
            tree: self.tree,
            id,
        })
    }
}

/// Assembles a [`SyntaxTree`] top-down.
///
/// ```
/// use navdex::{NodeKind, Span, TreeBuilder};
///
/// let span = Span::new(1, 1, 1, 20).unwrap();
/// let mut builder = TreeBuilder::new();
/// let unit = builder.root(NodeKind::CompilationUnit, span)?;
/// let class = builder.named(unit, NodeKind::TypeDecl, "Foo", span)?;
/// builder.named(class, NodeKind::SimpleName, "Foo", span)?;
/// let tree = builder.build();
///
/// assert_eq!(tree.len(), 3);
/// # Ok::<(), navdex::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<NodeData>,
}

impl TreeBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the root node.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedTree`] if a root already exists.
    pub fn root(&mut self, kind: NodeKind, span: Span) -> Result<NodeId> {
        if !self.nodes.is_empty() {
            return Err(Error::MalformedTree("tree already has a root".to_string()));
        }
        self.push(None, kind, None, span)
    }

    /// Add an unnamed child under `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] if `parent` was not added before.
    pub fn child(&mut self, parent: NodeId, kind: NodeKind, span: Span) -> Result<NodeId> {
        self.push(Some(parent), kind, None, span)
    }

    /// Add a child carrying identifier text under `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] if `parent` was not added before.
    pub fn named(
        &mut self,
        parent: NodeId,
        kind: NodeKind,
        name: impl Into<String>,
        span: Span,
    ) -> Result<NodeId> {
        self.push(Some(parent), kind, Some(name.into()), span)
    }

    /// Freeze the tree.
    #[must_use]
    pub fn build(self) -> SyntaxTree {
        SyntaxTree { nodes: self.nodes }
    }

    fn push(
        &mut self,
        parent: Option<NodeId>,
        kind: NodeKind,
        name: Option<String>,
        span: Span,
    ) -> Result<NodeId> {
        let raw = u32::try_from(self.nodes.len())
            .map_err(|_| Error::MalformedTree("node count exceeds u32::MAX".to_string()))?;
        let id = NodeId(raw);

        if let Some(parent) = parent {
            let parent_data = self
                .nodes
                .get_mut(parent.index())
                .ok_or(Error::UnknownNode(parent))?;
            parent_data.children.push(id);
        }

        self.nodes.push(NodeData {
            kind,
            parent,
            children: Vec::new(),
            name,
            span,
        });
        Ok(id)
    }
}
