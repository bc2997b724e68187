//! Semantic bindings: what a name or expression resolves to.
//!
//! Bindings come from the frontend's type checker. navdex never computes
//! them; it only queries them through [`BindingResolver`]. A node without a
//! binding is a normal, expected state (the symbol could not be determined)
//! and callers must treat it as "no fact", never as an error.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{NodeId, Span, SymbolId};

/// Flavour of a type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    /// `class`
    Class,
    /// `interface`
    Interface,
    /// `enum`
    Enum,
    /// `record`
    Record,
}

impl TypeKind {
    /// Source keyword, used in hover text.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Enum => "enum",
            Self::Record => "record",
        }
    }
}

/// A resolved type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeBinding {
    /// Fully qualified name (e.g., `com.acme.Foo`)
    pub qualified_name: String,
    /// Declaration flavour
    pub kind: TypeKind,
    /// Direct superclass, if declared and resolved
    pub superclass: Option<SymbolId>,
    /// Directly implemented (or, for interfaces, extended) interfaces
    pub interfaces: Vec<SymbolId>,
    /// Location of the type's own name, when declared in indexed source
    pub declaration: Option<Span>,
}

impl TypeBinding {
    /// Superclass first, then interfaces in declaration order.
    pub fn supertypes(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.superclass.into_iter().chain(self.interfaces.iter().copied())
    }

    /// Last segment of the qualified name.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.qualified_name
            .rsplit('.')
            .next()
            .unwrap_or(&self.qualified_name)
    }
}

/// A resolved method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodBinding {
    /// Simple method name
    pub name: String,
    /// Type declaring the method; `None` when it could not be determined
    pub declaring_type: Option<SymbolId>,
    /// Rendered signature (e.g., `void run(int n)`)
    pub signature: String,
    /// Location of the method's name, when declared in indexed source
    pub declaration: Option<Span>,
}

/// A resolved variable: field, parameter or local.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableBinding {
    /// Simple variable name
    pub name: String,
    /// Declared type, rendered as written
    pub type_name: String,
    /// Type declaring the field; `None` for locals, parameters, and fields
    /// whose owner could not be determined
    pub declaring_type: Option<SymbolId>,
    /// Location of the variable's name, when declared in indexed source
    pub declaration: Option<Span>,
}

/// The symbol a node resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "binding", rename_all = "snake_case")]
pub enum Binding {
    /// A type
    Type(TypeBinding),
    /// A method
    Method(MethodBinding),
    /// A variable
    Variable(VariableBinding),
}

impl Binding {
    /// Type declaring this member. Always `None` for type bindings.
    #[must_use]
    pub fn declaring_type(&self) -> Option<SymbolId> {
        match self {
            Self::Type(_) => None,
            Self::Method(m) => m.declaring_type,
            Self::Variable(v) => v.declaring_type,
        }
    }

    /// Where the symbol is declared, if that is in indexed source.
    #[must_use]
    pub fn declaration(&self) -> Option<Span> {
        match self {
            Self::Type(t) => t.declaration,
            Self::Method(m) => m.declaration,
            Self::Variable(v) => v.declaration,
        }
    }

    /// The type binding, if this is one.
    #[must_use]
    pub fn as_type(&self) -> Option<&TypeBinding> {
        match self {
            Self::Type(t) => Some(t),
            _ => None,
        }
    }

    /// The method binding, if this is one.
    #[must_use]
    pub fn as_method(&self) -> Option<&MethodBinding> {
        match self {
            Self::Method(m) => Some(m),
            _ => None,
        }
    }

    /// The variable binding, if this is one.
    #[must_use]
    pub fn as_variable(&self) -> Option<&VariableBinding> {
        match self {
            Self::Variable(v) => Some(v),
            _ => None,
        }
    }
}

/// Per-node binding lookup, provided by the frontend.
pub trait BindingResolver {
    /// The symbol `node` resolves to, or `None` if unresolved.
    fn resolve(&self, node: NodeId) -> Option<(SymbolId, &Binding)>;

    /// Look up a symbol by id (e.g., a declaring type or supertype).
    fn symbol(&self, id: SymbolId) -> Option<&Binding>;
}

/// In-memory symbol table plus node-to-symbol map.
#[derive(Debug, Clone, Default)]
pub struct BindingTable {
    symbols: Vec<Binding>,
    by_node: HashMap<NodeId, SymbolId>,
}

impl BindingTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a symbol and return its id.
    ///
    /// # Panics
    ///
    /// Panics if more than `u32::MAX` symbols are defined.
    pub fn define(&mut self, binding: Binding) -> SymbolId {
        let id = SymbolId(u32::try_from(self.symbols.len()).expect("symbol table overflow"));
        self.symbols.push(binding);
        id
    }

    /// Record that `node` resolves to `symbol`. A later call for the same
    /// node replaces the earlier one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSymbol`] if `symbol` was never defined.
    pub fn bind(&mut self, node: NodeId, symbol: SymbolId) -> Result<()> {
        if symbol.index() >= self.symbols.len() {
            return Err(Error::UnknownSymbol(symbol));
        }
        self.by_node.insert(node, symbol);
        Ok(())
    }

    /// Number of defined symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether no symbols are defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl BindingResolver for BindingTable {
    fn resolve(&self, node: NodeId) -> Option<(SymbolId, &Binding)> {
        let id = *self.by_node.get(&node)?;
        self.symbols.get(id.index()).map(|b| (id, b))
    }

    fn symbol(&self, id: SymbolId) -> Option<&Binding> {
        self.symbols.get(id.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(name: &str) -> Binding {
        Binding::Type(TypeBinding {
            qualified_name: name.to_string(),
            kind: TypeKind::Class,
            superclass: None,
            interfaces: Vec::new(),
            declaration: None,
        })
    }

    #[test]
    fn bind_and_resolve() {
        let mut table = BindingTable::new();
        let foo = table.define(class("demo.Foo"));
        table.bind(NodeId(3), foo).unwrap();

        let (id, binding) = table.resolve(NodeId(3)).unwrap();
        assert_eq!(id, foo);
        assert_eq!(binding.as_type().unwrap().simple_name(), "Foo");
        assert!(table.resolve(NodeId(4)).is_none());
    }

    #[test]
    fn bind_rejects_undefined_symbol() {
        let mut table = BindingTable::new();

        let err = table.bind(NodeId(0), SymbolId(5)).unwrap_err();
        assert!(matches!(err, Error::UnknownSymbol(SymbolId(5))));
    }

    #[test]
    fn declaring_type_per_binding_kind() {
        let mut table = BindingTable::new();
        let owner = table.define(class("demo.Owner"));

        let method = Binding::Method(MethodBinding {
            name: "run".to_string(),
            declaring_type: Some(owner),
            signature: "void run()".to_string(),
            declaration: None,
        });
        let local = Binding::Variable(VariableBinding {
            name: "n".to_string(),
            type_name: "int".to_string(),
            declaring_type: None,
            declaration: None,
        });

        assert_eq!(method.declaring_type(), Some(owner));
        assert_eq!(local.declaring_type(), None);
        assert_eq!(class("demo.Foo").declaring_type(), None);
        assert!(local.as_variable().is_some());
        assert!(local.as_method().is_none());
    }

    #[test]
    fn supertypes_list_superclass_first() {
        let binding = TypeBinding {
            qualified_name: "demo.Foo".to_string(),
            kind: TypeKind::Class,
            superclass: Some(SymbolId(1)),
            interfaces: vec![SymbolId(2), SymbolId(3)],
            declaration: None,
        };

        let supers: Vec<_> = binding.supertypes().collect();
        assert_eq!(supers, vec![SymbolId(1), SymbolId(2), SymbolId(3)]);
    }
}
