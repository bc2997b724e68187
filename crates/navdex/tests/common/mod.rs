//! Shared fixtures for navdex integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use navdex::{
    Binding, BindingTable, Error, Extractor, Extractors, FactKind, IndexContext, MethodBinding,
    Node, NodeId, NodeKind, Result, Span, SyntaxTree, TreeBuilder, TypeBinding, TypeKind,
    VariableBinding,
};
use tracing_subscriber::EnvFilter;

/// Extractor calls in the order they happened.
pub type CallLog = Rc<RefCell<Vec<(FactKind, NodeId)>>>;

/// Extractor that only records that it was called.
pub struct RecordingExtractor {
    fact: FactKind,
    log: CallLog,
    fail_on: Option<NodeId>,
}

impl Extractor for RecordingExtractor {
    fn extract(&mut self, node: Node<'_>, _ctx: &mut IndexContext<'_>) -> Result<()> {
        self.log.borrow_mut().push((self.fact, node.id()));
        if self.fail_on == Some(node.id()) {
            return Err(Error::MissingName {
                node: node.id(),
                kind: node.kind(),
            });
        }
        Ok(())
    }
}

fn recorder(
    fact: FactKind,
    log: &CallLog,
    fail_on: Option<(FactKind, NodeId)>,
) -> Box<dyn Extractor> {
    Box::new(RecordingExtractor {
        fact,
        log: Rc::clone(log),
        fail_on: fail_on.filter(|(f, _)| *f == fact).map(|(_, node)| node),
    })
}

/// Four recording extractors sharing `log`.
pub fn recording_extractors(log: &CallLog) -> Extractors {
    recording_extractors_failing(log, None)
}

/// Recording extractors; with `fail_on = Some((fact, node))` the `fact`
/// extractor returns an error for `node` after recording the call.
pub fn recording_extractors_failing(
    log: &CallLog,
    fail_on: Option<(FactKind, NodeId)>,
) -> Extractors {
    Extractors {
        definition: recorder(FactKind::Definition, log, fail_on),
        reference: recorder(FactKind::Reference, log, fail_on),
        hover: recorder(FactKind::Hover, log, fail_on),
        implementation: recorder(FactKind::Implementation, log, fail_on),
    }
}

/// Extractors called for `node`, in call order.
pub fn calls_for(log: &CallLog, node: NodeId) -> Vec<FactKind> {
    log.borrow()
        .iter()
        .filter(|(_, id)| *id == node)
        .map(|(fact, _)| *fact)
        .collect()
}

pub fn span(line: u32, start: u32, end: u32) -> Span {
    Span::new(line, start, line, end).expect("valid span")
}

/// Node ids in [`field_declaration`].
pub struct FieldIds {
    pub unit: NodeId,
    pub class: NodeId,
    pub class_name: NodeId,
    pub field: NodeId,
    pub field_type: NodeId,
    pub field_type_name: NodeId,
    pub fragment: NodeId,
    pub field_name: NodeId,
}

/// ```text
/// 1 | class Foo { Bar b; }
/// ```
pub fn field_declaration() -> (SyntaxTree, BindingTable, FieldIds) {
    let whole = span(1, 1, 21);
    let mut b = TreeBuilder::new();
    let unit = b.root(NodeKind::CompilationUnit, whole).expect("root");
    let class = b.named(unit, NodeKind::TypeDecl, "Foo", whole).expect("class");
    let class_name = b
        .named(class, NodeKind::SimpleName, "Foo", span(1, 7, 10))
        .expect("class name");
    let field = b.child(class, NodeKind::FieldDecl, span(1, 13, 19)).expect("field");
    let field_type = b
        .child(field, NodeKind::SimpleType, span(1, 13, 16))
        .expect("field type");
    let field_type_name = b
        .named(field_type, NodeKind::SimpleName, "Bar", span(1, 13, 16))
        .expect("field type name");
    let fragment = b
        .child(field, NodeKind::VariableDeclFragment, span(1, 17, 18))
        .expect("fragment");
    let field_name = b
        .named(fragment, NodeKind::SimpleName, "b", span(1, 17, 18))
        .expect("field name");
    let tree = b.build();

    let mut t = BindingTable::new();
    let foo = t.define(Binding::Type(TypeBinding {
        qualified_name: "demo.Foo".to_string(),
        kind: TypeKind::Class,
        superclass: None,
        interfaces: Vec::new(),
        declaration: Some(span(1, 7, 10)),
    }));
    let bar = t.define(Binding::Type(TypeBinding {
        qualified_name: "demo.Bar".to_string(),
        kind: TypeKind::Class,
        superclass: None,
        interfaces: Vec::new(),
        declaration: None,
    }));
    let b_field = t.define(Binding::Variable(VariableBinding {
        name: "b".to_string(),
        type_name: "demo.Bar".to_string(),
        declaring_type: Some(foo),
        declaration: Some(span(1, 17, 18)),
    }));
    t.bind(class_name, foo).expect("bind Foo");
    t.bind(field_type_name, bar).expect("bind Bar");
    t.bind(field_name, b_field).expect("bind b");

    let ids = FieldIds {
        unit,
        class,
        class_name,
        field,
        field_type,
        field_type_name,
        fragment,
        field_name,
    };
    (tree, t, ids)
}

/// Node ids in [`unowned_invocation`].
pub struct InvocationIds {
    pub method: NodeId,
    pub invocation: NodeId,
    pub receiver: NodeId,
    pub callee: NodeId,
}

/// ```text
/// 1 | class Main {
/// 2 |   void main() {
/// 3 |     obj.method();
/// 4 |   }
/// 5 | }
/// ```
///
/// `method` resolves, but its declaring type is unknown.
pub fn unowned_invocation() -> (SyntaxTree, BindingTable, InvocationIds) {
    let mut b = TreeBuilder::new();
    let whole = Span::new(1, 1, 5, 2).expect("valid span");
    let unit = b.root(NodeKind::CompilationUnit, whole).expect("root");
    let class = b.named(unit, NodeKind::TypeDecl, "Main", whole).expect("class");
    b.named(class, NodeKind::SimpleName, "Main", span(1, 7, 11))
        .expect("class name");
    let method_span = Span::new(2, 3, 4, 4).expect("valid span");
    let method = b
        .named(class, NodeKind::MethodDecl, "main", method_span)
        .expect("method");
    b.named(method, NodeKind::SimpleName, "main", span(2, 8, 12))
        .expect("method name");
    let body = b
        .child(method, NodeKind::Block, Span::new(2, 15, 4, 4).expect("valid span"))
        .expect("body");
    let stmt = b
        .child(body, NodeKind::ExpressionStatement, span(3, 5, 18))
        .expect("statement");
    let invocation = b
        .child(stmt, NodeKind::MethodInvocation, span(3, 5, 17))
        .expect("invocation");
    let receiver = b
        .named(invocation, NodeKind::SimpleName, "obj", span(3, 5, 8))
        .expect("receiver");
    let callee = b
        .named(invocation, NodeKind::SimpleName, "method", span(3, 9, 15))
        .expect("callee");
    let tree = b.build();

    let mut t = BindingTable::new();
    let orphan = t.define(Binding::Method(MethodBinding {
        name: "method".to_string(),
        declaring_type: None,
        signature: "void method()".to_string(),
        declaration: None,
    }));
    t.bind(invocation, orphan).expect("bind invocation");
    t.bind(callee, orphan).expect("bind callee");

    let ids = InvocationIds {
        method,
        invocation,
        receiver,
        callee,
    };
    (tree, t, ids)
}

/// Send `tracing` output to the test harness, filtered by `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
