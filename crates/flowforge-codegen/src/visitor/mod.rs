// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Node-visitor dispatch over the process graph.
//!
//! Each node kind has its own visitor that appends factory-style
//! construction statements to a caller-supplied statement body. The
//! framework itself is stateless per node: everything accumulated during
//! a walk lives in the statement body, the variable scope, and the
//! [`ProcessMetadata`] record.
//!
//! # Modules
//!
//! One module per node kind, mirroring the graph model's [`NodeKind`]:
//! [`start`], [`end`], [`action`], [`task`], [`human_task`],
//! [`subprocess`], [`gateway`], [`event`].

pub mod action;
pub mod end;
pub mod event;
pub mod gateway;
pub mod human_task;
pub mod start;
pub mod subprocess;
pub mod task;

use std::collections::HashMap;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

use flowforge_model::{NodeKind, ProcessNode, SignalMap, UserTaskDescriptor, Variable, VariableScope, WorkItem};

use crate::tree::{CallExpr, Expr, Stmt, TypeRef};

/// Receiver name of the process construction factory.
pub const FACTORY_VAR: &str = "factory";

/// Receiver name of the ambient execution context in generated
/// assignments.
pub const CONTEXT_VAR: &str = "context";

/// Process-level facts accumulated while visiting nodes and consumed by
/// resource generation.
#[derive(Debug, Clone, Default)]
pub struct ProcessMetadata {
    /// Fully qualified process identifier.
    pub process_id: String,

    /// Simple process name.
    pub process_name: String,

    /// Package of the generated artifacts.
    pub package_name: String,

    /// Signals discovered on event and start nodes, in discovery order.
    pub signals: SignalMap,

    /// User tasks discovered during the walk.
    pub user_tasks: Vec<UserTaskDescriptor>,
}

/// A visitor for one node kind: appends construction statements for the
/// node to the statement body.
pub type VisitorFn =
    fn(&str, &ProcessNode, &mut Vec<Stmt>, &VariableScope, &mut ProcessMetadata);

/// Dispatch table from node kind to visitor.
///
/// The default table covers every kind the model declares; callers may
/// override or extend entries through [`register`](Self::register).
pub struct NodeVisitorRegistry {
    visitors: HashMap<NodeKind, VisitorFn>,
}

impl NodeVisitorRegistry {
    /// A registry with the default visitor for every node kind.
    pub fn new() -> Self {
        let mut registry = Self {
            visitors: HashMap::new(),
        };
        registry.register(NodeKind::Start, start::visit);
        registry.register(NodeKind::End, end::visit);
        registry.register(NodeKind::Action, action::visit);
        registry.register(NodeKind::Task, task::visit);
        registry.register(NodeKind::HumanTask, human_task::visit);
        registry.register(NodeKind::SubProcess, subprocess::visit);
        registry.register(NodeKind::Split, gateway::visit_split);
        registry.register(NodeKind::Join, gateway::visit_join);
        registry.register(NodeKind::Event, event::visit);
        registry
    }

    /// A registry with no visitors registered.
    pub fn empty() -> Self {
        Self {
            visitors: HashMap::new(),
        }
    }

    /// Register (or replace) the visitor for a node kind.
    pub fn register(&mut self, kind: NodeKind, visitor: VisitorFn) {
        self.visitors.insert(kind, visitor);
    }

    /// Visit a node with the default factory receiver.
    pub fn visit(
        &self,
        node: &ProcessNode,
        body: &mut Vec<Stmt>,
        scope: &VariableScope,
        metadata: &mut ProcessMetadata,
    ) {
        self.visit_with_factory(FACTORY_VAR, node, body, scope, metadata);
    }

    /// Visit a node, emitting construction calls on the given factory
    /// receiver. Unknown kinds emit nothing.
    pub fn visit_with_factory(
        &self,
        factory: &str,
        node: &ProcessNode,
        body: &mut Vec<Stmt>,
        scope: &VariableScope,
        metadata: &mut ProcessMetadata,
    ) {
        debug!(node_id = node.id, kind = %node.kind, "visiting process node");
        if let Some(visitor) = self.visitors.get(&node.kind) {
            visitor(factory, node, body, scope, metadata);
        }
    }
}

impl Default for NodeVisitorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Append a call statement `receiver.operation(args)` and return the call
/// for further decoration.
pub fn emit_call<'a>(
    body: &'a mut Vec<Stmt>,
    receiver: &str,
    operation: &str,
    args: Vec<Expr>,
) -> &'a mut CallExpr {
    body.push(Stmt::Expr(Expr::Call(CallExpr::on(receiver, operation, args))));
    let Some(Stmt::Expr(Expr::Call(call))) = body.last_mut() else {
        unreachable!("statement pushed above is a call expression");
    };
    call
}

/// Append `resultType binding = receiver.operation(args);`, declaring a
/// new local bound to the call's result.
pub fn emit_call_with_binding(
    body: &mut Vec<Stmt>,
    receiver: &str,
    result_type: TypeRef,
    binding: &str,
    operation: &str,
    args: Vec<Expr>,
) {
    body.push(Stmt::Local {
        ty: result_type,
        name: binding.to_string(),
        init: Some(Expr::Call(CallExpr::on(receiver, operation, args))),
    });
}

/// Append `<type> <name> = (<type>) context.getVariable("<name>");`,
/// reading the variable out of the ambient execution context under its
/// own name.
pub fn emit_context_assignment(body: &mut Vec<Stmt>, variable: &Variable) {
    emit_context_assignment_named(body, &variable.name, variable);
}

/// Context assignment with an explicit target local name; the context
/// lookup uses the target name.
pub fn emit_context_assignment_named(body: &mut Vec<Stmt>, target: &str, variable: &Variable) {
    let ty = TypeRef::parse(&variable.type_name);
    body.push(Stmt::Local {
        ty: ty.clone(),
        name: target.to_string(),
        init: Some(Expr::Cast {
            ty,
            expr: Box::new(Expr::Call(CallExpr::on(
                CONTEXT_VAR,
                "getVariable",
                vec![Expr::str(target)],
            ))),
        }),
    });
}

/// Append `<type> <local> = (<type>) model.get<Capitalized(name)>();`,
/// reading the variable from the structured data model through its
/// capitalized accessor.
pub fn emit_model_assignment(body: &mut Vec<Stmt>, variable: &Variable, local: &str) {
    let ty = TypeRef::parse(&variable.type_name);
    let accessor = format!("get{}", capitalize(&variable.name));
    body.push(Stmt::Local {
        ty: ty.clone(),
        name: local.to_string(),
        init: Some(Expr::Cast {
            ty,
            expr: Box::new(Expr::Call(CallExpr::on("model", accessor, vec![]))),
        }),
    });
}

/// Emit one `workParameter(key, value)` call per work item parameter.
/// Parameters without a value are implementation references resolved
/// elsewhere and are skipped.
pub fn emit_work_item_parameters(body: &mut Vec<Stmt>, work: &WorkItem, receiver: &str) {
    for (key, value) in &work.parameters {
        let Some(value) = value else {
            continue;
        };
        emit_call(
            body,
            receiver,
            "workParameter",
            vec![Expr::str(key.clone()), Expr::str(stringify(value))],
        );
    }
}

/// Emit one `inMapping(key, value)` call per input mapping and one
/// `outMapping(key, value)` call per output mapping, preserving the
/// mapping collections' iteration order.
pub fn emit_mappings(body: &mut Vec<Stmt>, node: &ProcessNode, receiver: &str) {
    for (key, value) in &node.in_mappings {
        emit_call(
            body,
            receiver,
            "inMapping",
            vec![Expr::str(key.clone()), Expr::str(value.clone())],
        );
    }
    for (key, value) in &node.out_mappings {
        emit_call(
            body,
            receiver,
            "outMapping",
            vec![Expr::str(key.clone()), Expr::str(value.clone())],
        );
    }
}

/// Emit one `metaData(key, value)` call per metadata entry carrying a
/// boolean, integer, or string value. Other value types are not
/// representable in the construction protocol and are omitted.
pub fn emit_metadata(body: &mut Vec<Stmt>, metadata: &IndexMap<String, Value>, receiver: &str) {
    emit_metadata_except(body, metadata, receiver, &[]);
}

/// As [`emit_metadata`], omitting entries a visitor already consumed as
/// kind-specific configuration.
pub fn emit_metadata_except(
    body: &mut Vec<Stmt>,
    metadata: &IndexMap<String, Value>,
    receiver: &str,
    consumed: &[&str],
) {
    for (key, value) in metadata {
        if consumed.contains(&key.as_str()) {
            continue;
        }
        if let Some(literal) = metadata_literal(value) {
            emit_call(
                body,
                receiver,
                "metaData",
                vec![Expr::str(key.clone()), literal],
            );
        }
    }
}

fn metadata_literal(value: &Value) -> Option<Expr> {
    match value {
        Value::Bool(b) => Some(Expr::Bool(*b)),
        Value::Number(n) => n.as_i64().map(|i| match i32::try_from(i) {
            Ok(v) => Expr::Int(v),
            Err(_) => Expr::Long(i),
        }),
        Value::String(s) => Some(Expr::str(s.clone())),
        _ => None,
    }
}

/// Extract a bare variable name from a property-access expression
/// shorthand: `#{order.id}` yields `order`. Anything else is returned
/// unchanged.
pub fn extract_variable_from_expression(expression: &str) -> &str {
    if let Some(rest) = expression.strip_prefix("#{")
        && let Some(dot) = rest.find('.')
    {
        return &rest[..dot];
    }
    expression
}

/// Capitalize the first character of an accessor name.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::printer::render_statements;
    use serde_json::json;

    #[test]
    fn test_emit_call_returns_decoratable_handle() {
        let mut body = Vec::new();
        emit_call(&mut body, "factory", "connection", vec![Expr::Long(1)])
            .arg(Expr::Long(2));

        assert_eq!(render_statements(&body), "factory.connection(1L, 2L);\n");
    }

    #[test]
    fn test_context_assignment_shape() {
        let mut body = Vec::new();
        let variable = Variable::new("order", "org.acme.Order");
        emit_context_assignment(&mut body, &variable);

        assert_eq!(
            render_statements(&body),
            "org.acme.Order order = (org.acme.Order) context.getVariable(\"order\");\n"
        );
    }

    #[test]
    fn test_context_assignment_uses_target_name_for_lookup() {
        let mut body = Vec::new();
        let variable = Variable::new("order", "org.acme.Order");
        emit_context_assignment_named(&mut body, "localOrder", &variable);

        assert_eq!(
            render_statements(&body),
            "org.acme.Order localOrder = (org.acme.Order) context.getVariable(\"localOrder\");\n"
        );
    }

    #[test]
    fn test_model_assignment_uses_capitalized_accessor() {
        let mut body = Vec::new();
        let variable = Variable::new("order", "org.acme.Order");
        emit_model_assignment(&mut body, &variable, "order");

        assert_eq!(
            render_statements(&body),
            "org.acme.Order order = (org.acme.Order) model.getOrder();\n"
        );
    }

    #[test]
    fn test_work_item_parameters_skip_absent_values() {
        let mut body = Vec::new();
        let mut work = WorkItem {
            name: "Log".to_string(),
            parameters: IndexMap::new(),
        };
        work.parameters.insert("k1".to_string(), Some(json!("v1")));
        work.parameters.insert("k2".to_string(), None);
        emit_work_item_parameters(&mut body, &work, "workItemNode1");

        assert_eq!(
            render_statements(&body),
            "workItemNode1.workParameter(\"k1\", \"v1\");\n"
        );
    }

    #[test]
    fn test_work_item_parameters_stringify_scalars() {
        let mut body = Vec::new();
        let mut work = WorkItem {
            name: "Log".to_string(),
            parameters: IndexMap::new(),
        };
        work.parameters.insert("retries".to_string(), Some(json!(3)));
        emit_work_item_parameters(&mut body, &work, "w");

        assert_eq!(render_statements(&body), "w.workParameter(\"retries\", \"3\");\n");
    }

    #[test]
    fn test_mappings_preserve_declaration_order() {
        let mut node = ProcessNode {
            kind: NodeKind::Task,
            id: 7,
            name: None,
            in_mappings: IndexMap::new(),
            out_mappings: IndexMap::new(),
            work: None,
            metadata: IndexMap::new(),
        };
        node.in_mappings.insert("zeta".to_string(), "z".to_string());
        node.in_mappings.insert("alpha".to_string(), "a".to_string());
        node.out_mappings.insert("result".to_string(), "r".to_string());

        let mut body = Vec::new();
        emit_mappings(&mut body, &node, "w");

        assert_eq!(
            render_statements(&body),
            "w.inMapping(\"zeta\", \"z\");\nw.inMapping(\"alpha\", \"a\");\nw.outMapping(\"result\", \"r\");\n"
        );
    }

    #[test]
    fn test_metadata_filters_unrepresentable_values() {
        let mut metadata = IndexMap::new();
        metadata.insert("a".to_string(), json!(true));
        metadata.insert("b".to_string(), json!(3));
        metadata.insert("c".to_string(), json!("x"));
        metadata.insert("d".to_string(), json!(3.14));

        let mut body = Vec::new();
        emit_metadata(&mut body, &metadata, "node");

        let rendered = render_statements(&body);
        assert_eq!(body.len(), 3, "float entry must be omitted");
        assert!(rendered.contains("node.metaData(\"a\", true);"));
        assert!(rendered.contains("node.metaData(\"b\", 3);"));
        assert!(rendered.contains("node.metaData(\"c\", \"x\");"));
    }

    #[test]
    fn test_metadata_wide_integers_emit_long_literals() {
        let mut metadata = IndexMap::new();
        metadata.insert("big".to_string(), json!(5_000_000_000i64));

        let mut body = Vec::new();
        emit_metadata(&mut body, &metadata, "node");

        assert_eq!(render_statements(&body), "node.metaData(\"big\", 5000000000L);\n");
    }

    #[test]
    fn test_extract_variable_from_expression() {
        assert_eq!(extract_variable_from_expression("#{order.id}"), "order");
        assert_eq!(extract_variable_from_expression("order"), "order");
        assert_eq!(extract_variable_from_expression("#{order}"), "#{order}");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("order"), "Order");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("x"), "X");
    }

    #[test]
    fn test_registry_dispatches_by_kind() {
        let registry = NodeVisitorRegistry::new();
        let node = ProcessNode {
            kind: NodeKind::Start,
            id: 1,
            name: None,
            in_mappings: IndexMap::new(),
            out_mappings: IndexMap::new(),
            work: None,
            metadata: IndexMap::new(),
        };
        let scope = VariableScope::default();
        let mut meta = ProcessMetadata::default();
        let mut body = Vec::new();
        registry.visit(&node, &mut body, &scope, &mut meta);

        let rendered = render_statements(&body);
        assert!(rendered.contains("factory.startNode(1L)"));
        assert!(rendered.contains("startNode1.done();"));
    }

    #[test]
    fn test_registry_ignores_unregistered_kinds() {
        let registry = NodeVisitorRegistry::empty();
        let node = ProcessNode {
            kind: NodeKind::Start,
            id: 1,
            name: None,
            in_mappings: IndexMap::new(),
            out_mappings: IndexMap::new(),
            work: None,
            metadata: IndexMap::new(),
        };
        let scope = VariableScope::default();
        let mut meta = ProcessMetadata::default();
        let mut body = Vec::new();
        registry.visit(&node, &mut body, &scope, &mut meta);

        assert!(body.is_empty(), "unknown kinds must emit nothing");
    }
}
