// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Action node visitor.
//!
//! The action script travels in the node's `Action` metadata entry and is
//! reproduced verbatim as the action body of the constructed node.

use flowforge_model::{ProcessNode, VariableScope};

use super::{ProcessMetadata, emit_call, emit_call_with_binding, emit_metadata_except};
use crate::tree::{Expr, Stmt, TypeRef};

const SCRIPT_DIALECT: &str = "java";

/// Emit construction statements for an action node.
pub fn visit(
    factory: &str,
    node: &ProcessNode,
    body: &mut Vec<Stmt>,
    _scope: &VariableScope,
    _metadata: &mut ProcessMetadata,
) {
    let binding = format!("actionNode{}", node.id);
    emit_call_with_binding(
        body,
        factory,
        TypeRef::new("ActionNodeFactory"),
        &binding,
        "actionNode",
        vec![Expr::Long(node.id)],
    );
    emit_call(body, &binding, "name", vec![Expr::str(node.name_or("Script"))]);

    if let Some(script) = node.metadata_string("Action") {
        emit_call(
            body,
            &binding,
            "action",
            vec![Expr::str(SCRIPT_DIALECT), Expr::str(script)],
        );
    }

    emit_metadata_except(body, &node.metadata, &binding, &["Action"]);
    emit_call(body, &binding, "done", vec![]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::printer::render_statements;
    use flowforge_model::NodeKind;
    use indexmap::IndexMap;
    use serde_json::json;

    #[test]
    fn test_action_node_reproduces_script() {
        let mut node = ProcessNode {
            kind: NodeKind::Action,
            id: 3,
            name: None,
            in_mappings: IndexMap::new(),
            out_mappings: IndexMap::new(),
            work: None,
            metadata: IndexMap::new(),
        };
        node.metadata
            .insert("Action".to_string(), json!("System.out.println(order);"));

        let mut body = Vec::new();
        visit(
            "factory",
            &node,
            &mut body,
            &VariableScope::default(),
            &mut ProcessMetadata::default(),
        );

        let rendered = render_statements(&body);
        assert!(rendered.contains(
            "actionNode3.action(\"java\", \"System.out.println(order);\");"
        ));
        assert!(
            !rendered.contains("metaData(\"Action\""),
            "consumed script entry must not reappear as generic metadata"
        );
    }
}
