// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Sub-process (call activity) node visitor.
//!
//! Consumed metadata entries: `processId` (the callee), `independent`,
//! and `waitForCompletion`.

use flowforge_model::{ProcessNode, VariableScope};

use super::{
    ProcessMetadata, emit_call, emit_call_with_binding, emit_mappings, emit_metadata_except,
};
use crate::tree::{Expr, Stmt, TypeRef};

/// Emit construction statements for a sub-process node.
pub fn visit(
    factory: &str,
    node: &ProcessNode,
    body: &mut Vec<Stmt>,
    _scope: &VariableScope,
    _metadata: &mut ProcessMetadata,
) {
    let binding = format!("subProcessNode{}", node.id);
    emit_call_with_binding(
        body,
        factory,
        TypeRef::new("SubProcessNodeFactory"),
        &binding,
        "subProcessNode",
        vec![Expr::Long(node.id)],
    );
    emit_call(
        body,
        &binding,
        "name",
        vec![Expr::str(node.name_or("Call Activity"))],
    );

    if let Some(process_id) = node.metadata_string("processId") {
        emit_call(body, &binding, "processId", vec![Expr::str(process_id)]);
    }
    let independent = node.metadata_bool("independent").unwrap_or(false);
    emit_call(body, &binding, "independent", vec![Expr::Bool(independent)]);
    let wait = node.metadata_bool("waitForCompletion").unwrap_or(true);
    emit_call(body, &binding, "waitForCompletion", vec![Expr::Bool(wait)]);

    emit_mappings(body, node, &binding);
    emit_metadata_except(
        body,
        &node.metadata,
        &binding,
        &["processId", "independent", "waitForCompletion"],
    );
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
    fn test_sub_process_node_configuration() {
        let mut node = ProcessNode {
            kind: NodeKind::SubProcess,
            id: 6,
            name: None,
            in_mappings: IndexMap::new(),
            out_mappings: IndexMap::new(),
            work: None,
            metadata: IndexMap::new(),
        };
        node.metadata.insert("processId".to_string(), json!("demo.Shipping"));
        node.metadata.insert("waitForCompletion".to_string(), json!(false));
        node.in_mappings.insert("order".to_string(), "order".to_string());

        let mut body = Vec::new();
        visit(
            "factory",
            &node,
            &mut body,
            &VariableScope::default(),
            &mut ProcessMetadata::default(),
        );

        let rendered = render_statements(&body);
        assert!(rendered.contains("subProcessNode6.processId(\"demo.Shipping\");"));
        assert!(rendered.contains("subProcessNode6.independent(false);"));
        assert!(rendered.contains("subProcessNode6.waitForCompletion(false);"));
        assert!(rendered.contains("subProcessNode6.inMapping(\"order\", \"order\");"));
        assert!(
            !rendered.contains("metaData(\"processId\""),
            "consumed entries must not reappear as generic metadata"
        );
    }
}
