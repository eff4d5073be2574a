// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Work item task node visitor.

use flowforge_model::{ProcessNode, VariableScope};

use super::{
    ProcessMetadata, emit_call, emit_call_with_binding, emit_mappings, emit_metadata,
    emit_work_item_parameters,
};
use crate::tree::{Expr, Stmt, TypeRef};

/// Emit construction statements for a work item task node: the work name,
/// its parameters, the node's data mappings, and its metadata.
pub fn visit(
    factory: &str,
    node: &ProcessNode,
    body: &mut Vec<Stmt>,
    _scope: &VariableScope,
    _metadata: &mut ProcessMetadata,
) {
    let binding = format!("workItemNode{}", node.id);
    emit_call_with_binding(
        body,
        factory,
        TypeRef::new("WorkItemNodeFactory"),
        &binding,
        "workItemNode",
        vec![Expr::Long(node.id)],
    );

    let default_name = node.work.as_ref().map(|w| w.name.as_str()).unwrap_or("Task");
    emit_call(body, &binding, "name", vec![Expr::str(node.name_or(default_name))]);

    if let Some(work) = &node.work {
        emit_call(body, &binding, "workName", vec![Expr::str(work.name.clone())]);
        emit_work_item_parameters(body, work, &binding);
    }

    emit_mappings(body, node, &binding);
    emit_metadata(body, &node.metadata, &binding);
    emit_call(body, &binding, "done", vec![]);
}
