// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Human task node visitor.
//!
//! Human tasks are work item nodes with the fixed `Human Task` work name.
//! Task-level endpoint metadata (the user-task descriptors) is supplied by
//! the graph model, not synthesized here.

use flowforge_model::{ProcessNode, VariableScope};

use super::{
    ProcessMetadata, emit_call, emit_call_with_binding, emit_mappings, emit_metadata,
    emit_work_item_parameters,
};
use crate::tree::{Expr, Stmt, TypeRef};

const WORK_NAME: &str = "Human Task";

/// Emit construction statements for a human task node.
pub fn visit(
    factory: &str,
    node: &ProcessNode,
    body: &mut Vec<Stmt>,
    _scope: &VariableScope,
    _metadata: &mut ProcessMetadata,
) {
    let binding = format!("humanTaskNode{}", node.id);
    emit_call_with_binding(
        body,
        factory,
        TypeRef::new("HumanTaskNodeFactory"),
        &binding,
        "humanTaskNode",
        vec![Expr::Long(node.id)],
    );
    emit_call(body, &binding, "name", vec![Expr::str(node.name_or("Task"))]);
    emit_call(body, &binding, "workName", vec![Expr::str(WORK_NAME)]);

    if let Some(work) = &node.work {
        emit_work_item_parameters(body, work, &binding);
    }

    emit_mappings(body, node, &binding);
    emit_metadata(body, &node.metadata, &binding);
    emit_call(body, &binding, "done", vec![]);
}
