// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! End node visitor.

use flowforge_model::{ProcessNode, VariableScope};

use super::{ProcessMetadata, emit_call, emit_call_with_binding, emit_metadata_except};
use crate::tree::{Expr, Stmt, TypeRef};

/// Emit construction statements for an end node. Termination defaults to
/// true unless the node's `terminate` metadata entry says otherwise.
pub fn visit(
    factory: &str,
    node: &ProcessNode,
    body: &mut Vec<Stmt>,
    _scope: &VariableScope,
    _metadata: &mut ProcessMetadata,
) {
    let binding = format!("endNode{}", node.id);
    emit_call_with_binding(
        body,
        factory,
        TypeRef::new("EndNodeFactory"),
        &binding,
        "endNode",
        vec![Expr::Long(node.id)],
    );
    emit_call(body, &binding, "name", vec![Expr::str(node.name_or("End"))]);

    let terminate = node.metadata_bool("terminate").unwrap_or(true);
    emit_call(body, &binding, "terminate", vec![Expr::Bool(terminate)]);

    emit_metadata_except(body, &node.metadata, &binding, &["terminate"]);
    emit_call(body, &binding, "done", vec![]);
}
