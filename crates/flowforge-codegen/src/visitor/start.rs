// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Start node visitor.
//!
//! A start node carrying a `TriggerRef` metadata entry is signal-started:
//! the trigger is recorded in the process metadata so resource generation
//! can synthesize a matching endpoint.

use flowforge_model::{ProcessNode, VariableScope};

use super::{ProcessMetadata, emit_call, emit_call_with_binding, emit_metadata_except};
use crate::tree::{Expr, Stmt, TypeRef};

/// Emit construction statements for a start node.
pub fn visit(
    factory: &str,
    node: &ProcessNode,
    body: &mut Vec<Stmt>,
    scope: &VariableScope,
    metadata: &mut ProcessMetadata,
) {
    let binding = format!("startNode{}", node.id);
    emit_call_with_binding(
        body,
        factory,
        TypeRef::new("StartNodeFactory"),
        &binding,
        "startNode",
        vec![Expr::Long(node.id)],
    );
    emit_call(body, &binding, "name", vec![Expr::str(node.name_or("Start"))]);

    if let Some(trigger) = node.metadata_string("TriggerRef") {
        let mapping = node
            .out_mappings
            .keys()
            .next()
            .map(String::as_str)
            .unwrap_or("");
        emit_call(
            body,
            &binding,
            "trigger",
            vec![Expr::str(trigger), Expr::str(mapping)],
        );

        let payload = node
            .out_mappings
            .values()
            .next()
            .and_then(|target| scope.find(target))
            .map(|variable| variable.type_name.clone());
        metadata.signals.insert(trigger.to_string(), payload);
    }

    emit_metadata_except(body, &node.metadata, &binding, &["TriggerRef"]);
    emit_call(body, &binding, "done", vec![]);
}
