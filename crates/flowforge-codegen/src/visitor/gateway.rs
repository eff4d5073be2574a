// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Split and join gateway visitors.
//!
//! The gateway semantics travel in the `gatewayType` metadata entry as a
//! numeric code (1 = AND, 2 = XOR, 3 = OR), defaulting to exclusive.

use flowforge_model::{ProcessNode, VariableScope};

use super::{ProcessMetadata, emit_call, emit_call_with_binding, emit_metadata_except};
use crate::tree::{Expr, Stmt, TypeRef};

const DEFAULT_GATEWAY_TYPE: i32 = 2;

/// Emit construction statements for a diverging (split) gateway.
pub fn visit_split(
    factory: &str,
    node: &ProcessNode,
    body: &mut Vec<Stmt>,
    _scope: &VariableScope,
    _metadata: &mut ProcessMetadata,
) {
    emit_gateway(factory, node, body, "splitNode", "SplitFactory", "Split");
}

/// Emit construction statements for a converging (join) gateway.
pub fn visit_join(
    factory: &str,
    node: &ProcessNode,
    body: &mut Vec<Stmt>,
    _scope: &VariableScope,
    _metadata: &mut ProcessMetadata,
) {
    emit_gateway(factory, node, body, "joinNode", "JoinFactory", "Join");
}

fn emit_gateway(
    factory: &str,
    node: &ProcessNode,
    body: &mut Vec<Stmt>,
    operation: &str,
    factory_type: &str,
    default_name: &str,
) {
    let binding = format!("{}{}", operation, node.id);
    emit_call_with_binding(
        body,
        factory,
        TypeRef::new(factory_type),
        &binding,
        operation,
        vec![Expr::Long(node.id)],
    );
    emit_call(
        body,
        &binding,
        "name",
        vec![Expr::str(node.name_or(default_name))],
    );

    let gateway_type = node
        .metadata
        .get("gatewayType")
        .and_then(serde_json::Value::as_i64)
        .and_then(|v| i32::try_from(v).ok())
        .unwrap_or(DEFAULT_GATEWAY_TYPE);
    emit_call(body, &binding, "type", vec![Expr::Int(gateway_type)]);

    emit_metadata_except(body, &node.metadata, &binding, &["gatewayType"]);
    emit_call(body, &binding, "done", vec![]);
}
