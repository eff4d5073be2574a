// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Intermediate event node visitor.
//!
//! Consumed metadata entries: `EventType` (defaulting to `signal`),
//! `SignalName`, and `TriggerRef` (a variable reference, possibly in
//! `#{variable.path}` shorthand). Discovered signals are recorded in the
//! process metadata with the payload type of the receiving variable.

use flowforge_model::{ProcessNode, VariableScope};

use super::{
    ProcessMetadata, emit_call, emit_call_with_binding, emit_metadata_except,
    extract_variable_from_expression,
};
use crate::tree::{Expr, Stmt, TypeRef};

/// Emit construction statements for an event node.
pub fn visit(
    factory: &str,
    node: &ProcessNode,
    body: &mut Vec<Stmt>,
    scope: &VariableScope,
    metadata: &mut ProcessMetadata,
) {
    let binding = format!("eventNode{}", node.id);
    emit_call_with_binding(
        body,
        factory,
        TypeRef::new("EventNodeFactory"),
        &binding,
        "eventNode",
        vec![Expr::Long(node.id)],
    );
    emit_call(body, &binding, "name", vec![Expr::str(node.name_or("Event"))]);

    let event_type = node.metadata_string("EventType").unwrap_or("signal");
    emit_call(body, &binding, "eventType", vec![Expr::str(event_type)]);

    let trigger_variable = node
        .metadata_string("TriggerRef")
        .map(extract_variable_from_expression);
    if let Some(variable) = trigger_variable {
        emit_call(body, &binding, "variableName", vec![Expr::str(variable)]);
    }

    if let Some(signal) = node.metadata_string("SignalName") {
        let payload = trigger_variable
            .and_then(|name| scope.find(name))
            .map(|variable| variable.type_name.clone());
        metadata.signals.insert(signal.to_string(), payload);
    }

    emit_metadata_except(
        body,
        &node.metadata,
        &binding,
        &["EventType", "SignalName", "TriggerRef"],
    );
    emit_call(body, &binding, "done", vec![]);
}
