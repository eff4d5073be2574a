// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Typed process nodes, node kinds, and work items.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The kind of a process graph node.
///
/// The set is closed at the model level; compiler extensibility lives in
/// the visitor registration table, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum NodeKind {
    /// Process entry point.
    Start,
    /// Process termination point.
    End,
    /// Script/action execution node.
    Action,
    /// Automated work item task.
    Task,
    /// Human task work item.
    HumanTask,
    /// Invocation of another process.
    SubProcess,
    /// Diverging gateway.
    Split,
    /// Converging gateway.
    Join,
    /// Intermediate event node (signal reception).
    Event,
}

/// One vertex of the process graph.
///
/// Kind-specific configuration travels in `metadata`; the compiler's
/// per-kind visitors know which entries they consume.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessNode {
    /// Node kind, driving visitor dispatch.
    pub kind: NodeKind,

    /// Numeric node identifier, unique within the process.
    pub id: i64,

    /// Display name shown in generated construction calls.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Input data mappings (source variable -> node parameter), in
    /// declaration order. Order is observable in generated output.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub in_mappings: IndexMap<String, String>,

    /// Output data mappings (node result -> target variable), in
    /// declaration order.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub out_mappings: IndexMap<String, String>,

    /// Work item definition for task-like nodes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work: Option<WorkItem>,

    /// Arbitrary node metadata. Only boolean, integer, and string values
    /// are reproduced in generated code; everything else is ignored.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub metadata: IndexMap<String, Value>,
}

impl ProcessNode {
    /// The display name, falling back to the given default for unnamed
    /// nodes.
    pub fn name_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(default)
    }

    /// A metadata entry rendered as a string, if present and textual.
    pub fn metadata_string(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(Value::as_str)
    }

    /// A metadata entry as a boolean, if present and boolean.
    pub fn metadata_bool(&self, key: &str) -> Option<bool> {
        self.metadata.get(key).and_then(Value::as_bool)
    }
}

/// A work item attached to a task node: a work name plus parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItem {
    /// Registered work name, e.g. `Log` or `Human Task`.
    pub name: String,

    /// Work parameters in declaration order. Absent values mark
    /// parameters resolved elsewhere (implementation references) and are
    /// skipped during emission.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub parameters: IndexMap<String, Option<Value>>,
}
