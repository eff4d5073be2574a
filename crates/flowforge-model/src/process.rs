// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Process definitions, variables, and variable scopes.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Visibility marker for processes that may be addressed from outside
/// the deployment (case-insensitive comparison, matching authoring tools
/// that emit either `Public` or `public`).
pub const PUBLIC_VISIBILITY: &str = "Public";

/// A complete process definition: identity, visibility, metadata, and the
/// variable scope shared by all nodes of the graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessDefinition {
    /// Fully qualified process identifier, e.g. `demo.Order`.
    pub id: String,

    /// Human-readable process name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Package the generated artifacts belong to.
    pub package_name: String,

    /// Process visibility (`Public` or `Private`).
    pub visibility: String,

    /// Whether the process can be started through the generated creation
    /// endpoint.
    #[serde(default)]
    pub startable: bool,

    /// Arbitrary string-keyed process metadata. Values are JSON scalars or
    /// structures; consumers ignore value types they do not understand.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub metadata: IndexMap<String, Value>,

    /// Variables declared at process level.
    #[serde(default)]
    pub variable_scope: VariableScope,
}

impl ProcessDefinition {
    /// The simple process name: everything after the last `.` of the id.
    pub fn simple_name(&self) -> &str {
        match self.id.rfind('.') {
            Some(idx) => &self.id[idx + 1..],
            None => &self.id,
        }
    }

    /// Whether the process is publicly visible.
    pub fn is_public(&self) -> bool {
        self.visibility.eq_ignore_ascii_case(PUBLIC_VISIBILITY)
    }

    /// A metadata entry rendered as a string, if present and textual.
    pub fn metadata_string(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(Value::as_str)
    }
}

/// A process variable: a name bound to a declared type descriptor.
///
/// The type descriptor is an opaque string resolved by the compiler's
/// symbol resolver; the model never interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    /// Variable name, unique within its scope.
    pub name: String,

    /// Declared type descriptor, e.g. `org.acme.Order` or
    /// `java.util.List<org.acme.Item>`.
    #[serde(rename = "type")]
    pub type_name: String,
}

impl Variable {
    /// Create a variable from a name and type descriptor.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// An ordered collection of process variables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VariableScope {
    /// The declared variables, in declaration order.
    #[serde(default)]
    pub variables: Vec<Variable>,
}

impl VariableScope {
    /// Look up a variable by name.
    pub fn find(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order_process() -> ProcessDefinition {
        ProcessDefinition {
            id: "demo.Order".to_string(),
            name: Some("Order".to_string()),
            package_name: "demo".to_string(),
            visibility: "Public".to_string(),
            startable: true,
            metadata: IndexMap::new(),
            variable_scope: VariableScope::default(),
        }
    }

    #[test]
    fn test_simple_name_strips_package_segments() {
        let process = order_process();
        assert_eq!(process.simple_name(), "Order");
    }

    #[test]
    fn test_simple_name_without_package() {
        let mut process = order_process();
        process.id = "Order".to_string();
        assert_eq!(process.simple_name(), "Order");
    }

    #[test]
    fn test_visibility_comparison_ignores_case() {
        let mut process = order_process();
        process.visibility = "public".to_string();
        assert!(process.is_public(), "lowercase visibility should be public");

        process.visibility = "Private".to_string();
        assert!(!process.is_public(), "private process is not public");
    }

    #[test]
    fn test_variable_scope_lookup() {
        let scope = VariableScope {
            variables: vec![
                Variable::new("order", "demo.Order"),
                Variable::new("approver", "java.lang.String"),
            ],
        };
        assert_eq!(scope.find("approver").map(|v| v.type_name.as_str()), Some("java.lang.String"));
        assert!(scope.find("missing").is_none());
    }
}
