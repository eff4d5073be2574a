// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Embedded skeleton templates.
//!
//! Templates are compiled into the binary as immutable text and parsed
//! fresh on every generation call, so concurrent generations never share
//! a mutable tree.

/// Name of the resource skeleton, used in error reporting.
pub const RESOURCE_TEMPLATE_NAME: &str = "RestResourceTemplate";

/// Name of the user-task skeleton, used in error reporting.
pub const USER_TASK_TEMPLATE_NAME: &str = "RestResourceUserTaskTemplate";

/// The REST resource skeleton.
pub fn resource_template() -> &'static str {
    include_str!("RestResourceTemplate.java")
}

/// The user-task endpoint skeleton cloned per user task.
pub fn user_task_template() -> &'static str {
    include_str!("RestResourceUserTaskTemplate.java")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::parser;

    #[test]
    fn test_resource_template_parses() {
        let unit = parser::parse(resource_template()).expect("resource template must parse");
        let decl = unit.primary_type().expect("resource template declares a class");
        assert_eq!(decl.name, "$Clazz$");
        assert!(
            decl.members.len() >= 6,
            "resource template carries fields and endpoint methods"
        );
    }

    #[test]
    fn test_user_task_template_parses() {
        let unit = parser::parse(user_task_template()).expect("user task template must parse");
        let decl = unit.primary_type().expect("user task template declares a class");
        assert!(decl.members.iter().all(|m| matches!(
            m,
            crate::tree::Member::Method(_)
        )));
    }
}
