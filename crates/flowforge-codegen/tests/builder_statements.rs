// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Integration tests for process-builder statement emission.
//!
//! Walks a small process graph through the visitor registry and checks
//! the emitted construction statements as source text, the way the
//! process-builder artifact consumes them.

use indexmap::IndexMap;
use serde_json::json;

use flowforge_codegen::tree::printer::render_statements;
use flowforge_codegen::visitor::ProcessMetadata;
use flowforge_codegen::{NodeKind, NodeVisitorRegistry, ProcessNode, Variable, VariableScope, WorkItem};

fn node(kind: NodeKind, id: i64, name: &str) -> ProcessNode {
    ProcessNode {
        kind,
        id,
        name: Some(name.to_string()),
        in_mappings: IndexMap::new(),
        out_mappings: IndexMap::new(),
        work: None,
        metadata: IndexMap::new(),
    }
}

#[test]
fn test_walking_a_three_node_process() {
    let registry = NodeVisitorRegistry::new();
    let scope = VariableScope {
        variables: vec![Variable::new("order", "demo.OrderModel")],
    };
    let mut metadata = ProcessMetadata::default();
    let mut body = Vec::new();

    let start = node(NodeKind::Start, 1, "Start");

    let mut log = node(NodeKind::Task, 2, "Log Order");
    let mut parameters = IndexMap::new();
    parameters.insert("Message".to_string(), Some(json!("order received")));
    parameters.insert("Handler".to_string(), None);
    log.work = Some(WorkItem {
        name: "Log".to_string(),
        parameters,
    });
    log.in_mappings.insert("input".to_string(), "order".to_string());

    let end = node(NodeKind::End, 3, "End");

    registry.visit(&start, &mut body, &scope, &mut metadata);
    registry.visit(&log, &mut body, &scope, &mut metadata);
    registry.visit(&end, &mut body, &scope, &mut metadata);

    let rendered = render_statements(&body);
    let expected_order = [
        "StartNodeFactory startNode1 = factory.startNode(1L);",
        "startNode1.done();",
        "WorkItemNodeFactory workItemNode2 = factory.workItemNode(2L);",
        "workItemNode2.workParameter(\"Message\", \"order received\");",
        "workItemNode2.inMapping(\"input\", \"order\");",
        "workItemNode2.done();",
        "EndNodeFactory endNode3 = factory.endNode(3L);",
        "endNode3.done();",
    ];
    let mut last = 0;
    for needle in expected_order {
        let idx = rendered
            .find(needle)
            .unwrap_or_else(|| panic!("missing statement '{}' in:\n{}", needle, rendered));
        assert!(idx >= last, "statement '{}' out of order in:\n{}", needle, rendered);
        last = idx;
    }
    assert!(
        !rendered.contains("Handler"),
        "absent work parameter must be skipped"
    );
}

#[test]
fn test_mapping_order_is_observable_in_output() {
    let registry = NodeVisitorRegistry::new();
    let scope = VariableScope::default();

    let emit = |keys: &[&str]| {
        let mut task = node(NodeKind::Task, 2, "Task");
        for key in keys {
            task.in_mappings.insert((*key).to_string(), "order".to_string());
        }
        let mut body = Vec::new();
        let mut metadata = ProcessMetadata::default();
        registry.visit(&task, &mut body, &scope, &mut metadata);
        render_statements(&body)
    };

    let forward = emit(&["a", "b"]);
    let reversed = emit(&["b", "a"]);

    assert_ne!(forward, reversed, "in-mapping order is part of the output");
    assert!(forward.find("\"a\"").unwrap() < forward.find("\"b\"").unwrap());
    assert!(reversed.find("\"b\"").unwrap() < reversed.find("\"a\"").unwrap());
}

#[test]
fn test_event_node_feeds_signal_map_for_resource_generation() {
    let registry = NodeVisitorRegistry::new();
    let scope = VariableScope {
        variables: vec![Variable::new("order", "demo.OrderModel")],
    };
    let mut metadata = ProcessMetadata::default();
    let mut body = Vec::new();

    let mut event = node(NodeKind::Event, 4, "Cancel Requested");
    event.metadata.insert("SignalName".to_string(), json!("cancel"));
    event
        .metadata
        .insert("TriggerRef".to_string(), json!("#{order.state}"));

    registry.visit(&event, &mut body, &scope, &mut metadata);

    assert_eq!(
        metadata.signals.get("cancel"),
        Some(&Some("demo.OrderModel".to_string())),
        "event visitors record signals with the receiving variable's type"
    );
    assert!(render_statements(&body).contains("eventNode4.variableName(\"order\");"));
}

#[test]
fn test_custom_visitor_registration_overrides_default() {
    let mut registry = NodeVisitorRegistry::new();
    registry.register(NodeKind::End, |_, _, _, _, _| {});

    let end = node(NodeKind::End, 3, "End");
    let mut body = Vec::new();
    let mut metadata = ProcessMetadata::default();
    registry.visit(&end, &mut body, &VariableScope::default(), &mut metadata);

    assert!(body.is_empty(), "registered override replaces the default visitor");
}
