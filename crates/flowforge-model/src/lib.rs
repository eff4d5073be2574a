// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Flowforge Model - Process Graph Definitions
//!
//! This crate defines the process graph model consumed by the flowforge
//! compiler: process definitions, typed nodes, variables, work items, and
//! the descriptors for user tasks and signals.
//!
//! The model is read-only from the compiler's point of view. Authoring
//! tooling builds these values (typically by deserializing process JSON);
//! `flowforge-codegen` only walks them and emits source artifacts.
//!
//! # Modules
//!
//! - [`process`]: Process definitions, variables, and variable scopes
//! - [`node`]: Typed process nodes, node kinds, and work items
//! - [`descriptors`]: User task and signal descriptors consumed by
//!   resource generation

#![deny(missing_docs)]

/// User task and signal descriptors consumed by resource generation.
pub mod descriptors;

/// Typed process nodes, node kinds, and work items.
pub mod node;

/// Process definitions, variables, and variable scopes.
pub mod process;

pub use descriptors::{SignalMap, UserTaskDescriptor};
pub use node::{NodeKind, ProcessNode, WorkItem};
pub use process::{PUBLIC_VISIBILITY, ProcessDefinition, Variable, VariableScope};
