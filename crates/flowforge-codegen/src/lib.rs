// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Flowforge Codegen - Process Compilation to Service Artifacts
//!
//! This crate compiles process definitions (graphs of typed nodes) into
//! source artifacts: the statement sequence of a process-construction
//! routine and a REST-style resource definition synthesized from a
//! skeleton template.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Process Compilation Pipeline                     │
//! └─────────────────────────────────────────────────────────────────────┘
//!
//!     ┌─────────────┐      ┌──────────────┐      ┌─────────────┐
//!     │   Process   │      │   Artifact   │      │  Generated  │
//!     │  Definition │─────▶│     Tree     │─────▶│   Source    │
//!     │   (model)   │      │  (rewriting) │      │   (files)   │
//!     └─────────────┘      └──────────────┘      └─────────────┘
//!           │                     ▲
//!           ▼                     │
//!     ┌─────────────┐      ┌──────────────┐
//!     │    Node     │      │   Skeleton   │
//!     │  Visitors   │      │  Templates   │
//!     └─────────────┘      └──────────────┘
//! ```
//!
//! # Compilation
//!
//! 1. **Visit**: walk the process graph; each node kind's visitor appends
//!    factory-style construction statements to the builder body
//! 2. **Load**: parse the resource skeleton into a mutable syntax tree
//! 3. **Transform**: run the ordered pass pipeline (rename, signal
//!    endpoints, security, user tasks, interpolation, wiring, pruning,
//!    validation)
//! 4. **Assemble**: order members deterministically and serialize
//!
//! Generation is pure and synchronous: each call owns a private tree, so
//! independent processes may be compiled concurrently without locking.
//! A failed generation discards the artifact; there is no partial output.
//!
//! # Modules
//!
//! - [`assembler`]: Member ordering and generated-file assembly
//! - [`context`]: Build-context capabilities
//! - [`di`]: Dependency-injection annotation rewriting
//! - [`errors`]: Fatal generation errors
//! - [`resource`]: The resource artifact generator
//! - [`symbols`]: Type descriptor resolution and rule-unit variables
//! - [`templates`]: Embedded skeleton templates
//! - [`tree`]: Artifact syntax tree, parser, and printer
//! - [`visitor`]: Node-visitor dispatch and emission primitives

#![deny(missing_docs)]

/// Member ordering and generated-file assembly.
pub mod assembler;

/// Build-context capabilities.
pub mod context;

/// Dependency-injection annotation rewriting.
pub mod di;

/// Fatal generation errors.
pub mod errors;

/// The resource artifact generator.
pub mod resource;

/// Type descriptor resolution and rule-unit variables.
pub mod symbols;

/// Embedded skeleton templates.
pub mod templates;

/// Artifact syntax tree, parser, and printer.
pub mod tree;

/// Node-visitor dispatch and emission primitives.
pub mod visitor;

// Re-export main types
pub use assembler::GeneratedFile;
pub use context::GeneratorContext;
pub use di::{CdiAnnotator, DependencyInjectionAnnotator};
pub use errors::CodegenError;
pub use resource::ResourceGenerator;
pub use symbols::{RuleUnitVariable, TypeHandle, TypeResolver, UnitDescription};
pub use visitor::{NodeVisitorRegistry, ProcessMetadata};

// Re-export model types for convenience
pub use flowforge_model::{
    NodeKind, ProcessDefinition, ProcessNode, SignalMap, UserTaskDescriptor, Variable,
    VariableScope, WorkItem,
};
