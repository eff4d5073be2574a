// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Final artifact assembly: deterministic member ordering and the
//! generated-file record.

use std::cmp::Ordering;

use crate::tree::{CompilationUnit, Member, TypeDecl};
use crate::tree::printer;

/// A generated source artifact with its intended package-relative path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Package-relative output path, e.g. `demo/OrderResource.java`.
    pub relative_path: String,

    /// Generated source text.
    pub source: String,
}

/// Order members deterministically: fields before methods, then by name.
/// The sort is stable, so equally-named members keep their relative
/// order across runs.
pub fn sort_members(decl: &mut TypeDecl) {
    decl.members.sort_by(compare_members);
}

fn compare_members(a: &Member, b: &Member) -> Ordering {
    a.kind_rank()
        .cmp(&b.kind_rank())
        .then_with(|| a.name().cmp(b.name()))
}

/// Serialize the unit and pair it with its output path.
pub fn assemble(unit: &CompilationUnit, relative_path: impl Into<String>) -> GeneratedFile {
    GeneratedFile {
        relative_path: relative_path.into(),
        source: printer::print_unit(unit),
    }
}
