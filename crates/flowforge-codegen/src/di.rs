// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Dependency-injection annotation rewriting.
//!
//! The generator treats injection annotations as opaque tokens of the
//! target container; this seam is the only place that knows which tokens
//! a container expects.

use crate::tree::{Annotation, Expr, Field, Method, TypeDecl};

/// Capability for rewriting artifact members into container-managed
/// declarations.
pub trait DependencyInjectionAnnotator {
    /// Mark a field for plain injection.
    fn with_injection(&self, field: &mut Field);

    /// Mark a field for named injection under the given name.
    fn with_named_injection(&self, field: &mut Field, name: &str);

    /// Restrict a method to the given roles.
    fn with_security_roles(&self, method: &mut Method, roles: &[String]);

    /// Mark the whole artifact as a managed component.
    fn with_application_component(&self, decl: &mut TypeDecl);
}

/// CDI-style annotator.
#[derive(Debug, Clone, Copy, Default)]
pub struct CdiAnnotator;

impl DependencyInjectionAnnotator for CdiAnnotator {
    fn with_injection(&self, field: &mut Field) {
        field.annotations.push(Annotation::marker("javax.inject.Inject"));
    }

    fn with_named_injection(&self, field: &mut Field, name: &str) {
        field.annotations.push(Annotation::marker("javax.inject.Inject"));
        field
            .annotations
            .push(Annotation::string("javax.inject.Named", name));
    }

    fn with_security_roles(&self, method: &mut Method, roles: &[String]) {
        method.annotations.push(Annotation::expr(
            "javax.annotation.security.RolesAllowed",
            Expr::StrList(roles.to_vec()),
        ));
    }

    fn with_application_component(&self, decl: &mut TypeDecl) {
        decl.annotations.push(Annotation::marker(
            "javax.enterprise.context.ApplicationScoped",
        ));
    }
}
