// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Error types for process compilation.
//!
//! Every variant is fatal for the artifact being generated: the compiler
//! never emits partial output and never retries. Re-invocation after the
//! input is fixed is the only recovery path.

use crate::tree::parser::ParseError;

/// Errors that can occur during artifact generation.
#[derive(Debug, thiserror::Error)]
pub enum CodegenError {
    /// A variable's declared type descriptor could not be mapped to a
    /// concrete type. Indicates a malformed process or type definition.
    #[error("unresolvable type descriptor '{descriptor}'")]
    UnresolvableType {
        /// The type descriptor that failed to resolve.
        descriptor: String,
    },

    /// A skeleton template does not declare a primary type. Indicates a
    /// packaging defect, not a runtime condition.
    #[error("template '{template}' does not contain a type declaration")]
    MalformedTemplate {
        /// Name of the offending template resource.
        template: String,
    },

    /// A skeleton template failed to parse. Indicates a packaging defect.
    #[error("template '{template}' failed to parse")]
    TemplateParse {
        /// Name of the offending template resource.
        template: String,
        /// The underlying parse failure.
        #[source]
        source: ParseError,
    },
}
