// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Build-context capabilities visible to generation.

/// Capabilities of the surrounding build, as far as generation cares:
/// currently only whether the target stack supports request validation.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeneratorContext {
    validation_supported: bool,
}

impl GeneratorContext {
    /// A context with the given validation capability.
    pub fn new(validation_supported: bool) -> Self {
        Self {
            validation_supported,
        }
    }

    /// Whether inbound model parameters should carry validation
    /// annotations.
    pub fn validation_supported(&self) -> bool {
        self.validation_supported
    }
}
