// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! User task and signal descriptors consumed by resource generation.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered mapping of signal name to optional payload type name.
///
/// A `None` payload means the synthesized endpoint takes no request body.
/// Declaration order drives endpoint ordinals, so it must be stable.
pub type SignalMap = IndexMap<String, Option<String>>;

/// Metadata describing one user task of a process, used to specialize the
/// user-task endpoint template.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserTaskDescriptor {
    /// Task identifier, suffixed onto cloned endpoint names.
    pub id: String,

    /// Task display name; whitespace is normalized to underscores when
    /// interpolated into endpoint paths.
    pub name: String,

    /// Simple name of the task input model type.
    pub input_model_name: String,

    /// Simple name of the task output model type.
    pub output_model_name: String,
}

impl UserTaskDescriptor {
    /// The task name with every whitespace character replaced by an
    /// underscore, as used in endpoint path literals.
    pub fn normalized_name(&self) -> String {
        self.name
            .chars()
            .map(|c| if c.is_whitespace() { '_' } else { c })
            .collect()
    }
}
