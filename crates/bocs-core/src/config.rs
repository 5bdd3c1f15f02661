// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Per-entity configuration.

use serde::{Deserialize, Serialize};

/// How an entity treats a behaviour whose concrete type is already attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AttachPolicy {
    /// Every attach adds a new instance, whatever its type.
    #[default]
    AllowDuplicates,
    /// At most one instance per concrete type. A second attach fails with
    /// [`EntityError::DuplicateBehaviour`](crate::EntityError::DuplicateBehaviour).
    UniqueType,
}

/// Settings applied to one entity at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityConfig {
    /// The duplicate handling used by `attach`.
    pub attach_policy: AttachPolicy,
}

impl EntityConfig {
    /// A configuration that rejects a second instance of the same type.
    pub fn unique_types() -> Self {
        Self {
            attach_policy: AttachPolicy::UniqueType,
        }
    }
}
