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

//! Defines the error type returned by entity registry operations.

use std::fmt;

/// An error raised while attaching a behaviour to an entity.
///
/// Removal and queries never fail: a capability with nothing registered
/// under it yields an empty result or a zero count instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityError {
    /// The behaviour cannot be registered at all.
    InvalidArgument {
        /// The concrete type of the rejected behaviour.
        type_name: &'static str,
        /// Why it was rejected.
        reason: String,
    },
    /// The entity only accepts one instance per concrete type and already
    /// holds one of this type.
    DuplicateBehaviour {
        /// The concrete type of the rejected behaviour.
        type_name: &'static str,
    },
}

impl fmt::Display for EntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityError::InvalidArgument { type_name, reason } => {
                write!(f, "Invalid behaviour '{type_name}': {reason}")
            }
            EntityError::DuplicateBehaviour { type_name } => {
                write!(f, "A behaviour of type '{type_name}' is already attached")
            }
        }
    }
}

impl std::error::Error for EntityError {}
