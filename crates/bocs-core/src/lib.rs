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

//! # BOCS Core
//!
//! Foundational crate containing the contracts every other crate builds on:
//! capability descriptors ([`ActionId`], [`Action`]), the [`Behaviour`] trait
//! and its registration-time declaration ([`ActionSet`]), identity types, the
//! error taxonomy, and entity configuration.

#![warn(missing_docs)]

pub mod action;
pub mod behaviour;
pub mod config;
pub mod entity;
pub mod error;

pub use action::{Action, ActionId};
pub use behaviour::{ActionSet, Behaviour, CastTable};
pub use config::{AttachPolicy, EntityConfig};
pub use entity::{BehaviourHandle, EntityId};
pub use error::EntityError;
