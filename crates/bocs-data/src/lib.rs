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

//! # BOCS Data
//!
//! The entity registry. An [`Entity`](registry::Entity) owns the behaviours
//! attached to it and indexes them by the capabilities they fulfil, so that
//! an external driver can ask for "every behaviour that can act on a tick"
//! and call into them directly.

#![warn(missing_docs)]

pub mod registry;

pub use registry::Entity;
