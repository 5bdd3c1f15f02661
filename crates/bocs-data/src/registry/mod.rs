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

//! The per-entity capability registry.
//!
//! Behaviours are moved into an [`Entity`] with `attach`. The entity reads
//! the capabilities the behaviour's type declares and lists the new instance
//! under each of them. Queries return the instances viewed through one
//! contract; removal by capability fully detaches every instance found under
//! it, from every other capability as well.

mod entity;
mod storage;

pub use entity::Entity;

#[cfg(test)]
mod tests;
