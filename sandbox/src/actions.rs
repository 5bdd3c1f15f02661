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

//! Example capability contracts used by the sandbox.

use bocs_core::declare_action;

/// Triggered once per tick by whoever drives the loop.
pub trait ActOnTick {
    /// Called on every tick.
    fn on_tick(&mut self);
}
declare_action!(dyn ActOnTick);

/// Carries a mutable message.
pub trait SendMessage {
    /// The current message.
    fn message(&self) -> &str;

    /// Replaces the message.
    fn set_message(&mut self, message: String);
}
declare_action!(dyn SendMessage);
