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

//! Capability descriptors.
//!
//! A capability ("action") is a contract trait that behaviours can implement.
//! The registry never compares trait types directly. Instead, each contract is
//! bound to an interned [`ActionId`] tag by implementing [`Action`] for its
//! trait object type, usually through [`declare_action!`](crate::declare_action).

use std::fmt;

/// An interned tag identifying one capability contract.
///
/// Two `ActionId`s are equal iff their names are equal, so every contract must
/// use a distinct name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionId(&'static str);

impl ActionId {
    /// Creates a tag from a static name.
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Returns the name this tag was created with.
    pub const fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Binds a capability contract to its [`ActionId`].
///
/// Implemented for the contract's trait object type (`dyn MyContract`), which
/// is the type callers receive when they query an entity by capability.
pub trait Action: 'static {
    /// The tag under which behaviours providing this contract are indexed.
    const ID: ActionId;
}

/// Implements [`Action`] for a contract trait object.
///
/// ```rust
/// use bocs_core::{declare_action, Action};
///
/// pub trait Jump {
///     fn jump(&mut self);
/// }
///
/// declare_action!(dyn Jump);
///
/// assert!(<dyn Jump as Action>::ID.name().ends_with("::Jump"));
/// ```
///
/// The default tag is the trait's module path followed by its name, so
/// same-named contracts in different modules never share a key. A custom tag
/// can be given with `declare_action!(dyn Jump => "Hop")`; it must be unique
/// across every contract an entity will see.
#[macro_export]
macro_rules! declare_action {
    (dyn $contract:ident) => {
        $crate::declare_action!(
            dyn $contract => concat!(module_path!(), "::", stringify!($contract))
        );
    };
    (dyn $contract:ident => $name:expr) => {
        impl $crate::Action for dyn $contract {
            const ID: $crate::ActionId = $crate::ActionId::new($name);
        }
    };
}
