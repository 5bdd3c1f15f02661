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

//! Behaviours and their registration-time capability declaration.
//!
//! A behaviour states which capability contracts it fulfils in
//! [`Behaviour::declare_actions`]. Each declaration carries the two upcasts
//! (`&B -> &dyn Contract` and its mutable twin), which are type-erased into a
//! [`CastTable`]. The registry stores behaviours as `dyn Any` and goes back
//! through the table whenever a caller asks for a contract view.
//!
//! # Example
//!
//! ```rust
//! use bocs_core::{declare_action, ActionSet, Behaviour};
//!
//! pub trait Greet {
//!     fn greet(&self) -> String;
//! }
//! declare_action!(dyn Greet);
//!
//! struct Greeter;
//!
//! impl Greet for Greeter {
//!     fn greet(&self) -> String {
//!         "hello".to_string()
//!     }
//! }
//!
//! impl Behaviour for Greeter {
//!     fn declare_actions(actions: &mut ActionSet<Self>) {
//!         actions.provide::<dyn Greet>(|b| b, |b| b);
//!     }
//! }
//! ```

use std::any::Any;
use std::marker::PhantomData;

use crate::action::{Action, ActionId};
use crate::error::EntityError;

/// A concrete implementation unit that can be attached to an entity.
///
/// The set of capabilities a behaviour type provides is fixed: it is whatever
/// [`declare_actions`](Behaviour::declare_actions) declares, and it is read
/// once per attach.
pub trait Behaviour: Any + Send {
    /// Declares every capability contract this type fulfils.
    fn declare_actions(actions: &mut ActionSet<Self>)
    where
        Self: Sized;

    /// A readable name for logs and errors.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Collects the capability declarations of one behaviour type `B`.
pub struct ActionSet<B> {
    casts: Vec<(ActionId, ErasedView)>,
    duplicate: Option<ActionId>,
    _marker: PhantomData<fn(B)>,
}

impl<B: Behaviour> ActionSet<B> {
    fn new() -> Self {
        Self {
            casts: Vec::new(),
            duplicate: None,
            _marker: PhantomData,
        }
    }

    /// Declares that `B` fulfils the contract `A`.
    ///
    /// `view` and `view_mut` are the upcasts from the concrete type to the
    /// contract. For a type implementing the contract trait they are simply
    /// `|b| b`.
    pub fn provide<A: Action + ?Sized>(
        &mut self,
        view: fn(&B) -> &A,
        view_mut: fn(&mut B) -> &mut A,
    ) -> &mut Self {
        if self.casts.iter().any(|(id, _)| *id == A::ID) {
            self.duplicate.get_or_insert(A::ID);
            return self;
        }

        let upcast: Box<dyn ActionView<A>> = Box::new(Upcast { view, view_mut });
        let erased: ErasedView = Box::new(upcast);
        self.casts.push((A::ID, erased));
        self
    }

    /// Returns the tags declared so far, in declaration order.
    pub fn actions(&self) -> impl Iterator<Item = ActionId> + '_ {
        self.casts.iter().map(|(id, _)| *id)
    }
}

/// Upcast functions erased over the concrete behaviour type.
///
/// The outer `Any` box always holds a `Box<dyn ActionView<A>>` for the `A`
/// whose tag it is stored under.
type ErasedView = Box<dyn Any + Send + Sync>;

trait ActionView<A: ?Sized>: Send + Sync {
    fn view<'a>(&self, behaviour: &'a dyn Any) -> Option<&'a A>;
    fn view_mut<'a>(&self, behaviour: &'a mut dyn Any) -> Option<&'a mut A>;
}

struct Upcast<B, A: ?Sized> {
    view: fn(&B) -> &A,
    view_mut: fn(&mut B) -> &mut A,
}

impl<B: 'static, A: ?Sized + 'static> ActionView<A> for Upcast<B, A> {
    fn view<'a>(&self, behaviour: &'a dyn Any) -> Option<&'a A> {
        behaviour.downcast_ref::<B>().map(self.view)
    }

    fn view_mut<'a>(&self, behaviour: &'a mut dyn Any) -> Option<&'a mut A> {
        behaviour.downcast_mut::<B>().map(self.view_mut)
    }
}

/// The validated capability declaration of one behaviour type.
///
/// Built with [`CastTable::of`]. Holds, for every declared [`ActionId`], the
/// way to view a type-erased instance through that contract.
pub struct CastTable {
    type_name: &'static str,
    casts: Vec<(ActionId, ErasedView)>,
}

impl CastTable {
    /// Reads and validates the declaration of `behaviour`'s type.
    ///
    /// The table is named after [`Behaviour::type_name`], so errors and logs
    /// use the same name the behaviour reports for itself.
    ///
    /// Fails with [`EntityError::InvalidArgument`] when `B` declares no
    /// capability at all (there is nothing to register it under) or declares
    /// the same capability twice.
    pub fn of<B: Behaviour>(behaviour: &B) -> Result<Self, EntityError> {
        let type_name = behaviour.type_name();
        let mut set = ActionSet::<B>::new();
        B::declare_actions(&mut set);

        if let Some(action) = set.duplicate {
            return Err(EntityError::InvalidArgument {
                type_name,
                reason: format!("capability '{action}' is declared more than once"),
            });
        }
        if set.casts.is_empty() {
            return Err(EntityError::InvalidArgument {
                type_name,
                reason: "behaviour declares no capability".to_string(),
            });
        }

        log::trace!(
            "Declared capabilities for '{type_name}': {:?}",
            set.actions().collect::<Vec<_>>()
        );

        Ok(Self {
            type_name,
            casts: set.casts,
        })
    }

    /// The name of the behaviour this table was built for.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns the declared tags, in declaration order.
    pub fn actions(&self) -> impl Iterator<Item = ActionId> + '_ {
        self.casts.iter().map(|(id, _)| *id)
    }

    /// Returns `true` if the table declares `action`.
    pub fn provides(&self, action: ActionId) -> bool {
        self.casts.iter().any(|(id, _)| *id == action)
    }

    /// Views `behaviour` through contract `A`.
    ///
    /// Returns `None` if `A` was not declared or `behaviour` is not the type
    /// this table was built for.
    pub fn view<'a, A: Action + ?Sized>(&self, behaviour: &'a dyn Any) -> Option<&'a A> {
        self.upcast::<A>()?.view(behaviour)
    }

    /// Mutable counterpart of [`view`](Self::view).
    pub fn view_mut<'a, A: Action + ?Sized>(
        &self,
        behaviour: &'a mut dyn Any,
    ) -> Option<&'a mut A> {
        self.upcast::<A>()?.view_mut(behaviour)
    }

    fn upcast<A: Action + ?Sized>(&self) -> Option<&dyn ActionView<A>> {
        self.casts
            .iter()
            .find(|(id, _)| *id == A::ID)
            .and_then(|(_, erased)| erased.downcast_ref::<Box<dyn ActionView<A>>>())
            .map(|upcast| &**upcast)
    }
}

impl std::fmt::Debug for CastTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CastTable")
            .field("type_name", &self.type_name)
            .field("actions", &self.actions().collect::<Vec<_>>())
            .finish()
    }
}
