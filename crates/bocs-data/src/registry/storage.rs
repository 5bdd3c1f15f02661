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

use std::any::Any;
use std::collections::BTreeMap;

use bocs_core::{Action, BehaviourHandle, CastTable};

/// One attached behaviour: the type-erased instance and the table that knows
/// how to view it through each contract it declared.
pub(crate) struct StoredBehaviour {
    instance: Box<dyn Any + Send>,
    casts: CastTable,
}

impl StoredBehaviour {
    pub(crate) fn type_name(&self) -> &'static str {
        self.casts.type_name()
    }

    pub(crate) fn casts(&self) -> &CastTable {
        &self.casts
    }

    pub(crate) fn is<B: Any>(&self) -> bool {
        let instance: &dyn Any = &*self.instance;
        instance.is::<B>()
    }

    pub(crate) fn downcast_ref<B: Any>(&self) -> Option<&B> {
        let instance: &dyn Any = &*self.instance;
        instance.downcast_ref::<B>()
    }

    pub(crate) fn downcast_mut<B: Any>(&mut self) -> Option<&mut B> {
        let instance: &mut dyn Any = &mut *self.instance;
        instance.downcast_mut::<B>()
    }

    pub(crate) fn view<A: Action + ?Sized>(&self) -> Option<&A> {
        self.casts.view::<A>(&*self.instance)
    }

    pub(crate) fn view_mut<A: Action + ?Sized>(&mut self) -> Option<&mut A> {
        self.casts.view_mut::<A>(&mut *self.instance)
    }
}

/// Owns every behaviour instance of one entity, ordered by handle.
///
/// Because handles only grow, iteration order is attach order.
#[derive(Default)]
pub(crate) struct BehaviourStorage {
    slots: BTreeMap<BehaviourHandle, StoredBehaviour>,
    next: BehaviourHandle,
}

impl BehaviourStorage {
    /// Takes ownership of `instance` and returns its freshly allocated handle.
    pub(crate) fn insert(
        &mut self,
        instance: Box<dyn Any + Send>,
        casts: CastTable,
    ) -> BehaviourHandle {
        let handle = self.next;
        self.next = handle.next();
        self.slots.insert(handle, StoredBehaviour { instance, casts });
        handle
    }

    pub(crate) fn remove(&mut self, handle: BehaviourHandle) -> Option<StoredBehaviour> {
        self.slots.remove(&handle)
    }

    pub(crate) fn get(&self, handle: BehaviourHandle) -> Option<&StoredBehaviour> {
        self.slots.get(&handle)
    }

    pub(crate) fn get_mut(&mut self, handle: BehaviourHandle) -> Option<&mut StoredBehaviour> {
        self.slots.get_mut(&handle)
    }

    pub(crate) fn values(&self) -> impl Iterator<Item = &StoredBehaviour> {
        self.slots.values()
    }

    pub(crate) fn iter_mut(
        &mut self,
    ) -> impl Iterator<Item = (BehaviourHandle, &mut StoredBehaviour)> {
        self.slots.iter_mut().map(|(handle, slot)| (*handle, slot))
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }
}
