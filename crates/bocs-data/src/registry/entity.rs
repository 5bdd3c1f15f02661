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

use std::collections::{HashMap, HashSet};
use std::fmt;

use bocs_core::{
    Action, ActionId, AttachPolicy, Behaviour, BehaviourHandle, CastTable, EntityConfig,
    EntityError, EntityId,
};

use super::storage::BehaviourStorage;

/// A named object that gains capabilities through the behaviours attached to it.
///
/// The entity owns its behaviours and keeps an index from each capability
/// ([`ActionId`]) to the handles of the behaviours fulfilling it, in attach
/// order. A behaviour declaring several capabilities is stored once and
/// listed under each of them.
///
/// The index never holds an empty sequence: a capability whose last
/// behaviour goes away disappears from the index.
pub struct Entity {
    name: String,
    id: EntityId,
    config: EntityConfig,
    storage: BehaviourStorage,
    /// Capability -> handles, in attach order.
    index: HashMap<ActionId, Vec<BehaviourHandle>>,
}

impl Entity {
    /// Creates an entity with no behaviours and the default configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, EntityConfig::default())
    }

    /// Creates an entity with no behaviours and the given configuration.
    pub fn with_config(name: impl Into<String>, config: EntityConfig) -> Self {
        let entity = Self {
            name: name.into(),
            id: EntityId::new(),
            config,
            storage: BehaviourStorage::default(),
            index: HashMap::new(),
        };
        log::debug!("Entity '{}' created with id {}", entity.name, entity.id);
        entity
    }

    /// The display name given at construction.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The identifier generated at construction.
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// The configuration given at construction.
    pub fn config(&self) -> &EntityConfig {
        &self.config
    }

    /// Takes ownership of `behaviour` and indexes it under every capability
    /// its type declares.
    ///
    /// The behaviour is appended at the end of each capability's sequence.
    /// Nothing is modified when an error is returned.
    ///
    /// # Errors
    ///
    /// * [`EntityError::InvalidArgument`] if the type declares no capability,
    ///   or declares one twice.
    /// * [`EntityError::DuplicateBehaviour`] if the entity uses
    ///   [`AttachPolicy::UniqueType`] and already holds an instance of this type.
    pub fn attach<B: Behaviour>(
        &mut self,
        behaviour: B,
    ) -> Result<BehaviourHandle, EntityError> {
        let casts = CastTable::of(&behaviour)
            .inspect_err(|e| log::warn!("Entity '{}': rejected attach. {e}", self.name))?;

        if self.config.attach_policy == AttachPolicy::UniqueType
            && self.has_behaviour_of_type::<B>()
        {
            let err = EntityError::DuplicateBehaviour {
                type_name: casts.type_name(),
            };
            log::warn!("Entity '{}': rejected attach. {err}", self.name);
            return Err(err);
        }

        let type_name = casts.type_name();
        let actions: Vec<ActionId> = casts.actions().collect();
        let handle = self.storage.insert(Box::new(behaviour), casts);
        for action in &actions {
            self.index.entry(*action).or_default().push(handle);
        }

        log::debug!(
            "Entity '{}': attached {type_name} as {handle} under {actions:?}",
            self.name
        );
        Ok(handle)
    }

    /// Removes every behaviour registered under capability `A`.
    ///
    /// See [`remove_all_by_id`](Self::remove_all_by_id).
    pub fn remove_all_by_capability<A: Action + ?Sized>(&mut self) -> usize {
        self.remove_all_by_id(A::ID)
    }

    /// Removes every behaviour registered under `action`, from every
    /// capability it was listed under, and drops the capabilities left empty.
    ///
    /// Returns the number of distinct behaviours removed. A capability with
    /// nothing registered is a no-op returning `0`, so repeated calls are safe.
    pub fn remove_all_by_id(&mut self, action: ActionId) -> usize {
        let Some(targets) = self.index.remove(&action) else {
            log::trace!("Entity '{}': nothing to remove under {action}", self.name);
            return 0;
        };
        let targets: HashSet<BehaviourHandle> = targets.into_iter().collect();

        self.index.retain(|_, handles| {
            handles.retain(|handle| !targets.contains(handle));
            !handles.is_empty()
        });
        for handle in &targets {
            self.storage.remove(*handle);
        }

        log::debug!(
            "Entity '{}': removed {} behaviour(s) under {action}",
            self.name,
            targets.len()
        );
        targets.len()
    }

    /// Removes a single behaviour from every capability it is listed under.
    ///
    /// Returns `false` if `handle` does not belong to this entity (or was
    /// already removed).
    pub fn detach(&mut self, handle: BehaviourHandle) -> bool {
        let Some(removed) = self.storage.remove(handle) else {
            return false;
        };

        for action in removed.casts().actions() {
            if let Some(handles) = self.index.get_mut(&action) {
                handles.retain(|h| *h != handle);
                if handles.is_empty() {
                    self.index.remove(&action);
                }
            }
        }

        log::debug!(
            "Entity '{}': detached {} ({handle})",
            self.name,
            removed.type_name()
        );
        true
    }

    /// Returns `true` if at least one behaviour fulfils capability `A`.
    pub fn has_capability<A: Action + ?Sized>(&self) -> bool {
        self.has_action(A::ID)
    }

    /// Returns `true` if at least one behaviour is registered under `action`.
    pub fn has_action(&self, action: ActionId) -> bool {
        self.index.contains_key(&action)
    }

    /// Returns `true` if an instance of the concrete type `B` is attached.
    pub fn has_behaviour_of_type<B: Behaviour>(&self) -> bool {
        self.storage.values().any(|slot| slot.is::<B>())
    }

    /// Returns every behaviour fulfilling `A`, in attach order, viewed
    /// through the contract. Empty if none is registered.
    pub fn get_all_by_capability<A: Action + ?Sized>(&self) -> Vec<&A> {
        log::trace!("Entity '{}': querying {}", self.name, A::ID);
        self.handles_by_capability::<A>()
            .iter()
            .filter_map(|handle| self.storage.get(*handle))
            .filter_map(|slot| slot.view::<A>())
            .collect()
    }

    /// Mutable counterpart of [`get_all_by_capability`](Self::get_all_by_capability).
    ///
    /// Changes made through the returned views are made on the stored
    /// behaviours themselves and are visible to later queries.
    pub fn get_all_by_capability_mut<A: Action + ?Sized>(&mut self) -> Vec<&mut A> {
        log::trace!("Entity '{}': querying {} mutably", self.name, A::ID);
        let Some(handles) = self.index.get(&A::ID) else {
            return Vec::new();
        };

        // Both the index sequence and the storage are in ascending handle order.
        let mut wanted = handles.iter().copied().peekable();
        self.storage
            .iter_mut()
            .filter_map(|(handle, slot)| {
                wanted.next_if_eq(&handle)?;
                slot.view_mut::<A>()
            })
            .collect()
    }

    /// Returns the handles registered under capability `A`, in attach order.
    pub fn handles_by_capability<A: Action + ?Sized>(&self) -> &[BehaviourHandle] {
        self.index.get(&A::ID).map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns the behaviour behind `handle` if it is of concrete type `B`.
    pub fn behaviour<B: Behaviour>(&self, handle: BehaviourHandle) -> Option<&B> {
        self.storage.get(handle)?.downcast_ref::<B>()
    }

    /// Mutable counterpart of [`behaviour`](Self::behaviour).
    pub fn behaviour_mut<B: Behaviour>(&mut self, handle: BehaviourHandle) -> Option<&mut B> {
        self.storage.get_mut(handle)?.downcast_mut::<B>()
    }

    /// Returns the capabilities currently present, in no particular order.
    pub fn actions(&self) -> impl Iterator<Item = ActionId> + '_ {
        self.index.keys().copied()
    }

    /// Returns the number of distinct behaviours attached.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Returns `true` if no behaviour is attached.
    pub fn is_empty(&self) -> bool {
        self.storage.len() == 0
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut actions: Vec<_> = self.actions().collect();
        actions.sort();
        f.debug_struct("Entity")
            .field("name", &self.name)
            .field("id", &self.id)
            .field("behaviours", &self.len())
            .field("actions", &actions)
            .finish()
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
