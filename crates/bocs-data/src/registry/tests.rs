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

use bocs_core::{
    declare_action, Action, ActionId, ActionSet, Behaviour, BehaviourHandle, EntityConfig,
    EntityError,
};

use super::Entity;

// --- DUMMY CONTRACTS AND BEHAVIOURS FOR TESTING ---

trait Tick {
    fn tick(&mut self);
    fn ticks(&self) -> u32;
}
declare_action!(dyn Tick);

trait Message {
    fn message(&self) -> &str;
    fn set_message(&mut self, message: String);
}
declare_action!(dyn Message);

trait Never {}
declare_action!(dyn Never);

/// Fulfils both `Tick` and `Message`.
struct Announcer {
    message: String,
    ticks: u32,
}

impl Announcer {
    fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            ticks: 0,
        }
    }
}

impl Tick for Announcer {
    fn tick(&mut self) {
        self.ticks += 1;
    }

    fn ticks(&self) -> u32 {
        self.ticks
    }
}

impl Message for Announcer {
    fn message(&self) -> &str {
        &self.message
    }

    fn set_message(&mut self, message: String) {
        self.message = message;
    }
}

impl Behaviour for Announcer {
    fn declare_actions(actions: &mut ActionSet<Self>) {
        actions
            .provide::<dyn Tick>(|b| b, |b| b)
            .provide::<dyn Message>(|b| b, |b| b);
    }
}

/// Fulfils `Tick` only.
#[derive(Default)]
struct Metronome {
    ticks: u32,
}

impl Tick for Metronome {
    fn tick(&mut self) {
        self.ticks += 1;
    }

    fn ticks(&self) -> u32 {
        self.ticks
    }
}

impl Behaviour for Metronome {
    fn declare_actions(actions: &mut ActionSet<Self>) {
        actions.provide::<dyn Tick>(|b| b, |b| b);
    }
}

/// Fulfils `Message` only.
struct Note(String);

impl Message for Note {
    fn message(&self) -> &str {
        &self.0
    }

    fn set_message(&mut self, message: String) {
        self.0 = message;
    }
}

impl Behaviour for Note {
    fn declare_actions(actions: &mut ActionSet<Self>) {
        actions.provide::<dyn Message>(|b| b, |b| b);
    }
}

/// Declares nothing, so it cannot be registered anywhere.
struct Inert;

impl Behaviour for Inert {
    fn declare_actions(_actions: &mut ActionSet<Self>) {}
}

/// Reports a custom type name and declares nothing.
struct Phantom;

impl Behaviour for Phantom {
    fn declare_actions(_actions: &mut ActionSet<Self>) {}

    fn type_name(&self) -> &'static str {
        "Phantom"
    }
}

/// Reports a custom type name.
struct Herald;

impl Message for Herald {
    fn message(&self) -> &str {
        "hear ye"
    }

    fn set_message(&mut self, _message: String) {}
}

impl Behaviour for Herald {
    fn declare_actions(actions: &mut ActionSet<Self>) {
        actions.provide::<dyn Message>(|b| b, |b| b);
    }

    fn type_name(&self) -> &'static str {
        "Herald"
    }
}

/// Two unrelated contracts that happen to share a trait name.
mod lights {
    use bocs_core::{declare_action, ActionSet, Behaviour};

    pub trait Pulse {
        fn brightness(&self) -> u8;
    }
    declare_action!(dyn Pulse);

    pub struct Lamp;

    impl Pulse for Lamp {
        fn brightness(&self) -> u8 {
            200
        }
    }

    impl Behaviour for Lamp {
        fn declare_actions(actions: &mut ActionSet<Self>) {
            actions.provide::<dyn Pulse>(|b| b, |b| b);
        }
    }
}

mod heart {
    use bocs_core::{declare_action, ActionSet, Behaviour};

    pub trait Pulse {
        fn bpm(&self) -> u32;
    }
    declare_action!(dyn Pulse);

    pub struct Heart;

    impl Pulse for Heart {
        fn bpm(&self) -> u32 {
            60
        }
    }

    impl Behaviour for Heart {
        fn declare_actions(actions: &mut ActionSet<Self>) {
            actions.provide::<dyn Pulse>(|b| b, |b| b);
        }
    }
}

fn messages(entity: &Entity) -> Vec<String> {
    entity
        .get_all_by_capability::<dyn Message>()
        .iter()
        .map(|m| m.message().to_string())
        .collect()
}

// --- TESTS ---

#[test]
fn test_new_entity_is_empty() {
    let entity = Entity::new("player");

    assert_eq!(entity.name(), "player");
    assert!(entity.is_empty());
    assert_eq!(entity.actions().count(), 0);
    assert!(!entity.has_capability::<dyn Tick>());
    assert!(entity.get_all_by_capability::<dyn Tick>().is_empty());
}

#[test]
fn test_entity_ids_differ_for_same_name() {
    let first = Entity::new("twin");
    let second = Entity::new("twin");
    assert_ne!(first.id(), second.id(), "Each entity gets its own id");
}

#[test]
fn test_attach_indexes_every_declared_capability() {
    let mut entity = Entity::new("player");
    let handle = entity.attach(Announcer::new("hello")).unwrap();

    assert!(entity.has_capability::<dyn Tick>());
    assert!(entity.has_capability::<dyn Message>());
    assert!(!entity.has_capability::<dyn Never>());
    assert_eq!(entity.handles_by_capability::<dyn Tick>(), &[handle]);
    assert_eq!(entity.handles_by_capability::<dyn Message>(), &[handle]);
    assert_eq!(entity.len(), 1, "One instance, listed under two capabilities");
}

#[test]
fn test_attach_appends_at_the_end() {
    let mut entity = Entity::new("player");
    entity.attach(Metronome::default()).unwrap();
    entity.attach(Note("first".to_string())).unwrap();
    let last = entity.attach(Announcer::new("last")).unwrap();

    let ticks = entity.handles_by_capability::<dyn Tick>();
    assert_eq!(ticks.len(), 2);
    assert_eq!(ticks.last(), Some(&last));
    assert_eq!(
        ticks.iter().filter(|h| **h == last).count(),
        1,
        "The new instance appears exactly once"
    );
    assert_eq!(messages(&entity), vec!["first", "last"]);
}

#[test]
fn test_query_preserves_attach_order() {
    let mut entity = Entity::new("board");
    for text in ["a", "b", "c", "d"] {
        entity.attach(Note(text.to_string())).unwrap();
    }

    assert_eq!(messages(&entity), vec!["a", "b", "c", "d"]);
}

#[test]
fn test_attach_same_type_twice_keeps_both() {
    let mut entity = Entity::new("board");
    let first = entity.attach(Note("same".to_string())).unwrap();
    let second = entity.attach(Note("same".to_string())).unwrap();

    assert_ne!(first, second);
    assert_eq!(entity.get_all_by_capability::<dyn Message>().len(), 2);
}

#[test]
fn test_attach_without_capability_is_invalid() {
    let mut entity = Entity::new("player");
    let err = entity.attach(Inert).unwrap_err();

    assert!(matches!(err, EntityError::InvalidArgument { .. }));
    assert!(entity.is_empty(), "A rejected attach leaves the entity unchanged");
    assert_eq!(entity.actions().count(), 0);
}

#[test]
fn test_unique_type_policy_rejects_second_instance() {
    let mut entity = Entity::with_config("player", EntityConfig::unique_types());
    let first = entity.attach(Note("kept".to_string())).unwrap();
    let err = entity.attach(Note("dropped".to_string())).unwrap_err();

    assert!(matches!(err, EntityError::DuplicateBehaviour { .. }));
    assert_eq!(entity.handles_by_capability::<dyn Message>(), &[first]);
    assert_eq!(messages(&entity), vec!["kept"]);

    entity
        .attach(Metronome::default())
        .expect("A different type is still accepted");
    assert_eq!(entity.len(), 2);
}

#[test]
fn test_remove_on_fresh_entity_returns_zero() {
    let mut entity = Entity::new("player");

    assert_eq!(entity.remove_all_by_capability::<dyn Tick>(), 0);
    assert!(entity.is_empty());
    assert_eq!(entity.actions().count(), 0);
}

#[test]
fn test_remove_detaches_targets_from_every_capability() {
    let mut entity = Entity::new("player");
    // B1 fulfils Message and Tick, B2 fulfils Tick only.
    entity.attach(Announcer::new("b1")).unwrap();
    entity.attach(Metronome::default()).unwrap();

    let removed = entity.remove_all_by_capability::<dyn Tick>();

    assert_eq!(removed, 2, "Counts distinct instances");
    assert!(!entity.has_capability::<dyn Tick>());
    assert!(
        !entity.has_capability::<dyn Message>(),
        "B1 was in the target set, so its Message entry goes too"
    );
    assert_eq!(entity.actions().count(), 0, "No empty sequence is left behind");
    assert!(entity.is_empty());
}

#[test]
fn test_remove_keeps_behaviours_outside_the_target_set() {
    let mut entity = Entity::new("player");
    entity.attach(Announcer::new("ticking")).unwrap();
    let note = entity.attach(Note("quiet".to_string())).unwrap();

    assert_eq!(entity.remove_all_by_capability::<dyn Tick>(), 1);

    assert!(entity.has_capability::<dyn Message>());
    assert_eq!(entity.handles_by_capability::<dyn Message>(), &[note]);
    assert_eq!(messages(&entity), vec!["quiet"]);
}

#[test]
fn test_remove_is_idempotent() {
    let mut entity = Entity::new("player");
    entity.attach(Metronome::default()).unwrap();
    entity.attach(Metronome::default()).unwrap();

    assert_eq!(entity.remove_all_by_capability::<dyn Tick>(), 2);
    assert_eq!(entity.remove_all_by_capability::<dyn Tick>(), 0);
}

#[test]
fn test_remove_by_id_matches_typed_removal() {
    let mut entity = Entity::new("player");
    entity.attach(Note("x".to_string())).unwrap();

    let message: ActionId = <dyn Message>::ID;
    assert!(entity.has_action(message));
    assert_eq!(entity.remove_all_by_id(message), 1);
    assert!(!entity.has_action(message));
}

#[test]
fn test_query_returns_the_stored_instance() {
    let mut entity = Entity::new("player");
    let handle = entity.attach(Announcer::new("before")).unwrap();

    for message in entity.get_all_by_capability_mut::<dyn Message>() {
        message.set_message("after".to_string());
    }

    assert_eq!(messages(&entity), vec!["after"]);
    let announcer = entity.behaviour::<Announcer>(handle).unwrap();
    assert_eq!(announcer.message, "after");

    let via_message = entity.get_all_by_capability::<dyn Message>()[0] as *const dyn Message;
    let via_tick = entity.get_all_by_capability::<dyn Tick>()[0] as *const dyn Tick;
    assert!(
        std::ptr::addr_eq(via_message, via_tick),
        "Both capabilities view the same object"
    );
}

#[test]
fn test_mutable_query_follows_index_order() {
    let mut entity = Entity::new("band");
    entity.attach(Metronome::default()).unwrap();
    entity.attach(Note("skip".to_string())).unwrap();
    entity.attach(Announcer::new("a")).unwrap();

    let mut ticking = entity.get_all_by_capability_mut::<dyn Tick>();
    assert_eq!(ticking.len(), 2, "The note does not tick");
    ticking[1].tick();
    ticking[1].tick();
    ticking[0].tick();

    let counts: Vec<u32> = entity
        .get_all_by_capability::<dyn Tick>()
        .iter()
        .map(|t| t.ticks())
        .collect();
    assert_eq!(counts, vec![1, 2]);
}

#[test]
fn test_mutable_query_on_missing_capability_is_empty() {
    let mut entity = Entity::new("player");
    entity.attach(Note("x".to_string())).unwrap();
    assert!(entity.get_all_by_capability_mut::<dyn Tick>().is_empty());
}

#[test]
fn test_detach_single_behaviour() {
    let mut entity = Entity::new("player");
    let announcer = entity.attach(Announcer::new("gone")).unwrap();
    let metronome = entity.attach(Metronome::default()).unwrap();

    assert!(entity.detach(announcer));
    assert!(!entity.detach(announcer), "Second detach finds nothing");
    assert!(!entity.has_capability::<dyn Message>());
    assert_eq!(entity.handles_by_capability::<dyn Tick>(), &[metronome]);
    assert!(!entity.detach(BehaviourHandle::from_raw(99)));
}

#[test]
fn test_typed_access_checks_concrete_type() {
    let mut entity = Entity::new("player");
    let handle = entity.attach(Metronome::default()).unwrap();

    assert!(entity.has_behaviour_of_type::<Metronome>());
    assert!(!entity.has_behaviour_of_type::<Note>());
    assert!(entity.behaviour::<Note>(handle).is_none());

    entity.behaviour_mut::<Metronome>(handle).unwrap().ticks = 7;
    assert_eq!(entity.get_all_by_capability::<dyn Tick>()[0].ticks(), 7);
}

#[test]
fn test_handles_are_not_reused_after_removal() {
    let mut entity = Entity::new("player");
    let first = entity.attach(Metronome::default()).unwrap();
    entity.remove_all_by_capability::<dyn Tick>();
    let second = entity.attach(Metronome::default()).unwrap();

    assert!(second > first);
}

#[test]
fn test_debug_lists_sorted_capabilities() {
    let mut entity = Entity::new("player");
    entity.attach(Announcer::new("x")).unwrap();

    let debug = format!("{entity:?}");
    assert!(debug.contains("name: \"player\""));
    assert!(debug.contains("behaviours: 1"));
    let expected = format!("actions: [{:?}, {:?}]", <dyn Message>::ID, <dyn Tick>::ID);
    assert!(debug.contains(&expected), "{debug}");
    assert_eq!(entity.to_string(), format!("player ({})", entity.id()));
}

#[test]
fn test_same_named_contracts_use_distinct_keys() {
    use heart::Pulse as HeartPulse;
    use lights::Pulse as LightPulse;

    assert_ne!(<dyn LightPulse>::ID, <dyn HeartPulse>::ID);

    let mut entity = Entity::new("patient");
    entity.attach(heart::Heart).unwrap();

    assert!(entity.has_capability::<dyn HeartPulse>());
    assert!(
        !entity.has_capability::<dyn LightPulse>(),
        "Only the declared contract is indexed"
    );
    assert!(entity.get_all_by_capability::<dyn LightPulse>().is_empty());
    assert_eq!(
        entity.remove_all_by_capability::<dyn LightPulse>(),
        0,
        "Removing an unrelated contract leaves the heart alone"
    );
    assert_eq!(entity.len(), 1);
    assert_eq!(entity.get_all_by_capability::<dyn HeartPulse>()[0].bpm(), 60);

    entity.attach(lights::Lamp).unwrap();
    assert_eq!(
        entity.get_all_by_capability::<dyn LightPulse>()[0].brightness(),
        200
    );
    assert_eq!(entity.remove_all_by_capability::<dyn HeartPulse>(), 1);
    assert!(entity.has_capability::<dyn LightPulse>());
}

#[test]
fn test_errors_use_the_reported_type_name() {
    let mut entity = Entity::with_config("court", EntityConfig::unique_types());

    match entity.attach(Phantom).unwrap_err() {
        EntityError::InvalidArgument { type_name, .. } => assert_eq!(type_name, "Phantom"),
        other => panic!("unexpected error: {other:?}"),
    }

    entity.attach(Herald).unwrap();
    assert_eq!(
        entity.attach(Herald).unwrap_err(),
        EntityError::DuplicateBehaviour {
            type_name: "Herald"
        }
    );
}
