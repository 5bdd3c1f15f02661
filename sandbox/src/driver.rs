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

//! The external tick loop. The registry has no notion of time; this driver
//! asks it for every `ActOnTick` behaviour and calls them in order.

use bocs_data::Entity;

use crate::actions::ActOnTick;

/// Runs `ticks` ticks over `entity` and returns the number of
/// `on_tick` calls made.
pub fn run_ticks(entity: &mut Entity, ticks: u32) -> usize {
    let mut calls = 0;
    for tick in 0..ticks {
        let behaviours = entity.get_all_by_capability_mut::<dyn ActOnTick>();
        log::debug!("Tick {tick}: {} behaviour(s) to run", behaviours.len());
        for behaviour in behaviours {
            behaviour.on_tick();
            calls += 1;
        }
    }
    calls
}
