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

use bocs_core::{ActionSet, Behaviour};

use crate::actions::{ActOnTick, SendMessage};

/// Prints its message every tick.
#[derive(Debug, Clone)]
pub struct OnTickSendMessage {
    message: String,
    sent: u32,
}

impl OnTickSendMessage {
    /// Creates the behaviour with the message it will print.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            sent: 0,
        }
    }

    /// How many times the message has been printed.
    pub fn sent(&self) -> u32 {
        self.sent
    }
}

impl ActOnTick for OnTickSendMessage {
    fn on_tick(&mut self) {
        println!("{}", self.message);
        self.sent += 1;
    }
}

impl SendMessage for OnTickSendMessage {
    fn message(&self) -> &str {
        &self.message
    }

    fn set_message(&mut self, message: String) {
        self.message = message;
    }
}

impl Behaviour for OnTickSendMessage {
    fn declare_actions(actions: &mut ActionSet<Self>) {
        actions
            .provide::<dyn ActOnTick>(|b| b, |b| b)
            .provide::<dyn SendMessage>(|b| b, |b| b);
    }
}
