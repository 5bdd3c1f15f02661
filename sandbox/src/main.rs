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

//! Sandbox: one entity, one demo behaviour, and a fixed number of ticks.

mod actions;
mod behaviours;
mod driver;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bocs_core::EntityConfig;
use bocs_data::Entity;
use clap::Parser;

use actions::{ActOnTick, SendMessage};
use behaviours::OnTickSendMessage;

#[derive(Parser, Debug)]
#[command(name = "sandbox", about = "Drive behaviours attached to an entity")]
struct Cli {
    /// Entity configuration in RON, e.g. `(attach_policy: UniqueType)`.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of ticks to run before the message is edited.
    #[arg(long, default_value_t = 3)]
    ticks: u32,

    /// Message printed by the demo behaviour.
    #[arg(long, default_value = "Hello from BOCS")]
    message: String,
}

fn load_config(path: Option<&Path>) -> Result<EntityConfig> {
    let Some(path) = path else {
        return Ok(EntityConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config '{}'", path.display()))?;
    ron::from_str(&text).with_context(|| format!("Invalid config '{}'", path.display()))
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    let mut entity = Entity::with_config("sandbox", config);
    entity.attach(OnTickSendMessage::new(cli.message))?;
    log::info!("Running {} tick(s) on {entity}", cli.ticks);
    driver::run_ticks(&mut entity, cli.ticks);

    for behaviour in entity.get_all_by_capability_mut::<dyn SendMessage>() {
        let edited = format!("{} (edited)", behaviour.message());
        behaviour.set_message(edited);
    }
    driver::run_ticks(&mut entity, 1);

    let removed = entity.remove_all_by_capability::<dyn ActOnTick>();
    log::info!(
        "Removed {removed} behaviour(s); {} left on {}",
        entity.len(),
        entity.name()
    );
    Ok(())
}
