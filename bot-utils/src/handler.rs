/*
Copyright 2021 Robin Marchart

   Licensed under the Apache License, Version 2.0 (the "License");
   you may not use this file except in compliance with the License.
   You may obtain a copy of the License at

       http://www.apache.org/licenses/LICENSE-2.0

   Unless required by applicable law or agreed to in writing, software
   distributed under the License is distributed on an "AS IS" BASIS,
   WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
   See the License for the specific language governing permissions and
   limitations under the License.
*/

use crate::{commands::CommandDescriptor, config::CommandsConfig, CommandResult};

mod help;
mod roll;
mod tarot;

pub use self::roll::RollCommand;
pub use self::tarot::TarotCommand;

/// The `roll` and `tarot` commands with the aliases from `config`.
pub fn default_commands(config: &CommandsConfig) -> Vec<CommandDescriptor> {
    vec![
        CommandDescriptor::new(
            "roll",
            config.roll.aliases(),
            &config.roll.description(&config.prefix),
            RollCommand,
        ),
        CommandDescriptor::new(
            "tarot",
            config.tarot.aliases(),
            &config.tarot.description(&config.prefix),
            TarotCommand,
        ),
    ]
}

/// Turns a command result into the text sent back to the chat.
pub fn render(result: &CommandResult) -> String {
    match result {
        CommandResult::Help { prefix, commands } => help::render_help(prefix, commands),
        CommandResult::MissingExpression(example) => {
            format!("❌ Please provide a dice expression, e.g. {}", example)
        }
        CommandResult::Roll(roll) => roll::render_roll(roll),
        CommandResult::Tarot(reading) => self::tarot::render_reading(reading),
        CommandResult::Failed { command, reason } => {
            format!("❌ {} failed: {}", command, reason)
        }
    }
}
