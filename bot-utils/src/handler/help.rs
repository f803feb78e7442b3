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

use crate::commands::CommandInfo;

pub(crate) fn render_help(prefix: &str, commands: &[CommandInfo]) -> String {
    let mut text = "Available commands:".to_string();
    for command in commands {
        text.push_str(&format!("\n{}{}", prefix, command.name));
        if !command.aliases.is_empty() {
            text.push_str(&format!(" ({})", command.aliases.join(", ")));
        }
        text.push_str(&format!(" - {}", command.description));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_help() {
        let commands = vec![
            CommandInfo {
                name: "roll".to_string(),
                aliases: vec!["dice".to_string()],
                description: "roll dice".to_string(),
            },
            CommandInfo {
                name: "tarot".to_string(),
                aliases: vec![],
                description: "draw cards".to_string(),
            },
        ];
        assert_eq!(
            render_help("!", &commands),
            "Available commands:\n!roll (dice) - roll dice\n!tarot - draw cards"
        );
    }
}
