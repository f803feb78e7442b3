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

use serde::{Deserialize, Serialize};
use std::{io, path::Path, time::Duration};
use unicode_categories::UnicodeCategories;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginInfo {
    pub name: String,
    pub description: String,
    pub version: String,
    pub author: String,
    pub enabled: bool,
}

impl Default for PluginInfo {
    fn default() -> Self {
        PluginInfo {
            name: "dice_and_tarot".to_string(),
            description: "Dice and tarot plugin".to_string(),
            version: "1.0.0".to_string(),
            author: "MoFox Community".to_string(),
            enabled: true,
        }
    }
}

/// Settings of a single command. Keys left out of a `[commands.<name>]`
/// table are filled in from that command's defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aliases: Option<Vec<String>>,
    /// `{prefix}` is replaced with the command prefix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CommandConfig {
    fn new(aliases: &[&str], description: &str) -> CommandConfig {
        CommandConfig {
            aliases: Some(aliases.iter().map(|a| a.to_string()).collect()),
            description: Some(description.to_string()),
        }
    }

    pub fn aliases(&self) -> &[String] {
        self.aliases.as_deref().unwrap_or(&[])
    }

    pub fn description(&self, prefix: &str) -> String {
        self.description
            .as_deref()
            .unwrap_or("")
            .replace("{prefix}", prefix)
    }

    fn fill_from(&mut self, defaults: CommandConfig) {
        if self.aliases.is_none() {
            self.aliases = defaults.aliases;
        }
        if self.description.is_none() {
            self.description = defaults.description;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandsConfig {
    pub prefix: String,
    pub roll: CommandConfig,
    pub tarot: CommandConfig,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        CommandsConfig {
            prefix: "/".to_string(),
            roll: CommandConfig::new(
                &["dice", "骰子"],
                "Roll tabletop dice, e.g. {prefix}roll 2d6+3 or {prefix}roll d20",
            ),
            tarot: CommandConfig::new(
                &["塔罗", "塔罗牌"],
                "Draw cyber tarot cards, e.g. {prefix}tarot or {prefix}tarot 3",
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RngConfig {
    pub reseed_s: u64,
}

impl Default for RngConfig {
    fn default() -> Self {
        RngConfig { reseed_s: 300 }
    }
}

impl RngConfig {
    pub fn reseed_period(&self) -> Duration {
        Duration::from_secs(self.reseed_s)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    pub plugin: PluginInfo,
    pub commands: CommandsConfig,
    pub rng: RngConfig,
}

/// Prefixes and aliases may not contain whitespace or control characters.
pub fn is_valid_token(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| !(c.is_separator() || c.is_other()))
}

impl PluginConfig {
    /// Reads the config at `path`, falling back to defaults on any problem.
    ///
    /// A missing file is created with the default configuration.
    pub fn load<P: AsRef<Path>>(path: P) -> PluginConfig {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => match PluginConfig::from_toml(&text) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("Unable to parse config: {}", e);
                    PluginConfig::default()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No config at {}, writing defaults", path.display());
                let config = PluginConfig::default();
                if let Err(e) = config.write(path) {
                    log::error!("Error writing config: {}", e)
                }
                config
            }
            Err(e) => {
                log::warn!("Unable to read config file: {}", e);
                PluginConfig::default()
            }
        }
    }

    pub fn from_toml(text: &str) -> Result<PluginConfig, toml::de::Error> {
        let mut config: PluginConfig = toml::from_str(text)?;
        config.sanitize();
        Ok(config)
    }

    pub fn write<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let text = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, text)
    }

    fn sanitize(&mut self) {
        let defaults = PluginConfig::default();
        if !is_valid_token(&self.commands.prefix) {
            log::warn!(
                "invalid command prefix {:?}, overwriting with {:?}",
                &self.commands.prefix,
                &defaults.commands.prefix
            );
            self.commands.prefix = defaults.commands.prefix;
        }
        self.commands.roll.fill_from(defaults.commands.roll);
        self.commands.tarot.fill_from(defaults.commands.tarot);
        for aliases in [&mut self.commands.roll, &mut self.commands.tarot]
            .iter_mut()
            .filter_map(|command| command.aliases.as_mut())
        {
            aliases.retain(|alias| {
                let valid = is_valid_token(alias);
                if !valid {
                    log::warn!("ignoring invalid command alias {:?}", alias);
                }
                valid
            });
        }
        if self.rng.reseed_s == 0 {
            log::warn!(
                "unable to use rng reseed_s of 0, overwriting with {}",
                defaults.rng.reseed_s
            );
            self.rng.reseed_s = defaults.rng.reseed_s;
        }
    }
}
