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

pub mod commands;
pub mod config;
pub mod handler;
pub mod rolls;

pub use async_trait::async_trait;
pub use commands::{CommandDescriptor, CommandHandler, CommandInfo, CommandRouter, Invocation};
pub use config::PluginConfig;
pub use dice_roll::{ErrorKind, RollError, RollOutcome};
pub use rolls::RngProvider;
pub use tarot::{CardDraw, DrawError};

use std::sync::Arc;

#[derive(Debug, PartialEq, Eq)]
pub enum CommandResult {
    Help {
        prefix: String,
        commands: Vec<CommandInfo>,
    },
    MissingExpression(String),
    Roll(Result<RollOutcome, RollError>),
    Tarot(Result<Vec<CardDraw>, DrawError>),
    Failed {
        command: String,
        reason: String,
    },
}

/// The host's way of delivering a reply to the chat a message came from.
#[async_trait]
pub trait Responder: Send + Sync {
    type Error: std::fmt::Display + Send;
    async fn send_text(&self, text: String) -> Result<(), Self::Error>;
}

#[async_trait]
pub trait StopListener: Sized + Sync + Clone + Send + 'static {
    async fn wait_stop(&mut self) -> ();
}

#[async_trait]
impl StopListener for tokio::sync::watch::Receiver<bool> {
    async fn wait_stop(&mut self) -> () {
        loop {
            match self.changed().await {
                Err(_) => {
                    break;
                }
                Ok(_) => {
                    if *self.borrow() {
                        break;
                    }
                }
            }
        }
    }
}

pub struct Plugin {
    config: PluginConfig,
    router: CommandRouter,
    rng: Arc<RngProvider>,
}

impl Plugin {
    pub fn new(
        config: PluginConfig,
        commands: Vec<CommandDescriptor>,
        rng: Arc<RngProvider>,
    ) -> Plugin {
        let router = CommandRouter::new(&config.commands.prefix, commands);
        Plugin {
            config,
            router,
            rng,
        }
    }

    /// Plugin with the `roll` and `tarot` commands, seeded from the OS.
    pub fn with_default_commands(config: PluginConfig) -> Result<Plugin, rand::Error> {
        let commands = handler::default_commands(&config.commands);
        Ok(Plugin::new(config, commands, Arc::new(RngProvider::new()?)))
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    pub fn rng(&self) -> Arc<RngProvider> {
        self.rng.clone()
    }

    /// Announces the plugin and its commands.
    ///
    /// Returns whether the plugin answers commands at all.
    pub fn on_enable(&self) -> bool {
        if !self.config.plugin.enabled {
            log::info!(
                "{} {} is disabled in the configuration, ignoring all commands",
                &self.config.plugin.name,
                &self.config.plugin.version
            );
            return false;
        }
        log::info!(
            "🎲 {} {} enabled",
            &self.config.plugin.name,
            &self.config.plugin.version
        );
        for command in self.router.commands() {
            log::info!(
                "command {}{}: {}",
                self.router.prefix(),
                &command.name,
                &command.description
            );
        }
        true
    }

    pub fn on_disable(&self) {
        log::info!("{} disabled", &self.config.plugin.name);
    }

    pub fn eval(&self, message: &str) -> Option<CommandResult> {
        if !self.config.plugin.enabled {
            return None;
        }
        self.router.dispatch(message, &self.rng)
    }

    /// Answers `message` through `responder`.
    ///
    /// Returns whether the message was a command of this plugin.
    pub async fn respond<R: Responder>(&self, message: &str, responder: &R) -> bool {
        match self.eval(message) {
            Some(result) => {
                if let Err(err) = responder.send_text(handler::render(&result)).await {
                    log::warn!("Unable to reply to message: {}", err)
                }
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Collect {
        replies: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Responder for Collect {
        type Error = std::convert::Infallible;

        async fn send_text(&self, text: String) -> Result<(), Self::Error> {
            self.replies.lock().push(text);
            Ok(())
        }
    }

    struct Broken;

    #[async_trait]
    impl Responder for Broken {
        type Error = String;

        async fn send_text(&self, _text: String) -> Result<(), Self::Error> {
            Err("channel closed".to_string())
        }
    }

    fn plugin(config: PluginConfig) -> Plugin {
        let commands = handler::default_commands(&config.commands);
        Plugin::new(config, commands, Arc::new(RngProvider::from_seed(17)))
    }

    #[tokio::test]
    async fn test_respond() {
        let plugin = plugin(PluginConfig::default());
        let out = Collect::default();
        assert!(plugin.respond("/roll d20", &out).await);
        assert!(plugin.respond("/dice 0d6", &out).await);
        assert!(plugin.respond("/塔罗牌 2", &out).await);
        assert!(plugin.respond("/tarot eleven", &out).await);
        assert!(plugin.respond("/roll", &out).await);
        assert!(!plugin.respond("hello there", &out).await);
        let replies = out.replies.lock();
        assert_eq!(replies.len(), 5);
        assert!(replies[0].starts_with("🎲 Rolling d20\n\nResult: "));
        assert_eq!(replies[1], "❌ The number of dice must be between 1 and 100");
        assert!(replies[2].contains("Drew 2 cards:"));
        assert_eq!(replies[3], "❌ Please enter a valid number");
        assert_eq!(
            replies[4],
            "❌ Please provide a dice expression, e.g. /roll 2d6+3"
        );
    }

    #[tokio::test]
    async fn test_failed_delivery_is_not_fatal() {
        let plugin = plugin(PluginConfig::default());
        assert!(plugin.respond("/tarot", &Broken).await);
    }

    #[test]
    fn test_disabled_plugin_ignores_messages() {
        let mut config = PluginConfig::default();
        config.plugin.enabled = false;
        let plugin = plugin(config);
        assert!(!plugin.on_enable());
        assert_eq!(plugin.eval("/roll d20"), None);
    }

    #[test]
    fn test_enabled_plugin_announces_commands() {
        let plugin = plugin(PluginConfig::default());
        assert!(plugin.on_enable());
        assert!(plugin.eval("/roll d20").is_some());
    }

    #[test]
    fn test_custom_prefix() {
        let mut config = PluginConfig::default();
        config.commands.prefix = "!".to_string();
        let plugin = plugin(config);
        assert!(plugin.eval("/roll d20").is_none());
        assert!(matches!(
            plugin.eval("!roll d20"),
            Some(CommandResult::Roll(Ok(_)))
        ));
        match plugin.eval("!help") {
            Some(result) => assert!(handler::render(&result).contains("!tarot")),
            None => panic!("help not routed"),
        }
    }

    #[test]
    fn test_same_input_same_error() {
        let plugin = plugin(PluginConfig::default());
        for _ in 0..10 {
            assert_eq!(
                plugin.eval("/roll 2d1"),
                Some(CommandResult::Roll(Err(RollError::DiceSides(1))))
            );
        }
    }
}
