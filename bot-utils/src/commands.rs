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

use crate::{rolls::RngProvider, CommandResult};
use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case},
    character::complete::{multispace0, multispace1},
    combinator::eof,
    sequence::{preceded, terminated},
    IResult,
};
use rand::RngCore;
use std::{
    panic::{catch_unwind, AssertUnwindSafe},
    sync::Arc,
};

/// What a handler gets to see of the message that invoked it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invocation<'a> {
    pub prefix: &'a str,
    pub name: &'a str,
    pub args: &'a str,
}

pub trait CommandHandler: Send + Sync {
    fn execute(&self, invocation: &Invocation<'_>, rng: &mut dyn RngCore) -> CommandResult;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInfo {
    pub name: String,
    pub aliases: Vec<String>,
    pub description: String,
}

#[derive(Clone)]
pub struct CommandDescriptor {
    pub info: CommandInfo,
    pub handler: Arc<dyn CommandHandler>,
}

impl CommandDescriptor {
    pub fn new<H: CommandHandler + 'static>(
        name: &str,
        aliases: &[String],
        description: &str,
        handler: H,
    ) -> CommandDescriptor {
        CommandDescriptor {
            info: CommandInfo {
                name: name.to_string(),
                aliases: aliases
                    .iter()
                    .filter(|alias| !alias.is_empty())
                    .cloned()
                    .collect(),
                description: description.to_string(),
            },
            handler: Arc::new(handler),
        }
    }

    fn tokens(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.info.name.as_str())
            .chain(self.info.aliases.iter().map(|a| a.as_str()))
    }
}

pub enum Route<'a> {
    Help,
    Command(&'a CommandDescriptor, Invocation<'a>),
}

fn parse_prefix<'a>(input: &'a str, prefix: &str) -> IResult<&'a str, &'a str> {
    preceded(multispace0, tag(prefix))(input)
}

/// Matches `name` as a whole word, so `tarot` does not match `tarots`.
fn parse_name<'a>(input: &'a str, name: &str) -> IResult<&'a str, &'a str> {
    terminated(tag_no_case(name), alt((multispace1, eof)))(input)
}

fn parse_help(input: &str) -> IResult<&str, &str> {
    terminated(
        alt((tag_no_case("help"), tag_no_case("h"))),
        preceded(multispace0, eof),
    )(input)
}

/// Explicit command table, built once by the host at startup.
pub struct CommandRouter {
    prefix: String,
    commands: Vec<CommandDescriptor>,
}

impl CommandRouter {
    pub fn new<S: ToString>(prefix: S, commands: Vec<CommandDescriptor>) -> CommandRouter {
        CommandRouter {
            prefix: prefix.to_string(),
            commands,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn commands(&self) -> impl Iterator<Item = &CommandInfo> {
        self.commands.iter().map(|c| &c.info)
    }

    pub fn route<'a>(&'a self, message: &'a str) -> Option<Route<'a>> {
        let (rest, _) = parse_prefix(message, &self.prefix).ok()?;
        for command in self.commands.iter() {
            if let Some(args) = command
                .tokens()
                .find_map(|token| parse_name(rest, token).ok().map(|(args, _)| args))
            {
                return Some(Route::Command(
                    command,
                    Invocation {
                        prefix: &self.prefix,
                        name: &command.info.name,
                        args: args.trim(),
                    },
                ));
            }
        }
        parse_help(rest).ok().map(|_| Route::Help)
    }

    /// Runs the command in `message`, if there is one.
    ///
    /// Faults never escape: a failing random source or a panicking handler
    /// is logged and turned into [`CommandResult::Failed`].
    pub fn dispatch(&self, message: &str, rng: &RngProvider) -> Option<CommandResult> {
        match self.route(message)? {
            Route::Help => Some(CommandResult::Help {
                prefix: self.prefix.clone(),
                commands: self.commands().cloned().collect(),
            }),
            Route::Command(command, invocation) => {
                log::info!("running {} with {:?}", invocation.name, invocation.args);
                let mut rng = match rng.get_rng() {
                    Ok(rng) => rng,
                    Err(e) => {
                        log::error!("unable to get rng for {}: {}", invocation.name, e);
                        return Some(CommandResult::Failed {
                            command: invocation.name.to_string(),
                            reason: e.to_string(),
                        });
                    }
                };
                match catch_unwind(AssertUnwindSafe(|| {
                    command.handler.execute(&invocation, &mut rng)
                })) {
                    Ok(result) => Some(result),
                    Err(panic) => {
                        let reason = panic
                            .downcast_ref::<&str>()
                            .map(|s| s.to_string())
                            .or_else(|| panic.downcast_ref::<String>().cloned())
                            .unwrap_or_else(|| "internal error".to_string());
                        log::error!("{} failed: {}", invocation.name, reason);
                        Some(CommandResult::Failed {
                            command: invocation.name.to_string(),
                            reason,
                        })
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    impl CommandHandler for Echo {
        fn execute(&self, invocation: &Invocation<'_>, _rng: &mut dyn RngCore) -> CommandResult {
            CommandResult::MissingExpression(format!(
                "{}{}|{}",
                invocation.prefix, invocation.name, invocation.args
            ))
        }
    }

    struct Panics;

    impl CommandHandler for Panics {
        fn execute(&self, _invocation: &Invocation<'_>, _rng: &mut dyn RngCore) -> CommandResult {
            panic!("boom")
        }
    }

    fn router() -> CommandRouter {
        CommandRouter::new(
            "/",
            vec![
                CommandDescriptor::new(
                    "echo",
                    &["e".to_string(), "回声".to_string(), "回声声".to_string()],
                    "echo",
                    Echo,
                ),
                CommandDescriptor::new("explode", &[], "panics", Panics),
            ],
        )
    }

    fn echo(message: &str) -> Option<String> {
        match router().dispatch(message, &RngProvider::from_seed(0)) {
            Some(CommandResult::MissingExpression(s)) => Some(s),
            Some(other) => panic!("unexpected {:?}", other),
            None => None,
        }
    }

    #[test]
    fn test_route_names_and_aliases() {
        assert_eq!(echo("/echo 2d6"), Some("/echo|2d6".to_string()));
        assert_eq!(echo("/ECHO 2d6"), Some("/echo|2d6".to_string()));
        assert_eq!(echo("/e  a  b "), Some("/echo|a  b".to_string()));
        assert_eq!(echo("  /echo"), Some("/echo|".to_string()));
        assert_eq!(echo("/回声 x"), Some("/echo|x".to_string()));
        assert_eq!(echo("/回声声 x"), Some("/echo|x".to_string()));
    }

    #[test]
    fn test_route_rejects() {
        assert_eq!(echo("echo 2d6"), None);
        assert_eq!(echo("!echo 2d6"), None);
        assert_eq!(echo("/echoes"), None);
        assert_eq!(echo("/"), None);
        assert_eq!(echo(""), None);
    }

    #[test]
    fn test_help() {
        let result = router().dispatch("/help", &RngProvider::from_seed(0));
        match result {
            Some(CommandResult::Help { prefix, commands }) => {
                assert_eq!(prefix, "/");
                assert_eq!(commands.len(), 2);
                assert_eq!(commands[0].aliases.len(), 3);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(
            router().dispatch("/h", &RngProvider::from_seed(0)),
            Some(CommandResult::Help { .. })
        ));
        assert!(router()
            .dispatch("/help me", &RngProvider::from_seed(0))
            .is_none());
    }

    #[test]
    fn test_panicking_handler_is_contained() {
        assert_eq!(
            router().dispatch("/explode", &RngProvider::from_seed(0)),
            Some(CommandResult::Failed {
                command: "explode".to_string(),
                reason: "boom".to_string()
            })
        );
    }
}
