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

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_DICE: u32 = 1;
pub const MAX_DICE: u32 = 100;
pub const MIN_SIDES: u32 = 2;
pub const MAX_SIDES: u32 = 1000;

/// A validated `[count]d<sides>[±modifier]` roll.
///
/// Only [`DiceExpression::new`] and the parser construct these, so
/// `count` and `sides` always lie within their bounds.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct DiceExpression {
    count: u32,
    sides: u32,
    modifier: i64,
}

impl DiceExpression {
    pub fn new(count: u32, sides: u32, modifier: i64) -> Result<DiceExpression, RollError> {
        if !(MIN_DICE..=MAX_DICE).contains(&count) {
            return Err(RollError::DiceCount(count.into()));
        }
        if !(MIN_SIDES..=MAX_SIDES).contains(&sides) {
            return Err(RollError::DiceSides(sides.into()));
        }
        Ok(DiceExpression {
            count,
            sides,
            modifier,
        })
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn sides(&self) -> u32 {
        self.sides
    }

    pub fn modifier(&self) -> i64 {
        self.modifier
    }
}

/// Writes a non-zero modifier with an explicit sign, nothing otherwise.
pub(crate) struct SignedModifier(pub i64);

impl fmt::Display for SignedModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 != 0 {
            write!(f, "{:+}", self.0)
        } else {
            Ok(())
        }
    }
}

impl fmt::Display for DiceExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.count == 1 {
            write!(f, "d{}{}", self.sides, SignedModifier(self.modifier))
        } else {
            write!(
                f,
                "{}d{}{}",
                self.count,
                self.sides,
                SignedModifier(self.modifier)
            )
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct RollOutcome {
    pub expression: DiceExpression,
    pub rolls: Vec<i64>,
    pub total: i64,
}

impl RollOutcome {
    pub fn modifier(&self) -> i64 {
        self.expression.modifier
    }
}

/// The three families of user input problems shared by every command.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ErrorKind {
    Parse,
    Range,
    InputType,
}

#[derive(Debug, PartialEq, Eq, Clone, thiserror::Error)]
pub enum RollError {
    #[error("Invalid dice expression `{0}`, use the format XdY+Z (e.g. 2d6+3)")]
    Parse(String),
    #[error("The number of dice must be between {min} and {max}", min = MIN_DICE, max = MAX_DICE)]
    DiceCount(u64),
    #[error("The number of sides must be between {min} and {max}", min = MIN_SIDES, max = MAX_SIDES)]
    DiceSides(u64),
    #[error("The modifier must be between {min} and {max}", min = i64::MIN, max = i64::MAX)]
    Modifier,
    #[error("Overflow detected")]
    Overflow,
}

impl RollError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RollError::Parse(_) => ErrorKind::Parse,
            RollError::DiceCount(_)
            | RollError::DiceSides(_)
            | RollError::Modifier
            | RollError::Overflow => ErrorKind::Range,
        }
    }
}
