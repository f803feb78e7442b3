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

use crate::{
    dice_types::{DiceExpression, RollError},
    digits::ascii_digits,
};

use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case},
    character::complete::digit1,
    combinator::{all_consuming, map, opt},
    sequence::{pair, preceded, tuple},
    IResult,
};
use std::convert::TryFrom;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Sign {
    Plus,
    Minus,
}

/// Syntactically valid dice expression, before any range checks.
///
/// Numbers too large for `u64` saturate so they are still reported as
/// range violations instead of syntax errors.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct RawDice {
    pub count: Option<u64>,
    pub sides: u64,
    pub modifier: Option<(Sign, u64)>,
}

impl RawDice {
    pub fn validate(self) -> Result<DiceExpression, RollError> {
        let count = self.count.unwrap_or(1);
        let count = u32::try_from(count).map_err(|_| RollError::DiceCount(count))?;
        let sides = u32::try_from(self.sides).map_err(|_| RollError::DiceSides(self.sides))?;
        let expression = DiceExpression::new(count, sides, 0)?;
        let modifier = match self.modifier {
            None => 0,
            Some((sign, value)) => {
                let value = i128::from(value);
                i64::try_from(match sign {
                    Sign::Plus => value,
                    Sign::Minus => -value,
                })
                .map_err(|_| RollError::Modifier)?
            }
        };
        DiceExpression::new(expression.count(), expression.sides(), modifier)
    }
}

pub fn parse_dice_digit(input: &str) -> IResult<&str, &str> {
    tag_no_case("d")(input)
}

pub fn parse_u64(input: &str) -> IResult<&str, u64> {
    map(digit1, |s: &str| s.parse::<u64>().unwrap_or(u64::MAX))(input)
}

pub fn parse_sign(input: &str) -> IResult<&str, Sign> {
    alt((map(tag("+"), |_| Sign::Plus), map(tag("-"), |_| Sign::Minus)))(input)
}

pub fn parse_raw_dice(input: &str) -> IResult<&str, RawDice> {
    map(
        tuple((
            opt(parse_u64),
            preceded(parse_dice_digit, parse_u64),
            opt(pair(parse_sign, parse_u64)),
        )),
        |(count, sides, modifier)| RawDice {
            count,
            sides,
            modifier,
        },
    )(input)
}

/// Drops all whitespace, lowercases the input and maps every decimal digit
/// to its ASCII form.
pub fn normalize(input: &str) -> String {
    ascii_digits(
        &input
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase(),
    )
}

pub fn parse_dice_expression(input: &str) -> Result<DiceExpression, RollError> {
    let normalized = normalize(input);
    let parsed = all_consuming(parse_raw_dice)(normalized.as_str());
    match parsed {
        Ok((_, raw)) => raw.validate(),
        Err(_) => Err(RollError::Parse(input.trim().to_string())),
    }
}
