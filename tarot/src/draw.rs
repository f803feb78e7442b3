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

use crate::cards::{TarotCard, DECK_SIZE};
use dice_roll::{digits::ascii_digits, ErrorKind};
use rand::{seq::index, Rng};
#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};
use std::num::IntErrorKind;

#[cfg(feature = "logging")]
use log::debug;

pub const MIN_CARDS: i64 = 1;
pub const MAX_CARDS: i64 = 10;
pub const DEFAULT_CARDS: usize = 1;

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub enum Orientation {
    Upright,
    Reversed,
}

impl Orientation {
    pub fn label(&self) -> &'static str {
        match self {
            Orientation::Upright => "Upright",
            Orientation::Reversed => "Reversed",
        }
    }

    pub fn icon(&self) -> char {
        match self {
            Orientation::Upright => '🌟',
            Orientation::Reversed => '🌙',
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct CardDraw {
    pub card: TarotCard,
    pub orientation: Orientation,
}

#[derive(Debug, PartialEq, Eq, Clone, thiserror::Error)]
pub enum DrawError {
    #[error("Please enter a valid number")]
    InvalidNumber(String),
    #[error("Draw at least {} card", MIN_CARDS)]
    TooFew(i64),
    #[error("At most {} cards can be drawn", MAX_CARDS)]
    TooMany(i64),
}

impl DrawError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DrawError::InvalidNumber(_) => ErrorKind::InputType,
            DrawError::TooFew(_) | DrawError::TooMany(_) => ErrorKind::Range,
        }
    }
}

fn check_count(count: i64) -> Result<usize, DrawError> {
    if count < MIN_CARDS {
        Err(DrawError::TooFew(count))
    } else if count > MAX_CARDS {
        Err(DrawError::TooMany(count))
    } else {
        Ok(count as usize)
    }
}

/// Reads the optional card count of a reading.
///
/// Empty input means [`DEFAULT_CARDS`]. Any integer parses, so `-1` is
/// rejected as too few rather than as an invalid number. Digits of any
/// script are accepted.
pub fn parse_count(input: &str) -> Result<usize, DrawError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(DEFAULT_CARDS);
    }
    let parsed = ascii_digits(input).parse::<i64>();
    match parsed {
        Ok(count) => check_count(count),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Err(DrawError::TooMany(i64::MAX)),
            IntErrorKind::NegOverflow => Err(DrawError::TooFew(i64::MIN)),
            _ => Err(DrawError::InvalidNumber(input.to_string())),
        },
    }
}

/// Draws `count` distinct cards, each with an independent orientation.
pub fn draw<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Result<Vec<CardDraw>, DrawError> {
    check_count(count as i64)?;
    // index::sample returns the chosen indices in random order
    let cards: Vec<CardDraw> = index::sample(&mut *rng, DECK_SIZE, count)
        .into_iter()
        .filter_map(TarotCard::from_index)
        .map(|card| CardDraw {
            card,
            orientation: if rng.gen::<bool>() {
                Orientation::Upright
            } else {
                Orientation::Reversed
            },
        })
        .collect();

    #[cfg(feature = "logging")]
    {
        debug!("drew {:?}", &cards);
    }

    Ok(cards)
}
