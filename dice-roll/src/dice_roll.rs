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

use crate::dice_types::*;
use crate::limits::DiceLimits;
use rand::{distributions::Uniform, Rng};

#[cfg(feature = "logging")]
use log::debug;

pub trait DiceEvaluate {
    fn evaluate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<RollOutcome, RollError>;
}

impl DiceEvaluate for DiceExpression {
    fn evaluate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<RollOutcome, RollError> {
        // with both limits representable no partial sum can overflow
        self.min().and(self.max()).ok_or(RollError::Overflow)?;

        let dist = Uniform::new_inclusive(1, i64::from(self.sides()));
        let rolls: Vec<i64> = (0..self.count()).map(|_| rng.sample(dist)).collect();
        let total = rolls.iter().sum::<i64>() + self.modifier();

        #[cfg(feature = "logging")]
        {
            debug!("Dice roll result for {} is {:?} = {}", &self, &rolls, total);
        }

        Ok(RollOutcome {
            expression: *self,
            rolls,
            total,
        })
    }
}
