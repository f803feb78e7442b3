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
    commands::{CommandHandler, Invocation},
    CommandResult,
};
use dice_roll::{dice_roll::DiceEvaluate, parser::parse_dice_expression, RollError, RollOutcome};
use rand::RngCore;

pub struct RollCommand;

impl CommandHandler for RollCommand {
    fn execute(&self, invocation: &Invocation<'_>, rng: &mut dyn RngCore) -> CommandResult {
        if invocation.args.is_empty() {
            return CommandResult::MissingExpression(format!(
                "{}{} 2d6+3",
                invocation.prefix, invocation.name
            ));
        }
        CommandResult::Roll(parse_dice_expression(invocation.args).and_then(|e| e.evaluate(rng)))
    }
}

fn render_outcome(outcome: &RollOutcome) -> String {
    let header = format!("🎲 Rolling {}", outcome.expression);
    let modifier = outcome.modifier();
    if outcome.expression.count() == 1 {
        if modifier != 0 {
            format!(
                "{}\n\nResult: {} {:+} = {}",
                header, outcome.rolls[0], modifier, outcome.total
            )
        } else {
            format!("{}\n\nResult: {} = {}", header, outcome.rolls[0], outcome.total)
        }
    } else {
        let rolls = outcome
            .rolls
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join(" + ");
        if modifier != 0 {
            format!(
                "{}\n\nRolls: {} {:+}\nTotal: {}",
                header, rolls, modifier, outcome.total
            )
        } else {
            format!("{}\n\nRolls: {}\nTotal: {}", header, rolls, outcome.total)
        }
    }
}

pub(crate) fn render_roll(result: &Result<RollOutcome, RollError>) -> String {
    match result {
        Ok(outcome) => render_outcome(outcome),
        Err(e) => format!("❌ {}", e),
    }
}
