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
use rand::RngCore;
use tarot::{CardDraw, DrawError};

pub struct TarotCommand;

impl CommandHandler for TarotCommand {
    fn execute(&self, invocation: &Invocation<'_>, rng: &mut dyn RngCore) -> CommandResult {
        CommandResult::Tarot(tarot::parse_count(invocation.args).and_then(|n| tarot::draw(n, rng)))
    }
}

pub(crate) fn render_reading(result: &Result<Vec<CardDraw>, DrawError>) -> String {
    match result {
        Ok(cards) => {
            let mut text = format!(
                "🔮 Cyber Tarot Reading\n\nDrew {} card{}:\n\n",
                cards.len(),
                if cards.len() == 1 { "" } else { "s" }
            );
            for (position, draw) in cards.iter().enumerate() {
                text.push_str(&format!(
                    "{} Card {}: {} ({})\n",
                    draw.orientation.icon(),
                    position + 1,
                    draw.card,
                    draw.orientation.label()
                ));
            }
            text
        }
        Err(e) => format!("❌ {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rolls::RngProvider;
    use tarot::{Orientation, TarotCard};

    fn run(args: &str) -> CommandResult {
        let mut rng = RngProvider::from_seed(8).get_rng().unwrap();
        TarotCommand.execute(
            &Invocation {
                prefix: "/",
                name: "tarot",
                args,
            },
            &mut rng,
        )
    }

    #[test]
    fn test_render_reading() {
        let cards = vec![
            CardDraw {
                card: TarotCard::from_index(0).unwrap(),
                orientation: Orientation::Upright,
            },
            CardDraw {
                card: TarotCard::from_index(77).unwrap(),
                orientation: Orientation::Reversed,
            },
        ];
        assert_eq!(
            render_reading(&Ok(cards)),
            "🔮 Cyber Tarot Reading\n\nDrew 2 cards:\n\n\
             🌟 Card 1: The Fool (Upright)\n\
             🌙 Card 2: King of Pentacles (Reversed)\n"
        );
    }

    #[test]
    fn test_render_rejections() {
        assert_eq!(
            render_reading(&Err(DrawError::TooFew(0))),
            "❌ Draw at least 1 card"
        );
        assert_eq!(
            render_reading(&Err(DrawError::TooMany(11))),
            "❌ At most 10 cards can be drawn"
        );
        assert_eq!(
            render_reading(&Err(DrawError::InvalidNumber("x".to_string()))),
            "❌ Please enter a valid number"
        );
    }

    #[test]
    fn test_execute() {
        match run("") {
            CommandResult::Tarot(Ok(cards)) => assert_eq!(cards.len(), 1),
            other => panic!("unexpected {:?}", other),
        }
        match run("3") {
            CommandResult::Tarot(Ok(cards)) => {
                assert_eq!(cards.len(), 3);
                assert!(render_reading(&Ok(cards)).contains("Drew 3 cards:"));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(run("0"), CommandResult::Tarot(Err(DrawError::TooFew(0))));
        assert_eq!(run("11"), CommandResult::Tarot(Err(DrawError::TooMany(11))));
        assert_eq!(
            run("x"),
            CommandResult::Tarot(Err(DrawError::InvalidNumber("x".to_string())))
        );
    }
}
