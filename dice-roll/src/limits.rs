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

use crate::dice_types::DiceExpression;

/// Smallest and largest total an expression can produce.
///
/// `None` when the bound does not fit into an `i64`.
pub trait DiceLimits {
    fn min(&self) -> Option<i64>;
    fn max(&self) -> Option<i64>;
}

impl DiceLimits for DiceExpression {
    fn min(&self) -> Option<i64> {
        i64::from(self.count()).checked_add(self.modifier())
    }

    fn max(&self) -> Option<i64> {
        (i64::from(self.count()) * i64::from(self.sides())).checked_add(self.modifier())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limits() {
        let expr = DiceExpression::new(2, 6, 3).unwrap();
        assert_eq!((expr.min(), expr.max()), (Some(5), Some(15)));
        let expr = DiceExpression::new(2, 6, -3).unwrap();
        assert_eq!((expr.min(), expr.max()), (Some(-1), Some(9)));
        let expr = DiceExpression::new(1, 20, 0).unwrap();
        assert_eq!((expr.min(), expr.max()), (Some(1), Some(20)));
    }

    #[test]
    fn test_limits_overflow() {
        let expr = DiceExpression::new(100, 1000, i64::MAX).unwrap();
        assert_eq!(expr.min(), None);
        assert_eq!(expr.max(), None);
        let expr = DiceExpression::new(100, 1000, i64::MIN).unwrap();
        assert_eq!(expr.min(), Some(i64::MIN + 100));
        assert_eq!(expr.max(), Some(i64::MIN + 100_000));
    }
}
