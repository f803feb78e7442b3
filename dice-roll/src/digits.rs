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

use unicode_categories::UnicodeCategories;

/// Value of a decimal digit (category `Nd`) of any script.
///
/// Decimal digits are encoded in contiguous runs starting at zero, so the
/// value is the distance to the start of the run modulo ten.
pub fn decimal_value(c: char) -> Option<u32> {
    if let Some(value) = c.to_digit(10) {
        return Some(value);
    }
    if !c.is_number_decimal_digit() {
        return None;
    }
    let mut start = c as u32;
    while let Some(prev) = start.checked_sub(1).and_then(std::char::from_u32) {
        if !prev.is_number_decimal_digit() {
            break;
        }
        start -= 1;
    }
    Some((c as u32 - start) % 10)
}

/// Replaces every decimal digit with its ASCII counterpart.
pub fn ascii_digits(input: &str) -> String {
    input
        .chars()
        .map(|c| match decimal_value(c) {
            Some(value) => std::char::from_digit(value, 10).unwrap_or(c),
            None => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_value() {
        assert_eq!(decimal_value('0'), Some(0));
        assert_eq!(decimal_value('7'), Some(7));
        assert_eq!(decimal_value('０'), Some(0));
        assert_eq!(decimal_value('９'), Some(9));
        assert_eq!(decimal_value('٣'), Some(3));
        assert_eq!(decimal_value('७'), Some(7));
        // five adjacent runs of mathematical digits
        assert_eq!(decimal_value('\u{1D7CE}'), Some(0));
        assert_eq!(decimal_value('\u{1D7D9}'), Some(1));
        assert_eq!(decimal_value('\u{1D7FF}'), Some(9));
        assert_eq!(decimal_value('Ⅲ'), None);
        assert_eq!(decimal_value('½'), None);
        assert_eq!(decimal_value('d'), None);
    }

    #[test]
    fn test_ascii_digits() {
        assert_eq!(ascii_digits("３d６"), "3d6");
        assert_eq!(ascii_digits("２d10-３"), "2d10-3");
        assert_eq!(ascii_digits("abc"), "abc");
        assert_eq!(ascii_digits(""), "");
    }
}
