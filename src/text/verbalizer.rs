//! English verbalization
//!
//! Spells out numbers and expands common abbreviations for text in the
//! default locale. Disabled unless `NormalizerConfig::expand_english` is set.

use aho_corasick::{AhoCorasick, MatchKind};
use once_cell::sync::Lazy;

const ABBREVIATIONS: &[(&str, &str)] = &[
    ("Mr.", "Mister"),
    ("Mrs.", "Misses"),
    ("Ms.", "Miss"),
    ("Dr.", "Doctor"),
    ("Prof.", "Professor"),
    ("Jr.", "Junior"),
    ("Sr.", "Senior"),
    ("vs.", "versus"),
    ("etc.", "etcetera"),
    ("e.g.", "for example"),
    ("i.e.", "that is"),
];

static ABBREVIATION_MATCHER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .match_kind(MatchKind::LeftmostLongest)
        .build(ABBREVIATIONS.iter().map(|(abbr, _)| *abbr))
        .expect("abbreviations are valid literal patterns")
});

const ONES: [&str; 20] = [
    "", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "eleven",
    "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen", "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

const DIGITS: [&str; 10] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

/// Expand abbreviations, then spell out numbers
pub fn verbalize_english(text: &str) -> String {
    verbalize_numbers(&expand_abbreviations(text))
}

/// Expand abbreviations that start a word; `devs.` keeps its `vs.`
pub fn expand_abbreviations(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut last = 0;

    for m in ABBREVIATION_MATCHER.find_iter(text) {
        let mid_word = text[..m.start()]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_alphanumeric());
        if mid_word {
            continue;
        }
        result.push_str(&text[last..m.start()]);
        result.push_str(ABBREVIATIONS[m.pattern().as_usize()].1);
        last = m.end();
    }
    result.push_str(&text[last..]);

    result
}

/// Replace every (optionally negative, optionally decimal) number with words
pub fn verbalize_numbers(text: &str) -> String {
    let mut result = String::with_capacity(text.len() * 2);
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let starts_negative = chars[i] == '-'
            && chars.get(i + 1).is_some_and(|c| c.is_ascii_digit())
            && (i == 0 || chars[i - 1].is_whitespace());
        if !(chars[i].is_ascii_digit() || starts_negative) {
            result.push(chars[i]);
            i += 1;
            continue;
        }

        let start = i;
        if starts_negative {
            i += 1;
        }

        let mut digits = String::new();
        let mut has_decimal = false;
        // Thousands separators: first group 1-3 digits, then groups of exactly 3
        let mut group_len = 0;
        let mut grouped = false;
        while i < chars.len() {
            let c = chars[i];
            let separator = c == ','
                && !has_decimal
                && (1..=3).contains(&group_len)
                && (!grouped || group_len == 3)
                && (1..=3).all(|k| chars.get(i + k).is_some_and(|n| n.is_ascii_digit()))
                && !chars.get(i + 4).is_some_and(|n| n.is_ascii_digit());
            if separator {
                grouped = true;
                group_len = 0;
                i += 1;
                continue;
            }
            let decimal_point = c == '.'
                && !has_decimal
                && chars.get(i + 1).is_some_and(|n| n.is_ascii_digit());
            if !(c.is_ascii_digit() || decimal_point) {
                break;
            }
            has_decimal |= decimal_point;
            if !has_decimal {
                group_len += 1;
            }
            digits.push(c);
            i += 1;
        }

        match number_to_words(&digits, starts_negative) {
            Some(words) => result.push_str(&words),
            None => result.extend(&chars[start..i]),
        }
    }

    result
}

fn number_to_words(digits: &str, negative: bool) -> Option<String> {
    let mut words = String::new();
    if negative {
        words.push_str("negative ");
    }

    match digits.split_once('.') {
        Some((integer, fraction)) => {
            words.push_str(&integer_to_words(integer.parse().ok()?)?);
            words.push_str(" point ");
            words.push_str(&digits_to_words(fraction));
        }
        None => words.push_str(&integer_to_words(digits.parse().ok()?)?),
    }

    Some(words)
}

/// Convert an integer to words
pub fn integer_to_words(num: u64) -> Option<String> {
    if num == 0 {
        return Some("zero".to_string());
    }

    let mut n = num;
    let mut parts = Vec::new();

    for (scale, name) in [
        (1_000_000_000_000u64, "trillion"),
        (1_000_000_000, "billion"),
        (1_000_000, "million"),
        (1000, "thousand"),
    ] {
        if n >= scale {
            let head = n / scale;
            if head >= 1000 {
                return None;
            }
            parts.push(format!("{} {}", integer_to_words(head)?, name));
            n %= scale;
        }
    }

    if n >= 100 {
        parts.push(format!("{} hundred", ONES[(n / 100) as usize]));
        n %= 100;
    }

    if n >= 20 {
        let (t, o) = ((n / 10) as usize, (n % 10) as usize);
        if o > 0 {
            parts.push(format!("{}-{}", TENS[t], ONES[o]));
        } else {
            parts.push(TENS[t].to_string());
        }
    } else if n > 0 {
        parts.push(ONES[n as usize].to_string());
    }

    Some(parts.join(" "))
}

fn digits_to_words(digits: &str) -> String {
    digits
        .chars()
        .filter_map(|c| c.to_digit(10).map(|d| DIGITS[d as usize]))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_conversion() {
        assert_eq!(integer_to_words(0), Some("zero".to_string()));
        assert_eq!(integer_to_words(13), Some("thirteen".to_string()));
        assert_eq!(integer_to_words(21), Some("twenty-one".to_string()));
        assert_eq!(integer_to_words(100), Some("one hundred".to_string()));
        assert_eq!(
            integer_to_words(123),
            Some("one hundred twenty-three".to_string())
        );
        assert_eq!(integer_to_words(1000), Some("one thousand".to_string()));
        assert_eq!(
            integer_to_words(5_000_000),
            Some("five million".to_string())
        );
    }

    #[test]
    fn test_numbers_in_text() {
        assert_eq!(verbalize_numbers("I have 5 apples"), "I have five apples");
        assert_eq!(verbalize_numbers("only 2.5 left"), "only two point five left");
        assert_eq!(verbalize_numbers("it is -3 outside"), "it is negative three outside");
        // Trailing period is punctuation, not a decimal point
        assert_eq!(verbalize_numbers("I am 8."), "I am eight.");
        // Hyphenated ranges keep the hyphen
        assert_eq!(verbalize_numbers("1-2"), "one-two");
    }

    #[test]
    fn test_thousands_separators() {
        assert_eq!(
            verbalize_numbers("1,234 files"),
            "one thousand two hundred thirty-four files"
        );
        assert_eq!(
            verbalize_numbers("1,000,000.5"),
            "one million point five"
        );
        // Not a grouped number
        assert_eq!(verbalize_numbers("1,2,3"), "one,two,three");
        assert_eq!(verbalize_numbers("12,3456"), "twelve,three thousand four hundred fifty-six");
    }

    #[test]
    fn test_abbreviations() {
        assert_eq!(verbalize_english("Dr. Smith"), "Doctor Smith");
        assert_eq!(verbalize_english("Mrs. Jones"), "Misses Jones");
        assert_eq!(
            verbalize_english("Dr. Smith has 3 patients"),
            "Doctor Smith has three patients"
        );
    }

    #[test]
    fn test_abbreviation_inside_word_is_kept() {
        assert_eq!(verbalize_english("the devs. left"), "the devs. left");
        assert_eq!(verbalize_english("cats vs. dogs"), "cats versus dogs");
        assert_eq!(expand_abbreviations("(Dr. Who)"), "(Doctor Who)");
    }

    #[test]
    fn test_oversized_number_is_kept() {
        let huge = "12345678901234567890";
        assert_eq!(verbalize_numbers(huge), huge);
    }
}
