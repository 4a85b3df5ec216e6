//! CJK character helpers
//!
//! The subword vocabulary is trained on text where every CJK character stands
//! alone, so the tokenizer inserts a space between neighbouring CJK characters
//! before encoding and removes those spaces again after decoding.

/// Check if a character is a CJK ideograph
pub fn is_cjk_character(c: char) -> bool {
    matches!(c as u32,
        0x4E00..=0x9FFF |     // CJK Unified Ideographs
        0x3400..=0x4DBF |     // CJK Unified Ideographs Extension A
        0x20000..=0x2A6DF |   // CJK Unified Ideographs Extension B
        0x2A700..=0x2B73F |   // CJK Unified Ideographs Extension C
        0x2B740..=0x2B81F |   // CJK Unified Ideographs Extension D
        0x2B820..=0x2CEAF |   // CJK Unified Ideographs Extension E
        0x2CEB0..=0x2EBEF |   // CJK Unified Ideographs Extension F
        0xF900..=0xFAFF |     // CJK Compatibility Ideographs
        0x2F800..=0x2FA1F     // CJK Compatibility Ideographs Supplement
    )
}

/// Characters that get their own piece in the pre-pass.
///
/// Wider than [`is_cjk_character`]: also covers Hangul, kana, CJK symbols and
/// full-width forms.
pub fn is_cjk_boundary_char(c: char) -> bool {
    matches!(c as u32,
        0x1100..=0x11FF |
        0x2E80..=0xA4CF |
        0xA840..=0xD7AF |
        0xF900..=0xFAFF |
        0xFE30..=0xFE4F |
        0xFF65..=0xFFDC |
        0x20000..=0x2FFFF
    )
}

/// Check if text contains any CJK ideograph
pub fn contains_cjk(text: &str) -> bool {
    text.chars().any(is_cjk_character)
}

/// Put every CJK character in its own space-separated piece.
///
/// Non-CJK runs are trimmed and upper-cased, matching the vocabulary.
/// `"你好world"` becomes `"你 好 WORLD"`.
pub fn tokenize_by_cjk_char(line: &str) -> String {
    let mut pieces: Vec<String> = Vec::new();
    let mut run = String::new();

    fn flush(run: &mut String, pieces: &mut Vec<String>) {
        let trimmed = run.trim();
        if !trimmed.is_empty() {
            pieces.push(trimmed.to_uppercase());
        }
        run.clear();
    }

    for c in line.trim().chars() {
        if is_cjk_boundary_char(c) {
            flush(&mut run, &mut pieces);
            pieces.push(c.to_string());
        } else {
            run.push(c);
        }
    }
    flush(&mut run, &mut pieces);

    pieces.join(" ")
}

/// Undo [`tokenize_by_cjk_char`] on decoded text.
///
/// Spaces survive only between two Latin words; everything else is glued back
/// together. With `lower_case`, words containing Latin letters are lower-cased.
pub fn de_tokenize_by_cjk_char(line: &str, lower_case: bool) -> String {
    let mut out = String::with_capacity(line.len());
    let mut prev: Option<&str> = None;

    for word in line.split_whitespace() {
        if let Some(prev) = prev {
            let prev_latin = prev.chars().last().is_some_and(|c| c.is_ascii_alphabetic());
            let next_latin = word
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '-');
            if prev_latin && next_latin {
                out.push(' ');
            }
        }
        if lower_case && word.chars().any(|c| c.is_ascii_alphabetic()) {
            out.push_str(&word.to_lowercase());
        } else {
            out.push_str(word);
        }
        prev = Some(word);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cjk_tokenization() {
        assert_eq!(tokenize_by_cjk_char("你好world"), "你 好 WORLD");
        assert_eq!(tokenize_by_cjk_char("hello你好world"), "HELLO 你 好 WORLD");
        assert_eq!(
            tokenize_by_cjk_char("'我爱你'的英语是'I love you'"),
            "' 我 爱 你 ' 的 英 语 是 'I LOVE YOU'"
        );
        assert_eq!(tokenize_by_cjk_char("  "), "");
    }

    #[test]
    fn test_cjk_punctuation_is_separated() {
        assert_eq!(tokenize_by_cjk_char("好。好"), "好 。 好");
    }

    #[test]
    fn test_de_tokenize() {
        assert_eq!(
            de_tokenize_by_cjk_char("你 好 世 界 是 HELLO WORLD 的 中 文", false),
            "你好世界是HELLO WORLD的中文"
        );
        assert_eq!(
            de_tokenize_by_cjk_char("你 好 世 界 是 HELLO WORLD 的 中 文", true),
            "你好世界是hello world的中文"
        );
        assert_eq!(de_tokenize_by_cjk_char("ABC, DEF", false), "ABC,DEF");
        assert_eq!(de_tokenize_by_cjk_char("GORDON -LEVITT", true), "gordon -levitt");
    }

    #[test]
    fn test_round_trip_pure_cjk() {
        let text = "晕眩是一种感觉";
        assert_eq!(de_tokenize_by_cjk_char(&tokenize_by_cjk_char(text), false), text);
    }

    #[test]
    fn test_is_cjk_character() {
        assert!(is_cjk_character('你'));
        assert!(is_cjk_character('好'));
        assert!(!is_cjk_character('a'));
        assert!(!is_cjk_character('!'));
        assert!(!is_cjk_character('。'));
        assert!(is_cjk_boundary_char('。'));
        assert!(is_cjk_boundary_char('한'));
    }

    #[test]
    fn test_contains_cjk() {
        assert!(contains_cjk("你好世界"));
        assert!(contains_cjk("Hello 你好"));
        assert!(!contains_cjk("Hello World"));
    }
}
