//! Character substitution tables
//!
//! Two static, locale-keyed maps from raw punctuation to the canonical forms the
//! subword vocabulary knows about. Application is a single left-to-right pass
//! that always prefers the longest key starting at a position, so `...` wins
//! over any single-character rule.

use aho_corasick::{AhoCorasick, MatchKind};
use once_cell::sync::Lazy;

/// Rules shared by both locales, in declaration order.
const DEFAULT_RULES: &[(&str, &str)] = &[
    ("：", ","),
    ("；", ","),
    (";", ","),
    ("，", ","),
    ("。", "."),
    ("！", "!"),
    ("？", "?"),
    ("\n", " "),
    ("·", "-"),
    ("、", ","),
    ("...", "…"),
    (",,,", "…"),
    ("，，，", "…"),
    ("……", "…"),
    ("\u{201C}", "'"), // “
    ("\u{201D}", "'"), // ”
    ("\"", "'"),
    ("\u{2018}", "'"), // ‘
    ("\u{2019}", "'"), // ’
    ("（", "'"),
    ("）", "'"),
    ("(", "'"),
    (")", "'"),
    ("《", "'"),
    ("》", "'"),
    ("【", "'"),
    ("】", "'"),
    ("[", "'"),
    ("]", "'"),
    ("—", "-"),
    ("～", "-"),
    ("~", "-"),
    ("「", "'"),
    ("」", "'"),
    (":", ","),
];

/// Extra rules only applied in the CJK locale.
const CJK_EXTRA_RULES: &[(&str, &str)] = &[("$", ".")];

static DEFAULT_TABLE: Lazy<SubstitutionTable> =
    Lazy::new(|| SubstitutionTable::from_rules(DEFAULT_RULES.iter().copied()));

static CJK_TABLE: Lazy<SubstitutionTable> = Lazy::new(|| {
    SubstitutionTable::from_rules(CJK_EXTRA_RULES.iter().chain(DEFAULT_RULES).copied())
});

/// Immutable longest-match substitution map
pub struct SubstitutionTable {
    rules: Vec<(&'static str, &'static str)>,
    matcher: AhoCorasick,
}

impl std::fmt::Debug for SubstitutionTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubstitutionTable")
            .field("rules", &self.rules.len())
            .finish()
    }
}

impl SubstitutionTable {
    fn from_rules(rules: impl Iterator<Item = (&'static str, &'static str)>) -> Self {
        let rules: Vec<_> = rules.collect();
        let matcher = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .build(rules.iter().map(|(from, _)| *from))
            .expect("substitution keys are valid literal patterns");
        Self { rules, matcher }
    }

    /// Table used for text that is not in the CJK locale
    pub fn default_map() -> &'static SubstitutionTable {
        &DEFAULT_TABLE
    }

    /// Table used for CJK-locale text (default rules plus currency)
    pub fn cjk_map() -> &'static SubstitutionTable {
        &CJK_TABLE
    }

    /// Replace every key occurrence with its canonical value in one pass
    pub fn apply(&self, text: &str) -> String {
        let replacements: Vec<&str> = self.rules.iter().map(|(_, to)| *to).collect();
        self.matcher.replace_all(text, &replacements)
    }

    /// Canonical replacement for an exact key
    #[cfg(test)]
    fn get(&self, key: &str) -> Option<&'static str> {
        self.rules
            .iter()
            .find(|(from, _)| *from == key)
            .map(|(_, to)| *to)
    }

    /// Number of rules in the table
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Distinct canonical values produced by this table
    pub fn canonical_values(&self) -> Vec<&'static str> {
        let mut values: Vec<&'static str> = Vec::new();
        for (_, to) in &self.rules {
            if !values.contains(to) {
                values.push(to);
            }
        }
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cjk_map_is_superset() {
        let default = SubstitutionTable::default_map();
        let cjk = SubstitutionTable::cjk_map();
        assert_eq!(cjk.len(), default.len() + 1);
        assert_eq!(cjk.get("$"), Some("."));
        assert_eq!(default.get("$"), None);
        for (from, to) in DEFAULT_RULES {
            assert_eq!(cjk.get(from), Some(*to));
        }
    }

    #[test]
    fn test_longest_key_wins() {
        let table = SubstitutionTable::default_map();
        assert_eq!(table.apply("wait..."), "wait…");
        assert_eq!(table.apply("只有,,,才是"), "只有…才是");
        assert_eq!(table.apply("好，，，吧"), "好…吧");
        assert_eq!(table.apply("这……"), "这…");
        // Two dots are not an ellipsis
        assert_eq!(table.apply("a..b"), "a..b");
    }

    #[test]
    fn test_quotes_brackets_and_dashes() {
        let table = SubstitutionTable::default_map();
        assert_eq!(table.apply("“hi” (there) 【x】"), "'hi' 'there' 'x'");
        assert_eq!(table.apply("a—b～c~d"), "a-b-c-d");
        assert_eq!(table.apply("note: one; two"), "note, one, two");
    }

    #[test]
    fn test_currency_only_in_cjk() {
        assert_eq!(SubstitutionTable::default_map().apply("$12"), "$12");
        assert_eq!(SubstitutionTable::cjk_map().apply("$12"), ".12");
    }

    #[test]
    fn test_untouched_text() {
        let table = SubstitutionTable::default_map();
        assert_eq!(table.apply("I love you!"), "I love you!");
        assert_eq!(table.apply(""), "");
    }

    #[test]
    fn test_canonical_values() {
        let values = SubstitutionTable::cjk_map().canonical_values();
        assert!(values.contains(&","));
        assert!(values.contains(&"…"));
        assert!(values.contains(&"'"));
        let unique: std::collections::HashSet<_> = values.iter().collect();
        assert_eq!(unique.len(), values.len());
    }
}
