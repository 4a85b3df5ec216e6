//! Sentence segmentation over token streams
//!
//! Splits an already-tokenized text into runs of at most
//! `max_tokens_per_sentence` tokens, in order:
//! 1. Cut after every sentence-ending token.
//! 2. A run that is still too long is re-split after commas, then after
//!    hyphens, and finally hard-cut at the bound with a warning.
//! 3. Neighbouring runs are merged back together while they fit.
//!
//! Boundary decisions look only at token identity and length. Re-splitting is
//! driven by an explicit stack of frames, one per fallback tier, so depth is
//! bounded by the number of tiers regardless of input.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Bare word-boundary piece of the subword vocabulary
pub const WORD_BOUNDARY: &str = "\u{2581}";

/// Sentence-ending tokens used by [`split_sentences`]
pub const PUNCTUATION_MARK_TOKENS: &[&str] = &[
    ".",
    "!",
    "?",
    "\u{2581}.",
    "\u{2581}?",
    "\u{2581}...",
];

/// Tokens tried first when a sentence is too long
pub const COMMA_TOKENS: &[&str] = &[",", "\u{2581},"];

/// Tokens tried when a too-long run has no comma
pub const HYPHEN_TOKENS: &[&str] = &["-"];

/// Closing quotes that stay with the sentence they follow
pub const CLOSING_QUOTE_TOKENS: &[&str] = &["'", "\u{2581}'"];

/// Default sentence bound
pub const DEFAULT_MAX_TOKENS_PER_SENTENCE: usize = 120;

/// A run that had no safe split point and was hard-cut at the bound
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundOverflow {
    /// Length of the run before cutting
    pub run_len: usize,
    /// Bound in effect
    pub max_tokens: usize,
    /// Number of chunks the run was cut into
    pub chunks: usize,
}

/// Sentences plus the overflow events raised while producing them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentationReport {
    pub sentences: Vec<Vec<String>>,
    pub overflows: Vec<BoundOverflow>,
}

/// Split with the default sentence-ending tokens
pub fn split_sentences(tokens: &[String], max_tokens_per_sentence: usize) -> Vec<Vec<String>> {
    split_sentences_by_token(tokens, PUNCTUATION_MARK_TOKENS, max_tokens_per_sentence)
}

/// Split after any of `split_tokens`, honoring the bound
pub fn split_sentences_by_token<S: AsRef<str>>(
    tokens: &[String],
    split_tokens: &[S],
    max_tokens_per_sentence: usize,
) -> Vec<Vec<String>> {
    split_sentences_with_report(tokens, split_tokens, max_tokens_per_sentence).sentences
}

/// Like [`split_sentences_by_token`], also returning hard-cut events.
///
/// A bound of zero is treated as one.
pub fn split_sentences_with_report<S: AsRef<str>>(
    tokens: &[String],
    split_tokens: &[S],
    max_tokens_per_sentence: usize,
) -> SegmentationReport {
    let max_tokens = max_tokens_per_sentence.max(1);
    let sentence_tokens: Vec<&str> = split_tokens.iter().map(|t| t.as_ref()).collect();
    let mut overflows = Vec::new();

    let mut stack = vec![Frame::new(tokens.to_vec(), Tier::Sentence)];
    let mut finished = Vec::new();

    while let Some(frame) = stack.last_mut() {
        match frame.advance(&sentence_tokens, max_tokens, &mut overflows) {
            Step::Descend(child) => stack.push(child),
            Step::Finished => {
                let Some(done) = stack.pop() else { break };
                let merged = merge_sentences(done.sentences, max_tokens);
                match stack.last_mut() {
                    Some(parent) => parent.sentences.extend(merged),
                    None => finished = merged,
                }
            }
        }
    }

    SegmentationReport {
        sentences: finished,
        overflows,
    }
}

/// Greedily join neighbouring sentences while the result fits the bound.
///
/// Empty sentences are dropped.
pub fn merge_sentences(sentences: Vec<Vec<String>>, max_tokens_per_sentence: usize) -> Vec<Vec<String>> {
    let mut merged: Vec<Vec<String>> = Vec::with_capacity(sentences.len());
    for sentence in sentences {
        if sentence.is_empty() {
            continue;
        }
        match merged.last_mut() {
            Some(last) if last.len() + sentence.len() <= max_tokens_per_sentence => {
                last.extend(sentence);
            }
            _ => merged.push(sentence),
        }
    }
    merged
}

/// Split-token set a frame cuts on; later tiers are fallbacks
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Tier {
    Sentence,
    Comma,
    Hyphen,
}

impl Tier {
    fn tokens<'a>(self, sentence_tokens: &'a [&'a str]) -> &'a [&'a str] {
        match self {
            Tier::Sentence => sentence_tokens,
            Tier::Comma => COMMA_TOKENS,
            Tier::Hyphen => HYPHEN_TOKENS,
        }
    }

    /// Fallback tiers below this one, in priority order
    fn fallbacks(self) -> &'static [Tier] {
        match self {
            Tier::Sentence => &[Tier::Comma, Tier::Hyphen],
            Tier::Comma => &[Tier::Hyphen],
            Tier::Hyphen => &[],
        }
    }
}

enum Step {
    /// Resplit a too-long run before continuing this frame
    Descend(Frame),
    Finished,
}

struct Frame {
    tokens: Vec<String>,
    tier: Tier,
    pos: usize,
    run: Vec<String>,
    sentences: Vec<Vec<String>>,
}

impl Frame {
    fn new(tokens: Vec<String>, tier: Tier) -> Self {
        Self {
            tokens,
            tier,
            pos: 0,
            run: Vec::new(),
            sentences: Vec::new(),
        }
    }

    fn advance(
        &mut self,
        sentence_tokens: &[&str],
        max_tokens: usize,
        overflows: &mut Vec<BoundOverflow>,
    ) -> Step {
        let split_tokens = self.tier.tokens(sentence_tokens);

        while self.pos < self.tokens.len() {
            let token = self.tokens[self.pos].clone();
            self.pos += 1;
            let is_split = split_tokens.contains(&token.as_str());
            self.run.push(token);
            if !is_split {
                continue;
            }

            let mut run = std::mem::take(&mut self.run);
            if is_noise(&run) {
                continue;
            }

            if run.len() <= max_tokens {
                if run.len() < max_tokens {
                    if let Some(next) = self.tokens.get(self.pos) {
                        if CLOSING_QUOTE_TOKENS.contains(&next.as_str()) {
                            run.push(next.clone());
                            self.pos += 1;
                        }
                    }
                }
                self.sentences.push(run);
                continue;
            }

            if let Some(child) = self.resplit(run, sentence_tokens, max_tokens, overflows) {
                return Step::Descend(child);
            }
        }

        if !self.run.is_empty() {
            let run = std::mem::take(&mut self.run);
            if run.len() <= max_tokens {
                self.sentences.push(run);
            } else if let Some(child) = self.resplit(run, sentence_tokens, max_tokens, overflows) {
                return Step::Descend(child);
            }
        }

        Step::Finished
    }

    /// Hand a too-long run to the first fallback tier that can cut it, or
    /// hard-cut it in place.
    fn resplit(
        &mut self,
        run: Vec<String>,
        sentence_tokens: &[&str],
        max_tokens: usize,
        overflows: &mut Vec<BoundOverflow>,
    ) -> Option<Frame> {
        let fallback = self.tier.fallbacks().iter().copied().find(|tier| {
            let tokens = tier.tokens(sentence_tokens);
            run.iter().any(|t| tokens.contains(&t.as_str()))
        });

        if let Some(tier) = fallback {
            return Some(Frame::new(run, tier));
        }

        let chunks: Vec<Vec<String>> = run.chunks(max_tokens).map(|c| c.to_vec()).collect();
        warn!(
            run_len = run.len(),
            max_tokens,
            "The tokens length of sentence exceeds limit: {}, no split point found; cutting into {} chunks",
            max_tokens,
            chunks.len()
        );
        overflows.push(BoundOverflow {
            run_len: run.len(),
            max_tokens,
            chunks: chunks.len(),
        });
        self.sentences.extend(chunks);
        None
    }
}

/// A lone split token, or a bare boundary marker followed by one
fn is_noise(run: &[String]) -> bool {
    run.len() == 1 || (run.len() == 2 && run[0] == WORD_BOUNDARY)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("w{}", i)).collect()
    }

    fn toks(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn concat(sentences: &[Vec<String>]) -> Vec<String> {
        sentences.iter().flatten().cloned().collect()
    }

    #[test]
    fn test_short_text_is_one_sentence() {
        let tokens = toks(&["\u{2581}HELLO", ",", "\u{2581}WORLD", "!"]);
        let sentences = split_sentences(&tokens, 120);
        assert_eq!(sentences, vec![tokens]);
    }

    #[test]
    fn test_empty_input() {
        assert!(split_sentences(&[], 120).is_empty());
    }

    #[test]
    fn test_hard_cut_when_no_split_point() {
        let mut tokens = words(129);
        tokens.push(".".to_string());
        let report = split_sentences_with_report(&tokens, PUNCTUATION_MARK_TOKENS, 100);
        assert_eq!(report.sentences.len(), 2);
        assert_eq!(report.sentences[0].len(), 100);
        assert_eq!(report.sentences[1].len(), 30);
        assert_eq!(report.overflows.len(), 1);
        assert_eq!(report.overflows[0].run_len, 130);
        assert_eq!(concat(&report.sentences), tokens);
    }

    #[test]
    fn test_adjacent_sentences_are_merged() {
        let mut tokens = words(39);
        tokens.push(".".to_string());
        tokens.extend(words(49));
        tokens.push("!".to_string());
        let sentences = split_sentences(&tokens, 100);
        assert_eq!(sentences.len(), 1);
        assert_eq!(sentences[0].len(), 90);
    }

    #[test]
    fn test_merge_respects_bound() {
        let merged = merge_sentences(vec![words(40), words(50), words(20)], 100);
        assert_eq!(merged.iter().map(Vec::len).collect::<Vec<_>>(), vec![90, 20]);
        let again = merge_sentences(merged.clone(), 100);
        assert_eq!(again, merged);
    }

    #[test]
    fn test_noise_runs_are_dropped() {
        let tokens = toks(&[".", "\u{2581}", ".", "\u{2581}A", "\u{2581}B", "."]);
        let sentences = split_sentences(&tokens, 10);
        assert_eq!(sentences, vec![toks(&["\u{2581}A", "\u{2581}B", "."])]);
    }

    #[test]
    fn test_closing_quote_is_absorbed_once() {
        let tokens = toks(&["\u{2581}'", "A", "B", ".", "'", "C", "D", "?"]);
        let sentences = split_sentences(&tokens, 5);
        assert_eq!(
            sentences,
            vec![toks(&["\u{2581}'", "A", "B", ".", "'"]), toks(&["C", "D", "?"])]
        );
        assert_eq!(concat(&sentences), tokens);
    }

    #[test]
    fn test_quote_not_absorbed_when_run_is_full() {
        let tokens = toks(&["A", "B", ".", "'", "C"]);
        let sentences = split_sentences(&tokens, 3);
        assert_eq!(sentences, vec![toks(&["A", "B", "."]), toks(&["'", "C"])]);
    }

    #[test]
    fn test_comma_fallback() {
        // 12 tokens ending in "." with commas every 4 tokens, bound 5
        let tokens = toks(&[
            "a", "b", "c", ",", "d", "e", "f", "\u{2581},", "g", "h", "i", ".",
        ]);
        let report = split_sentences_with_report(&tokens, PUNCTUATION_MARK_TOKENS, 5);
        assert!(report.overflows.is_empty());
        assert_eq!(
            report.sentences,
            vec![
                toks(&["a", "b", "c", ","]),
                toks(&["d", "e", "f", "\u{2581},"]),
                toks(&["g", "h", "i", "."]),
            ]
        );
    }

    #[test]
    fn test_hyphen_fallback() {
        let tokens = toks(&["a", "b", "-", "c", "d", "-", "e", "f", "."]);
        let report = split_sentences_with_report(&tokens, PUNCTUATION_MARK_TOKENS, 4);
        assert!(report.overflows.is_empty());
        assert_eq!(
            report.sentences,
            vec![
                toks(&["a", "b", "-"]),
                toks(&["c", "d", "-"]),
                toks(&["e", "f", "."]),
            ]
        );
    }

    #[test]
    fn test_comma_run_too_long_falls_through_to_hard_cut() {
        // The only comma terminates an over-long run
        let mut tokens = words(7);
        tokens.push(",".to_string());
        tokens.push(".".to_string());
        let report = split_sentences_with_report(&tokens, PUNCTUATION_MARK_TOKENS, 3);
        assert!(report.sentences.iter().all(|s| s.len() <= 3));
        assert_eq!(concat(&report.sentences), tokens);
        assert_eq!(report.overflows.len(), 1);
    }

    #[test]
    fn test_long_trailing_run_is_bounded() {
        let tokens = words(250);
        let report = split_sentences_with_report(&tokens, PUNCTUATION_MARK_TOKENS, 120);
        assert_eq!(
            report.sentences.iter().map(Vec::len).collect::<Vec<_>>(),
            vec![120, 120, 10]
        );
        assert_eq!(report.overflows[0].chunks, 3);
    }

    #[test]
    fn test_zero_bound_is_clamped() {
        let tokens = toks(&["a", "b"]);
        let sentences = split_sentences(&tokens, 0);
        assert_eq!(sentences, vec![toks(&["a"]), toks(&["b"])]);
    }

    #[test]
    fn test_deterministic() {
        let mut tokens = words(300);
        tokens.insert(150, ",".to_string());
        tokens.push(".".to_string());
        assert_eq!(split_sentences(&tokens, 50), split_sentences(&tokens, 50));
    }
}
