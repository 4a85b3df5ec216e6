//! Text frontend pipeline
//!
//! raw text → normalize → encode → split into bounded sentences.

use serde::Serialize;
use tracing::{debug, warn};

use super::segmenter::{split_sentences_with_report, BoundOverflow};
use super::{TextNormalizer, TextTokenizer};
use crate::config::FrontendConfig;
use crate::core::error::Result;

/// Text ready for the acoustic model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreparedText {
    /// Normalized input, exactly as it was tokenized
    pub normalized: String,
    /// Token runs, one per sentence
    pub sentences: Vec<Vec<String>>,
    /// Token ids, one row per sentence
    pub sentence_ids: Vec<Vec<u32>>,
    /// Sentences that had to be hard-cut at the bound
    pub overflows: Vec<BoundOverflow>,
    /// Ids mapped to the unknown piece across all sentences
    pub unknown_tokens: usize,
}

/// Normalizer, tokenizer and segmenter wired together
pub struct TextFrontend {
    tokenizer: TextTokenizer,
    split_tokens: Vec<String>,
    max_tokens_per_sentence: usize,
}

impl TextFrontend {
    /// Build the frontend described by `config`, loading its vocabulary
    pub fn from_config(config: &FrontendConfig) -> Result<Self> {
        config.validate()?;
        let normalizer = TextNormalizer::with_config(config.normalizer.clone());
        let tokenizer = TextTokenizer::load(&config.bpe_model, Some(normalizer))?;
        let missing = tokenizer.missing_canonical_pieces();
        if !missing.is_empty() {
            warn!(
                ?missing,
                "Vocabulary has no piece for some normalized punctuation; it will encode as {}",
                super::UNK_TOKEN
            );
        }
        Ok(Self::with_tokenizer(tokenizer, config))
    }

    /// Build the frontend around an existing tokenizer
    pub fn with_tokenizer(tokenizer: TextTokenizer, config: &FrontendConfig) -> Self {
        Self {
            tokenizer,
            split_tokens: config.segmenter.split_tokens.clone(),
            max_tokens_per_sentence: config.max_tokens_per_sentence,
        }
    }

    pub fn tokenizer(&self) -> &TextTokenizer {
        &self.tokenizer
    }

    pub fn max_tokens_per_sentence(&self) -> usize {
        self.max_tokens_per_sentence
    }

    /// Run the full pipeline on one text
    pub fn prepare(&self, text: &str) -> Result<PreparedText> {
        let (normalized, tokens) = self.tokenizer.normalize_and_tokenize(text)?;
        let report =
            split_sentences_with_report(&tokens, &self.split_tokens, self.max_tokens_per_sentence);

        let sentence_ids: Vec<Vec<u32>> = report
            .sentences
            .iter()
            .map(|s| self.tokenizer.convert_tokens_to_ids(s))
            .collect();
        let unknown_tokens = sentence_ids
            .iter()
            .map(|ids| self.tokenizer.unknown_count(ids))
            .sum();

        debug!(
            tokens = tokens.len(),
            sentences = report.sentences.len(),
            overflows = report.overflows.len(),
            "prepared text"
        );

        Ok(PreparedText {
            normalized,
            sentences: report.sentences,
            sentence_ids,
            overflows: report.overflows,
            unknown_tokens,
        })
    }
}
