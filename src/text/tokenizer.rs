//! Text Tokenization
//!
//! Adapter between raw text and the subword engine. Encoding runs the
//! normalizer and the CJK pre-pass before handing text to the engine; decoding
//! undoes the pre-pass.

use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

use super::cjk::{de_tokenize_by_cjk_char, tokenize_by_cjk_char};
use super::engine::{HfSubwordEngine, SubwordEngine, UNK_TOKEN};
use super::segmenter::{
    split_sentences_with_report, SegmentationReport, PUNCTUATION_MARK_TOKENS, WORD_BOUNDARY,
};
use super::{SubstitutionTable, TextNormalizer};
use crate::core::error::Result;

/// Begin-of-text piece
pub const BOS_TOKEN: &str = "<s>";
/// End-of-text piece
pub const EOS_TOKEN: &str = "</s>";
/// Begin-of-text id
pub const BOS_TOKEN_ID: u32 = 0;
/// End-of-text id
pub const EOS_TOKEN_ID: u32 = 1;
/// The vocabulary has no pad piece
pub const PAD_TOKEN_ID: i64 = -1;

/// Special pieces of the vocabulary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialTokens {
    pub unk_token: &'static str,
    pub pad_token: Option<&'static str>,
    pub bos_token: &'static str,
    pub eos_token: &'static str,
}

impl Default for SpecialTokens {
    fn default() -> Self {
        Self {
            unk_token: UNK_TOKEN,
            pad_token: None,
            bos_token: BOS_TOKEN,
            eos_token: EOS_TOKEN,
        }
    }
}

/// Subword tokenizer with text normalization in front
pub struct TextTokenizer {
    engine: Box<dyn SubwordEngine>,
    normalizer: Option<TextNormalizer>,
}

impl TextTokenizer {
    /// Load tokenizer from a vocabulary file.
    ///
    /// Fails with a configuration error if the file does not exist.
    pub fn load<P: AsRef<Path>>(vocab_file: P, normalizer: Option<TextNormalizer>) -> Result<Self> {
        let engine = HfSubwordEngine::load(vocab_file)?;
        Ok(Self::with_engine(engine, normalizer))
    }

    /// Wrap an already loaded engine
    pub fn with_engine<E: SubwordEngine + 'static>(
        engine: E,
        normalizer: Option<TextNormalizer>,
    ) -> Self {
        Self {
            engine: Box::new(engine),
            normalizer,
        }
    }

    pub fn normalizer(&self) -> Option<&TextNormalizer> {
        self.normalizer.as_ref()
    }

    /// Text exactly as it is handed to the engine.
    ///
    /// A lone glyph (ignoring surrounding whitespace) is passed through
    /// untouched.
    pub fn preprocess(&self, text: &str) -> Result<String> {
        Ok(self.prepare_input(text)?.1)
    }

    /// Normalized text and the pieces the engine produced for it, from a
    /// single normalization pass.
    pub fn normalize_and_tokenize(&self, text: &str) -> Result<(String, Vec<String>)> {
        if text.is_empty() {
            return Ok((String::new(), vec![]));
        }
        let (normalized, engine_input) = self.prepare_input(text)?;
        let pieces = self.engine.encode_pieces(&engine_input)?;
        Ok((normalized, pieces))
    }

    /// Encode text to token IDs
    pub fn encode(&self, text: &str) -> Result<Vec<u32>> {
        if text.is_empty() {
            return Ok(vec![]);
        }
        let ids = self.engine.encode_ids(&self.preprocess(text)?)?;
        self.log_unknown(&ids);
        Ok(ids)
    }

    /// Tokenize text into token strings
    pub fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.normalize_and_tokenize(text)?.1)
    }

    /// Encode several texts with one engine call
    pub fn batch_encode<S: AsRef<str>>(&self, texts: &[S]) -> Result<Vec<Vec<u32>>> {
        let prepared = self.preprocess_batch(texts)?;
        let ids = self.engine.encode_ids_batch(&prepared)?;
        for row in &ids {
            self.log_unknown(row);
        }
        Ok(ids)
    }

    /// Tokenize several texts with one engine call
    pub fn batch_tokenize<S: AsRef<str>>(&self, texts: &[S]) -> Result<Vec<Vec<String>>> {
        let prepared = self.preprocess_batch(texts)?;
        self.engine.encode_pieces_batch(&prepared)
    }

    /// Encode text wrapped in begin/end ids for the acoustic model
    pub fn encode_for_gpt(&self, text: &str) -> Result<Vec<u32>> {
        let mut ids = vec![BOS_TOKEN_ID];
        ids.extend(self.encode(text)?);
        ids.push(EOS_TOKEN_ID);
        Ok(ids)
    }

    /// Decode token IDs back to text, removing the CJK spacing
    pub fn decode(&self, ids: &[u32], lower_case: bool) -> Result<String> {
        let decoded = self.engine.decode(ids)?;
        Ok(de_tokenize_by_cjk_char(&decoded, lower_case))
    }

    /// Convert tokens to token IDs; unknown pieces map to the unknown id
    pub fn convert_tokens_to_ids<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<u32> {
        tokens
            .iter()
            .map(|t| {
                self.engine
                    .piece_to_id(t.as_ref())
                    .unwrap_or_else(|| self.engine.unk_id())
            })
            .collect()
    }

    /// Convert token IDs back to tokens, skipping out-of-range ids
    pub fn convert_ids_to_tokens(&self, ids: &[u32]) -> Vec<String> {
        ids.iter()
            .filter_map(|&id| self.engine.id_to_piece(id))
            .collect()
    }

    /// Piece to id mapping for the whole vocabulary
    pub fn get_vocab(&self) -> HashMap<String, u32> {
        (0..self.vocab_size() as u32)
            .filter_map(|id| self.engine.id_to_piece(id).map(|piece| (piece, id)))
            .collect()
    }

    /// Get vocabulary size
    pub fn vocab_size(&self) -> usize {
        self.engine.vocab_size()
    }

    /// Check if a token exists in vocabulary
    pub fn token_exists(&self, token: &str) -> bool {
        self.engine.piece_to_id(token).is_some()
    }

    /// Canonical punctuation the normalizer can emit that the vocabulary has
    /// no piece for, bare or after a word boundary
    pub fn missing_canonical_pieces(&self) -> Vec<&'static str> {
        SubstitutionTable::cjk_map()
            .canonical_values()
            .into_iter()
            .filter(|value| !value.trim().is_empty())
            .filter(|value| {
                !self.token_exists(value)
                    && !self.token_exists(&format!("{}{}", WORD_BOUNDARY, value))
            })
            .collect()
    }

    pub fn unk_token_id(&self) -> u32 {
        self.engine.unk_id()
    }

    pub fn bos_token_id(&self) -> u32 {
        BOS_TOKEN_ID
    }

    pub fn eos_token_id(&self) -> u32 {
        EOS_TOKEN_ID
    }

    pub fn pad_token_id(&self) -> i64 {
        PAD_TOKEN_ID
    }

    pub fn special_tokens(&self) -> SpecialTokens {
        SpecialTokens::default()
    }

    /// Number of unknown ids in an encoding
    pub fn unknown_count(&self, ids: &[u32]) -> usize {
        let unk = self.engine.unk_id();
        ids.iter().filter(|&&id| id == unk).count()
    }

    /// Whether any id is the unknown id
    pub fn contains_unknown(&self, ids: &[u32]) -> bool {
        self.unknown_count(ids) > 0
    }

    /// Split tokens into sentences at sentence-ending punctuation
    pub fn split_sentences(&self, tokens: &[String], max_tokens_per_sentence: usize) -> Vec<Vec<String>> {
        self.split_sentences_with_report(tokens, max_tokens_per_sentence)
            .sentences
    }

    /// [`Self::split_sentences`], also returning hard-cut events
    pub fn split_sentences_with_report(
        &self,
        tokens: &[String],
        max_tokens_per_sentence: usize,
    ) -> SegmentationReport {
        split_sentences_with_report(tokens, PUNCTUATION_MARK_TOKENS, max_tokens_per_sentence)
    }

    /// (normalized text, engine input); a lone glyph is both.
    fn prepare_input(&self, text: &str) -> Result<(String, String)> {
        if text.trim().chars().count() == 1 {
            return Ok((text.to_string(), text.to_string()));
        }
        let normalized = match &self.normalizer {
            Some(normalizer) => normalizer.normalize(text)?,
            None => text.to_string(),
        };
        let engine_input = tokenize_by_cjk_char(&normalized);
        Ok((normalized, engine_input))
    }

    fn preprocess_batch<S: AsRef<str>>(&self, texts: &[S]) -> Result<Vec<String>> {
        texts
            .iter()
            .map(|t| match t.as_ref() {
                "" => Ok(String::new()),
                text => self.preprocess(text),
            })
            .collect()
    }

    fn log_unknown(&self, ids: &[u32]) {
        let unknown = self.unknown_count(ids);
        if unknown > 0 {
            debug!("{} of {} ids map to {}", unknown, ids.len(), UNK_TOKEN);
        }
    }
}
