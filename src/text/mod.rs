//! Text processing modules
//!
//! - Punctuation substitution tables
//! - Tone-syllable and name protection
//! - Text normalization
//! - Subword tokenization with CJK pre-pass
//! - Sentence segmentation over token streams

pub mod cjk;
pub mod engine;
mod frontend;
mod normalizer;
pub mod protector;
pub mod segmenter;
mod substitution;
mod tokenizer;
pub mod verbalizer;

pub use engine::{HfSubwordEngine, SubwordEngine, UNK_TOKEN};
pub use frontend::{PreparedText, TextFrontend};
pub use normalizer::{normalize_whitespace, Locale, NormalizerConfig, TextNormalizer};
pub use segmenter::{
    merge_sentences, split_sentences, split_sentences_by_token, split_sentences_with_report,
    BoundOverflow, SegmentationReport,
};
pub use substitution::SubstitutionTable;
pub use tokenizer::{
    SpecialTokens, TextTokenizer, BOS_TOKEN, BOS_TOKEN_ID, EOS_TOKEN, EOS_TOKEN_ID, PAD_TOKEN_ID,
};
