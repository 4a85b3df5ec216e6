//! # SDKWork-TTS Text - Text frontend for subword-level TTS
//!
//! Prepares free-form text for an acoustic model with a fixed text context:
//!
//! - **Normalization**: locale detection, whitespace collapsing and punctuation
//!   canonicalization, with tone syllables and multi-part names shielded
//! - **Tokenization**: CJK pre-pass in front of a subword vocabulary
//! - **Segmentation**: bounded sentences cut on punctuation tokens, with comma,
//!   hyphen and hard-cut fallbacks
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sdkwork_tts_text::{FrontendConfig, TextFrontend};
//!
//! let config = FrontendConfig::load("checkpoints/frontend.yaml")?;
//! let frontend = TextFrontend::from_config(&config)?;
//!
//! let prepared = frontend.prepare("晕XUAN4是一种GAN3觉")?;
//! for ids in &prepared.sentence_ids {
//!     // feed each sentence to the acoustic model
//! }
//! ```
//!
//! ## Normalization only
//!
//! ```rust
//! use sdkwork_tts_text::TextNormalizer;
//!
//! let normalizer = TextNormalizer::new();
//! assert_eq!(normalizer.normalize("受不liao3你了").unwrap(), "受不LIAO3你了");
//! ```

pub mod config;
pub mod core;
pub mod text;

// Re-exports for convenience
pub use crate::config::{FrontendConfig, SegmenterConfig};
pub use crate::core::error::{FrontendError, Result, TextOperation};
pub use crate::text::{
    split_sentences, split_sentences_by_token, BoundOverflow, Locale, NormalizerConfig,
    PreparedText, SegmentationReport, SubwordEngine, TextFrontend, TextNormalizer, TextTokenizer,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum text tokens per segment
pub const MAX_TEXT_TOKENS_PER_SEGMENT: usize = text::segmenter::DEFAULT_MAX_TOKENS_PER_SENTENCE;
