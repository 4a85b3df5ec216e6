//! Text normalization
//!
//! Normalizes input text by:
//! - Choosing a locale (CJK or default) from the text itself
//! - Protecting tone syllables and multi-part names in CJK text
//! - Collapsing whitespace
//! - Optionally verbalizing English numbers and abbreviations
//! - Mapping punctuation to the canonical forms of the vocabulary

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::cjk::contains_cjk;
use super::protector::{
    contains_tone_span, protect_name_spans, protect_tone_spans, restore_name_spans,
    restore_tone_spans,
};
use super::substitution::SubstitutionTable;
use super::verbalizer::verbalize_english;
use crate::core::error::Result;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9]+@[a-zA-Z0-9]+\.[a-zA-Z]+$").expect("email pattern")
});

/// Locale a text is normalized in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    /// CJK-dominant text: spans are protected and the CJK table applies
    Cjk,
    /// Everything else
    Default,
}

/// Normalizer options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Spell out numbers and abbreviations in default-locale text
    #[serde(default)]
    pub expand_english: bool,
}

/// Text normalizer shared by both locales
#[derive(Debug, Clone, Default)]
pub struct TextNormalizer {
    config: NormalizerConfig,
}

impl TextNormalizer {
    /// Create a new TextNormalizer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a normalizer with explicit options
    pub fn with_config(config: NormalizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Decide which locale `text` is normalized in.
    ///
    /// CJK when the text has an ideograph, has no Latin letter at all, is a bare
    /// e-mail address, or carries a tone syllable.
    pub fn detect_locale(&self, text: &str) -> Locale {
        let has_cjk = contains_cjk(text);
        let has_alpha = text.chars().any(|c| c.is_ascii_alphabetic());
        if has_cjk || !has_alpha || EMAIL_RE.is_match(text) || contains_tone_span(text) {
            Locale::Cjk
        } else {
            Locale::Default
        }
    }

    /// Normalize input text.
    ///
    /// Fails only when one text holds more distinct protected spans than the
    /// placeholder alphabet can tag.
    pub fn normalize(&self, text: &str) -> Result<String> {
        let locale = self.detect_locale(text);
        debug!(?locale, "normalizing {} chars", text.len());

        let result = match locale {
            Locale::Cjk => {
                let (protected, tones) = protect_tone_spans(text.trim_end())?;
                let (protected, names) = protect_name_spans(&protected)?;

                let collapsed = normalize_whitespace(&protected);

                let restored = restore_name_spans(&collapsed, names.as_ref());
                let restored = restore_tone_spans(&restored, tones.as_ref());
                SubstitutionTable::cjk_map().apply(&restored)
            }
            Locale::Default => {
                let mut collapsed = normalize_whitespace(text);
                if self.config.expand_english {
                    collapsed = verbalize_english(&collapsed);
                }
                SubstitutionTable::default_map().apply(&collapsed)
            }
        };

        Ok(result)
    }
}

/// Collapse whitespace runs to one space and trim both ends
pub fn normalize_whitespace(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut prev_was_space = true; // Start true to trim leading spaces

    for c in text.chars() {
        if c.is_whitespace() {
            if !prev_was_space {
                result.push(' ');
                prev_was_space = true;
            }
        } else {
            result.push(c);
            prev_was_space = false;
        }
    }

    if result.ends_with(' ') {
        result.pop();
    }

    result
}
