//! Text frontend configuration loaded from YAML

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::error::{FrontendError, Result};
use crate::text::segmenter::{DEFAULT_MAX_TOKENS_PER_SENTENCE, PUNCTUATION_MARK_TOKENS};
use crate::text::NormalizerConfig;

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrontendConfig {
    /// Subword vocabulary file (tokenizer.json)
    #[serde(default = "default_bpe_model")]
    pub bpe_model: PathBuf,

    /// Upper bound on tokens per sentence handed to the acoustic model
    #[serde(default = "default_max_tokens")]
    pub max_tokens_per_sentence: usize,

    /// Normalizer options
    #[serde(default)]
    pub normalizer: NormalizerConfig,

    /// Segmenter options
    #[serde(default)]
    pub segmenter: SegmenterConfig,
}

/// Segmenter configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmenterConfig {
    /// Tokens after which a sentence ends
    #[serde(default = "default_split_tokens")]
    pub split_tokens: Vec<String>,
}

fn default_bpe_model() -> PathBuf {
    PathBuf::from("checkpoints/tokenizer.json")
}

fn default_max_tokens() -> usize {
    DEFAULT_MAX_TOKENS_PER_SENTENCE
}

fn default_split_tokens() -> Vec<String> {
    PUNCTUATION_MARK_TOKENS.iter().map(|t| t.to_string()).collect()
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            split_tokens: default_split_tokens(),
        }
    }
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            bpe_model: default_bpe_model(),
            max_tokens_per_sentence: default_max_tokens(),
            normalizer: NormalizerConfig::default(),
            segmenter: SegmenterConfig::default(),
        }
    }
}

impl FrontendConfig {
    /// Load configuration from a YAML file.
    ///
    /// A relative `bpe_model` is resolved against the config file's directory.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            FrontendError::config(format!("Failed to read config file: {}", e), path)
        })?;

        let mut config = Self::from_yaml(&content).map_err(|e| match e {
            FrontendError::Config { message, .. } => FrontendError::config(message, path),
            other => other,
        })?;

        if let Some(dir) = path.parent() {
            config.bpe_model = config.resolve_model_path(dir);
        }
        Ok(config)
    }

    /// Parse and validate configuration from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check option values
    pub fn validate(&self) -> Result<()> {
        if self.max_tokens_per_sentence == 0 {
            return Err(FrontendError::validation(
                "max_tokens_per_sentence",
                "must be at least 1",
            ));
        }
        if self.segmenter.split_tokens.is_empty() {
            return Err(FrontendError::validation(
                "segmenter.split_tokens",
                "at least one split token is required",
            ));
        }
        Ok(())
    }

    /// Vocabulary path relative to `model_dir` unless already absolute
    pub fn resolve_model_path<P: AsRef<Path>>(&self, model_dir: P) -> PathBuf {
        if self.bpe_model.is_absolute() {
            self.bpe_model.clone()
        } else {
            model_dir.as_ref().join(&self.bpe_model)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FrontendConfig::default();
        assert_eq!(config.max_tokens_per_sentence, 120);
        assert_eq!(config.segmenter.split_tokens.len(), 6);
        assert!(!config.normalizer.expand_english);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = FrontendConfig::from_yaml("max_tokens_per_sentence: 80\n").unwrap();
        assert_eq!(config.max_tokens_per_sentence, 80);
        assert_eq!(config.bpe_model, PathBuf::from("checkpoints/tokenizer.json"));
    }

    #[test]
    fn test_full_yaml() {
        let yaml = r#"
bpe_model: bpe/tokenizer.json
max_tokens_per_sentence: 100
normalizer:
  expand_english: true
segmenter:
  split_tokens: [".", "?"]
"#;
        let config = FrontendConfig::from_yaml(yaml).unwrap();
        assert!(config.normalizer.expand_english);
        assert_eq!(config.segmenter.split_tokens, vec![".", "?"]);
    }

    #[test]
    fn test_zero_bound_rejected() {
        let err = FrontendConfig::from_yaml("max_tokens_per_sentence: 0\n").unwrap_err();
        assert!(matches!(err, FrontendError::Validation { .. }));
    }

    #[test]
    fn test_load_resolves_relative_model() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frontend.yaml");
        std::fs::write(&path, "bpe_model: tokenizer.json\n").unwrap();
        let config = FrontendConfig::load(&path).unwrap();
        assert_eq!(config.bpe_model, dir.path().join("tokenizer.json"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = FrontendConfig::load("does/not/exist.yaml").unwrap_err();
        assert!(err.is_construction_error());
    }

    #[test]
    fn test_bad_yaml() {
        let err = FrontendConfig::from_yaml("max_tokens_per_sentence: [oops").unwrap_err();
        assert!(matches!(err, FrontendError::Config { .. }));
    }
}
