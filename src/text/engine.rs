//! Subword engine interface
//!
//! The tokenizer adapter never talks to a vocabulary implementation directly;
//! it goes through [`SubwordEngine`]. [`HfSubwordEngine`] is the production
//! implementation backed by a HuggingFace `tokenizer.json` (Unigram/BPE).

use std::path::Path;
use tokenizers::Tokenizer;
use tracing::info;

use crate::core::error::{FrontendError, Result, TextOperation};

/// Operations the adapter needs from a subword vocabulary
pub trait SubwordEngine: Send + Sync {
    /// Encode text to piece ids
    fn encode_ids(&self, text: &str) -> Result<Vec<u32>>;

    /// Encode text to piece strings
    fn encode_pieces(&self, text: &str) -> Result<Vec<String>>;

    /// Encode several texts to ids in one call
    fn encode_ids_batch(&self, texts: &[String]) -> Result<Vec<Vec<u32>>> {
        texts.iter().map(|t| self.encode_ids(t)).collect()
    }

    /// Encode several texts to pieces in one call
    fn encode_pieces_batch(&self, texts: &[String]) -> Result<Vec<Vec<String>>> {
        texts.iter().map(|t| self.encode_pieces(t)).collect()
    }

    /// Decode ids back to text
    fn decode(&self, ids: &[u32]) -> Result<String>;

    /// Id of a piece, if the vocabulary has it
    fn piece_to_id(&self, piece: &str) -> Option<u32>;

    /// Piece for an id, if in range
    fn id_to_piece(&self, id: u32) -> Option<String>;

    /// Number of pieces in the vocabulary
    fn vocab_size(&self) -> usize;

    /// Id reserved for unknown input
    fn unk_id(&self) -> u32;
}

/// Literal of the unknown piece
pub const UNK_TOKEN: &str = "<unk>";

/// Fallback unknown id when the vocabulary does not list `<unk>`
const DEFAULT_UNK_ID: u32 = 2;

/// HuggingFace tokenizers-backed engine
pub struct HfSubwordEngine {
    tokenizer: Tokenizer,
    unk_id: u32,
}

impl HfSubwordEngine {
    /// Load the engine from a tokenizer.json file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(FrontendError::config(
                format!("Vocabulary file not found: {:?}", path),
                path,
            ));
        }

        let tokenizer = Tokenizer::from_file(path).map_err(|e| FrontendError::ModelLoad {
            message: format!("Failed to load tokenizer: {}", e),
            component: "subword engine".to_string(),
            path: Some(path.to_path_buf()),
        })?;

        let unk_id = tokenizer.token_to_id(UNK_TOKEN).unwrap_or(DEFAULT_UNK_ID);
        info!(
            "Loaded subword vocabulary from {:?} ({} pieces)",
            path,
            tokenizer.get_vocab_size(true)
        );

        Ok(Self { tokenizer, unk_id })
    }

    fn encode(&self, text: &str) -> Result<tokenizers::Encoding> {
        self.tokenizer
            .encode(text, false)
            .map_err(|e| FrontendError::text(TextOperation::Tokenization, e.to_string()))
    }

    fn encode_batch(&self, texts: &[String]) -> Result<Vec<tokenizers::Encoding>> {
        self.tokenizer
            .encode_batch(texts.to_vec(), false)
            .map_err(|e| FrontendError::text(TextOperation::Tokenization, e.to_string()))
    }
}

impl SubwordEngine for HfSubwordEngine {
    fn encode_ids(&self, text: &str) -> Result<Vec<u32>> {
        Ok(self.encode(text)?.get_ids().to_vec())
    }

    fn encode_pieces(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.encode(text)?.get_tokens().to_vec())
    }

    fn encode_ids_batch(&self, texts: &[String]) -> Result<Vec<Vec<u32>>> {
        Ok(self
            .encode_batch(texts)?
            .iter()
            .map(|e| e.get_ids().to_vec())
            .collect())
    }

    fn encode_pieces_batch(&self, texts: &[String]) -> Result<Vec<Vec<String>>> {
        Ok(self
            .encode_batch(texts)?
            .iter()
            .map(|e| e.get_tokens().to_vec())
            .collect())
    }

    fn decode(&self, ids: &[u32]) -> Result<String> {
        self.tokenizer
            .decode(ids, true)
            .map_err(|e| FrontendError::text(TextOperation::Decoding, e.to_string()))
    }

    fn piece_to_id(&self, piece: &str) -> Option<u32> {
        self.tokenizer.token_to_id(piece)
    }

    fn id_to_piece(&self, id: u32) -> Option<String> {
        self.tokenizer.id_to_token(id)
    }

    fn vocab_size(&self) -> usize {
        self.tokenizer.get_vocab_size(true)
    }

    fn unk_id(&self) -> u32 {
        self.unk_id
    }
}
