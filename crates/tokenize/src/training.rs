#![forbid(unsafe_code)]

//! Whole-corpus variant: one vocabulary and one dense `(x, y)` pair per text.

use ndarray::{Array2, Array3};

use crate::config::EncodeConfig;
use crate::corpus;
use crate::encoder::{Encoded, WindowEncoder};
use crate::error::EncodeResult;
use crate::vocab::{TokenId, Vocab};

/// Eagerly encoded training data for a single in-memory text.
#[derive(Debug, Clone)]
pub struct TrainingData {
    text: String,
    encoder: WindowEncoder,
    tokens: Vec<TokenId>,
    encoded: Encoded,
}

impl TrainingData {
    /// Encode `text` with default sentinels and double-shifted targets.
    pub fn new(text: impl Into<String>, max_len: usize) -> EncodeResult<Self> {
        Self::with_config(text, EncodeConfig::new(max_len))
    }

    /// Encode `text` with explicit settings. The vocabulary is the text's
    /// own character set.
    pub fn with_config(text: impl Into<String>, config: EncodeConfig) -> EncodeResult<Self> {
        let text = text.into();
        let vocab = Vocab::from_text(&text, config.sentinels);
        let encoder = WindowEncoder::new(vocab, config.max_len, config.offset)?;
        let tokens = encoder.padded_ids(&text);
        let encoded = encoder.encode_ids(&tokens)?;
        tracing::debug!(
            rows = encoded.rows(),
            vocab_size = encoder.vocab().vocab_size(),
            "encoded corpus"
        );
        Ok(Self {
            text,
            encoder,
            tokens,
            encoded,
        })
    }

    /// Training data over [`corpus::BEATLES`].
    pub fn beatles(max_len: usize) -> EncodeResult<Self> {
        Self::new(corpus::BEATLES, max_len)
    }

    /// The source text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Window length.
    pub fn max_len(&self) -> usize {
        self.encoder.max_len()
    }

    /// Vocabulary built from the text.
    pub fn vocab(&self) -> &Vocab {
        self.encoder.vocab()
    }

    /// Number of IDs in the vocabulary.
    pub fn vocab_size(&self) -> usize {
        self.vocab().vocab_size()
    }

    /// Padded token IDs the windows were cut from.
    pub fn tokens(&self) -> &[TokenId] {
        &self.tokens
    }

    /// Input IDs, `[rows, max_len]`.
    pub fn x(&self) -> &Array2<i64> {
        &self.encoded.x
    }

    /// One-hot targets, `[rows, max_len, vocab_size + 1]`.
    pub fn y(&self) -> &Array3<f32> {
        &self.encoded.y
    }

    /// Take the arrays out.
    pub fn into_encoded(self) -> Encoded {
        self.encoded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::TargetOffset;
    use std::collections::BTreeSet;

    #[test]
    fn two_char_corpus() {
        let data = TrainingData::new("ab", 2).unwrap();
        assert_eq!(data.tokens(), &[0, 0, 3, 4, 1]);
        assert_eq!(data.x().shape(), &[2, 2]);
        assert_eq!(data.y().shape(), &[2, 2, 6]);
        assert_eq!(data.vocab_size(), 5);
        assert_eq!(data.text(), "ab");
    }

    #[test]
    fn beatles_shapes() {
        let data = TrainingData::beatles(20).unwrap();
        let distinct: BTreeSet<char> = corpus::BEATLES.chars().collect();
        let n = corpus::BEATLES.chars().count();
        assert_eq!(data.vocab_size(), distinct.len() + 3);
        assert_eq!(data.tokens().len(), 20 + n + 1);
        assert_eq!(data.x().shape(), &[n, 20]);
        assert_eq!(data.y().shape(), &[n, 20, distinct.len() + 4]);
    }

    #[test]
    fn tokens_decode_back_to_text() {
        let data = TrainingData::new("weight", 3).unwrap();
        assert_eq!(
            data.vocab().decode(data.tokens()),
            "<start><start><start>weight<end>"
        );
    }

    #[test]
    fn single_offset_keeps_every_window() {
        let cfg = EncodeConfig::new(4).with_offset(TargetOffset::Single);
        let data = TrainingData::with_config("long time", cfg).unwrap();
        assert_eq!(data.x().nrows(), "long time".len() + 1);
        let encoded = data.into_encoded();
        assert_eq!(encoded.rows(), 10);
    }

    #[test]
    fn zero_window_fails() {
        assert!(TrainingData::new("abc", 0).is_err());
    }
}
