#![forbid(unsafe_code)]

//! Sliding-window encoding of padded text into `x` IDs and one-hot `y` targets.

use ndarray::{Array2, Array3};
use serde::{Deserialize, Serialize};

use crate::error::{EncodeError, EncodeResult};
use crate::vocab::{TokenId, Vocab};
use crate::window;

/// How far `y` row `i` is ahead of `x` row `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetOffset {
    /// `y` pairs each window with the window one position later, then `x`
    /// drops its last row and `y` its first. Row `i` of `y` is the window
    /// at offset `i + 2`.
    #[default]
    Double,
    /// No trim: row `i` of `y` is the window at offset `i + 1`, and the
    /// final window at offset `len - L` is kept as the last target. This
    /// yields one more row than `Double`.
    Single,
}

impl TargetOffset {
    fn trim(self) -> usize {
        match self {
            TargetOffset::Double => 1,
            TargetOffset::Single => 0,
        }
    }
}

/// Dense model inputs and targets.
#[derive(Debug, Clone, PartialEq)]
pub struct Encoded {
    /// Token IDs, shape `[rows, max_len]`.
    pub x: Array2<i64>,
    /// One-hot targets, shape `[rows, max_len, vocab_size + 1]`.
    pub y: Array3<f32>,
}

impl Encoded {
    /// Number of training steps.
    pub fn rows(&self) -> usize {
        self.x.nrows()
    }
}

/// Turns text into [`Encoded`] windows over a fixed vocabulary.
#[derive(Debug, Clone)]
pub struct WindowEncoder {
    vocab: Vocab,
    max_len: usize,
    offset: TargetOffset,
}

impl WindowEncoder {
    /// Encoder with windows of `max_len` tokens.
    pub fn new(vocab: Vocab, max_len: usize, offset: TargetOffset) -> EncodeResult<Self> {
        if max_len == 0 {
            return Err(EncodeError::ZeroWindow);
        }
        Ok(Self {
            vocab,
            max_len,
            offset,
        })
    }

    /// The vocabulary IDs are drawn from.
    pub fn vocab(&self) -> &Vocab {
        &self.vocab
    }

    /// Window length.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Target alignment.
    pub fn offset(&self) -> TargetOffset {
        self.offset
    }

    /// Padded token IDs of `text`.
    pub fn padded_ids(&self, text: &str) -> Vec<TokenId> {
        window::pad(text, self.max_len)
            .iter()
            .map(|symbol| self.vocab.id(symbol))
            .collect()
    }

    /// Pad, window and one-hot encode `text`.
    pub fn encode(&self, text: &str) -> EncodeResult<Encoded> {
        self.encode_ids(&self.padded_ids(text))
    }

    /// Window and one-hot encode an already padded ID sequence.
    pub fn encode_ids(&self, padded: &[TokenId]) -> EncodeResult<Encoded> {
        let pairs: Vec<(&[TokenId], &[TokenId])> = window::pairs(padded, self.max_len)?.collect();
        let trim = self.offset.trim();
        let rows = pairs.len().saturating_sub(trim);

        let flat: Vec<i64> = pairs
            .iter()
            .take(rows)
            .flat_map(|(input, _)| input.iter().map(|&id| i64::from(id)))
            .collect();
        let x = Array2::from_shape_vec((rows, self.max_len), flat)?;

        let mut y = Array3::<f32>::zeros((rows, self.max_len, self.vocab.target_width()));
        for (row, (_, target)) in pairs.iter().skip(trim).enumerate() {
            for (t, &id) in target.iter().enumerate() {
                if let Some(cell) = y.get_mut((row, t, id as usize)) {
                    *cell = 1.0;
                }
            }
        }
        Ok(Encoded { x, y })
    }
}
