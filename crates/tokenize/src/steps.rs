#![forbid(unsafe_code)]

//! Window steps for [`batch::Accumulator`]: every text item expands into its
//! `(x-row, y-row)` pairs and batches are stacked back into dense arrays.

use batch::{partition_in_order, BatchPolicy, BatchResult};
use ndarray::{Array1, Array2, Array3};

use crate::encoder::{TargetOffset, WindowEncoder};
use crate::error::EncodeResult;
use crate::vocab::{Sentinels, Vocab};

/// One input row and its one-hot target rows.
pub type WindowStep = (Array1<i64>, Array2<f32>);

/// `batch_size` stacked steps.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowBatch {
    /// `[batch_size, max_len]` input IDs.
    pub x: Array2<i64>,
    /// `[batch_size, max_len, vocab_size + 1]` one-hot targets.
    pub y: Array3<f32>,
}

/// Batch policy over text items sharing one fixed vocabulary.
#[derive(Debug, Clone)]
pub struct CorpusSteps {
    encoder: WindowEncoder,
}

impl CorpusSteps {
    /// Policy over an existing encoder.
    pub fn new(encoder: WindowEncoder) -> Self {
        Self { encoder }
    }

    /// Printable-ASCII vocabulary, default sentinels, double-shifted targets.
    pub fn printable(max_len: usize) -> EncodeResult<Self> {
        let vocab = Vocab::printable(Sentinels::default());
        Ok(Self::new(WindowEncoder::new(
            vocab,
            max_len,
            TargetOffset::Double,
        )?))
    }

    /// The encoder used for every item.
    pub fn encoder(&self) -> &WindowEncoder {
        &self.encoder
    }

    fn stack(&self, group: &[WindowStep]) -> WindowBatch {
        let max_len = self.encoder.max_len();
        let width = self.encoder.vocab().target_width();
        let mut x = Array2::zeros((group.len(), max_len));
        let mut y = Array3::zeros((group.len(), max_len, width));
        for ((mut x_row, mut y_row), (x_step, y_step)) in
            x.outer_iter_mut().zip(y.outer_iter_mut()).zip(group)
        {
            x_row.assign(x_step);
            y_row.assign(y_step);
        }
        WindowBatch { x, y }
    }
}

impl<T: AsRef<str>> BatchPolicy<T> for CorpusSteps {
    type Step = WindowStep;
    type Batch = WindowBatch;

    fn steps_from_item(&self, item: &T) -> Vec<WindowStep> {
        match self.encoder.encode(item.as_ref()) {
            Ok(encoded) => encoded
                .x
                .outer_iter()
                .zip(encoded.y.outer_iter())
                .map(|(x, y)| (x.to_owned(), y.to_owned()))
                .collect(),
            Err(err) => {
                // Unreachable: `WindowEncoder::new` already rejected a zero window.
                tracing::warn!(%err, "item could not be encoded, no steps");
                Vec::new()
            }
        }
    }

    fn batches_from_steps(
        &self,
        steps: Vec<WindowStep>,
        batch_size: usize,
    ) -> BatchResult<(Vec<WindowBatch>, Vec<WindowStep>)> {
        let (groups, leftover) = partition_in_order(steps, batch_size)?;
        let batches = groups.iter().map(|group| self.stack(group)).collect();
        Ok((batches, leftover))
    }
}
