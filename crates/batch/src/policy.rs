#![forbid(unsafe_code)]

use crate::error::{BatchError, BatchResult};

/// How items become steps and how steps become batches.
///
/// Both operations are pure: the accumulator owns the carry-over buffer and
/// only asks the policy to expand and to partition.
pub trait BatchPolicy<I> {
    /// One unit of training data.
    type Step;
    /// A group of exactly `batch_size` steps.
    type Batch;

    /// Expand one item into its steps (possibly none).
    fn steps_from_item(&self, item: &I) -> Vec<Self::Step>;

    /// Cut `steps` into as many full batches as possible, in arrival order.
    ///
    /// Returns the batches and the unconsumed tail, which is always shorter
    /// than `batch_size`.
    fn batches_from_steps(
        &self,
        steps: Vec<Self::Step>,
        batch_size: usize,
    ) -> BatchResult<(Vec<Self::Batch>, Vec<Self::Step>)>;
}

/// Split `steps` into chunks of exactly `batch_size` plus the leftover tail.
pub fn partition_in_order<S>(
    steps: Vec<S>,
    batch_size: usize,
) -> BatchResult<(Vec<Vec<S>>, Vec<S>)> {
    if batch_size == 0 {
        return Err(BatchError::ZeroBatchSize);
    }
    let full = steps.len() / batch_size;
    let mut iter = steps.into_iter();
    let mut batches = Vec::with_capacity(full);
    for _ in 0..full {
        batches.push(iter.by_ref().take(batch_size).collect());
    }
    Ok((batches, iter.collect()))
}

/// Each item is its own single step; partitioning is left unconfigured.
///
/// `batches_from_steps` always fails with [`BatchError::NotImplemented`], so an
/// accumulator built on this policy surfaces the missing configuration on the
/// first pull.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unconfigured;

impl<I: Clone> BatchPolicy<I> for Unconfigured {
    type Step = I;
    type Batch = Vec<I>;

    fn steps_from_item(&self, item: &I) -> Vec<I> {
        vec![item.clone()]
    }

    fn batches_from_steps(
        &self,
        _steps: Vec<I>,
        _batch_size: usize,
    ) -> BatchResult<(Vec<Vec<I>>, Vec<I>)> {
        Err(BatchError::NotImplemented("batches_from_steps"))
    }
}

/// Each item is its own single step; batches are consecutive chunks.
#[derive(Debug, Clone, Copy, Default)]
pub struct InOrder;

impl<I: Clone> BatchPolicy<I> for InOrder {
    type Step = I;
    type Batch = Vec<I>;

    fn steps_from_item(&self, item: &I) -> Vec<I> {
        vec![item.clone()]
    }

    fn batches_from_steps(
        &self,
        steps: Vec<I>,
        batch_size: usize,
    ) -> BatchResult<(Vec<Vec<I>>, Vec<I>)> {
        partition_in_order(steps, batch_size)
    }
}
