#![forbid(unsafe_code)]

use std::collections::VecDeque;
use std::iter::FusedIterator;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::error::{BatchError, BatchResult};
use crate::policy::BatchPolicy;

/// Drives a [`BatchPolicy`] over a list of items.
///
/// The accumulator owns the RNG used for per-epoch shuffling; everything else
/// lives in the iterators it hands out.
#[derive(Debug, Clone)]
pub struct Accumulator<P> {
    policy: P,
    rng: ChaCha8Rng,
}

impl<P> Accumulator<P> {
    /// Accumulator whose shuffles are seeded from OS entropy.
    pub fn new(policy: P) -> Self {
        Self {
            policy,
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Accumulator with reproducible shuffles.
    pub fn with_seed(policy: P, seed: u64) -> Self {
        Self {
            policy,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// The policy this accumulator drives.
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Lazily yield the batches of one pass over `items`.
    ///
    /// Steps left over when the items run out are dropped.
    pub fn run_one_epoch<'a, I>(
        &'a self,
        items: &'a [I],
        batch_size: usize,
    ) -> BatchResult<Epoch<'a, P, I>>
    where
        P: BatchPolicy<I>,
    {
        check_batch_size(batch_size)?;
        Ok(Epoch {
            policy: &self.policy,
            items,
            batch_size,
            state: EpochState::new(),
        })
    }

    /// Repeat epochs over `items` until the caller stops pulling.
    ///
    /// With `shuffle` set, `items` is reordered in place before every epoch,
    /// so the caller's slice does not keep its original order. If a whole
    /// epoch produces no batch, the iterator ends instead of spinning.
    pub fn run_forever<'a, I>(
        &'a mut self,
        items: &'a mut [I],
        batch_size: usize,
        shuffle: bool,
    ) -> BatchResult<Forever<'a, P, I>>
    where
        P: BatchPolicy<I>,
    {
        check_batch_size(batch_size)?;
        let Accumulator { policy, rng } = self;
        let mut forever = Forever {
            policy: &*policy,
            rng,
            items,
            batch_size,
            shuffle,
            state: EpochState::new(),
            epoch: 0,
            produced: false,
            done: false,
        };
        forever.shuffle_items();
        Ok(forever)
    }

    /// Number of batches one epoch over `items` yields.
    ///
    /// Runs the epoch and counts; policies with a cheaper closed form can
    /// compute it themselves.
    pub fn batches_per_epoch<I>(&self, items: &[I], batch_size: usize) -> BatchResult<usize>
    where
        P: BatchPolicy<I>,
    {
        let mut count = 0;
        for batch in self.run_one_epoch(items, batch_size)? {
            batch?;
            count += 1;
        }
        Ok(count)
    }
}

fn check_batch_size(batch_size: usize) -> BatchResult<()> {
    if batch_size == 0 {
        return Err(BatchError::ZeroBatchSize);
    }
    Ok(())
}

/// Carry-over buffer and cursor for one epoch.
struct EpochState<S, B> {
    next_item: usize,
    carry: Vec<S>,
    ready: VecDeque<B>,
    failed: bool,
}

impl<S, B> EpochState<S, B> {
    fn new() -> Self {
        Self {
            next_item: 0,
            carry: Vec::new(),
            ready: VecDeque::new(),
            failed: false,
        }
    }

    fn pull<I, P>(&mut self, policy: &P, items: &[I], batch_size: usize) -> Option<BatchResult<B>>
    where
        P: BatchPolicy<I, Step = S, Batch = B>,
    {
        loop {
            if let Some(batch) = self.ready.pop_front() {
                return Some(Ok(batch));
            }
            if self.failed {
                return None;
            }
            let Some(item) = items.get(self.next_item) else {
                if !self.carry.is_empty() {
                    tracing::trace!(
                        dropped = self.carry.len(),
                        "epoch ended with a partial batch"
                    );
                    self.carry.clear();
                }
                return None;
            };
            self.next_item += 1;

            let mut steps = std::mem::take(&mut self.carry);
            steps.extend(policy.steps_from_item(item));
            match policy.batches_from_steps(steps, batch_size) {
                Ok((batches, leftover)) => {
                    self.ready.extend(batches);
                    self.carry = leftover;
                }
                Err(err) => {
                    self.failed = true;
                    return Some(Err(err));
                }
            }
        }
    }
}

/// Iterator over the batches of a single epoch.
pub struct Epoch<'a, P, I>
where
    P: BatchPolicy<I>,
{
    policy: &'a P,
    items: &'a [I],
    batch_size: usize,
    state: EpochState<P::Step, P::Batch>,
}

impl<'a, P, I> Iterator for Epoch<'a, P, I>
where
    P: BatchPolicy<I>,
{
    type Item = BatchResult<P::Batch>;

    fn next(&mut self) -> Option<Self::Item> {
        self.state.pull(self.policy, self.items, self.batch_size)
    }
}

impl<'a, P, I> FusedIterator for Epoch<'a, P, I> where P: BatchPolicy<I> {}

/// Iterator that chains epochs, optionally reshuffling between them.
pub struct Forever<'a, P, I>
where
    P: BatchPolicy<I>,
{
    policy: &'a P,
    rng: &'a mut ChaCha8Rng,
    items: &'a mut [I],
    batch_size: usize,
    shuffle: bool,
    state: EpochState<P::Step, P::Batch>,
    epoch: u64,
    produced: bool,
    done: bool,
}

impl<'a, P, I> Forever<'a, P, I>
where
    P: BatchPolicy<I>,
{
    /// Zero-based index of the epoch currently being drained.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    fn shuffle_items(&mut self) {
        if self.shuffle {
            self.items.shuffle(&mut *self.rng);
            tracing::trace!(
                epoch = self.epoch,
                items = self.items.len(),
                "shuffled items"
            );
        }
    }

    fn start_epoch(&mut self) {
        self.epoch += 1;
        self.produced = false;
        self.state = EpochState::new();
        self.shuffle_items();
    }
}

impl<'a, P, I> Iterator for Forever<'a, P, I>
where
    P: BatchPolicy<I>,
{
    type Item = BatchResult<P::Batch>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.done {
                return None;
            }
            match self.state.pull(self.policy, &*self.items, self.batch_size) {
                Some(Ok(batch)) => {
                    self.produced = true;
                    return Some(Ok(batch));
                }
                Some(Err(err)) => {
                    self.done = true;
                    return Some(Err(err));
                }
                None if !self.produced => {
                    tracing::debug!(
                        epoch = self.epoch,
                        "epoch produced no batches, stopping"
                    );
                    self.done = true;
                    return None;
                }
                None => self.start_epoch(),
            }
        }
    }
}

impl<'a, P, I> FusedIterator for Forever<'a, P, I> where P: BatchPolicy<I> {}
