#![forbid(unsafe_code)]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing
)]
#![deny(missing_docs, unused_must_use)]

//! Batch accumulation over streams of items.
//!
//! An item expands into zero or more steps. Steps are accumulated across items
//! and cut into batches of exactly `batch_size`; whatever does not fill a batch
//! is carried to the next item and dropped when the epoch ends.
//!
//! Contract: for one epoch without shuffling, the concatenated batches are the
//! longest prefix of the step sequence whose length is a multiple of `batch_size`.
//!
//! ```
//! use batch::{Accumulator, InOrder};
//!
//! let acc = Accumulator::with_seed(InOrder, 7);
//! let items = [1, 2, 3, 4, 5];
//! let batches: Vec<Vec<i32>> = acc
//!     .run_one_epoch(&items, 2)?
//!     .collect::<Result<_, _>>()?;
//! assert_eq!(batches, vec![vec![1, 2], vec![3, 4]]);
//! # Ok::<(), batch::BatchError>(())
//! ```

/// Accumulator and its epoch iterators.
pub mod accumulator;
/// Error type shared by policies and the accumulator.
pub mod error;
/// `BatchPolicy` capability trait and stock policies.
pub mod policy;

pub use accumulator::{Accumulator, Epoch, Forever};
pub use error::{BatchError, BatchResult};
pub use policy::{partition_in_order, BatchPolicy, InOrder, Unconfigured};
