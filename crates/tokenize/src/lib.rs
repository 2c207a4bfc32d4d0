#![forbid(unsafe_code)]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing
)]
#![deny(missing_docs, unused_must_use)]

//! Character-level sequence data for next-token models.
//!
//! Text is padded with `max_len` start sentinels and one end sentinel, cut into
//! every window of `max_len` tokens and paired with the window one position
//! later. Inputs are integer IDs, targets are one-hot rows.
//!
//! Layout:
//! - `vocab.rs`: sentinels, `Vocab`, ID mapping and decoding
//! - `window.rs`: padding and window pairs
//! - `encoder.rs`: `WindowEncoder`, `TargetOffset`, dense arrays
//! - `training.rs`: whole-corpus `TrainingData`
//! - `stream.rs`: `FileStream` sampling batches from a directory
//! - `steps.rs`: `CorpusSteps` policy for `batch::Accumulator`
//! - `config.rs`: serde configs
//!
//! ```
//! use tokenize::TrainingData;
//!
//! let data = TrainingData::new("ab", 2)?;
//! assert_eq!(data.tokens(), &[0, 0, 3, 4, 1]);
//! assert_eq!(data.x().shape(), &[2, 2]);
//! assert_eq!(data.y().shape(), &[2, 2, 6]);
//! # Ok::<(), tokenize::EncodeError>(())
//! ```

/// Serde configuration types.
pub mod config;
/// Bundled text corpora.
pub mod corpus;
/// Window encoder and dense outputs.
pub mod encoder;
/// Error type.
pub mod error;
/// Batch policy bridging the encoder and `batch`.
pub mod steps;
/// Directory streaming variant.
pub mod stream;
/// Whole-corpus variant.
pub mod training;
/// Character vocabulary.
pub mod vocab;
/// Padding and windowing helpers.
pub mod window;

pub use config::{EncodeConfig, StreamConfig};
pub use encoder::{Encoded, TargetOffset, WindowEncoder};
pub use error::{EncodeError, EncodeResult};
pub use steps::{CorpusSteps, WindowBatch, WindowStep};
pub use stream::{FileStream, StreamBatch};
pub use training::TrainingData;
pub use vocab::{Sentinels, Symbol, TokenId, Vocab, END_ID, START_ID, UNKNOWN_ID};
