#![forbid(unsafe_code)]

use std::iter;

use crate::error::{EncodeError, EncodeResult};
use crate::vocab::Symbol;

/// `max_len` start sentinels, the characters of `text`, then one end sentinel.
pub fn pad(text: &str, max_len: usize) -> Vec<Symbol> {
    let mut padded = Vec::with_capacity(padded_len(text, max_len));
    padded.extend(iter::repeat(Symbol::Start).take(max_len));
    padded.extend(text.chars().map(Symbol::Char));
    padded.push(Symbol::End);
    padded
}

/// Length of [`pad`]'s output without building it.
pub fn padded_len(text: &str, max_len: usize) -> usize {
    max_len + text.chars().count() + 1
}

/// Window pairs `(seq[i..i + max_len], seq[i + 1..i + 1 + max_len])` for every
/// `i` in `[0, seq.len() - max_len)`.
pub fn pairs<T>(
    seq: &[T],
    max_len: usize,
) -> EncodeResult<impl Iterator<Item = (&[T], &[T])> + '_> {
    if max_len == 0 {
        return Err(EncodeError::ZeroWindow);
    }
    Ok(seq.windows(max_len).zip(seq.windows(max_len).skip(1)))
}
