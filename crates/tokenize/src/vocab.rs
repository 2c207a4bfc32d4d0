#![forbid(unsafe_code)]

//! Character vocabulary with three reserved sentinels.
//!
//! IDs 0, 1 and 2 always belong to the start, end and unknown sentinels.
//! Characters follow from ID 3 in sorted order, so the same character set
//! always produces the same mapping.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EncodeError, EncodeResult};

/// Integer token identifier.
pub type TokenId = u32;

/// ID of the start-of-sequence sentinel.
pub const START_ID: TokenId = 0;
/// ID of the end-of-sequence sentinel.
pub const END_ID: TokenId = 1;
/// ID of the out-of-vocabulary sentinel.
pub const UNKNOWN_ID: TokenId = 2;
const FIRST_CHAR_ID: TokenId = 3;

/// One position of a token sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// Start-of-sequence padding.
    Start,
    /// End of the text.
    End,
    /// Placeholder for a character outside the vocabulary.
    Unknown,
    /// A corpus character.
    Char(char),
}

/// Spellings of the reserved sentinels, used when decoding to text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sentinels {
    /// Start-of-sequence marker.
    pub start: String,
    /// End-of-sequence marker.
    pub end: String,
    /// Unknown-symbol marker.
    pub unknown: String,
}

impl Default for Sentinels {
    fn default() -> Self {
        Self {
            start: "<start>".to_string(),
            end: "<end>".to_string(),
            unknown: "<unk>".to_string(),
        }
    }
}

/// Python's `string.printable`: ASCII graphic characters, space and the
/// five other whitespace controls.
pub fn printable_ascii() -> impl Iterator<Item = char> {
    (' '..='~').chain(['\t', '\n', '\x0b', '\x0c', '\r'])
}

/// Bijective mapping between symbols and `[0, vocab_size)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "VocabFile", into = "VocabFile")]
pub struct Vocab {
    sentinels: Sentinels,
    chars: Vec<char>,
    index: HashMap<char, TokenId>,
}

#[derive(Serialize, Deserialize)]
struct VocabFile {
    sentinels: Sentinels,
    chars: Vec<char>,
}

impl From<VocabFile> for Vocab {
    fn from(file: VocabFile) -> Self {
        Vocab::from_chars(file.chars, file.sentinels)
    }
}

impl From<Vocab> for VocabFile {
    fn from(vocab: Vocab) -> Self {
        VocabFile {
            sentinels: vocab.sentinels,
            chars: vocab.chars,
        }
    }
}

impl Vocab {
    /// Vocabulary of every distinct character in `text`.
    pub fn from_text(text: &str, sentinels: Sentinels) -> Self {
        Self::from_chars(text.chars(), sentinels)
    }

    /// Vocabulary over an arbitrary character set; duplicates are ignored.
    pub fn from_chars(chars: impl IntoIterator<Item = char>, sentinels: Sentinels) -> Self {
        let chars: Vec<char> = chars
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let index = (FIRST_CHAR_ID..)
            .zip(chars.iter())
            .map(|(id, &c)| (c, id))
            .collect();
        tracing::debug!(symbols = chars.len(), "built vocabulary");
        Self {
            sentinels,
            chars,
            index,
        }
    }

    /// Fixed vocabulary of the 100 printable ASCII characters.
    pub fn printable(sentinels: Sentinels) -> Self {
        Self::from_chars(printable_ascii(), sentinels)
    }

    /// Number of IDs, sentinels included.
    pub fn vocab_size(&self) -> usize {
        self.chars.len() + FIRST_CHAR_ID as usize
    }

    /// Width of a one-hot target row. One column past the last ID is
    /// reserved and never set.
    pub fn target_width(&self) -> usize {
        self.vocab_size() + 1
    }

    /// Sorted corpus characters; the character at position `i` has ID `i + 3`.
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Sentinel spellings.
    pub fn sentinels(&self) -> &Sentinels {
        &self.sentinels
    }

    /// Whether `c` has its own ID.
    pub fn contains(&self, c: char) -> bool {
        self.index.contains_key(&c)
    }

    /// ID of `symbol`; characters outside the vocabulary get [`UNKNOWN_ID`].
    pub fn id(&self, symbol: &Symbol) -> TokenId {
        match symbol {
            Symbol::Start => START_ID,
            Symbol::End => END_ID,
            Symbol::Unknown => UNKNOWN_ID,
            Symbol::Char(c) => self.index.get(c).copied().unwrap_or(UNKNOWN_ID),
        }
    }

    /// Symbol owning `id`, if any.
    pub fn symbol(&self, id: TokenId) -> Option<Symbol> {
        match id {
            START_ID => Some(Symbol::Start),
            END_ID => Some(Symbol::End),
            UNKNOWN_ID => Some(Symbol::Unknown),
            _ => {
                let offset = usize::try_from(id.checked_sub(FIRST_CHAR_ID)?).ok()?;
                self.chars.get(offset).copied().map(Symbol::Char)
            }
        }
    }

    /// Encode each character of `text`, without padding.
    pub fn encode(&self, text: &str) -> Vec<TokenId> {
        text.chars().map(|c| self.id(&Symbol::Char(c))).collect()
    }

    /// Render IDs as text. Sentinels use their configured spelling and IDs
    /// outside the vocabulary render as the unknown marker.
    pub fn decode(&self, ids: &[TokenId]) -> String {
        let mut out = String::new();
        for &id in ids {
            match self.symbol(id).unwrap_or(Symbol::Unknown) {
                Symbol::Char(c) => out.push(c),
                Symbol::Start => out.push_str(&self.sentinels.start),
                Symbol::End => out.push_str(&self.sentinels.end),
                Symbol::Unknown => out.push_str(&self.sentinels.unknown),
            }
        }
        out
    }

    /// Write the vocabulary as JSON.
    pub fn save(&self, path: &Path) -> EncodeResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|e| EncodeError::io(path, e))
    }

    /// Read a vocabulary written by [`Vocab::save`].
    pub fn load(path: &Path) -> EncodeResult<Self> {
        let json = fs::read_to_string(path).map_err(|e| EncodeError::io(path, e))?;
        Ok(serde_json::from_str(&json)?)
    }
}
