#![forbid(unsafe_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::encoder::TargetOffset;
use crate::error::{EncodeError, EncodeResult};
use crate::vocab::Sentinels;

/// Window length, sentinel spellings and target alignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodeConfig {
    /// Tokens per window.
    pub max_len: usize,
    /// Reserved symbol spellings.
    #[serde(default)]
    pub sentinels: Sentinels,
    /// Alignment of targets against inputs.
    #[serde(default)]
    pub offset: TargetOffset,
}

impl EncodeConfig {
    /// Default sentinels and the double-shift alignment.
    pub fn new(max_len: usize) -> Self {
        Self {
            max_len,
            sentinels: Sentinels::default(),
            offset: TargetOffset::default(),
        }
    }

    /// Replace the target alignment.
    pub fn with_offset(mut self, offset: TargetOffset) -> Self {
        self.offset = offset;
        self
    }
}

/// Settings for [`crate::FileStream`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Encoding settings shared with the whole-corpus variant.
    #[serde(flatten)]
    pub encode: EncodeConfig,
    /// Directory whose files are streamed.
    pub directory: PathBuf,
    /// File name suffix to match, e.g. `.story`.
    pub extension: String,
    /// Rows sampled per yielded batch.
    pub batch_size: usize,
    /// Sampling seed; `None` seeds from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl StreamConfig {
    /// Stream `directory/*extension` in batches of `batch_size`.
    pub fn new(
        max_len: usize,
        directory: impl Into<PathBuf>,
        extension: impl Into<String>,
        batch_size: usize,
    ) -> Self {
        Self {
            encode: EncodeConfig::new(max_len),
            directory: directory.into(),
            extension: extension.into(),
            batch_size,
            seed: None,
        }
    }

    /// CNN story dump layout: `cnn/stories/*.story`.
    pub fn cnn(max_len: usize, batch_size: usize) -> Self {
        Self::new(
            max_len,
            Path::new("cnn").join("stories"),
            ".story",
            batch_size,
        )
    }

    /// Fix the sampling seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parse a JSON config.
    pub fn from_json(json: &str) -> EncodeResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file.
    pub fn from_json_file(path: &Path) -> EncodeResult<Self> {
        let json = fs::read_to_string(path).map_err(|e| EncodeError::io(path, e))?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_fills_defaults() {
        let cfg = StreamConfig::from_json(
            r#"{"max_len": 40, "directory": "data", "extension": ".txt", "batch_size": 16}"#,
        )
        .unwrap();
        assert_eq!(cfg, StreamConfig::new(40, "data", ".txt", 16));
        assert_eq!(cfg.encode.sentinels.start, "<start>");
        assert_eq!(cfg.encode.offset, TargetOffset::Double);
    }

    #[test]
    fn json_overrides() {
        let cfg = StreamConfig::from_json(
            r#"{"max_len": 8, "directory": "d", "extension": ".story", "batch_size": 2,
                "offset": "single", "seed": 5, "sentinels": {"unknown": "?"}}"#,
        )
        .unwrap();
        assert_eq!(cfg.encode.offset, TargetOffset::Single);
        assert_eq!(cfg.seed, Some(5));
        assert_eq!(cfg.encode.sentinels.unknown, "?");
        assert_eq!(cfg.encode.sentinels.end, "<end>");
    }

    #[test]
    fn json_missing_field_is_an_error() {
        assert!(matches!(
            StreamConfig::from_json(r#"{"max_len": 8}"#),
            Err(EncodeError::Json(_))
        ));
    }

    #[test]
    fn reads_config_from_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stream.json");
        fs::write(
            &path,
            r#"{"max_len": 12, "directory": "corpus", "extension": ".story",
                "batch_size": 4, "seed": 3}"#,
        )
        .unwrap();
        let cfg = StreamConfig::from_json_file(&path).unwrap();
        assert_eq!(cfg, StreamConfig::new(12, "corpus", ".story", 4).with_seed(3));

        let missing = dir.path().join("absent.json");
        assert!(matches!(
            StreamConfig::from_json_file(&missing),
            Err(EncodeError::Io { path, .. }) if path == missing
        ));
    }

    #[test]
    fn cnn_preset() {
        let cfg = StreamConfig::cnn(100, 32);
        assert_eq!(cfg.directory, Path::new("cnn/stories"));
        assert_eq!(cfg.extension, ".story");
        assert_eq!(cfg.seed, None);
    }
}
