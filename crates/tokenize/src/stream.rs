#![forbid(unsafe_code)]

//! Streaming variant: sample random window batches from a directory of files.

use std::fs;
use std::path::{Path, PathBuf};

use ndarray::{Array2, Array3, Axis};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::StreamConfig;
use crate::encoder::WindowEncoder;
use crate::error::{EncodeError, EncodeResult};
use crate::vocab::Vocab;

/// One sampled batch. Both inputs hold the same rows; dual-input models
/// take one copy per head.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamBatch {
    /// Two identical `[batch_size, max_len]` ID arrays.
    pub inputs: [Array2<i64>; 2],
    /// `[batch_size, max_len, vocab_size + 1]` one-hot targets.
    pub targets: Array3<f32>,
}

/// Round-robin over matching files, yielding one sampled batch per usable file.
///
/// Files with fewer than `max_len + batch_size` characters are skipped. The
/// iterator runs until the caller stops, unless a full pass over the files
/// yields nothing, in which case it ends.
#[derive(Debug)]
pub struct FileStream {
    encoder: WindowEncoder,
    files: Vec<PathBuf>,
    batch_size: usize,
    cursor: usize,
    yielded_this_pass: bool,
    rng: ChaCha8Rng,
}

impl FileStream {
    /// List matching files and build the printable-ASCII encoder.
    pub fn new(config: StreamConfig) -> EncodeResult<Self> {
        if config.batch_size == 0 {
            return Err(batch::BatchError::ZeroBatchSize.into());
        }
        let vocab = Vocab::printable(config.encode.sentinels);
        let encoder = WindowEncoder::new(vocab, config.encode.max_len, config.encode.offset)?;
        let files = list_files(&config.directory, &config.extension)?;
        tracing::debug!(
            directory = %config.directory.display(),
            files = files.len(),
            "discovered stream files"
        );
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Ok(Self {
            encoder,
            files,
            batch_size: config.batch_size,
            cursor: 0,
            yielded_this_pass: false,
            rng,
        })
    }

    /// Files in round-robin order.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// The fixed printable-ASCII vocabulary.
    pub fn vocab(&self) -> &Vocab {
        self.encoder.vocab()
    }

    /// Rows per batch.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    fn sample(&mut self, path: &Path) -> EncodeResult<Option<StreamBatch>> {
        let content = fs::read_to_string(path).map_err(|e| EncodeError::io(path, e))?;
        let len = content.chars().count();
        if len < self.encoder.max_len() + self.batch_size {
            tracing::debug!(path = %path.display(), len, "skipping short file");
            return Ok(None);
        }

        let encoded = self.encoder.encode(&content)?;
        let rows = encoded.rows();
        if rows == 0 {
            return Ok(None);
        }
        let picks: Vec<usize> = (0..self.batch_size)
            .map(|_| self.rng.gen_range(0..rows))
            .collect();
        let x = encoded.x.select(Axis(0), &picks);
        let targets = encoded.y.select(Axis(0), &picks);
        Ok(Some(StreamBatch {
            inputs: [x.clone(), x],
            targets,
        }))
    }
}

impl Iterator for FileStream {
    type Item = EncodeResult<StreamBatch>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.cursor >= self.files.len() {
                if !self.yielded_this_pass {
                    return None;
                }
                self.cursor = 0;
                self.yielded_this_pass = false;
            }
            let path = self.files.get(self.cursor)?.clone();
            self.cursor += 1;

            match self.sample(&path) {
                Ok(None) => continue,
                Ok(Some(batch)) => {
                    self.yielded_this_pass = true;
                    return Some(Ok(batch));
                }
                Err(err) => {
                    self.yielded_this_pass = true;
                    return Some(Err(err));
                }
            }
        }
    }
}

/// Files directly under `directory` whose names end with `extension`, sorted.
fn list_files(directory: &Path, extension: &str) -> EncodeResult<Vec<PathBuf>> {
    let io_err = |source: std::io::Error| EncodeError::io(directory, source);
    let mut files = Vec::new();
    for entry in fs::read_dir(directory).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        let matches = path
            .file_name()
            .and_then(|name| name.to_str())
            .map_or(false, |name| name.ends_with(extension));
        if matches && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
