//! High-score storage backends
//!
//! The store holds a single best distance. On disk it is the whole content
//! of a text file: a plain decimal integer with no delimiters.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Default file name, relative to the working directory
pub const DEFAULT_HIGHSCORE_FILE: &str = "highscore.txt";

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("no stored high score")]
    Missing,
    #[error("high score store I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("stored high score {0:?} is not a decimal integer")]
    Malformed(String),
}

/// Somewhere a single score can be read from and written to
pub trait ScoreStore {
    fn load(&self) -> Result<u64, PersistError>;
    fn save(&mut self, score: u64) -> Result<(), PersistError>;
}

/// Plain-text file store
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileScoreStore {
    fn default() -> Self {
        Self::new(DEFAULT_HIGHSCORE_FILE)
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&self) -> Result<u64, PersistError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(PersistError::Missing),
            Err(e) => return Err(e.into()),
        };
        parse_score(&text)
    }

    fn save(&mut self, score: u64) -> Result<(), PersistError> {
        fs::write(&self.path, score.to_string())?;
        Ok(())
    }
}

/// In-memory store (headless runs and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    pub value: Option<u64>,
    /// Number of successful saves
    pub saves: u32,
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> Result<u64, PersistError> {
        self.value.ok_or(PersistError::Missing)
    }

    fn save(&mut self, score: u64) -> Result<(), PersistError> {
        self.value = Some(score);
        self.saves += 1;
        Ok(())
    }
}

/// Parse stored text. Surrounding whitespace is tolerated.
pub fn parse_score(text: &str) -> Result<u64, PersistError> {
    let trimmed = text.trim();
    trimmed
        .parse::<u64>()
        .map_err(|_| PersistError::Malformed(trimmed.to_string()))
}
