use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// relative to the working directory
pub const HIGH_SCORE_FILE: &str = "data.txt";

/// The high score as a plain decimal number in a text file
pub struct HighScoreFile {
    path: PathBuf,
}

impl HighScoreFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored high score.
    ///
    /// A missing file is created with "0". Content that is not a plain non-negative integer counts as 0.
    pub fn load(&self) -> Result<u32> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let high_score = parse_high_score(&content).unwrap_or_else(|| {
                    log::warn!("ignoring malformed high score content {:?} in {}", content, self.path.display());
                    0
                });
                log::info!("high score: {high_score}");
                Ok(high_score)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                self.save(0)?;
                log::info!("created high score file {}", self.path.display());
                Ok(0)
            }
            Err(e) => Err(e).with_context(|| format!("failed to read high score file {}", self.path.display())),
        }
    }

    /// Overwrites the file with `high_score`, without trailing newline
    pub fn save(&self, high_score: u32) -> Result<()> {
        fs::write(&self.path, high_score.to_string())
            .with_context(|| format!("failed to write high score file {}", self.path.display()))
    }
}

fn parse_high_score(content: &str) -> Option<u32> {
    let content = content.trim();
    if content.is_empty() || !content.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    // only digits left, so overflow is the one way parsing can fail
    Some(content.parse().unwrap_or(u32::MAX))
}
