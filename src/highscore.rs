use std::{fs, io, path::{Path, PathBuf}};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HighScoreError {
    #[error("cannot access high score file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("high score file {} does not hold a non-negative integer: {content:?}", .path.display())]
    Malformed { path: PathBuf, content: String },
}

/// Reads the stored high score. A missing or blank file counts as 0.
pub fn read_highscore(path: &Path) -> Result<u32, HighScoreError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(source) => return Err(HighScoreError::Io { path: path.to_owned(), source }),
    };

    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }

    trimmed.parse().map_err(|_| HighScoreError::Malformed {
        path: path.to_owned(),
        content: trimmed.to_owned(),
    })
}

/// Overwrites the file with the decimal score, no trailing newline.
pub fn write_highscore(path: &Path, score: u32) -> Result<(), HighScoreError> {
    fs::write(path, score.to_string())
        .map_err(|source| HighScoreError::Io { path: path.to_owned(), source })
}
