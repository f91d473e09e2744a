//! High score persistence
//!
//! A single integer stored as bare decimal text.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::Result;

/// Best score seen so far
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighScore {
    pub best: u64,
}

impl HighScore {
    /// Read the high score; a missing file counts as zero
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::info!("No high score at {}, starting fresh", path.display());
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };
        let best = text.trim().parse()?;
        log::info!("Loaded high score {best}");
        Ok(Self { best })
    }

    /// Keep `score` if it beats the best. Returns whether it did.
    pub fn record(&mut self, score: u64) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path.as_ref(), format!("{}\n", self.best))?;
        log::info!("High score saved ({})", self.best);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_zero() {
        let dir = tempdir().unwrap();
        let score = HighScore::load(dir.path().join("no-score.txt")).unwrap();
        assert_eq!(score.best, 0);
    }

    #[test]
    fn test_record_keeps_max() {
        let mut score = HighScore { best: 300 };
        assert!(!score.record(200));
        assert!(score.record(450));
        assert_eq!(score.best, 450);
    }

    #[test]
    fn test_save_writes_bare_integer() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("score.txt");
        HighScore { best: 1200 }.save(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "1200\n");
        assert_eq!(HighScore::load(&path).unwrap().best, 1200);
    }

    #[test]
    fn test_garbage_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("garbage.txt");
        fs::write(&path, "lots").unwrap();
        let result = HighScore::load(&path);
        assert!(matches!(result, Err(SimError::ParseScore(_))));
    }
}
