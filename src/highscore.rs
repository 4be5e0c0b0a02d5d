//! Best score, kept between runs.
//!
//! Only a single number is stored, under a fixed key.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("could not access {}: {source}", .path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
  #[error("{} is not a valid score file: {source}", .path.display())]
  Json {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },
}

pub trait ScoreStore {
  fn load_best(&self) -> Result<Option<u64>, StoreError>;
  fn save_best(&mut self, score: u64) -> Result<(), StoreError>;
}

/// Outcome of submitting a finished game's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreRecord {
  pub best: u64,
  /// Equalling the old best counts as a record too.
  pub is_new_record: bool,
}

/// Save `score` if it beats the stored best.
pub fn record_score<S: ScoreStore + ?Sized>(
  store: &mut S,
  score: u64,
) -> Result<ScoreRecord, StoreError> {
  let record = match store.load_best()? {
    Some(prev) if score <= prev => ScoreRecord {
      best: prev,
      is_new_record: score == prev,
    },
    _ => {
      store.save_best(score)?;
      ScoreRecord {
        best: score,
        is_new_record: true,
      }
    }
  };
  Ok(record)
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ScoreFile {
  #[serde(
    rename = "riverCrossingHighScore",
    default,
    skip_serializing_if = "Option::is_none"
  )]
  best: Option<u64>,
}

/// Best score in a small JSON file. A missing file means no score yet.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
  path: PathBuf,
}

impl JsonFileStore {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  /// `$HOME/.river-crossing.json`, or the working directory without a home.
  pub fn default_path() -> PathBuf {
    let name = ".river-crossing.json";
    match std::env::var_os("HOME") {
      Some(home) => Path::new(&home).join(name),
      None => PathBuf::from(name),
    }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  fn io_err(&self, source: io::Error) -> StoreError {
    StoreError::Io {
      path: self.path.clone(),
      source,
    }
  }

  fn json_err(&self, source: serde_json::Error) -> StoreError {
    StoreError::Json {
      path: self.path.clone(),
      source,
    }
  }
}

impl ScoreStore for JsonFileStore {
  fn load_best(&self) -> Result<Option<u64>, StoreError> {
    let text = match fs::read_to_string(&self.path) {
      Ok(text) => text,
      Err(e) if e.kind() == io::ErrorKind::NotFound => {
        info!("no score file at {}", self.path.display());
        return Ok(None);
      }
      Err(e) => return Err(self.io_err(e)),
    };
    let file: ScoreFile =
      serde_json::from_str(&text).map_err(|e| self.json_err(e))?;
    Ok(file.best)
  }

  fn save_best(&mut self, score: u64) -> Result<(), StoreError> {
    let file = ScoreFile { best: Some(score) };
    let text = serde_json::to_string(&file).map_err(|e| self.json_err(e))?;
    fs::write(&self.path, text).map_err(|e| self.io_err(e))?;
    info!("best score {} saved to {}", score, self.path.display());
    Ok(())
  }
}

/// Forgets everything when dropped.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
  best: Option<u64>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_best(best: u64) -> Self {
    Self { best: Some(best) }
  }
}

impl ScoreStore for MemoryStore {
  fn load_best(&self) -> Result<Option<u64>, StoreError> {
    Ok(self.best)
  }

  fn save_best(&mut self, score: u64) -> Result<(), StoreError> {
    self.best = Some(score);
    Ok(())
  }
}

/// Like [`record_score`], but a broken store only gets a warning.
pub fn record_score_or_warn<S: ScoreStore + ?Sized>(
  store: &mut S,
  score: u64,
) -> ScoreRecord {
  record_score(store, score).unwrap_or_else(|e| {
    warn!("best score not saved: {}", e);
    ScoreRecord {
      best: score,
      is_new_record: true,
    }
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn scratch_file(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
      "river-crossing-{}-{}.json",
      name,
      std::process::id()
    ));
    let _ = fs::remove_file(&path);
    path
  }

  #[test]
  fn first_score_is_a_record() {
    let mut store = MemoryStore::new();
    let rec = record_score(&mut store, 9_800).unwrap();
    assert_eq!(
      rec,
      ScoreRecord {
        best: 9_800,
        is_new_record: true
      }
    );
    assert_eq!(store.load_best().unwrap(), Some(9_800));
  }

  #[test]
  fn lower_score_keeps_old_best() {
    let mut store = MemoryStore::with_best(15_000);
    let rec = record_score(&mut store, 9_800).unwrap();
    assert!(!rec.is_new_record);
    assert_eq!(rec.best, 15_000);
    assert_eq!(store.load_best().unwrap(), Some(15_000));
  }

  #[test]
  fn tying_counts_as_record() {
    let mut store = MemoryStore::with_best(15_000);
    let rec = record_score(&mut store, 15_000).unwrap();
    assert!(rec.is_new_record);
    assert_eq!(rec.best, 15_000);
  }

  #[test]
  fn json_file_round_trip() {
    let path = scratch_file("round-trip");
    let mut store = JsonFileStore::new(&path);
    assert_eq!(store.load_best().unwrap(), None);

    record_score(&mut store, 16_500).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text, r#"{"riverCrossingHighScore":16500}"#);

    let reopened = JsonFileStore::new(&path);
    assert_eq!(reopened.load_best().unwrap(), Some(16_500));
    fs::remove_file(&path).unwrap();
  }

  #[test]
  fn garbage_file_is_an_error() {
    let path = scratch_file("garbage");
    fs::write(&path, "not json").unwrap();
    let store = JsonFileStore::new(&path);
    assert!(matches!(store.load_best(), Err(StoreError::Json { .. })));

    let mut store = store;
    let rec = record_score_or_warn(&mut store, 100);
    assert_eq!(rec.best, 100);
    fs::remove_file(&path).unwrap();
  }
}
