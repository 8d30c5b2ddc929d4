//! Persisted score with change notifications.
//!
//! The score is mutated only on the scene context. Every mutation is
//! written through the store before any observer hears about it, so an
//! observer that re-reads persisted state after a notification always
//! sees the new value.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Host persistence collaborator for the score counter.
pub trait ScoreStore: Send + Sync {
    /// Read the persisted score; absent state reads as 0.
    fn load(&self) -> u32;
    /// Write the score synchronously.
    fn save(&self, value: u32) -> io::Result<()>;
}

/// Notification fired after a score change has been persisted. Only
/// emitted when the value actually changed.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreChanged(pub u32);

/// The session score. Loaded once at startup, incremented by exactly
/// one per correct placement.
#[derive(Resource)]
pub struct ScoreBoard {
    value: u32,
    store: Arc<dyn ScoreStore>,
}

impl ScoreBoard {
    pub fn new(store: Arc<dyn ScoreStore>) -> Self {
        let value = store.load();
        Self { value, store }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Increment for a correct placement. Persists before returning;
    /// a failed write keeps the in-memory value and logs.
    pub fn award(&mut self) -> u32 {
        self.value += 1;
        if let Err(err) = self.store.save(self.value) {
            warn!("failed to persist score {}: {err}", self.value);
        }
        self.value
    }
}

#[derive(Serialize, Deserialize)]
struct PersistedScore {
    score: u32,
}

/// JSON score file under the platform data directory.
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn at_default_location() -> io::Result<Self> {
        let base = dirs::data_dir()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no data directory"))?;
        let dir = base.join("recycling-sort");
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            path: dir.join("score.json"),
        })
    }

    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&self) -> u32 {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => match serde_json::from_str::<PersistedScore>(&raw) {
                Ok(persisted) => persisted.score,
                Err(err) => {
                    warn!("score file {} is corrupt ({err}); starting at 0", self.path.display());
                    0
                }
            },
            Err(_) => 0,
        }
    }

    fn save(&self, value: u32) -> io::Result<()> {
        let raw = serde_json::to_string(&PersistedScore { score: value })?;
        std::fs::write(&self.path, raw)
    }
}

/// Installs the score board around a host persistence store.
pub struct ScorePlugin {
    pub store: Arc<dyn ScoreStore>,
}

impl Plugin for ScorePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ScoreBoard::new(self.store.clone()))
            .add_event::<ScoreChanged>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingStore {
        initial: u32,
        saves: Mutex<Vec<u32>>,
    }

    impl ScoreStore for RecordingStore {
        fn load(&self) -> u32 {
            self.initial
        }

        fn save(&self, value: u32) -> io::Result<()> {
            self.saves.lock().unwrap().push(value);
            Ok(())
        }
    }

    #[test]
    fn award_persists_each_increment() {
        let store = Arc::new(RecordingStore {
            initial: 2,
            saves: Mutex::default(),
        });
        let mut board = ScoreBoard::new(store.clone());
        assert_eq!(board.value(), 2);
        assert_eq!(board.award(), 3);
        assert_eq!(board.award(), 4);
        assert_eq!(*store.saves.lock().unwrap(), vec![3, 4]);
    }

    #[test]
    fn file_store_round_trips_and_defaults_to_zero() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileScoreStore::at_path(dir.path().join("score.json"));
        assert_eq!(store.load(), 0);
        store.save(7).unwrap();
        assert_eq!(store.load(), 7);
    }
}
