//! User-selected board configuration, persisted independently of any
//! in-progress puzzle.

use crate::error::{StoreError, StoreResult};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use sudoku_core::{box_size, Difficulty};

/// Board size and difficulty chosen by the player; read when a new game
/// is started
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub boundary: u8,
    pub difficulty: Difficulty,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            boundary: 9,
            difficulty: Difficulty::Medium,
        }
    }
}

/// Storage backend for [`Settings`]
pub trait SettingsStorage {
    /// Read the settings. On first run (nothing stored yet) the defaults
    /// are created and persisted; an unreadable store is an error, never
    /// silently defaulted.
    fn get_settings(&mut self) -> StoreResult<Settings>;

    fn update_settings(&mut self, settings: Settings) -> StoreResult<()>;
}

fn validate(settings: &Settings) -> StoreResult<()> {
    box_size(settings.boundary)?;
    Ok(())
}

/// File-backed settings storage
pub struct FileSettingsStorage {
    path: PathBuf,
}

impl FileSettingsStorage {
    pub fn new() -> Self {
        let path = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sudoku_settings.json");
        Self { path }
    }

    /// Storage rooted at an explicit file path (used by tests)
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    fn write(&self, settings: &Settings) -> StoreResult<()> {
        let json =
            serde_json::to_string_pretty(settings).map_err(|e| StoreError::Io(e.to_string()))?;
        fs::write(&self.path, json).map_err(|e| StoreError::Io(e.to_string()))
    }
}

impl Default for FileSettingsStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStorage for FileSettingsStorage {
    fn get_settings(&mut self) -> StoreResult<Settings> {
        match fs::read_to_string(&self.path) {
            Ok(json) => {
                serde_json::from_str(&json).map_err(|e| StoreError::Corrupted(e.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let settings = Settings::default();
                debug!("no settings stored, writing defaults");
                self.write(&settings)?;
                Ok(settings)
            }
            Err(e) => Err(StoreError::Io(e.to_string())),
        }
    }

    fn update_settings(&mut self, settings: Settings) -> StoreResult<()> {
        validate(&settings)?;
        self.write(&settings)
    }
}

/// In-memory settings storage for tests; clones share the same settings
#[derive(Clone, Default)]
pub struct MemorySettingsStorage {
    settings: Arc<Mutex<Option<Settings>>>,
}

impl MemorySettingsStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeded storage, as if the player had already chosen settings
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings: Arc::new(Mutex::new(Some(settings))),
        }
    }
}

impl SettingsStorage for MemorySettingsStorage {
    fn get_settings(&mut self) -> StoreResult<Settings> {
        let mut guard = self
            .settings
            .lock()
            .map_err(|e| StoreError::Io(e.to_string()))?;
        Ok(*guard.get_or_insert_with(Settings::default))
    }

    fn update_settings(&mut self, settings: Settings) -> StoreResult<()> {
        validate(&settings)?;
        let mut guard = self
            .settings
            .lock()
            .map_err(|e| StoreError::Io(e.to_string()))?;
        *guard = Some(settings);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "sudoku-store-test-{}-{}.json",
            std::process::id(),
            name
        ))
    }

    #[test]
    fn test_defaults_created_on_first_run() {
        let path = temp_path("settings-first-run");
        let _ = fs::remove_file(&path);

        let mut storage = FileSettingsStorage::with_path(path.clone());
        assert_eq!(storage.get_settings().unwrap(), Settings::default());
        // the defaults were persisted, not just returned
        assert!(path.exists());

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_update_then_get() {
        let mut storage = MemorySettingsStorage::new();
        let chosen = Settings {
            boundary: 4,
            difficulty: Difficulty::Hard,
        };
        storage.update_settings(chosen).unwrap();
        assert_eq!(storage.get_settings().unwrap(), chosen);
    }

    #[test]
    fn test_invalid_boundary_rejected() {
        let mut storage = MemorySettingsStorage::new();
        let err = storage
            .update_settings(Settings {
                boundary: 7,
                difficulty: Difficulty::Easy,
            })
            .unwrap_err();
        assert_eq!(err, StoreError::InvalidBoundary(7));
    }

    #[test]
    fn test_corrupted_settings_surface_as_error() {
        let path = temp_path("settings-corrupted");
        fs::write(&path, "{ nope").unwrap();
        let mut storage = FileSettingsStorage::with_path(path.clone());
        assert!(matches!(storage.get_settings(), Err(StoreError::Corrupted(_))));
        let _ = fs::remove_file(path);
    }
}
