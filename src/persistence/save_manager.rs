use super::record::SaveRecord;
use crate::core::config::BalanceConfig;
use crate::core::constants::SAVE_FILE_NAME;
use crate::core::error::{EngineError, Result};
use crate::core::game_state::GameState;
use directories::ProjectDirs;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Where a loaded game came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadSource {
    Restored,
    /// No usable save; a new game was started.
    FreshDefault { reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome {
    pub state: GameState,
    pub source: LoadSource,
}

/// Manages saving and loading game state with a checksummed format
pub struct SaveManager {
    save_path: PathBuf,
    config: BalanceConfig,
}

impl SaveManager {
    /// Creates a new SaveManager instance
    ///
    /// Sets up the save directory at the appropriate location for the platform
    /// using the `directories` crate.
    pub fn new() -> Result<Self> {
        let project_dirs = ProjectDirs::from("", "", "cloud-quest").ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine config directory",
            )
        })?;

        let config_dir = project_dirs.config_dir();
        fs::create_dir_all(config_dir)?;

        Ok(Self::with_path(config_dir.join(SAVE_FILE_NAME)))
    }

    /// Uses an explicit save file location.
    pub fn with_path(save_path: impl Into<PathBuf>) -> Self {
        Self {
            save_path: save_path.into(),
            config: BalanceConfig::default(),
        }
    }

    /// Balance settings applied to loaded and fresh games.
    pub fn with_config(mut self, config: BalanceConfig) -> Self {
        self.config = config;
        self
    }

    /// Creates a SaveManager for testing with a unique temporary directory
    #[cfg(test)]
    pub(crate) fn new_for_test() -> io::Result<Self> {
        use std::sync::atomic::{AtomicU64, Ordering};
        static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

        let test_id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let temp_dir = std::env::temp_dir().join(format!(
            "cloud-quest-test-{}-{}",
            std::process::id(),
            test_id
        ));
        fs::create_dir_all(&temp_dir)?;

        Ok(Self::with_path(temp_dir.join(SAVE_FILE_NAME)))
    }

    pub fn save_path(&self) -> &Path {
        &self.save_path
    }

    /// Saves the game state to disk with checksum verification
    pub fn save(&self, state: &GameState) -> Result<()> {
        let bytes = state.save_record().to_bytes()?;
        fs::write(&self.save_path, bytes)?;
        info!(path = %self.save_path.display(), "game saved");
        Ok(())
    }

    /// Loads the game state from disk.
    ///
    /// Returns an error if:
    /// - The file doesn't exist or can't be read
    /// - The version magic is incorrect
    /// - The checksum verification fails
    /// - The record is incomplete or inconsistent
    pub fn load(&self) -> Result<GameState> {
        let bytes = fs::read(&self.save_path)?;
        let record = SaveRecord::from_bytes(&bytes)?;
        GameState::from_record(record, self.config.clone())
    }

    /// Checks if a save file exists
    pub fn save_exists(&self) -> bool {
        self.save_path.exists()
    }

    /// Loads the saved game, starting a new one when there is no usable save.
    pub fn load_or_default(&self) -> LoadOutcome {
        match self.load() {
            Ok(state) => LoadOutcome {
                state,
                source: LoadSource::Restored,
            },
            Err(err) => {
                let reason = match &err {
                    EngineError::Io(io_err) if io_err.kind() == io::ErrorKind::NotFound => {
                        "no save file".to_string()
                    }
                    other => other.to_string(),
                };
                warn!(
                    path = %self.save_path.display(),
                    reason = reason.as_str(),
                    "starting a new game"
                );
                LoadOutcome {
                    state: GameState::new_game(self.config.clone()),
                    source: LoadSource::FreshDefault { reason },
                }
            }
        }
    }

    /// Removes the save file if present.
    pub fn delete(&self) -> Result<()> {
        match fs::remove_file(&self.save_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
