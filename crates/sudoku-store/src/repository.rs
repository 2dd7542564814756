//! Repository layer composing game storage and settings storage.
//!
//! Owns the fallback rule: asking for the current game when none exists
//! reads the settings, generates a fresh puzzle, persists it, and returns
//! it. A settings read failure surfaces as an error.

use crate::error::{StoreError, StoreResult};
use crate::game_storage::GameStorage;
use crate::settings_storage::{Settings, SettingsStorage};
use log::{debug, warn};
use sudoku_core::{is_complete, Generator, Puzzle};

/// Orchestrates the current game and the user settings behind it
pub struct GameRepository<G: GameStorage, S: SettingsStorage> {
    games: G,
    settings: S,
    generator: Generator,
}

impl<G: GameStorage, S: SettingsStorage> GameRepository<G, S> {
    pub fn new(games: G, settings: S) -> Self {
        Self::with_generator(games, settings, Generator::new())
    }

    /// Repository with an explicit (e.g. seeded) generator
    pub fn with_generator(games: G, settings: S, generator: Generator) -> Self {
        Self {
            games,
            settings,
            generator,
        }
    }

    /// The current game and whether it is already complete. Falls back to
    /// generating and persisting a fresh puzzle from the stored settings
    /// when no game exists.
    pub fn get_current_game(&mut self) -> StoreResult<(Puzzle, bool)> {
        match self.games.get_current_game() {
            Ok(puzzle) => {
                let complete = is_complete(&puzzle);
                Ok((puzzle, complete))
            }
            Err(StoreError::NotFound) => {
                let settings = self.settings.get_settings()?;
                debug!(
                    "no current game, generating {}x{} {}",
                    settings.boundary, settings.boundary, settings.difficulty
                );
                let puzzle = self.create_and_write(settings)?;
                let complete = is_complete(&puzzle);
                Ok((puzzle, complete))
            }
            Err(e) => Err(e),
        }
    }

    /// Persist the current game with a new elapsed time
    pub fn save_game(&mut self, elapsed_time: u64) -> StoreResult<()> {
        let mut puzzle = self.games.get_current_game()?;
        puzzle.elapsed_time = elapsed_time;
        self.games.update_game(puzzle)?;
        Ok(())
    }

    /// Replace the stored game wholesale
    pub fn update_game(&mut self, game: Puzzle) -> StoreResult<()> {
        self.games.update_game(game)?;
        Ok(())
    }

    /// Write one cell and the elapsed time; returns whether the resulting
    /// puzzle is complete. Completion is checked here, immediately after
    /// the mutation.
    pub fn update_node(&mut self, x: u8, y: u8, value: u8, elapsed_time: u64) -> StoreResult<bool> {
        let puzzle = self.games.update_node(x, y, value, elapsed_time)?;
        Ok(is_complete(&puzzle))
    }

    /// Persist new settings, then generate and persist a fresh puzzle for
    /// them
    pub fn create_new_game(&mut self, settings: Settings) -> StoreResult<Puzzle> {
        self.settings.update_settings(settings)?;
        self.create_and_write(settings)
    }

    pub fn get_settings(&mut self) -> StoreResult<Settings> {
        self.settings.get_settings()
    }

    pub fn update_settings(&mut self, settings: Settings) -> StoreResult<()> {
        self.settings.update_settings(settings)
    }

    fn create_and_write(&mut self, settings: Settings) -> StoreResult<Puzzle> {
        let puzzle = self
            .generator
            .generate(settings.boundary, settings.difficulty)
            .map_err(|e| {
                warn!("puzzle generation failed: {}", e);
                StoreError::from(e)
            })?;
        self.games.update_game(puzzle)
    }
}
