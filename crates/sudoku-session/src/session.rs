//! The game session controller: one in-flight mutation at a time, a
//! host-driven 1-second timer, and deterministic cancellation of all
//! session work as a unit.

use crate::event::GameEvent;
use crate::view::{ScreenState, SessionView};
use log::{debug, warn};
use sudoku_store::{GameRepository, GameStorage, SettingsStorage, StatisticsStore, StoreError};

/// What the host should do after an event has been handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    Continue,
    /// Leave this session for the new-game screen
    NavigateToNewGame,
}

/// Orchestrates one puzzle session between the storage layer and the
/// presentation layer
pub struct SessionController<G: GameStorage, S: SettingsStorage, T: StatisticsStore> {
    repo: GameRepository<G, S>,
    stats: T,
    view: SessionView,
    timer_running: bool,
    ended: bool,
}

impl<G: GameStorage, S: SettingsStorage, T: StatisticsStore> SessionController<G, S, T> {
    pub fn new(repo: GameRepository<G, S>, stats: T) -> Self {
        Self {
            repo,
            stats,
            view: SessionView::new(),
            timer_running: false,
            ended: false,
        }
    }

    /// The UI-facing state
    pub fn view(&self) -> &SessionView {
        &self.view
    }

    /// Mutable access for consuming the error notification
    pub fn view_mut(&mut self) -> &mut SessionView {
        &mut self.view
    }

    /// The repository, e.g. for creating a new game after navigation
    pub fn repository_mut(&mut self) -> &mut GameRepository<G, S> {
        &mut self.repo
    }

    pub fn timer_running(&self) -> bool {
        self.timer_running
    }

    /// One beat of the repeating 1-second timer, driven by the host loop
    pub fn tick(&mut self) {
        if self.timer_running && !self.ended {
            self.view.timer += 1;
        }
    }

    pub fn handle_event(&mut self, event: GameEvent) -> SessionAction {
        if self.ended {
            return SessionAction::Continue;
        }
        match event {
            GameEvent::Start => self.on_start(),
            GameEvent::Stop => self.on_stop(),
            GameEvent::InputDigit(value) => self.on_input(value),
            GameEvent::TileFocused { x, y } => self.on_tile_focused(x, y),
            GameEvent::NewGameRequested => self.on_new_game(),
        }
    }

    fn on_start(&mut self) -> SessionAction {
        match self.repo.get_current_game() {
            Ok((puzzle, complete)) => {
                self.view.load_puzzle(&puzzle);
                if complete {
                    self.view.screen = ScreenState::Complete;
                } else {
                    self.view.screen = ScreenState::Active;
                    self.timer_running = true;
                }
                SessionAction::Continue
            }
            Err(e) => {
                // No game could be loaded or created; send the player to
                // the new-game screen.
                warn!("failed to load current game: {}", e);
                self.view.flag_error();
                self.cancel_all();
                SessionAction::NavigateToNewGame
            }
        }
    }

    fn on_input(&mut self, value: u8) -> SessionAction {
        if self.view.screen != ScreenState::Active {
            return SessionAction::Continue;
        }
        let Some(tile) = self.view.focused_tile() else {
            return SessionAction::Continue;
        };
        if value > self.view.boundary {
            debug!("ignoring digit {} on a {}-board", value, self.view.boundary);
            return SessionAction::Continue;
        }

        match self.repo.update_node(tile.x, tile.y, value, self.view.timer) {
            Ok(complete) => {
                self.view.set_tile_value(tile.x, tile.y, value);
                if complete {
                    self.timer_running = false;
                    self.finish_with_statistics();
                }
            }
            Err(StoreError::FixedCell { x, y }) => {
                debug!("input on fixed cell ({}, {}) refused", x, y);
            }
            Err(e) => {
                warn!("node update failed: {}", e);
                self.view.flag_error();
            }
        }
        SessionAction::Continue
    }

    /// Record the completion time, then show the complete screen. The
    /// screen transitions only after the statistics update resolves, but
    /// a failure there still completes the session visually.
    fn finish_with_statistics(&mut self) {
        match self.stats.update_statistics(
            self.view.timer,
            self.view.boundary,
            self.view.difficulty,
        ) {
            Ok(is_record) => self.view.is_new_record = is_record,
            Err(e) => {
                warn!("statistics update failed: {}", e);
                self.view.flag_error();
            }
        }
        self.view.screen = ScreenState::Complete;
    }

    fn on_tile_focused(&mut self, x: u8, y: u8) -> SessionAction {
        if self.view.screen == ScreenState::Active {
            self.view.set_focus(x, y);
        }
        SessionAction::Continue
    }

    fn on_stop(&mut self) -> SessionAction {
        if self.view.screen != ScreenState::Complete {
            if let Err(e) = self.repo.save_game(time_offset(self.view.timer)) {
                warn!("failed to persist game on stop: {}", e);
                self.view.flag_error();
            }
        }
        self.cancel_all();
        SessionAction::Continue
    }

    fn on_new_game(&mut self) -> SessionAction {
        let was_complete = self.view.screen == ScreenState::Complete;
        self.view.screen = ScreenState::Loading;

        // A finished puzzle needs no save; otherwise persist progress and
        // navigate regardless of the save outcome.
        if !was_complete {
            if let Err(e) = self.repo.save_game(time_offset(self.view.timer)) {
                warn!("failed to persist game before new game: {}", e);
                self.view.flag_error();
            }
        }
        self.cancel_all();
        SessionAction::NavigateToNewGame
    }

    /// Cancel the timer and all remaining session work as a unit; an
    /// ended session ignores further events and ticks
    fn cancel_all(&mut self) {
        self.timer_running = false;
        self.ended = true;
    }
}

/// Stored elapsed time compensates for the in-flight timer tick
fn time_offset(elapsed: u64) -> u64 {
    elapsed.saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_offset() {
        assert_eq!(time_offset(0), 0);
        assert_eq!(time_offset(1), 0);
        assert_eq!(time_offset(42), 41);
    }
}
