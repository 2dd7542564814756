//! Durable storage for the puzzle game: the current game, user settings,
//! and best-time statistics, plus the repository layer that composes them.
//!
//! Each concern is a trait with a file-backed implementation (JSON under
//! the platform data directory) and an in-memory implementation for tests.

mod error;
mod game_storage;
mod repository;
mod settings_storage;
mod stats_storage;

pub use error::{StoreError, StoreResult};
pub use game_storage::{FileGameStorage, GameStorage, MemoryGameStorage};
pub use repository::GameRepository;
pub use settings_storage::{FileSettingsStorage, MemorySettingsStorage, Settings, SettingsStorage};
pub use stats_storage::{
    FileStatisticsStore, MemoryStatisticsStore, StatisticsStore, UserStatistics,
};
