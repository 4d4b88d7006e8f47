//! Street Runner - an endless-runner road game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (world generation, tick, collisions, modes)
//! - `tuning`: Data-driven game balance
//! - `game`: Fixed-step driver owning state and storage
//! - `presentation`: Read-only frame snapshots for a renderer
//! - `persistence` / `highscores`: Best-score storage
//! - `autopilot`: Seeded bot for demos and soak runs

pub mod autopilot;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod presentation;
pub mod sim;
pub mod tuning;

pub use autopilot::Autopilot;
pub use game::Game;
pub use highscores::HighScore;
pub use persistence::{FileScoreStore, MemoryScoreStore, PersistError, ScoreStore};
pub use presentation::{LogPresenter, Presenter, Snapshot};
pub use tuning::{Tuning, TuningError};

/// Driver constants
pub mod consts {
    /// Nominal tick interval in milliseconds (~60 Hz)
    pub const TICK_MS: u64 = 16;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame time fed into the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
}
