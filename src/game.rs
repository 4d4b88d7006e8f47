//! Fixed-step driver
//!
//! Owns the game state and the high-score store, turns frame time into
//! simulation ticks, and persists the high score when a run beats it.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS};
use crate::highscores::HighScore;
use crate::persistence::ScoreStore;
use crate::presentation::Snapshot;
use crate::sim::{Action, GameEvent, GameState, TickInput, tick};
use crate::tuning::Tuning;

/// Game instance holding all state
pub struct Game<S: ScoreStore> {
    state: GameState,
    store: S,
    /// One-shot input for the next tick
    input: TickInput,
    accumulator: f32,
    /// Events since the last `take_events`
    events: Vec<GameEvent>,
}

impl<S: ScoreStore> Game<S> {
    /// Create a game in the menu, reading the stored high score once
    pub fn new(tuning: Tuning, store: S) -> Self {
        let high_score = HighScore::load(&store);
        Self {
            state: GameState::with_high_score(tuning, high_score.best()),
            store,
            input: TickInput::default(),
            accumulator: 0.0,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Queue an action for the next tick
    pub fn press(&mut self, action: Action) {
        self.input.press(action);
    }

    /// Queue every action of `input` for the next tick
    pub fn queue(&mut self, input: &TickInput) {
        for action in input.actions() {
            self.input.press(action);
        }
    }

    /// Run exactly one simulation tick with the queued input
    pub fn step(&mut self) {
        let input = std::mem::take(&mut self.input);
        tick(&mut self.state, &input);

        for event in self.state.drain_events() {
            if let GameEvent::NewHighScore(_) = event {
                self.state.high_score.persist(&mut self.store);
            }
            self.events.push(event);
        }
    }

    /// Advance by wall-clock `dt` seconds. Returns the number of ticks run.
    pub fn update(&mut self, dt: f32) -> u32 {
        // NaN would poison the accumulator for good
        let dt = if dt.is_finite() { dt } else { 0.0 };
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);
        let tick_seconds = self.state.tuning.tick_seconds;

        let mut substeps = 0;
        while self.accumulator >= tick_seconds && substeps < MAX_SUBSTEPS {
            self.step();
            self.accumulator -= tick_seconds;
            substeps += 1;
        }
        substeps
    }

    /// Take the events produced since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only view for presentation
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{FileScoreStore, MemoryScoreStore};
    use crate::sim::{Car, GameMode, Lane};

    fn crash_game(store: MemoryScoreStore) -> Game<MemoryScoreStore> {
        let tuning = Tuning {
            car_chance_percent: 0,
            ..Default::default()
        };
        let mut game = Game::new(tuning, store);
        game.press(Action::Confirm);
        game.step();
        game.state.world.place_car(Car {
            segment: 6,
            lane: Lane::Center,
        });
        game
    }

    #[test]
    fn test_reads_high_score_at_startup() {
        let store = MemoryScoreStore {
            value: Some(77),
            saves: 0,
        };
        let game = Game::new(Tuning::default(), store);
        assert_eq!(game.state().high_score.best(), 77);
        assert_eq!(game.state().mode, GameMode::Menu);
    }

    #[test]
    fn test_new_best_is_persisted_once() {
        let mut game = crash_game(MemoryScoreStore::default());
        while game.state().mode == GameMode::Playing {
            game.step();
        }
        for _ in 0..10 {
            game.step();
        }
        let distance = game.state().distance;
        assert_eq!(game.store().value, Some(distance));
        assert_eq!(game.store().saves, 1);
        assert!(game.take_events().contains(&GameEvent::NewHighScore(distance)));
    }

    #[test]
    fn test_worse_run_is_not_persisted() {
        let store = MemoryScoreStore {
            value: Some(1_000_000),
            saves: 0,
        };
        let mut game = crash_game(store);
        while game.state().mode == GameMode::Playing {
            game.step();
        }
        assert_eq!(game.store().saves, 0);
        assert_eq!(game.state().high_score.best(), 1_000_000);
    }

    #[test]
    fn test_storage_failure_does_not_block_play() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileScoreStore::new(dir.path().join("gone").join("highscore.txt"));
        let tuning = Tuning {
            car_chance_percent: 0,
            ..Default::default()
        };
        let mut game = Game::new(tuning, store);
        assert_eq!(game.state().high_score.best(), 0);
        game.press(Action::Confirm);
        game.step();
        game.state.world.place_car(Car {
            segment: 6,
            lane: Lane::Center,
        });
        while game.state().mode == GameMode::Playing {
            game.step();
        }
        assert_eq!(game.state().mode, GameMode::GameOver);
        game.press(Action::Confirm);
        game.step();
        assert_eq!(game.state().mode, GameMode::Playing);
    }

    #[test]
    fn test_update_accumulates_fixed_ticks() {
        let mut game = Game::new(Tuning::default(), MemoryScoreStore::default());
        assert_eq!(game.update(0.010), 0);
        assert_eq!(game.update(0.010), 1);
        assert_eq!(game.state().time_ticks, 1);
        // A 5 s hitch is clamped to MAX_FRAME_DT: 0.104 s of backlog
        assert_eq!(game.update(5.0), 6);
    }

    #[test]
    fn test_update_ignores_non_finite_dt() {
        let mut game = Game::new(Tuning::default(), MemoryScoreStore::default());
        assert_eq!(game.update(f32::NAN), 0);
        assert_eq!(game.update(f32::INFINITY), 0);
        assert_eq!(game.update(-1.0), 0);
        // Clock still runs afterwards
        assert_eq!(game.update(0.020), 1);
        assert_eq!(game.state().time_ticks, 1);
    }

    #[test]
    fn test_one_shot_input_is_consumed() {
        let mut game = Game::new(Tuning::default(), MemoryScoreStore::default());
        game.queue(&TickInput::with(Action::Confirm));
        game.step();
        assert_eq!(game.state().mode, GameMode::Playing);
        game.press(Action::MoveLeft);
        game.step();
        game.step();
        assert_eq!(game.state().player.lane, Lane::Left);
    }
}
