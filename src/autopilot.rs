//! Demo/soak bot that plays the game
//!
//! Reads the state, never mutates it, and answers with a [`TickInput`]. All
//! randomness comes from a seeded PCG so a bot run is reproducible.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::{Action, GameMode, GameState, Lane, TickInput};

/// How many segments ahead the bot watches for cars
const LOOK_AHEAD_SEGMENTS: f32 = 2.5;

pub struct Autopilot {
    rng: Pcg32,
    /// Chance per playing tick of doing nothing
    hesitation: f64,
    /// Start a new run after a crash
    restart: bool,
}

impl Autopilot {
    pub fn new(seed: u64, hesitation: f64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            hesitation: if hesitation.is_finite() {
                hesitation.clamp(0.0, 1.0)
            } else {
                0.0
            },
            restart: true,
        }
    }

    /// Stay on the game-over screen instead of restarting
    pub fn without_restart(mut self) -> Self {
        self.restart = false;
        self
    }

    /// Pick this tick's input
    pub fn decide(&mut self, state: &GameState) -> TickInput {
        match state.mode {
            GameMode::Menu => TickInput::with(Action::Confirm),
            GameMode::GameOver if self.restart => TickInput::with(Action::Confirm),
            GameMode::Paused => TickInput::with(Action::Cancel),
            GameMode::GameOver | GameMode::Countdown => TickInput::default(),
            GameMode::Playing => {
                if self.rng.random_bool(self.hesitation) {
                    TickInput::default()
                } else {
                    steer(state)
                }
            }
        }
    }
}

/// Distance ahead of the player to the centre of `segment` (negative = behind)
fn distance_ahead(state: &GameState, segment: i64) -> f32 {
    let length = state.tuning.segment_length;
    (segment - state.segment) as f32 * length + length * 0.5 - state.scroll_offset
}

/// Nearest car in `lane` that still matters, as distance ahead
fn nearest_car(state: &GameState, lane: Lane) -> Option<f32> {
    let reach = state.tuning.car_hit_distance;
    state
        .world
        .cars()
        .iter()
        .filter(|c| c.lane == lane)
        .map(|c| distance_ahead(state, c.segment))
        .filter(|&d| d > -reach)
        .min_by(|a, b| a.total_cmp(b))
}

fn lane_is_clear(state: &GameState, lane: Lane) -> bool {
    let window = state.tuning.segment_length * LOOK_AHEAD_SEGMENTS;
    nearest_car(state, lane).is_none_or(|d| d > window)
}

fn has_coin_ahead(state: &GameState, lane: Lane) -> bool {
    let window = state.tuning.segment_length * LOOK_AHEAD_SEGMENTS;
    state.world.coins().iter().any(|c| {
        !c.collected && c.lane == lane && {
            let d = distance_ahead(state, c.segment);
            d > 0.0 && d < window
        }
    })
}

fn move_toward(from: Lane, to: Lane) -> TickInput {
    match to.offset().cmp(&from.offset()) {
        std::cmp::Ordering::Less => TickInput::with(Action::MoveLeft),
        std::cmp::Ordering::Greater => TickInput::with(Action::MoveRight),
        std::cmp::Ordering::Equal => TickInput::default(),
    }
}

fn steer(state: &GameState) -> TickInput {
    let lane = state.player.lane;
    let neighbours = [lane.left(), lane.right()];

    if lane_is_clear(state, lane) {
        // Safe: detour for a coin if the neighbour is just as safe
        let coin_lane = neighbours
            .into_iter()
            .flatten()
            .find(|&n| has_coin_ahead(state, n) && lane_is_clear(state, n));
        return match coin_lane {
            Some(n) if !has_coin_ahead(state, lane) => move_toward(lane, n),
            _ => TickInput::default(),
        };
    }

    // Blocked: dodge sideways, preferring the centre
    let mut escapes: Vec<Lane> = neighbours
        .into_iter()
        .flatten()
        .filter(|&n| lane_is_clear(state, n))
        .collect();
    escapes.sort_by_key(|n| n.offset().abs());
    if let Some(&target) = escapes.first() {
        return move_toward(lane, target);
    }

    // Nowhere to go: hop when the car is about to arrive
    let t = &state.tuning;
    let trigger = t.car_hit_distance + state.scroll_speed * 6.0;
    match nearest_car(state, lane) {
        Some(d) if d < trigger && !state.player.jumping => TickInput::with(Action::Jump),
        _ => TickInput::default(),
    }
}
