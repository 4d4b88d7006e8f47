//! Fixed timestep simulation tick
//!
//! Core game loop that advances the run deterministically: input first, then
//! the mode-dependent update.

use std::f32::consts::TAU;

use serde::{Deserialize, Serialize};

use super::collision;
use super::mode::{Action, GameMode, Transition};
use super::state::{GameEvent, GameState, Lane};

/// Input commands for a single tick (one-shot flags)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub confirm: bool,
    pub cancel: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl TickInput {
    /// Input with a single action pressed
    pub fn with(action: Action) -> Self {
        let mut input = Self::default();
        input.press(action);
        input
    }

    pub fn press(&mut self, action: Action) {
        match action {
            Action::Confirm => self.confirm = true,
            Action::Cancel => self.cancel = true,
            Action::MoveLeft => self.left = true,
            Action::MoveRight => self.right = true,
            Action::Jump => self.jump = true,
        }
    }

    /// Pressed actions in processing order
    pub fn actions(&self) -> impl Iterator<Item = Action> + '_ {
        [
            (self.cancel, Action::Cancel),
            (self.confirm, Action::Confirm),
            (self.left, Action::MoveLeft),
            (self.right, Action::MoveRight),
            (self.jump, Action::Jump),
        ]
        .into_iter()
        .filter_map(|(pressed, action)| pressed.then_some(action))
    }

    pub fn is_empty(&self) -> bool {
        self.actions().next().is_none()
    }
}

/// Apply one action according to the mode table
pub fn apply_action(state: &mut GameState, action: Action) {
    match state.mode.on_action(action) {
        Transition::Ignore => {}
        Transition::StartRun => {
            state.reset_run();
            log::info!("Run started");
            state.set_mode(GameMode::Playing);
        }
        Transition::BeginCountdown => {
            state.countdown = state.tuning.countdown_seconds;
            state.set_mode(GameMode::Countdown);
        }
        Transition::Enter(mode) => state.set_mode(mode),
        Transition::Control(Action::MoveLeft) => {
            if let Some(lane) = state.player.lane.left() {
                state.player.lane = lane;
            }
        }
        Transition::Control(Action::MoveRight) => {
            if let Some(lane) = state.player.lane.right() {
                state.player.lane = lane;
            }
        }
        Transition::Control(Action::Jump) => {
            if state.player.jump(state.tuning.jump_impulse) {
                state.events.push(GameEvent::Jumped);
            }
        }
        Transition::Control(Action::Confirm | Action::Cancel) => {
            unreachable!("mode table never routes {action:?} to player control")
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    for action in input.actions() {
        apply_action(state, action);
    }

    state.time_ticks += 1;

    if state.mode == GameMode::Countdown {
        step_countdown(state);
    }
    // An expiring countdown plays out the rest of the same tick
    match state.mode {
        GameMode::Playing => step_playing(state),
        GameMode::Menu | GameMode::Countdown | GameMode::Paused | GameMode::GameOver => {}
    }
}

fn step_countdown(state: &mut GameState) {
    state.countdown -= state.tuning.tick_seconds;
    if state.countdown <= 0.0 {
        state.countdown = 0.0;
        state.set_mode(GameMode::Playing);
    }
}

/// One playing tick: scroll, spawn, physics, then collisions
fn step_playing(state: &mut GameState) {
    debug_assert!(
        state.world.spawned_through().is_some(),
        "playing without a generated world"
    );

    state.distance += 1;
    state.windmill_angle = (state.windmill_angle + state.tuning.windmill_step) % 360.0;

    state.scroll_speed = state.tuning.scroll_speed(state.distance);
    state.lane_speed = state.tuning.lane_speed(state.scroll_speed);

    advance_scroll(state);

    state.day_phase += state.tuning.day_cycle_step;
    if state.day_phase >= TAU {
        state.day_phase -= TAU;
    }

    let (gravity, ground, lane_width) = (
        state.tuning.gravity,
        state.tuning.ground_height,
        state.tuning.lane_width,
    );
    state.player.integrate_jump(gravity, ground);
    state.player.ease_toward_lane(lane_width, state.lane_speed);

    let result = collision::resolve(state);
    if let Some((segment, lane)) = result.crash {
        end_run(state, segment, lane);
    }
}

/// Move along the road, crossing at most one segment boundary
fn advance_scroll(state: &mut GameState) {
    let length = state.tuning.segment_length;
    state.scroll_offset += state.scroll_speed;
    state.travelled += f64::from(state.scroll_speed);

    if state.scroll_offset >= length {
        state.scroll_offset -= length;
        state.segment += 1;
        state.events.push(GameEvent::SegmentAdvanced(state.segment));
        log::trace!("Segment {}", state.segment);

        let horizon = state.tuning.generation_horizon(state.segment);
        state
            .world
            .ensure_spawned_through(state.segment, horizon, &state.tuning);
        state
            .world
            .prune_before(state.segment - state.tuning.keep_behind_segments);
    }
}

fn end_run(state: &mut GameState, segment: i64, lane: Lane) {
    log::info!(
        "Crashed into car at segment {segment} lane {lane:?}: distance {}, coins {}",
        state.distance,
        state.coin_score
    );
    state.set_mode(GameMode::GameOver);
    if state.high_score.record(state.distance) {
        log::info!("New high score: {}", state.distance);
        state.events.push(GameEvent::NewHighScore(state.distance));
    }
}
