//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in one [`GameState`] aggregate.

use serde::{Deserialize, Serialize};

use super::mode::GameMode;
use super::world::World;
use crate::highscores::HighScore;
use crate::tuning::Tuning;

/// One of the three lanes of the road
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lane {
    Left,
    Center,
    Right,
}

impl Lane {
    /// All lanes, left to right
    pub const ALL: [Lane; 3] = [Lane::Left, Lane::Center, Lane::Right];

    /// Lateral offset in lane units (-1, 0, 1)
    pub const fn offset(self) -> i32 {
        match self {
            Lane::Left => -1,
            Lane::Center => 0,
            Lane::Right => 1,
        }
    }

    /// Position in [`Lane::ALL`]
    pub const fn index(self) -> usize {
        (self.offset() + 1) as usize
    }

    pub fn from_offset(offset: i32) -> Option<Lane> {
        match offset {
            -1 => Some(Lane::Left),
            0 => Some(Lane::Center),
            1 => Some(Lane::Right),
            _ => None,
        }
    }

    /// Neighbour to the left, `None` at the road edge
    pub fn left(self) -> Option<Lane> {
        Self::from_offset(self.offset() - 1)
    }

    /// Neighbour to the right, `None` at the road edge
    pub fn right(self) -> Option<Lane> {
        Self::from_offset(self.offset() + 1)
    }

    /// World X of the lane centre
    pub fn x(self, lane_width: f32) -> f32 {
        self.offset() as f32 * lane_width
    }
}

/// The runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Lane the player is committed to
    pub lane: Lane,
    /// Continuous lateral position, eases toward the lane centre
    pub x: f32,
    /// Height above the road
    pub y: f32,
    pub vel_y: f32,
    pub jumping: bool,
}

impl Player {
    pub fn new(ground_height: f32) -> Self {
        Self {
            lane: Lane::Center,
            x: 0.0,
            y: ground_height,
            vel_y: 0.0,
            jumping: false,
        }
    }

    /// Start a jump. Ignored while already airborne.
    pub fn jump(&mut self, impulse: f32) -> bool {
        if self.jumping {
            return false;
        }
        self.jumping = true;
        self.vel_y = impulse;
        true
    }

    /// Integrate one tick of the jump arc, landing at `ground`
    pub fn integrate_jump(&mut self, gravity: f32, ground: f32) {
        if !self.jumping {
            return;
        }
        self.y += self.vel_y;
        self.vel_y -= gravity;
        if self.y <= ground {
            self.y = ground;
            self.vel_y = 0.0;
            self.jumping = false;
        }
    }

    /// Move `x` toward the lane centre by at most `speed`, never overshooting
    pub fn ease_toward_lane(&mut self, lane_width: f32, speed: f32) {
        let target = self.lane.x(lane_width);
        if self.x < target {
            self.x = (self.x + speed).min(target);
        } else if self.x > target {
            self.x = (self.x - speed).max(target);
        }
    }
}

/// Things that happened during a tick, for the driver and presentation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ModeChanged { from: GameMode, to: GameMode },
    SegmentAdvanced(i64),
    CoinCollected { segment: i64, lane: Lane },
    Crashed { segment: i64, lane: Lane },
    Jumped,
    NewHighScore(u64),
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    pub mode: GameMode,
    /// Distance score, one point per playing tick
    pub distance: u64,
    /// Coins collected this run
    pub coin_score: u64,
    pub high_score: HighScore,
    /// Segment the player is currently on
    pub segment: i64,
    /// Progress within the current segment, in `[0, segment_length)`
    pub scroll_offset: f32,
    pub scroll_speed: f32,
    pub lane_speed: f32,
    /// Total distance scrolled this run (world units)
    pub travelled: f64,
    pub player: Player,
    pub world: World,
    /// Day/night phase in `[0, 2π)`
    pub day_phase: f32,
    /// Windmill blade angle in degrees, `[0, 360)`
    pub windmill_angle: f32,
    /// Seconds left before play resumes
    pub countdown: f32,
    /// Simulation tick counter (all modes)
    pub time_ticks: u64,
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh state sitting in the menu with no run in progress
    pub fn new(tuning: Tuning) -> Self {
        let player = Player::new(tuning.ground_height);
        let scroll_speed = tuning.base_scroll_speed;
        let lane_speed = tuning.lane_speed(scroll_speed);
        Self {
            mode: GameMode::Menu,
            distance: 0,
            coin_score: 0,
            high_score: HighScore::default(),
            segment: 0,
            scroll_offset: 0.0,
            scroll_speed,
            lane_speed,
            travelled: 0.0,
            player,
            world: World::new(),
            day_phase: 0.0,
            windmill_angle: 0.0,
            countdown: tuning.countdown_seconds,
            time_ticks: 0,
            events: Vec::new(),
            tuning,
        }
    }

    /// Menu state that remembers a previously persisted best
    pub fn with_high_score(tuning: Tuning, best: u64) -> Self {
        let mut state = Self::new(tuning);
        state.high_score = HighScore::new(best);
        state
    }

    /// Reinitialise the run: scores, position, collections and segment.
    ///
    /// The high score, day phase and mode are left alone.
    pub fn reset_run(&mut self) {
        self.distance = 0;
        self.coin_score = 0;
        self.segment = 0;
        self.scroll_offset = 0.0;
        self.scroll_speed = self.tuning.base_scroll_speed;
        self.lane_speed = self.tuning.lane_speed(self.scroll_speed);
        self.travelled = 0.0;
        self.player = Player::new(self.tuning.ground_height);
        self.windmill_angle = 0.0;
        self.countdown = self.tuning.countdown_seconds;

        self.world.clear();
        let first = self.tuning.first_spawn_segment;
        let horizon = self.tuning.initial_horizon();
        let spawned = self.world.ensure_spawned_through(first, horizon, &self.tuning);
        log::debug!("Run reset: generated segments {first}..={horizon} ({spawned})");
    }

    /// Switch mode, recording the change
    pub fn set_mode(&mut self, to: GameMode) {
        let from = self.mode;
        if from == to {
            return;
        }
        log::debug!("Mode {from:?} -> {to:?}");
        self.mode = to;
        self.events.push(GameEvent::ModeChanged { from, to });
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_bounds() {
        assert_eq!(Lane::Left.left(), None);
        assert_eq!(Lane::Right.right(), None);
        assert_eq!(Lane::Center.left(), Some(Lane::Left));
        assert_eq!(Lane::from_offset(2), None);
        for lane in Lane::ALL {
            assert_eq!(Lane::ALL[lane.index()], lane);
            assert_eq!(Lane::from_offset(lane.offset()), Some(lane));
        }
        assert_eq!(Lane::Right.x(2.0), 2.0);
    }

    #[test]
    fn test_jump_arc_lands() {
        let tuning = Tuning::default();
        let mut player = Player::new(tuning.ground_height);
        assert!(player.jump(tuning.jump_impulse));
        assert!(!player.jump(tuning.jump_impulse), "no double jump");

        let mut peak = player.y;
        let mut ticks = 0;
        while player.jumping {
            player.integrate_jump(tuning.gravity, tuning.ground_height);
            peak = peak.max(player.y);
            ticks += 1;
            assert!(ticks < 100, "jump never landed");
        }
        assert_eq!(player.y, tuning.ground_height);
        assert_eq!(player.vel_y, 0.0);
        assert!(peak > tuning.airborne_clearance);
    }

    #[test]
    fn test_ease_never_overshoots() {
        let mut player = Player::new(0.5);
        player.lane = Lane::Right;
        player.ease_toward_lane(2.0, 0.7);
        assert!((player.x - 0.7).abs() < 1e-6);
        player.ease_toward_lane(2.0, 0.7);
        player.ease_toward_lane(2.0, 0.7);
        assert_eq!(player.x, 2.0);
        player.ease_toward_lane(2.0, 0.7);
        assert_eq!(player.x, 2.0);

        player.lane = Lane::Left;
        for _ in 0..10 {
            player.ease_toward_lane(2.0, 0.7);
        }
        assert_eq!(player.x, -2.0);
    }

    #[test]
    fn test_reset_run_prepopulates() {
        let mut state = GameState::with_high_score(Tuning::default(), 42);
        state.distance = 10;
        state.coin_score = 3;
        state.segment = 7;
        state.reset_run();
        assert_eq!(state.distance, 0);
        assert_eq!(state.coin_score, 0);
        assert_eq!(state.segment, 0);
        assert_eq!(state.high_score.best(), 42);
        assert_eq!(state.world.spawned_through(), Some(99));
        assert!(state.world.cars().iter().all(|c| (5..=99).contains(&c.segment)));
    }

    #[test]
    fn test_set_mode_records_event() {
        let mut state = GameState::new(Tuning::default());
        state.set_mode(GameMode::Menu);
        assert!(state.events.is_empty());
        state.set_mode(GameMode::Playing);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::ModeChanged {
                from: GameMode::Menu,
                to: GameMode::Playing
            }]
        );
        assert!(state.events.is_empty());
    }
}
