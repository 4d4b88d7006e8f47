//! Data-driven game balance
//!
//! Every number the simulation depends on lives in [`Tuning`]. Defaults are
//! the shipped balance; a JSON file can override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when loading or validating tuning data.
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("base scroll speed {base} exceeds max scroll speed {max}")]
    SpeedRange { base: f32, max: f32 },
    #[error("max scroll speed {max} must be below segment length {segment_length}")]
    SpeedExceedsSegment { max: f32, segment_length: f32 },
    #[error("{field} is a percentage and must be at most 100 (got {value})")]
    Percent { field: &'static str, value: u32 },
    #[error("visible window must contain at least one segment")]
    EmptyWindow,
    #[error("{field} must not be negative (got {value})")]
    NegativeCount { field: &'static str, value: i64 },
    #[error("{field} must be zero or more (got {value})")]
    NegativeRate { field: &'static str, value: f32 },
    #[error("airborne clearance {clearance} is below ground height {ground}")]
    ClearanceBelowGround { clearance: f32, ground: f32 },
}

/// Gameplay constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Track ===
    /// Length of one road segment (world units)
    pub segment_length: f32,
    /// Segments drawn ahead of the player
    pub visible_segments: i64,
    /// Extra segments generated beyond the visible window while running
    pub lookahead_segments: i64,
    /// First segment populated on reset (keeps the start clear)
    pub first_spawn_segment: i64,
    /// Extra segments beyond the visible window populated on reset
    pub initial_lookahead_segments: i64,
    /// Segments kept behind the player before entries are pruned
    pub keep_behind_segments: i64,
    /// Mixed into every per-segment hash; 0 is the classic world
    pub world_seed: u32,

    // === Spawning ===
    /// Chance (percent) of a car in each non-safe lane
    pub car_chance_percent: u32,
    /// Chance (percent) of a coin in each lane without a car
    pub coin_chance_percent: u32,

    // === Speed ===
    pub base_scroll_speed: f32,
    pub max_scroll_speed: f32,
    /// Scroll speed gained per distance point
    pub difficulty_factor: f32,

    // === Player ===
    pub lane_width: f32,
    /// Lane change speed = base + scale * scroll speed
    pub lane_speed_base: f32,
    pub lane_speed_scale: f32,
    pub gravity: f32,
    pub jump_impulse: f32,
    /// Standing height of the player
    pub ground_height: f32,

    // === Collision ===
    pub car_hit_distance: f32,
    pub coin_hit_distance: f32,
    /// Players above this height clear cars
    pub airborne_clearance: f32,

    // === Timing ===
    /// Simulated seconds per tick
    pub tick_seconds: f32,
    /// Countdown after resuming from pause (seconds)
    pub countdown_seconds: f32,
    /// Day-cycle phase advance per tick (radians)
    pub day_cycle_step: f32,
    /// Windmill rotation per tick (degrees)
    pub windmill_step: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            segment_length: 2.0,
            visible_segments: 40,
            lookahead_segments: 40,
            first_spawn_segment: 5,
            initial_lookahead_segments: 60,
            keep_behind_segments: 2,
            world_seed: 0,

            car_chance_percent: 15,
            coin_chance_percent: 30,

            base_scroll_speed: 0.15,
            max_scroll_speed: 0.45,
            difficulty_factor: 0.000_002_5,

            lane_width: 2.0,
            lane_speed_base: 0.25,
            lane_speed_scale: 0.4,
            gravity: 0.025,
            jump_impulse: 0.35,
            ground_height: 0.5,

            car_hit_distance: 0.8,
            coin_hit_distance: 0.8,
            airborne_clearance: 0.75,

            tick_seconds: 0.016,
            countdown_seconds: 3.0,
            day_cycle_step: 0.0005,
            windmill_step: 2.0,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Check the invariants the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        for (field, value) in [
            ("segment_length", self.segment_length),
            ("base_scroll_speed", self.base_scroll_speed),
            ("tick_seconds", self.tick_seconds),
            ("gravity", self.gravity),
            ("jump_impulse", self.jump_impulse),
            ("lane_width", self.lane_width),
            ("lane_speed_base", self.lane_speed_base),
            ("car_hit_distance", self.car_hit_distance),
            ("coin_hit_distance", self.coin_hit_distance),
        ] {
            if value <= 0.0 || !value.is_finite() {
                return Err(TuningError::NotPositive { field, value });
            }
        }
        for (field, value) in [
            ("lane_speed_scale", self.lane_speed_scale),
            ("difficulty_factor", self.difficulty_factor),
        ] {
            if value < 0.0 || !value.is_finite() {
                return Err(TuningError::NegativeRate { field, value });
            }
        }
        // Grounded players must still hit cars
        if self.airborne_clearance < self.ground_height || !self.airborne_clearance.is_finite() {
            return Err(TuningError::ClearanceBelowGround {
                clearance: self.airborne_clearance,
                ground: self.ground_height,
            });
        }
        if self.base_scroll_speed > self.max_scroll_speed {
            return Err(TuningError::SpeedRange {
                base: self.base_scroll_speed,
                max: self.max_scroll_speed,
            });
        }
        // One tick may cross at most one segment boundary
        if self.max_scroll_speed >= self.segment_length {
            return Err(TuningError::SpeedExceedsSegment {
                max: self.max_scroll_speed,
                segment_length: self.segment_length,
            });
        }
        for (field, value) in [
            ("car_chance_percent", self.car_chance_percent),
            ("coin_chance_percent", self.coin_chance_percent),
        ] {
            if value > 100 {
                return Err(TuningError::Percent { field, value });
            }
        }
        if self.visible_segments <= 0 {
            return Err(TuningError::EmptyWindow);
        }
        // A negative prune window would drop entries ahead of the player
        for (field, value) in [
            ("lookahead_segments", self.lookahead_segments),
            ("first_spawn_segment", self.first_spawn_segment),
            ("initial_lookahead_segments", self.initial_lookahead_segments),
            ("keep_behind_segments", self.keep_behind_segments),
        ] {
            if value < 0 {
                return Err(TuningError::NegativeCount { field, value });
            }
        }
        Ok(())
    }

    /// Scroll speed at a given distance score.
    ///
    /// Non-decreasing in `distance` and never above `max_scroll_speed`.
    pub fn scroll_speed(&self, distance: u64) -> f32 {
        let speed = self.base_scroll_speed + distance as f32 * self.difficulty_factor;
        speed.clamp(self.base_scroll_speed, self.max_scroll_speed)
    }

    /// Lateral easing speed for a given scroll speed
    pub fn lane_speed(&self, scroll_speed: f32) -> f32 {
        self.lane_speed_base + scroll_speed * self.lane_speed_scale
    }

    /// Last segment the rolling generator keeps populated
    pub fn generation_horizon(&self, current_segment: i64) -> i64 {
        current_segment + self.visible_segments + self.lookahead_segments
    }

    /// Last segment populated on reset
    pub fn initial_horizon(&self) -> i64 {
        self.visible_segments + self.initial_lookahead_segments - 1
    }
}
