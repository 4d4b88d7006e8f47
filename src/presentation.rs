//! Read-only per-frame view of the game
//!
//! Presentation never touches [`GameState`]; it receives a [`Snapshot`]
//! with everything positioned in world space. World space: X to the right,
//! Y up, the player at Z = 0 and the road stretching toward -Z.

use glam::Vec3;
use serde::Serialize;

use crate::sim::scenery::{Prop, props_for_segment};
use crate::sim::{GameMode, GameState, Lane, segment_z};

/// Z range that gets drawn
pub const RENDER_NEAR_Z: f32 = 10.0;
pub const RENDER_FAR_Z: f32 = -160.0;

/// Car body centre above the road
const CAR_HEIGHT: f32 = 0.35;
/// Coin centre above the road
const COIN_HEIGHT: f32 = 0.9;

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub lane: Lane,
    pub position: Vec3,
    pub jumping: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CarView {
    pub segment: i64,
    pub lane: Lane,
    pub position: Vec3,
}

#[derive(Debug, Clone, Serialize)]
pub struct CoinView {
    pub segment: i64,
    pub lane: Lane,
    pub position: Vec3,
    pub collected: bool,
}

/// Props beside one visible segment
#[derive(Debug, Clone, Serialize)]
pub struct SceneryView {
    pub segment: i64,
    pub z: f32,
    pub props: Vec<Prop>,
}

/// Vertical sky gradient
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sky {
    pub top: Vec3,
    pub bottom: Vec3,
}

impl Sky {
    /// Colours for a day-cycle phase: brightest at phase π/2
    pub fn at_phase(phase: f32) -> Self {
        let t = (phase.sin() + 1.0) * 0.5;
        Self {
            top: Vec3::new(0.05, 0.2, 0.4) + Vec3::new(0.3, 0.4, 0.4) * t,
            bottom: Vec3::new(0.0, 0.1, 0.2) + Vec3::new(0.2, 0.3, 0.6) * t,
        }
    }
}

/// Centered overlay text for the current mode
#[derive(Debug, Clone, Serialize)]
pub struct Overlay {
    pub title: String,
    pub lines: Vec<String>,
}

impl Overlay {
    fn for_state(state: &GameState) -> Option<Self> {
        let (title, lines) = match state.mode {
            GameMode::Menu => (
                "STREET RUNNER",
                vec![
                    "Press ENTER to Start Game".to_string(),
                    "Controls: A/D move, SPACE jump, ESC pause".to_string(),
                ],
            ),
            GameMode::Paused => ("PAUSED", vec!["Press ESC to Resume".to_string()]),
            GameMode::Countdown => (
                "GET READY",
                vec![countdown_display(state.countdown).to_string()],
            ),
            GameMode::GameOver => ("GAME OVER", vec!["Press R to Restart".to_string()]),
            GameMode::Playing => return None,
        };
        Some(Self {
            title: title.to_string(),
            lines,
        })
    }
}

/// Whole seconds shown during the countdown
pub fn countdown_display(countdown: f32) -> u32 {
    countdown.max(0.0).ceil() as u32
}

/// Everything presentation needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub mode: GameMode,
    pub player: PlayerView,
    pub segment: i64,
    pub scroll_offset: f32,
    pub cars: Vec<CarView>,
    pub coins: Vec<CoinView>,
    pub scenery: Vec<SceneryView>,
    pub distance: u64,
    pub coin_score: u64,
    pub high_score: u64,
    pub day_phase: f32,
    pub sky: Sky,
    pub windmill_angle: f32,
    pub countdown: u32,
    pub overlay: Option<Overlay>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let t = &state.tuning;
        let offset = state.scroll_offset;
        // Road-space Z shifted by the scroll so the player sits at 0
        let world_z = |segment: i64| segment_z(segment, state.segment, t.segment_length) + offset;
        let visible = |segment: i64| {
            let z = world_z(segment);
            z > RENDER_FAR_Z && z < RENDER_NEAR_Z
        };

        let in_run = state.mode.in_run();

        let cars = if in_run {
            state
                .world
                .cars()
                .iter()
                .filter(|c| visible(c.segment))
                .map(|c| CarView {
                    segment: c.segment,
                    lane: c.lane,
                    position: Vec3::new(c.lane.x(t.lane_width), CAR_HEIGHT, world_z(c.segment)),
                })
                .collect()
        } else {
            Vec::new()
        };

        let coins = if in_run {
            state
                .world
                .coins()
                .iter()
                .filter(|c| visible(c.segment))
                .map(|c| CoinView {
                    segment: c.segment,
                    lane: c.lane,
                    position: Vec3::new(c.lane.x(t.lane_width), COIN_HEIGHT, world_z(c.segment)),
                    collected: c.collected,
                })
                .collect()
        } else {
            Vec::new()
        };

        let scenery = if in_run {
            (-1..t.visible_segments)
                .map(|i| {
                    let segment = state.segment + i;
                    SceneryView {
                        segment,
                        z: world_z(segment),
                        props: props_for_segment(segment, t.world_seed),
                    }
                })
                .filter(|s| !s.props.is_empty())
                .collect()
        } else {
            Vec::new()
        };

        Self {
            mode: state.mode,
            player: PlayerView {
                lane: state.player.lane,
                position: Vec3::new(state.player.x, state.player.y, 0.0),
                jumping: state.player.jumping,
            },
            segment: state.segment,
            scroll_offset: offset,
            cars,
            coins,
            scenery,
            distance: state.distance,
            coin_score: state.coin_score,
            high_score: state.high_score.best(),
            day_phase: state.day_phase,
            sky: Sky::at_phase(state.day_phase),
            windmill_angle: state.windmill_angle,
            countdown: countdown_display(state.countdown),
            overlay: Overlay::for_state(state),
        }
    }

    /// Score lines drawn in the corner during a run
    pub fn hud_lines(&self) -> [String; 3] {
        [
            format!("Distance: {}", self.distance),
            format!("Coins: {}", self.coin_score),
            format!("High Score: {}", self.high_score),
        ]
    }
}

/// Something that draws snapshots
pub trait Presenter {
    fn present(&mut self, snapshot: &Snapshot);
}

/// Writes the HUD through `log` every `interval` frames and on mode changes
pub struct LogPresenter {
    interval: u64,
    frames: u64,
    last_mode: Option<GameMode>,
}

impl LogPresenter {
    pub fn new(interval: u64) -> Self {
        Self {
            interval: interval.max(1),
            frames: 0,
            last_mode: None,
        }
    }
}

impl Presenter for LogPresenter {
    fn present(&mut self, snapshot: &Snapshot) {
        let mode_changed = self.last_mode != Some(snapshot.mode);
        self.last_mode = Some(snapshot.mode);

        if mode_changed {
            if let Some(overlay) = &snapshot.overlay {
                log::info!("{} | {}", overlay.title, overlay.lines.join(" | "));
            }
        }
        if snapshot.mode.in_run() && (mode_changed || self.frames.is_multiple_of(self.interval)) {
            log::info!(
                "{} | segment {} | {} cars, {} coins ahead",
                snapshot.hud_lines().join(" | "),
                snapshot.segment,
                snapshot.cars.len(),
                snapshot.coins.iter().filter(|c| !c.collected).count()
            );
        }
        self.frames += 1;
    }
}
