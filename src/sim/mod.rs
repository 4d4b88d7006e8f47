//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - World content derived from segment hashes, no RNG state
//! - Stable iteration order (spawn order)
//! - No rendering, storage or platform dependencies

pub mod collision;
pub mod hash;
pub mod mode;
pub mod scenery;
pub mod state;
pub mod tick;
pub mod world;

pub use collision::{CollisionResult, segment_z};
pub use hash::hash32;
pub use mode::{Action, GameMode, Transition};
pub use scenery::{Prop, PropKind, props_for_segment};
pub use state::{GameEvent, GameState, Lane, Player};
pub use tick::{TickInput, apply_action, tick};
pub use world::{Car, Coin, SegmentContents, World, generate_segment};
