//! Collision and scoring against the scrolling road
//!
//! Cars and coins live on discrete segments while the player moves
//! continuously. A segment's centre sits at `segment_z` and the player's
//! reference point at `-scroll_offset`; a hit is a same-lane overlap within a
//! tolerance band along Z.

use super::state::{GameEvent, GameState, Lane};

/// Result of one collision pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionResult {
    /// First car hit this tick, if any
    pub crash: Option<(i64, Lane)>,
    /// Coins collected this tick
    pub coins_collected: u32,
}

/// Z of a segment's centre relative to the current segment
#[inline]
pub fn segment_z(segment: i64, current_segment: i64, segment_length: f32) -> f32 {
    -((segment - current_segment) as f32 * segment_length + segment_length * 0.5)
}

/// Whether an entry on `segment` overlaps the player's reference point
#[inline]
pub fn overlaps_player(
    segment: i64,
    current_segment: i64,
    scroll_offset: f32,
    segment_length: f32,
    tolerance: f32,
) -> bool {
    (segment_z(segment, current_segment, segment_length) - (-scroll_offset)).abs() < tolerance
}

/// Scan cars and coins against the player.
///
/// A car in the player's lane within `car_hit_distance` crashes the run
/// unless the player is above `airborne_clearance`. Coins are collected
/// once; later passes skip them.
pub fn resolve(state: &mut GameState) -> CollisionResult {
    let t = &state.tuning;
    let lane = state.player.lane;
    let grounded = state.player.y <= t.airborne_clearance;
    let mut result = CollisionResult::default();

    if grounded {
        result.crash = state
            .world
            .cars()
            .iter()
            .find(|car| {
                car.lane == lane
                    && overlaps_player(
                        car.segment,
                        state.segment,
                        state.scroll_offset,
                        t.segment_length,
                        t.car_hit_distance,
                    )
            })
            .map(|car| (car.segment, car.lane));
    }

    let (segment, offset, length, reach) = (
        state.segment,
        state.scroll_offset,
        t.segment_length,
        t.coin_hit_distance,
    );
    for coin in state.world.coins_mut() {
        if !coin.collected
            && coin.lane == lane
            && overlaps_player(coin.segment, segment, offset, length, reach)
        {
            coin.collected = true;
            state.coin_score += 1;
            result.coins_collected += 1;
            state.events.push(GameEvent::CoinCollected {
                segment: coin.segment,
                lane: coin.lane,
            });
        }
    }

    if let Some((segment, lane)) = result.crash {
        state.events.push(GameEvent::Crashed { segment, lane });
    }

    result
}
