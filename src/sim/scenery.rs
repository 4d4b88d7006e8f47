//! Roadside decoration
//!
//! Props are derived from the segment index on demand and never stored.
//! They do not collide with anything.

use serde::{Deserialize, Serialize};

use super::hash::{SCENERY_SALT, segment_hash};

/// Half width of the paved road
pub const ROAD_HALF_WIDTH: f32 = 3.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropKind {
    Tree,
    Windmill,
    House,
    /// Waving bystander
    Character,
}

/// A prop at a lateral position next to the road
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prop {
    pub kind: PropKind,
    pub x: f32,
}

/// Props standing beside `segment`
pub fn props_for_segment(segment: i64, world_seed: u32) -> Vec<Prop> {
    let h = segment_hash(segment, SCENERY_SALT, world_seed);
    let mut props = Vec::new();
    let mut place = |kind, x| props.push(Prop { kind, x });

    if h % 10 > 6 {
        place(PropKind::Tree, ROAD_HALF_WIDTH + 3.0 + (h % 5) as f32);
    }
    if (h >> 4) % 10 > 7 {
        place(PropKind::Tree, -(ROAD_HALF_WIDTH + 3.0 + ((h >> 8) % 5) as f32));
    }

    // Landmarks repeat on fixed strides
    if segment % 25 == 0 {
        place(PropKind::Windmill, ROAD_HALF_WIDTH + 9.0);
    }
    if segment % 17 == 0 {
        place(PropKind::House, -(ROAD_HALF_WIDTH + 12.0));
    }
    if segment % 23 == 0 {
        place(PropKind::House, ROAD_HALF_WIDTH + 12.0);
    }
    if segment % 11 == 0 {
        place(PropKind::Character, -(ROAD_HALF_WIDTH + 6.0));
    }
    if segment % 13 == 0 {
        place(PropKind::Character, ROAD_HALF_WIDTH + 6.0);
    }

    props
}
