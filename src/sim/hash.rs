//! Stateless integer hashing for per-segment randomness
//!
//! World content is derived from the segment index alone, so any segment can
//! be regenerated at any time without carrying RNG state around.

/// Salt for the obstacle/pickup hash of a segment
pub const SPAWN_SALT: u32 = 0xA53C_9E11;
/// Salt for the scenery hash of a segment
pub const SCENERY_SALT: u32 = 0x9E37_79B9;

/// Avalanche hash: xor-shift / multiply mixing with wrapping arithmetic
#[inline]
pub const fn hash32(mut x: u32) -> u32 {
    x ^= x >> 16;
    x = x.wrapping_mul(0x7feb_352d);
    x ^= x >> 15;
    x = x.wrapping_mul(0x846c_a68b);
    x ^= x >> 16;
    x
}

/// Hash of a segment index under a salt and world seed.
///
/// Segment indices are truncated to 32 bits, so the world repeats after
/// 2^32 segments.
#[inline]
pub const fn segment_hash(segment: i64, salt: u32, world_seed: u32) -> u32 {
    hash32((segment as u32) ^ salt ^ world_seed)
}
