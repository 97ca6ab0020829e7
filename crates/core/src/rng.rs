//! Draw helpers over the simulation's seeded ChaCha stream.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::Rng;

/// Uniform index in `0..upper`. `upper` must be positive.
pub fn random_below(rng: &mut ChaCha8Rng, upper: usize) -> usize {
    debug_assert!(upper > 0);
    (rng.next_u64() % upper as u64) as usize
}

/// Uniform integer in the inclusive range `min_value..=max_value`.
pub fn random_in_range(rng: &mut ChaCha8Rng, min_value: i32, max_value: i32) -> i32 {
    debug_assert!(min_value <= max_value);
    let span = (i64::from(max_value) - i64::from(min_value) + 1) as u64;
    (i64::from(min_value) + (rng.next_u64() % span) as i64) as i32
}

/// Uniform float in `[0, 1)` built from the top 53 bits of one draw.
pub fn random_unit(rng: &mut ChaCha8Rng) -> f64 {
    (rng.next_u64() >> 11) as f64 * (1.0 / (1_u64 << 53) as f64)
}

pub fn shuffle<T>(rng: &mut ChaCha8Rng, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = random_below(rng, i + 1);
        items.swap(i, j);
    }
}

/// Index drawn proportionally to `weights`. Falls back to the last index when the
/// draw lands past the accumulated total through rounding.
pub fn weighted_index(rng: &mut ChaCha8Rng, weights: &[f64]) -> usize {
    debug_assert!(!weights.is_empty());
    let total: f64 = weights.iter().sum();
    let mut target = random_unit(rng) * total;
    for (idx, weight) in weights.iter().enumerate() {
        if target < *weight {
            return idx;
        }
        target -= weight;
    }
    weights.len() - 1
}
