//! Spawn-value policy
//!
//! After a successful move the driver asks the policy which value to spawn. Below the
//! score threshold every spawn is the base value. Above it, the chance of the special
//! value grows by a fixed rate for every *whole* score interval past the threshold
//! (integer division, so the chance is a step function), capped at a maximum.

use rand::Rng;

use crate::types::{
    Tile, CHANCE_INCREASE_RATE, CHANCE_SCORE_INTERVAL, INITIAL_TILE_VALUE,
    MAX_SPECIAL_TILE_CHANCE, SCORE_THRESHOLD_FOR_SPECIAL_TILES, SPECIAL_TILE_VALUE,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPolicy {
    pub base_value: Tile,
    pub special_value: Tile,
    pub threshold: u64,
    pub interval: u64,
    pub rate: f64,
    pub max_chance: f64,
}

impl Default for SpawnPolicy {
    fn default() -> Self {
        Self {
            base_value: INITIAL_TILE_VALUE,
            special_value: SPECIAL_TILE_VALUE,
            threshold: SCORE_THRESHOLD_FOR_SPECIAL_TILES,
            interval: CHANCE_SCORE_INTERVAL,
            rate: CHANCE_INCREASE_RATE,
            max_chance: MAX_SPECIAL_TILE_CHANCE,
        }
    }
}

impl SpawnPolicy {
    /// Probability of spawning the special value at `score`.
    pub fn special_chance(&self, score: u64) -> f64 {
        if score < self.threshold || self.interval == 0 {
            return 0.0;
        }
        let steps = (score - self.threshold) / self.interval;
        (steps as f64 * self.rate).min(self.max_chance)
    }

    pub fn choose_value<R: Rng + ?Sized>(&self, score: u64, rng: &mut R) -> Tile {
        let chance = self.special_chance(score);
        if chance > 0.0 && rng.gen::<f64>() < chance {
            self.special_value
        } else {
            self.base_value
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn chance_is_zero_below_threshold() {
        let policy = SpawnPolicy::default();
        assert_eq!(policy.special_chance(0), 0.0);
        assert_eq!(policy.special_chance(1999), 0.0);
    }

    #[test]
    fn chance_steps_per_whole_interval() {
        let policy = SpawnPolicy::default();
        // First interval past the threshold still floors to zero steps.
        assert_eq!(policy.special_chance(2000), 0.0);
        assert_eq!(policy.special_chance(3999), 0.0);
        assert!((policy.special_chance(4000) - 0.05).abs() < 1e-12);
        assert!((policy.special_chance(5999) - 0.05).abs() < 1e-12);
        assert!((policy.special_chance(6000) - 0.10).abs() < 1e-12);
    }

    #[test]
    fn chance_is_capped() {
        let policy = SpawnPolicy::default();
        assert_eq!(policy.special_chance(1_000_000), 0.5);
    }

    #[test]
    fn low_scores_always_spawn_base_value() {
        let policy = SpawnPolicy::default();
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..200 {
            assert_eq!(policy.choose_value(100, &mut rng), 2);
        }
    }

    #[test]
    fn capped_chance_spawns_both_values() {
        let policy = SpawnPolicy::default();
        let mut rng = SmallRng::seed_from_u64(11);
        let values: Vec<Tile> = (0..500)
            .map(|_| policy.choose_value(1_000_000, &mut rng))
            .collect();
        assert!(values.contains(&2));
        assert!(values.contains(&4));
    }
}
