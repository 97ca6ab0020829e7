//! World-generation constants, loadable from JSON.

use serde::{Deserialize, Serialize};

use crate::entities::HIDEOUT_CAPACITY;
use crate::types::SimError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub size: usize,
    pub hideouts: usize,
    pub hunters_per_hideout: usize,
    pub spawn_radius: i32,
    pub knights: usize,
    pub treasures: usize,
    /// Bronze, silver, gold.
    pub treasure_weights: [f64; 3],
    pub kmeans_max_iterations: u32,
    pub empty_cell_attempts: u32,
    pub near_cell_attempts: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            size: 20,
            hideouts: 3,
            hunters_per_hideout: 2,
            spawn_radius: 3,
            knights: 5,
            treasures: 20,
            treasure_weights: [0.5, 0.3, 0.2],
            kmeans_max_iterations: 100,
            empty_cell_attempts: 100,
            near_cell_attempts: 50,
        }
    }
}

impl SimConfig {
    pub fn with_size(size: usize) -> Self {
        Self { size, ..Self::default() }
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if self.size == 0 {
            return Err(SimError::InvalidConfig("grid size must be positive".to_string()));
        }
        if self.size > 4096 {
            return Err(SimError::InvalidConfig(format!("grid size {} is too large", self.size)));
        }
        if self.hideouts == 0 {
            return Err(SimError::InvalidConfig("at least one hideout is required".to_string()));
        }
        if self.hideouts > self.size * self.size {
            return Err(SimError::InvalidConfig(format!(
                "{} hideouts do not fit on a {}x{} grid",
                self.hideouts, self.size, self.size
            )));
        }
        if self.hunters_per_hideout > HIDEOUT_CAPACITY {
            return Err(SimError::InvalidConfig(format!(
                "{} hunters per hideout exceed the roster capacity of {HIDEOUT_CAPACITY}",
                self.hunters_per_hideout
            )));
        }
        if self.spawn_radius < 0 {
            return Err(SimError::InvalidConfig("spawn radius must not be negative".to_string()));
        }
        if self.treasure_weights.iter().any(|w| !w.is_finite() || *w < 0.0)
            || self.treasure_weights.iter().sum::<f64>() <= 0.0
        {
            return Err(SimError::InvalidConfig(
                "treasure weights must be non-negative with a positive total".to_string(),
            ));
        }
        Ok(())
    }
}
