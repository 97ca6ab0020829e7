use serde::{Deserialize, Serialize};

use crate::types::{Pos, TreasureKind};

pub const TREASURE_START_VALUE: f64 = 100.0;
pub const TREASURE_DECAY: f64 = 0.1;

// Value is kept in whole decay steps so a fresh treasure expires on exactly the
// thousandth decay instead of drifting on accumulated float error.
const STEPS_PER_UNIT: f64 = 1.0 / TREASURE_DECAY;
const START_STEPS: u32 = (TREASURE_START_VALUE * STEPS_PER_UNIT) as u32;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Treasure {
    pub pos: Pos,
    pub kind: TreasureKind,
    steps_left: u32,
}

impl Treasure {
    pub fn new(pos: Pos, kind: TreasureKind) -> Self {
        Self { pos, kind, steps_left: START_STEPS }
    }

    /// Same treasure with its base value set, rounded to the nearest decay step.
    pub fn with_value(self, value: f64) -> Self {
        let steps = (value.max(0.0) * STEPS_PER_UNIT).round() as u32;
        Self { steps_left: steps, ..self }
    }

    pub fn value(&self) -> f64 {
        f64::from(self.steps_left) / STEPS_PER_UNIT
    }

    pub fn effective_value(&self) -> f64 {
        self.value() * self.kind.multiplier()
    }

    /// Loses one decay step. Returns whether any value is left.
    pub fn decay(&mut self) -> bool {
        self.steps_left = self.steps_left.saturating_sub(1);
        self.steps_left > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_treasure_expires_on_the_thousandth_decay() {
        let mut treasure = Treasure::new(Pos::new(0, 0), TreasureKind::Bronze);
        assert_eq!(treasure.value(), TREASURE_START_VALUE);
        let mut previous = treasure.value();
        for call in 1..1000 {
            assert!(treasure.decay(), "treasure died early on decay {call}");
            assert!(treasure.value() < previous);
            previous = treasure.value();
        }
        assert!(!treasure.decay());
        assert_eq!(treasure.value(), 0.0);
    }

    #[test]
    fn each_decay_removes_one_decay_unit() {
        let mut treasure = Treasure::new(Pos::new(0, 0), TreasureKind::Silver);
        assert_eq!(START_STEPS, 1000);
        treasure.decay();
        assert!((treasure.value() - (TREASURE_START_VALUE - TREASURE_DECAY)).abs() < 1e-9);
    }

    #[test]
    fn effective_value_applies_kind_multiplier() {
        let gold = Treasure::new(Pos::new(1, 1), TreasureKind::Gold).with_value(50.0);
        assert!((gold.effective_value() - 6.5).abs() < 1e-9);
        let silver = Treasure::new(Pos::new(1, 1), TreasureKind::Silver);
        assert!((silver.effective_value() - 7.0).abs() < 1e-9);
    }
}
