use std::collections::BTreeMap;

use crate::entities::Treasure;
use crate::grid::Grid;
use crate::pathfinding::astar_path;
use crate::policy::DecisionPolicy;
use crate::types::{Action, EntityKind, HunterId, MAX_STAMINA, Pos, Skill};

/// Ticks a hunter may spend at zero stamina before it is lost.
pub const SURVIVAL_TICKS: i32 = 3;

#[derive(Clone, Debug, PartialEq)]
pub struct Hunter {
    pub id: HunterId,
    pub pos: Pos,
    pub skill: Skill,
    pub stamina: f64,
    pub carried: Option<Treasure>,
    /// Last observed effective value per treasure cell.
    pub memory: BTreeMap<Pos, f64>,
    pub survival_timer: i32,
}

impl Hunter {
    pub fn new(id: HunterId, pos: Pos, skill: Skill) -> Self {
        Self {
            id,
            pos,
            skill,
            stamina: MAX_STAMINA,
            carried: None,
            memory: BTreeMap::new(),
            survival_timer: SURVIVAL_TICKS,
        }
    }

    pub fn is_carrying(&self) -> bool {
        self.carried.is_some()
    }

    /// Refreshes memory from the four neighboring cells, then asks the policy what to
    /// do about the nearest treasure. With no treasure left on the grid the hunter rests.
    pub fn decide_action(
        &mut self,
        grid: &Grid,
        treasures: &[Treasure],
        policy: &dyn DecisionPolicy,
        nearest_knight: Option<Pos>,
    ) -> Action {
        for (pos, kind) in grid.get_adjacent(self.pos) {
            if kind != EntityKind::Treasure {
                continue;
            }
            if let Some(treasure) = treasures.iter().find(|treasure| treasure.pos == pos) {
                self.memory.insert(pos, treasure.effective_value());
            }
        }

        let Some(nearest_treasure) = grid.find_nearest(self.pos, EntityKind::Treasure) else {
            return Action::Rest;
        };
        let knight_distance =
            nearest_knight.map_or(f64::INFINITY, |knight| grid.distance(self.pos, knight));
        let remembered = self.memory.get(&nearest_treasure).copied().unwrap_or(0.0);

        let code = policy.predict(self.stamina, remembered, knight_distance);
        Action::from_code(code).unwrap_or(Action::Rest)
    }

    /// Takes the first step of a shortest route to `target`. The step must land on an
    /// empty or treasure cell, or on the target itself when the target is a hideout.
    pub fn move_toward(&mut self, grid: &mut Grid, target: Option<Pos>) -> bool {
        let Some(target) = target else {
            return false;
        };
        let Some(&next) = astar_path(grid, self.pos, target).first() else {
            return false;
        };
        let enterable = match grid.kind_at(next) {
            EntityKind::Empty | EntityKind::Treasure => true,
            EntityKind::Hideout => next == target,
            EntityKind::Hunter | EntityKind::Knight => false,
        };
        if !enterable {
            return false;
        }
        grid.relocate(self.pos, next, EntityKind::Hunter);
        self.pos = next;
        true
    }
}
