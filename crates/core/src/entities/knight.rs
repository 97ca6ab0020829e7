use rand_chacha::ChaCha8Rng;

use crate::grid::Grid;
use crate::pathfinding::astar_path;
use crate::rng::shuffle;
use crate::types::{Direction, EntityKind, MAX_ENERGY, Pos};

pub const KNIGHT_REST_THRESHOLD: f64 = 20.0;
pub const KNIGHT_MOVE_COST: f64 = 10.0;
pub const KNIGHT_RECOVERY: f64 = 5.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Knight {
    pub pos: Pos,
    pub energy: f64,
}

impl Knight {
    pub fn new(pos: Pos) -> Self {
        Self { pos, energy: MAX_ENERGY }
    }

    pub fn patrol(&mut self, grid: &mut Grid, rng: &mut ChaCha8Rng) {
        if self.energy <= KNIGHT_REST_THRESHOLD {
            self.return_to_garrison(grid);
        } else {
            self.wander(grid, rng);
        }
    }

    fn wander(&mut self, grid: &mut Grid, rng: &mut ChaCha8Rng) {
        let mut directions = Direction::ALL;
        shuffle(rng, &mut directions);
        for direction in directions {
            let next = grid.step(self.pos, direction);
            if grid.kind_at(next) == EntityKind::Empty {
                grid.relocate(self.pos, next, EntityKind::Knight);
                self.pos = next;
                self.energy = (self.energy - KNIGHT_MOVE_COST).max(0.0);
                return;
            }
        }
    }

    // Knights walk up to a hideout but never onto one; they recover either way.
    fn return_to_garrison(&mut self, grid: &mut Grid) {
        if let Some(garrison) = grid.find_nearest(self.pos, EntityKind::Hideout)
            && let Some(&next) = astar_path(grid, self.pos, garrison).first()
            && grid.kind_at(next) != EntityKind::Hideout
        {
            grid.relocate(self.pos, next, EntityKind::Knight);
            self.pos = next;
        }
        self.energy = (self.energy + KNIGHT_RECOVERY).min(MAX_ENERGY);
    }
}
