//! The simulation owns the grid and every entity collection and is the only thing
//! that mutates them. `step()` advances one tick; see `step.rs` for the phase order.

mod hash;
mod step;

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use slotmap::SlotMap;

use crate::config::SimConfig;
use crate::entities::{Hideout, Hunter, Knight, Treasure};
use crate::grid::Grid;
use crate::policy::{DecisionPolicy, DecisionTree};
use crate::rng::{random_below, shuffle, weighted_index};
use crate::types::*;
use crate::worldgen::{find_empty_cell, find_empty_cell_near, kmeans_centers};

pub struct Simulation {
    config: SimConfig,
    seed: u64,
    tick: u64,
    rng: ChaCha8Rng,
    grid: Grid,
    hunters: SlotMap<HunterId, Hunter>,
    knights: Vec<Knight>,
    treasures: Vec<Treasure>,
    hideouts: Vec<Hideout>,
    policy: Box<dyn DecisionPolicy>,
    score: f64,
    game_over: bool,
    log: Vec<SimEvent>,
}

impl Simulation {
    /// Generates a default world on a `size`×`size` grid. `size` must be positive.
    pub fn new(size: usize, seed: u64) -> Self {
        let mut sim = Self::blank(SimConfig::with_size(size), seed);
        sim.populate();
        sim
    }

    pub fn with_config(config: &SimConfig, seed: u64) -> Result<Self, SimError> {
        config.validate()?;
        let mut sim = Self::blank(config.clone(), seed);
        sim.populate();
        Ok(sim)
    }

    /// A world with no entities, for hand-built scenarios.
    pub fn empty(size: usize, seed: u64) -> Self {
        Self::blank(SimConfig::with_size(size), seed)
    }

    fn blank(config: SimConfig, seed: u64) -> Self {
        Self {
            grid: Grid::new(config.size),
            config,
            seed,
            tick: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
            hunters: SlotMap::with_key(),
            knights: Vec::new(),
            treasures: Vec::new(),
            hideouts: Vec::new(),
            policy: Box::new(DecisionTree::default()),
            score: 0.0,
            game_over: false,
            log: Vec::new(),
        }
    }

    fn populate(&mut self) {
        let config = self.config.clone();
        let iterations = config.kmeans_max_iterations;
        let centers = kmeans_centers(config.size, config.hideouts, &mut self.rng, iterations);
        for center in centers {
            let pos = if self.grid.kind_at(center) == EntityKind::Empty {
                Some(center)
            } else {
                self.grid.find_nearest(center, EntityKind::Empty)
            };
            if let Some(pos) = pos {
                self.spawn_hideout(pos);
            }
        }

        for idx in 0..self.hideouts.len() {
            let home = self.hideouts[idx].pos;
            let mut skills = Skill::ALL;
            shuffle(&mut self.rng, &mut skills);
            for n in 0..config.hunters_per_hideout {
                let spot = find_empty_cell_near(
                    &self.grid,
                    &mut self.rng,
                    home,
                    config.spawn_radius,
                    config.near_cell_attempts,
                );
                if let Some(pos) = spot {
                    let skill = skills[n % skills.len()];
                    let id = self.spawn_hunter(pos, skill);
                    self.hideouts[idx].add_hunter(id, skill);
                }
            }
        }

        let attempts = config.empty_cell_attempts;
        for _ in 0..config.knights {
            if let Some(pos) = find_empty_cell(&self.grid, &mut self.rng, attempts) {
                self.spawn_knight(pos);
            }
        }

        for _ in 0..config.treasures {
            if let Some(pos) = find_empty_cell(&self.grid, &mut self.rng, attempts) {
                let kind = weighted_index(&mut self.rng, &config.treasure_weights);
                self.spawn_treasure(Treasure::new(pos, TreasureKind::ALL[kind]));
            }
        }
    }

    pub fn spawn_hideout(&mut self, pos: Pos) -> usize {
        let pos = self.grid.wrap(pos.x, pos.y);
        self.grid.place(pos, EntityKind::Hideout);
        self.hideouts.push(Hideout::new(pos));
        self.hideouts.len() - 1
    }

    pub fn spawn_hunter(&mut self, pos: Pos, skill: Skill) -> HunterId {
        let pos = self.grid.wrap(pos.x, pos.y);
        self.grid.place(pos, EntityKind::Hunter);
        self.hunters.insert_with_key(|id| Hunter::new(id, pos, skill))
    }

    pub fn spawn_knight(&mut self, pos: Pos) -> usize {
        let pos = self.grid.wrap(pos.x, pos.y);
        self.grid.place(pos, EntityKind::Knight);
        self.knights.push(Knight::new(pos));
        self.knights.len() - 1
    }

    pub fn spawn_treasure(&mut self, mut treasure: Treasure) {
        treasure.pos = self.grid.wrap(treasure.pos.x, treasure.pos.y);
        self.grid.place(treasure.pos, EntityKind::Treasure);
        self.treasures.push(treasure);
    }

    pub fn set_policy(&mut self, policy: Box<dyn DecisionPolicy>) {
        self.policy = policy;
    }

    /// Moves one hunter a single cell before the next `step()`. Hideouts may be
    /// entered; cells holding a knight or a hunter outside a hideout may not.
    pub fn apply_manual_move(
        &mut self,
        id: HunterId,
        direction: Direction,
    ) -> Result<(), SimError> {
        if self.game_over {
            return Err(SimError::GameOver);
        }
        let Some(hunter) = self.hunters.get_mut(id) else {
            return Err(SimError::UnknownHunter);
        };
        let next = self.grid.step(hunter.pos, direction);
        let cell = self.grid.cell(next);
        if cell.contains(EntityKind::Knight)
            || (cell.contains(EntityKind::Hunter) && !cell.contains(EntityKind::Hideout))
        {
            return Err(SimError::MoveBlocked { pos: next });
        }
        self.grid.relocate(hunter.pos, next, EntityKind::Hunter);
        hunter.pos = next;
        self.log.push(SimEvent::ManualMove { tick: self.tick, hunter: id, to: next });
        Ok(())
    }

    /// World growth: every hideout that passes its recruitment roll gains a new
    /// hunter nearby. Never called by `step()`.
    pub fn recruit(&mut self) -> Vec<HunterId> {
        let mut recruited = Vec::new();
        if self.game_over {
            return recruited;
        }
        for idx in 0..self.hideouts.len() {
            if !self.hideouts[idx].try_recruit(&mut self.rng) {
                continue;
            }
            let Some(pos) = find_empty_cell_near(
                &self.grid,
                &mut self.rng,
                self.hideouts[idx].pos,
                self.config.spawn_radius,
                self.config.near_cell_attempts,
            ) else {
                continue;
            };
            let skill = Skill::ALL[random_below(&mut self.rng, Skill::ALL.len())];
            let id = self.spawn_hunter(pos, skill);
            self.hideouts[idx].add_hunter(id, skill);
            let tick = self.tick;
            self.log.push(SimEvent::HunterRecruited { tick, hunter: id, hideout: idx });
            recruited.push(id);
        }
        recruited
    }

    /// Rebuilds occupancy from the entity collections and compares it with the grid.
    pub fn grid_is_consistent(&self) -> bool {
        let mut expected = Grid::new(self.grid.size());
        for hideout in &self.hideouts {
            expected.place(hideout.pos, EntityKind::Hideout);
        }
        for hunter in self.hunters.values() {
            expected.place(hunter.pos, EntityKind::Hunter);
        }
        for knight in &self.knights {
            expected.place(knight.pos, EntityKind::Knight);
        }
        for treasure in &self.treasures {
            expected.place(treasure.pos, EntityKind::Treasure);
        }
        expected == self.grid
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn hunters(&self) -> impl Iterator<Item = &Hunter> {
        self.hunters.values()
    }

    pub fn hunter_ids(&self) -> Vec<HunterId> {
        self.hunters.keys().collect()
    }

    pub fn hunter(&self, id: HunterId) -> Option<&Hunter> {
        self.hunters.get(id)
    }

    pub fn knights(&self) -> &[Knight] {
        &self.knights
    }

    pub fn treasures(&self) -> &[Treasure] {
        &self.treasures
    }

    pub fn hideouts(&self) -> &[Hideout] {
        &self.hideouts
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn log(&self) -> &[SimEvent] {
        &self.log
    }
}

#[cfg(test)]
mod test_support;
