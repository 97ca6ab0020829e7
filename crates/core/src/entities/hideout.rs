use std::collections::BTreeSet;

use rand_chacha::ChaCha8Rng;

use crate::rng::random_unit;
use crate::types::{HunterId, Pos, Skill};

pub const HIDEOUT_CAPACITY: usize = 5;

const RECRUIT_CHANCE: f64 = 0.2;
const RECRUIT_MIN_ROSTER: usize = 3;
const RECRUIT_MIN_SKILLS: usize = 2;

#[derive(Clone, Debug, PartialEq)]
pub struct Hideout {
    pub pos: Pos,
    pub capacity: usize,
    pub stored_treasure: f64,
    roster: Vec<(HunterId, Skill)>,
}

impl Hideout {
    pub fn new(pos: Pos) -> Self {
        Self { pos, capacity: HIDEOUT_CAPACITY, stored_treasure: 0.0, roster: Vec::new() }
    }

    pub fn roster(&self) -> &[(HunterId, Skill)] {
        &self.roster
    }

    pub fn add_hunter(&mut self, hunter: HunterId, skill: Skill) -> bool {
        if self.roster.len() >= self.capacity {
            return false;
        }
        self.roster.push((hunter, skill));
        true
    }

    pub fn remove_hunter(&mut self, hunter: HunterId) -> bool {
        let before = self.roster.len();
        self.roster.retain(|(id, _)| *id != hunter);
        self.roster.len() < before
    }

    pub fn store_treasure(&mut self, value: f64) {
        self.stored_treasure += value;
    }

    /// Rolls for a new recruit. Only rosters of three or more with room left and
    /// at least two different skills can succeed.
    pub fn try_recruit(&self, rng: &mut ChaCha8Rng) -> bool {
        if !(RECRUIT_MIN_ROSTER..self.capacity).contains(&self.roster.len()) {
            return false;
        }
        let roll = random_unit(rng) < RECRUIT_CHANCE;
        let skills: BTreeSet<u8> = self.roster.iter().map(|(_, skill)| *skill as u8).collect();
        roll && skills.len() >= RECRUIT_MIN_SKILLS
    }
}
