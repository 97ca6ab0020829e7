//! Stable snapshot hashing for deterministic verification.
//! Covers everything `step()` reads or writes; the event log is left out.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;

impl Simulation {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u64(self.tick);
        hasher.write_u64(self.score.to_bits());
        hasher.write_u8(u8::from(self.game_over));
        for (_, cell) in self.grid.cells() {
            hasher.write_u8(cell.kind() as u8);
        }
        for hunter in self.hunters.values() {
            write_pos(&mut hasher, hunter.pos);
            hasher.write_u8(hunter.skill as u8);
            hasher.write_u64(hunter.stamina.to_bits());
            hasher.write_i32(hunter.survival_timer);
            match &hunter.carried {
                Some(treasure) => {
                    hasher.write_u8(1 + treasure.kind as u8);
                    hasher.write_u64(treasure.value().to_bits());
                }
                None => hasher.write_u8(0),
            }
        }
        for knight in &self.knights {
            write_pos(&mut hasher, knight.pos);
            hasher.write_u64(knight.energy.to_bits());
        }
        for treasure in &self.treasures {
            write_pos(&mut hasher, treasure.pos);
            hasher.write_u8(treasure.kind as u8);
            hasher.write_u64(treasure.value().to_bits());
        }
        for hideout in &self.hideouts {
            write_pos(&mut hasher, hideout.pos);
            hasher.write_u64(hideout.stored_treasure.to_bits());
            hasher.write_usize(hideout.roster().len());
        }
        hasher.finish()
    }
}

fn write_pos(hasher: &mut Xxh3, pos: Pos) {
    hasher.write_i32(pos.x);
    hasher.write_i32(pos.y);
}
