//! One tick, resolved in a fixed order:
//! treasure decay, then each hunter (survival, stamina, pickup, deposit, knight
//! encounter, decision and move), then knight patrols, then the game-over check.

use super::*;
use crate::entities::SURVIVAL_TICKS;

/// Stamina lost when a knight catches a hunter.
const KNIGHT_STRIKE: f64 = 20.0;
const HIDEOUT_RECOVERY: f64 = 1.0;

impl Simulation {
    /// Advances one tick. Does nothing once the game is over.
    pub fn step(&mut self) {
        if self.game_over {
            return;
        }
        self.decay_treasures();
        let roster: Vec<HunterId> = self.hunters.keys().collect();
        for id in roster {
            self.update_hunter(id);
        }
        self.patrol_knights();
        self.check_game_over();
        self.tick += 1;
    }

    fn decay_treasures(&mut self) {
        let mut expired = Vec::new();
        self.treasures.retain_mut(|treasure| {
            let alive = treasure.decay();
            if !alive {
                expired.push(treasure.pos);
            }
            alive
        });
        for pos in expired {
            self.grid.vacate(pos, EntityKind::Treasure);
            self.log.push(SimEvent::TreasureExpired { tick: self.tick, pos });
        }
    }

    fn update_hunter(&mut self, id: HunterId) {
        let tick = self.tick;
        let Some(hunter) = self.hunters.get_mut(id) else {
            return;
        };

        if hunter.stamina <= 0.0 {
            hunter.survival_timer -= 1;
            if hunter.survival_timer <= 0 {
                self.remove_hunter(id);
                return;
            }
        }
        let had_stamina = hunter.stamina > 0.0;
        let pos = hunter.pos;

        let in_hideout = self.hideouts.iter().any(|hideout| hideout.pos == pos);
        if in_hideout {
            hunter.stamina = (hunter.stamina + HIDEOUT_RECOVERY).min(MAX_STAMINA);
        } else {
            hunter.stamina = (hunter.stamina - hunter.skill.stamina_cost()).max(0.0);
        }
        // The countdown only runs across consecutive ticks spent at zero.
        if hunter.stamina > 0.0 {
            hunter.survival_timer = SURVIVAL_TICKS;
        }

        if !hunter.is_carrying()
            && let Some(idx) = self.treasures.iter().position(|treasure| treasure.pos == pos)
        {
            let treasure = self.treasures.remove(idx);
            self.grid.vacate(pos, EntityKind::Treasure);
            self.log.push(SimEvent::TreasureCollected { tick, hunter: id, kind: treasure.kind });
            hunter.carried = Some(treasure);
        }

        if let Some(hideout) = self.hideouts.iter().position(|hideout| hideout.pos == pos)
            && let Some(treasure) = hunter.carried.take()
        {
            let value = treasure.effective_value();
            self.score += value;
            self.hideouts[hideout].store_treasure(value);
            self.log.push(SimEvent::TreasureDeposited { tick, hunter: id, hideout, value });
        }

        // Only the first knight on the cell counts.
        if let Some(knight) = self.knights.iter().position(|knight| knight.pos == pos) {
            if let Some(mut dropped) = hunter.carried.take() {
                dropped.pos = pos;
                self.grid.place(pos, EntityKind::Treasure);
                self.treasures.push(dropped);
                self.log.push(SimEvent::TreasureDropped { tick, hunter: id, pos });
            }
            hunter.stamina = (hunter.stamina - KNIGHT_STRIKE).max(0.0);
            self.log.push(SimEvent::KnightEncounter { tick, hunter: id, knight });
            if hunter.stamina <= 0.0 {
                hunter.survival_timer = SURVIVAL_TICKS;
            }
        }

        if had_stamina && hunter.stamina <= 0.0 {
            self.log.push(SimEvent::HunterExhausted { tick, hunter: id });
        }

        if !in_hideout && hunter.stamina > 0.0 {
            let nearest_knight = self.grid.find_nearest(pos, EntityKind::Knight);
            let action = hunter.decide_action(
                &self.grid,
                &self.treasures,
                self.policy.as_ref(),
                nearest_knight,
            );
            // Collect and flee carry no movement of their own.
            let target = match action {
                Action::Move if hunter.is_carrying() => {
                    self.grid.find_nearest(pos, EntityKind::Hideout)
                }
                Action::Move => self.grid.find_nearest(pos, EntityKind::Treasure),
                Action::Rest => self.grid.find_nearest(pos, EntityKind::Hideout),
                Action::Collect | Action::Flee => None,
            };
            hunter.move_toward(&mut self.grid, target);
        }
    }

    fn remove_hunter(&mut self, id: HunterId) {
        let Some(mut hunter) = self.hunters.remove(id) else {
            return;
        };
        self.grid.vacate(hunter.pos, EntityKind::Hunter);
        for hideout in &mut self.hideouts {
            hideout.remove_hunter(id);
        }
        let tick = self.tick;
        if let Some(mut dropped) = hunter.carried.take() {
            dropped.pos = hunter.pos;
            self.grid.place(dropped.pos, EntityKind::Treasure);
            self.treasures.push(dropped);
            self.log.push(SimEvent::TreasureDropped { tick, hunter: id, pos: hunter.pos });
        }
        self.log.push(SimEvent::HunterPerished { tick, hunter: id });
    }

    fn patrol_knights(&mut self) {
        for knight in &mut self.knights {
            knight.patrol(&mut self.grid, &mut self.rng);
        }
    }

    fn check_game_over(&mut self) {
        let loot_left =
            !self.treasures.is_empty() || self.hunters.values().any(|hunter| hunter.is_carrying());
        if !loot_left || self.hunters.is_empty() {
            self.game_over = true;
            self.log.push(SimEvent::GameOver { tick: self.tick });
        }
    }
}
