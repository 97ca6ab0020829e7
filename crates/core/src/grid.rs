//! Toroidal occupancy grid and breadth-first nearest-entity search.
//! Every coordinate is wrapped modulo the side length before it touches storage.
//! The grid does not know which entity stands where, only what kinds share a cell.

use std::collections::VecDeque;

use crate::types::{Direction, EntityKind, Pos};

/// Occupants stacked on one cell. The visible kind is the highest-precedence occupant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Cell {
    hideout: bool,
    knights: u8,
    hunters: u8,
    treasures: u8,
}

impl Cell {
    fn only(kind: EntityKind) -> Self {
        let mut cell = Cell::default();
        cell.add(kind);
        cell
    }

    pub fn kind(self) -> EntityKind {
        if self.hideout {
            EntityKind::Hideout
        } else if self.knights > 0 {
            EntityKind::Knight
        } else if self.hunters > 0 {
            EntityKind::Hunter
        } else if self.treasures > 0 {
            EntityKind::Treasure
        } else {
            EntityKind::Empty
        }
    }

    pub fn contains(self, kind: EntityKind) -> bool {
        match kind {
            EntityKind::Empty => self == Cell::default(),
            EntityKind::Treasure => self.treasures > 0,
            EntityKind::Hunter => self.hunters > 0,
            EntityKind::Knight => self.knights > 0,
            EntityKind::Hideout => self.hideout,
        }
    }

    fn add(&mut self, kind: EntityKind) {
        match kind {
            EntityKind::Empty => {}
            EntityKind::Treasure => self.treasures = self.treasures.saturating_add(1),
            EntityKind::Hunter => self.hunters = self.hunters.saturating_add(1),
            EntityKind::Knight => self.knights = self.knights.saturating_add(1),
            EntityKind::Hideout => self.hideout = true,
        }
    }

    fn remove(&mut self, kind: EntityKind) {
        match kind {
            EntityKind::Empty => {}
            EntityKind::Treasure => self.treasures = self.treasures.saturating_sub(1),
            EntityKind::Hunter => self.hunters = self.hunters.saturating_sub(1),
            EntityKind::Knight => self.knights = self.knights.saturating_sub(1),
            EntityKind::Hideout => self.hideout = false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(size: usize) -> Self {
        debug_assert!(size > 0, "grid side length must be positive");
        Self { size, cells: vec![Cell::default(); size * size] }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn wrap(&self, x: i32, y: i32) -> Pos {
        let side = self.size as i32;
        Pos { x: x.rem_euclid(side), y: y.rem_euclid(side) }
    }

    pub fn step(&self, pos: Pos, direction: Direction) -> Pos {
        let (dx, dy) = direction.delta();
        self.wrap(pos.x + dx, pos.y + dy)
    }

    pub fn cell(&self, pos: Pos) -> Cell {
        self.cells[self.index(pos)]
    }

    pub fn kind_at(&self, pos: Pos) -> EntityKind {
        self.cell(pos).kind()
    }

    /// Overwrites whatever the cell held with a single occupant of `kind`.
    pub fn add_entity(&mut self, x: i32, y: i32, kind: EntityKind) {
        let idx = self.index(Pos { x, y });
        self.cells[idx] = Cell::only(kind);
    }

    pub fn place(&mut self, pos: Pos, kind: EntityKind) {
        let idx = self.index(pos);
        self.cells[idx].add(kind);
    }

    pub fn vacate(&mut self, pos: Pos, kind: EntityKind) {
        let idx = self.index(pos);
        self.cells[idx].remove(kind);
    }

    pub fn relocate(&mut self, from: Pos, to: Pos, kind: EntityKind) {
        self.vacate(from, kind);
        self.place(to, kind);
    }

    pub fn get_adjacent(&self, pos: Pos) -> [(Pos, EntityKind); 4] {
        Direction::ALL.map(|direction| {
            let next = self.step(pos, direction);
            (next, self.kind_at(next))
        })
    }

    /// Breadth-first search for the closest cell showing `kind`.
    /// Ties resolve in `Direction::ALL` expansion order.
    pub fn find_nearest(&self, start: Pos, kind: EntityKind) -> Option<Pos> {
        let start = self.wrap(start.x, start.y);
        let mut visited = vec![false; self.cells.len()];
        let mut queue = VecDeque::new();
        visited[self.index(start)] = true;
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            if self.kind_at(current) == kind {
                return Some(current);
            }
            for (next, _) in self.get_adjacent(current) {
                let idx = self.index(next);
                if !visited[idx] {
                    visited[idx] = true;
                    queue.push_back(next);
                }
            }
        }
        None
    }

    /// Straight-line distance taking the shorter way around each axis.
    pub fn distance(&self, a: Pos, b: Pos) -> f64 {
        let side = self.size as u32;
        let a = self.wrap(a.x, a.y);
        let b = self.wrap(b.x, b.y);
        let dx = a.x.abs_diff(b.x);
        let dy = a.y.abs_diff(b.y);
        f64::from(dx.min(side - dx)).hypot(f64::from(dy.min(side - dy)))
    }

    /// Cell kinds indexed as `kinds[x][y]`, the layout renderers read.
    pub fn kinds(&self) -> Vec<Vec<EntityKind>> {
        (0..self.size as i32)
            .map(|x| (0..self.size as i32).map(|y| self.kind_at(Pos { x, y })).collect())
            .collect()
    }

    pub fn cells(&self) -> impl Iterator<Item = (Pos, Cell)> + '_ {
        self.cells.iter().enumerate().map(|(idx, cell)| {
            let x = (idx / self.size) as i32;
            let y = (idx % self.size) as i32;
            (Pos { x, y }, *cell)
        })
    }

    fn index(&self, pos: Pos) -> usize {
        let wrapped = self.wrap(pos.x, pos.y);
        (wrapped.x as usize) * self.size + (wrapped.y as usize)
    }
}
