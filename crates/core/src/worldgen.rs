//! World-generation helpers: spreading hideouts with k-means and finding free cells.
//! These only read the grid; placing entities is left to the simulation.

use rand_chacha::ChaCha8Rng;

use crate::grid::Grid;
use crate::rng::{random_below, random_in_range};
use crate::types::{EntityKind, Pos};

/// Lloyd's k-means over every cell of a `size`×`size` grid, seeded with a random cell
/// followed by farthest-point picks. Centers are truncated to whole cells.
pub fn kmeans_centers(
    size: usize,
    k: usize,
    rng: &mut ChaCha8Rng,
    max_iterations: u32,
) -> Vec<Pos> {
    let points: Vec<(f64, f64)> = (0..size)
        .flat_map(|x| (0..size).map(move |y| (x as f64, y as f64)))
        .collect();
    if points.is_empty() || k == 0 {
        return Vec::new();
    }
    let k = k.min(points.len());

    let mut centers = vec![points[random_below(rng, points.len())]];
    while centers.len() < k {
        let mut farthest = points[0];
        let mut farthest_distance = f64::MIN;
        for point in &points {
            let closest = centers
                .iter()
                .map(|center| squared_distance(*point, *center))
                .fold(f64::INFINITY, f64::min);
            if closest > farthest_distance {
                farthest = *point;
                farthest_distance = closest;
            }
        }
        centers.push(farthest);
    }

    let mut assignment = vec![usize::MAX; points.len()];
    for _ in 0..max_iterations {
        let mut changed = false;
        for (idx, point) in points.iter().enumerate() {
            let nearest = nearest_center(&centers, *point);
            if assignment[idx] != nearest {
                assignment[idx] = nearest;
                changed = true;
            }
        }
        if !changed {
            break;
        }

        let mut sums = vec![(0.0, 0.0, 0_usize); k];
        for (point, cluster) in points.iter().zip(&assignment) {
            let sum = &mut sums[*cluster];
            sum.0 += point.0;
            sum.1 += point.1;
            sum.2 += 1;
        }
        for (center, (sx, sy, count)) in centers.iter_mut().zip(sums) {
            if count > 0 {
                *center = (sx / count as f64, sy / count as f64);
            }
        }
    }

    centers.into_iter().map(|(x, y)| Pos { x: x as i32, y: y as i32 }).collect()
}

fn squared_distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    (a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)
}

fn nearest_center(centers: &[(f64, f64)], point: (f64, f64)) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (idx, center) in centers.iter().enumerate() {
        let distance = squared_distance(point, *center);
        if distance < best_distance {
            best = idx;
            best_distance = distance;
        }
    }
    best
}

/// Random probing for an empty cell; gives up after `attempts` misses.
pub fn find_empty_cell(grid: &Grid, rng: &mut ChaCha8Rng, attempts: u32) -> Option<Pos> {
    for _ in 0..attempts {
        let x = random_below(rng, grid.size()) as i32;
        let y = random_below(rng, grid.size()) as i32;
        let pos = Pos { x, y };
        if grid.kind_at(pos) == EntityKind::Empty {
            return Some(pos);
        }
    }
    None
}

/// Random probing inside the square of half-width `radius` around `center`.
pub fn find_empty_cell_near(
    grid: &Grid,
    rng: &mut ChaCha8Rng,
    center: Pos,
    radius: i32,
    attempts: u32,
) -> Option<Pos> {
    for _ in 0..attempts {
        let dx = random_in_range(rng, -radius, radius);
        let dy = random_in_range(rng, -radius, radius);
        let pos = grid.wrap(center.x + dx, center.y + dy);
        if grid.kind_at(pos) == EntityKind::Empty {
            return Some(pos);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use rand_chacha::rand_core::SeedableRng;

    use super::*;

    #[test]
    fn kmeans_spreads_three_centers_over_the_grid() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let centers = kmeans_centers(20, 3, &mut rng, 100);
        assert_eq!(centers.len(), 3);
        for (i, a) in centers.iter().enumerate() {
            assert!((0..20).contains(&a.x) && (0..20).contains(&a.y));
            for b in &centers[i + 1..] {
                let apart = a.x.abs_diff(b.x) + a.y.abs_diff(b.y);
                assert!(apart >= 5, "centers {a:?} and {b:?} are clustered together");
            }
        }
    }

    #[test]
    fn kmeans_is_seed_stable() {
        let left = kmeans_centers(16, 3, &mut ChaCha8Rng::seed_from_u64(4), 100);
        let right = kmeans_centers(16, 3, &mut ChaCha8Rng::seed_from_u64(4), 100);
        assert_eq!(left, right);
    }

    #[test]
    fn kmeans_caps_centers_at_cell_count() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(kmeans_centers(1, 3, &mut rng, 10), vec![Pos::new(0, 0)]);
    }

    #[test]
    fn empty_cell_search_respects_occupancy_and_radius() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut grid = Grid::new(10);
        let center = Pos::new(5, 5);
        for _ in 0..50 {
            let pos = find_empty_cell_near(&grid, &mut rng, center, 2, 50).unwrap();
            assert!(pos.x.abs_diff(5) <= 2 && pos.y.abs_diff(5) <= 2);
        }

        for x in 0..10 {
            for y in 0..10 {
                grid.add_entity(x, y, EntityKind::Treasure);
            }
        }
        assert_eq!(find_empty_cell(&grid, &mut rng, 100), None);
        grid.add_entity(3, 4, EntityKind::Empty);
        assert_eq!(find_empty_cell(&grid, &mut rng, 10_000), Some(Pos::new(3, 4)));
    }
}
