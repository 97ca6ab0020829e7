//! Hunter decision policies.
//! A policy maps (stamina, remembered treasure value, threat distance) to an action code.
//! Codes outside `Action` are tolerated here and mapped to a rest by the caller.

use crate::types::Action;

pub trait DecisionPolicy {
    fn predict(&self, stamina: f64, treasure_value: f64, threat_distance: f64) -> u8;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrainingExample {
    pub features: [f64; 3],
    pub action: Action,
}

const fn example(stamina: f64, value: f64, distance: f64, action: Action) -> TrainingExample {
    TrainingExample { features: [stamina, value, distance], action }
}

pub const HUNTER_TRAINING_TABLE: [TrainingExample; 6] = [
    example(80.0, 0.13, 5.0, Action::Move),
    example(30.0, 0.07, 2.0, Action::Flee),
    example(10.0, 0.03, 1.0, Action::Rest),
    example(50.0, 0.13, 8.0, Action::Move),
    example(90.0, 0.13, 10.0, Action::Collect),
    example(20.0, 0.07, 3.0, Action::Flee),
];

#[derive(Clone, Debug, PartialEq)]
enum Node {
    Leaf(u8),
    Split { feature: usize, threshold: f64, below: Box<Node>, above: Box<Node> },
}

/// Binary classification tree grown with Gini impurity on midpoint thresholds.
#[derive(Clone, Debug, PartialEq)]
pub struct DecisionTree {
    root: Node,
}

impl DecisionTree {
    pub fn fit(examples: &[TrainingExample]) -> Self {
        let rows: Vec<&TrainingExample> = examples.iter().collect();
        Self { root: grow(&rows) }
    }

    pub fn depth(&self) -> usize {
        fn depth_of(node: &Node) -> usize {
            match node {
                Node::Leaf(_) => 0,
                Node::Split { below, above, .. } => 1 + depth_of(below).max(depth_of(above)),
            }
        }
        depth_of(&self.root)
    }
}

impl Default for DecisionTree {
    fn default() -> Self {
        Self::fit(&HUNTER_TRAINING_TABLE)
    }
}

impl DecisionPolicy for DecisionTree {
    fn predict(&self, stamina: f64, treasure_value: f64, threat_distance: f64) -> u8 {
        let features = [stamina, treasure_value, threat_distance];
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf(code) => return *code,
                Node::Split { feature, threshold, below, above } => {
                    node = if features[*feature] <= *threshold { below } else { above };
                }
            }
        }
    }
}

fn grow(rows: &[&TrainingExample]) -> Node {
    let parent = gini(rows);
    if rows.len() < 2 || parent == 0.0 {
        return Node::Leaf(majority(rows));
    }

    let mut best: Option<(f64, usize, f64)> = None;
    for feature in 0..3 {
        let mut values: Vec<f64> = rows.iter().map(|row| row.features[feature]).collect();
        values.sort_by(f64::total_cmp);
        values.dedup();
        for pair in values.windows(2) {
            let threshold = (pair[0] + pair[1]) / 2.0;
            let (below, above) = partition(rows, feature, threshold);
            let weighted =
                below.len() as f64 * gini(&below) + above.len() as f64 * gini(&above);
            let impurity = weighted / rows.len() as f64;
            if best.is_none_or(|(current, _, _)| impurity < current) {
                best = Some((impurity, feature, threshold));
            }
        }
    }

    match best {
        Some((impurity, feature, threshold)) if impurity < parent => {
            let (below, above) = partition(rows, feature, threshold);
            Node::Split {
                feature,
                threshold,
                below: Box::new(grow(&below)),
                above: Box::new(grow(&above)),
            }
        }
        _ => Node::Leaf(majority(rows)),
    }
}

fn partition<'a>(
    rows: &[&'a TrainingExample],
    feature: usize,
    threshold: f64,
) -> (Vec<&'a TrainingExample>, Vec<&'a TrainingExample>) {
    rows.iter().partition(|row| row.features[feature] <= threshold)
}

fn label_counts(rows: &[&TrainingExample]) -> [usize; 5] {
    let mut counts = [0_usize; 5];
    for row in rows {
        counts[row.action.code() as usize] += 1;
    }
    counts
}

fn gini(rows: &[&TrainingExample]) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    let n = rows.len() as f64;
    1.0 - label_counts(rows).iter().map(|&count| (count as f64 / n).powi(2)).sum::<f64>()
}

// Ties go to the lowest action code.
fn majority(rows: &[&TrainingExample]) -> u8 {
    let mut best = Action::Rest.code();
    let mut best_count = 0;
    for (code, count) in label_counts(rows).into_iter().enumerate().skip(1) {
        if count > best_count {
            best = code as u8;
            best_count = count;
        }
    }
    best
}
