//! A CART decision tree that splits on Gini impurity.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::model::Classifier;
use crate::features::Dataset;
use crate::outcome::NUM_CLASSES;

#[derive(Clone, Debug)]
enum Node {
    /// A terminal node that holds the class fractions of its rows.
    Leaf { proba: [f64; NUM_CLASSES] },
    /// Rows with 'feature <= threshold' go left, the rest go right.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// A binary decision tree. The tree grows until every leaf is pure or can't
/// be split any further. When 'max_features' is set, every node only looks
/// at that many randomly chosen features that are not constant.
#[derive(Clone, Debug)]
pub struct DecisionTree {
    nodes: Vec<Node>,
    max_features: Option<usize>,
    seed: u64,
}

fn class_counts(data: &Dataset, rows: &[usize]) -> [usize; NUM_CLASSES] {
    let mut counts = [0; NUM_CLASSES];
    for &r in rows {
        counts[data.labels[r] as usize] += 1;
    }
    counts
}

/// Returns the Gini impurity of a node with the class counts 'counts'.
fn gini(counts: &[usize; NUM_CLASSES], total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    1.0 - counts
        .iter()
        .map(|&c| {
            let p = c as f64 / total;
            p * p
        })
        .sum::<f64>()
}

impl DecisionTree {
    pub fn new(max_features: Option<usize>, seed: u64) -> Self {
        Self {
            nodes: Vec::new(),
            max_features,
            seed,
        }
    }

    /// Train the tree on the rows 'rows' of 'data'. Rows may repeat, which is
    /// how the forest passes bootstrap samples.
    pub fn fit_rows(&mut self, data: &Dataset, rows: &[usize]) {
        self.nodes.clear();
        if rows.is_empty() {
            self.nodes.push(Node::Leaf {
                proba: [1.0 / NUM_CLASSES as f64; NUM_CLASSES],
            });
            return;
        }
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut rows = rows.to_vec();
        self.build(data, &mut rows, &mut rng);
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges on the longest path from the root.
    pub fn depth(&self) -> usize {
        fn walk(nodes: &[Node], idx: usize) -> usize {
            match nodes[idx] {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => {
                    1 + walk(nodes, left).max(walk(nodes, right))
                }
            }
        }
        if self.nodes.is_empty() {
            return 0;
        }
        walk(&self.nodes, 0)
    }

    /// Grow the subtree of 'rows' and return the index of its root node.
    fn build(
        &mut self,
        data: &Dataset,
        rows: &mut [usize],
        rng: &mut StdRng,
    ) -> usize {
        let counts = class_counts(data, rows);
        let idx = self.nodes.len();
        let pure = counts.iter().filter(|&&c| c > 0).count() <= 1;

        let split = if pure || rows.len() < 2 {
            None
        } else {
            self.best_split(data, rows, rng)
        };

        let Some((feature, threshold)) = split else {
            let total = rows.len() as f64;
            let mut proba = [0.0; NUM_CLASSES];
            for (p, c) in proba.iter_mut().zip(counts.iter()) {
                *p = *c as f64 / total;
            }
            self.nodes.push(Node::Leaf { proba });
            return idx;
        };

        // Reserve the slot of this node before the children are pushed.
        self.nodes.push(Node::Leaf {
            proba: [0.0; NUM_CLASSES],
        });

        // Move the rows that go left to the front.
        let mut mid = 0;
        for i in 0..rows.len() {
            if data.features[rows[i]].as_slice()[feature] <= threshold {
                rows.swap(i, mid);
                mid += 1;
            }
        }

        let (lhs, rhs) = rows.split_at_mut(mid);
        let left = self.build(data, lhs, rng);
        let right = self.build(data, rhs, rng);
        self.nodes[idx] = Node::Split {
            feature,
            threshold,
            left,
            right,
        };
        idx
    }

    /// Find the feature and threshold that minimize the weighted Gini impurity
    /// of the two children. Returns None if every feature is constant.
    fn best_split(
        &self,
        data: &Dataset,
        rows: &[usize],
        rng: &mut StdRng,
    ) -> Option<(usize, f64)> {
        let num_features = data.num_features();
        let max_features = self.max_features.unwrap_or(num_features).max(1);
        let mut order: Vec<usize> = (0..num_features).collect();
        order.shuffle(rng);

        let total = rows.len();
        let parent = class_counts(data, rows);
        let mut best: Option<(usize, f64, f64)> = None;
        let mut visited = 0;
        let mut column: Vec<(f64, u8)> = Vec::with_capacity(total);

        for feature in order {
            if visited == max_features {
                break;
            }

            column.clear();
            column.extend(rows.iter().map(|&r| {
                (data.features[r].as_slice()[feature], data.labels[r])
            }));
            column.sort_by(|a, b| a.0.total_cmp(&b.0));

            // Constant features don't count towards 'max_features'.
            if column[0].0 == column[total - 1].0 {
                continue;
            }
            visited += 1;

            let mut left = [0; NUM_CLASSES];
            for i in 0..total - 1 {
                left[column[i].1 as usize] += 1;
                let (lo, hi) = (column[i].0, column[i + 1].0);
                if lo == hi {
                    continue;
                }
                let mut right = parent;
                for (r, l) in right.iter_mut().zip(left.iter()) {
                    *r -= l;
                }
                let n_left = i + 1;
                let n_right = total - n_left;
                let impurity = (n_left as f64 * gini(&left, n_left)
                    + n_right as f64 * gini(&right, n_right))
                    / total as f64;

                if best.map_or(true, |(_, _, b)| impurity < b) {
                    let mut threshold = lo / 2.0 + hi / 2.0;
                    if threshold >= hi {
                        threshold = lo;
                    }
                    best = Some((feature, threshold, impurity));
                }
            }
        }

        best.map(|(feature, threshold, _)| (feature, threshold))
    }
}

impl Classifier for DecisionTree {
    fn fit(&mut self, data: &Dataset) {
        let rows: Vec<usize> = (0..data.len()).collect();
        self.fit_rows(data, &rows);
    }

    fn predict_proba(&self, features: &[f64]) -> [f64; NUM_CLASSES] {
        if self.nodes.is_empty() {
            return [1.0 / NUM_CLASSES as f64; NUM_CLASSES];
        }
        let mut idx = 0;
        loop {
            match self.nodes[idx] {
                Node::Leaf { proba } => return proba,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if features[feature] <= threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }
}

#[cfg(test)]
fn dataset<const N: usize>(rows: &[([f64; N], u8)]) -> Dataset {
    use crate::features::FeatureVector;

    let mut data = Dataset::default();
    for (f, l) in rows {
        data.push(FeatureVector::from(f.to_vec()), *l);
    }
    data
}

#[test]
fn test_gini() {
    assert_eq!(gini(&[5, 0], 5), 0.0);
    assert_eq!(gini(&[2, 2], 4), 0.5);
    assert_eq!(gini(&[0, 0], 0), 0.0);
}

#[test]
fn test_learns_threshold() {
    let data = dataset(&[
        ([0.0, 5.0], 0),
        ([1.0, 5.0], 0),
        ([2.0, 5.0], 0),
        ([3.0, 5.0], 1),
        ([4.0, 5.0], 1),
    ]);
    let mut tree = DecisionTree::new(None, 0);
    tree.fit(&data);
    // One split on the first feature is enough.
    assert_eq!(tree.num_nodes(), 3);
    assert_eq!(tree.depth(), 1);
    assert_eq!(tree.predict(&[2.4, 5.0]), 0);
    assert_eq!(tree.predict(&[2.6, 5.0]), 1);
    assert_eq!(tree.predict_proba(&[10.0, 0.0]), [0.0, 1.0]);
}

#[test]
fn test_pure_and_empty() {
    let data = dataset(&[([0.0], 1), ([1.0], 1)]);
    let mut tree = DecisionTree::new(None, 0);
    tree.fit(&data);
    assert_eq!(tree.num_nodes(), 1);
    assert_eq!(tree.predict_proba(&[0.5]), [0.0, 1.0]);

    tree.fit(&Dataset::default());
    assert_eq!(tree.predict_proba(&[0.5]), [0.5, 0.5]);
}

#[test]
fn test_inseparable_rows_make_a_mixed_leaf() {
    let data = dataset(&[([1.0], 0), ([1.0], 1), ([1.0], 1), ([1.0], 0)]);
    let mut tree = DecisionTree::new(Some(1), 3);
    tree.fit(&data);
    assert_eq!(tree.num_nodes(), 1);
    assert_eq!(tree.predict_proba(&[1.0]), [0.5, 0.5]);
}

#[test]
fn test_xor() {
    let data = dataset(&[
        ([0.0, 0.0], 0),
        ([0.0, 1.0], 1),
        ([1.0, 0.0], 1),
        ([1.0, 1.0], 0),
    ]);
    let mut tree = DecisionTree::new(None, 1);
    tree.fit(&data);
    let cases = [
        ([0.0, 0.0], 0),
        ([0.0, 1.0], 1),
        ([1.0, 0.0], 1),
        ([1.0, 1.0], 0),
    ];
    for (f, l) in cases {
        assert_eq!(tree.predict(&f), l);
    }
}
