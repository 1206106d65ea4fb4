//! This module contains the implementation of a random forest.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::model::Classifier;
use super::tree::DecisionTree;
use crate::features::Dataset;
use crate::outcome::NUM_CLASSES;

/// An ensemble of decision trees. Every tree is trained on a bootstrap sample
/// of the data and looks at the square root of the number of features at each
/// split. The prediction is the mean of the leaf probabilities of the trees.
/// All of the randomness is derived from 'seed', so fitting the same data
/// twice gives the same forest.
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    n_trees: usize,
    seed: u64,
}

impl RandomForest {
    pub fn new(n_trees: usize, seed: u64) -> Self {
        Self {
            trees: Vec::new(),
            n_trees,
            seed,
        }
    }

    /// Returns the number of trained trees.
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn is_fitted(&self) -> bool {
        !self.trees.is_empty()
    }

}

impl Classifier for RandomForest {
    fn fit(&mut self, data: &Dataset) {
        self.trees.clear();
        if data.is_empty() {
            return;
        }

        let n = data.len();
        let max_features =
            ((data.num_features() as f64).sqrt() as usize).max(1);
        let mut rng = StdRng::seed_from_u64(self.seed);

        for _ in 0..self.n_trees {
            let tree_seed: u64 = rng.gen();
            let rows: Vec<usize> =
                (0..n).map(|_| rng.gen_range(0..n)).collect();
            let mut tree = DecisionTree::new(Some(max_features), tree_seed);
            tree.fit_rows(data, &rows);
            self.trees.push(tree);
        }

        log::trace!(
            "Trained {} trees, deepest is {}",
            self.trees.len(),
            self.trees.iter().map(|t| t.depth()).max().unwrap_or(0)
        );
    }

    fn predict_proba(&self, features: &[f64]) -> [f64; NUM_CLASSES] {
        if self.trees.is_empty() {
            return [1.0 / NUM_CLASSES as f64; NUM_CLASSES];
        }
        let mut sum = [0.0; NUM_CLASSES];
        for tree in &self.trees {
            let proba = tree.predict_proba(features);
            for (s, p) in sum.iter_mut().zip(proba.iter()) {
                *s += p;
            }
        }
        let count = self.trees.len() as f64;
        sum.map(|s| s / count)
    }
}

#[test]
fn test_forest() {
    use crate::features::FeatureVector;

    let mut data = Dataset::default();
    for i in 0..40 {
        let x = i as f64;
        let features = FeatureVector::from(vec![x, 1.0, (i % 3) as f64]);
        data.push(features, (i >= 20) as u8);
    }

    let mut forest = RandomForest::new(25, 42);
    assert!(!forest.is_fitted());
    assert_eq!(forest.predict_proba(&[0.0, 1.0, 0.0]), [0.5, 0.5]);

    forest.fit(&data);
    assert_eq!(forest.n_trees(), 25);
    assert_eq!(forest.predict(&[2.0, 1.0, 2.0]), 0);
    assert_eq!(forest.predict(&[37.0, 1.0, 1.0]), 1);

    let p = forest.predict_proba(&[19.5, 1.0, 0.0]);
    assert!((p[0] + p[1] - 1.0).abs() < 1e-9);

    // Same seed, same forest.
    let mut other = RandomForest::new(25, 42);
    other.fit(&data);
    for x in [0.0, 10.0, 19.0, 20.0, 21.0, 39.0] {
        let f = [x, 1.0, 0.0];
        assert_eq!(forest.predict_proba(&f), other.predict_proba(&f));
    }

    forest.fit(&Dataset::default());
    assert!(!forest.is_fitted());
}
