//! Turns the encoded history into feature vectors over a sliding window.
//!
//! A feature vector is made of the window values followed by three summary
//! statistics of the window: the mean, the length of the trailing streak and
//! the alternation ratio. The label of a vector is the value that follows
//! the window.

/// Number of summary values appended after the window values.
pub const NUM_STATS: usize = 3;

/// A fixed-width numeric feature vector.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The summary statistics: mean, streak and alternation ratio.
    /// Returns an empty slice if the vector is too short to hold them.
    pub fn stats(&self) -> &[f64] {
        match self.0.len().checked_sub(NUM_STATS) {
            Some(start) => &self.0[start..],
            None => &[],
        }
    }
}

impl From<Vec<f64>> for FeatureVector {
    fn from(values: Vec<f64>) -> Self {
        FeatureVector(values)
    }
}

/// A set of feature vectors and the labels that follow them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    pub features: Vec<FeatureVector>,
    pub labels: Vec<u8>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn push(&mut self, features: FeatureVector, label: u8) {
        self.features.push(features);
        self.labels.push(label);
    }

    /// Returns a new dataset made of the rows at 'indices'. Indices may repeat.
    pub fn select(&self, indices: &[usize]) -> Dataset {
        Dataset {
            features: indices
                .iter()
                .map(|&i| self.features[i].clone())
                .collect(),
            labels: indices.iter().map(|&i| self.labels[i]).collect(),
        }
    }

    /// Returns the width of the feature vectors, or zero for an empty set.
    pub fn num_features(&self) -> usize {
        self.features.first().map_or(0, |f| f.len())
    }
}

/// Returns the length of the run of equal values that ends at the last
/// element of 'window'. A non-empty window has a streak of at least one.
pub fn streak(window: &[u8]) -> usize {
    let Some(last) = window.last() else {
        return 0;
    };
    window.iter().rev().take_while(|v| *v == last).count()
}

/// Returns the fraction of adjacent pairs in 'window' that differ.
pub fn alternation_ratio(window: &[u8]) -> f64 {
    if window.len() < 2 {
        return 0.0;
    }
    let changes = window.windows(2).filter(|w| w[0] != w[1]).count();
    changes as f64 / (window.len() - 1) as f64
}

/// Builds the feature vector of a single window of encoded outcomes.
pub fn window_features(window: &[u8]) -> FeatureVector {
    let mut values: Vec<f64> = Vec::with_capacity(window.len() + NUM_STATS);
    values.extend(window.iter().map(|&v| v as f64));
    let avg = if window.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / window.len() as f64
    };
    values.push(avg);
    values.push(streak(window) as f64);
    values.push(alternation_ratio(window));
    FeatureVector(values)
}

/// Creates one labeled example for every position of the encoded history that
/// is preceded by a full window. Returns an empty dataset if the history is not
/// longer than the window.
pub fn create_features(encoded: &[u8], window: usize) -> Dataset {
    let mut dataset = Dataset::default();
    if window == 0 || encoded.len() <= window {
        return dataset;
    }
    for i in window..encoded.len() {
        dataset.push(window_features(&encoded[i - window..i]), encoded[i]);
    }
    dataset
}

/// Builds the features of the most recent window, which has no label yet.
pub fn live_features(encoded: &[u8], window: usize) -> Option<FeatureVector> {
    if window == 0 || encoded.len() < window {
        return None;
    }
    Some(window_features(&encoded[encoded.len() - window..]))
}

#[test]
fn test_streak() {
    assert_eq!(streak(&[1, 1, 0]), 1);
    assert_eq!(streak(&[0, 1, 0]), 1);
    assert_eq!(streak(&[0, 1, 1]), 2);
    assert_eq!(streak(&[1, 1, 1]), 3);
    assert_eq!(streak(&[0]), 1);
    assert_eq!(streak(&[]), 0);
}

#[test]
fn test_alternation_ratio() {
    assert_eq!(alternation_ratio(&[0, 1, 0]), 1.0);
    assert_eq!(alternation_ratio(&[1, 1, 1]), 0.0);
    assert_eq!(alternation_ratio(&[1, 1, 0]), 0.5);
    assert_eq!(alternation_ratio(&[1, 0, 0, 1, 1]), 0.5);
}

#[test]
fn test_window_features() {
    let f = window_features(&[0, 1, 0]);
    assert_eq!(f.len(), 6);
    assert_eq!(&f.as_slice()[..3], &[0.0, 1.0, 0.0]);
    assert!((f.stats()[0] - 1.0 / 3.0).abs() < 1e-12);
    assert_eq!(f.stats()[1], 1.0);
    assert_eq!(f.stats()[2], 1.0);
}

#[test]
fn test_stats_of_short_vectors() {
    assert!(FeatureVector::from(Vec::new()).stats().is_empty());
    assert!(FeatureVector::from(vec![1.0, 0.5]).stats().is_empty());
    let f = FeatureVector::from(vec![0.5, 2.0, 0.0]);
    assert_eq!(f.stats(), &[0.5, 2.0, 0.0]);
}
