//! A collection of utilities for splitting data, scoring models and timing.

/// Deterministic shuffling and train/test splitting.
pub mod split {
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    /// Returns a permutation of 0..n that depends only on 'n' and 'seed'.
    pub fn permutation(n: usize, seed: u64) -> Vec<usize> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut indices: Vec<usize> = (0..n).collect();
        indices.shuffle(&mut rng);
        indices
    }

    /// Returns the number of test rows for 'n' rows, rounding up. The train
    /// set always keeps at least one row.
    pub fn test_count(n: usize, test_fraction: f64) -> usize {
        if n < 2 {
            return 0;
        }
        let count = (n as f64 * test_fraction).ceil() as usize;
        count.clamp(1, n - 1)
    }

    /// Splits the indices 0..n into a shuffled train part and test part.
    pub fn train_test_split(
        n: usize,
        test_fraction: f64,
        seed: u64,
    ) -> (Vec<usize>, Vec<usize>) {
        let indices = permutation(n, seed);
        let n_test = test_count(n, test_fraction);
        let (test, train) = indices.split_at(n_test);
        (train.to_vec(), test.to_vec())
    }
}

/// Model scoring.
pub mod metrics {
    /// Returns the fraction of 'predicted' that matches 'actual'. Returns zero
    /// for empty inputs.
    pub fn accuracy(predicted: &[u8], actual: &[u8]) -> f64 {
        debug_assert_eq!(predicted.len(), actual.len());
        if actual.is_empty() {
            return 0.0;
        }
        let correct = predicted
            .iter()
            .zip(actual.iter())
            .filter(|(p, a)| p == a)
            .count();
        correct as f64 / actual.len() as f64
    }

    /// Returns the index of the largest probability. Ties go to the lower
    /// index.
    pub fn argmax(probs: &[f64]) -> usize {
        let mut best = 0;
        for (i, p) in probs.iter().enumerate() {
            if *p > probs[best] {
                best = i;
            }
        }
        best
    }
}

/// A scoped utility struct for measuring and reporting time.
pub struct Timer {
    what: &'static str,
    start: std::time::Instant,
}

impl Timer {
    pub fn new(what: &'static str) -> Self {
        Self {
            what,
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        let now = std::time::Instant::now();
        if let Some(duration) = now.checked_duration_since(self.start) {
            log::debug!(
                "{} completed in {:03} seconds",
                self.what,
                duration.as_secs_f32()
            );
        }
    }
}

#[test]
fn test_split() {
    use split::*;

    assert_eq!(test_count(10, 0.3), 3);
    assert_eq!(test_count(11, 0.3), 4);
    assert_eq!(test_count(2, 0.3), 1);
    assert_eq!(test_count(1, 0.3), 0);

    let (train, test) = train_test_split(20, 0.3, 42);
    assert_eq!(train.len(), 14);
    assert_eq!(test.len(), 6);
    let mut all: Vec<usize> =
        train.iter().chain(test.iter()).copied().collect();
    all.sort();
    assert_eq!(all, (0..20).collect::<Vec<_>>());

    // The split only depends on the seed.
    assert_eq!(train_test_split(20, 0.3, 42), (train, test));
}

#[test]
fn test_metrics() {
    use metrics::*;

    assert_eq!(accuracy(&[0, 1, 1, 0], &[0, 1, 0, 0]), 0.75);
    assert_eq!(accuracy(&[], &[]), 0.0);
    assert_eq!(argmax(&[0.5, 0.5]), 0);
    assert_eq!(argmax(&[0.2, 0.8]), 1);
}
