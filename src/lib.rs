pub mod app;
pub mod error;
pub mod features;
pub mod gate;
pub mod history;
pub mod models;
pub mod outcome;
pub mod predictor;
pub mod render;
pub mod session;
pub mod simulate;
pub mod utils;

pub use error::Error;

/// Stores the parameters of the feature extractor and the predictor.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Context {
    /// Number of non-Tie outcomes in one feature window.
    window: usize,
    /// Minimum number of labeled examples needed before training.
    min_examples: usize,
    /// Number of trees in the forest.
    n_trees: usize,
    /// Seed of the train/test split and of the forest.
    seed: u64,
    /// Fraction of the examples that is held out to measure accuracy.
    test_fraction: f64,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            window: 3,
            min_examples: 10,
            n_trees: 200,
            seed: 42,
            test_fraction: 0.3,
        }
    }
}

impl Context {
    pub fn new(
        window: usize,
        n_trees: usize,
        seed: u64,
    ) -> Result<Self, Error> {
        Ok(Self::default()
            .with_window(window)?
            .with_trees(n_trees)?
            .with_seed(seed))
    }

    /// Sets the window size. The alternation ratio needs at least one
    /// adjacent pair, so windows shorter than two are rejected.
    pub fn with_window(mut self, window: usize) -> Result<Self, Error> {
        if window < 2 {
            return Err(Error::InvalidWindow(window));
        }
        self.window = window;
        Ok(self)
    }

    pub fn with_trees(mut self, n_trees: usize) -> Result<Self, Error> {
        if n_trees == 0 {
            return Err(Error::InvalidTreeCount);
        }
        self.n_trees = n_trees;
        Ok(self)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_test_fraction(mut self, fraction: f64) -> Result<Self, Error> {
        if !(fraction > 0.0 && fraction < 1.0) {
            return Err(Error::InvalidTestFraction(fraction));
        }
        self.test_fraction = fraction;
        Ok(self)
    }

    pub fn with_min_examples(mut self, min_examples: usize) -> Self {
        self.min_examples = min_examples;
        self
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn min_examples(&self) -> usize {
        self.min_examples
    }

    pub fn n_trees(&self) -> usize {
        self.n_trees
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn test_fraction(&self) -> f64 {
        self.test_fraction
    }
}

#[test]
fn test_context_validation() {
    let ctx = Context::default();
    assert_eq!(ctx.window(), 3);
    assert_eq!(ctx.min_examples(), 10);
    assert_eq!(ctx.n_trees(), 200);
    assert_eq!(ctx.seed(), 42);

    assert!(Context::new(1, 10, 0).is_err());
    assert!(Context::new(3, 0, 0).is_err());
    assert!(ctx.with_test_fraction(1.0).is_err());
    assert!(ctx.with_test_fraction(0.0).is_err());
    assert!(ctx.with_test_fraction(f64::NAN).is_err());

    let ctx = Context::new(5, 20, 7).unwrap();
    assert_eq!(ctx.window(), 5);
    assert_eq!(ctx.n_trees(), 20);
    assert_eq!(ctx.seed(), 7);
}
