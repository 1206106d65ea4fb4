//! Draws synthetic histories with the odds of an eight-deck shoe.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, WeightedIndex};

use crate::outcome::Outcome;

/// The probabilities of Player, Banker and Tie in eight-deck baccarat.
pub const SHOE_ODDS: [f64; 3] = [0.4462, 0.4586, 0.0952];

/// Returns 'n' outcomes drawn independently with the shoe odds.
pub fn simulate(n: usize, seed: u64) -> Vec<Outcome> {
    let mut rng = StdRng::seed_from_u64(seed);
    // The weights are positive constants, so the distribution is valid.
    let dist = match WeightedIndex::new(SHOE_ODDS) {
        Ok(dist) => dist,
        Err(_) => return Vec::new(),
    };
    (0..n).map(|_| Outcome::ALL[dist.sample(&mut rng)]).collect()
}

#[test]
fn test_simulate() {
    let a = simulate(5000, 1);
    assert_eq!(a.len(), 5000);
    assert_eq!(a, simulate(5000, 1));
    assert_ne!(a, simulate(5000, 2));

    let ties = a.iter().filter(|o| **o == Outcome::Tie).count();
    let ratio = ties as f64 / a.len() as f64;
    assert!(ratio > 0.06 && ratio < 0.13, "tie ratio {}", ratio);
    assert!(simulate(0, 1).is_empty());
}
