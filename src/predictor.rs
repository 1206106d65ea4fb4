//! Trains the forest on the session history and predicts the next outcome.
//!
//! Every evaluation is a pure function of the filtered history and the
//! context. The trained model is cached and only rebuilt when the filtered
//! history changes, so recording a Tie or rendering the page again does not
//! retrain.

use crate::features::{
    create_features, live_features, Dataset, FeatureVector,
};
use crate::history::History;
use crate::models::{Classifier, RandomForest};
use crate::outcome::{Outcome, NUM_CLASSES};
use crate::utils::metrics::{accuracy, argmax};
use crate::utils::split::train_test_split;
use crate::utils::Timer;
use crate::Context;

/// The predicted next outcome.
#[derive(Clone, Debug, PartialEq)]
pub struct Prediction {
    /// Either Player or Banker.
    pub outcome: Outcome,
    /// The probability of 'outcome', in the range [0, 1].
    pub confidence: f64,
    /// The probabilities of Player and Banker.
    pub probabilities: [f64; NUM_CLASSES],
}

/// The result of one evaluation of the session.
#[derive(Clone, Debug, PartialEq)]
pub enum Evaluation {
    /// Nothing was recorded yet.
    Empty,
    /// There are too few examples to train on.
    NeedMoreData { examples: usize, required: usize },
    /// The model was trained. The prediction is missing when there are too
    /// few outcomes to fill the live window.
    Trained {
        accuracy: f64,
        examples: usize,
        prediction: Option<Prediction>,
    },
}

/// A forest together with the accuracy it scored on the held out rows.
pub struct TrainedModel {
    forest: RandomForest,
    accuracy: f64,
    examples: usize,
}

impl TrainedModel {
    /// Accuracy on the test part of the split.
    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    /// Number of examples the split was made from.
    pub fn examples(&self) -> usize {
        self.examples
    }

    pub fn predict(&self, features: &FeatureVector) -> Prediction {
        let probabilities = self.forest.predict_proba(features.as_slice());
        let class = argmax(&probabilities);
        Prediction {
            outcome: Outcome::from_class(class as u8),
            confidence: probabilities[class],
            probabilities,
        }
    }
}

/// Trains a model on 'data' after holding out a seeded random part of it to
/// measure accuracy. Returns None if there are fewer examples than the
/// context requires.
pub fn train(data: &Dataset, ctx: &Context) -> Option<TrainedModel> {
    if data.len() < ctx.min_examples() || data.len() < 2 {
        return None;
    }
    let _timer = Timer::new("Training");

    let (train_rows, test_rows) =
        train_test_split(data.len(), ctx.test_fraction(), ctx.seed());
    let train_set = data.select(&train_rows);
    let test_set = data.select(&test_rows);

    let mut forest = RandomForest::new(ctx.n_trees(), ctx.seed());
    forest.fit(&train_set);

    let predicted: Vec<u8> = test_set
        .features
        .iter()
        .map(|f| forest.predict(f.as_slice()))
        .collect();
    let accuracy = accuracy(&predicted, &test_set.labels);

    log::debug!(
        "Trained on {} rows, tested on {} rows, accuracy {:.3}",
        train_set.len(),
        test_set.len(),
        accuracy
    );

    Some(TrainedModel {
        forest,
        accuracy,
        examples: data.len(),
    })
}

/// Remembers the last trained model and the input it was trained on.
#[derive(Default)]
pub struct Predictor {
    cache: Option<(Vec<u8>, Context, TrainedModel)>,
    fits: usize,
}

impl Predictor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the cached model.
    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    /// Returns the number of times a model was trained.
    pub fn fits(&self) -> usize {
        self.fits
    }

    pub fn evaluate(
        &mut self,
        history: &History,
        ctx: &Context,
    ) -> Evaluation {
        if history.is_empty() {
            return Evaluation::Empty;
        }

        let encoded = history.encoded();
        let data = create_features(&encoded, ctx.window());
        if data.len() < ctx.min_examples() {
            log::debug!(
                "{} examples, {} are needed to train",
                data.len(),
                ctx.min_examples()
            );
            return Evaluation::NeedMoreData {
                examples: data.len(),
                required: ctx.min_examples(),
            };
        }

        let model = match self.cache.take() {
            Some((cached, c, model)) if cached == encoded && c == *ctx => {
                log::debug!("Reusing the model of {} examples", data.len());
                model
            }
            _ => {
                let Some(model) = train(&data, ctx) else {
                    return Evaluation::NeedMoreData {
                        examples: data.len(),
                        required: ctx.min_examples().max(2),
                    };
                };
                self.fits += 1;
                model
            }
        };

        let prediction =
            live_features(&encoded, ctx.window()).map(|f| model.predict(&f));
        let evaluation = Evaluation::Trained {
            accuracy: model.accuracy(),
            examples: model.examples(),
            prediction,
        };
        self.cache = Some((encoded, *ctx, model));
        evaluation
    }
}

#[cfg(test)]
fn alternating(n: usize) -> History {
    use crate::outcome::Outcome::*;

    (0..n)
        .map(|i| if i % 2 == 0 { Player } else { Banker })
        .collect()
}

#[test]
fn test_empty_and_short() {
    let ctx = Context::default();
    let mut p = Predictor::new();
    assert_eq!(p.evaluate(&History::new(), &ctx), Evaluation::Empty);

    // 12 non-Tie outcomes make 9 examples.
    let h = alternating(12);
    assert_eq!(
        p.evaluate(&h, &ctx),
        Evaluation::NeedMoreData {
            examples: 9,
            required: 10
        }
    );
    assert_eq!(p.fits(), 0);
}

#[test]
fn test_alternating_pattern() {
    let ctx = Context::default().with_trees(20).unwrap();
    let mut p = Predictor::new();
    let h = alternating(30);
    // The last outcome is Banker, so Player follows.
    match p.evaluate(&h, &ctx) {
        Evaluation::Trained {
            accuracy,
            examples,
            prediction: Some(pred),
        } => {
            assert_eq!(examples, 27);
            assert_eq!(accuracy, 1.0);
            assert_eq!(pred.outcome, Outcome::Player);
            assert!(pred.confidence > 0.9);
            let sum: f64 = pred.probabilities.iter().sum();
            assert!((sum - 1.0).abs() < 1e-9);
        }
        other => panic!("unexpected evaluation {:?}", other),
    }
}

#[test]
fn test_cache() {
    let ctx = Context::default().with_trees(10).unwrap();
    let mut p = Predictor::new();
    let mut h = alternating(20);
    let first = p.evaluate(&h, &ctx);
    assert!(matches!(first, Evaluation::Trained { .. }));
    assert_eq!(p.fits(), 1);

    // Evaluating again reuses the model and reports the same result.
    assert_eq!(p.evaluate(&h, &ctx), first);
    assert_eq!(p.fits(), 1);

    // A Tie does not change the filtered history.
    h.record(Outcome::Tie);
    assert_eq!(p.evaluate(&h, &ctx), first);
    assert_eq!(p.fits(), 1);

    h.record(Outcome::Player);
    let second = p.evaluate(&h, &ctx);
    assert!(matches!(second, Evaluation::Trained { examples: 18, .. }));
    assert_eq!(p.fits(), 2);

    // A different context retrains.
    p.evaluate(&h, &ctx.with_seed(7));
    assert_eq!(p.fits(), 3);

    p.invalidate();
    p.evaluate(&h, &ctx.with_seed(7));
    assert_eq!(p.fits(), 4);

    // Going back to too little data never reports a stale model.
    let short = alternating(5);
    assert!(matches!(
        p.evaluate(&short, &ctx),
        Evaluation::NeedMoreData { examples: 2, .. }
    ));
}

#[test]
fn test_too_few_rows_to_split() {
    let ctx = Context::default().with_min_examples(0);
    let mut p = Predictor::new();
    // Two outcomes don't fill a window, so no example can be made.
    let h = History::parse("PB").unwrap();
    assert_eq!(
        p.evaluate(&h, &ctx),
        Evaluation::NeedMoreData {
            examples: 0,
            required: 2
        }
    );
    assert_eq!(p.fits(), 0);

    // A history of Ties alone has nothing to train on either.
    let ties = History::parse("TTT").unwrap();
    assert!(matches!(
        p.evaluate(&ties, &Context::default()),
        Evaluation::NeedMoreData { examples: 0, .. }
    ));
}
