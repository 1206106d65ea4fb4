use crate::features::Dataset;
use crate::outcome::NUM_CLASSES;
use crate::utils::metrics::argmax;

/// A trait that defines the interface for training and querying a binary
/// classifier.
pub trait Classifier {
    /// Train the model from scratch on 'data'. Any previous state is dropped.
    fn fit(&mut self, data: &Dataset);

    /// Return the probability of each class for the feature vector
    /// 'features'. The probabilities sum to one.
    #[must_use]
    fn predict_proba(&self, features: &[f64]) -> [f64; NUM_CLASSES];

    /// Return the most probable class of 'features'.
    #[must_use]
    fn predict(&self, features: &[f64]) -> u8 {
        argmax(&self.predict_proba(features)) as u8
    }
}
