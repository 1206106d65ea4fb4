//! This module contains the classifiers that predict the next outcome from a
//! feature vector.

pub mod forest;
pub mod model;
pub mod tree;

pub use forest::RandomForest;
pub use model::Classifier;
pub use tree::DecisionTree;
