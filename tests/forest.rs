use arashi::features::create_features;
use arashi::history::History;
use arashi::models::{Classifier, DecisionTree, RandomForest};
use arashi::predictor::train;
use arashi::simulate::simulate;
use arashi::utils::metrics::accuracy;
use arashi::Context;

fn simulated_data(n: usize, seed: u64) -> arashi::features::Dataset {
    let history: History = simulate(n, seed).into_iter().collect();
    create_features(&history.encoded(), 3)
}

#[test]
fn test_probabilities_are_normalized() {
    let data = simulated_data(300, 4);
    let mut forest = RandomForest::new(40, 42);
    forest.fit(&data);
    assert_eq!(forest.n_trees(), 40);
    for f in &data.features {
        let p = forest.predict_proba(f.as_slice());
        assert!(p.iter().all(|v| (0.0..=1.0).contains(v)));
        assert!((p[0] + p[1] - 1.0).abs() < 1e-9);
    }
}

#[test]
fn test_fully_grown_tree_fits_consistent_data() {
    // Rows with equal features but different labels can't be separated, so
    // only check rows whose window appears with a single label.
    let data = simulated_data(200, 8);
    let mut tree = DecisionTree::new(None, 0);
    tree.fit(&data);
    let predicted: Vec<u8> = data
        .features
        .iter()
        .map(|f| tree.predict(f.as_slice()))
        .collect();
    for (i, f) in data.features.iter().enumerate() {
        let consistent = data
            .features
            .iter()
            .zip(data.labels.iter())
            .filter(|(g, _)| *g == f)
            .all(|(_, l)| *l == data.labels[i]);
        if consistent {
            assert_eq!(predicted[i], data.labels[i]);
        }
    }
}

#[test]
fn test_random_outcomes_are_hard_to_predict() {
    // Independent outcomes carry no signal, so accuracy stays near chance.
    let data = simulated_data(2_000, 21);
    let ctx = Context::default().with_trees(25).unwrap();
    let model = train(&data, &ctx).unwrap();
    assert!(model.accuracy() > 0.3 && model.accuracy() < 0.7);
    assert_eq!(model.examples(), data.len());
}

#[test]
fn test_train_requires_enough_examples() {
    let data = simulated_data(8, 1);
    assert!(data.len() < 10);
    assert!(train(&data, &Context::default()).is_none());
}

#[test]
fn test_repeating_pattern_is_learned() {
    // The sequence P P B repeats, so every window determines the next value.
    let history = History::parse(&"PPB".repeat(20)).unwrap();
    let data = create_features(&history.encoded(), 3);
    let mut forest = RandomForest::new(30, 5);
    forest.fit(&data);
    let predicted: Vec<u8> = data
        .features
        .iter()
        .map(|f| forest.predict(f.as_slice()))
        .collect();
    assert_eq!(accuracy(&predicted, &data.labels), 1.0);
}
