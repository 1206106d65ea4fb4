#![no_main]

use arashi::features::{create_features, live_features, NUM_STATS};
use arashi::history::History;
use arashi::outcome::Outcome;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    let window = 2 + (data[0] % 6) as usize;
    let history: History = data[1..]
        .iter()
        .map(|b| Outcome::ALL[(*b % 3) as usize])
        .collect();
    let encoded = history.encoded();
    let dataset = create_features(&encoded, window);

    assert_eq!(dataset.len(), encoded.len().saturating_sub(window));
    for (i, f) in dataset.features.iter().enumerate() {
        assert_eq!(f.len(), window + NUM_STATS);
        assert_eq!(dataset.labels[i], encoded[i + window]);
        let stats = f.stats();
        assert!(stats[0] >= 0.0 && stats[0] <= 1.0);
        assert!(stats[1] >= 1.0 && stats[1] <= window as f64);
        assert!(stats[2] >= 0.0 && stats[2] <= 1.0);
    }
    let live = live_features(&encoded, window);
    assert_eq!(live.is_some(), encoded.len() >= window);
});
