use arashi::features::{
    alternation_ratio, create_features, live_features, streak,
};
use arashi::history::History;
use arashi::outcome::Outcome::*;

#[test]
fn test_short_history_has_no_examples() {
    for text in ["", "P", "PB", "PBP", "PTTBTP", "TTTT"] {
        let h = History::parse(text).unwrap();
        assert!(create_features(&h.encoded(), 3).is_empty(), "{}", text);
    }
    // Four non-Tie outcomes are the minimum.
    let h = History::parse("PTBTPTB").unwrap();
    assert_eq!(create_features(&h.encoded(), 3).len(), 1);
}

#[test]
fn test_single_example() {
    let h: History = [Player, Banker, Player, Banker].into_iter().collect();
    let data = create_features(&h.encoded(), 3);
    assert_eq!(data.len(), 1);
    assert_eq!(data.labels, vec![1]);

    let f = data.features[0].as_slice();
    assert_eq!(f.len(), 6);
    assert_eq!(&f[..3], &[0.0, 1.0, 0.0]);
    assert!((f[3] - 1.0 / 3.0).abs() < 1e-12);
    assert_eq!(f[4], 1.0);
    assert_eq!(f[5], 1.0);
}

#[test]
fn test_ties_do_not_shift_windows() {
    let plain = History::parse("PBBPBPPB").unwrap();
    let tied = History::parse("TPBTTBPTBPPTBT").unwrap();
    assert_eq!(plain.encoded(), tied.encoded());
    assert_eq!(
        create_features(&plain.encoded(), 3),
        create_features(&tied.encoded(), 3)
    );
    let data = create_features(&tied.encoded(), 3);
    assert!(data.labels.iter().all(|l| *l <= 1));
    for f in &data.features {
        assert!(f.as_slice()[..3].iter().all(|v| *v == 0.0 || *v == 1.0));
    }
}

#[test]
fn test_labels_follow_windows() {
    let encoded = [0, 0, 1, 1, 1, 0, 1];
    let data = create_features(&encoded, 3);
    assert_eq!(data.len(), 4);
    assert_eq!(data.labels, vec![1, 1, 0, 1]);
    // The window of the last example is [1, 1, 0].
    let last = data.features[3].as_slice();
    assert_eq!(&last[..3], &[1.0, 1.0, 0.0]);
    assert_eq!(last[4], 1.0);
    assert_eq!(last[5], 0.5);
}

#[test]
fn test_streak_and_alternation() {
    assert_eq!(streak(&[1, 1, 0]), 1);
    assert_eq!(streak(&[0, 1, 1]), 2);
    assert_eq!(streak(&[0, 1, 0]), 1);
    assert_eq!(alternation_ratio(&[0, 1, 0]), 1.0);
    assert_eq!(alternation_ratio(&[1, 1, 1]), 0.0);
}

#[test]
fn test_live_features() {
    assert!(live_features(&[0, 1], 3).is_none());
    let f = live_features(&[1, 1, 0, 1, 1], 3).unwrap();
    assert_eq!(&f.as_slice()[..3], &[0.0, 1.0, 1.0]);
    assert_eq!(f.stats()[1], 2.0);

    // Wider windows produce wider vectors.
    let f = live_features(&[1, 1, 0, 1, 1], 5).unwrap();
    assert_eq!(f.len(), 8);
    assert_eq!(f.stats()[2], 0.5);
}
