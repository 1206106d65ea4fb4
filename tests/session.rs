use arashi::history::History;
use arashi::outcome::Outcome::{self, *};
use arashi::predictor::Evaluation;
use arashi::session::Session;
use arashi::simulate::simulate;
use arashi::Context;

fn ctx() -> Context {
    Context::default().with_trees(15).unwrap()
}

#[test]
fn test_fresh_session() {
    let mut s = Session::new(ctx());
    assert_eq!(s.evaluate(), Evaluation::Empty);

    s.record(Tie);
    assert_eq!(
        s.evaluate(),
        Evaluation::NeedMoreData {
            examples: 0,
            required: 10
        }
    );
}

#[test]
fn test_training_threshold() {
    let mut s = Session::new(ctx());
    // Twelve non-Tie outcomes make nine examples, however many Ties follow.
    s.extend((0..12).map(|i| if i % 3 == 0 { Banker } else { Player }));
    s.extend(std::iter::repeat(Tie).take(50));
    assert!(matches!(
        s.evaluate(),
        Evaluation::NeedMoreData { examples: 9, .. }
    ));
    assert_eq!(s.predictor().fits(), 0);

    s.record(Player);
    match s.evaluate() {
        Evaluation::Trained {
            examples,
            prediction,
            accuracy,
        } => {
            assert_eq!(examples, 10);
            assert!((0.0..=1.0).contains(&accuracy));
            let p = prediction.unwrap();
            assert!(p.outcome != Tie);
            assert!(p.confidence >= 0.5 && p.confidence <= 1.0);
        }
        other => panic!("unexpected evaluation {:?}", other),
    }
}

#[test]
fn test_reset_matches_fresh_session() {
    let outcomes: Vec<Outcome> = simulate(60, 3);
    let mut fresh = Session::new(ctx());
    fresh.extend(outcomes.iter().copied());
    let expected = fresh.evaluate();

    let mut s = Session::new(ctx());
    s.extend(simulate(80, 9));
    s.evaluate();
    s.reset();
    assert!(s.history().is_empty());
    assert_eq!(s.evaluate(), Evaluation::Empty);

    s.extend(outcomes.iter().copied());
    assert_eq!(s.evaluate(), expected);
}

#[test]
fn test_deterministic() {
    let history = History::parse("PBBPBPPBBBPTPBPBBPPBTBPBBP").unwrap();
    let mut a = Session::with_history(ctx(), history.clone());
    let mut b = Session::with_history(ctx(), history);
    assert_eq!(a.evaluate(), b.evaluate());
    assert!(matches!(a.evaluate(), Evaluation::Trained { .. }));
}

#[test]
fn test_streaks_predict_the_streak() {
    // Long runs of the same side: after three Bankers another Banker follows.
    let mut s = Session::new(Context::default().with_trees(30).unwrap());
    for _ in 0..8 {
        s.extend([Banker; 6]);
        s.extend([Player; 6]);
    }
    s.extend([Banker; 3]);
    match s.evaluate() {
        Evaluation::Trained {
            prediction: Some(p),
            ..
        } => assert_eq!(p.outcome, Banker),
        other => panic!("unexpected evaluation {:?}", other),
    }
}
