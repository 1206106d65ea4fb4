//! The append-only record of the outcomes of one session.

use crate::outcome::Outcome;
use crate::Error;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct History {
    outcomes: Vec<Outcome>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a history from either a compact string of letters ("PBPTB") or
    /// a list of words separated by commas or whitespace ("player, tie b").
    pub fn parse(text: &str) -> Result<Self, Error> {
        let mut history = History::new();
        let is_sep = |c: char| c == ',' || c.is_whitespace();
        for token in text.split(is_sep).filter(|t| !t.is_empty()) {
            // A token made of single letters only is the compact form.
            let compact = token.len() > 1
                && token
                    .chars()
                    .all(|c| matches!(c.to_ascii_lowercase(), 'p' | 'b' | 't'));
            if compact {
                for c in token.chars() {
                    history.record(c.to_string().parse()?);
                }
            } else {
                history.record(token.parse()?);
            }
        }
        Ok(history)
    }

    /// Append one outcome.
    pub fn record(&mut self, outcome: Outcome) {
        self.outcomes.push(outcome);
    }

    /// Remove all of the outcomes.
    pub fn reset(&mut self) {
        self.outcomes.clear();
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter()
    }

    pub fn as_slice(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// Returns the last 'n' outcomes together with their position in the
    /// history.
    pub fn tail(
        &self,
        n: usize,
    ) -> impl Iterator<Item = (usize, Outcome)> + '_ {
        let start = self.outcomes.len().saturating_sub(n);
        self.outcomes[start..]
            .iter()
            .enumerate()
            .map(move |(i, o)| (start + i, *o))
    }

    /// Returns the encoded history with the Ties removed.
    pub fn encoded(&self) -> Vec<u8> {
        self.outcomes.iter().filter_map(|o| o.encode()).collect()
    }

    /// Returns the number of Player, Banker and Tie outcomes, in that order.
    pub fn counts(&self) -> [usize; 3] {
        let mut counts = [0; 3];
        for o in &self.outcomes {
            let idx = match o {
                Outcome::Player => 0,
                Outcome::Banker => 1,
                Outcome::Tie => 2,
            };
            counts[idx] += 1;
        }
        counts
    }
}

impl Extend<Outcome> for History {
    fn extend<I: IntoIterator<Item = Outcome>>(&mut self, iter: I) {
        self.outcomes.extend(iter);
    }
}

impl FromIterator<Outcome> for History {
    fn from_iter<I: IntoIterator<Item = Outcome>>(iter: I) -> Self {
        Self {
            outcomes: iter.into_iter().collect(),
        }
    }
}

#[test]
fn test_record_and_reset() {
    use Outcome::*;

    let mut h = History::new();
    assert!(h.is_empty());
    h.record(Player);
    h.record(Tie);
    h.record(Banker);
    assert_eq!(h.len(), 3);
    assert_eq!(h.as_slice(), &[Player, Tie, Banker]);
    h.reset();
    assert!(h.is_empty());
    assert_eq!(h, History::new());
}

#[test]
fn test_encoded_drops_ties() {
    use Outcome::*;

    let h: History = [Tie, Player, Tie, Tie, Banker, Player, Tie]
        .into_iter()
        .collect();
    assert_eq!(h.encoded(), vec![0, 1, 0]);
    assert_eq!(h.counts(), [2, 1, 4]);
}

#[test]
fn test_tail() {
    use Outcome::*;

    let h: History = [Player, Banker, Tie, Player, Player, Banker, Tie]
        .into_iter()
        .collect();
    let tail: Vec<_> = h.tail(5).collect();
    assert_eq!(
        tail,
        vec![(2, Tie), (3, Player), (4, Player), (5, Banker), (6, Tie)]
    );

    let short: History = [Banker].into_iter().collect();
    assert_eq!(short.tail(5).collect::<Vec<_>>(), vec![(0, Banker)]);
    assert_eq!(History::new().tail(5).count(), 0);
}

#[test]
fn test_parse() {
    use Outcome::*;

    let h = History::parse("PBpt").unwrap();
    assert_eq!(h.as_slice(), &[Player, Banker, Player, Tie]);

    let h = History::parse("player, banker tie,b").unwrap();
    assert_eq!(h.as_slice(), &[Player, Banker, Tie, Banker]);

    assert!(History::parse("").unwrap().is_empty());
    assert!(History::parse("PBX").is_err());
    assert!(History::parse("dragon").is_err());
}
