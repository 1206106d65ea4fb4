//! A single recorded game result and its numeric encoding.

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// The encoded value of a Player win.
pub const PLAYER: u8 = 0;
/// The encoded value of a Banker win.
pub const BANKER: u8 = 1;
/// Number of classes the predictor chooses from. Ties are not a class.
pub const NUM_CLASSES: usize = 2;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    Player,
    Banker,
    Tie,
}

impl Outcome {
    pub const ALL: [Outcome; 3] =
        [Outcome::Player, Outcome::Banker, Outcome::Tie];

    /// Returns the class index of the outcome, or None for a Tie.
    pub fn encode(self) -> Option<u8> {
        match self {
            Outcome::Player => Some(PLAYER),
            Outcome::Banker => Some(BANKER),
            Outcome::Tie => None,
        }
    }

    /// Maps a class index back to an outcome. Anything but Player is Banker.
    pub fn from_class(class: u8) -> Outcome {
        if class == PLAYER {
            Outcome::Player
        } else {
            Outcome::Banker
        }
    }

    /// The one-letter form used by the compact history syntax.
    pub fn letter(self) -> char {
        match self {
            Outcome::Player => 'P',
            Outcome::Banker => 'B',
            Outcome::Tie => 'T',
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Outcome::Player => "Player",
            Outcome::Banker => "Banker",
            Outcome::Tie => "Tie",
        };
        f.pad(name)
    }
}

impl FromStr for Outcome {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "p" | "player" => Ok(Outcome::Player),
            "b" | "banker" => Ok(Outcome::Banker),
            "t" | "tie" => Ok(Outcome::Tie),
            _ => Err(Error::UnknownOutcome(s.trim().to_string())),
        }
    }
}

#[test]
fn test_encode() {
    assert_eq!(Outcome::Player.encode(), Some(0));
    assert_eq!(Outcome::Banker.encode(), Some(1));
    assert_eq!(Outcome::Tie.encode(), None);
    assert_eq!(Outcome::from_class(0), Outcome::Player);
    assert_eq!(Outcome::from_class(1), Outcome::Banker);
}

#[test]
fn test_parse() {
    assert_eq!("P".parse::<Outcome>().unwrap(), Outcome::Player);
    assert_eq!(" banker ".parse::<Outcome>().unwrap(), Outcome::Banker);
    assert_eq!("TIE".parse::<Outcome>().unwrap(), Outcome::Tie);
    assert!("x".parse::<Outcome>().is_err());
    assert_eq!(format!("{:<8}|", Outcome::Tie), "Tie     |");
}
