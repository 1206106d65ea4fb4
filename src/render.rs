//! Writes the page of a session to a terminal or any other text sink.

use std::io::{self, Write};

use crossterm::style::Stylize;

use crate::history::History;
use crate::outcome::Outcome;
use crate::predictor::{Evaluation, Prediction};

/// Number of history rows shown on the page.
pub const TAIL_ROWS: usize = 5;
/// Width of the confidence bar in columns.
pub const BAR_WIDTH: usize = 40;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Style {
    /// Plain text, for pipes and tests.
    Plain,
    /// ANSI colors.
    Color,
}

fn paint(text: &str, outcome: Outcome, style: Style) -> String {
    if style == Style::Plain {
        return text.to_string();
    }
    match outcome {
        Outcome::Player => text.blue().bold().to_string(),
        Outcome::Banker => text.red().bold().to_string(),
        Outcome::Tie => text.green().bold().to_string(),
    }
}

fn warn(out: &mut dyn Write, msg: &str, style: Style) -> io::Result<()> {
    match style {
        Style::Plain => writeln!(out, "[!] {}", msg),
        Style::Color => writeln!(out, "{} {}", "[!]".yellow().bold(), msg),
    }
}

/// Returns a bar of BAR_WIDTH columns that is filled to 'percent'.
pub fn progress_bar(percent: usize) -> String {
    let percent = percent.min(100);
    let filled = BAR_WIDTH * percent / 100;
    let mut bar = String::with_capacity(BAR_WIDTH + 2);
    bar.push('[');
    for i in 0..BAR_WIDTH {
        bar.push(if i < filled { '#' } else { '.' });
    }
    bar.push(']');
    bar
}

pub fn title(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "{:^44}", "~~ ARASHI ~~")?;
    writeln!(out, "{}", "-".repeat(44))
}

/// Print the last TAIL_ROWS outcomes with their position in the history.
pub fn history_table(out: &mut dyn Write, history: &History) -> io::Result<()> {
    writeln!(out, "History (last {})", TAIL_ROWS)?;
    writeln!(out, "{:>6}  Result", "#")?;
    for (pos, outcome) in history.tail(TAIL_ROWS) {
        writeln!(out, "{:>6}  {}", pos, outcome)?;
    }
    Ok(())
}

pub fn prediction_panel(
    out: &mut dyn Write,
    prediction: &Prediction,
    style: Style,
) -> io::Result<()> {
    let label = prediction.outcome.to_string();
    let percent = prediction.confidence * 100.0;
    writeln!(out)?;
    writeln!(out, "{:>18} {}", "->", paint(&label, prediction.outcome, style))?;
    writeln!(out, "  {}", progress_bar(percent as usize))?;
    writeln!(out, "  Confidence: {:.1}%", percent)
}

/// Write the whole page of one evaluation pass.
pub fn page(
    out: &mut dyn Write,
    history: &History,
    evaluation: &Evaluation,
    style: Style,
) -> io::Result<()> {
    title(out)?;

    match evaluation {
        Evaluation::Empty => {
            writeln!(out, "Enter a result to begin.")?;
        }
        Evaluation::NeedMoreData { examples, required } => {
            history_table(out, history)?;
            warn(
                out,
                &format!(
                    "Not enough data to train the model \
                     ({} of at least {} examples).",
                    examples, required
                ),
                style,
            )?;
        }
        Evaluation::Trained {
            accuracy,
            examples,
            prediction,
        } => {
            history_table(out, history)?;
            writeln!(
                out,
                "Model trained on {} examples. Test accuracy: {:.2}",
                examples, accuracy
            )?;
            writeln!(
                out,
                "(Ties are not used. The choice is Player or Banker.)"
            )?;
            match prediction {
                Some(p) => prediction_panel(out, p, style)?,
                None => {
                    let msg = "Not enough data to make a prediction.";
                    warn(out, msg, style)?
                }
            }
        }
    }
    Ok(())
}

/// Print the number of each outcome in the history.
pub fn counts(out: &mut dyn Write, history: &History) -> io::Result<()> {
    let counts = history.counts();
    for (outcome, count) in Outcome::ALL.iter().zip(counts.iter()) {
        writeln!(out, "{:<8}{:>6}", outcome, count)?;
    }
    writeln!(out, "{:<8}{:>6}", "Total", history.len())
}

pub fn help(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "Commands:")?;
    writeln!(out, "  p  record a Player win")?;
    writeln!(out, "  b  record a Banker win")?;
    writeln!(out, "  t  record a Tie")?;
    writeln!(out, "  r  reset the history")?;
    writeln!(out, "  u  show the outcome counts")?;
    writeln!(out, "  h  show this help")?;
    writeln!(out, "  q  quit")
}

#[cfg(test)]
fn render(history: &History, evaluation: &Evaluation) -> String {
    let mut buf = Vec::new();
    page(&mut buf, history, evaluation, Style::Plain).unwrap();
    String::from_utf8(buf).unwrap()
}

#[test]
fn test_progress_bar() {
    assert_eq!(progress_bar(0), format!("[{}]", ".".repeat(40)));
    assert_eq!(progress_bar(100), format!("[{}]", "#".repeat(40)));
    assert_eq!(progress_bar(250), progress_bar(100));
    assert_eq!(progress_bar(50).matches('#').count(), 20);
}

#[test]
fn test_empty_page() {
    let text = render(&History::new(), &Evaluation::Empty);
    assert!(text.contains("Enter a result to begin."));
    assert!(!text.contains("History"));
}

#[test]
fn test_need_more_data_page() {
    let history = History::parse("PBPBPBT").unwrap();
    let eval = Evaluation::NeedMoreData {
        examples: 3,
        required: 10,
    };
    let text = render(&history, &eval);
    assert!(text.contains("3 of at least 10"));
    // Only the last five rows are listed.
    assert!(!text.contains("     1  Banker"));
    assert!(text.contains("     2  Player"));
    assert!(text.contains("     6  Tie"));
}

#[test]
fn test_prediction_page() {
    let history = History::parse("PB").unwrap();
    let eval = Evaluation::Trained {
        accuracy: 0.6666,
        examples: 12,
        prediction: Some(Prediction {
            outcome: Outcome::Banker,
            confidence: 0.735,
            probabilities: [0.265, 0.735],
        }),
    };
    let text = render(&history, &eval);
    assert!(text.contains("Test accuracy: 0.67"));
    assert!(text.contains("-> Banker"));
    assert!(text.contains("Confidence: 73.5%"));
    assert!(text.contains(&progress_bar(73)));

    let eval = Evaluation::Trained {
        accuracy: 0.5,
        examples: 12,
        prediction: None,
    };
    let text = render(&history, &eval);
    assert!(text.contains("Not enough data to make a prediction."));
}

#[test]
fn test_counts() {
    let mut buf = Vec::new();
    counts(&mut buf, &History::parse("PPBT").unwrap()).unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert!(text.contains("Player       2"));
    assert!(text.contains("Total        4"));
}
