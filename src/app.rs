//! The command loop of the interactive tool. Every command that changes the
//! session triggers one full render pass: the page of the new evaluation
//! followed by the admin panel of the gate.

use std::io::{self, BufRead, Write};

use crate::gate::Gate;
use crate::outcome::Outcome;
use crate::render::{self, Style};
use crate::session::Session;

/// A command typed at the prompt.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Record(Outcome),
    Reset,
    Counts,
    Help,
    Quit,
}

/// What the loop does after a command.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Continue,
    Quit,
}

/// Parse one line of input. Returns None for unknown commands.
pub fn parse_action(line: &str) -> Option<Action> {
    match line.trim().to_ascii_lowercase().as_str() {
        "r" | "reset" => Some(Action::Reset),
        "u" | "counts" => Some(Action::Counts),
        "h" | "help" | "?" => Some(Action::Help),
        "q" | "quit" | "exit" => Some(Action::Quit),
        other => other.parse::<Outcome>().ok().map(Action::Record),
    }
}

/// Evaluate the session and write the whole page, followed by the admin
/// panel of the gate.
pub fn render_pass(
    session: &mut Session,
    gate: &dyn Gate,
    style: Style,
    out: &mut dyn Write,
) -> io::Result<()> {
    let evaluation = session.evaluate();
    render::page(out, session.history(), &evaluation, style)?;
    writeln!(out)?;
    writeln!(out, "{}", "-".repeat(44))?;
    gate.admin_panel(out)?;
    out.flush()
}

/// Execute the command on 'line'. Blank lines do nothing and unknown
/// commands only print a warning.
pub fn handle(
    line: &str,
    session: &mut Session,
    gate: &dyn Gate,
    style: Style,
    out: &mut dyn Write,
) -> io::Result<Step> {
    if line.trim().is_empty() {
        return Ok(Step::Continue);
    }
    match parse_action(line) {
        Some(Action::Record(outcome)) => {
            session.record(outcome);
            render_pass(session, gate, style, out)?;
        }
        Some(Action::Reset) => {
            session.reset();
            render_pass(session, gate, style, out)?;
        }
        Some(Action::Counts) => render::counts(out, session.history())?,
        Some(Action::Help) => render::help(out)?,
        Some(Action::Quit) => return Ok(Step::Quit),
        None => writeln!(
            out,
            "Unknown command '{}'. Type h for help.",
            line.trim()
        )?,
    }
    Ok(Step::Continue)
}

/// Read commands from 'input' until it ends or the user quits.
pub fn run(
    input: &mut dyn BufRead,
    session: &mut Session,
    gate: &dyn Gate,
    style: Style,
    out: &mut dyn Write,
) -> io::Result<()> {
    render::help(out)?;
    let mut line = String::new();
    loop {
        write!(out, "> ")?;
        out.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }
        if handle(&line, session, gate, style, out)? == Step::Quit {
            return Ok(());
        }
    }
}

#[cfg(test)]
fn test_session() -> Session {
    let ctx = crate::Context::default().with_trees(10).unwrap();
    Session::new(ctx)
}

#[cfg(test)]
fn run_text(input: &str, session: &mut Session, gate: &dyn Gate) -> String {
    let mut out = Vec::new();
    let mut input = io::Cursor::new(input.to_string());
    run(&mut input, session, gate, Style::Plain, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_parse_action() {
    assert_eq!(parse_action("p"), Some(Action::Record(Outcome::Player)));
    assert_eq!(parse_action("B\n"), Some(Action::Record(Outcome::Banker)));
    assert_eq!(parse_action("  Tie "), Some(Action::Record(Outcome::Tie)));
    assert_eq!(parse_action("r"), Some(Action::Reset));
    assert_eq!(parse_action("U"), Some(Action::Counts));
    assert_eq!(parse_action("h"), Some(Action::Help));
    assert_eq!(parse_action("QUIT"), Some(Action::Quit));
    assert_eq!(parse_action("q"), Some(Action::Quit));
    assert_eq!(parse_action("x"), None);
    assert_eq!(parse_action(""), None);
}

#[test]
fn test_unknown_and_blank_commands_do_not_render() {
    use crate::gate::OpenGate;

    let mut session = test_session();
    let mut out = Vec::new();
    let step = handle("zz\n", &mut session, &OpenGate, Style::Plain, &mut out);
    assert_eq!(step.unwrap(), Step::Continue);
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Unknown command 'zz'"));
    assert!(!text.contains("ARASHI"));
    assert!(!text.contains("Admin:"));
    assert!(session.history().is_empty());

    let mut out = Vec::new();
    let step = handle("  \n", &mut session, &OpenGate, Style::Plain, &mut out);
    assert_eq!(step.unwrap(), Step::Continue);
    assert!(out.is_empty());

    let mut out = Vec::new();
    let step = handle("q", &mut session, &OpenGate, Style::Plain, &mut out);
    assert_eq!(step.unwrap(), Step::Quit);
    assert!(out.is_empty());
}

#[test]
fn test_every_pass_ends_with_the_admin_panel() {
    use crate::gate::{KeyGate, OpenGate};
    use std::path::Path;

    let keys = format!("{}\n", KeyGate::digest("alpha"));
    let key_gate = KeyGate::parse(&keys, Path::new("keys.txt")).unwrap();
    let gates: [(&dyn Gate, &str); 2] = [
        (&OpenGate as &dyn Gate, "Admin: no access keys"),
        (&key_gate as &dyn Gate, "Admin: 1 active key(s)"),
    ];

    for (gate, panel) in gates {
        let mut session = test_session();
        let text = run_text("p\nb\nzz\nt\nr\nb\nq\np\n", &mut session, gate);
        let passes: Vec<&str> = text.split("~~ ARASHI ~~").skip(1).collect();
        // p, b, t, r and b render. The unknown command does not, and
        // nothing after the quit runs.
        assert_eq!(passes.len(), 5);
        for pass in passes {
            assert!(pass.contains(panel), "missing panel in {}", pass);
        }
        assert_eq!(session.history().len(), 1);
    }
}

#[test]
fn test_reset_renders_a_fresh_page() {
    use crate::gate::OpenGate;
    use crate::simulate::simulate;

    let mut session = test_session();
    session.extend(simulate(40, 2));
    let mut out = Vec::new();
    handle("r", &mut session, &OpenGate, Style::Plain, &mut out).unwrap();

    let mut fresh = Vec::new();
    render_pass(&mut test_session(), &OpenGate, Style::Plain, &mut fresh)
        .unwrap();
    assert_eq!(out, fresh);
    assert!(String::from_utf8(out)
        .unwrap()
        .contains("Enter a result to begin."));
}

#[test]
fn test_run_stops_at_end_of_input() {
    use crate::gate::OpenGate;

    let mut session = test_session();
    let text = run_text("p\nb", &mut session, &OpenGate);
    assert!(text.starts_with("Commands:"));
    assert_eq!(session.history().len(), 2);
}
