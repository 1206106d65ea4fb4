//! This is the interactive command line tool. It asks the access gate for a
//! key, then reads game results from the terminal and prints the prediction
//! of the next outcome after each one.

extern crate clap;
extern crate env_logger;
extern crate log;

use arashi::app::{render_pass, run};
use arashi::gate::{Gate, KeyGate, OpenGate};
use arashi::history::History;
use arashi::render::Style;
use arashi::session::Session;
use arashi::simulate::simulate;
use arashi::Context;
use clap::{value_parser, Arg, ArgAction, Command};

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::exit;

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", msg);
    exit(1);
}

fn main() {
    let matches = Command::new("arashi")
        .version("0.0.1")
        .about("Predicts the next Player/Banker outcome from the results")
        .arg(
            Arg::new("window")
                .long("window")
                .value_name("N")
                .help("Number of outcomes in the feature window")
                .value_parser(value_parser!(usize))
                .default_value("3"),
        )
        .arg(
            Arg::new("trees")
                .long("trees")
                .value_name("N")
                .help("Number of trees in the forest")
                .value_parser(value_parser!(usize))
                .default_value("200"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("N")
                .help("Seed of the train/test split and the forest")
                .value_parser(value_parser!(u64))
                .default_value("42"),
        )
        .arg(
            Arg::new("keys")
                .long("keys")
                .value_name("FILE")
                .help("Key file with the SHA-256 digests of the access keys")
                .num_args(1),
        )
        .arg(
            Arg::new("digest")
                .long("digest")
                .value_name("KEY")
                .help("Print the key file line of KEY and exit")
                .num_args(1),
        )
        .arg(
            Arg::new("history")
                .long("history")
                .value_name("RESULTS")
                .help("Initial results, such as \"PBBPT\"")
                .num_args(1),
        )
        .arg(
            Arg::new("simulate")
                .long("simulate")
                .value_name("N")
                .help("Append N simulated results to the history")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("once")
                .long("once")
                .help("Print one page and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("plain")
                .long("plain")
                .help("Disable colors")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    env_logger::builder().format_timestamp(None).init();

    if let Some(key) = matches.get_one::<String>("digest") {
        println!("{}", KeyGate::digest(key));
        return;
    }

    let window = *matches.get_one::<usize>("window").unwrap_or(&3);
    let trees = *matches.get_one::<usize>("trees").unwrap_or(&200);
    let seed = *matches.get_one::<u64>("seed").unwrap_or(&42);
    let ctx = Context::new(window, trees, seed).unwrap_or_else(|e| fail(e));

    // The gate must be in place before anything else is shown.
    let mut gate: Box<dyn Gate> = match matches.get_one::<String>("keys") {
        Some(path) => {
            let path = PathBuf::from(path);
            let gate = KeyGate::load(&path).unwrap_or_else(|e| fail(e));
            Box::new(gate)
        }
        None => Box::new(OpenGate),
    };

    let history = match matches.get_one::<String>("history") {
        Some(text) => History::parse(text).unwrap_or_else(|e| fail(e)),
        None => History::new(),
    };

    let style = if matches.get_flag("plain") || !io::stdout().is_terminal() {
        Style::Plain
    } else {
        Style::Color
    };

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match gate.authorize(&mut input, &mut out) {
        Ok(true) => {}
        Ok(false) => exit(1),
        Err(e) => fail(e),
    }

    let mut session = Session::with_history(ctx, history);
    if let Some(n) = matches.get_one::<usize>("simulate") {
        session.extend(simulate(*n, seed));
        log::info!("Appended {} simulated results", n);
    }

    if let Err(e) = render_pass(&mut session, &*gate, style, &mut out) {
        fail(e);
    }
    if matches.get_flag("once") {
        return;
    }

    if let Err(e) = run(&mut input, &mut session, &*gate, style, &mut out) {
        fail(e);
    }
}
