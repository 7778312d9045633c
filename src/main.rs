use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use twentyfour::app::App;
use twentyfour::config::Config;
use twentyfour::engine::Difficulty;
use twentyfour::engine::dataset::PuzzleDataset;
use twentyfour::logging;
use twentyfour::preferences::{ColorScheme, Language};
use twentyfour::session::history::HistoryEntry;
use twentyfour::store::json_store::JsonStore;

#[derive(Parser)]
#[command(name = "twentyfour", version, about = "Deal four cards, make 24")]
struct Cli {
    #[arg(long, help = "Seed for reproducible deals")]
    seed: Option<u64>,

    #[arg(long, help = "Number of recent hands to avoid repeating")]
    max_recent: Option<usize>,

    #[arg(long, help = "Number of hands kept in the history")]
    max_history: Option<usize>,

    #[arg(long, help = "Directory holding saved preferences")]
    data_dir: Option<PathBuf>,

    #[arg(long, help = "Check every bundled solution and exit")]
    verify: bool,

    #[arg(long, help = "Write the effective configuration to the config file and exit")]
    init_config: bool,

    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase log verbosity")]
    verbose: u8,
}

#[derive(Debug, PartialEq)]
enum Command {
    Deal,
    Solution,
    History,
    Filter,
    Toggle(Difficulty),
    Clear,
    Scheme(ColorScheme),
    Language(Language),
    Help,
    Quit,
}

impl Command {
    fn parse(line: &str) -> Result<Self, String> {
        let mut parts = line.split_whitespace();
        let name = parts.next().unwrap_or("deal");
        let arg = parts.next();
        if let Some(extra) = parts.next() {
            return Err(format!("unexpected argument '{extra}' for '{name}'"));
        }
        match (name, arg) {
            ("d" | "deal", None) => Ok(Command::Deal),
            ("s" | "solution", None) => Ok(Command::Solution),
            ("h" | "history", None) => Ok(Command::History),
            ("f" | "filter", None) => Ok(Command::Filter),
            ("c" | "clear", None) => Ok(Command::Clear),
            ("help" | "?", None) => Ok(Command::Help),
            ("q" | "quit" | "exit", None) => Ok(Command::Quit),
            ("t" | "toggle", Some(tag)) => Difficulty::from_key(tag)
                .map(Command::Toggle)
                .ok_or_else(|| format!("unknown difficulty '{tag}'")),
            ("scheme", Some(tag)) => ColorScheme::from_key(tag)
                .map(Command::Scheme)
                .ok_or_else(|| format!("unknown color scheme '{tag}'")),
            ("lang", Some(tag)) => Language::from_key(tag)
                .map(Command::Language)
                .ok_or_else(|| format!("unknown language '{tag}'")),
            ("t" | "toggle" | "scheme" | "lang", None) => Err(format!("'{name}' needs an argument")),
            _ => Err(format!("unknown command '{}'", line.trim())),
        }
    }
}

const HELP: &str = "\
commands:
  d, deal            deal the next hand (also: empty line)
  s, solution        show the solution for the current hand
  h, history         list recent hands
  f, filter          show which difficulties are enabled
  t, toggle <level>  enable/disable easy, medium, hard or hardest
  c, clear           clear the history
  scheme <name>      system, light or dark
  lang <tag>         system, en, zh or ja
  q, quit            leave";

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = Config::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "unreadable config file, using defaults");
        Config::default()
    });
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(n) = cli.max_recent {
        config.max_recent = n;
    }
    if let Some(n) = cli.max_history {
        config.max_history = n;
    }
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir.to_string_lossy().to_string();
    }
    config.normalize();

    if cli.init_config {
        config.save()?;
        println!("wrote {}", Config::config_path().display());
        return Ok(ExitCode::SUCCESS);
    }

    if cli.verify {
        return verify_dataset();
    }

    let store = JsonStore::with_base_dir(config.data_dir())?;
    let mut app = App::new(config, Box::new(store))?;
    repl(&mut app, io::stdin().lock(), io::stdout().lock())?;
    Ok(ExitCode::SUCCESS)
}

fn verify_dataset() -> Result<ExitCode> {
    let dataset = PuzzleDataset::embedded()?;
    let issues = dataset.verify();
    for issue in &issues {
        println!("#{} {:?}: {:?}", issue.index, issue.solution, issue.problem);
    }
    let counts = dataset.count_by_difficulty();
    let summary: Vec<String> = counts.iter().map(|(d, n)| format!("{d}={n}")).collect();
    println!(
        "{} puzzles ({}), {} issue(s)",
        dataset.len(),
        summary.join(", "),
        issues.len()
    );
    Ok(if issues.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn repl(app: &mut App, input: impl BufRead, mut out: impl Write) -> Result<()> {
    writeln!(out, "Make 24 from the four cards. Type 'help' for commands.")?;
    print_hand(app, &mut out)?;

    for line in input.lines() {
        let line = line?;
        match Command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => handle_command(app, command, &mut out)?,
            Err(msg) => writeln!(out, "{msg}")?,
        }
    }
    Ok(())
}

fn handle_command(app: &mut App, command: Command, out: &mut impl Write) -> Result<()> {
    match command {
        Command::Deal => print_hand(app, out)?,
        Command::Solution => {
            if app.current_puzzle().is_some() {
                writeln!(out, "solution: {}", app.formatted_solution())?;
            } else {
                writeln!(out, "nothing dealt yet")?;
            }
        }
        Command::History => {
            writeln!(
                out,
                "{} hand(s) played, showing the last {}",
                app.total_hands_count(),
                app.history().len()
            )?;
            for entry in app.history().entries() {
                writeln!(out, "  {}", history_line(entry))?;
            }
        }
        Command::Filter => {
            let tags: Vec<&str> = app.filter().selected().iter().map(|d| d.to_key()).collect();
            writeln!(out, "enabled: {}", tags.join(", "))?;
        }
        Command::Toggle(d) => {
            if app.toggle_difficulty(d) {
                let state = if app.filter().is_selected(d) { "on" } else { "off" };
                writeln!(out, "{d} {state}")?;
            } else {
                writeln!(out, "{d} is the only enabled difficulty")?;
            }
        }
        Command::Clear => {
            app.clear_history();
            writeln!(out, "history cleared")?;
        }
        Command::Scheme(scheme) => {
            app.set_color_scheme(scheme);
            writeln!(out, "color scheme: {}", scheme.to_key())?;
        }
        Command::Language(language) => {
            app.set_language(language);
            writeln!(out, "language: {}", language.to_key())?;
        }
        Command::Help => writeln!(out, "{HELP}")?,
        Command::Quit => {}
    }
    Ok(())
}

fn print_hand(app: &mut App, out: &mut impl Write) -> Result<()> {
    match app.deal_hand() {
        Some(entry) => writeln!(out, "{}", hand_line(entry))?,
        None => writeln!(out, "no puzzles match the enabled difficulties")?,
    }
    Ok(())
}

fn card_faces(entry: &HistoryEntry) -> String {
    entry
        .cards
        .iter()
        .map(|c| format!("{:>3}", c.to_string()))
        .collect::<Vec<_>>()
        .join(" ")
}

fn hand_line(entry: &HistoryEntry) -> String {
    format!(
        "hand #{} [{}]  {}",
        entry.hand_number,
        entry.difficulty,
        card_faces(entry)
    )
}

fn history_line(entry: &HistoryEntry) -> String {
    format!(
        "{:>4}. {} #{:<3} {:<8} {}",
        entry.sequence,
        entry.dealt_at.format("%H:%M:%S"),
        entry.hand_number,
        entry.difficulty.to_key(),
        card_faces(entry)
    )
}
