use std::io::{self, BufRead};
use std::sync::mpsc::{self, Sender};
use std::thread;

use anyhow::Result;
use clap::Parser;
use sapper_core::{Difficulty, DifficultyKey, Session};

mod app;
mod input;
mod ticker;
mod view;

use app::{App, Flow, Format, Msg};

#[derive(Parser, Debug)]
#[command(version, about = "Minesweeper in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board preset: easy, medium or hard
    #[arg(short, long, default_value_t = DifficultyKey::Easy)]
    difficulty: DifficultyKey,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(args.verbose.tracing_level_filter())
        .init();

    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);

    let session = Session::with_seed(Difficulty::preset(args.difficulty), seed);
    let (tx, rx) = mpsc::channel();
    spawn_input_reader(tx.clone());

    let mut app = App::new(session, args.format, io::stdout().lock(), Some(tx));
    app.start()?;
    for msg in rx {
        if app.update(msg)? == Flow::Quit {
            break;
        }
    }

    log::debug!("Bye");
    Ok(())
}

/// Forwards stdin lines into the message channel, ending with [`Msg::Eof`].
fn spawn_input_reader(tx: Sender<Msg>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    log::error!("Could not read input: {}", err);
                    break;
                }
            };
            if tx.send(Msg::Input(line)).is_err() {
                return;
            }
        }
        let _ = tx.send(Msg::Eof);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_args() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["sapper"]).unwrap();

        assert_eq!(args.difficulty, DifficultyKey::Easy);
        assert_eq!(args.seed, None);
        assert_eq!(args.format, Format::Text);
    }

    #[test]
    fn parses_all_options() {
        let args =
            Args::try_parse_from(["sapper", "-d", "hard", "--seed", "42", "-f", "json", "-vv"])
                .unwrap();

        assert_eq!(args.difficulty, DifficultyKey::Hard);
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.format, Format::Json);
        assert_eq!(
            args.verbose.log_level_filter(),
            log::LevelFilter::Info
        );
    }

    #[test]
    fn rejects_unknown_difficulty() {
        assert!(Args::try_parse_from(["sapper", "--difficulty", "expert"]).is_err());
    }
}
