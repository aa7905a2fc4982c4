use std::io::Write;
use std::sync::mpsc::Sender;
use std::time::Duration;

use anyhow::Result;
use clap::ValueEnum;
use sapper_core::{Difficulty, FlagOutcome, GameError, RevealOutcome, Session, SessionEvent};

use crate::input::{Command, HELP};
use crate::ticker::Ticker;
use crate::view::BoardView;

const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Msg {
    Input(String),
    /// One second passed for the clock of the given generation
    Tick(u64),
    /// Input closed
    Eof,
}

/// How the adapter reports what happened.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Board redrawn after every move
    #[default]
    Text,
    /// One JSON object per session event
    Json,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Terminal front end: turns messages into session actions and session events into output.
pub struct App<W> {
    session: Session,
    view: BoardView,
    format: Format,
    out: W,
    ticks: Option<Sender<Msg>>,
    ticker: Option<Ticker>,
    generation: u64,
    clock: Option<u64>,
}

impl<W: Write> App<W> {
    /// Without a `ticks` sender no thread is spawned and the clock only moves on explicit
    /// [`Msg::Tick`]s.
    pub fn new(session: Session, format: Format, out: W, ticks: Option<Sender<Msg>>) -> Self {
        Self {
            view: BoardView::new(session.difficulty()),
            session,
            format,
            out,
            ticks,
            ticker: None,
            generation: 0,
            clock: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn view(&self) -> &BoardView {
        &self.view
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Reports the initial board.
    pub fn start(&mut self) -> Result<()> {
        if self.format == Format::Text {
            writeln!(self.out, "{}", HELP)?;
        }
        self.flush_events(true)
    }

    pub fn update(&mut self, msg: Msg) -> Result<Flow> {
        use Msg::*;

        let flow = match msg {
            Input(line) if line.trim().is_empty() => Flow::Continue,
            Input(line) => match line.parse::<Command>() {
                Ok(command) => self.run(command)?,
                Err(err) => {
                    self.report(&err)?;
                    Flow::Continue
                }
            },
            Tick(generation) if self.clock == Some(generation) => {
                self.session.tick();
                self.flush_events(false)?;
                Flow::Continue
            }
            Tick(generation) => {
                log::trace!("Discarding stale tick from generation {}", generation);
                Flow::Continue
            }
            Eof => Flow::Quit,
        };

        self.out.flush()?;
        Ok(flow)
    }

    fn run(&mut self, command: Command) -> Result<Flow> {
        use Command::*;

        log::debug!("command: {:?}", command);
        let result = match command {
            Reveal(pos) => self.session.reveal_at(pos).map(RevealOutcome::has_update),
            Flag(pos) => self.session.toggle_flag_at(pos).map(FlagOutcome::has_update),
            Chord(pos) => self.session.chord_at(pos).map(RevealOutcome::has_update),
            New(key) => {
                let difficulty = key.map_or(self.session.difficulty(), Difficulty::preset);
                self.session.reset(difficulty);
                Ok(true)
            }
            Help => {
                writeln!(self.out, "{}", HELP)?;
                return Ok(Flow::Continue);
            }
            Quit => return Ok(Flow::Quit),
        };

        match result {
            Ok(true) => {}
            Ok(false) => log::debug!("{:?} changed nothing", command),
            Err(err) => self.report_game_error(err)?,
        }
        self.flush_events(false)?;
        Ok(Flow::Continue)
    }

    fn report_game_error(&mut self, err: GameError) -> Result<()> {
        log::info!("Move refused: {}", err);
        self.report(&err)
    }

    fn report(&mut self, err: &dyn std::error::Error) -> Result<()> {
        match self.format {
            Format::Text => writeln!(self.out, "error: {}", err)?,
            Format::Json => {
                let line = serde_json::json!({ "error": err.to_string() });
                serde_json::to_writer(&mut self.out, &line)?;
                writeln!(self.out)?;
            }
        }
        Ok(())
    }

    /// Applies queued events to the view and writes them out.
    fn flush_events(&mut self, force_redraw: bool) -> Result<()> {
        let events: Vec<SessionEvent> = self.session.drain_events().collect();
        let mut redraw = force_redraw;

        for event in &events {
            redraw |= self.view.apply(event);
            if self.format == Format::Json {
                serde_json::to_writer(&mut self.out, event)?;
                writeln!(self.out)?;
            }
        }
        self.sync_clock();

        if redraw && self.format == Format::Text {
            writeln!(self.out, "{}", self.view)?;
        }
        Ok(())
    }

    /// Runs a ticker exactly while the session timer runs.
    fn sync_clock(&mut self) {
        match (self.session.timer().is_running(), self.clock) {
            (true, None) => {
                self.generation += 1;
                self.clock = Some(self.generation);
                self.ticker = self
                    .ticks
                    .clone()
                    .map(|tx| Ticker::spawn(self.generation, TICK_PERIOD, tx));
            }
            (false, Some(generation)) => {
                log::debug!("Clock {} stopped", generation);
                self.clock = None;
                self.ticker = None;
            }
            _ => {}
        }
    }
}
