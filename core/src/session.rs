use alloc::vec::{Drain, Vec};
use core::fmt;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - NotStarted -> InProgress
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Board exists, mines not placed yet
    #[default]
    NotStarted,
    /// First reveal happened, timer running
    InProgress,
    Won,
    Lost,
}

impl Phase {
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::NotStarted)
    }

    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotStarted => "not started",
            Self::InProgress => "in progress",
            Self::Won => "won",
            Self::Lost => "lost",
        })
    }
}

/// Player actions, used to report refused moves.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Reveal,
    ToggleFlag,
    Chord,
    PlaceMines,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Reveal => "reveal",
            Self::ToggleFlag => "toggle a flag",
            Self::Chord => "chord",
            Self::PlaceMines => "place mines",
        })
    }
}

/// Notifications for the presentation layer, queued by every action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A fresh board replaced whatever was shown before.
    Reset { difficulty: Difficulty },
    CellChanged { pos: Pos, view: CellView },
    PhaseChanged { phase: Phase },
    MinesRemainingChanged { mines_remaining: i32 },
    ElapsedChanged { seconds: u32 },
}

#[derive(Copy, Clone)]
struct Snapshot {
    phase: Phase,
    mines_remaining: i32,
}

/// One game from first click to win or loss, plus the means to start over.
///
/// Actions mutate the board synchronously and queue [`SessionEvent`]s which the caller collects
/// with [`Session::drain_events`] once the action has returned.
#[derive(Clone, Debug)]
pub struct Session<P = RandomPlacer<SmallRng>> {
    difficulty: Difficulty,
    grid: Grid,
    phase: Phase,
    timer: Timer,
    triggered_mine: Option<Pos>,
    placer: P,
    events: Vec<SessionEvent>,
}

impl Session {
    /// Session whose mine layouts come from a seeded generator.
    pub fn with_seed(difficulty: Difficulty, seed: u64) -> Self {
        Self::new(difficulty, RandomPlacer::from_seed(seed))
    }
}

impl<P: MinePlacer> Session<P> {
    pub fn new(difficulty: Difficulty, placer: P) -> Self {
        let mut session = Self {
            difficulty,
            grid: Grid::new(difficulty.rows(), difficulty.cols()),
            phase: Phase::NotStarted,
            timer: Timer::new(),
            triggered_mine: None,
            placer,
            events: Vec::new(),
        };
        session.push_reset_events();
        session
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn size(&self) -> Pos {
        self.grid.size()
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    pub fn revealed_count(&self) -> CellCount {
        self.grid.revealed_count()
    }

    pub fn flagged_count(&self) -> CellCount {
        self.grid.flagged_count()
    }

    /// Mines not yet accounted for by a flag, negative when over-flagged.
    pub fn mines_remaining(&self) -> i32 {
        i32::from(self.difficulty.mine_count()) - i32::from(self.grid.flagged_count())
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.timer.elapsed_seconds()
    }

    /// The mine whose reveal lost the game.
    pub fn triggered_mine(&self) -> Option<Pos> {
        self.triggered_mine
    }

    pub fn cell_view(&self, pos: Pos) -> Result<CellView> {
        let cell = *self.grid.get(pos)?;
        Ok(CellView::new(cell, self.tile_for(pos, cell)))
    }

    pub fn tile_at(&self, pos: Pos) -> Result<Tile> {
        self.cell_view(pos).map(|view| view.tile)
    }

    pub fn pending_events(&self) -> &[SessionEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Drain<'_, SessionEvent> {
        self.events.drain(..)
    }

    /// Reveals a cell, placing the mines first if this is the opening move.
    pub fn reveal_at(&mut self, pos: Pos) -> Result<RevealOutcome> {
        let pos = self.grid.validate(pos)?;
        self.check_accepts(Action::Reveal)?;

        // a flagged opening click must not trigger placement
        if self.grid.cell(pos).is_settled() {
            return Ok(RevealOutcome::AlreadySettled);
        }

        let before = self.snapshot();
        if self.phase.is_initial() {
            self.start(pos)?;
        }

        let mut changed = Vec::new();
        let outcome = reveal(&mut self.grid, pos, &mut changed)?;
        self.settle(outcome, &mut changed);
        self.commit(before, &changed);
        Ok(outcome)
    }

    pub fn toggle_flag_at(&mut self, pos: Pos) -> Result<FlagOutcome> {
        let pos = self.grid.validate(pos)?;
        self.check_accepts(Action::ToggleFlag)?;

        let before = self.snapshot();
        let mut changed = Vec::new();
        let outcome = toggle_flag(&mut self.grid, pos, &mut changed)?;
        self.commit(before, &changed);
        Ok(outcome)
    }

    pub fn chord_at(&mut self, pos: Pos) -> Result<RevealOutcome> {
        let pos = self.grid.validate(pos)?;
        self.check_accepts(Action::Chord)?;

        let before = self.snapshot();
        let mut changed = Vec::new();
        let outcome = chord(&mut self.grid, pos, &mut changed)?;
        self.settle(outcome, &mut changed);
        self.commit(before, &changed);
        Ok(outcome)
    }

    /// Discards the current game and sets up a fresh board for `difficulty`.
    pub fn reset(&mut self, difficulty: Difficulty) {
        if self.timer.stop() {
            log::debug!(
                "Stopped running timer at {}s",
                self.timer.elapsed_seconds()
            );
        }

        self.difficulty = difficulty;
        self.grid = Grid::new(difficulty.rows(), difficulty.cols());
        self.phase = Phase::NotStarted;
        self.timer = Timer::new();
        self.triggered_mine = None;
        self.events.clear();
        self.push_reset_events();
        log::debug!(
            "New {}x{} board with {} mines",
            difficulty.rows(),
            difficulty.cols(),
            difficulty.mine_count()
        );
    }

    pub fn reset_to(&mut self, key: DifficultyKey) {
        self.reset(Difficulty::preset(key));
    }

    /// Same difficulty, new board.
    pub fn restart(&mut self) {
        self.reset(self.difficulty);
    }

    /// Advances the clock by one second while a game is in progress.
    pub fn tick(&mut self) -> Option<u32> {
        if !matches!(self.phase, Phase::InProgress) {
            return None;
        }
        let seconds = self.timer.tick()?;
        self.events.push(SessionEvent::ElapsedChanged { seconds });
        Some(seconds)
    }

    fn check_accepts(&self, action: Action) -> Result<()> {
        use Phase::*;

        let accepted = match (self.phase, action) {
            (NotStarted, Action::Chord) => false,
            (NotStarted | InProgress, _) => true,
            (Won | Lost, _) => false,
        };
        if accepted {
            Ok(())
        } else {
            log::warn!("Refused to {} while the game is {}", action, self.phase);
            Err(GameError::InvalidAction {
                action,
                phase: self.phase,
            })
        }
    }

    fn start(&mut self, pos: Pos) -> Result<()> {
        self.placer
            .place(&mut self.grid, self.difficulty.mine_count(), pos)?;
        self.phase = Phase::InProgress;
        self.timer.start();
        log::debug!("Game started at {:?}", pos);
        Ok(())
    }

    /// Moves to a terminal phase if the last reveal decided the game.
    fn settle(&mut self, outcome: RevealOutcome, changed: &mut Vec<Pos>) {
        match outcome {
            RevealOutcome::Mine => {
                self.triggered_mine = changed
                    .iter()
                    .copied()
                    .find(|&pos| self.grid.cell(pos).is_mine);
                self.finish(Phase::Lost, changed);
            }
            RevealOutcome::Cleared
                if self.grid.revealed_count() == self.difficulty.safe_cell_count() =>
            {
                // the count alone decides, mines are never revealed on a winning path
                debug_assert!(self.grid.all_safe_revealed());
                self.finish(Phase::Won, changed);
            }
            _ => {}
        }
    }

    /// Stops the clock and marks mines and wrong flags for display.
    fn finish(&mut self, phase: Phase, changed: &mut Vec<Pos>) {
        self.timer.stop();
        self.phase = phase;
        let won = matches!(phase, Phase::Won);

        for pos in self.grid.positions() {
            let cell = self.grid.cell(pos);
            match (cell.is_mine, cell.is_flagged, cell.is_revealed) {
                (true, false, false) if won => {
                    self.grid.set_flagged(pos, true);
                    changed.push(pos);
                }
                (true, false, false) => changed.push(pos),
                (false, true, _) if !won => changed.push(pos),
                _ => {}
            }
        }

        log::debug!(
            "Game {} after {}s, {} cells revealed",
            phase,
            self.timer.elapsed_seconds(),
            self.grid.revealed_count()
        );
    }

    fn tile_for(&self, pos: Pos, cell: Cell) -> Tile {
        use Tile::*;

        let lost = matches!(self.phase, Phase::Lost);
        match (cell.is_revealed, cell.is_flagged, cell.is_mine) {
            (true, _, true) if self.triggered_mine == Some(pos) => Exploded,
            (true, _, true) => Mine,
            (true, _, false) => Open(cell.adjacent_mines),
            (false, true, false) if lost => IncorrectFlag,
            (false, true, _) => Flagged,
            (false, false, true) if lost => Mine,
            (false, false, _) => Hidden,
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            mines_remaining: self.mines_remaining(),
        }
    }

    fn commit(&mut self, before: Snapshot, changed: &[Pos]) {
        for &pos in changed {
            let cell = self.grid.cell(pos);
            let view = CellView::new(cell, self.tile_for(pos, cell));
            self.events.push(SessionEvent::CellChanged { pos, view });
        }

        let mines_remaining = self.mines_remaining();
        if mines_remaining != before.mines_remaining {
            self.events
                .push(SessionEvent::MinesRemainingChanged { mines_remaining });
        }

        // an opening move that clears the board still passes through InProgress
        if before.phase.is_initial() && self.phase.is_terminal() {
            self.events.push(SessionEvent::PhaseChanged {
                phase: Phase::InProgress,
            });
        }
        if self.phase != before.phase {
            self.events.push(SessionEvent::PhaseChanged { phase: self.phase });
        }
    }

    fn push_reset_events(&mut self) {
        self.events.extend([
            SessionEvent::Reset {
                difficulty: self.difficulty,
            },
            SessionEvent::PhaseChanged { phase: self.phase },
            SessionEvent::MinesRemainingChanged {
                mines_remaining: self.mines_remaining(),
            },
            SessionEvent::ElapsedChanged {
                seconds: self.timer.elapsed_seconds(),
            },
        ]);
    }
}
