use std::fmt::{self, Write as _};

use sapper_core::{Difficulty, Phase, Pos, SessionEvent, Tile};

/// What the terminal knows about the game, rebuilt purely from session events.
#[derive(Clone, Debug, PartialEq)]
pub struct BoardView {
    size: Pos,
    tiles: Vec<Tile>,
    phase: Phase,
    mines_remaining: i32,
    elapsed_seconds: u32,
}

impl BoardView {
    pub fn new(difficulty: Difficulty) -> Self {
        let mut view = Self {
            size: (0, 0),
            tiles: Vec::new(),
            phase: Phase::NotStarted,
            mines_remaining: 0,
            elapsed_seconds: 0,
        };
        view.reset(difficulty);
        view
    }

    fn reset(&mut self, difficulty: Difficulty) {
        self.size = difficulty.size();
        self.tiles = vec![Tile::Hidden; difficulty.total_cells().into()];
        self.phase = Phase::NotStarted;
        self.mines_remaining = difficulty.mine_count().into();
        self.elapsed_seconds = 0;
    }

    fn index(&self, (row, col): Pos) -> Option<usize> {
        let (rows, cols) = self.size;
        (row < rows && col < cols).then(|| usize::from(row) * usize::from(cols) + usize::from(col))
    }

    pub fn tile(&self, pos: Pos) -> Option<Tile> {
        self.index(pos).map(|index| self.tiles[index])
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    pub fn mines_remaining(&self) -> i32 {
        self.mines_remaining
    }

    /// Returns whether the board itself needs redrawing.
    pub fn apply(&mut self, event: &SessionEvent) -> bool {
        use SessionEvent::*;

        match *event {
            Reset { difficulty } => {
                self.reset(difficulty);
                true
            }
            CellChanged { pos, view } => match self.index(pos) {
                Some(index) => {
                    self.tiles[index] = view.tile;
                    true
                }
                None => {
                    log::warn!("Dropping update for {:?} outside the board", pos);
                    false
                }
            },
            PhaseChanged { phase } => {
                self.phase = phase;
                true
            }
            MinesRemainingChanged { mines_remaining } => {
                self.mines_remaining = mines_remaining;
                true
            }
            ElapsedChanged { seconds } => {
                self.elapsed_seconds = seconds;
                false
            }
        }
    }

    pub fn status_line(&self) -> String {
        let mood = match self.phase {
            Phase::NotStarted => "ready",
            Phase::InProgress => "playing",
            Phase::Won => "you win!",
            Phase::Lost => "boom",
        };
        format!(
            "[{}] {} [{}]",
            format_for_counter(self.mines_remaining),
            mood,
            format_for_counter(self.elapsed_seconds.try_into().unwrap_or(i32::MAX)),
        )
    }
}

fn tile_glyph(tile: Tile) -> char {
    use Tile::*;

    match tile {
        Hidden => '.',
        Open(0) => ' ',
        Open(n) => char::from_digit(n.into(), 10).unwrap_or('?'),
        Flagged => 'F',
        Exploded => 'X',
        Mine => '*',
        IncorrectFlag => '!',
    }
}

/// Three-digit counter as shown on the classic display.
fn format_for_counter(num: i32) -> String {
    match num {
        ..-99 => "-99".to_string(),
        -99..0 => format!("-{:02}", -num),
        0..1000 => format!("{:03}", num),
        1000.. => "999".to_string(),
    }
}

impl fmt::Display for BoardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (rows, cols) = self.size;

        let mut header = String::from("   ");
        for col in 0..cols {
            write!(header, "{:>3}", col)?;
        }
        writeln!(f, "{}", header.trim_end())?;

        for (row, tiles) in self.tiles.chunks(cols.max(1).into()).enumerate().take(rows.into()) {
            let mut line = format!("{:>3}", row);
            for &tile in tiles {
                write!(line, "{:>3}", tile_glyph(tile))?;
            }
            writeln!(f, "{}", line.trim_end())?;
        }

        write!(f, "{}", self.status_line())
    }
}
