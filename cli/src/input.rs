use core::str::FromStr;
use sapper_core::{Coord, DifficultyKey, ParseDifficultyError, Pos};
use thiserror::Error;

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Pos),
    Flag(Pos),
    Chord(Pos),
    /// Start over, optionally switching to another preset
    New(Option<DifficultyKey>),
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command {0:?}, type `h` for help")]
    Unknown(String),
    #[error("Expected `{0} ROW COL`")]
    MissingPosition(&'static str),
    #[error("Invalid coordinate {0:?}")]
    InvalidCoord(String),
    #[error("Unexpected argument {0:?}")]
    Trailing(String),
    #[error(transparent)]
    Difficulty(#[from] ParseDifficultyError),
}

pub const HELP: &str = "\
commands:
  r ROW COL   reveal a cell
  f ROW COL   toggle a flag
  c ROW COL   chord on a revealed number
  n [LEVEL]   new game, LEVEL is easy, medium or hard
  h           show this help
  q           quit";

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let verb = words.next().ok_or(ParseCommandError::Empty)?;

        let command = match verb.to_ascii_lowercase().as_str() {
            "r" | "reveal" => Self::Reveal(parse_pos(&mut words, "r")?),
            "f" | "flag" => Self::Flag(parse_pos(&mut words, "f")?),
            "c" | "chord" => Self::Chord(parse_pos(&mut words, "c")?),
            "n" | "new" => Self::New(words.next().map(str::parse).transpose()?),
            "h" | "help" | "?" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            _ => return Err(ParseCommandError::Unknown(verb.to_string())),
        };

        match words.next() {
            Some(extra) => Err(ParseCommandError::Trailing(extra.to_string())),
            None => Ok(command),
        }
    }
}

fn parse_pos<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    verb: &'static str,
) -> Result<Pos, ParseCommandError> {
    let mut coord = || -> Result<Coord, ParseCommandError> {
        let word = words
            .next()
            .ok_or(ParseCommandError::MissingPosition(verb))?;
        word.parse()
            .map_err(|_| ParseCommandError::InvalidCoord(word.to_string()))
    };
    let row = coord()?;
    let col = coord()?;
    Ok((row, col))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cell_commands() {
        assert_eq!("r 3 4".parse::<Command>(), Ok(Command::Reveal((3, 4))));
        assert_eq!("  flag 0 15 ".parse::<Command>(), Ok(Command::Flag((0, 15))));
        assert_eq!("C 1 1".parse::<Command>(), Ok(Command::Chord((1, 1))));
    }

    #[test]
    fn parses_new_game() {
        assert_eq!("n".parse::<Command>(), Ok(Command::New(None)));
        assert_eq!(
            "new Hard".parse::<Command>(),
            Ok(Command::New(Some(DifficultyKey::Hard)))
        );
        assert_eq!(
            "n expert".parse::<Command>(),
            Err(ParseCommandError::Difficulty(ParseDifficultyError))
        );
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!("".parse::<Command>(), Err(ParseCommandError::Empty));
        assert_eq!(
            "r 1".parse::<Command>(),
            Err(ParseCommandError::MissingPosition("r"))
        );
        assert_eq!(
            "f -1 2".parse::<Command>(),
            Err(ParseCommandError::InvalidCoord("-1".into()))
        );
        assert_eq!(
            "r 1 2 3".parse::<Command>(),
            Err(ParseCommandError::Trailing("3".into()))
        );
        assert_eq!(
            "dig 1 2".parse::<Command>(),
            Err(ParseCommandError::Unknown("dig".into()))
        );
    }

    #[test]
    fn out_of_range_coordinates_are_left_to_the_board() {
        // fits a Coord, the session reports it as out of bounds
        assert_eq!("r 200 0".parse::<Command>(), Ok(Command::Reveal((200, 0))));
        assert!("r 300 0".parse::<Command>().is_err());
    }
}
