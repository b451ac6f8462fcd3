//! Line commands typed at the prompt.
//!
//! Each pointer gesture the board understands has a text form, so a terminal
//! session can drive exactly the same state machine a mouse would:
//!
//! ```text
//! click e2        select / move by clicking
//! drag e2         pick up the piece on e2
//! over e4         dragged piece hovers e4
//! leave e4        dragged piece leaves e4
//! drop e4         release the dragged piece on e4
//! move e2 e4      click e2 then click e4
//! ```

use board::coords::{ParseSquareError, Square};

pub const HELP: &str = "\
commands:
  click <sq>         click a square
  drag <sq>          start dragging the piece on <sq>
  over <sq>          dragged piece hovers <sq>
  leave <sq>         dragged piece leaves <sq>
  drop <sq>          release the dragged piece on <sq>
  move <from> <to>   click <from>, then <to> (also: move e2e4)
  next               load the next puzzle
  board              redraw the board
  help               show this text
  quit               exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Click(Square),
    Drag(Square),
    Over(Square),
    Leave(Square),
    Drop(Square),
    Move(Square, Square),
    Next,
    Board,
    Help,
    Quit,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),
    #[error("`{0}` needs a square, e.g. `{0} e4`")]
    MissingSquare(&'static str),
    #[error(transparent)]
    Square(#[from] ParseSquareError),
}

/// Parse one input line.
///
/// # Errors
///
/// Returns a [`CommandError`] describing what is wrong with the line.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Err(CommandError::Empty);
    };
    let verb = verb.to_ascii_lowercase();
    let command = match verb.as_str() {
        "click" | "c" => Command::Click(square_arg(words.next(), "click")?),
        "drag" | "d" => Command::Drag(square_arg(words.next(), "drag")?),
        "over" => Command::Over(square_arg(words.next(), "over")?),
        "leave" => Command::Leave(square_arg(words.next(), "leave")?),
        "drop" => Command::Drop(square_arg(words.next(), "drop")?),
        "move" | "m" => parse_move(words.next(), words.next())?,
        "next" | "n" => Command::Next,
        "board" | "b" => Command::Board,
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        _ => return Err(CommandError::Unknown(verb)),
    };
    Ok(command)
}

fn square_arg(word: Option<&str>, verb: &'static str) -> Result<Square, CommandError> {
    let word = word.ok_or(CommandError::MissingSquare(verb))?;
    Ok(word.to_ascii_lowercase().parse()?)
}

fn parse_move(first: Option<&str>, second: Option<&str>) -> Result<Command, CommandError> {
    let first = first.ok_or(CommandError::MissingSquare("move"))?;
    match second {
        Some(second) => Ok(Command::Move(square_arg(Some(first), "move")?, square_arg(Some(second), "move")?)),
        None if first.len() == 4 && first.is_ascii() => {
            let (from, to) = first.split_at(2);
            Ok(Command::Move(square_arg(Some(from), "move")?, square_arg(Some(to), "move")?))
        }
        None => Err(CommandError::MissingSquare("move")),
    }
}

#[cfg(test)]
#[path = "command_test.rs"]
mod tests;
