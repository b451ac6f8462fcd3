#[cfg(test)]
#[path = "coords_test.rs"]
mod coords_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the 64 board cells.
///
/// Stored as a visual grid position: row 0 is rank 8 (black's back rank),
/// column 0 is file `a`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Square {
    row: u8,
    col: u8,
}

/// Map a grid position to its square. `row` and `col` must be in `0..8`.
#[must_use]
pub fn to_square(row: u8, col: u8) -> Square {
    Square { row, col }
}

/// Inverse of [`to_square`].
#[must_use]
pub fn to_coord(square: Square) -> (u8, u8) {
    (square.row, square.col)
}

impl Square {
    /// Build a square from a file letter (`'a'..='h'`) and a rank digit (`'1'..='8'`).
    #[must_use]
    pub fn from_chars(file: char, rank: char) -> Option<Self> {
        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return None;
        }
        let col = file as u8 - b'a';
        let row = 8 - (rank as u8 - b'0');
        Some(Self { row, col })
    }

    #[must_use]
    pub fn row(self) -> u8 {
        self.row
    }

    #[must_use]
    pub fn col(self) -> u8 {
        self.col
    }

    #[must_use]
    pub fn file_char(self) -> char {
        char::from(b'a' + self.col)
    }

    #[must_use]
    pub fn rank_char(self) -> char {
        char::from(b'0' + (8 - self.row))
    }

    /// Every square in visual order, row 0 first.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..8u8).flat_map(|row| (0..8u8).map(move |col| Self { row, col }))
    }

    /// Dense index in visual order, `0..64`.
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.row) * 8 + usize::from(self.col)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

/// Error returned when text is not an algebraic square name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not a square: {0:?}")]
pub struct ParseSquareError(pub String);

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(file), Some(rank), None) => {
                Self::from_chars(file, rank).ok_or_else(|| ParseSquareError(s.to_owned()))
            }
            _ => Err(ParseSquareError(s.to_owned())),
        }
    }
}

impl TryFrom<String> for Square {
    type Error = ParseSquareError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Square> for String {
    fn from(square: Square) -> Self {
        square.to_string()
    }
}
