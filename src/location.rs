use crate::board::Board;
use crate::error::Error;
use crate::piece::Side;
use serde::{Deserialize, Serialize};
use std::fmt::Formatter;
use std::str::{Chars, FromStr};

/// A cell on the board. `y = 0` is Black's back rank and `y = 9` is Red's.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "RawLocation")]
pub struct Location {
    x: i8,
    y: i8,
}

/// Unchecked wire form, bounds are enforced on conversion.
#[derive(Deserialize)]
struct RawLocation {
    x: i32,
    y: i32,
}

impl TryFrom<RawLocation> for Location {
    type Error = Error;

    fn try_from(raw: RawLocation) -> Result<Self, Self::Error> {
        Self::try_from_xy(raw.x, raw.y)
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub struct Move {
    pub from: Location,
    pub to: Location,
}

impl Location {
    pub fn new() -> Self {
        Self { x: 0, y: 0 }
    }

    pub fn from_xy(x: i8, y: i8) -> Option<Self> {
        Self::new().shift_xy(x, y)
    }

    /// Like [`Location::from_xy`] but for untrusted host input.
    pub fn try_from_xy(x: i32, y: i32) -> Result<Self, Error> {
        if !Board::is_in_bounds(x, y) {
            return Err(Error::OutOfBounds { x, y });
        }
        Ok(Self { x: x as i8, y: y as i8 })
    }

    pub fn from_index(index: usize) -> Option<Self> {
        if index >= Board::SIZE {
            return None;
        }
        let x = index as i8 % Board::WIDTH;
        let y = index as i8 / Board::WIDTH;
        Self::from_xy(x, y)
    }

    pub fn from_chars(chars: &mut Chars<'_>) -> Option<Self> {
        let file = chars.next()?.to_ascii_lowercase();
        let rank = chars.next()?;
        if !('a'..='i').contains(&file) || !rank.is_ascii_digit() {
            return None;
        }
        Self::from_xy((file as u8 - b'a') as i8, (rank as u8 - b'0') as i8)
    }

    pub fn shift_x(&self, x: i8) -> Option<Self> {
        let new_x = self.x + x;
        if 0 > new_x || new_x >= Board::WIDTH {
            return None;
        }
        Some(Self { x: new_x, y: self.y })
    }

    pub fn shift_y(&self, y: i8) -> Option<Self> {
        let new_y = self.y + y;
        if 0 > new_y || new_y >= Board::HEIGHT {
            return None;
        }
        Some(Self { x: self.x, y: new_y })
    }

    pub fn shift_xy(&self, x: i8, y: i8) -> Option<Self> {
        self.shift_x(x)?.shift_y(y)
    }

    pub fn index(&self) -> usize {
        (self.x + self.y * Board::WIDTH) as usize
    }

    pub fn x(&self) -> i8 {
        self.x
    }

    pub fn y(&self) -> i8 {
        self.y
    }

    /// Rotates the board half a turn for Black so that every side sees itself
    /// at the bottom, moving towards `y = 0`.
    pub fn normalize(&self, side: Side) -> Self {
        match side {
            Side::Red => *self,
            Side::Black => Self {
                x: Board::WIDTH - self.x - 1,
                y: Board::HEIGHT - self.y - 1,
            },
        }
    }

    pub fn is_in_palace(&self, side: Side) -> bool {
        let normal = self.normalize(side);
        (3..=5).contains(&normal.x) && (7..=9).contains(&normal.y)
    }

    /// Whether this cell is on `side`'s own half of the river.
    pub fn is_own_half(&self, side: Side) -> bool {
        self.normalize(side).y >= 5
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", (b'a' + self.x as u8) as char, self.y)
    }
}

impl FromStr for Location {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match Location::from_chars(&mut chars) {
            Some(location) if chars.next().is_none() => Ok(location),
            _ => Err(Error::InvalidMove { text: s.to_owned() }),
        }
    }
}

impl Move {
    pub fn new(from: Location, to: Location) -> Self {
        Self { from, to }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

impl FromStr for Move {
    type Err = Error;

    /// Parses the `a9a6` form printed by [`Move`]'s `Display`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        if let Some(from) = Location::from_chars(&mut chars)
            && let Some(to) = Location::from_chars(&mut chars)
            && chars.next().is_none()
            && from != to
        {
            Ok(Move { from, to })
        } else {
            Err(Error::InvalidMove { text: s.to_owned() })
        }
    }
}
