use crate::error::{Error, Result};
use crate::location::{Location, Move};
use crate::piece::{Piece, PieceKind, Side};
use std::fmt::Formatter;
use std::ops::{Index, IndexMut};

/// The 9x10 grid. Holds pieces only, the rules live in `movegen` and `check`.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Board {
    pieces: [Option<Piece>; Board::SIZE],
}

impl Board {
    pub const WIDTH: i8 = 9;
    pub const HEIGHT: i8 = 10;
    pub const SIZE: usize = (Self::WIDTH as usize) * (Self::HEIGHT as usize);

    pub const OPENING_FEN: &'static str = "rheakaehr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RHEAKAEHR";

    pub fn new() -> Self {
        Self { pieces: [None; Self::SIZE] }
    }

    pub fn is_in_bounds(x: i32, y: i32) -> bool {
        (0..Self::WIDTH as i32).contains(&x) && (0..Self::HEIGHT as i32).contains(&y)
    }

    pub fn get(&self, location: Location) -> Option<Piece> {
        self[location]
    }

    pub fn set(&mut self, location: Location, piece: Option<Piece>) {
        self[location] = piece;
    }

    /// Parses the placement field of a FEN string, rows listed from `y = 0`.
    /// Anything after the first space is ignored.
    pub fn from_fen(fen: &str) -> Result<Self> {
        let invalid = || Error::InvalidFen { fen: fen.to_owned() };

        let placement = fen.split(' ').next().unwrap_or_default();
        let rows: Vec<&str> = placement.split('/').collect();
        if rows.len() != Self::HEIGHT as usize {
            return Err(invalid());
        }

        let mut board = Self::new();
        for (y, row) in rows.into_iter().enumerate() {
            let mut x = 0i8;
            for current in row.chars() {
                if let Some(skip) = current.to_digit(10) {
                    x = x
                        .checked_add(skip as i8)
                        .filter(|&x| x <= Self::WIDTH)
                        .ok_or_else(invalid)?;
                    continue;
                }

                let piece = Piece::from_fen_char(current).ok_or_else(invalid)?;
                let location = Location::from_xy(x, y as i8).ok_or_else(invalid)?;
                board[location] = Some(piece);
                x += 1;
            }

            if x != Self::WIDTH {
                return Err(invalid());
            }
        }

        Ok(board)
    }

    pub fn fen(&self) -> String {
        let mut result = String::new();
        for y in 0..Self::HEIGHT {
            if y > 0 {
                result.push('/');
            }

            let mut empty = 0;
            for x in 0..Self::WIDTH {
                match self.pieces[(x + y * Self::WIDTH) as usize] {
                    Some(piece) => {
                        if empty > 0 {
                            result.push_str(&empty.to_string());
                            empty = 0;
                        }
                        result.push(piece.fen_char());
                    }
                    None => empty += 1,
                }
            }

            if empty > 0 {
                result.push_str(&empty.to_string());
            }
        }
        result
    }

    pub fn opening() -> Self {
        let mut board = Self::new();
        let back = [
            PieceKind::Chariot,
            PieceKind::Horse,
            PieceKind::Elephant,
            PieceKind::Advisor,
            PieceKind::General,
            PieceKind::Advisor,
            PieceKind::Elephant,
            PieceKind::Horse,
            PieceKind::Chariot,
        ];

        for side in [Side::Red, Side::Black] {
            // lay out Red's half, then rotate for Black
            let mut put = |x: i8, y: i8, kind| {
                if let Some(location) = Location::from_xy(x, y) {
                    board[location.normalize(side)] = Some(Piece::new(kind, side));
                }
            };

            for (x, kind) in back.into_iter().enumerate() {
                put(x as i8, 9, kind);
            }
            put(1, 7, PieceKind::Cannon);
            put(7, 7, PieceKind::Cannon);
            for x in (0..Self::WIDTH).step_by(2) {
                put(x, 6, PieceKind::Soldier);
            }
        }

        board
    }

    /// Relocates the piece at `mv.from`, returning it and whatever stood on `mv.to`.
    ///
    /// # Panics
    /// If `mv.from` is empty.
    pub fn play(&mut self, mv: Move) -> (Piece, Option<Piece>) {
        let piece = self[mv.from].take().expect("no piece to play");
        let capture = self[mv.to].replace(piece);
        (piece, capture)
    }

    /// Exact inverse of [`Board::play`].
    pub fn undo(&mut self, mv: Move, piece: Piece, capture: Option<Piece>) {
        self[mv.from] = Some(piece);
        self[mv.to] = capture;
    }

    pub fn find_general(&self, side: Side) -> Option<Location> {
        self.iter_pieces(side)
            .find(|(_, piece)| piece.kind == PieceKind::General)
            .map(|(location, _)| location)
    }

    pub fn iter_occupied(&self) -> impl Iterator<Item = (Location, Piece)> + '_ {
        self.pieces.iter().enumerate().filter_map(|(index, piece)| {
            let piece = (*piece)?;
            Some((Location::from_index(index)?, piece))
        })
    }

    pub fn iter_pieces(&self, side: Side) -> impl Iterator<Item = (Location, Piece)> + '_ {
        self.iter_occupied().filter(move |(_, piece)| piece.side == side)
    }

    pub fn count(&self, piece: Piece) -> usize {
        self.pieces.iter().filter(|&&current| current == Some(piece)).count()
    }

    /// Rows of cells from `y = 0`, the shape hosts render from.
    pub fn rows(&self) -> Vec<Vec<Option<Piece>>> {
        self.pieces
            .chunks(Self::WIDTH as usize)
            .map(|row| row.to_vec())
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<Location> for Board {
    type Output = Option<Piece>;
    fn index(&self, index: Location) -> &Self::Output {
        &self.pieces[index.index()]
    }
}

impl IndexMut<Location> for Board {
    fn index_mut(&mut self, index: Location) -> &mut Self::Output {
        &mut self.pieces[index.index()]
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (y, row) in self.pieces.chunks(Self::WIDTH as usize).enumerate() {
            write!(f, "{y} ")?;
            for piece in row {
                if let Some(piece) = piece {
                    write!(f, "{} ", piece.fen_char())?;
                } else {
                    write!(f, ". ")?;
                }
            }
            writeln!(f)?;
        }
        write!(f, " ")?;
        for char in 'A'..='I' {
            write!(f, " {char}")?;
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: i8, y: i8) -> Location {
        Location::from_xy(x, y).unwrap()
    }

    #[test]
    fn test_opening_matches_fen() {
        let board = Board::opening();
        assert_eq!(board, Board::from_fen(Board::OPENING_FEN).unwrap());
        assert_eq!(board.fen(), Board::OPENING_FEN);
    }

    #[test]
    fn test_opening_layout() {
        let board = Board::opening();
        let red = |kind| Some(Piece::new(kind, Side::Red));
        let black = |kind| Some(Piece::new(kind, Side::Black));

        assert_eq!(board[at(4, 9)], red(PieceKind::General));
        assert_eq!(board[at(4, 0)], black(PieceKind::General));
        assert_eq!(board[at(0, 9)], red(PieceKind::Chariot));
        assert_eq!(board[at(1, 7)], red(PieceKind::Cannon));
        assert_eq!(board[at(7, 2)], black(PieceKind::Cannon));
        assert_eq!(board[at(8, 6)], red(PieceKind::Soldier));
        assert_eq!(board[at(2, 3)], black(PieceKind::Soldier));

        for side in [Side::Red, Side::Black] {
            for kind in PieceKind::ALL {
                assert_eq!(board.count(Piece::new(kind, side)), kind.opening_count());
            }
        }
    }

    #[test]
    fn test_invalid_fen() {
        assert!(Board::from_fen("").is_err());
        assert!(Board::from_fen("9/9/9").is_err());
        assert!(Board::from_fen("rheakaehr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RHEAKAEH").is_err());
        assert!(Board::from_fen("rheakaehx/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RHEAKAEHR").is_err());
        assert!(Board::from_fen("rheakaehr1/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RHEAKAEHR").is_err());
    }

    #[test]
    fn test_fen_row_overflow() {
        let fen = "9999999999999999/9/9/9/9/9/9/9/9/9";
        assert_eq!(Board::from_fen(fen), Err(Error::InvalidFen { fen: fen.to_owned() }));
        assert!(Board::from_fen("55/9/9/9/9/9/9/9/9/9").is_err());
        assert!(Board::from_fen("99r/9/9/9/9/9/9/9/9/9").is_err());
    }

    #[test]
    fn test_play_undo() {
        let mut board = Board::opening();
        let before = board;
        let mv = Move::new(at(1, 7), at(1, 0));

        let (piece, capture) = board.play(mv);
        assert_eq!(piece, Piece::new(PieceKind::Cannon, Side::Red));
        assert_eq!(capture, Some(Piece::new(PieceKind::Horse, Side::Black)));
        assert_eq!(board[at(1, 7)], None);

        board.undo(mv, piece, capture);
        assert_eq!(board, before);
    }

    #[test]
    fn test_get_set() {
        let mut board = Board::new();
        let piece = Piece::new(PieceKind::Horse, Side::Black);
        board.set(at(3, 3), Some(piece));
        assert_eq!(board.get(at(3, 3)), Some(piece));
        board.set(at(3, 3), None);
        assert_eq!(board.get(at(3, 3)), None);
        assert!(Board::is_in_bounds(8, 9));
        assert!(!Board::is_in_bounds(9, 9));
        assert!(!Board::is_in_bounds(0, -1));
    }

    #[test]
    fn test_find_general() {
        let board = Board::opening();
        assert_eq!(board.find_general(Side::Red), Some(at(4, 9)));
        assert_eq!(board.find_general(Side::Black), Some(at(4, 0)));
        assert_eq!(Board::new().find_general(Side::Red), None);
    }
}
