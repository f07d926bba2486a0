use crate::display_format::DisplayFormat;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum Side {
    Red,
    Black,
}

impl Side {
    pub fn opponent(&self) -> Self {
        match self {
            Self::Red => Self::Black,
            Self::Black => Self::Red,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Black => "black",
        }
    }
}

impl Display for Side {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum PieceKind {
    General,
    Advisor,
    Elephant,
    Horse,
    Chariot,
    Cannon,
    Soldier,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        Self::General,
        Self::Advisor,
        Self::Elephant,
        Self::Horse,
        Self::Chariot,
        Self::Cannon,
        Self::Soldier,
    ];

    /// How many of this kind each side starts with.
    pub fn opening_count(&self) -> usize {
        match self {
            Self::General => 1,
            Self::Soldier => 5,
            _ => 2,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
}

impl Piece {
    pub fn new(kind: PieceKind, side: Side) -> Self {
        Self { kind, side }
    }

    pub fn from_fen_char(value: char) -> Option<Self> {
        let kind = match value.to_ascii_lowercase() {
            'k' => PieceKind::General,
            'a' => PieceKind::Advisor,
            'e' => PieceKind::Elephant,
            'h' => PieceKind::Horse,
            'r' => PieceKind::Chariot,
            'c' => PieceKind::Cannon,
            'p' => PieceKind::Soldier,
            _ => return None,
        };

        let side = if value.is_ascii_uppercase() { Side::Red } else { Side::Black };
        Some(Self::new(kind, side))
    }

    pub fn is_red(&self) -> bool {
        self.side == Side::Red
    }

    pub fn fen_char(&self) -> char {
        let result = match self.kind {
            PieceKind::General => 'k',
            PieceKind::Advisor => 'a',
            PieceKind::Elephant => 'e',
            PieceKind::Horse => 'h',
            PieceKind::Chariot => 'r',
            PieceKind::Cannon => 'c',
            PieceKind::Soldier => 'p',
        };
        if self.is_red() {
            result.to_ascii_uppercase()
        } else {
            result
        }
    }

    /// Horse, chariot and cannon share a glyph between sides.
    pub fn chinese_char(&self) -> char {
        match (self.side, self.kind) {
            (Side::Red, PieceKind::General) => '帅',
            (Side::Red, PieceKind::Advisor) => '仕',
            (Side::Red, PieceKind::Elephant) => '相',
            (Side::Red, PieceKind::Soldier) => '兵',
            (Side::Black, PieceKind::General) => '将',
            (Side::Black, PieceKind::Advisor) => '士',
            (Side::Black, PieceKind::Elephant) => '象',
            (Side::Black, PieceKind::Soldier) => '卒',
            (_, PieceKind::Horse) => '马',
            (_, PieceKind::Chariot) => '车',
            (_, PieceKind::Cannon) => '炮',
        }
    }

    pub fn display(&self, format: DisplayFormat) -> impl Display + use<> {
        let s = if format.chinese {
            self.chinese_char().to_string()
        } else if format.concise {
            let c = self.fen_char();
            format!("{c}{c}")
        } else {
            self.fen_char().to_string()
        };
        if format.effects && self.is_red() {
            format!("\x1B[31m{}\x1b[0m", s)
        } else {
            s
        }
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display(DisplayFormat::string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fen_char_roundtrip() {
        for kind in PieceKind::ALL {
            for side in [Side::Red, Side::Black] {
                let piece = Piece::new(kind, side);
                assert_eq!(Piece::from_fen_char(piece.fen_char()), Some(piece));
            }
        }
        assert_eq!(Piece::from_fen_char('x'), None);
    }

    #[test]
    fn test_glyphs() {
        let red = |kind| Piece::new(kind, Side::Red).chinese_char();
        let black = |kind| Piece::new(kind, Side::Black).chinese_char();

        for kind in [PieceKind::General, PieceKind::Advisor, PieceKind::Elephant, PieceKind::Soldier] {
            assert_ne!(red(kind), black(kind));
        }
        for kind in [PieceKind::Horse, PieceKind::Chariot, PieceKind::Cannon] {
            assert_eq!(red(kind), black(kind));
        }
    }

    #[test]
    fn test_opponent() {
        assert_eq!(Side::Red.opponent(), Side::Black);
        assert_eq!(Side::Black.opponent().opponent(), Side::Black);
    }
}
