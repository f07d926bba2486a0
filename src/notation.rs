//! Traditional positional notation, such as `炮二平五` or `马８进７`.
//!
//! Files are counted from the mover's own right edge and ranks in the
//! mover's direction of travel, so the same shape of move reads the same for
//! both sides. Red numbers are written in Chinese numerals and Black numbers
//! in full-width digits, following printed game records.
//!
//! Advance and retreat always count ranks moved, also for the horse, elephant
//! and advisor, where printed records give the destination file instead. Two
//! pieces of one kind sharing a file are not told apart with a front/back
//! (前/后) prefix, so their moves can read the same.

use crate::display_format::DisplayFormat;
use crate::location::Move;
use crate::piece::{Piece, Side};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub enum Action {
    Advance,
    Retreat,
    Traverse,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Notation {
    pub piece: Piece,
    pub origin_file: u8,
    pub action: Action,
    /// Ranks travelled, or the destination file when traversing.
    pub value: u8,
}

impl Notation {
    pub fn new(mv: Move, piece: Piece) -> Self {
        let from = mv.from.normalize(piece.side);
        let to = mv.to.normalize(piece.side);
        let file = |x: i8| (9 - x) as u8;

        let (action, value) = match from.y().cmp(&to.y()) {
            Ordering::Greater => (Action::Advance, (from.y() - to.y()) as u8),
            Ordering::Less => (Action::Retreat, (to.y() - from.y()) as u8),
            Ordering::Equal => (Action::Traverse, file(to.x())),
        };

        Self {
            piece,
            origin_file: file(from.x()),
            action,
            value,
        }
    }

    pub fn display(&self, format: DisplayFormat) -> impl Display + use<> {
        if !format.chinese {
            let letter = self.piece.fen_char().to_ascii_uppercase();
            let action = match self.action {
                Action::Advance => '+',
                Action::Retreat => '-',
                Action::Traverse => '.',
            };
            return format!("{letter}{}{action}{}", self.origin_file, self.value);
        }

        let action = match self.action {
            Action::Advance => '进',
            Action::Retreat => '退',
            Action::Traverse => '平',
        };
        let side = self.piece.side;
        format!(
            "{}{}{action}{}",
            self.piece.chinese_char(),
            numeral(side, self.origin_file),
            numeral(side, self.value)
        )
    }
}

impl Display for Notation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display(DisplayFormat::string().with_chinese(true)))
    }
}

fn numeral(side: Side, value: u8) -> char {
    const CHINESE: [char; 9] = ['一', '二', '三', '四', '五', '六', '七', '八', '九'];
    const FULL_WIDTH: [char; 9] = ['１', '２', '３', '４', '５', '６', '７', '８', '９'];

    let index = (value.clamp(1, 9) - 1) as usize;
    match side {
        Side::Red => CHINESE[index],
        Side::Black => FULL_WIDTH[index],
    }
}
