//! Serializable views of a [`Game`] handed to hosts after every command.

use crate::display_format::DisplayFormat;
use crate::game::{Game, HistoryEntry};
use crate::location::Location;
use crate::piece::{Piece, Side};
use serde::{Deserialize, Serialize};

#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    /// Indexed as `board[y][x]`.
    pub board: Vec<Vec<Option<Piece>>>,
    pub current_turn: Side,
    pub is_in_check: bool,
    pub is_ended: bool,
    pub winner: Option<Side>,
    pub history: Vec<MoveRecord>,
}

#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct MoveRecord {
    pub from: Location,
    pub to: Location,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub notation: String,
}

impl From<&HistoryEntry> for MoveRecord {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            from: entry.mv.from,
            to: entry.mv.to,
            piece: entry.piece,
            captured: entry.captured,
            notation: entry.notation().display(DisplayFormat::string().with_chinese(true)).to_string(),
        }
    }
}

impl From<&Game> for Snapshot {
    fn from(game: &Game) -> Self {
        Self {
            board: game.board().rows(),
            current_turn: game.turn(),
            is_in_check: game.is_in_check(),
            is_ended: game.is_ended(),
            winner: game.winner(),
            history: game.history().iter().map(MoveRecord::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::PieceKind;

    #[test]
    fn test_opening_snapshot() {
        let snapshot = Snapshot::from(&Game::opening());
        assert_eq!(snapshot.board.len(), 10);
        assert!(snapshot.board.iter().all(|row| row.len() == 9));
        assert_eq!(snapshot.board[9][0], Some(Piece::new(PieceKind::Chariot, Side::Red)));
        assert_eq!(snapshot.board[0][4], Some(Piece::new(PieceKind::General, Side::Black)));
        assert_eq!(snapshot.current_turn, Side::Red);
        assert!(!snapshot.is_in_check);
        assert!(!snapshot.is_ended);
        assert_eq!(snapshot.winner, None);
        assert!(snapshot.history.is_empty());
    }

    #[test]
    fn test_history_record() {
        let mut game = Game::opening();
        let from = Location::from_xy(7, 7).unwrap();
        let to = Location::from_xy(4, 7).unwrap();
        game.apply_move(from, to).unwrap();

        let snapshot = Snapshot::from(&game);
        assert_eq!(snapshot.current_turn, Side::Black);
        assert_eq!(snapshot.board[7][4], Some(Piece::new(PieceKind::Cannon, Side::Red)));
        assert_eq!(snapshot.board[7][7], None);
        assert_eq!(
            snapshot.history,
            vec![MoveRecord {
                from,
                to,
                piece: Piece::new(PieceKind::Cannon, Side::Red),
                captured: None,
                notation: "炮二平五".to_owned(),
            }]
        );
    }
}
