//! Attack detection and the legal move filter built on top of `movegen`.

use crate::board::Board;
use crate::location::{Location, Move};
use crate::movegen;
use crate::piece::Side;

/// Whether any piece of `by_side` could move onto `target`.
///
/// Generals facing each other on an open file attack one another, which the
/// general's own move generation already accounts for.
pub fn is_attacked(board: &Board, target: Location, by_side: Side) -> bool {
    let mut destinations = Vec::new();
    board.iter_pieces(by_side).any(|(from, piece)| {
        destinations.clear();
        movegen::fill_destinations(board, from, piece, &mut destinations);
        destinations.contains(&target)
    })
}

/// # Panics
/// If `side` has no general on the board.
pub fn is_in_check(board: &Board, side: Side) -> bool {
    let Some(general) = board.find_general(side) else {
        panic!("{side} general is missing from the board");
    };
    is_attacked(board, general, side.opponent())
}

/// Legal destinations of the piece at `from`, in generation order.
pub fn legal_destinations(board: &Board, from: Location) -> Vec<Location> {
    let Some(piece) = board[from] else {
        return Vec::new();
    };

    let mut candidates = Vec::new();
    movegen::fill_destinations(board, from, piece, &mut candidates);

    let mut scratch = *board;
    candidates.retain(|&to| is_legal_on(&mut scratch, Move { from, to }));
    candidates
}

pub fn is_legal(board: &Board, mv: Move) -> bool {
    legal_destinations(board, mv.from).contains(&mv.to)
}

pub fn iter_legal_moves(board: &Board, side: Side) -> impl Iterator<Item = Move> + '_ {
    let mut scratch = *board;
    movegen::iter_pseudo_moves(board, side).filter(move |&mv| is_legal_on(&mut scratch, mv))
}

pub fn has_legal_move(board: &Board, side: Side) -> bool {
    iter_legal_moves(board, side).next().is_some()
}

/// Plays a pseudo-legal move on `scratch`, tests the mover's general and
/// reverts, leaving `scratch` as it was.
fn is_legal_on(scratch: &mut Board, mv: Move) -> bool {
    let (piece, capture) = scratch.play(mv);
    let legal = !is_in_check(scratch, piece.side);
    scratch.undo(mv, piece, capture);
    legal
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::{Piece, PieceKind};

    fn at(x: i8, y: i8) -> Location {
        Location::from_xy(x, y).unwrap()
    }

    #[test]
    fn test_opening_not_in_check() {
        let board = Board::opening();
        assert!(!is_in_check(&board, Side::Red));
        assert!(!is_in_check(&board, Side::Black));
        assert_eq!(iter_legal_moves(&board, Side::Red).count(), 44);
    }

    #[test]
    fn test_chariot_check() {
        let board = Board::from_fen("4k4/9/9/9/9/9/9/9/9/3R1K3").unwrap();
        assert!(!is_in_check(&board, Side::Black));
        assert!(!is_in_check(&board, Side::Red));

        let board = Board::from_fen("4k4/9/9/9/9/9/9/9/9/4RK3").unwrap();
        assert!(is_in_check(&board, Side::Black));
    }

    #[test]
    fn test_flying_general() {
        let board = Board::from_fen("4k4/9/9/9/9/9/9/9/9/4K4").unwrap();
        assert!(is_in_check(&board, Side::Red));
        assert!(is_in_check(&board, Side::Black));

        let board = Board::from_fen("4k4/9/9/9/4p4/9/9/9/9/4K4").unwrap();
        assert!(!is_in_check(&board, Side::Red));
        assert!(!is_in_check(&board, Side::Black));
    }

    #[test]
    fn test_cannon_check_needs_screen() {
        let board = Board::from_fen("4k4/9/9/9/9/9/9/4C4/9/3K5").unwrap();
        assert!(!is_in_check(&board, Side::Black));

        let board = Board::from_fen("4k4/9/9/9/4p4/9/9/4C4/9/3K5").unwrap();
        assert!(is_in_check(&board, Side::Black));
    }

    #[test]
    fn test_pinned_piece_cannot_leave_file() {
        // the red chariot on e5 shields its general from the black chariot
        let board = Board::from_fen("3k5/4r4/9/9/9/4R4/9/9/9/4K4").unwrap();
        let moves = legal_destinations(&board, at(4, 5));
        assert!(!moves.is_empty());
        assert!(moves.iter().all(|to| to.x() == 4));
        assert!(moves.contains(&at(4, 1)));
    }

    #[test]
    fn test_general_cannot_face_general() {
        let board = Board::from_fen("3k5/9/9/9/9/9/9/9/9/4K4").unwrap();
        let moves = legal_destinations(&board, at(4, 9));
        assert!(!moves.contains(&at(3, 9)));
        assert!(moves.contains(&at(5, 9)));
        assert!(moves.contains(&at(4, 8)));
    }

    #[test]
    fn test_screen_cannot_step_aside() {
        // the crossed soldier is the only piece between the generals
        let board = Board::from_fen("4k4/9/9/9/4P4/9/9/9/9/4K4").unwrap();
        let soldier = at(4, 4);
        assert_eq!(legal_destinations(&board, soldier), vec![at(4, 3)]);
        assert!(!is_legal(&board, Move::new(soldier, at(3, 4))));
        assert!(is_legal(&board, Move::new(soldier, at(4, 3))));
    }

    #[test]
    fn test_legal_moves_never_leave_check() {
        let board = Board::from_fen("3k5/9/9/9/9/9/9/2h6/9/3K1A3").unwrap();
        assert!(is_in_check(&board, Side::Red));
        assert!(has_legal_move(&board, Side::Red));
        for mv in iter_legal_moves(&board, Side::Red) {
            let mut scratch = board;
            scratch.play(mv);
            assert!(!is_in_check(&scratch, Side::Red), "{mv} leaves red in check");
        }
    }

    #[test]
    fn test_checkmate_has_no_moves() {
        // two chariots seal the red general on the back rank
        let mut board = Board::new();
        board[at(4, 9)] = Some(Piece::new(PieceKind::General, Side::Red));
        board[at(3, 0)] = Some(Piece::new(PieceKind::General, Side::Black));
        board[at(0, 9)] = Some(Piece::new(PieceKind::Chariot, Side::Black));
        board[at(0, 8)] = Some(Piece::new(PieceKind::Chariot, Side::Black));

        assert!(is_in_check(&board, Side::Red));
        assert!(!has_legal_move(&board, Side::Red));
        assert!(has_legal_move(&board, Side::Black));
    }

    #[test]
    #[should_panic]
    fn test_missing_general_panics() {
        is_in_check(&Board::new(), Side::Red);
    }
}
