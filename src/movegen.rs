//! Pseudo-legal move generation: piece geometry and occupancy only, without
//! asking whether the mover's own general ends up attacked.

use crate::board::Board;
use crate::location::{Location, Move};
use crate::piece::{Piece, PieceKind, Side};

const ORTHOGONAL: [(i8, i8); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];
const DIAGONAL: [(i8, i8); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];
const HORSE: [(i8, i8); 8] = [(1, 2), (-1, 2), (1, -2), (-1, -2), (2, 1), (-2, 1), (2, -1), (-2, -1)];

/// Destinations the piece at `from` could reach, empty if `from` is empty.
pub fn destinations(board: &Board, from: Location) -> Vec<Location> {
    let mut result = Vec::new();
    if let Some(piece) = board[from] {
        fill_destinations(board, from, piece, &mut result);
    }
    result
}

pub fn fill_destinations(board: &Board, from: Location, piece: Piece, out: &mut Vec<Location>) {
    match piece.kind {
        PieceKind::General => general(board, from, piece.side, out),
        PieceKind::Advisor => advisor(board, from, piece.side, out),
        PieceKind::Elephant => elephant(board, from, piece.side, out),
        PieceKind::Horse => horse(board, from, piece.side, out),
        PieceKind::Chariot => chariot(board, from, piece.side, out),
        PieceKind::Cannon => cannon(board, from, piece.side, out),
        PieceKind::Soldier => soldier(board, from, piece.side, out),
    }
}

/// Every pseudo-legal move of `side`, in board order.
pub fn iter_pseudo_moves(board: &Board, side: Side) -> impl Iterator<Item = Move> + '_ {
    board.iter_pieces(side).flat_map(move |(from, piece)| {
        let mut destinations = Vec::new();
        fill_destinations(board, from, piece, &mut destinations);
        destinations.into_iter().map(move |to| Move { from, to })
    })
}

fn can_land(board: &Board, to: Location, side: Side) -> bool {
    board[to].is_none_or(|piece| piece.side != side)
}

fn general(board: &Board, from: Location, side: Side, out: &mut Vec<Location>) {
    for (dx, dy) in ORTHOGONAL {
        if let Some(to) = from.shift_xy(dx, dy)
            && to.is_in_palace(side)
            && can_land(board, to, side)
        {
            out.push(to);
        }
    }

    // facing generals: the first piece up or down the file
    for dy in [-1, 1] {
        if let Some((to, piece)) = first_piece(board, from, 0, dy)
            && piece.kind == PieceKind::General
            && piece.side != side
        {
            out.push(to);
        }
    }
}

fn advisor(board: &Board, from: Location, side: Side, out: &mut Vec<Location>) {
    for (dx, dy) in DIAGONAL {
        if let Some(to) = from.shift_xy(dx, dy)
            && to.is_in_palace(side)
            && can_land(board, to, side)
        {
            out.push(to);
        }
    }
}

fn elephant(board: &Board, from: Location, side: Side, out: &mut Vec<Location>) {
    for (dx, dy) in DIAGONAL {
        let Some(eye) = from.shift_xy(dx, dy) else { continue };
        let Some(to) = eye.shift_xy(dx, dy) else { continue };
        if board[eye].is_none() && to.is_own_half(side) && can_land(board, to, side) {
            out.push(to);
        }
    }
}

fn horse(board: &Board, from: Location, side: Side, out: &mut Vec<Location>) {
    for (dx, dy) in HORSE {
        let Some(to) = from.shift_xy(dx, dy) else { continue };

        // the leg sits one step along the long side of the L
        let leg = if dx.abs() == 2 { from.shift_x(dx / 2) } else { from.shift_y(dy / 2) };
        if leg.is_some_and(|leg| board[leg].is_none()) && can_land(board, to, side) {
            out.push(to);
        }
    }
}

fn chariot(board: &Board, from: Location, side: Side, out: &mut Vec<Location>) {
    for (dx, dy) in ORTHOGONAL {
        let mut current = from;
        while let Some(to) = current.shift_xy(dx, dy) {
            match board[to] {
                None => out.push(to),
                Some(piece) => {
                    if piece.side != side {
                        out.push(to);
                    }
                    break;
                }
            }
            current = to;
        }
    }
}

fn cannon(board: &Board, from: Location, side: Side, out: &mut Vec<Location>) {
    for (dx, dy) in ORTHOGONAL {
        let mut current = from;
        let screen = loop {
            let Some(to) = current.shift_xy(dx, dy) else { break None };
            if board[to].is_some() {
                break Some(to);
            }
            out.push(to);
            current = to;
        };

        if let Some(screen) = screen
            && let Some((to, piece)) = first_piece(board, screen, dx, dy)
            && piece.side != side
        {
            out.push(to);
        }
    }
}

fn soldier(board: &Board, from: Location, side: Side, out: &mut Vec<Location>) {
    let forward = match side {
        Side::Red => -1,
        Side::Black => 1,
    };

    if let Some(to) = from.shift_y(forward)
        && can_land(board, to, side)
    {
        out.push(to);
    }

    if !from.is_own_half(side) {
        for dx in [-1, 1] {
            if let Some(to) = from.shift_x(dx)
                && can_land(board, to, side)
            {
                out.push(to);
            }
        }
    }
}

/// The first occupied cell strictly past `from` in direction `(dx, dy)`.
fn first_piece(board: &Board, from: Location, dx: i8, dy: i8) -> Option<(Location, Piece)> {
    let mut current = from;
    loop {
        current = current.shift_xy(dx, dy)?;
        if let Some(piece) = board[current] {
            return Some((current, piece));
        }
    }
}
