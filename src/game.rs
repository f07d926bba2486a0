use crate::board::Board;
use crate::check;
use crate::display_format::DisplayFormat;
use crate::error::{Error, Result};
use crate::location::{Location, Move};
use crate::notation::Notation;
use crate::piece::{Piece, PieceKind, Side};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A game in progress or finished: the board, whose turn it is, and every
/// move played so far. Only [`Game::apply_move`], [`Game::undo_move`] and
/// [`Game::new_game`] change it.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    turn: Side,
    history: Vec<HistoryEntry>,
    outcome: Option<Outcome>,
    in_check: bool,
}

/// One applied move with enough context to reverse it and to write it down.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub mv: Move,
    pub piece: Piece,
    pub captured: Option<Piece>,
}

impl HistoryEntry {
    /// The side that made this move.
    pub fn side(&self) -> Side {
        self.piece.side
    }

    pub fn notation(&self) -> Notation {
        Notation::new(self.mv, self.piece)
    }
}

/// How a finished game ended. Running out of legal moves loses whether or
/// not the general is attacked; there is no draw by stalemate.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Outcome {
    GeneralCaptured { winner: Side },
    Checkmate { winner: Side },
    Stalemate { winner: Side },
}

impl Outcome {
    pub fn winner(&self) -> Side {
        match *self {
            Self::GeneralCaptured { winner } | Self::Checkmate { winner } | Self::Stalemate { winner } => winner,
        }
    }

    pub fn display(&self, format: DisplayFormat) -> impl Display + use<> {
        let general = |side| Piece::new(PieceKind::General, side).display(format.with_concise(false));
        let winner = self.winner();
        let loser = winner.opponent();
        match self {
            Self::GeneralCaptured { .. } => format!("{} won by capturing {}", general(winner), general(loser)),
            Self::Checkmate { .. } => format!("{} won by checkmating {loser}", general(winner)),
            Self::Stalemate { .. } => format!("{} won, {loser} has no legal move", general(winner)),
        }
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display(DisplayFormat::string()))
    }
}

/// A red move and the black reply, numbered from 1.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct Round {
    pub number: usize,
    pub red: Option<HistoryEntry>,
    pub black: Option<HistoryEntry>,
}

impl Game {
    /// Starts a game from an arbitrary position.
    ///
    /// Fails with [`Error::InvalidPosition`] unless each side has exactly one
    /// general inside its own palace.
    pub fn new(board: Board, turn: Side) -> Result<Self> {
        for side in [Side::Red, Side::Black] {
            let mut generals = board
                .iter_pieces(side)
                .filter(|(_, piece)| piece.kind == PieceKind::General);
            let valid = generals.next().is_some_and(|(location, _)| location.is_in_palace(side));
            if !valid || generals.next().is_some() {
                return Err(Error::InvalidPosition);
            }
        }

        let mut game = Self {
            board,
            turn,
            history: Vec::new(),
            outcome: None,
            in_check: false,
        };
        game.evaluate(None);
        Ok(game)
    }

    pub fn opening() -> Self {
        Self {
            board: Board::opening(),
            turn: Side::Red,
            history: Vec::new(),
            outcome: None,
            in_check: false,
        }
    }

    pub fn from_fen(fen: &str, turn: Side) -> Result<Self> {
        Self::new(Board::from_fen(fen)?, turn)
    }

    pub fn fen(&self) -> String {
        self.board.fen()
    }

    /// Throws away the current game and sets up the opening position.
    pub fn new_game(&mut self) {
        debug!("starting new game");
        *self = Self::opening();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_ended(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn winner(&self) -> Option<Side> {
        self.outcome.map(|outcome| outcome.winner())
    }

    /// Whether the side to move has its general attacked.
    pub fn is_in_check(&self) -> bool {
        self.in_check
    }

    /// Legal destinations for the piece at `location`, in row-major order.
    /// Empty when the cell is empty, holds a piece of the side not on turn,
    /// or the game is over.
    pub fn get_valid_moves(&self, location: Location) -> Vec<Location> {
        if self.is_ended() || self.board[location].is_none_or(|piece| piece.side != self.turn) {
            return Vec::new();
        }

        let mut moves = check::legal_destinations(&self.board, location);
        moves.sort_by_key(|location| location.index());
        moves
    }

    /// Every legal move for the side to move.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_ended() {
            return Vec::new();
        }
        check::iter_legal_moves(&self.board, self.turn).collect()
    }

    pub fn apply_move(&mut self, from: Location, to: Location) -> Result<HistoryEntry> {
        let result = self.try_apply_move(from, to);
        if let Err(err) = &result {
            trace!("rejected {from}{to} for {}: {err}", self.turn);
        }
        result
    }

    fn try_apply_move(&mut self, from: Location, to: Location) -> Result<HistoryEntry> {
        if self.is_ended() {
            return Err(Error::GameAlreadyEnded);
        }

        let piece = self.board[from].ok_or(Error::NoPieceAtSource)?;
        if piece.side != self.turn {
            return Err(Error::NotYourTurn);
        }

        if !check::legal_destinations(&self.board, from).contains(&to) {
            return Err(Error::IllegalDestination);
        }

        let mv = Move { from, to };
        let (piece, captured) = self.board.play(mv);
        let entry = HistoryEntry { mv, piece, captured };

        self.history.push(entry);
        self.turn = self.turn.opponent();
        debug!("({}) {} played {mv} {}", self.history.len(), piece.side, entry.notation());

        self.evaluate(captured);
        if let Some(outcome) = self.outcome {
            debug!("game over: {outcome}");
        }

        Ok(entry)
    }

    /// Takes back the last move. The game is always in progress afterwards.
    pub fn undo_move(&mut self) -> Result<HistoryEntry> {
        let Some(entry) = self.history.pop() else {
            trace!("rejected undo: no history");
            return Err(Error::NoHistory);
        };

        self.board.undo(entry.mv, entry.piece, entry.captured);
        self.turn = entry.side();
        self.outcome = None;
        self.in_check = check::is_in_check(&self.board, self.turn);

        debug!("({}) {} took back {}", self.history.len() + 1, entry.side(), entry.mv);
        Ok(entry)
    }

    /// Groups the history into numbered rounds, each opened by a red move.
    pub fn rounds(&self) -> Vec<Round> {
        let mut rounds: Vec<Round> = Vec::new();
        for &entry in &self.history {
            match entry.side() {
                Side::Red => rounds.push(Round {
                    number: rounds.len() + 1,
                    red: Some(entry),
                    black: None,
                }),
                Side::Black => match rounds.last_mut() {
                    Some(round) if round.black.is_none() => round.black = Some(entry),
                    _ => rounds.push(Round {
                        number: rounds.len() + 1,
                        red: None,
                        black: Some(entry),
                    }),
                },
            }
        }
        rounds
    }

    /// Derives `outcome` and `in_check` for the side now on turn.
    fn evaluate(&mut self, captured: Option<Piece>) {
        if let Some(captured) = captured
            && captured.kind == PieceKind::General
        {
            self.in_check = false;
            self.outcome = Some(Outcome::GeneralCaptured {
                winner: captured.side.opponent(),
            });
            return;
        }

        self.in_check = check::is_in_check(&self.board, self.turn);
        self.outcome = if check::has_legal_move(&self.board, self.turn) {
            None
        } else if self.in_check {
            Some(Outcome::Checkmate {
                winner: self.turn.opponent(),
            })
        } else {
            Some(Outcome::Stalemate {
                winner: self.turn.opponent(),
            })
        };
    }

    pub fn display(&self, format: DisplayFormat) -> impl Display + '_ {
        struct Impl<'a>(&'a Game, DisplayFormat);
        return Impl(self, format);

        impl Impl<'_> {
            fn format_row(&self, f: &mut Formatter<'_>, y: i8) -> std::fmt::Result {
                let &Self(game, format) = self;
                write!(f, "{y}")?;

                let last = game.history.last().map(|entry| entry.mv);
                for x in 0..Board::WIDTH {
                    let Some(location) = Location::from_xy(x, y) else { continue };
                    match game.board[location] {
                        Some(piece) => {
                            let piece = piece.display(format.with_concise(true));
                            if format.effects && last.is_some_and(|mv| mv.to == location) {
                                write!(f, " \x1B[3m{piece}\x1B[0m")?;
                            } else {
                                write!(f, " {piece}")?;
                            }
                        }
                        None if last.is_some_and(|mv| mv.from == location) => write!(f, " ╶╴")?,
                        None => write!(f, "   ")?,
                    }
                }

                Ok(())
            }

            fn format_captured(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                let &Self(game, format) = self;
                let mut captured = game.history.iter().filter_map(|entry| entry.captured).peekable();
                if captured.peek().is_none() {
                    return Ok(());
                }

                write!(f, "captured:")?;
                for piece in captured {
                    write!(f, " {}", piece.display(format.with_concise(true)))?;
                }
                writeln!(f)
            }
        }

        impl Display for Impl<'_> {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                let &Self(game, format) = self;

                if format.concise {
                    return write!(f, "{} {}", game.board.fen(), game.turn);
                }

                for y in 0..Board::HEIGHT {
                    self.format_row(f, y)?;
                    writeln!(f)?;
                }

                write!(f, " ")?;
                for char in 'A'..='I' {
                    write!(f, "  {char}")?;
                }
                writeln!(f)?;
                self.format_captured(f)?;

                if let Some(entry) = game.history.last() {
                    let notation = entry.notation().display(format);
                    write!(f, "({}) {} {notation} - ", game.history.len(), entry.mv)?;
                }

                if let Some(outcome) = game.outcome {
                    write!(f, "{}", outcome.display(format))?;
                } else {
                    let general = Piece::new(PieceKind::General, game.turn).display(format);
                    let status = if game.in_check { "in check" } else { "to play" };
                    write!(f, "{general} {status} - {} legal moves", game.legal_moves().len())?;
                }

                writeln!(f)
            }
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::opening()
    }
}

impl Display for Game {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display(DisplayFormat::string()))
    }
}
