use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Reasons a request to the engine is rejected. None of them change state.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("position ({x}, {y}) is outside the 9x10 board")]
    OutOfBounds { x: i32, y: i32 },

    #[error("the piece to move belongs to the side not on turn")]
    NotYourTurn,

    #[error("there is no piece at the source position")]
    NoPieceAtSource,

    #[error("the destination is not a legal move for that piece")]
    IllegalDestination,

    #[error("the game has already ended")]
    GameAlreadyEnded,

    #[error("there is no move to undo")]
    NoHistory,

    #[error("invalid FEN placement: {fen}")]
    InvalidFen { fen: String },

    /// Each side needs exactly one general, standing inside its own palace.
    #[error("the position does not have exactly one general per side inside its palace")]
    InvalidPosition,

    #[error("invalid move text: {text}")]
    InvalidMove { text: String },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Stable identifier used by hosts to branch on the error.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::OutOfBounds { .. } => "OutOfBounds",
            Self::NotYourTurn => "NotYourTurn",
            Self::NoPieceAtSource => "NoPieceAtSource",
            Self::IllegalDestination => "IllegalDestination",
            Self::GameAlreadyEnded => "GameAlreadyEnded",
            Self::NoHistory => "NoHistory",
            Self::InvalidFen { .. } => "InvalidFen",
            Self::InvalidPosition => "InvalidPosition",
            Self::InvalidMove { .. } => "InvalidMove",
        }
    }
}

impl Serialize for Error {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Error", 2)?;
        state.serialize_field("kind", self.kind())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}
