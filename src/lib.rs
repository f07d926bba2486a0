pub mod board;
pub mod check;
pub mod display_format;
pub mod engine;
pub mod error;
pub mod game;
pub mod location;
pub mod movegen;
pub mod notation;
pub mod piece;
pub mod snapshot;
