//! The command surface hosts drive. Coordinates arrive as raw integers and
//! are checked here before they reach the [`Game`].

use crate::error::Result;
use crate::game::Game;
use crate::location::Location;
use crate::snapshot::Snapshot;
use log::trace;

#[derive(Clone, Debug, Default)]
pub struct Engine {
    game: Game,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_game(game: Game) -> Self {
        Self { game }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn new_game(&mut self) -> Snapshot {
        self.game.new_game();
        self.game_state()
    }

    /// Legal destinations from `(x, y)` in row-major order.
    pub fn get_valid_moves(&self, x: i32, y: i32) -> Vec<(i32, i32)> {
        let Ok(location) = Location::try_from_xy(x, y) else {
            trace!("valid moves requested off the board at ({x}, {y})");
            return Vec::new();
        };

        self.game
            .get_valid_moves(location)
            .into_iter()
            .map(|to| (to.x() as i32, to.y() as i32))
            .collect()
    }

    pub fn make_move(&mut self, from_x: i32, from_y: i32, to_x: i32, to_y: i32) -> Result<Snapshot> {
        let from = Location::try_from_xy(from_x, from_y)?;
        let to = Location::try_from_xy(to_x, to_y)?;
        self.game.apply_move(from, to)?;
        Ok(self.game_state())
    }

    pub fn undo_move(&mut self) -> Result<Snapshot> {
        self.game.undo_move()?;
        Ok(self.game_state())
    }

    pub fn game_state(&self) -> Snapshot {
        Snapshot::from(&self.game)
    }
}
