use clap::Parser;
use frontend::line_stream::LineStream;
use frontend::logging;
use frontend::session::Session;
use log::{LevelFilter, info};
use std::error::Error;
use xiangqi::board::Board;
use xiangqi::engine::Engine;
use xiangqi::game::Game;
use xiangqi::piece::Side;

/// Serves the line protocol over stdin and stdout, one JSON response per request.
#[derive(Parser, Debug)]
struct Arguments {
    #[arg(short, long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,

    #[arg(long, help = "start from this position instead of the opening")]
    fen: Option<String>,

    #[arg(long, default_value_t = false, help = "give black the first move")]
    black: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let arguments = Arguments::parse();
    logging::init(arguments.log_level);

    let turn = if arguments.black { Side::Black } else { Side::Red };
    let fen = arguments.fen.as_deref().unwrap_or(Board::OPENING_FEN);
    let game = Game::from_fen(fen, turn)?;

    info!("serving {} with {} to move", game.fen(), game.turn());

    let stdin = std::io::stdin().lock();
    let stdout = std::io::stdout().lock();
    let mut stream = LineStream::new(stdin, stdout);
    Session::new(Engine::with_game(game)).serve(&mut stream)?;
    Ok(())
}
