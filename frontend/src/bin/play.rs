use clap::{Parser, Subcommand};
use frontend::logging;
use log::LevelFilter;
use std::error::Error;
use xiangqi::board::Board;
use xiangqi::display_format::DisplayFormat;
use xiangqi::engine::Engine;
use xiangqi::game::{Game, HistoryEntry};
use xiangqi::location::{Location, Move};
use xiangqi::piece::Side;

/// Two players sharing one terminal board.
#[derive(Parser, Debug)]
struct Arguments {
    #[arg(long, default_value_t = false, help = "letters and WXF notation instead of chinese")]
    ascii: bool,

    #[arg(long, default_value_t = false, help = "disable colors and other escape codes")]
    no_effects: bool,

    #[arg(long, help = "start from this position instead of the opening")]
    fen: Option<String>,

    #[arg(long, default_value_t = false, help = "give black the first move")]
    black: bool,

    #[arg(short, long, default_value_t = LevelFilter::Warn)]
    log_level: LevelFilter,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(alias = "p", about = "play a move written as source and destination, such as a9a6")]
    Play { mv: Move },
    #[command(alias = "m", about = "list where the piece on a cell may go")]
    Moves { location: Location },
    #[command(alias = "u", about = "take back the last move")]
    Undo,
    #[command(alias = "h", about = "show the moves played so far")]
    History,
    #[command(about = "start over from the opening position")]
    New,
    #[command(alias = "q")]
    Quit,
}

fn main() -> Result<(), Box<dyn Error>> {
    let arguments = Arguments::parse();
    logging::init(arguments.log_level);

    DisplayFormat::set_default_chinese(!arguments.ascii);
    DisplayFormat::set_default_effects(!arguments.no_effects);

    let turn = if arguments.black { Side::Black } else { Side::Red };
    let fen = arguments.fen.as_deref().unwrap_or(Board::OPENING_FEN);
    let mut engine = Engine::with_game(Game::from_fen(fen, turn)?);
    let format = DisplayFormat::pretty();

    println!("{}", engine.game().display(format));

    while let Some(command) = read_input::<Command>()? {
        match command {
            Command::Play { mv } => {
                let Move { from, to } = mv;
                match engine.make_move(from.x().into(), from.y().into(), to.x().into(), to.y().into()) {
                    Ok(_) => println!("{}", engine.game().display(format)),
                    Err(err) => println!("cannot play {mv}: {err}"),
                }
            }
            Command::Moves { location } => {
                let moves = engine.get_valid_moves(location.x().into(), location.y().into());
                if moves.is_empty() {
                    println!("no legal moves from {location}");
                    continue;
                }

                let moves: Vec<String> = moves
                    .into_iter()
                    .filter_map(|(x, y)| Location::try_from_xy(x, y).ok())
                    .map(|to| to.to_string())
                    .collect();
                println!("{location}: {}", moves.join(" "));
            }
            Command::Undo => match engine.undo_move() {
                Ok(_) => println!("{}", engine.game().display(format)),
                Err(err) => println!("{err}"),
            },
            Command::History => {
                for round in engine.game().rounds() {
                    let notation = |entry: Option<HistoryEntry>| match entry {
                        Some(entry) => entry.notation().display(format).to_string(),
                        None => "...".to_owned(),
                    };
                    println!("{:>3}. {} {}", round.number, notation(round.red), notation(round.black));
                }
            }
            Command::New => {
                engine.new_game();
                println!("{}", engine.game().display(format));
            }
            Command::Quit => break,
        }
    }

    Ok(())
}

/// Parses one line of stdin as a subcommand, asking again until it parses.
/// `None` once stdin is closed.
fn read_input<T: clap::FromArgMatches + clap::Subcommand>() -> Result<Option<T>, std::io::Error> {
    loop {
        let mut line = String::new();
        if std::io::stdin().read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let parts = line.split_whitespace();

        #[derive(Parser)]
        #[command(
            name = "",
            no_binary_name = true,
            disable_help_flag = true,
            disable_version_flag = true,
            next_line_help = false,
            help_template = "{usage-heading} {usage}\n{all-args}"
        )]
        struct Input<T: clap::FromArgMatches + clap::Subcommand> {
            #[command(subcommand)]
            command: T,
        }

        match Input::<T>::try_parse_from(parts) {
            Ok(Input { command }) => return Ok(Some(command)),
            Err(err) => {
                print!("{}", err);
                continue;
            }
        };
    }
}
