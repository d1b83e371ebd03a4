use std::process::ExitCode;

use backend::Session;
use board::{Color, GameConfig};
use clap::Parser;
use random_player::RandomStrategy;

#[derive(Debug, Parser)]
#[command(name = "backend", about = "Play automated chess games between move strategies")]
struct Args {
    /// Position to start from, as FEN (the standard opening if not given)
    ///
    /// The board may be any rectangular size.
    #[arg(long)]
    fen: Option<String>,

    /// Strategy choosing white's moves
    #[arg(long, default_value = RandomStrategy::NAME)]
    white: String,

    /// Strategy choosing black's moves
    #[arg(long, default_value = RandomStrategy::NAME)]
    black: String,

    /// Stop after this many half-moves, even if the game isn't over
    #[arg(long, default_value_t = 200)]
    max_plies: usize,

    /// Seed for the strategies' random choices, to replay a game exactly
    #[arg(long)]
    seed: Option<u64>,

    /// Print the names of the available strategies and exit
    #[arg(long)]
    list_strategies: bool,
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> backend::Result<()> {
    let mut session = match args.seed {
        Some(seed) => Session::seeded(GameConfig::STANDARD, seed)?,
        None => Session::new(GameConfig::STANDARD)?,
    };
    if args.list_strategies {
        for name in session.strategies().names() {
            println!("{name}");
        }
        return Ok(());
    }
    if let Some(fen) = &args.fen {
        session.set_fen(fen)?;
    }
    // Catch a misspelt strategy before any moves are made
    session.select_strategy(&args.black)?;
    session.select_strategy(&args.white)?;

    println!("0 - {} {}", session.fen(), session.status());
    for ply in 1..=args.max_plies {
        let strategy = match session.turn() {
            Color::White => &args.white,
            Color::Black => &args.black,
        };
        session.select_strategy(strategy)?;
        let Some(mv) = session.play_best_move()? else {
            break;
        };
        println!(
            "{ply} {} {} {}",
            session.uci(mv)?,
            session.fen(),
            session.status()
        );
    }
    println!("{}", session.status());
    Ok(())
}
