use std::process::ExitCode;

use chess_core::{Color, Position};
use chess_engine::{search::best_move, Difficulty, Game, GameStatus};
use clap::{Parser, Subcommand};
use log::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Chess engine with a negamax opponent")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Let the engine play both sides
    SelfPlay {
        #[arg(long, default_value_t = Difficulty::Medium)]
        white: Difficulty,
        #[arg(long, default_value_t = Difficulty::Medium)]
        black: Difficulty,
        /// Seed for reproducible games
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 200)]
        max_plies: usize,
    },
    /// Play the given moves (e.g. e2e3 e7e6) and print the strongest reply
    Suggest {
        #[arg(long, default_value_t = 3)]
        depth: u8,
        moves: Vec<String>,
    },
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match Cli::parse().command {
        Command::SelfPlay {
            white,
            black,
            seed,
            max_plies,
        } => self_play(white, black, seed, max_plies),
        Command::Suggest { depth, moves } => suggest(depth, &moves),
    }
}

fn self_play(
    white: Difficulty,
    black: Difficulty,
    seed: Option<u64>,
    max_plies: usize,
) -> ExitCode {
    let mut game = match seed {
        Some(seed) => Game::with_seed(seed),
        None => Game::new(),
    };
    info!("self-play: white {} vs black {}", white, black);

    for ply in 0..max_plies {
        let difficulty = match game.current_turn() {
            Color::White => white,
            Color::Black => black,
        };
        match game.ai_move(difficulty) {
            Some(mv) => info!("{:>3}. {}", ply / 2 + 1, mv),
            None => break,
        }
    }

    match game.status() {
        GameStatus::Checkmate { winner } => info!("checkmate, {:?} wins", winner),
        GameStatus::Stalemate => info!("stalemate"),
        GameStatus::InProgress | GameStatus::Check(_) => {
            info!("stopped after {} plies", game.move_history().len())
        }
    }
    ExitCode::SUCCESS
}

fn parse_move(text: &str) -> Option<(Position, Position)> {
    if text.len() != 4 || !text.is_ascii() {
        return None;
    }
    let from = Position::from_algebraic(&text[..2])?;
    let to = Position::from_algebraic(&text[2..])?;
    Some((from, to))
}

fn suggest(depth: u8, moves: &[String]) -> ExitCode {
    let mut game = Game::new();

    for text in moves {
        let Some((from, to)) = parse_move(text) else {
            error!("cannot read move '{}'", text);
            return ExitCode::FAILURE;
        };
        if !game.attempt_move(from, to) {
            error!("illegal move '{}'", text);
            return ExitCode::FAILURE;
        }
    }

    let to_move = game.current_turn();
    match best_move(game.board(), to_move, depth) {
        Some(mv) => {
            println!("{}{}", mv.from, mv.to);
            info!("{:?} to move, best at depth {}: {}", to_move, depth, mv);
        }
        None => println!("none"),
    }
    ExitCode::SUCCESS
}
