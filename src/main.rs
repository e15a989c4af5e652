use anyhow::{anyhow, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use std::io::{stdin, stdout, Write};
use std::time::Duration;

use connectk_ai::config::{DEFAULT_COLUMNS, DEFAULT_DEPTH, DEFAULT_ROWS, DEFAULT_WINDOW};
use connectk_ai::*;

mod display;
use display::display;

#[derive(Copy, Clone, Eq, PartialEq, Debug, ValueEnum)]
enum Controller {
    Human,
    Engine,
}

/// Play connect-k on the terminal against a game tree search agent
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Board height in tiles
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    rows: usize,

    /// Board width in tiles
    #[arg(long, default_value_t = DEFAULT_COLUMNS)]
    columns: usize,

    /// Number of pieces in a row needed to win
    #[arg(short = 'k', long, default_value_t = DEFAULT_WINDOW)]
    window: usize,

    /// Search depth of the engine in plies
    #[arg(short, long, default_value_t = DEFAULT_DEPTH)]
    depth: u32,

    /// Who plays for Player 1
    #[arg(long, value_enum, default_value_t = Controller::Human)]
    one: Controller,

    /// Who plays for Player 2
    #[arg(long, value_enum, default_value_t = Controller::Engine)]
    two: Controller,

    /// Break ties between equally scored moves at random, from this seed
    #[arg(long)]
    seed: Option<u64>,

    /// Search without alpha-beta cutoffs
    #[arg(long)]
    no_pruning: bool,

    /// Pause between moves when both players are engines
    #[arg(long, default_value_t = 1000)]
    delay_ms: u64,
}

impl Args {
    fn controller(&self, player: Player) -> Controller {
        match player {
            Player::One => self.one,
            Player::Two => self.two,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let config = GameConfig::new(args.rows, args.columns, args.window, args.depth)?;
    let mut searcher = Searcher::new(config)?.with_pruning(!args.no_pruning);
    if let Some(seed) = args.seed {
        searcher = searcher.with_seed(seed);
    }
    info!(?config, one = ?args.one, two = ?args.two, "starting game");

    let mut game = Game::new(config);
    let stdin = stdin();

    println!("Welcome to Connect {}\n", config.window());

    // game loop
    loop {
        display(game.board())?;

        match game.state() {
            GameState::Playing => {
                let player = game.to_move();
                let next_move = if args.controller(player) == Controller::Engine {
                    println!("AI is thinking...");
                    stdout().flush()?;

                    // slow down play if both players are AI
                    if args.one == Controller::Engine && args.two == Controller::Engine {
                        std::thread::sleep(Duration::from_millis(args.delay_ms));
                    }

                    let mut board = game.board().clone();
                    let result = searcher.choose_move(&mut board, player);
                    let column = result
                        .column
                        .ok_or_else(|| anyhow!("no playable column in an unfinished game"))?;

                    if let Some(win_distance) = searcher.score_to_win_distance(result.score) {
                        let winner = if result.score > 0 {
                            player
                        } else {
                            player.opponent()
                        };
                        let move_string = if win_distance == 1 { "move" } else { "moves" };
                        println!(
                            "Player {} can force a win in at most {} {}.",
                            winner.number(),
                            win_distance,
                            move_string
                        );
                    }

                    println!("Best move: {}", column + 1);
                    column

                // human player
                } else {
                    print!("Player {} move input > ", player.number());
                    stdout().flush()?;
                    let mut input_str = String::new();
                    if stdin.read_line(&mut input_str)? == 0 {
                        // end of input
                        return Ok(());
                    }

                    match input_str.trim().parse::<usize>() {
                        Ok(column) if column >= 1 => column - 1,
                        _ => {
                            println!("Invalid number: {}", input_str.trim());
                            continue;
                        }
                    }
                };

                if let Err(err) = game.play_checked(next_move) {
                    println!("{}", err);
                    // try the move again
                    continue;
                }
            }

            // end states
            GameState::Won(player) => {
                println!("Player {} wins!", player.number());
                break;
            }
            GameState::Draw => {
                println!("Draw!");
                break;
            }
        }
    }
    info!(moves = game.history().len(), state = ?game.state(), "game over");
    Ok(())
}
