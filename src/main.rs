//! Interactive hot-seat Azul in the terminal
//!
//! Usage: cargo run -- [--players 3] [--names Ann,Bob,Cy] [--seed 7] [--config rules.json]

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use azul::display::{display_game, display_result, display_round_scores, format_move, BOLD, RESET};
use azul::prompt::{parse_color, parse_destination, parse_source, prompt_line};
use azul_engine::{AzulError, Game, GameConfig, Move, TurnOutcome};

/// Hot-seat Azul for 2-4 players
#[derive(Parser, Debug)]
#[command(name = "azul")]
#[command(about = "Play Azul in the terminal", long_about = None)]
struct Args {
    /// Number of players (prompted for when neither this nor --names is given)
    #[arg(long)]
    players: Option<usize>,

    /// Comma-separated player names, in seating order
    #[arg(long, value_delimiter = ',')]
    names: Vec<String>,

    /// Seed for the bag (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON ruleset; missing fields take the standard values
    #[arg(long)]
    config: Option<PathBuf>,
}

fn load_config(path: Option<&PathBuf>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config: GameConfig = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

/// Player names from the flags, prompting for whatever is missing
fn player_names(
    args: &Args,
    config: &GameConfig,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<Vec<String>> {
    let count = match (args.players, args.names.len()) {
        (Some(n), given) if given > n => bail!("{given} names given for {n} players"),
        (Some(n), _) => n,
        (None, given) if given > 0 => given,
        (None, _) => loop {
            let question = format!(
                "How many players are playing the game? (min: {}; max: {})",
                config.min_number_of_players, config.max_number_of_players
            );
            let Some(answer) = prompt_line(input, output, &question)? else {
                bail!("no player count given");
            };
            match answer.parse::<usize>() {
                Ok(n) if config.factories_for(n).is_ok() => break n,
                _ => writeln!(output, "Invalid number of players")?,
            }
        },
    };

    let mut names = args.names.clone();
    for seat in names.len()..count {
        let question = format!("What is player #{seat}'s name?");
        let name = prompt_line(input, output, &question)?
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| format!("Player {seat}"));
        names.push(name);
    }
    Ok(names)
}

/// Ask the current player for a move until one parses. `None` on end of input.
fn read_move(input: &mut impl BufRead, output: &mut impl Write) -> Result<Option<Move>> {
    loop {
        let Some(source) = prompt_line(
            input,
            output,
            "Would you like to draw from a factory or from the center of the table (type a factory number or 'center')?",
        )?
        else {
            return Ok(None);
        };
        let Some(color) = prompt_line(input, output, "Which color would you like to draw?")? else {
            return Ok(None);
        };
        let Some(destination) = prompt_line(
            input,
            output,
            "Which pattern line gets the tiles (1-5, or 'floor')?",
        )?
        else {
            return Ok(None);
        };

        let parsed = parse_source(&source).and_then(|source| {
            Ok(Move {
                source,
                color: parse_color(&color)?,
                destination: parse_destination(&destination)?,
            })
        });
        match parsed {
            Ok(mv) => return Ok(Some(mv)),
            Err(err) => writeln!(output, "{err}")?,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(args.config.as_ref())?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    println!("AZUL STARTING ...\n");
    let names = player_names(&args, &config, &mut input, &mut output)?;
    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, players = names.len(), "starting game");
    let mut game = Game::new(config, names, seed)?;

    loop {
        let seat = game.current_player();
        display_game(&game, Some(seat));
        println!("{BOLD}{}'s turn{RESET}", game.players()[seat].name());

        let Some(mv) = read_move(&mut input, &mut output)? else {
            println!("\nGoodbye!");
            return Ok(());
        };
        match game.take_turn(mv) {
            Ok(TurnOutcome::Continue { .. }) => println!("Played {}", format_move(&mv)),
            Ok(TurnOutcome::RoundOver { scores, .. }) => display_round_scores(&game, &scores),
            Ok(TurnOutcome::GameOver { scores, result }) => {
                display_round_scores(&game, &scores);
                display_game(&game, None);
                display_result(&game, &result);
                return Ok(());
            }
            Err(err @ AzulError::InvalidAction(_)) => println!("{err}"),
            Err(err) => return Err(err.into()),
        }
    }
}
