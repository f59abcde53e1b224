use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{bail, Context, Result};
use clap::Parser;

use chess_replay::import::chess_import::{
    import_game, GameLink, ImportConfig, ImportRequest, ImportResult, MoveNumbering,
};

#[derive(Parser, Debug)]
#[command(name = "chess_replay")]
#[command(about = "Replay a PGN game and print the position at a requested move as FEN")]
#[command(version)]
struct Args {
    /// PGN file to import (reads stdin when omitted)
    #[arg(value_name = "PGN_FILE")]
    pgn_file: Option<PathBuf>,

    /// Move to snapshot; counted in plies unless --full-moves is given
    #[arg(short, long = "move", value_name = "N")]
    move_number: Option<u32>,

    /// Take the requested move from an analysis-board link (`...?move=66`)
    #[arg(long, value_name = "URL", conflicts_with = "move_number")]
    link: Option<String>,

    /// Count --move in full moves instead of plies
    #[arg(long)]
    full_moves: bool,

    /// Reject records with more plies than this
    #[arg(long, value_name = "N", default_value_t = ImportConfig::default().max_plies)]
    max_plies: usize,

    /// Print the import result as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .format(|buf, record| writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args()))
    .write_style(env_logger::WriteStyle::Never)
    .target(env_logger::Target::Stderr)
    .init();

    if let Err(e) = run(args) {
        log::error!("{e:#}");
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let pgn = read_input(args.pgn_file.as_ref())?;

    let requested_move = match &args.link {
        Some(link) => {
            let parsed = GameLink::parse(link).with_context(|| format!("Invalid game link: '{link}'"))?;
            log::debug!("link points at game {}", parsed.game_id);
            parsed.requested_move
        }
        None => args.move_number,
    };

    let config = ImportConfig {
        move_numbering: if args.full_moves {
            MoveNumbering::FullMove
        } else {
            MoveNumbering::Ply
        },
        max_plies: args.max_plies,
    };
    let request = ImportRequest {
        pgn,
        requested_move,
        source: None,
    };

    let result = import_game(&request, &config).context("Could not import this game")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_summary(&result);
    }
    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    let text = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read '{}'", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read PGN from stdin")?;
            buf
        }
    };

    if text.trim().is_empty() {
        bail!("no PGN input");
    }
    Ok(text)
}

fn print_summary(result: &ImportResult) {
    println!("{}", result.title);
    println!("{}", result.description);
    println!();
    println!("Source: {}", result.source);
    println!("Ply:    {}", result.ply);
    println!("FEN:    {}", result.fen);
}
