//! Game import: PGN record in, titled position snapshot out.
//!
//! This is the boundary the rest of an application talks to. It reads the
//! record, enforces the ply ceiling before any replay work starts, replays
//! the movetext, and renders the requested snapshot as FEN together with a
//! short human-readable summary of the players.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::errors::ImportError;
use crate::replay::replayer::replay_from;
use crate::utils::fen_generator::generate_fen;
use crate::utils::pgn::{count_moves, read_pgn, PgnRecord};

static GAME_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://[^/?#]+(?P<path>/[^?#]*)?(?:\?(?P<query>[^#]*))?").expect("valid regex")
});

/// How the requested move number counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MoveNumbering {
    /// Half-moves: white's first move is 1, black's reply is 2.
    #[default]
    Ply,
    /// Full moves: n selects the position after black's n-th move.
    FullMove,
}

impl MoveNumbering {
    pub fn to_ply(self, requested: u32) -> usize {
        match self {
            MoveNumbering::Ply => requested as usize,
            MoveNumbering::FullMove => requested as usize * 2,
        }
    }

    /// Move number shown to a reader for a requested value.
    pub fn display_move(self, requested: u32) -> u32 {
        match self {
            MoveNumbering::Ply => requested.div_ceil(2),
            MoveNumbering::FullMove => requested,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConfig {
    pub move_numbering: MoveNumbering,
    /// Records with more move tokens than this are rejected before replay.
    pub max_plies: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            move_numbering: MoveNumbering::Ply,
            max_plies: 1000,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportRequest {
    pub pgn: String,
    pub requested_move: Option<u32>,
    /// Overrides the `Site` tag as the reported source.
    pub source: Option<String>,
}

impl ImportRequest {
    pub fn new(pgn: impl Into<String>) -> Self {
        Self {
            pgn: pgn.into(),
            ..Self::default()
        }
    }

    pub fn at_move(mut self, requested_move: u32) -> Self {
        self.requested_move = Some(requested_move);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportResult {
    pub title: String,
    pub description: String,
    pub fen: String,
    pub pgn: String,
    /// Ply the FEN was taken at, after clamping.
    pub ply: usize,
    pub source: String,
}

/// Game id and `move` query parameter pulled from an analysis-board link
/// such as `https://www.chess.com/analysis/game/live/147187327790?move=66`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameLink {
    pub game_id: String,
    pub requested_move: Option<u32>,
}

impl GameLink {
    /// `None` when the link is not an http(s) URL or carries no numeric
    /// path segment. A non-numeric `move` parameter is ignored.
    pub fn parse(link: &str) -> Option<Self> {
        let caps = GAME_LINK.captures(link.trim())?;

        let game_id = caps
            .name("path")?
            .as_str()
            .split('/')
            .find(|segment| !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()))?
            .to_owned();

        let requested_move = caps.name("query").and_then(|query| {
            query
                .as_str()
                .split('&')
                .filter_map(|pair| pair.split_once('='))
                .find(|(key, _)| *key == "move")
                .and_then(|(_, value)| value.parse::<u32>().ok())
        });

        Some(Self {
            game_id,
            requested_move,
        })
    }
}

pub fn import_game(request: &ImportRequest, config: &ImportConfig) -> Result<ImportResult, ImportError> {
    let record = read_pgn(&request.pgn)?;

    let plies = count_moves(&record.movetext);
    if plies > config.max_plies {
        return Err(ImportError::TooManyPlies {
            plies,
            limit: config.max_plies,
        });
    }

    let game = replay_from(record.initial_board.clone(), &record.movetext)?;

    let ply = request
        .requested_move
        .map_or(game.len(), |requested| config.move_numbering.to_ply(requested).min(game.len()));
    let fen = generate_fen(game.snapshot_at(ply));

    let mut description = player_summary(&record);
    if let Some(requested) = request.requested_move {
        description.push_str(&format!(
            "\n\nPosition at move {}",
            config.move_numbering.display_move(requested)
        ));
    }

    let title = format!(
        "{} vs {}",
        record.header("White").unwrap_or("?"),
        record.header("Black").unwrap_or("?")
    );
    let source = request
        .source
        .clone()
        .or_else(|| record.header("Site").map(str::to_owned))
        .unwrap_or_else(|| "pgn".to_owned());

    log::info!("imported `{title}` from {source}: {} plies, snapshot at ply {ply}", game.len());

    Ok(ImportResult {
        title,
        description,
        fen,
        pgn: request.pgn.clone(),
        ply,
        source,
    })
}

fn player_summary(record: &PgnRecord) -> String {
    let mut out = format!(
        "White: {}\nBlack: {}",
        player_line(record, "White", "WhiteElo"),
        player_line(record, "Black", "BlackElo")
    );

    if let Some(date) = played_on(record) {
        out.push_str(&format!("\nPlayed: {}", date.format("%Y-%m-%d")));
    }

    out
}

fn player_line(record: &PgnRecord, name_tag: &str, elo_tag: &str) -> String {
    let name = record.header(name_tag).unwrap_or("?");
    match record.header(elo_tag).filter(|elo| !elo.is_empty() && *elo != "?" && *elo != "-") {
        Some(elo) => format!("{name} ({elo})"),
        None => name.to_owned(),
    }
}

/// PGN dates use `YYYY.MM.DD` with `??` for unknown parts; only complete
/// dates are reported.
fn played_on(record: &PgnRecord) -> Option<NaiveDate> {
    ["UTCDate", "Date"]
        .into_iter()
        .filter_map(|tag| record.header(tag))
        .find_map(|value| NaiveDate::parse_from_str(value, "%Y.%m.%d").ok())
}
