//! Go Text Protocol (GTP) implementation.
//!
//! GTP is a text-based protocol for communicating with Go-playing programs.
//! This module implements enough of GTP version 2 to drive the engine from
//! graphical Go interfaces like Sabaki or GoGui.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`
//! - `list_commands`, `known_command <cmd>`
//! - `quit`
//! - `boardsize <size>` - 9, 13 or 19
//! - `clear_board`
//! - `komi <value>` - only the built-in komi is accepted
//! - `play <color> <vertex>`
//! - `genmove <color>`
//! - `undo`
//! - `showboard`
//! - `final_score`
//!
//! ## Example
//!
//! ```no_run
//! use go_engine::gtp::GtpEngine;
//! use go_engine::search::{Difficulty, Engine};
//!
//! let mut gtp = GtpEngine::new(Engine::from_difficulty(Difficulty::Medium));
//! gtp.run()?;
//! # Ok::<(), std::io::Error>(())
//! ```

use std::io::{self, BufRead, Write};

use crate::board::{COLUMN_LETTERS, Color};
use crate::constants::KOMI;
use crate::game::Game;
use crate::score::Score;
use crate::search::Engine;

/// The list of known GTP commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "clear_board",
    "final_score",
    "genmove",
    "known_command",
    "komi",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "showboard",
    "undo",
    "version",
];

/// A GTP vertex: a board point or a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vertex {
    Pass,
    Point(usize, usize),
}

/// Parse a vertex such as `D4` or `pass` for a board of `size`.
///
/// Columns are letters A–T without I; rows count up from the bottom.
pub fn parse_vertex(s: &str, size: usize) -> Option<Vertex> {
    if s.eq_ignore_ascii_case("pass") {
        return Some(Vertex::Pass);
    }
    let letter = s.chars().next()?.to_ascii_uppercase();
    let col = COLUMN_LETTERS[..size]
        .iter()
        .position(|&c| c as char == letter)?;
    let number: usize = s.get(1..)?.parse().ok()?;
    if number == 0 || number > size {
        return None;
    }
    Some(Vertex::Point(size - number, col))
}

/// Format `(row, col)` as a vertex such as `D4`.
pub fn format_vertex(row: usize, col: usize, size: usize) -> String {
    format!("{}{}", COLUMN_LETTERS[col] as char, size - row)
}

fn parse_color(s: &str) -> Option<Color> {
    match s.to_ascii_lowercase().as_str() {
        "b" | "black" => Some(Color::Black),
        "w" | "white" => Some(Color::White),
        _ => None,
    }
}

/// GTP result notation, e.g. `B+3.5` or `W+6.5`.
pub fn format_result(score: &Score) -> String {
    match score.leader() {
        Some(Color::Black) => format!("B+{}", score.margin()),
        Some(Color::White) => format!("W+{}", score.margin()),
        None => "0".to_string(),
    }
}

/// GTP engine state.
pub struct GtpEngine {
    /// Current game
    game: Game,
    /// Move generator
    engine: Engine,
}

impl GtpEngine {
    /// A session on an empty 9x9 board, answering `genmove` with `engine`.
    pub fn new(engine: Engine) -> Self {
        Self {
            game: Game::default(),
            engine,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Run the GTP command loop, reading from stdin and writing to stdout.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        for line in stdin.lock().lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            write!(stdout, "{prefix}{id_str} {message}\n\n")?;
            stdout.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end > 0 {
            if let Ok(id) = trimmed[..end].parse::<u32>() {
                return (Some(id), trimmed[end..].trim());
            }
        }
        (None, trimmed)
    }

    /// Execute a GTP command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, "go-engine".to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "2".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(name) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&name.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "boardsize" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match arg.parse::<usize>() {
                    Ok(size) => match Game::new(size) {
                        Ok(game) => {
                            self.game = game;
                            (true, String::new())
                        }
                        Err(_) => (false, "unacceptable size".to_string()),
                    },
                    Err(_) => (false, "invalid size".to_string()),
                }
            }

            "clear_board" => {
                self.game = self.game.restart();
                (true, String::new())
            }

            "komi" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match arg.parse::<f32>() {
                    Ok(komi) if komi == KOMI => (true, String::new()),
                    Ok(_) => (false, format!("only komi {KOMI} is supported")),
                    Err(_) => (false, "invalid komi".to_string()),
                }
            }

            "play" => {
                let [color, vertex, ..] = args else {
                    return (false, "missing arguments".to_string());
                };
                if let Err(msg) = self.check_turn(color) {
                    return (false, msg);
                }
                let result = match parse_vertex(vertex, self.game.size()) {
                    Some(Vertex::Pass) => self.game.pass(),
                    Some(Vertex::Point(row, col)) => self.game.play(row, col).map(drop),
                    None => return (false, "invalid vertex".to_string()),
                };
                match result {
                    Ok(()) => (true, String::new()),
                    Err(e) => (false, e.to_string()),
                }
            }

            "genmove" => {
                let Some(color) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                if let Err(msg) = self.check_turn(color) {
                    return (false, msg);
                }
                if self.game.is_over() {
                    return (false, "game is over".to_string());
                }
                match self.engine.choose_move(&self.game) {
                    Some((row, col)) => match self.game.play(row, col) {
                        Ok(_) => (true, format_vertex(row, col, self.game.size())),
                        Err(e) => (false, e.to_string()),
                    },
                    None => match self.game.pass() {
                        Ok(()) => (true, "pass".to_string()),
                        Err(e) => (false, e.to_string()),
                    },
                }
            }

            "undo" => match self.game.undo_last() {
                Some(Ok(game)) => {
                    self.game = game;
                    (true, String::new())
                }
                Some(Err(e)) => (false, e.to_string()),
                None => (false, "cannot undo".to_string()),
            },

            "showboard" => (true, format!("\n{}", self.game.board())),

            "final_score" => {
                let score = self.game.final_score().unwrap_or_else(|| {
                    let mut live = self.game.score();
                    live.white += KOMI;
                    live
                });
                (true, format_result(&score))
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }

    /// Moves alternate strictly; reject a color that is not on turn.
    fn check_turn(&self, color: &str) -> Result<(), String> {
        match parse_color(color) {
            Some(c) if c == self.game.to_move() => Ok(()),
            Some(_) => Err(format!("it is {}'s turn", self.game.to_move())),
            None => Err("invalid color".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{Difficulty, SearchConfig};

    fn engine() -> GtpEngine {
        GtpEngine::new(Engine::with_seed(
            SearchConfig::from_difficulty(Difficulty::Easy),
            5,
        ))
    }

    #[test]
    fn test_parse_id_with_id() {
        let (id, cmd) = GtpEngine::parse_id("123 name");
        assert_eq!(id, Some(123));
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_parse_id_without_id() {
        let (id, cmd) = GtpEngine::parse_id("name");
        assert_eq!(id, None);
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_vertex_roundtrip() {
        assert_eq!(parse_vertex("A9", 9), Some(Vertex::Point(0, 0)));
        assert_eq!(parse_vertex("J1", 9), Some(Vertex::Point(8, 8)));
        assert_eq!(parse_vertex("e5", 9), Some(Vertex::Point(4, 4)));
        assert_eq!(parse_vertex("PASS", 9), Some(Vertex::Pass));
        assert_eq!(format_vertex(8, 8, 9), "J1");
        assert_eq!(format_vertex(0, 18, 19), "T19");
    }

    #[test]
    fn test_vertex_rejects_bad_input() {
        assert_eq!(parse_vertex("I5", 9), None);
        assert_eq!(parse_vertex("K5", 9), None);
        assert_eq!(parse_vertex("A10", 9), None);
        assert_eq!(parse_vertex("A0", 9), None);
        assert_eq!(parse_vertex("", 9), None);
    }

    #[test]
    fn test_name_command() {
        let mut engine = engine();
        let (success, response) = engine.execute("name", &[]);
        assert!(success);
        assert_eq!(response, "go-engine");
    }

    #[test]
    fn test_protocol_version() {
        let mut engine = engine();
        let (success, response) = engine.execute("protocol_version", &[]);
        assert!(success);
        assert_eq!(response, "2");
    }

    #[test]
    fn test_known_command() {
        let mut engine = engine();

        let (success, response) = engine.execute("known_command", &["genmove"]);
        assert!(success);
        assert_eq!(response, "true");

        let (success, response) = engine.execute("known_command", &["unknown_cmd"]);
        assert!(success);
        assert_eq!(response, "false");
    }

    #[test]
    fn test_boardsize() {
        let mut engine = engine();

        let (success, _) = engine.execute("boardsize", &["19"]);
        assert!(success);
        assert_eq!(engine.game().size(), 19);

        let (success, _) = engine.execute("boardsize", &["10"]);
        assert!(!success);
        assert_eq!(engine.game().size(), 19);
    }

    #[test]
    fn test_komi() {
        let mut engine = engine();
        assert!(engine.execute("komi", &["6.5"]).0);
        assert!(!engine.execute("komi", &["7.5"]).0);
        assert!(!engine.execute("komi", &["lots"]).0);
    }

    #[test]
    fn test_play_and_clear() {
        let mut engine = engine();

        let (success, _) = engine.execute("play", &["black", "E5"]);
        assert!(success);
        assert_eq!(engine.game().board().at(4, 4), Some(Color::Black));

        // Same point again is illegal
        let (success, response) = engine.execute("play", &["white", "E5"]);
        assert!(!success);
        assert!(response.contains("not empty"));

        // Out of turn
        let (success, _) = engine.execute("play", &["black", "A1"]);
        assert!(!success);

        let (success, _) = engine.execute("clear_board", &[]);
        assert!(success);
        assert!(engine.game().history().is_empty());
    }

    #[test]
    fn test_genmove_plays_for_engine() {
        let mut engine = engine();
        engine.execute("play", &["b", "E5"]);
        let (success, response) = engine.execute("genmove", &["w"]);
        assert!(success);
        assert_eq!(engine.game().history().len(), 2);
        assert!(parse_vertex(&response, 9).is_some());
    }

    #[test]
    fn test_undo() {
        let mut engine = engine();
        assert!(!engine.execute("undo", &[]).0);
        engine.execute("play", &["b", "C3"]);
        assert!(engine.execute("undo", &[]).0);
        assert!(engine.game().history().is_empty());
        assert_eq!(engine.game().to_move(), Color::Black);
    }

    #[test]
    fn test_passes_end_game_and_score() {
        let mut engine = engine();
        engine.execute("play", &["b", "E5"]);
        engine.execute("play", &["w", "pass"]);
        engine.execute("play", &["b", "pass"]);
        assert!(engine.game().is_over());
        let (success, response) = engine.execute("final_score", &[]);
        assert!(success);
        // 80 points of territory against komi
        assert_eq!(response, "B+73.5");
        assert!(!engine.execute("genmove", &["w"]).0);
    }
}
