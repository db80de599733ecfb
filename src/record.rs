//! JSON game records.
//!
//! A record is the board size plus the move history. The full game state is
//! a deterministic fold of the moves over an empty board, so nothing else
//! needs to be stored.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ReplayError;
use crate::game::{Game, MoveRecord};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub size: usize,
    pub moves: Vec<MoveRecord>,
}

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("malformed game record")]
    Json(#[from] serde_json::Error),
    #[error("game record does not replay")]
    Replay(#[from] ReplayError),
}

impl GameRecord {
    pub fn from_game(game: &Game) -> Self {
        Self {
            size: game.size(),
            moves: game.history().to_vec(),
        }
    }

    /// Rebuild the recorded game.
    pub fn replay(&self) -> Result<Game, ReplayError> {
        Game::replay(self.size, &self.moves)
    }

    pub fn to_json(&self) -> Result<String, RecordError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, RecordError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Parse and replay in one step.
    pub fn load(text: &str) -> Result<Game, RecordError> {
        Ok(Self::from_json(text)?.replay()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Color;
    use crate::error::MoveError;

    #[test]
    fn test_record_reproduces_game() {
        let mut game = Game::new(9).unwrap();
        for (r, c) in [(3, 4), (4, 4), (5, 4), (0, 0), (4, 3)] {
            game.play(r, c).unwrap();
        }
        game.pass().unwrap();
        game.play(4, 5).unwrap();

        let json = GameRecord::from_game(&game).to_json().unwrap();
        let loaded = GameRecord::load(&json).unwrap();
        assert_eq!(loaded, game);
        assert_eq!(loaded.captures(Color::Black), 1);
        assert_eq!(loaded.ko(), Some((4, 4)));
    }

    #[test]
    fn test_json_shape() {
        let record = GameRecord {
            size: 9,
            moves: vec![
                MoveRecord::Place {
                    row: 2,
                    col: 3,
                    color: Color::Black,
                },
                MoveRecord::Pass {
                    color: Color::White,
                },
            ],
        };
        let value: serde_json::Value = serde_json::from_str(&record.to_json().unwrap()).unwrap();
        assert_eq!(value["size"], 9);
        assert_eq!(value["moves"][0]["Place"]["color"], "black");
        assert_eq!(value["moves"][1]["Pass"]["color"], "white");
    }

    #[test]
    fn test_illegal_record_reports_index() {
        let text = r#"{"size": 9, "moves": [
            {"Place": {"row": 4, "col": 4, "color": "black"}},
            {"Place": {"row": 4, "col": 4, "color": "white"}}
        ]}"#;
        match GameRecord::load(text) {
            Err(RecordError::Replay(ReplayError::Rejected { index, source })) => {
                assert_eq!(index, 1);
                assert_eq!(source, MoveError::Occupied);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_bad_size_and_bad_json() {
        let text = r#"{"size": 7, "moves": []}"#;
        assert!(matches!(
            GameRecord::load(text),
            Err(RecordError::Replay(ReplayError::Size(_)))
        ));
        assert!(matches!(
            GameRecord::load("not json"),
            Err(RecordError::Json(_))
        ));
    }
}
