use serde::{Deserialize, Serialize};
use std::fmt;

use super::events::{PlayerId, TeamSide};
use super::time::GameTime;

/// Non-fatal findings collected while processing a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A reconstructed lineup does not hold the expected number of players.
    LineupCardinality { time: GameTime, side: TeamSide, players: usize, expected: usize },
    /// A team never reached the bonus threshold in a period.
    EmptyBonus { period: u8, side: TeamSide, fouls: u32 },
    /// An event references a player id missing from both rosters.
    UnknownPlayer { event_index: usize, player_id: PlayerId },
    /// A shot carries a result code outside the lookup table.
    UnknownShotResult { event_index: usize, code: u32 },
}

impl Diagnostic {
    /// Bonus gaps are expected in normal matches; everything else points at
    /// questionable source data.
    pub fn is_data_quality_issue(&self) -> bool {
        !matches!(self, Diagnostic::EmptyBonus { .. })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Diagnostic::LineupCardinality { time, side, players, expected } => {
                write!(f, "{side} lineup at {time} has {players} players (expected {expected})")
            }
            Diagnostic::EmptyBonus { period, side, fouls } => {
                write!(f, "{side} never reached the bonus in period {period} ({fouls} fouls)")
            }
            Diagnostic::UnknownPlayer { event_index, player_id } => {
                write!(f, "event #{event_index} references unknown player {player_id}")
            }
            Diagnostic::UnknownShotResult { event_index, code } => {
                write!(f, "event #{event_index} has unknown shot result code {code}")
            }
        }
    }
}
