//! On-court lineups at every non-substitution event time.

use serde::Serialize;
use tracing::{debug, warn};

use super::intervals::IntervalTable;
use crate::ingest::{NormalizedMatch, RosterIndex};
use crate::models::{Diagnostic, GameTime, PlayerId, TeamSide};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineupSnapshot {
    pub time: GameTime,
    pub side: TeamSide,
    /// Roster order
    pub players: Vec<PlayerId>,
}

impl LineupSnapshot {
    /// Comma-separated ids, e.g. `"4,7,9,12,15"`.
    pub fn one_line(&self) -> String {
        self.players.iter().map(PlayerId::to_string).collect::<Vec<_>>().join(",")
    }

    pub fn contains(&self, player: PlayerId) -> bool {
        self.players.contains(&player)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LineupTable {
    /// Ordered by time, home before away at equal times
    pub snapshots: Vec<LineupSnapshot>,
}

impl LineupTable {
    pub fn at(&self, time: GameTime, side: TeamSide) -> Option<&LineupSnapshot> {
        self.snapshots
            .binary_search_by(|s| (s.time, s.side).cmp(&(time, side)))
            .ok()
            .map(|i| &self.snapshots[i])
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Snapshots whose size differs from `expected` are reported, not fixed.
    pub fn cardinality_diagnostics(&self, expected: usize) -> Vec<Diagnostic> {
        let diagnostics: Vec<Diagnostic> = self
            .snapshots
            .iter()
            .filter(|s| s.players.len() != expected)
            .map(|s| Diagnostic::LineupCardinality {
                time: s.time,
                side: s.side,
                players: s.players.len(),
                expected,
            })
            .collect();
        if !diagnostics.is_empty() {
            warn!(count = diagnostics.len(), expected, "lineups with unexpected size");
        }
        diagnostics
    }
}

pub fn compute_lineups(
    roster: &RosterIndex,
    intervals: &IntervalTable,
    normalized: &NormalizedMatch,
) -> LineupTable {
    let times = normalized.event_times();

    let mut snapshots = Vec::with_capacity(times.len() * 2);
    for &time in &times {
        for side in TeamSide::BOTH {
            let players = roster
                .side_ids(side)
                .iter()
                .copied()
                .filter(|id| intervals.get(*id).is_some_and(|t| t.on_court_at(time)))
                .collect();
            snapshots.push(LineupSnapshot { time, side, players });
        }
    }

    debug!(timestamps = times.len(), snapshots = snapshots.len(), "computed lineups");
    LineupTable { snapshots }
}
