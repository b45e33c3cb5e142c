//! Per-player box-score lines
//!
//! One pass over the event stream with mutable per-player counters, joined
//! with playing time and starter flag from the interval table.

use fxhash::FxHashMap;
use serde::Serialize;
use tracing::debug;

use super::intervals::IntervalTable;
use crate::ingest::{NormalizedMatch, RosterIndex};
use crate::models::{EventKind, GameTime, PlayerId, ShotResult, TeamSide};

/// Box-score line of one player
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlayerStatLine {
    pub player: PlayerId,
    pub side: TeamSide,
    /// Made free throws
    pub ftm: u32,
    /// Missed free throws
    pub ft_missed: u32,
    /// Made two-point field goals
    pub fg2m: u32,
    pub fg2_missed: u32,
    /// Made three-point field goals
    pub fg3m: u32,
    pub fg3_missed: u32,
    pub offensive_rebounds: u32,
    pub defensive_rebounds: u32,
    pub assists: u32,
    pub steals: u32,
    pub blocks: u32,
    pub turnovers: u32,
    pub fouls: u32,
    pub playing_time: GameTime,
    pub starter: bool,
}

impl PlayerStatLine {
    pub fn new(player: PlayerId, side: TeamSide) -> Self {
        Self { player, side, ..Default::default() }
    }

    pub fn points(&self) -> u32 {
        self.ftm + 2 * self.fg2m + 3 * self.fg3m
    }

    pub fn rebounds(&self) -> u32 {
        self.offensive_rebounds + self.defensive_rebounds
    }

    pub fn missed_field_goals(&self) -> u32 {
        self.fg2_missed + self.fg3_missed
    }

    pub fn missed_free_throws(&self) -> u32 {
        self.ft_missed
    }

    /// (PTS + REB + AST + STL + BLK) - (missed FG + missed FT + TO + fouls)
    pub fn efficiency(&self) -> i32 {
        let positive = self.points() + self.rebounds() + self.assists + self.steals + self.blocks;
        let negative =
            self.missed_field_goals() + self.missed_free_throws() + self.turnovers + self.fouls;
        positive as i32 - negative as i32
    }

    fn record_shot(&mut self, result: ShotResult) {
        let counter = match result {
            ShotResult::MadeFreeThrow => &mut self.ftm,
            ShotResult::MissedFreeThrow => &mut self.ft_missed,
            ShotResult::MadeTwo => &mut self.fg2m,
            ShotResult::MissedTwo => &mut self.fg2_missed,
            ShotResult::MadeThree => &mut self.fg3m,
            ShotResult::MissedThree => &mut self.fg3_missed,
        };
        *counter += 1;
    }
}

/// Stat lines for every rostered player, in roster order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PlayerStatTable {
    pub lines: Vec<PlayerStatLine>,
}

impl PlayerStatTable {
    pub fn get(&self, player: PlayerId) -> Option<&PlayerStatLine> {
        self.lines.iter().find(|l| l.player == player)
    }

    pub fn side(&self, side: TeamSide) -> impl Iterator<Item = &PlayerStatLine> {
        self.lines.iter().filter(move |l| l.side == side)
    }

    /// Highest efficiency on one team, `None` for an empty roster.
    pub fn max_efficiency(&self, side: TeamSide) -> Option<i32> {
        self.side(side).map(PlayerStatLine::efficiency).max()
    }

    pub fn team_points(&self, side: TeamSide) -> u32 {
        self.side(side).map(PlayerStatLine::points).sum()
    }
}

pub fn aggregate_player_stats(
    roster: &RosterIndex,
    intervals: &IntervalTable,
    normalized: &NormalizedMatch,
) -> PlayerStatTable {
    let mut counters: FxHashMap<PlayerId, PlayerStatLine> = roster
        .players()
        .map(|p| (p.id, PlayerStatLine::new(p.id, p.side)))
        .collect();

    let mut ignored = 0usize;
    for event in &normalized.events {
        if let (EventKind::Shot, Some(assist)) = (&event.kind, event.assist) {
            match counters.get_mut(&assist) {
                Some(line) => line.assists += 1,
                None => ignored += 1,
            }
        }

        let Some(line) = event.player.and_then(|id| counters.get_mut(&id)) else {
            if event.player.is_some() {
                ignored += 1;
            }
            continue;
        };
        match event.kind {
            EventKind::Shot => {
                if let Some(result) = event.shot_result {
                    line.record_shot(result);
                }
            }
            EventKind::Foul => line.fouls += 1,
            EventKind::OffensiveRebound => line.offensive_rebounds += 1,
            EventKind::DefensiveRebound => line.defensive_rebounds += 1,
            EventKind::Turnover => line.turnovers += 1,
            EventKind::Steal => line.steals += 1,
            EventKind::Block => line.blocks += 1,
            EventKind::Substitution | EventKind::Other(_) => {}
        }
    }

    let lines: Vec<PlayerStatLine> = roster
        .players()
        .filter_map(|p| counters.remove(&p.id))
        .map(|mut line| {
            line.playing_time = intervals.playing_time(line.player);
            line.starter = intervals.is_starter(line.player);
            line
        })
        .collect();

    debug!(players = lines.len(), ignored, "aggregated player statistics");
    PlayerStatTable { lines }
}
