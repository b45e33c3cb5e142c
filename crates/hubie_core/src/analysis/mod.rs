//! # Analysis
//!
//! Everything derived from the normalized event stream and the roster:
//!
//! - `intervals` - per-player on-court intervals, starter flag, match end
//! - `lineups` - on-court players per team at each event time
//! - `score_timeline` - minute-by-minute cumulative score and period line
//! - `foul_bonus` - team fouls and bonus entry per period
//! - `player_stats` - box-score lines and efficiency
//! - `team_split` - starter/bench distribution of counting stats

pub mod foul_bonus;
pub mod intervals;
pub mod lineups;
pub mod player_stats;
pub mod score_timeline;
pub mod team_split;

#[cfg(test)]
mod invariants_proptest;

pub use foul_bonus::{
    empty_bonus_diagnostics, track_foul_bonus, BonusEntry, FoulBonusRecord,
    NO_BONUS_SENTINEL_SECONDS,
};
pub use intervals::{reconstruct_intervals, IntervalTable, PlayInterval, PlayerTimeline};
pub use lineups::{compute_lineups, LineupSnapshot, LineupTable};
pub use player_stats::{aggregate_player_stats, PlayerStatLine, PlayerStatTable};
pub use score_timeline::{build_score_timeline, PeriodScore, ScoreSample, ScoreTimeline};
pub use team_split::{starter_bench_split, StarterBenchSplit, StatCategory};
