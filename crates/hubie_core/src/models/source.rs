//! Input documents as delivered by the acquisition side.
//!
//! Field names follow the federation's match pages (`MatchSummaryViewModel`
//! and `MatchEventsViewModel`). Identifier-like fields stay as raw JSON
//! values here; the normalizer coerces them and reports which field and
//! event failed.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MatchSummaryDoc {
    pub tournament: String,
    pub home_team: String,
    pub away_team: String,
    pub home_goals: u32,
    pub away_goals: u32,
    /// ISO date-time, e.g. `2019-10-12T18:00:00`
    pub date: String,
    #[serde(default)]
    pub periods: Vec<PeriodScoreDoc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PeriodScoreDoc {
    pub home_goals: u32,
    pub away_goals: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MatchEventsDoc {
    #[serde(default)]
    pub home_team: Option<String>,
    #[serde(default)]
    pub away_team: Option<String>,
    #[serde(default)]
    pub home_players: Vec<RosterEntryDoc>,
    #[serde(default)]
    pub away_players: Vec<RosterEntryDoc>,
    #[serde(default)]
    pub events: Vec<RawEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RosterEntryDoc {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    /// `null` for coaching staff
    #[serde(default)]
    pub shirt_no: Value,
    #[serde(default)]
    pub is_captain: Option<bool>,
    #[serde(default)]
    pub is_coach: Option<bool>,
    #[serde(default)]
    pub is_starter: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawEvent {
    pub match_event_type: String,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub player: Value,
    #[serde(default)]
    pub player_in: Value,
    #[serde(default)]
    pub player_out: Value,
    #[serde(default)]
    pub assist: Value,
    #[serde(default)]
    pub shot_result: Value,
    #[serde(default)]
    pub foul_type: Value,
    /// `"1. periode"` .. `"4. periode"`, `"1. ekstraomgang"`, ...
    #[serde(default)]
    pub period_name: Option<String>,
    /// Numeric period, used when `PeriodName` is absent
    #[serde(default)]
    pub period: Value,
    /// `mm:ss` within the period; empty when the feed missed the clock
    #[serde(default)]
    pub period_time: Option<String>,
}
