//! Flat record sets handed to the persistence side.
//!
//! Every row carries the match id so the sets can be appended to shared
//! tables. The creation timestamp is supplied by the caller.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::pipeline::MatchReport;
use crate::analysis::PlayerStatLine;
use crate::models::{EventKind, PeriodScoreDoc, PlayerId, TeamSide};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchHeaderRecord {
    pub league: String,
    pub match_id: u64,
    pub home_team: String,
    pub away_team: String,
    /// `"Home(Home) vs Away(Away)"`
    pub title: String,
    pub match_date: NaiveDate,
    /// `dd.mm.yy`
    pub short_date: String,
    pub home_score: u32,
    pub away_score: u32,
    pub period_scores: Vec<PeriodScoreDoc>,
    /// Per-period points derived from the play-by-play
    pub period_line: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CumulativeScoreRecord {
    pub match_id: u64,
    pub minute: u32,
    pub home: u32,
    pub away: u32,
    pub difference: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssistRecord {
    pub match_id: u64,
    pub scorer: Option<PlayerId>,
    pub scorer_name: String,
    pub assist: PlayerId,
    pub assist_name: String,
    pub points: u32,
    pub side: TeamSide,
    pub team: String,
    pub period: u8,
    pub minute: u32,
    pub assist_starter: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoringRecord {
    pub match_id: u64,
    pub player: Option<PlayerId>,
    pub player_name: String,
    /// e.g. `"Made 3P"`
    pub result: String,
    pub points: u32,
    pub side: TeamSide,
    pub team: String,
    pub period: u8,
    pub minute: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerStatRecord {
    pub match_id: u64,
    pub name: String,
    pub team: String,
    #[serde(flatten)]
    pub line: PlayerStatLine,
    pub points: u32,
    pub rebounds: u32,
    pub efficiency: i32,
    pub playing_seconds: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamFoulRecord {
    pub match_id: u64,
    pub period: u8,
    pub period_label: String,
    pub side: TeamSide,
    pub team: String,
    pub fouls: u32,
    /// Period clock seconds of the bonus foul, -1 without bonus
    pub bonus_entry_seconds: i64,
}

/// The six record sets of one match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchRecords {
    pub match_header: MatchHeaderRecord,
    pub cumulative_score: Vec<CumulativeScoreRecord>,
    pub assists: Vec<AssistRecord>,
    pub scoring: Vec<ScoringRecord>,
    pub player_stat: Vec<PlayerStatRecord>,
    pub team_fouls_per_period: Vec<TeamFoulRecord>,
}

impl MatchRecords {
    pub fn from_report(report: &MatchReport, created_at: DateTime<Utc>) -> Self {
        let match_id = report.match_id;
        let team = |side: TeamSide| team_name(report, side);
        let name = |id: Option<PlayerId>| {
            id.map(|id| report.roster.display_name(id)).unwrap_or_default()
        };

        let cumulative_score = report
            .score
            .samples()
            .iter()
            .map(|s| CumulativeScoreRecord {
                match_id,
                minute: s.minute,
                home: s.home,
                away: s.away,
                difference: s.difference,
            })
            .collect();

        let shots = || report.normalized.events.iter().filter(|e| e.kind == EventKind::Shot);

        let assists = shots()
            .filter_map(|e| e.assist.map(|assist| (e, assist)))
            .map(|(e, assist)| AssistRecord {
                match_id,
                scorer: e.player,
                scorer_name: name(e.player),
                assist,
                assist_name: report.roster.display_name(assist),
                points: e.points(),
                side: e.side,
                team: team(e.side),
                period: e.period,
                minute: e.minute(),
                assist_starter: report.intervals.is_starter(assist),
            })
            .collect();

        let scoring = shots()
            .filter_map(|e| e.shot_result.map(|result| (e, result)))
            .map(|(e, result)| ScoringRecord {
                match_id,
                player: e.player,
                player_name: name(e.player),
                result: result.description().to_string(),
                points: result.points(),
                side: e.side,
                team: team(e.side),
                period: e.period,
                minute: e.minute(),
            })
            .collect();

        let player_stat = report
            .stats
            .lines
            .iter()
            .map(|line| PlayerStatRecord {
                match_id,
                name: report.roster.display_name(line.player),
                team: team(line.side),
                line: line.clone(),
                points: line.points(),
                rebounds: line.rebounds(),
                efficiency: line.efficiency(),
                playing_seconds: line.playing_time.seconds(),
            })
            .collect();

        let team_fouls_per_period = report
            .fouls
            .iter()
            .map(|r| TeamFoulRecord {
                match_id,
                period: r.period,
                period_label: report.config.period_label(r.period),
                side: r.side,
                team: team(r.side),
                fouls: r.fouls,
                bonus_entry_seconds: r.bonus_entry.seconds(),
            })
            .collect();

        Self {
            match_header: match_header(report, created_at),
            cumulative_score,
            assists,
            scoring,
            player_stat,
            team_fouls_per_period,
        }
    }
}

fn match_header(report: &MatchReport, created_at: DateTime<Utc>) -> MatchHeaderRecord {
    let summary = &report.summary;
    MatchHeaderRecord {
        league: summary.tournament.clone(),
        match_id: report.match_id,
        home_team: summary.home_team.clone(),
        away_team: summary.away_team.clone(),
        title: format!("{}(Home) vs {}(Away)", summary.home_team, summary.away_team),
        match_date: report.match_date,
        short_date: report.match_date.format("%d.%m.%y").to_string(),
        home_score: summary.home_goals,
        away_score: summary.away_goals,
        period_scores: summary.periods.clone(),
        period_line: report.score.format_period_line(),
        created_at,
    }
}

fn team_name(report: &MatchReport, side: TeamSide) -> String {
    match side {
        TeamSide::Home => report.summary.home_team.clone(),
        TeamSide::Away => report.summary.away_team.clone(),
    }
}
