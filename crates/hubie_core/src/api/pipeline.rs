//! Single-match pipeline and the independent-match batch helper.

use chrono::{NaiveDate, NaiveDateTime};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::analysis::{
    aggregate_player_stats, build_score_timeline, compute_lineups, empty_bonus_diagnostics,
    reconstruct_intervals, track_foul_bonus, FoulBonusRecord, IntervalTable, LineupTable,
    PlayerStatTable, ScoreTimeline,
};
use crate::config::EngineConfig;
use crate::error::{ErrorContext, MatchError, Result};
use crate::ingest::{EventNormalizer, NormalizedMatch, RosterIndex};
use crate::models::{Diagnostic, MatchEventsDoc, MatchSummaryDoc};

/// Both source documents of one match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchInput {
    pub match_id: u64,
    pub summary: MatchSummaryDoc,
    pub events: MatchEventsDoc,
}

/// Everything derived for one match.
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub match_id: u64,
    pub summary: MatchSummaryDoc,
    pub match_date: NaiveDate,
    pub config: EngineConfig,
    #[serde(skip)]
    pub roster: RosterIndex,
    pub normalized: NormalizedMatch,
    pub intervals: IntervalTable,
    pub lineups: LineupTable,
    pub score: ScoreTimeline,
    pub fouls: Vec<FoulBonusRecord>,
    pub stats: PlayerStatTable,
    pub diagnostics: Vec<Diagnostic>,
}

impl MatchReport {
    pub fn has_data_quality_issues(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_data_quality_issue)
    }
}

/// Run every component in dependency order. Any fatal error carries the
/// match id.
pub fn process_match(input: &MatchInput, config: &EngineConfig) -> Result<MatchReport> {
    run(input, config).map_err(|e| e.in_match(input.match_id))
}

/// Process independent matches on the rayon pool; results keep input order.
pub fn process_matches(inputs: &[MatchInput], config: &EngineConfig) -> Vec<Result<MatchReport>> {
    inputs.par_iter().map(|input| process_match(input, config)).collect()
}

fn run(input: &MatchInput, config: &EngineConfig) -> Result<MatchReport> {
    config.validate()?;
    let match_date = parse_match_date(&input.summary.date)?;

    let roster =
        RosterIndex::from_documents(&input.events.home_players, &input.events.away_players)?;
    let normalized = EventNormalizer::new(config).normalize(&input.events.events)?;

    let intervals = reconstruct_intervals(&roster, &normalized)?;
    let lineups = compute_lineups(&roster, &intervals, &normalized);
    let score = build_score_timeline(&normalized, config);
    let fouls = track_foul_bonus(&normalized, config);
    let stats = aggregate_player_stats(&roster, &intervals, &normalized);

    let mut diagnostics = normalized.diagnostics.clone();
    diagnostics.extend(roster.unknown_references(&normalized.events));
    diagnostics.extend(lineups.cardinality_diagnostics(config.lineup_size));
    diagnostics.extend(empty_bonus_diagnostics(&fouls));

    let quality_issues = diagnostics.iter().filter(|d| d.is_data_quality_issue()).count();
    if quality_issues > 0 {
        warn!(match_id = input.match_id, quality_issues, "match has data quality diagnostics");
    }

    let (home, away) = score.final_score();
    if (home, away) != (input.summary.home_goals, input.summary.away_goals) {
        warn!(
            match_id = input.match_id,
            computed = %format!("{home}:{away}"),
            reported = %format!("{}:{}", input.summary.home_goals, input.summary.away_goals),
            "play-by-play score differs from summary"
        );
    }

    info!(
        match_id = input.match_id,
        events = normalized.events.len(),
        players = roster.len(),
        periods = normalized.clock.periods_played,
        final_score = %format!("{home}:{away}"),
        diagnostics = diagnostics.len(),
        "processed match"
    );

    Ok(MatchReport {
        match_id: input.match_id,
        summary: input.summary.clone(),
        match_date,
        config: config.clone(),
        roster,
        normalized,
        intervals,
        lineups,
        score,
        fouls,
        stats,
        diagnostics,
    })
}

/// Accepts `2019-10-12T18:00:00` (optional fraction) or a bare date.
pub fn parse_match_date(text: &str) -> Result<NaiveDate> {
    let text = text.trim();
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|dt| dt.date())
        .or_else(|_| NaiveDate::parse_from_str(text, "%Y-%m-%d"))
        .map_err(|_| {
            MatchError::parse(ErrorContext::default(), format!("invalid match date '{text}'"))
        })
}
