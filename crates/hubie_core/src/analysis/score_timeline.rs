//! # Score Timeline
//!
//! Minute-bucketed cumulative score for both teams.
//!
//! Made shots are bucketed by minute rounded up, summed per bucket and
//! forward-filled so every whole minute from 0 to the final minute has a
//! row. Minute 0 is always 0:0.
//!
//! The final minute is the last scoring minute, extended to the end of
//! regulation and to the start of the last period played. The nominal end
//! of the last overtime is not assumed.
//!
//! Period scores come from each made shot's own period, so a basket on a
//! period's opening clock is never credited to the period before.

use serde::Serialize;
use tracing::debug;

use crate::config::EngineConfig;
use crate::ingest::NormalizedMatch;
use crate::models::TeamSide;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreSample {
    pub minute: u32,
    pub home: u32,
    pub away: u32,
    /// home - away
    pub difference: i32,
}

impl ScoreSample {
    fn new(minute: u32, home: u32, away: u32) -> Self {
        Self { minute, home, away, difference: home as i32 - away as i32 }
    }

    pub fn score(&self, side: TeamSide) -> u32 {
        match side {
            TeamSide::Home => self.home,
            TeamSide::Away => self.away,
        }
    }

    pub fn leader(&self) -> Option<TeamSide> {
        match self.difference {
            d if d > 0 => Some(TeamSide::Home),
            d if d < 0 => Some(TeamSide::Away),
            _ => None,
        }
    }
}

/// Points scored by each team inside one period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeriodScore {
    pub period: u8,
    pub home: u32,
    pub away: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreTimeline {
    /// One sample per minute, `samples[m].minute == m`
    samples: Vec<ScoreSample>,
    periods: Vec<PeriodScore>,
}

impl ScoreTimeline {
    pub fn samples(&self) -> &[ScoreSample] {
        &self.samples
    }

    pub fn at(&self, minute: u32) -> Option<&ScoreSample> {
        self.samples.get(minute as usize)
    }

    pub fn final_minute(&self) -> u32 {
        self.samples.last().map(|s| s.minute).unwrap_or_default()
    }

    pub fn final_score(&self) -> (u32, u32) {
        self.samples.last().map(|s| (s.home, s.away)).unwrap_or_default()
    }

    pub fn period_scores(&self) -> &[PeriodScore] {
        &self.periods
    }

    /// `"h:a  h:a  ..."`, one entry per period played.
    pub fn format_period_line(&self) -> String {
        self.periods
            .iter()
            .map(|p| format!("{}:{}", p.home, p.away))
            .collect::<Vec<_>>()
            .join("  ")
    }
}

pub fn build_score_timeline(normalized: &NormalizedMatch, config: &EngineConfig) -> ScoreTimeline {
    // a basket at 0:00 still counts in the first minute
    let made: Vec<(u32, u8, TeamSide, u32)> = normalized
        .events
        .iter()
        .filter(|e| e.is_made_shot())
        .map(|e| (e.minute().max(1), e.period, e.side, e.points()))
        .collect();

    let periods_played = normalized.clock.periods_played;
    let last_scoring_minute = made.iter().map(|(minute, ..)| *minute).max().unwrap_or(0);
    let last_period_start =
        if periods_played > 0 { config.period_start_minute(periods_played) } else { 0 };
    let final_minute = last_scoring_minute.max(config.regulation_minutes()).max(last_period_start);

    let mut buckets = vec![[0u32; 2]; final_minute as usize + 1];
    let mut periods: Vec<PeriodScore> = (1..=periods_played)
        .map(|period| PeriodScore { period, home: 0, away: 0 })
        .collect();
    for (minute, period, side, points) in &made {
        buckets[*minute as usize][side.index()] += points;
        // the event's own period, not the minute bucket it rounds into
        if let Some(p) = periods.get_mut(usize::from(*period).saturating_sub(1)) {
            match side {
                TeamSide::Home => p.home += points,
                TeamSide::Away => p.away += points,
            }
        }
    }

    let mut running = [0u32; 2];
    let samples: Vec<ScoreSample> = buckets
        .iter()
        .enumerate()
        .map(|(minute, bucket)| {
            running[0] += bucket[0];
            running[1] += bucket[1];
            ScoreSample::new(minute as u32, running[0], running[1])
        })
        .collect();

    debug!(final_minute, made_shots = made.len(), "built score timeline");
    ScoreTimeline { samples, periods }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EventKind, GameTime, MatchEvent, ShotResult};

    fn shot(side: TeamSide, result: ShotResult, period: u8, clock: GameTime) -> MatchEvent {
        MatchEvent::test_shot(side, 1, result, period, clock)
    }

    fn timeline(events: Vec<MatchEvent>) -> ScoreTimeline {
        build_score_timeline(&NormalizedMatch::from_events(events), &EngineConfig::default())
    }

    #[test]
    fn test_forward_filled_cumulative_score() {
        // 2, 3, 2, 1 at minutes 5, 12, 12, 30
        let tl = timeline(vec![
            shot(TeamSide::Home, ShotResult::MadeTwo, 1, GameTime::from_clock(4, 20)),
            shot(TeamSide::Home, ShotResult::MadeThree, 2, GameTime::from_clock(1, 5)),
            shot(TeamSide::Home, ShotResult::MadeTwo, 2, GameTime::from_clock(1, 40)),
            shot(TeamSide::Home, ShotResult::MadeFreeThrow, 3, GameTime::from_clock(9, 30)),
            MatchEvent::test_simple(EventKind::Steal, TeamSide::Away, 9, 4, GameTime::from_minutes(8)),
        ]);

        let home = |m: u32| tl.at(m).unwrap().home;
        assert_eq!(home(0), 0);
        assert_eq!(home(4), 0);
        assert_eq!(home(5), 2);
        assert!((6..=11).all(|m| home(m) == 2));
        assert_eq!(home(12), 7);
        assert!((13..=29).all(|m| home(m) == 7));
        assert_eq!(home(30), 8);
        assert!((30..=40).all(|m| home(m) == 8));
        assert_eq!(tl.final_minute(), 40);
        assert_eq!(tl.final_score(), (8, 0));
    }

    #[test]
    fn test_missed_shots_do_not_score() {
        let tl = timeline(vec![
            shot(TeamSide::Away, ShotResult::MissedThree, 1, GameTime::from_minutes(2)),
            shot(TeamSide::Away, ShotResult::MissedFreeThrow, 1, GameTime::from_minutes(3)),
        ]);
        assert_eq!(tl.final_score(), (0, 0));
        assert!(tl.samples().iter().all(|s| s.difference == 0));
    }

    #[test]
    fn test_basket_at_tip_off_counts_in_first_minute() {
        let tl = timeline(vec![shot(TeamSide::Away, ShotResult::MadeTwo, 1, GameTime::ZERO)]);
        assert_eq!(tl.at(0).unwrap().away, 0);
        assert_eq!(tl.at(1).unwrap().away, 2);
        assert_eq!(tl.at(1).unwrap().difference, -2);
        assert_eq!(tl.at(1).unwrap().leader(), Some(TeamSide::Away));
    }

    #[test]
    fn test_overtime_extends_final_minute() {
        // last basket at 44:30 -> minute 45
        let tl = timeline(vec![
            shot(TeamSide::Home, ShotResult::MadeTwo, 4, GameTime::from_minutes(9)),
            shot(TeamSide::Away, ShotResult::MadeThree, 5, GameTime::from_clock(4, 30)),
        ]);
        assert_eq!(tl.final_minute(), 45);
        assert_eq!(tl.samples().len(), 46);
        assert_eq!(tl.final_score(), (2, 3));
    }

    #[test]
    fn test_scoreless_overtime_covers_previous_period_end() {
        // second overtime starts at minute 45 even without a basket in it
        let tl = timeline(vec![
            shot(TeamSide::Home, ShotResult::MadeTwo, 5, GameTime::from_minutes(1)),
            MatchEvent::test_foul(TeamSide::Away, 2, 6, GameTime::from_minutes(2)),
        ]);
        assert_eq!(tl.final_minute(), 45);
        assert_eq!(tl.format_period_line(), "0:0  0:0  0:0  0:0  2:0  0:0");
    }

    #[test]
    fn test_period_scores() {
        let tl = timeline(vec![
            shot(TeamSide::Home, ShotResult::MadeTwo, 1, GameTime::from_minutes(3)),
            shot(TeamSide::Away, ShotResult::MadeThree, 1, GameTime::from_minutes(10)),
            shot(TeamSide::Away, ShotResult::MadeTwo, 2, GameTime::from_clock(0, 1)),
            shot(TeamSide::Home, ShotResult::MadeFreeThrow, 4, GameTime::from_minutes(7)),
        ]);
        let periods = tl.period_scores();
        assert_eq!(periods.len(), 4);
        assert_eq!((periods[0].home, periods[0].away), (2, 3));
        assert_eq!((periods[1].home, periods[1].away), (0, 2));
        assert_eq!(tl.format_period_line(), "2:3  0:2  0:0  1:0");

        let total: u32 = periods.iter().map(|p| p.home + p.away).sum();
        assert_eq!(total, 8);
    }

    #[test]
    fn test_basket_on_period_opening_clock_stays_in_its_period() {
        // 2nd period 00:00 is absolute 10:00, the same minute bucket as the
        // end of the 1st period
        let tl = timeline(vec![
            shot(TeamSide::Home, ShotResult::MadeTwo, 1, GameTime::from_minutes(10)),
            shot(TeamSide::Away, ShotResult::MadeThree, 2, GameTime::ZERO),
            shot(TeamSide::Home, ShotResult::MadeTwo, 3, GameTime::ZERO),
        ]);
        assert_eq!(tl.at(10).unwrap().away, 3);
        assert_eq!(tl.format_period_line(), "2:0  0:3  2:0");
    }

    #[test]
    fn test_empty_match_spans_regulation() {
        let tl = timeline(Vec::new());
        assert_eq!(tl.final_minute(), 40);
        assert!(tl.period_scores().is_empty());
        assert_eq!(tl.at(0).unwrap().difference, 0);
    }
}
