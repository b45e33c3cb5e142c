//! # Event Normalizer
//!
//! Turns the raw feed event list into the canonical, chronologically
//! ordered `MatchEvent` sequence with absolute match times.
//!
//! ## Rules
//! 1. Events without a clock reading are dropped (incomplete capture)
//! 2. Team codes normalize to Home/Away
//! 3. Period names map to fixed regulation offsets, overtime periods follow
//!    in `overtime_minutes` blocks
//! 4. Identifier fields are coerced to integers; failure is fatal
//! 5. Leading substitutions at 00:00 are the captured starting lineup and
//!    are removed

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::coerce::coerce_id;
use crate::config::EngineConfig;
use crate::error::{ErrorContext, MatchError, Result};
use crate::models::{Diagnostic, EventKind, FoulType, GameTime, MatchEvent, RawEvent, ShotResult, TeamSide};

/// Match length facts derived from the normalized stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchClock {
    /// Highest period number seen (5 = first overtime under FIBA rules)
    pub periods_played: u8,
    /// Latest absolute time of any event
    pub last_event: GameTime,
}

impl MatchClock {
    pub fn from_events(events: &[MatchEvent]) -> Self {
        Self {
            periods_played: events.iter().map(|e| e.period).max().unwrap_or(0),
            last_event: events.iter().map(|e| e.time).max().unwrap_or(GameTime::ZERO),
        }
    }

    pub const fn match_start(&self) -> GameTime {
        GameTime::ZERO
    }

    /// Match end is observed, not assumed: overtime pushes it past regulation.
    pub const fn match_end(&self) -> GameTime {
        self.last_event
    }

    pub fn overtimes(&self, config: &EngineConfig) -> u8 {
        self.periods_played.saturating_sub(config.regulation_periods)
    }
}

/// Output of the normalizer; immutable input to every analysis component.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizedMatch {
    pub events: Vec<MatchEvent>,
    pub clock: MatchClock,
    pub diagnostics: Vec<Diagnostic>,
}

impl NormalizedMatch {
    /// Order events chronologically (stable, so feed order breaks ties) and
    /// strip the starting-lineup substitutions at 00:00.
    pub fn from_events(mut events: Vec<MatchEvent>) -> Self {
        events.sort_by_key(|e| e.time);

        let leading_subs = events
            .iter()
            .take_while(|e| e.is_substitution() && e.time == GameTime::ZERO)
            .count();
        if leading_subs > 0 {
            debug!(count = leading_subs, "dropping starting-lineup substitutions");
            events.drain(..leading_subs);
        }

        let clock = MatchClock::from_events(&events);
        Self { events, clock, diagnostics: Vec::new() }
    }

    /// Distinct absolute times of non-substitution events, ascending.
    pub fn event_times(&self) -> Vec<GameTime> {
        let mut times: Vec<GameTime> =
            self.events.iter().filter(|e| !e.is_substitution()).map(|e| e.time).collect();
        times.dedup();
        times
    }

    pub fn substitutions(&self) -> impl Iterator<Item = &MatchEvent> {
        self.events.iter().filter(|e| e.is_substitution())
    }
}

pub struct EventNormalizer<'a> {
    config: &'a EngineConfig,
}

impl<'a> EventNormalizer<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    pub fn normalize(&self, raw: &[RawEvent]) -> Result<NormalizedMatch> {
        let mut events = Vec::with_capacity(raw.len());
        let mut diagnostics = Vec::new();
        let mut dropped = 0usize;

        for (index, raw_event) in raw.iter().enumerate() {
            match self.normalize_event(index, raw_event, &mut diagnostics)? {
                Some(event) => events.push(event),
                None => dropped += 1,
            }
        }

        let mut normalized = NormalizedMatch::from_events(events);
        normalized.diagnostics = diagnostics;
        debug!(
            kept = normalized.events.len(),
            dropped,
            periods = normalized.clock.periods_played,
            match_end = %normalized.clock.match_end(),
            "normalized event stream"
        );
        Ok(normalized)
    }

    fn normalize_event(
        &self,
        index: usize,
        raw: &RawEvent,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Option<MatchEvent>> {
        let ctx = || ErrorContext::event(index);

        let clock_text = raw.period_time.as_deref().map(str::trim).unwrap_or_default();
        if clock_text.is_empty() {
            debug!(index, kind = %raw.match_event_type, "dropping event without clock");
            return Ok(None);
        }

        let kind = EventKind::from_code(&raw.match_event_type);

        let side = match raw.team.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            Some(code) => TeamSide::from_code(code)
                .ok_or_else(|| MatchError::parse(ctx(), format!("unknown team code '{code}'")))?,
            None if !kind.is_stat_event() => {
                debug!(index, kind = %raw.match_event_type, "dropping team-less event");
                return Ok(None);
            }
            None => return Err(MatchError::parse(ctx(), "missing team code")),
        };

        let clock = GameTime::parse_clock(clock_text)
            .ok_or_else(|| MatchError::parse(ctx(), format!("invalid clock '{clock_text}'")))?;

        let period = parse_period(raw.period_name.as_deref(), &raw.period, self.config, index)?;
        if clock > self.config.period_length(period) {
            return Err(MatchError::parse(
                ctx(),
                format!("clock {clock} exceeds the length of period {period}"),
            ));
        }

        let shot_code = coerce_id(&raw.shot_result, "ShotResult", ctx())?;
        let shot_result = match (kind == EventKind::Shot, shot_code) {
            (true, Some(code)) => {
                let result = ShotResult::from_code(code);
                if result.is_none() {
                    diagnostics.push(Diagnostic::UnknownShotResult { event_index: index, code });
                }
                result
            }
            _ => None,
        };
        let foul_type = coerce_id(&raw.foul_type, "FoulType", ctx())?.map(FoulType::from_code);

        Ok(Some(MatchEvent {
            sequence: index,
            kind,
            side,
            player: coerce_id(&raw.player, "Player", ctx())?,
            player_in: coerce_id(&raw.player_in, "PlayerIn", ctx())?,
            player_out: coerce_id(&raw.player_out, "PlayerOut", ctx())?,
            assist: coerce_id(&raw.assist, "Assist", ctx())?,
            period,
            clock,
            time: self.config.period_offset(period) + clock,
            shot_result,
            foul_type,
        }))
    }
}

/// Resolve the 1-based period number from `"<n>. periode"` /
/// `"<n>. ekstraomgang"` style names, falling back to a numeric field.
pub fn parse_period(
    name: Option<&str>,
    numeric: &Value,
    config: &EngineConfig,
    index: usize,
) -> Result<u8> {
    let ctx = || ErrorContext::event(index);

    let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) else {
        let number = coerce_id(numeric, "Period", ctx())?
            .ok_or_else(|| MatchError::parse(ctx(), "missing period"))?;
        return u8::try_from(number)
            .map_err(|_| MatchError::parse(ctx(), format!("period {number} out of range")));
    };

    let invalid = || MatchError::parse(ctx(), format!("unrecognized period name '{name}'"));

    let (number, label) = name.split_once('.').ok_or_else(invalid)?;
    let number: u8 = number.trim().parse().map_err(|_| invalid())?;
    if number == 0 {
        return Err(invalid());
    }

    match label.trim().to_lowercase().as_str() {
        "periode" | "period" | "quarter" if number <= config.regulation_periods => Ok(number),
        "ekstraomgang" | "overtime" => {
            config.regulation_periods.checked_add(number).ok_or_else(invalid)
        }
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(kind: &str, team: &str, period: &str, time: &str) -> RawEvent {
        RawEvent {
            match_event_type: kind.to_string(),
            team: Some(team.to_string()),
            period_name: Some(period.to_string()),
            period_time: Some(time.to_string()),
            ..Default::default()
        }
    }

    fn normalize(events: &[RawEvent]) -> Result<NormalizedMatch> {
        let config = EngineConfig::default();
        EventNormalizer::new(&config).normalize(events)
    }

    #[test]
    fn test_absolute_time_from_period_offsets() {
        let mut shot = raw("Shot", "H", "3. periode", "04:30");
        shot.player = json!(5);
        shot.shot_result = json!(200443);
        let ot = raw("Turnover", "B", "2. ekstraomgang", "01:00");

        let n = normalize(&[shot, ot]).unwrap();
        assert_eq!(n.events[0].time, GameTime::from_clock(24, 30));
        assert_eq!(n.events[0].side, TeamSide::Home);
        assert_eq!(n.events[0].shot_result, Some(ShotResult::MadeTwo));
        assert_eq!(n.events[1].period, 6);
        assert_eq!(n.events[1].time, GameTime::from_minutes(46));
        assert_eq!(n.events[1].side, TeamSide::Away);
        assert_eq!(n.clock.periods_played, 6);
        assert_eq!(n.clock.overtimes(&EngineConfig::default()), 2);
        assert_eq!(n.clock.match_end(), GameTime::from_minutes(46));
    }

    #[test]
    fn test_events_without_clock_are_dropped() {
        let mut missing = raw("Steal", "H", "1. periode", "");
        missing.player = json!(3);
        let mut null_clock = raw("Steal", "H", "1. periode", "");
        null_clock.period_time = None;
        let kept = raw("Block", "H", "1. periode", "01:00");

        let n = normalize(&[missing, null_clock, kept]).unwrap();
        assert_eq!(n.events.len(), 1);
        assert_eq!(n.events[0].sequence, 2);
    }

    #[test]
    fn test_leading_lineup_substitutions_removed() {
        let mut s1 = raw("Substitution", "H", "1. periode", "00:00");
        s1.player_in = json!(1);
        let mut s2 = raw("Substitution", "B", "1. periode", "00:00");
        s2.player_in = json!(2);
        let jump = raw("Foul", "H", "1. periode", "00:00");
        let mut late_sub = raw("Substitution", "H", "1. periode", "03:00");
        late_sub.player_in = json!(6);
        late_sub.player_out = json!(1);

        let n = normalize(&[s1, s2, jump, late_sub]).unwrap();
        assert_eq!(n.events.len(), 2);
        assert_eq!(n.events[0].kind, EventKind::Foul);
        assert!(n.events[1].is_substitution());
    }

    #[test]
    fn test_stream_sorted_chronologically() {
        let late = raw("Steal", "H", "2. periode", "01:00");
        let early = raw("Steal", "H", "1. periode", "09:00");
        let n = normalize(&[late, early]).unwrap();
        assert_eq!(n.events[0].sequence, 1);
        assert_eq!(n.events[1].sequence, 0);
    }

    #[test]
    fn test_bad_clock_is_fatal() {
        let err = normalize(&[raw("Steal", "H", "1. periode", "05:75")]).unwrap_err();
        assert!(matches!(err, MatchError::Parse { .. }));
        let err = normalize(&[raw("Steal", "H", "1. periode", "10:01")]).unwrap_err();
        assert!(err.to_string().contains("exceeds"));
        // overtime periods are only five minutes long
        assert!(normalize(&[raw("Steal", "H", "1. ekstraomgang", "06:00")]).is_err());
    }

    #[test]
    fn test_oversized_clock_is_a_parse_error() {
        let mut steal = raw("Steal", "H", "1. periode", "71582789:00");
        steal.player = json!(4);
        let err = normalize(&[steal]).unwrap_err();
        assert!(matches!(err, MatchError::Parse { .. }));
        assert_eq!(err.context().unwrap().event_index, Some(0));

        assert!(normalize(&[raw("Steal", "H", "1. periode", "7:+5")]).is_err());
    }

    #[test]
    fn test_bad_identifier_is_fatal() {
        let mut ev = raw("Shot", "H", "1. periode", "01:00");
        ev.player = json!("seven");
        let err = normalize(&[ev]).unwrap_err();
        assert_eq!(err.context().unwrap().event_index, Some(0));
    }

    #[test]
    fn test_team_codes() {
        assert!(normalize(&[raw("Shot", "X", "1. periode", "01:00")]).is_err());

        let mut no_team = raw("Timeout", "", "1. periode", "01:00");
        no_team.team = None;
        assert!(normalize(&[no_team.clone()]).unwrap().events.is_empty());

        no_team.match_event_type = "Foul".into();
        assert!(normalize(&[no_team]).is_err());
    }

    #[test]
    fn test_unknown_shot_code_reported() {
        let mut ev = raw("Shot", "H", "1. periode", "01:00");
        ev.player = json!(4);
        ev.shot_result = json!(999);
        let n = normalize(&[ev]).unwrap();
        assert_eq!(n.events[0].shot_result, None);
        assert_eq!(n.diagnostics, vec![Diagnostic::UnknownShotResult { event_index: 0, code: 999 }]);
    }

    #[test]
    fn test_parse_period_variants() {
        let cfg = EngineConfig::default();
        let none = Value::Null;
        assert_eq!(parse_period(Some("1. periode"), &none, &cfg, 0).unwrap(), 1);
        assert_eq!(parse_period(Some("4. Quarter"), &none, &cfg, 0).unwrap(), 4);
        assert_eq!(parse_period(Some("1. ekstraomgang"), &none, &cfg, 0).unwrap(), 5);
        assert_eq!(parse_period(Some("3. overtime"), &none, &cfg, 0).unwrap(), 7);
        assert_eq!(parse_period(None, &json!(2), &cfg, 0).unwrap(), 2);
        assert!(parse_period(Some("5. periode"), &none, &cfg, 0).is_err());
        assert!(parse_period(Some("halftime"), &none, &cfg, 0).is_err());
        assert!(parse_period(None, &none, &cfg, 0).is_err());
    }
}
