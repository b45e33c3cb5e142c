//! Property tests over generated, substitution-consistent matches.

use proptest::prelude::*;

use super::*;
use crate::config::EngineConfig;
use crate::ingest::{NormalizedMatch, RosterIndex};
use crate::models::{EventKind, GameTime, MatchEvent, Player, PlayerId, ShotResult, TeamSide};

const HOME_IDS: [PlayerId; 8] = [1, 2, 3, 4, 5, 6, 7, 8];
const AWAY_IDS: [PlayerId; 5] = [11, 12, 13, 14, 15];

/// Regulation seconds; overtime is covered by the unit tests.
const MATCH_SECONDS: u32 = 2400;

#[derive(Debug, Clone)]
enum Action {
    /// Home substitution: court slot out, bench slot in
    Sub { out_slot: usize, in_slot: usize },
    Shot { side: TeamSide, slot: usize, result: ShotResult },
    Foul { side: TeamSide, slot: usize },
    Rebound { side: TeamSide, slot: usize },
}

fn side_strategy() -> impl Strategy<Value = TeamSide> {
    prop_oneof![Just(TeamSide::Home), Just(TeamSide::Away)]
}

fn shot_result_strategy() -> impl Strategy<Value = ShotResult> {
    prop_oneof![
        Just(ShotResult::MadeFreeThrow),
        Just(ShotResult::MissedFreeThrow),
        Just(ShotResult::MadeTwo),
        Just(ShotResult::MissedTwo),
        Just(ShotResult::MadeThree),
        Just(ShotResult::MissedThree),
    ]
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        (0usize..5, 0usize..3).prop_map(|(out_slot, in_slot)| Action::Sub { out_slot, in_slot }),
        (side_strategy(), 0usize..5, shot_result_strategy())
            .prop_map(|(side, slot, result)| Action::Shot { side, slot, result }),
        (side_strategy(), 0usize..5).prop_map(|(side, slot)| Action::Foul { side, slot }),
        (side_strategy(), 0usize..5).prop_map(|(side, slot)| Action::Rebound { side, slot }),
    ]
}

fn timed_actions_strategy() -> impl Strategy<Value = Vec<(u32, Action)>> {
    prop::collection::vec((1u32..MATCH_SECONDS, action_strategy()), 0..80).prop_map(|mut v| {
        v.sort_by_key(|(t, _)| *t);
        v
    })
}

fn event_at(kind: EventKind, side: TeamSide, seconds: u32) -> MatchEvent {
    let config = EngineConfig::default();
    let period = (seconds / 600 + 1) as u8;
    let clock = GameTime::from_seconds(seconds).saturating_sub(config.period_offset(period));
    MatchEvent::test_base(kind, side, period, clock)
}

/// Plays the actions through a 5-on-court / 3-on-bench home rotation so
/// every substitution is consistent. All ten starters touch the ball at
/// tip-off.
fn build_match(actions: &[(u32, Action)]) -> (RosterIndex, NormalizedMatch) {
    let mut court: Vec<PlayerId> = HOME_IDS[..5].to_vec();
    let mut bench: Vec<PlayerId> = HOME_IDS[5..].to_vec();

    let mut events: Vec<MatchEvent> = court
        .iter()
        .map(|id| (TeamSide::Home, *id))
        .chain(AWAY_IDS.iter().map(|id| (TeamSide::Away, *id)))
        .map(|(side, id)| MatchEvent {
            player: Some(id),
            ..event_at(EventKind::DefensiveRebound, side, 0)
        })
        .collect();

    let on_court = |court: &[PlayerId], side: TeamSide, slot: usize| match side {
        TeamSide::Home => court[slot],
        TeamSide::Away => AWAY_IDS[slot],
    };

    for (seconds, action) in actions {
        let event = match action {
            Action::Sub { out_slot, in_slot } => {
                let out = court[*out_slot];
                let incoming = bench[*in_slot];
                court[*out_slot] = incoming;
                bench[*in_slot] = out;
                MatchEvent {
                    player_in: Some(incoming),
                    player_out: Some(out),
                    ..event_at(EventKind::Substitution, TeamSide::Home, *seconds)
                }
            }
            Action::Shot { side, slot, result } => MatchEvent {
                player: Some(on_court(court.as_slice(), *side, *slot)),
                shot_result: Some(*result),
                ..event_at(EventKind::Shot, *side, *seconds)
            },
            Action::Foul { side, slot } => MatchEvent {
                player: Some(on_court(court.as_slice(), *side, *slot)),
                ..event_at(EventKind::Foul, *side, *seconds)
            },
            Action::Rebound { side, slot } => MatchEvent {
                player: Some(on_court(court.as_slice(), *side, *slot)),
                ..event_at(EventKind::OffensiveRebound, *side, *seconds)
            },
        };
        events.push(event);
    }
    for (i, e) in events.iter_mut().enumerate() {
        e.sequence = i;
    }

    let roster = RosterIndex::from_players(
        HOME_IDS
            .iter()
            .map(|id| Player::new(*id, TeamSide::Home, "H", "H"))
            .chain(AWAY_IDS.iter().map(|id| Player::new(*id, TeamSide::Away, "A", "A"))),
    )
    .unwrap();
    (roster, NormalizedMatch::from_events(events))
}

proptest! {
    #[test]
    fn test_intervals_disjoint_and_bounded(actions in timed_actions_strategy()) {
        let (roster, normalized) = build_match(&actions);
        let table = reconstruct_intervals(&roster, &normalized).unwrap();

        for player in roster.players() {
            let timeline = table.get(player.id).unwrap();
            prop_assert!(timeline.playing_time() <= table.match_duration());
            for w in timeline.intervals.windows(2) {
                prop_assert!(w[0].exit <= w[1].entry);
            }
            for interval in &timeline.intervals {
                prop_assert!(interval.entry <= interval.exit);
            }
        }
    }

    #[test]
    fn test_rotation_keeps_five_on_court(actions in timed_actions_strategy()) {
        let (roster, normalized) = build_match(&actions);
        let table = reconstruct_intervals(&roster, &normalized).unwrap();
        let lineups = compute_lineups(&roster, &table, &normalized);

        prop_assert!(lineups.cardinality_diagnostics(5).is_empty());
        for snapshot in &lineups.snapshots {
            prop_assert_eq!(snapshot.players.len(), 5);
        }
    }

    #[test]
    fn test_score_monotone_and_consistent(actions in timed_actions_strategy()) {
        let config = EngineConfig::default();
        let (roster, normalized) = build_match(&actions);
        let timeline = build_score_timeline(&normalized, &config);

        let samples = timeline.samples();
        prop_assert_eq!(samples[0].difference, 0);
        for w in samples.windows(2) {
            prop_assert!(w[0].home <= w[1].home);
            prop_assert!(w[0].away <= w[1].away);
            prop_assert_eq!(w[1].minute, w[0].minute + 1);
        }
        for s in samples {
            prop_assert_eq!(s.difference, s.home as i32 - s.away as i32);
        }

        let made = |side: TeamSide| -> u32 {
            normalized.events.iter().filter(|e| e.side == side).map(MatchEvent::points).sum()
        };
        prop_assert_eq!(timeline.final_score(), (made(TeamSide::Home), made(TeamSide::Away)));

        let intervals = reconstruct_intervals(&roster, &normalized).unwrap();
        let stats = aggregate_player_stats(&roster, &intervals, &normalized);
        prop_assert_eq!(stats.team_points(TeamSide::Home), made(TeamSide::Home));
        prop_assert_eq!(stats.team_points(TeamSide::Away), made(TeamSide::Away));

        let period_total: u32 = timeline.period_scores().iter().map(|p| p.home + p.away).sum();
        prop_assert_eq!(period_total, made(TeamSide::Home) + made(TeamSide::Away));
    }

    #[test]
    fn test_bonus_entry_within_period(actions in timed_actions_strategy()) {
        let config = EngineConfig::default();
        let (_, normalized) = build_match(&actions);
        let records = track_foul_bonus(&normalized, &config);

        let fouls = normalized.events.iter().filter(|e| e.kind == EventKind::Foul).count();
        prop_assert_eq!(records.iter().map(|r| r.fouls as usize).sum::<usize>(), fouls);
        for r in &records {
            match r.bonus_entry {
                BonusEntry::None => {
                    prop_assert!((r.fouls as usize) < config.bonus_foul_threshold);
                }
                BonusEntry::At(clock) => {
                    prop_assert!(r.fouls as usize >= config.bonus_foul_threshold);
                    prop_assert!(clock <= config.period_length(r.period));
                }
            }
        }
    }
}
