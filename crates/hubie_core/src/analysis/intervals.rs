//! # Interval Reconstructor
//!
//! Rebuilds every player's on-court intervals from substitution events.
//!
//! ## Algorithm
//! 1. Collect the substitutions naming the player as incoming or outgoing
//! 2. No substitutions: the player either played the whole match (referenced
//!    by some other event) or did not play at all
//! 3. Tag each substitution in/out; a leading "out" means the player
//!    started, a trailing "in" means the player finished
//! 4. Pair the alternating tags into (entry, exit) intervals; a repeated tag
//!    is a consistency error
//!
//! Match end is the last observed event time, so overtime is covered
//! without knowing the number of extra periods up front.

use fxhash::{FxHashMap, FxHashSet};
use serde::Serialize;
use tracing::debug;

use crate::error::{ErrorContext, MatchError, Result};
use crate::ingest::{NormalizedMatch, RosterIndex};
use crate::models::{GameTime, PlayerId, TeamSide};

/// One stretch of a player on court.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlayInterval {
    pub player: PlayerId,
    pub side: TeamSide,
    pub entry: GameTime,
    pub exit: GameTime,
    /// Still on court at the final whistle
    pub at_final_whistle: bool,
}

impl PlayInterval {
    pub fn duration(&self) -> GameTime {
        self.exit.saturating_sub(self.entry)
    }

    pub fn is_empty(&self) -> bool {
        self.exit <= self.entry
    }

    /// The zero-length "did not play" marker.
    pub fn is_dnp_marker(&self) -> bool {
        self.is_empty() && !self.at_final_whistle
    }

    /// Half-open membership (`entry <= t < exit`) so a substitution instant
    /// belongs to the incoming player only. Only an interval closed by the
    /// final whistle also holds its exit instant; a player subbed in at
    /// match end holds `[end, end]`.
    pub fn contains(&self, t: GameTime) -> bool {
        if t < self.entry {
            return false;
        }
        t < self.exit || (self.at_final_whistle && t == self.exit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerTimeline {
    pub player: PlayerId,
    pub side: TeamSide,
    pub starter: bool,
    pub intervals: Vec<PlayInterval>,
}

impl PlayerTimeline {
    pub fn playing_time(&self) -> GameTime {
        self.intervals.iter().map(PlayInterval::duration).sum()
    }

    pub fn played(&self) -> bool {
        self.intervals.iter().any(|i| !i.is_dnp_marker())
    }

    pub fn on_court_at(&self, t: GameTime) -> bool {
        self.intervals.iter().any(|i| i.contains(t))
    }
}

/// Reconstructed timelines for every rostered player.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IntervalTable {
    pub match_start: GameTime,
    pub match_end: GameTime,
    timelines: FxHashMap<PlayerId, PlayerTimeline>,
}

impl IntervalTable {
    pub fn get(&self, player: PlayerId) -> Option<&PlayerTimeline> {
        self.timelines.get(&player)
    }

    pub fn len(&self) -> usize {
        self.timelines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timelines.is_empty()
    }

    pub fn match_duration(&self) -> GameTime {
        self.match_end.saturating_sub(self.match_start)
    }

    pub fn playing_time(&self, player: PlayerId) -> GameTime {
        self.get(player).map(PlayerTimeline::playing_time).unwrap_or_default()
    }

    pub fn is_starter(&self, player: PlayerId) -> bool {
        self.get(player).is_some_and(|t| t.starter)
    }

    /// Every interval except DNP markers, ordered by entry time.
    pub fn intervals(&self) -> Vec<PlayInterval> {
        let mut all: Vec<PlayInterval> = self
            .timelines
            .values()
            .flat_map(|t| t.intervals.iter().copied())
            .filter(|i| !i.is_dnp_marker())
            .collect();
        all.sort_by_key(|i| (i.entry, i.player));
        all
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    In,
    Out,
}

#[derive(Debug, Clone, Copy)]
struct TaggedSub {
    time: GameTime,
    tag: Tag,
    event_index: usize,
}

/// Build the interval table for every player in `roster`.
///
/// A broken in/out alternation aborts the whole run; the error names the
/// player and the offending substitution.
pub fn reconstruct_intervals(
    roster: &RosterIndex,
    normalized: &NormalizedMatch,
) -> Result<IntervalTable> {
    let match_start = normalized.clock.match_start();
    let match_end = normalized.clock.match_end();

    // single pass: substitution tags per player, and who shows up elsewhere
    let mut subs: FxHashMap<PlayerId, Vec<TaggedSub>> = FxHashMap::default();
    let mut referenced: FxHashSet<PlayerId> = FxHashSet::default();
    for event in &normalized.events {
        if event.is_substitution() {
            for (id, tag) in [(event.player_in, Tag::In), (event.player_out, Tag::Out)] {
                if let Some(id) = id {
                    subs.entry(id).or_default().push(TaggedSub {
                        time: event.time,
                        tag,
                        event_index: event.sequence,
                    });
                }
            }
        } else {
            referenced.extend(event.player);
            referenced.extend(event.assist);
        }
    }

    let mut timelines = FxHashMap::default();
    for player in roster.players() {
        let timeline = match subs.get(&player.id) {
            Some(tags) => {
                timeline_from_tags(player.id, player.side, tags, match_start, match_end)?
            }
            None if referenced.contains(&player.id) => PlayerTimeline {
                player: player.id,
                side: player.side,
                starter: true,
                intervals: vec![PlayInterval {
                    player: player.id,
                    side: player.side,
                    entry: match_start,
                    exit: match_end,
                    at_final_whistle: true,
                }],
            },
            None => PlayerTimeline {
                player: player.id,
                side: player.side,
                starter: false,
                intervals: vec![PlayInterval {
                    player: player.id,
                    side: player.side,
                    entry: match_start,
                    exit: match_start,
                    at_final_whistle: false,
                }],
            },
        };
        timelines.insert(player.id, timeline);
    }

    debug!(
        players = timelines.len(),
        substituted = subs.len(),
        match_end = %match_end,
        "reconstructed playing intervals"
    );
    Ok(IntervalTable { match_start, match_end, timelines })
}

fn timeline_from_tags(
    player: PlayerId,
    side: TeamSide,
    tags: &[TaggedSub],
    match_start: GameTime,
    match_end: GameTime,
) -> Result<PlayerTimeline> {
    let mut sequence: Vec<TaggedSub> = Vec::with_capacity(tags.len() + 2);
    let mut finishes = false;

    let starter = tags.first().is_some_and(|t| t.tag == Tag::Out);
    if starter {
        sequence.push(TaggedSub { time: match_start, tag: Tag::In, event_index: 0 });
    }
    sequence.extend_from_slice(tags);
    if sequence.last().is_some_and(|t| t.tag == Tag::In) {
        sequence.push(TaggedSub { time: match_end, tag: Tag::Out, event_index: 0 });
        finishes = true;
    }

    if let Some(pair) = sequence.windows(2).find(|w| w[0].tag == w[1].tag) {
        let tag = match pair[1].tag {
            Tag::In => "in",
            Tag::Out => "out",
        };
        return Err(MatchError::timeline(
            ErrorContext::player(player).with_event(pair[1].event_index),
            format!(
                "two consecutive '{tag}' substitutions at {} and {}",
                pair[0].time, pair[1].time
            ),
        ));
    }

    let last = sequence.len() / 2 - 1;
    let intervals = sequence
        .chunks_exact(2)
        .enumerate()
        .map(|(i, pair)| PlayInterval {
            player,
            side,
            entry: pair[0].time,
            exit: pair[1].time,
            at_final_whistle: finishes && i == last,
        })
        // out and back in at the same instant leaves nothing behind
        .filter(|interval| !interval.is_dnp_marker())
        .collect();

    Ok(PlayerTimeline { player, side, starter, intervals })
}
