use serde::{Deserialize, Serialize};
use std::fmt;

use super::time::GameTime;

/// Player identifier as issued by the federation feed.
pub type PlayerId = u32;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TeamSide {
    #[default]
    Home,
    Away,
}

impl TeamSide {
    pub const BOTH: [TeamSide; 2] = [TeamSide::Home, TeamSide::Away];

    /// Normalize a feed team code. The source feed marks away events with
    /// `B` (Norwegian "borte").
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "H" | "Home" | "home" => Some(TeamSide::Home),
            "B" | "A" | "Away" | "away" => Some(TeamSide::Away),
            _ => None,
        }
    }

    pub const fn opponent(self) -> Self {
        match self {
            TeamSide::Home => TeamSide::Away,
            TeamSide::Away => TeamSide::Home,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            TeamSide::Home => 0,
            TeamSide::Away => 1,
        }
    }
}

impl fmt::Display for TeamSide {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TeamSide::Home => write!(f, "Home"),
            TeamSide::Away => write!(f, "Away"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Shot,
    Foul,
    Substitution,
    OffensiveRebound,
    DefensiveRebound,
    Turnover,
    Steal,
    Block,
    /// Any other feed event type (timeouts, period markers, ...)
    Other(String),
}

impl EventKind {
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "Shot" => EventKind::Shot,
            "Foul" => EventKind::Foul,
            "Substitution" => EventKind::Substitution,
            "OffensiveRebound" => EventKind::OffensiveRebound,
            "DefensiveRebound" => EventKind::DefensiveRebound,
            "Turnover" => EventKind::Turnover,
            "Steal" => EventKind::Steal,
            "Block" => EventKind::Block,
            other => EventKind::Other(other.to_string()),
        }
    }

    /// Kinds that feed a player's box-score line.
    pub fn is_stat_event(&self) -> bool {
        !matches!(self, EventKind::Other(_))
    }
}

/// Outcome of a shot attempt, keyed by the feed's result code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
pub enum ShotResult {
    MadeFreeThrow,
    MissedFreeThrow,
    MadeTwo,
    MissedTwo,
    MadeThree,
    MissedThree,
}

const SHOT_RESULT_CODES: [(u32, ShotResult); 6] = [
    (200444, ShotResult::MadeFreeThrow),
    (200445, ShotResult::MissedFreeThrow),
    (200443, ShotResult::MadeTwo),
    (200581, ShotResult::MissedTwo),
    (200442, ShotResult::MadeThree),
    (200580, ShotResult::MissedThree),
];

impl ShotResult {
    pub fn from_code(code: u32) -> Option<Self> {
        SHOT_RESULT_CODES.iter().find(|(c, _)| *c == code).map(|(_, result)| *result)
    }

    pub fn code(self) -> u32 {
        SHOT_RESULT_CODES
            .iter()
            .find(|(_, result)| *result == self)
            .map(|(c, _)| *c)
            .unwrap_or_default()
    }

    /// Nominal value of the attempt (1, 2 or 3).
    pub const fn value(self) -> u32 {
        match self {
            ShotResult::MadeFreeThrow | ShotResult::MissedFreeThrow => 1,
            ShotResult::MadeTwo | ShotResult::MissedTwo => 2,
            ShotResult::MadeThree | ShotResult::MissedThree => 3,
        }
    }

    pub const fn is_made(self) -> bool {
        matches!(self, ShotResult::MadeFreeThrow | ShotResult::MadeTwo | ShotResult::MadeThree)
    }

    /// Points credited to the shooter.
    pub const fn points(self) -> u32 {
        if self.is_made() {
            self.value()
        } else {
            0
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            ShotResult::MadeFreeThrow => "Made 1P",
            ShotResult::MissedFreeThrow => "Missed 1P",
            ShotResult::MadeTwo => "Made 2P",
            ShotResult::MissedTwo => "Missed 2P",
            ShotResult::MadeThree => "Made 3P",
            ShotResult::MissedThree => "Missed 3P",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoulType {
    SideBall,
    FreeThrow,
    Offensive,
    Unsportsmanlike,
    Other(u32),
}

const FOUL_TYPE_CODES: [(u32, FoulType); 4] = [
    (200448, FoulType::SideBall),
    (200461, FoulType::FreeThrow),
    (200449, FoulType::Offensive),
    (200450, FoulType::Unsportsmanlike),
];

impl FoulType {
    pub fn from_code(code: u32) -> Self {
        FOUL_TYPE_CODES
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, foul)| *foul)
            .unwrap_or(FoulType::Other(code))
    }

    pub const fn description(self) -> &'static str {
        match self {
            FoulType::SideBall => "Side Ball",
            FoulType::FreeThrow => "Free Throw",
            FoulType::Offensive => "Offensive Foul",
            FoulType::Unsportsmanlike => "Unsportsmanlike Foul",
            FoulType::Other(_) => "Foul",
        }
    }
}

/// One normalized play-by-play event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchEvent {
    /// Index of the event in the raw feed
    pub sequence: usize,
    pub kind: EventKind,
    pub side: TeamSide,
    /// Acting player (shooter, fouler, rebounder, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player: Option<PlayerId>,
    /// Substitution: incoming player
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_in: Option<PlayerId>,
    /// Substitution: outgoing player
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_out: Option<PlayerId>,
    /// Shot: assisting player
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assist: Option<PlayerId>,
    /// 1-based period number; overtime periods follow regulation
    pub period: u8,
    /// Clock reading within the period (counting up)
    pub clock: GameTime,
    /// Absolute match time: period offset + clock
    pub time: GameTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shot_result: Option<ShotResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foul_type: Option<FoulType>,
}

impl MatchEvent {
    pub fn is_substitution(&self) -> bool {
        self.kind == EventKind::Substitution
    }

    /// Whole-minute bucket used for aggregation.
    pub fn minute(&self) -> u32 {
        self.time.minute_ceil()
    }

    /// Points scored by this event (made shots only).
    pub fn points(&self) -> u32 {
        match (&self.kind, self.shot_result) {
            (EventKind::Shot, Some(result)) => result.points(),
            _ => 0,
        }
    }

    pub fn is_made_shot(&self) -> bool {
        self.points() > 0
    }

    /// Every player id the event mentions, in field order.
    pub fn referenced_players(&self) -> impl Iterator<Item = PlayerId> {
        [self.player, self.player_in, self.player_out, self.assist].into_iter().flatten()
    }

    // ==========================================
    // Test helper constructors
    // ==========================================

    #[cfg(test)]
    pub fn test_base(kind: EventKind, side: TeamSide, period: u8, clock: GameTime) -> Self {
        let offset = crate::config::EngineConfig::default().period_offset(period);
        MatchEvent {
            sequence: 0,
            kind,
            side,
            player: None,
            player_in: None,
            player_out: None,
            assist: None,
            period,
            clock,
            time: offset + clock,
            shot_result: None,
            foul_type: None,
        }
    }

    #[cfg(test)]
    pub fn test_shot(
        side: TeamSide,
        player: PlayerId,
        result: ShotResult,
        period: u8,
        clock: GameTime,
    ) -> Self {
        MatchEvent {
            player: Some(player),
            shot_result: Some(result),
            ..Self::test_base(EventKind::Shot, side, period, clock)
        }
    }

    #[cfg(test)]
    pub fn test_substitution(
        side: TeamSide,
        player_in: PlayerId,
        player_out: PlayerId,
        period: u8,
        clock: GameTime,
    ) -> Self {
        MatchEvent {
            player_in: Some(player_in),
            player_out: Some(player_out),
            ..Self::test_base(EventKind::Substitution, side, period, clock)
        }
    }

    #[cfg(test)]
    pub fn test_foul(side: TeamSide, player: PlayerId, period: u8, clock: GameTime) -> Self {
        MatchEvent {
            player: Some(player),
            foul_type: Some(FoulType::SideBall),
            ..Self::test_base(EventKind::Foul, side, period, clock)
        }
    }

    #[cfg(test)]
    pub fn test_simple(
        kind: EventKind,
        side: TeamSide,
        player: PlayerId,
        period: u8,
        clock: GameTime,
    ) -> Self {
        MatchEvent { player: Some(player), ..Self::test_base(kind, side, period, clock) }
    }

    #[cfg(test)]
    pub fn with_assist(mut self, assist: PlayerId) -> Self {
        self.assist = Some(assist);
        self
    }
}
