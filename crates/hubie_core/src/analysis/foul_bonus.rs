use serde::{Serialize, Serializer};
use tracing::debug;

use crate::config::EngineConfig;
use crate::ingest::NormalizedMatch;
use crate::models::{Diagnostic, EventKind, GameTime, TeamSide};

/// Exported bonus time for a period in which a team never reached the bonus.
pub const NO_BONUS_SENTINEL_SECONDS: i64 = -1;

/// Moment a team's opponents started shooting bonus free throws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BonusEntry {
    None,
    /// Period clock of the threshold foul
    At(GameTime),
}

impl BonusEntry {
    /// Clock seconds, or [`NO_BONUS_SENTINEL_SECONDS`].
    pub fn seconds(self) -> i64 {
        match self {
            BonusEntry::None => NO_BONUS_SENTINEL_SECONDS,
            BonusEntry::At(clock) => clock.seconds() as i64,
        }
    }

    pub fn time(self) -> Option<GameTime> {
        match self {
            BonusEntry::None => None,
            BonusEntry::At(clock) => Some(clock),
        }
    }
}

impl Serialize for BonusEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.seconds())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FoulBonusRecord {
    pub period: u8,
    pub side: TeamSide,
    pub fouls: u32,
    pub bonus_entry: BonusEntry,
}

/// Team fouls and bonus entry for every (period, side) pair, periods in
/// order, home before away.
pub fn track_foul_bonus(normalized: &NormalizedMatch, config: &EngineConfig) -> Vec<FoulBonusRecord> {
    let periods = normalized.clock.periods_played;
    let threshold = config.bonus_foul_threshold;

    let mut records = Vec::with_capacity(periods as usize * 2);
    for period in 1..=periods {
        for side in TeamSide::BOTH {
            // events are time-ordered, so clock order within the period holds
            let fouls: Vec<GameTime> = normalized
                .events
                .iter()
                .filter(|e| e.kind == EventKind::Foul && e.period == period && e.side == side)
                .map(|e| e.clock)
                .collect();
            let bonus_entry = match threshold.checked_sub(1).and_then(|i| fouls.get(i)) {
                Some(clock) => BonusEntry::At(*clock),
                None => BonusEntry::None,
            };
            records.push(FoulBonusRecord { period, side, fouls: fouls.len() as u32, bonus_entry });
        }
    }

    debug!(periods, records = records.len(), "tracked team foul bonus");
    records
}

/// One `EmptyBonus` diagnostic per record without a bonus entry.
pub fn empty_bonus_diagnostics(records: &[FoulBonusRecord]) -> Vec<Diagnostic> {
    records
        .iter()
        .filter(|r| r.bonus_entry == BonusEntry::None)
        .map(|r| Diagnostic::EmptyBonus { period: r.period, side: r.side, fouls: r.fouls })
        .collect()
}
