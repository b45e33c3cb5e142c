use fxhash::FxHashMap;
use serde_json::Value;
use tracing::debug;

use super::coerce::coerce_id;
use crate::error::{ErrorContext, MatchError, Result};
use crate::models::{Diagnostic, MatchEvent, Player, PlayerId, RosterEntryDoc, TeamSide};

/// Every rostered player of both teams, keyed by id.
///
/// Built once per match and shared by reference with all per-player
/// components.
#[derive(Debug, Clone, Default)]
pub struct RosterIndex {
    players: FxHashMap<PlayerId, Player>,
    home: Vec<PlayerId>,
    away: Vec<PlayerId>,
}

impl RosterIndex {
    /// Entries without a shirt number are coaching staff and are skipped.
    pub fn from_documents(home: &[RosterEntryDoc], away: &[RosterEntryDoc]) -> Result<Self> {
        let mut players = Vec::with_capacity(home.len() + away.len());
        for (side, entries) in [(TeamSide::Home, home), (TeamSide::Away, away)] {
            for (index, entry) in entries.iter().enumerate() {
                if let Some(player) = roster_player(side, index, entry)? {
                    players.push(player);
                }
            }
        }
        Self::from_players(players)
    }

    pub fn from_players(players: impl IntoIterator<Item = Player>) -> Result<Self> {
        let mut index = RosterIndex::default();
        for player in players {
            let id = player.id;
            match player.side {
                TeamSide::Home => index.home.push(id),
                TeamSide::Away => index.away.push(id),
            }
            if index.players.insert(id, player).is_some() {
                return Err(MatchError::parse(
                    ErrorContext::player(id),
                    "player id appears more than once in the rosters",
                ));
            }
        }
        debug!(home = index.home.len(), away = index.away.len(), "built roster index");
        Ok(index)
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.players.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Player ids of one side, in roster order.
    pub fn side_ids(&self, side: TeamSide) -> &[PlayerId] {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }

    /// All players, home roster first, each in roster order.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.home.iter().chain(self.away.iter()).filter_map(|id| self.players.get(id))
    }

    pub fn display_name(&self, id: PlayerId) -> String {
        self.get(id).map(Player::display_name).unwrap_or_else(|| format!("#{id}"))
    }

    /// One diagnostic per (event, id) pair naming a player missing from
    /// both rosters.
    pub fn unknown_references(&self, events: &[MatchEvent]) -> Vec<Diagnostic> {
        events
            .iter()
            .flat_map(|event| {
                event
                    .referenced_players()
                    .filter(|id| !self.contains(*id))
                    .map(|player_id| Diagnostic::UnknownPlayer {
                        event_index: event.sequence,
                        player_id,
                    })
            })
            .collect()
    }
}

fn roster_player(side: TeamSide, index: usize, entry: &RosterEntryDoc) -> Result<Option<Player>> {
    let shirt_no = match &entry.shirt_no {
        Value::Null => return Ok(None),
        Value::String(s) if s.trim().is_empty() => return Ok(None),
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    };

    let context = ErrorContext::default();
    let id = coerce_id(&entry.id, "Id", context.clone())?.ok_or_else(|| {
        MatchError::parse(context, format!("{side} roster entry #{index} has no player id"))
    })?;

    Ok(Some(Player::new(id, side, &entry.first_name, &entry.last_name).with_shirt(shirt_no)))
}
