use serde::{Deserialize, Serialize};

use super::events::{PlayerId, TeamSide};

/// A rostered player. Starter status is derived later from the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub side: TeamSide,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shirt_no: Option<String>,
}

impl Player {
    pub fn new(
        id: PlayerId,
        side: TeamSide,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            side,
            first_name: first_name.into(),
            last_name: last_name.into(),
            shirt_no: None,
        }
    }

    pub fn with_shirt(mut self, shirt_no: impl Into<String>) -> Self {
        self.shirt_no = Some(shirt_no.into());
        self
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim()).trim().to_string()
    }
}
