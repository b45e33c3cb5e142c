pub mod diagnostics;
pub mod events;
pub mod player;
pub mod source;
pub mod time;

pub use diagnostics::Diagnostic;
pub use events::{EventKind, FoulType, MatchEvent, PlayerId, ShotResult, TeamSide};
pub use player::Player;
pub use source::{MatchEventsDoc, MatchSummaryDoc, PeriodScoreDoc, RawEvent, RosterEntryDoc};
pub use time::GameTime;
