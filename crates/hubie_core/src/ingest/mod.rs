//! # Ingest
//!
//! Leaf components feeding every analysis step:
//!
//! - `normalizer` - raw feed events to the canonical ordered `MatchEvent` stream
//! - `roster` - id → player index built from the roster payload

mod coerce;
pub mod normalizer;
pub mod roster;

pub use normalizer::{parse_period, EventNormalizer, MatchClock, NormalizedMatch};
pub use roster::RosterIndex;
