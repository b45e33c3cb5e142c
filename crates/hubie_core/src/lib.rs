//! # hubie_core - Basketball Play-by-Play Analysis Engine
//!
//! Turns the raw play-by-play log of one basketball match into a consistent
//! match timeline and the statistics derived from it.
//!
//! ## Features
//! - Per-player on-court intervals reconstructed from substitutions
//! - Five-player lineups at every event
//! - Minute-by-minute cumulative score across regulation and overtime
//! - Team foul bonus per period
//! - Box-score lines with efficiency
//! - Flat record sets for persistence, JSON entry points
//!
//! ## Pipeline
//! ```text
//! RawEvent[] --EventNormalizer--> NormalizedMatch --+--> IntervalTable --> LineupTable
//! Roster docs --RosterIndex-------------------------+        |
//!                                                   |        +--> PlayerStatTable
//!                                                   +--> ScoreTimeline
//!                                                   +--> FoulBonusRecord[]
//! ```

pub mod analysis;
pub mod api;
pub mod config;
pub mod error;
pub mod ingest;
pub mod models;

pub use api::{
    process_match, process_match_json, process_matches, process_request_json, MatchInput,
    MatchRecords, MatchReport,
};
pub use config::EngineConfig;
pub use error::{ConfigError, MatchError, Result};
