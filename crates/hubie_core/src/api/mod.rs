pub mod json_api;
pub mod pipeline;
pub mod records;


pub use json_api::{
    match_input_from_json, process_match_json, process_request_json, ProcessRequest,
    ProcessResponse,
};
pub use pipeline::{parse_match_date, process_match, process_matches, MatchInput, MatchReport};
pub use records::{
    AssistRecord, CumulativeScoreRecord, MatchHeaderRecord, MatchRecords, PlayerStatRecord,
    ScoringRecord, TeamFoulRecord,
};
