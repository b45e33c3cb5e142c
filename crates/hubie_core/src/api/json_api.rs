use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::pipeline::{process_match, MatchInput};
use super::records::MatchRecords;
use crate::config::EngineConfig;
use crate::error::{MatchError, Result};
use crate::models::{Diagnostic, MatchEventsDoc, MatchSummaryDoc};

/// Request body carrying both documents inline.
#[derive(Debug, Deserialize)]
pub struct ProcessRequest {
    pub match_id: u64,
    pub summary: MatchSummaryDoc,
    pub events: MatchEventsDoc,
    #[serde(default)]
    pub config: Option<EngineConfig>,
}

#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub records: MatchRecords,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse the two source documents of one match.
pub fn match_input_from_json(match_id: u64, summary_json: &str, events_json: &str) -> Result<MatchInput> {
    let summary: MatchSummaryDoc = serde_json::from_str(summary_json)
        .map_err(|e| MatchError::Json(format!("summary document: {e}")))?;
    let events: MatchEventsDoc = serde_json::from_str(events_json)
        .map_err(|e| MatchError::Json(format!("events document: {e}")))?;
    Ok(MatchInput { match_id, summary, events })
}

/// Process one match from its raw documents and return the record sets as
/// JSON.
pub fn process_match_json(
    match_id: u64,
    summary_json: &str,
    events_json: &str,
    config: &EngineConfig,
) -> Result<String> {
    let input = match_input_from_json(match_id, summary_json, events_json)?;
    let report = process_match(&input, config)?;
    let response = ProcessResponse {
        records: MatchRecords::from_report(&report, Utc::now()),
        diagnostics: report.diagnostics,
    };
    Ok(serde_json::to_string(&response)?)
}

/// Single-string entry point: a [`ProcessRequest`] in, a
/// [`ProcessResponse`] out. Errors are flattened to their message.
pub fn process_request_json(request_json: &str) -> std::result::Result<String, String> {
    let request: ProcessRequest =
        serde_json::from_str(request_json).map_err(|e| format!("Invalid JSON request: {e}"))?;
    let config = request.config.unwrap_or_default();
    let input =
        MatchInput { match_id: request.match_id, summary: request.summary, events: request.events };

    let report = process_match(&input, &config).map_err(|e| e.to_string())?;
    let response = ProcessResponse {
        records: MatchRecords::from_report(&report, Utc::now()),
        diagnostics: report.diagnostics,
    };
    serde_json::to_string(&response).map_err(|e| format!("Failed to serialize response: {e}"))
}
