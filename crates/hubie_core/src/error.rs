use std::fmt;

use thiserror::Error;

use crate::models::PlayerId;

/// Where in a match a fatal error was detected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    pub match_id: Option<u64>,
    pub player_id: Option<PlayerId>,
    pub event_index: Option<usize>,
}

impl ErrorContext {
    pub fn event(index: usize) -> Self {
        Self { event_index: Some(index), ..Default::default() }
    }

    pub fn player(player_id: PlayerId) -> Self {
        Self { player_id: Some(player_id), ..Default::default() }
    }

    pub fn with_event(mut self, index: usize) -> Self {
        self.event_index = Some(index);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut parts = Vec::with_capacity(3);
        if let Some(id) = self.match_id {
            parts.push(format!("match {id}"));
        }
        if let Some(id) = self.player_id {
            parts.push(format!("player {id}"));
        }
        if let Some(idx) = self.event_index {
            parts.push(format!("event #{idx}"));
        }
        if parts.is_empty() {
            write!(f, "match input")
        } else {
            write!(f, "{}", parts.join(", "))
        }
    }
}

/// Fatal errors that abort processing of a single match.
#[derive(Error, Debug)]
pub enum MatchError {
    /// A required field is missing or has an unexpected type.
    #[error("Parse error ({context}): {message}")]
    Parse { context: ErrorContext, message: String },

    /// A player's substitution tags do not alternate in/out.
    #[error("Timeline consistency error ({context}): {message}")]
    Timeline { context: ErrorContext, message: String },

    #[error("Invalid JSON document: {0}")]
    Json(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl MatchError {
    pub fn parse(context: ErrorContext, message: impl Into<String>) -> Self {
        MatchError::Parse { context, message: message.into() }
    }

    pub fn timeline(context: ErrorContext, message: impl Into<String>) -> Self {
        MatchError::Timeline { context, message: message.into() }
    }

    /// Attach the match id once the error reaches the pipeline boundary.
    pub fn in_match(self, match_id: u64) -> Self {
        match self {
            MatchError::Parse { mut context, message } => {
                context.match_id = Some(match_id);
                MatchError::Parse { context, message }
            }
            MatchError::Timeline { mut context, message } => {
                context.match_id = Some(match_id);
                MatchError::Timeline { context, message }
            }
            other => other,
        }
    }

    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            MatchError::Parse { context, .. } | MatchError::Timeline { context, .. } => {
                Some(context)
            }
            _ => None,
        }
    }
}

impl From<serde_json::Error> for MatchError {
    fn from(err: serde_json::Error) -> Self {
        MatchError::Json(err.to_string())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Format(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Format(err.to_string())
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::Format(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MatchError>;
