//! # Engine Configuration
//!
//! Competition rules the timeline engine depends on: period lengths,
//! how overtime extends the match, the team-foul bonus threshold and the
//! expected number of players on court.
//!
//! ```rust
//! use hubie_core::config::EngineConfig;
//!
//! let fiba = EngineConfig::default();
//! assert_eq!(fiba.regulation_minutes(), 40);
//! ```

mod env;

pub use env::{load_from_env, load_from_path, CONFIG_PATH_ENV};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::models::GameTime;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Length of a regulation period in minutes (default: 10)
    pub period_minutes: u32,
    /// Number of regulation periods (default: 4)
    pub regulation_periods: u8,
    /// Length of each overtime period in minutes (default: 5)
    pub overtime_minutes: u32,
    /// Team fouls in a period that put the team in the bonus (default: 4)
    pub bonus_foul_threshold: usize,
    /// Players on court per team (default: 5)
    pub lineup_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            period_minutes: 10,
            regulation_periods: 4,
            overtime_minutes: 5,
            bonus_foul_threshold: 4,
            lineup_size: 5,
        }
    }
}

impl EngineConfig {
    /// FIBA rules (4 x 10 min, 5 min overtime)
    pub fn fiba() -> Self {
        Self::default()
    }

    /// NBA rules (4 x 12 min, 5 min overtime, bonus on the 5th foul)
    pub fn nba() -> Self {
        Self { period_minutes: 12, bonus_foul_threshold: 5, ..Self::default() }
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.period_minutes == 0 {
            return Err(ConfigError::Invalid("period_minutes must be > 0".into()));
        }
        if self.overtime_minutes == 0 {
            return Err(ConfigError::Invalid("overtime_minutes must be > 0".into()));
        }
        if self.regulation_periods == 0 {
            return Err(ConfigError::Invalid("regulation_periods must be > 0".into()));
        }
        if self.bonus_foul_threshold == 0 {
            return Err(ConfigError::Invalid("bonus_foul_threshold must be > 0".into()));
        }
        if self.lineup_size == 0 {
            return Err(ConfigError::Invalid("lineup_size must be > 0".into()));
        }
        Ok(())
    }

    pub fn regulation_minutes(&self) -> u32 {
        self.period_minutes * self.regulation_periods as u32
    }

    pub fn is_overtime(&self, period: u8) -> bool {
        period > self.regulation_periods
    }

    /// Length of `period` (1-based) in minutes.
    pub fn period_length_minutes(&self, period: u8) -> u32 {
        if self.is_overtime(period) {
            self.overtime_minutes
        } else {
            self.period_minutes
        }
    }

    /// Minute at which `period` (1-based) starts.
    ///
    /// Regulation periods sit on fixed boundaries; overtime periods follow
    /// regulation in consecutive `overtime_minutes` blocks.
    pub fn period_start_minute(&self, period: u8) -> u32 {
        let period = period.max(1);
        if self.is_overtime(period) {
            let extra = (period - self.regulation_periods - 1) as u32;
            self.regulation_minutes() + extra * self.overtime_minutes
        } else {
            (period - 1) as u32 * self.period_minutes
        }
    }

    pub fn period_end_minute(&self, period: u8) -> u32 {
        self.period_start_minute(period) + self.period_length_minutes(period)
    }

    pub fn period_offset(&self, period: u8) -> GameTime {
        GameTime::from_minutes(self.period_start_minute(period))
    }

    pub fn period_length(&self, period: u8) -> GameTime {
        GameTime::from_minutes(self.period_length_minutes(period))
    }

    /// Human readable period name ("2. quarter", "1. overtime").
    pub fn period_label(&self, period: u8) -> String {
        if self.is_overtime(period) {
            format!("{}. overtime", period - self.regulation_periods)
        } else {
            format!("{period}. quarter")
        }
    }
}
