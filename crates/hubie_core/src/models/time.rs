use serde::{Deserialize, Serialize};
use std::fmt;

/// A point on (or span of) the match clock, at second precision.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct GameTime(u32);

impl GameTime {
    pub const ZERO: GameTime = GameTime(0);

    pub const fn from_seconds(seconds: u32) -> Self {
        GameTime(seconds)
    }

    pub const fn from_minutes(minutes: u32) -> Self {
        GameTime(minutes * 60)
    }

    pub const fn from_clock(minutes: u32, seconds: u32) -> Self {
        GameTime(minutes * 60 + seconds)
    }

    pub const fn seconds(self) -> u32 {
        self.0
    }

    /// Whole-minute bucket, rounded up (0:01..=1:00 -> 1).
    pub const fn minute_ceil(self) -> u32 {
        self.0.div_ceil(60)
    }

    pub const fn saturating_sub(self, other: GameTime) -> GameTime {
        GameTime(self.0.saturating_sub(other.0))
    }

    /// Parse an `mm:ss` clock reading.
    ///
    /// Both fields are plain ASCII digits. Seconds must be below 60; `"7:75"`
    /// is rejected instead of being wrapped into the next minute, and a
    /// minute count too large for the clock is rejected as well.
    pub fn parse_clock(text: &str) -> Option<GameTime> {
        let (minutes, seconds) = text.trim().split_once(':')?;
        let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        if !digits(minutes) || !digits(seconds) || seconds.len() != 2 {
            return None;
        }
        let minutes: u32 = minutes.parse().ok()?;
        let seconds: u32 = seconds.parse().ok()?;
        if seconds >= 60 {
            return None;
        }
        minutes.checked_mul(60)?.checked_add(seconds).map(GameTime)
    }
}

impl std::ops::Add for GameTime {
    type Output = GameTime;

    fn add(self, rhs: GameTime) -> GameTime {
        GameTime(self.0 + rhs.0)
    }
}

impl std::iter::Sum for GameTime {
    fn sum<I: Iterator<Item = GameTime>>(iter: I) -> GameTime {
        iter.fold(GameTime::ZERO, |acc, t| acc + t)
    }
}

impl fmt::Display for GameTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_clock() {
        assert_eq!(GameTime::parse_clock("07:15"), Some(GameTime::from_seconds(435)));
        assert_eq!(GameTime::parse_clock("0:00"), Some(GameTime::ZERO));
        assert_eq!(GameTime::parse_clock(" 10:00 "), Some(GameTime::from_minutes(10)));
    }

    #[test]
    fn test_parse_clock_rejects_overflowing_seconds() {
        assert_eq!(GameTime::parse_clock("07:60"), None);
        assert_eq!(GameTime::parse_clock("07:75"), None);
        assert_eq!(GameTime::parse_clock("7:5"), None);
        assert_eq!(GameTime::parse_clock("715"), None);
        assert_eq!(GameTime::parse_clock(":15"), None);
        assert_eq!(GameTime::parse_clock("ab:cd"), None);
        assert_eq!(GameTime::parse_clock(""), None);
    }

    #[test]
    fn test_parse_clock_rejects_signs_and_huge_minutes() {
        assert_eq!(GameTime::parse_clock("7:+5"), None);
        assert_eq!(GameTime::parse_clock("+7:05"), None);
        assert_eq!(GameTime::parse_clock("-7:05"), None);
        assert_eq!(GameTime::parse_clock("7 :05"), None);
        assert_eq!(GameTime::parse_clock("71582789:00"), None);
        assert_eq!(GameTime::parse_clock("99999999999:00"), None);
        assert_eq!(GameTime::parse_clock("71582788:15"), Some(GameTime::from_seconds(4_294_967_295)));
    }

    #[test]
    fn test_minute_ceil() {
        assert_eq!(GameTime::ZERO.minute_ceil(), 0);
        assert_eq!(GameTime::from_seconds(1).minute_ceil(), 1);
        assert_eq!(GameTime::from_seconds(60).minute_ceil(), 1);
        assert_eq!(GameTime::from_seconds(61).minute_ceil(), 2);
        assert_eq!(GameTime::from_clock(11, 30).minute_ceil(), 12);
    }

    #[test]
    fn test_display_and_sum() {
        assert_eq!(GameTime::from_clock(7, 5).to_string(), "07:05");
        let total: GameTime =
            [GameTime::from_minutes(3), GameTime::from_seconds(30)].into_iter().sum();
        assert_eq!(total, GameTime::from_seconds(210));
    }
}
