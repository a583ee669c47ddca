use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Minutes in one hour.
pub const MINUTES_PER_HOUR: u32 = 60;

/// Error returned when a clock time cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time of day '{input}': expected HH:MM")]
pub struct TimeParseError {
    pub input: String,
}

impl TimeParseError {
    fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }
}

/// Wall-clock time of day with minute resolution, stored as minutes since midnight.
///
/// Serialized as an `"HH:MM"` string. Deserialization goes through the strict
/// [`FromStr`] implementation, so a malformed value is rejected where the record
/// is entered rather than defaulted later.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Default collection time for a volume row without one.
    pub const DEFAULT_COLLECTION: TimeOfDay = TimeOfDay(9 * 60);
    /// Default depot sortation start.
    pub const DEFAULT_SORTATION_START: TimeOfDay = TimeOfDay(8 * 60);
    /// Default depot cutoff.
    pub const DEFAULT_CUTOFF: TimeOfDay = TimeOfDay(18 * 60);

    /// Build a time from hours and minutes. Returns `None` when out of range.
    pub fn from_hm(hours: u32, minutes: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hours, minutes, 0).map(Self::from_naive)
    }

    fn from_naive(time: NaiveTime) -> Self {
        TimeOfDay((time.hour() * MINUTES_PER_HOUR + time.minute()) as u16)
    }

    pub fn minutes(&self) -> u32 {
        self.0 as u32
    }

    /// Lenient parse used by batch imports: accepts `HH:MM`, `HH:MM:SS`
    /// (seconds dropped) and the compact `HHMM` form.
    pub fn parse_lenient(input: &str) -> Result<Self, TimeParseError> {
        let trimmed = input.trim();
        if trimmed.len() == 4 && trimmed.chars().all(|c| c.is_ascii_digit()) {
            return format!("{}:{}", &trimmed[..2], &trimmed[2..]).parse();
        }
        if trimmed.contains(':') && trimmed.len() > 5 && trimmed.is_char_boundary(5) {
            return trimmed[..5].parse();
        }
        trimmed.parse()
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        // chrono accepts single-digit fields; insist on the fixed-width form.
        if trimmed.len() != 5 {
            return Err(TimeParseError::new(s));
        }
        NaiveTime::parse_from_str(trimmed, "%H:%M")
            .map(Self::from_naive)
            .map_err(|_| TimeParseError::new(s))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}",
            self.minutes() / MINUTES_PER_HOUR,
            self.minutes() % MINUTES_PER_HOUR
        )
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Estimated arrival as fractional minutes since midnight of the collection day.
///
/// Unlike [`TimeOfDay`] this may run past midnight; the `HH:MM` rendering then
/// shows hours of 24 or more.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClockMinutes(pub f64);

impl ClockMinutes {
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Render as `HH:MM`, truncating fractional minutes.
    pub fn format_hhmm(&self) -> String {
        let total = self.0.max(0.0).floor() as u64;
        format!("{:02}:{:02}", total / 60, total % 60)
    }
}

impl From<TimeOfDay> for ClockMinutes {
    fn from(t: TimeOfDay) -> Self {
        ClockMinutes(t.minutes() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let t: TimeOfDay = "09:30".parse().unwrap();
        assert_eq!(t.minutes(), 570);
        assert_eq!(t.to_string(), "09:30");
    }

    #[test]
    fn test_rejects_malformed() {
        for bad in ["9:30", "24:00", "12:60", "ab:cd", "", "0930", "12:30:00"] {
            assert!(bad.parse::<TimeOfDay>().is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_parse_lenient_forms() {
        assert_eq!(TimeOfDay::parse_lenient("0900").unwrap().to_string(), "09:00");
        assert_eq!(TimeOfDay::parse_lenient("14:15:59").unwrap().to_string(), "14:15");
        assert_eq!(TimeOfDay::parse_lenient(" 07:05 ").unwrap().to_string(), "07:05");
        assert!(TimeOfDay::parse_lenient("2500").is_err());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(TimeOfDay::DEFAULT_COLLECTION.to_string(), "09:00");
        assert_eq!(TimeOfDay::DEFAULT_SORTATION_START.to_string(), "08:00");
        assert_eq!(TimeOfDay::DEFAULT_CUTOFF.to_string(), "18:00");
    }

    #[test]
    fn test_serde_roundtrip_and_rejection() {
        let json = serde_json::to_string(&TimeOfDay::from_hm(6, 5).unwrap()).unwrap();
        assert_eq!(json, "\"06:05\"");
        assert!(serde_json::from_str::<TimeOfDay>("\"6:5\"").is_err());
    }

    #[test]
    fn test_clock_minutes_format() {
        assert_eq!(ClockMinutes(615.0).format_hhmm(), "10:15");
        assert_eq!(ClockMinutes(629.99).format_hhmm(), "10:29");
        assert_eq!(ClockMinutes(1510.0).format_hhmm(), "25:10");
    }
}
