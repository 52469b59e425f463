//! Domain Value Objects
//!
//! Immutable value types for the interview domain.

use std::fmt;

pub use kernel::id::{InterviewId, QuestionId, UserId};

/// Time allotted to an interview session, in whole seconds
///
/// Rendered as an ISO-8601 duration (`PT30M`, `PT1H30M`, `PT0S`), which is
/// the text form clients have always received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterviewDuration(i64);

impl InterviewDuration {
    pub const ZERO: InterviewDuration = InterviewDuration(0);

    /// Negative durations are rejected
    pub fn from_secs(secs: i64) -> Option<Self> {
        (secs >= 0).then_some(Self(secs))
    }

    pub fn from_minutes(minutes: i64) -> Option<Self> {
        minutes.checked_mul(60).and_then(Self::from_secs)
    }

    pub fn as_secs(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for InterviewDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return f.write_str("PT0S");
        }

        let hours = self.0 / 3600;
        let minutes = (self.0 % 3600) / 60;
        let seconds = self.0 % 60;

        f.write_str("PT")?;
        if hours > 0 {
            write!(f, "{}H", hours)?;
        }
        if minutes > 0 {
            write!(f, "{}M", minutes)?;
        }
        if seconds > 0 {
            write!(f, "{}S", seconds)?;
        }
        Ok(())
    }
}

/// Minimum length for user name (in characters)
pub const USER_NAME_MIN_LENGTH: usize = 3;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 30;

const USER_NAME_SPECIAL_CHARS: &[char] = &['_', '.', '-', '+', '@'];

/// Login handle, stored in canonical (trimmed, lowercase) form
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserName(String);

impl UserName {
    pub fn new(raw: &str) -> Result<Self, String> {
        let canonical = raw.trim().to_ascii_lowercase();
        let len = canonical.chars().count();

        if !(USER_NAME_MIN_LENGTH..=USER_NAME_MAX_LENGTH).contains(&len) {
            return Err(format!(
                "User name must be {} to {} characters",
                USER_NAME_MIN_LENGTH, USER_NAME_MAX_LENGTH
            ));
        }
        if !canonical
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || USER_NAME_SPECIAL_CHARS.contains(&c))
        {
            return Err("User name may only contain a-z, 0-9 and _ . - + @".to_string());
        }
        if !canonical.chars().any(|c| c.is_ascii_alphanumeric()) {
            return Err("User name must contain a letter or digit".to_string());
        }

        Ok(Self(canonical))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Running correct/wrong count for one submission
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreTally {
    pub correct: i64,
    pub wrong: i64,
}

impl ScoreTally {
    pub fn record(&mut self, is_correct: bool) {
        if is_correct {
            self.correct += 1;
        } else {
            self.wrong += 1;
        }
    }

    pub fn graded(&self) -> i64 {
        self.correct + self.wrong
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_name_is_canonicalized() {
        let name = UserName::new("  Gami@Example.com ").unwrap();
        assert_eq!(name.as_str(), "gami@example.com");
        assert_eq!(name, UserName::new("GAMI@example.COM").unwrap());
    }

    #[test]
    fn test_user_name_rules() {
        assert!(UserName::new("ab").is_err());
        assert!(UserName::new(&"a".repeat(31)).is_err());
        assert!(UserName::new("has space").is_err());
        assert!(UserName::new("___").is_err());
        assert!(UserName::new("ok_name-1").is_ok());
    }

    #[test]
    fn test_duration_iso_rendering() {
        let cases = [
            (0, "PT0S"),
            (45, "PT45S"),
            (1800, "PT30M"),
            (3600, "PT1H"),
            (5400, "PT1H30M"),
            (3661, "PT1H1M1S"),
            (90_000, "PT25H"),
        ];
        for (secs, expected) in cases {
            let duration = InterviewDuration::from_secs(secs).unwrap();
            assert_eq!(duration.to_string(), expected, "secs = {}", secs);
        }
    }

    #[test]
    fn test_duration_rejects_negative() {
        assert!(InterviewDuration::from_secs(-1).is_none());
        assert_eq!(InterviewDuration::from_minutes(20).unwrap().as_secs(), 1200);
        assert!(InterviewDuration::from_minutes(i64::MAX).is_none());
    }

    #[test]
    fn test_tally_counts_every_verdict() {
        let mut tally = ScoreTally::default();
        tally.record(true);
        tally.record(false);
        tally.record(true);
        assert_eq!(tally, ScoreTally { correct: 2, wrong: 1 });
        assert_eq!(tally.graded(), 3);
    }
}
