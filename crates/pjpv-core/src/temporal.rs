//! # Publication Timestamps
//!
//! `dateISO` is stored in the index exactly as accepted, so a re-publish
//! with the same value produces an identical entry. [`PublishedAt`] keeps
//! that string alongside the parsed UTC instant used for rendering.
//!
//! Accepted forms: RFC 3339 datetimes (`2026-05-05T18:30:00Z`,
//! `2026-05-05T18:30:00.000+02:00`) and bare dates (`2026-05-05`, read as
//! midnight UTC).

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

use crate::error::ValidationError;

/// Validated publication timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedAt {
    raw: String,
    instant: DateTime<Utc>,
}

impl PublishedAt {
    /// The current UTC time, formatted with millisecond precision and a `Z`
    /// suffix (`2026-10-19T08:15:02.431Z`).
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Wrap an existing instant using the canonical millisecond format.
    pub fn from_datetime(instant: DateTime<Utc>) -> Self {
        Self {
            raw: instant.to_rfc3339_opts(SecondsFormat::Millis, true),
            instant,
        }
    }

    /// Parse a caller-supplied `dateISO`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDate`] for anything that is neither
    /// an RFC 3339 datetime nor a `YYYY-MM-DD` date.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(Self {
                raw: trimmed.to_string(),
                instant: dt.with_timezone(&Utc),
            });
        }
        let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidDate(raw.to_string()))?;
        let midnight = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| ValidationError::InvalidDate(raw.to_string()))?;
        Ok(Self {
            raw: trimmed.to_string(),
            instant: midnight.and_utc(),
        })
    }

    /// The string written to the index.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The parsed instant.
    pub fn instant(&self) -> &DateTime<Utc> {
        &self.instant
    }
}

impl std::fmt::Display for PublishedAt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone, Timelike};

    #[test]
    fn now_uses_millisecond_z_format() {
        let at = PublishedAt::from_datetime(Utc.with_ymd_and_hms(2026, 5, 5, 18, 30, 0).unwrap());
        assert_eq!(at.as_str(), "2026-05-05T18:30:00.000Z");
    }

    #[test]
    fn parse_keeps_caller_string() {
        let at = PublishedAt::parse("2026-05-05T20:30:00+02:00").unwrap();
        assert_eq!(at.as_str(), "2026-05-05T20:30:00+02:00");
        assert_eq!(at.instant().hour(), 18);
    }

    #[test]
    fn parse_accepts_bare_date() {
        let at = PublishedAt::parse("2026-05-05").unwrap();
        assert_eq!(at.instant().day(), 5);
        assert_eq!(at.instant().hour(), 0);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(
            PublishedAt::parse("le 5 mai"),
            Err(ValidationError::InvalidDate("le 5 mai".to_string()))
        );
    }
}
