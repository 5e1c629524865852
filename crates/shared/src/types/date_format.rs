//! Locale date display formats.
//!
//! Languages carry a strftime pattern (`%m/%d/%Y`, `%d.%m.%Y`, ...). Patterns
//! are validated once so that rendering a date can never fail.

use std::fmt::Write;

use chrono::NaiveDate;
use chrono::format::{Item, StrftimeItems};

/// ISO 8601 calendar date pattern, used as the fallback everywhere.
pub const ISO_DATE: &str = "%Y-%m-%d";

/// A validated strftime pattern for displaying calendar dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat(String);

impl DateFormat {
    /// Validates a strftime pattern.
    ///
    /// Returns `None` for empty patterns, unknown specifiers, or specifiers
    /// that need a time of day.
    #[must_use]
    pub fn parse(pattern: &str) -> Option<Self> {
        if pattern.trim().is_empty() {
            return None;
        }
        if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
            return None;
        }
        let probe = NaiveDate::from_ymd_opt(2000, 1, 31)?;
        let mut out = String::new();
        write!(out, "{}", probe.format(pattern)).ok()?;
        Some(Self(pattern.to_string()))
    }

    /// Validates a pattern, falling back to ISO dates when it is unusable.
    #[must_use]
    pub fn parse_or_iso(pattern: &str) -> Self {
        Self::parse(pattern).unwrap_or_default()
    }

    /// Returns the ISO `%Y-%m-%d` format.
    #[must_use]
    pub fn iso() -> Self {
        Self(ISO_DATE.to_string())
    }

    /// Returns the underlying pattern.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.0
    }

    /// Renders a date.
    #[must_use]
    pub fn format(&self, date: NaiveDate) -> String {
        let mut out = String::new();
        if write!(out, "{}", date.format(&self.0)).is_err() {
            return date.format(ISO_DATE).to_string();
        }
        out
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        Self::iso()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()
    }

    #[rstest]
    #[case("%Y-%m-%d", "2024-03-07")]
    #[case("%m/%d/%Y", "03/07/2024")]
    #[case("%d.%m.%Y", "07.03.2024")]
    #[case("%d %b %Y", "07 Mar 2024")]
    fn test_formats_dates(#[case] pattern: &str, #[case] expected: &str) {
        let format = DateFormat::parse(pattern).unwrap();
        assert_eq!(format.format(date()), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("%Q")]
    #[case("%H:%M")]
    fn test_rejects_unusable_patterns(#[case] pattern: &str) {
        assert!(DateFormat::parse(pattern).is_none());
        assert_eq!(DateFormat::parse_or_iso(pattern), DateFormat::iso());
    }

    #[test]
    fn test_default_is_iso() {
        assert_eq!(DateFormat::default().pattern(), ISO_DATE);
        assert_eq!(DateFormat::default().format(date()), "2024-03-07");
    }
}
