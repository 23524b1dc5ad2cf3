use chrono::NaiveDate;
use itertools::Itertools;
use tracing::{debug, warn};

use crate::model::NOT_AVAILABLE;

const EARNED_PREFIX: &str = "Earned";
const TIMEZONES: [&str; 8] = ["EDT", "EST", "PDT", "PST", "CDT", "CST", "MDT", "MST"];

/// A textual date layout understood by [`DateNormalizer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFormat {
    pub name: &'static str,
    pub pattern: &'static str,
}

/// `Oct 4, 2025`
pub const SHORT_MONTH: DateFormat = DateFormat {
    name: "short month",
    pattern: "%b %d, %Y",
};

/// `October 4, 2025`
pub const LONG_MONTH: DateFormat = DateFormat {
    name: "long month",
    pattern: "%B %d, %Y",
};

/// Turns earned-date text from profile pages into comparable dates.
///
/// Formats are tried in order and the first match wins. New layouts are
/// appended with [`DateNormalizer::with_format`].
#[derive(Debug, Clone)]
pub struct DateNormalizer {
    formats: Vec<DateFormat>,
}

impl Default for DateNormalizer {
    fn default() -> Self {
        Self {
            formats: vec![SHORT_MONTH, LONG_MONTH],
        }
    }
}

impl DateNormalizer {
    pub fn with_format(mut self, format: DateFormat) -> Self {
        self.formats.push(format);
        self
    }

    pub fn formats(&self) -> &[DateFormat] {
        &self.formats
    }

    /// Names of the configured formats, in the order they are tried.
    pub fn format_names(&self) -> String {
        self.formats.iter().map(|f| f.name).join(", ")
    }

    /// Parse `text`, returning `None` for empty, `N/A` or unrecognized input.
    /// Failures are logged and never surface as errors.
    pub fn normalize(&self, text: &str) -> Option<NaiveDate> {
        let cleaned = clean(text);
        if cleaned.is_empty() || cleaned == NOT_AVAILABLE {
            debug!(text, "no earned date");
            return None;
        }

        let parsed = self
            .formats
            .iter()
            .find_map(|f| NaiveDate::parse_from_str(&cleaned, f.pattern).ok());
        if parsed.is_none() {
            warn!(text, tried = %self.format_names(), "could not parse earned date");
        }
        parsed
    }

    /// Render `date` in the first configured format.
    pub fn canonical(&self, date: NaiveDate) -> String {
        let pattern = self.formats.first().unwrap_or(&SHORT_MONTH).pattern;
        date.format(pattern).to_string()
    }
}

/// Parse with the default format list.
pub fn normalize(text: &str) -> Option<NaiveDate> {
    DateNormalizer::default().normalize(text)
}

/// Drop a leading `Earned` and a trailing timezone, and collapse whitespace.
fn clean(text: &str) -> String {
    let mut tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.first() == Some(&EARNED_PREFIX) {
        tokens.remove(0);
    }
    if tokens.last().is_some_and(|t| TIMEZONES.contains(t)) {
        tokens.pop();
    }
    tokens.join(" ")
}
