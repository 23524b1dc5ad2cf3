use std::collections::HashMap;

use chrono::NaiveDate;

/// Placeholder used when a badge has no name or no scraped earned date.
pub const NOT_AVAILABLE: &str = "N/A";

/// Badge title → raw earned-date text, as scraped from a public profile page.
pub type DateMapping = HashMap<String, String>;

/// Which part of the profile a badge counts towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum BadgeCategory {
    Skill,
    Arcade,
}

/// A single badge of a profile, joined with its scraped earned date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeRecord {
    pub name: String,
    pub category: BadgeCategory,
    pub points: u32,
    /// Earned date as shown on the profile page, or `N/A`.
    pub date_text: String,
    /// Parsed earned date; `None` keeps the badge out of milestone ranking.
    pub date: Option<NaiveDate>,
}

impl BadgeRecord {
    pub fn is_dated(&self) -> bool {
        self.date.is_some()
    }
}
