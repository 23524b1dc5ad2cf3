use serde::Serialize;

use super::badge::BadgeRecord;

pub const USER_NAME_COLUMN: &str = "User Name";
pub const SKILL_COUNT_COLUMN: &str = "# of Skill Badges (Completed)";
pub const SKILL_NAMES_COLUMN: &str = "Names of Skill Badges";
pub const ARCADE_COUNT_COLUMN: &str = "# of Arcade Games";
pub const ARCADE_NAMES_COLUMN: &str = "Names of Completed Arcade Games";
pub const COMPLETION_TIME_COLUMN: &str = "Completion Time";

/// Columns computed per profile, appended after the identity columns.
pub const COMPUTED_COLUMNS: [&str; 5] = [
    SKILL_COUNT_COLUMN,
    SKILL_NAMES_COLUMN,
    ARCADE_COUNT_COLUMN,
    ARCADE_NAMES_COLUMN,
    COMPLETION_TIME_COLUMN,
];

/// One row of the input file, keeping its column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputRow {
    pub fields: Vec<(String, String)>,
}

impl InputRow {
    pub fn new(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }
}

/// Per-profile aggregate written to the summary CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSummary {
    pub input: InputRow,
    pub user_name: String,
    pub skill_badge_count: usize,
    pub skill_badge_names: String,
    pub arcade_game_count: usize,
    pub arcade_game_names: String,
    pub completion_time: Option<String>,
}

impl ProfileSummary {
    /// Value of `column` for the summary CSV. Computed fields win over
    /// input fields of the same name; unknown columns are empty.
    pub fn field(&self, column: &str) -> String {
        match column {
            USER_NAME_COLUMN => self.user_name.clone(),
            SKILL_COUNT_COLUMN => self.skill_badge_count.to_string(),
            SKILL_NAMES_COLUMN => self.skill_badge_names.clone(),
            ARCADE_COUNT_COLUMN => self.arcade_game_count.to_string(),
            ARCADE_NAMES_COLUMN => self.arcade_game_names.clone(),
            COMPLETION_TIME_COLUMN => self.completion_time.clone().unwrap_or_default(),
            _ => self.input.get(column).unwrap_or_default().to_string(),
        }
    }
}

/// One line of the detailed badge CSV. The serde names are the CSV header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailRow {
    #[serde(rename = "Profile URL")]
    pub profile_url: String,
    #[serde(rename = "Badge Title")]
    pub badge_title: String,
    #[serde(rename = "Date Earned")]
    pub date_earned: String,
    #[serde(rename = "Points")]
    pub points: u32,
}

impl DetailRow {
    pub fn from_record(profile_url: &str, record: &BadgeRecord) -> Self {
        Self {
            profile_url: profile_url.to_string(),
            badge_title: record.name.clone(),
            date_earned: record.date_text.clone(),
            points: record.points,
        }
    }
}

/// Outcome of processing a single profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileResult {
    Success(ProfileSummary, Vec<BadgeRecord>),
    Failure(InputRow),
}

impl ProfileResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ProfileResult::Success(..))
    }
}
