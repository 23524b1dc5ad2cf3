use itertools::Itertools;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::collector;
use crate::completion;
use crate::config::Config;
use crate::dates::DateNormalizer;
use crate::error::{Result, TrackerError};
use crate::model::{
    ApiData, ApiResponse, BadgeCategory, BadgeRecord, DateMapping, DetailRow, InputRow,
    ProfileResult, ProfileSummary, USER_NAME_COLUMN,
};

/// Builds per-profile results from an analytics response and scraped dates.
#[derive(Debug, Clone)]
pub struct Aggregator {
    url_column: String,
    milestone: usize,
    normalizer: DateNormalizer,
}

impl Aggregator {
    pub fn new(config: &Config) -> Self {
        Self {
            url_column: config.url_column.clone(),
            milestone: config.completion_milestone,
            normalizer: DateNormalizer::default(),
        }
    }

    pub fn with_normalizer(mut self, normalizer: DateNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Classify one profile. Only a missing `data` object or a wrongly
    /// shaped branch yields [`ProfileResult::Failure`]; absent branches
    /// read as empty and bad dates only clear the date.
    pub fn aggregate(&self, row: &InputRow, response: &Value, dates: &DateMapping) -> ProfileResult {
        let profile_url = self.profile_url(row);
        match extract_data(response) {
            Ok(data) => {
                let (summary, records) = self.summarize(row, &data, dates);
                debug!(
                    url = profile_url,
                    skill = summary.skill_badge_count,
                    arcade = summary.arcade_game_count,
                    completion = summary.completion_time.as_deref().unwrap_or_default(),
                    "aggregated profile"
                );
                ProfileResult::Success(summary, records)
            }
            Err(e) => {
                warn!(url = profile_url, error = %e, "could not process analytics data");
                ProfileResult::Failure(row.clone())
            }
        }
    }

    /// Detail lines for a set of records of the profile in `row`.
    pub fn detail_rows(&self, row: &InputRow, records: &[BadgeRecord]) -> Vec<DetailRow> {
        let profile_url = self.profile_url(row);
        records
            .iter()
            .map(|r| DetailRow::from_record(profile_url, r))
            .collect()
    }

    fn profile_url<'a>(&self, row: &'a InputRow) -> &'a str {
        row.get(&self.url_column).unwrap_or_default().trim()
    }

    fn summarize(
        &self,
        row: &InputRow,
        data: &ApiData,
        dates: &DateMapping,
    ) -> (ProfileSummary, Vec<BadgeRecord>) {
        let overview = data.badges_overview.clone().unwrap_or_default();
        let records = collector::collect(&overview.groups(), dates, &self.normalizer);

        let api_name = data
            .user_details
            .as_ref()
            .and_then(|u| u.name.as_deref())
            .unwrap_or_default();
        let user_name = row
            .get(USER_NAME_COLUMN)
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(api_name)
            .to_string();

        let (skill_badge_count, skill_badge_names) = tally(&records, BadgeCategory::Skill);
        let (arcade_game_count, arcade_game_names) = tally(&records, BadgeCategory::Arcade);

        let summary = ProfileSummary {
            input: row.clone(),
            user_name,
            skill_badge_count,
            skill_badge_names,
            arcade_game_count,
            arcade_game_names,
            completion_time: completion::completion_time_at(&records, self.milestone),
        };
        (summary, records)
    }
}

fn extract_data(response: &Value) -> Result<ApiData> {
    if !response.is_object() {
        return Err(TrackerError::MissingData);
    }
    let response = ApiResponse::deserialize(response)?;
    response.data.ok_or(TrackerError::MissingData)
}

fn tally(records: &[BadgeRecord], category: BadgeCategory) -> (usize, String) {
    let names = records
        .iter()
        .filter(|r| r.category == category)
        .map(|r| r.name.as_str())
        .collect_vec();
    (names.len(), names.join(", "))
}
