use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

use super::badge::BadgeCategory;

/// Top-level body returned by the profile analytics endpoint.
///
/// Every level is optional so that a missing or `null` branch reads as
/// "not found" instead of failing. A branch that is present but not a JSON
/// object is rejected, arrays included.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiResponse {
    #[serde(default, deserialize_with = "object")]
    pub data: Option<ApiData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiData {
    #[serde(default, deserialize_with = "object")]
    pub user_details: Option<UserDetails>,
    #[serde(default, deserialize_with = "object")]
    pub badges_overview: Option<BadgesOverview>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserDetails {
    #[serde(default)]
    pub name: Option<String>,
}

/// Badge groups of a profile. Skill badges form one group; the arcade
/// total spans the four remaining groups.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgesOverview {
    #[serde(default, deserialize_with = "object")]
    pub skill_badges: Option<BadgeGroup>,
    #[serde(default, deserialize_with = "object")]
    pub base_camp_badges: Option<BadgeGroup>,
    #[serde(default, deserialize_with = "object")]
    pub level_badges: Option<BadgeGroup>,
    #[serde(default, deserialize_with = "object")]
    pub trivia_badges: Option<BadgeGroup>,
    #[serde(default, deserialize_with = "object")]
    pub special_badges: Option<BadgeGroup>,
}

impl BadgesOverview {
    /// Badge groups in reporting order, each tagged with its category.
    pub fn groups(&self) -> [(BadgeCategory, &[RawBadge]); 5] {
        [
            (BadgeCategory::Skill, badges_of(&self.skill_badges)),
            (BadgeCategory::Arcade, badges_of(&self.base_camp_badges)),
            (BadgeCategory::Arcade, badges_of(&self.level_badges)),
            (BadgeCategory::Arcade, badges_of(&self.trivia_badges)),
            (BadgeCategory::Arcade, badges_of(&self.special_badges)),
        ]
    }
}

fn badges_of(group: &Option<BadgeGroup>) -> &[RawBadge] {
    group
        .as_ref()
        .and_then(|g| g.badges.as_deref())
        .unwrap_or_default()
}

/// Accept `null` or a JSON object; anything else is a shape error.
fn object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Option::<Value>::deserialize(deserializer)?
        .map(from_object::<T, D::Error>)
        .transpose()
}

/// Accept `null` or an array whose entries are all JSON objects.
fn object_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Option::<Vec<Value>>::deserialize(deserializer)?
        .map(|entries| {
            entries
                .into_iter()
                .map(from_object::<T, D::Error>)
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()
}

fn from_object<T: DeserializeOwned, E: de::Error>(value: Value) -> Result<T, E> {
    if !value.is_object() {
        return Err(E::custom(format!("expected a JSON object, found {}", kind(&value))));
    }
    T::deserialize(value).map_err(E::custom)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BadgeGroup {
    #[serde(default, deserialize_with = "object_list")]
    pub badges: Option<Vec<RawBadge>>,
}

/// A badge entry exactly as the API reports it. Fields are kept loose so
/// that a wrongly typed name or point value degrades to a default.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawBadge {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub point: Option<Value>,
}

impl RawBadge {
    /// Trimmed badge name, if the entry carries a non-empty string.
    pub fn name(&self) -> Option<&str> {
        self.name
            .as_ref()
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|n| !n.is_empty())
    }

    /// Point value, `0` when missing or not a non-negative integer.
    pub fn points(&self) -> u32 {
        match &self.point {
            Some(Value::Number(n)) => n
                .as_u64()
                .and_then(|p| u32::try_from(p).ok())
                .unwrap_or_default(),
            Some(Value::String(s)) => s.trim().parse().unwrap_or_default(),
            _ => 0,
        }
    }
}
