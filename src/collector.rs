use crate::dates::DateNormalizer;
use crate::model::{BadgeCategory, BadgeRecord, DateMapping, RawBadge, NOT_AVAILABLE};

/// Join API badge lists with scraped earned dates.
///
/// Output keeps the group order and the order inside each group. Missing
/// names become `N/A` and are never matched against the date mapping.
pub fn collect(
    groups: &[(BadgeCategory, &[RawBadge])],
    dates: &DateMapping,
    normalizer: &DateNormalizer,
) -> Vec<BadgeRecord> {
    groups
        .iter()
        .flat_map(|(category, badges)| badges.iter().map(move |b| (*category, b)))
        .map(|(category, badge)| build_record(category, badge, dates, normalizer))
        .collect()
}

fn build_record(
    category: BadgeCategory,
    badge: &RawBadge,
    dates: &DateMapping,
    normalizer: &DateNormalizer,
) -> BadgeRecord {
    let name = badge.name();
    let date_text = name
        .and_then(|n| dates.get(n))
        .map(|d| d.trim())
        .filter(|d| !d.is_empty())
        .unwrap_or(NOT_AVAILABLE)
        .to_string();
    let date = name.and_then(|_| normalizer.normalize(&date_text));

    BadgeRecord {
        name: name.unwrap_or(NOT_AVAILABLE).to_string(),
        category,
        points: badge.points(),
        date_text,
        date,
    }
}
