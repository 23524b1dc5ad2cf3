use itertools::Itertools;

use crate::model::BadgeRecord;

/// Badges a profile needs before it counts as complete.
pub const COMPLETION_MILESTONE: usize = 20;

/// Earned-date text of the [`COMPLETION_MILESTONE`]th earliest dated badge.
pub fn completion_time(records: &[BadgeRecord]) -> Option<String> {
    completion_time_at(records, COMPLETION_MILESTONE)
}

/// Earned-date text of the `milestone`th earliest dated badge, across all
/// categories. Undated badges are ignored and equal dates keep their input
/// order. The original text is returned, not the parsed date.
pub fn completion_time_at(records: &[BadgeRecord], milestone: usize) -> Option<String> {
    if milestone == 0 {
        return None;
    }
    records
        .iter()
        .filter_map(|r| r.date.map(|d| (d, r)))
        .sorted_by_key(|(date, _)| *date)
        .nth(milestone - 1)
        .map(|(_, r)| r.date_text.clone())
}

#[cfg(test)]
mod tests {
    use chrono::{Days, NaiveDate};

    use super::*;
    use crate::model::{BadgeCategory, NOT_AVAILABLE};

    fn dated(name: &str, date: NaiveDate) -> BadgeRecord {
        BadgeRecord {
            name: name.to_string(),
            category: BadgeCategory::Arcade,
            points: 1,
            date_text: date.format("%b %-d, %Y").to_string(),
            date: Some(date),
        }
    }

    fn undated(name: &str) -> BadgeRecord {
        BadgeRecord {
            name: name.to_string(),
            category: BadgeCategory::Skill,
            points: 1,
            date_text: NOT_AVAILABLE.to_string(),
            date: None,
        }
    }

    /// `count` badges on consecutive days starting Jan 1, 2025, newest first.
    fn descending(count: u64) -> Vec<BadgeRecord> {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        (0..count)
            .rev()
            .map(|i| dated(&format!("badge {i}"), start + Days::new(i)))
            .collect()
    }

    #[test]
    fn test_nineteen_is_not_enough() {
        let mut records = descending(19);
        records.push(undated("no date"));
        assert_eq!(completion_time(&records), None);
    }

    #[test]
    fn test_exactly_twenty_returns_last() {
        let records = descending(20);
        assert_eq!(completion_time(&records).as_deref(), Some("Jan 20, 2025"));
    }

    #[test]
    fn test_later_badges_are_ignored() {
        let mut records = descending(25);
        records.insert(3, undated("no date"));
        assert_eq!(completion_time(&records).as_deref(), Some("Jan 20, 2025"));
    }

    #[test]
    fn test_returns_original_text() {
        let mut records = descending(20);
        let last = records
            .iter_mut()
            .find(|r| r.name == "badge 19")
            .unwrap();
        last.date_text = "Earned Jan 20, 2025 EST".to_string();
        assert_eq!(
            completion_time(&records).as_deref(),
            Some("Earned Jan 20, 2025 EST")
        );
    }

    #[test]
    fn test_ties_keep_input_order() {
        let mut records = descending(19);
        let boundary = NaiveDate::from_ymd_opt(2025, 1, 20).unwrap();
        let mut first = dated("first", boundary);
        first.date_text = "first".to_string();
        let mut second = dated("second", boundary);
        second.date_text = "second".to_string();
        records.push(first);
        records.push(second);

        for _ in 0..3 {
            assert_eq!(completion_time(&records).as_deref(), Some("first"));
        }

        let swapped = records.len() - 1;
        records.swap(swapped - 1, swapped);
        assert_eq!(completion_time(&records).as_deref(), Some("second"));
    }

    #[test]
    fn test_custom_milestone() {
        let records = descending(5);
        assert_eq!(completion_time_at(&records, 3).as_deref(), Some("Jan 3, 2025"));
        assert_eq!(completion_time_at(&records, 6), None);
        assert_eq!(completion_time_at(&records, 0), None);
    }
}
