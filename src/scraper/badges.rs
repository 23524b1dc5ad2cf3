use ::scraper::{ElementRef, Selector};
use tracing::debug;

use crate::error::Result;
use crate::model::DateMapping;
use crate::scraper::{select_text, Html};

const BADGE_SELECTOR: &str = "div.profile-badge";
const TITLE_SELECTOR: &str = "span.ql-title-medium";
const DATE_SELECTOR: &str = "span.ql-body-medium";
const EARNED_PREFIX: &str = "Earned ";

/// Badge title → earned-date text for every badge card on a public profile.
/// Cards missing a title or a date are skipped; a repeated title keeps the
/// last card's date.
pub(crate) fn parse_badge_dates(document: &Html) -> Result<DateMapping> {
    let badge_selector = Selector::parse(BADGE_SELECTOR)?;
    let title_selector = Selector::parse(TITLE_SELECTOR)?;
    let date_selector = Selector::parse(DATE_SELECTOR)?;

    let dates: DateMapping = document
        .select(&badge_selector)
        .filter_map(|badge| parse_badge(&badge, &title_selector, &date_selector))
        .collect();

    debug!(count = dates.len(), "parsed badge dates");
    Ok(dates)
}

fn parse_badge(
    badge: &ElementRef,
    title_selector: &Selector,
    date_selector: &Selector,
) -> Option<(String, String)> {
    let title = select_text(badge, title_selector).filter(|t| !t.is_empty())?;
    let date = select_text(badge, date_selector)?;
    let date = date.replacen(EARNED_PREFIX, "", 1).trim().to_string();
    Some((title, date))
}
