pub(crate) mod badges;

pub(crate) use ::scraper::Html;
use std::time::Duration;

use ::scraper::{ElementRef, Selector};
use tracing::debug;

use crate::error::{Result, TrackerError};

/// Fetch a URL and parse the response body as an HTML document.
pub(crate) async fn get_document(
    client: &reqwest::Client,
    url: &str,
    timeout: Duration,
) -> Result<Html> {
    debug!(url, "fetching page");

    let response = client
        .get(url)
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| TrackerError::Http {
            url: url.to_owned(),
            source: e,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(TrackerError::UnexpectedStatus {
            url: url.to_owned(),
            status,
        });
    }

    let body = response.text().await.map_err(|e| TrackerError::ResponseBody {
        url: url.to_owned(),
        source: e,
    })?;

    Ok(Html::parse_document(&body))
}

/// Concatenated, trimmed text of the first element matching `selector`
/// inside `element`. `None` if nothing matches.
pub(crate) fn select_text(element: &ElementRef, selector: &Selector) -> Option<String> {
    element.select(selector).next().map(|el| {
        el.text()
            .collect::<String>()
            .replace(['\n', '\t'], " ")
            .trim()
            .to_string()
    })
}
