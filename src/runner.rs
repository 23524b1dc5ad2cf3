use tracing::{info, instrument, warn};

use crate::aggregate::Aggregator;
use crate::client::ProfileClient;
use crate::error::Result;
use crate::model::{DetailRow, InputRow, ProfileResult, ProfileSummary};
use crate::report;

/// Counts of one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    pub processed: usize,
    pub skipped: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub badges: usize,
}

/// Process every row of the configured input file, one profile at a time,
/// and write the summary, detail and failure reports.
///
/// Per-profile problems end up in the failure report; only file and
/// configuration errors are returned.
#[instrument(skip(client))]
pub async fn run(client: &ProfileClient) -> Result<RunReport> {
    let config = client.config();
    let table = report::read_input(&config.input_path, &config.url_column)?;
    let aggregator = Aggregator::new(config);

    let mut stats = RunReport::default();
    let mut summaries: Vec<ProfileSummary> = Vec::new();
    let mut details: Vec<DetailRow> = Vec::new();
    let mut failures: Vec<InputRow> = Vec::new();

    let total = table.rows.len();
    for (i, row) in table.rows.iter().enumerate() {
        let profile_url = row.get(&config.url_column).unwrap_or_default().trim();
        if profile_url.is_empty() {
            // header is line 1
            info!(line = i + 2, "skipping row without a profile URL");
            stats.skipped += 1;
            continue;
        }

        if stats.processed > 0 && !config.profile_delay.is_zero() {
            tokio::time::sleep(config.profile_delay).await;
        }
        stats.processed += 1;
        info!(profile = i + 1, total, url = profile_url, "processing profile");

        match process_profile(client, &aggregator, row, profile_url).await {
            ProfileResult::Success(summary, records) => {
                details.extend(aggregator.detail_rows(row, &records));
                summaries.push(summary);
                stats.succeeded += 1;
            }
            ProfileResult::Failure(row) => {
                failures.push(row);
                stats.failed += 1;
            }
        }
    }
    stats.badges = details.len();

    let header = report::summary_header(&config.identity_columns);
    report::write_summary(&config.summary_path, &header, &summaries)?;
    report::write_details(&config.details_path, &details)?;
    report::write_failures(&config.failures_path, &table.headers, &failures)?;

    info!(
        processed = stats.processed,
        succeeded = stats.succeeded,
        failed = stats.failed,
        "all profiles processed"
    );
    Ok(stats)
}

async fn process_profile(
    client: &ProfileClient,
    aggregator: &Aggregator,
    row: &InputRow,
    profile_url: &str,
) -> ProfileResult {
    let response = match client.analyze_profile(profile_url).await {
        Ok(response) => response,
        Err(e) => {
            warn!(url = profile_url, error = %e, "could not retrieve analytics data, adding to failed list");
            return ProfileResult::Failure(row.clone());
        }
    };
    let dates = client.fetch_badge_dates(profile_url).await;
    aggregator.aggregate(row, &response, &dates)
}
