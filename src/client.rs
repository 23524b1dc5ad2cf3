use serde_json::{json, Value};
use tracing::{debug, instrument, warn};

use crate::config::Config;
use crate::error::{Result, TrackerError};
use crate::model::DateMapping;
use crate::scraper;

/// Talks to the public profile pages and the profile analytics endpoint.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> badge_tracker::Result<()> {
/// use badge_tracker::{Config, ProfileClient};
///
/// let client = ProfileClient::new(Config::default())?;
/// let url = "https://www.cloudskillsboost.google/public_profiles/01fa1e14";
/// let analysis = client.analyze_profile(url).await?;
/// let dates = client.fetch_badge_dates(url).await;
/// println!("{} dated badges, data: {}", dates.len(), analysis["data"].is_object());
/// # Ok(())
/// # }
/// ```
pub struct ProfileClient {
    http: reqwest::Client,
    config: Config,
}

impl ProfileClient {
    /// Create a client configured from `config`.
    pub fn new(config: Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(TrackerError::ClientBuild)?;
        Ok(Self::with_client(http, config))
    }

    /// Create a client using the provided [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: Config) -> Self {
        Self {
            http: client,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Scrape earned dates from a public profile page.
    ///
    /// Any failure degrades to an empty mapping; the dates are optional
    /// for the reports.
    #[instrument(skip(self))]
    pub async fn fetch_badge_dates(&self, profile_url: &str) -> DateMapping {
        let parsed = scraper::get_document(&self.http, profile_url, self.config.scrape_timeout)
            .await
            .and_then(|document| scraper::badges::parse_badge_dates(&document));
        match parsed {
            Ok(dates) => dates,
            Err(e) => {
                warn!(error = %e, "could not scrape badge dates, date column will be empty");
                DateMapping::new()
            }
        }
    }

    /// Ask the analytics endpoint to analyze a public profile.
    #[instrument(skip(self))]
    pub async fn analyze_profile(&self, profile_url: &str) -> Result<Value> {
        let url = self.config.api_url.as_str();
        debug!(url, "sending profile to analytics api");

        let mut request = self
            .http
            .post(url)
            .timeout(self.config.api_timeout)
            .json(&json!({ "publicUrl": profile_url }));
        for (name, value) in &self.config.api_headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send().await.map_err(|e| TrackerError::Http {
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

        serde_json::from_str(&body).map_err(|e| TrackerError::Decode {
            url: url.to_owned(),
            source: e,
        })
    }
}
