use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://arcadecalc-v1-backend.onrender.com/api/v1/analyzeProfile";
pub const DEFAULT_URL_COLUMN: &str = "Google Cloud Skills Boost Profile URL";

/// Runtime settings shared by the client, the aggregator and the batch runner.
#[derive(Debug, Clone)]
pub struct Config {
    /// Endpoint that analyzes a public profile (`POST {"publicUrl": ...}`).
    pub api_url: String,
    /// Static headers sent with every analytics request.
    pub api_headers: Vec<(String, String)>,
    pub user_agent: String,
    pub scrape_timeout: Duration,
    pub api_timeout: Duration,
    /// Courtesy pause between two profiles.
    pub profile_delay: Duration,
    /// Number of dated badges needed to reach the completion milestone.
    pub completion_milestone: usize,

    pub input_path: PathBuf,
    pub summary_path: PathBuf,
    pub details_path: PathBuf,
    pub failures_path: PathBuf,

    /// Input column holding the public profile URL.
    pub url_column: String,
    /// Input columns repeated at the start of the summary header.
    pub identity_columns: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_headers: vec![
                ("source".to_string(), "lsqQXcYhauLsRDp".to_string()),
                ("Origin".to_string(), "https://arcadecalc.netlify.app".to_string()),
                ("Referer".to_string(), "https://arcadecalc.netlify.app/".to_string()),
            ],
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            scrape_timeout: Duration::from_secs(15),
            api_timeout: Duration::from_secs(20),
            profile_delay: Duration::from_secs(1),
            completion_milestone: 20,
            input_path: PathBuf::from("progress_data_input.csv"),
            summary_path: PathBuf::from("progress_data.csv"),
            details_path: PathBuf::from("google_cloud_badges_details.csv"),
            failures_path: PathBuf::from("failed_profiles.csv"),
            url_column: DEFAULT_URL_COLUMN.to_string(),
            identity_columns: ["User Name", "Email", DEFAULT_URL_COLUMN, "Access", "UR", "Co"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl Config {
    /// Read profile URLs from `column`. The summary header follows the
    /// rename so the URL is still carried into the summary.
    pub fn with_url_column(mut self, column: impl Into<String>) -> Self {
        let column = column.into();
        for identity in &mut self.identity_columns {
            if *identity == self.url_column {
                *identity = column.clone();
            }
        }
        self.url_column = column;
        self
    }
}
