use ::scraper::error::SelectorErrorKind;
use std::path::PathBuf;

/// All errors that can occur while collecting and reporting badge progress.
#[derive(thiserror::Error, Debug)]
pub enum TrackerError {
    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Server returned a non-success HTTP status code.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failed to read the response body as text.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// The analytics API answered with something that is not JSON.
    #[error("failed to decode JSON from {url}: {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },

    /// The analytics response has no `data` mapping.
    #[error("response has no `data` object")]
    MissingData,

    /// A nested field of the analytics response has an unexpected shape.
    #[error("malformed analytics response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    /// A CSS selector string could not be parsed.
    #[error("invalid CSS selector: {0}")]
    Selector(String),

    /// The HTTP client could not be constructed.
    #[error("failed to build http client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// Reading or writing a CSV record failed.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// A filesystem operation failed.
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The input file lacks the profile URL column.
    #[error("input file '{}' must contain a '{column}' column", .path.display())]
    MissingColumn { path: PathBuf, column: String },
}

impl<'a> From<SelectorErrorKind<'a>> for TrackerError {
    fn from(err: SelectorErrorKind<'a>) -> Self {
        TrackerError::Selector(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;
