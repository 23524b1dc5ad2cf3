pub use aggregate::Aggregator;
pub use client::ProfileClient;
pub use config::Config;
pub use error::{Result, TrackerError};
pub use runner::{run, RunReport};

pub mod aggregate;
pub mod client;
pub mod collector;
pub mod completion;
pub mod config;
pub mod dates;
pub mod error;
pub mod model;
pub mod report;
pub mod runner;
pub(crate) mod scraper;
